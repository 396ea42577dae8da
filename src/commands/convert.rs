//! `convert`: print the JSON form of a legacy lslocks table.

use super::analyze::read_snapshot;
use crate::cli::ConvertArgs;
use crate::error::Result;
use crate::locks::legacy_to_json;

pub fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let table = read_snapshot(&args.locks)?;
    println!("{}", legacy_to_json(&table)?);
    Ok(())
}
