//! Filesystem utilities for p4lockmon.
//!
//! The metrics file is shared with a scraper, so it is only ever replaced
//! atomically.

pub mod atomic;

pub use atomic::StagedWrite;
