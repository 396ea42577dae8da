//! Resource classification of locked paths.
//!
//! Maps a lock's filesystem path to the logical Perforce resource it
//! protects. Classification is a pure function of the path.

/// Logical resource category of a locked path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    /// `server.locks/clientEntity/...` workspace locks.
    ClientEntity,
    /// `server.locks/meta/...` metadata locks.
    Meta,
    /// A database table (`db.*`), `rdb.lbr`, or a `storage*` file.
    DbTable,
    None,
}

/// Result of classifying a path.
///
/// The clientEntity and meta checks are independent; a path matching both
/// counts towards both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceClass {
    pub client_entity: bool,
    pub meta: bool,
    /// Table or lock name used in reports; empty when the path is not one
    /// of the reported resources.
    pub label: String,
}

impl ResourceClass {
    /// First matching category, in ClientEntity, Meta, DbTable order.
    pub fn category(&self) -> ResourceCategory {
        if self.client_entity {
            ResourceCategory::ClientEntity
        } else if self.meta {
            ResourceCategory::Meta
        } else if !self.label.is_empty() {
            ResourceCategory::DbTable
        } else {
            ResourceCategory::None
        }
    }
}

const LOCK_DIRS: [&str; 3] = ["/clients/", "/clientEntity/", "/meta/"];

pub fn is_client_entity_path(path: &str) -> bool {
    path.contains("clientEntity")
}

pub fn is_meta_path(path: &str) -> bool {
    path.contains("server.locks/meta")
}

/// Compute the report label of a path.
///
/// The final path segment is used verbatim for database tables, `rdb.lbr`
/// and `storage*` files. Otherwise a path inside one of the server lock
/// directories is labelled after that directory (`/meta/` gives `metaLock`).
pub fn table_label(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or("");
    if segment.starts_with("db.") || segment == "rdb.lbr" || segment.starts_with("storage") {
        return segment.to_string();
    }

    LOCK_DIRS
        .iter()
        .find(|dir| path.contains(*dir))
        .map(|dir| format!("{}Lock", dir.replace('/', "")))
        .unwrap_or_default()
}

/// Classify a locked path.
pub fn classify(path: &str) -> ResourceClass {
    ResourceClass {
        client_entity: is_client_entity_path(path),
        meta: is_meta_path(path),
        label: table_label(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_table_label() {
        let class = classify("/p4/1/root/db.have");
        assert_eq!(class.category(), ResourceCategory::DbTable);
        assert_eq!(class.label, "db.have");
    }

    #[test]
    fn test_rdb_and_storage_labels() {
        assert_eq!(table_label("/p4/1/root/rdb.lbr"), "rdb.lbr");
        assert_eq!(table_label("/p4/1/root/storage.lock"), "storage.lock");
        assert_eq!(table_label("/p4/1/root/rdb.lbr.old"), "");
    }

    #[test]
    fn test_client_entity_lock() {
        let class = classify("/p4/1/root/server.locks/clientEntity/10,d/robomerge-main-ts");
        assert_eq!(class.category(), ResourceCategory::ClientEntity);
        assert_eq!(class.label, "clientEntityLock");
    }

    #[test]
    fn test_meta_lock() {
        // final segment "db" has no dot, so the directory label applies
        let class = classify("/p4/1/root/server.locks/meta/db");
        assert_eq!(class.category(), ResourceCategory::Meta);
        assert_eq!(class.label, "metaLock");
    }

    #[test]
    fn test_clients_dir_lock() {
        let class = classify("/p4/1/root/server.locks/clients/ws1");
        assert_eq!(class.category(), ResourceCategory::DbTable);
        assert_eq!(class.label, "clientsLock");
    }

    #[test]
    fn test_unrelated_path() {
        let class = classify("/p4/1/logs/log");
        assert_eq!(class.category(), ResourceCategory::None);
        assert_eq!(class.label, "");
    }

    #[test]
    fn test_similar_table_names_are_distinct() {
        assert_eq!(table_label("/path/db.config"), "db.config");
        assert_eq!(table_label("/path/db.configh"), "db.configh");
    }

    #[test]
    fn test_independent_checks_both_fire() {
        let class = classify("/p4/1/root/server.locks/meta/clientEntity/ws1");
        assert!(class.client_entity);
        assert!(class.meta);
        assert_eq!(class.category(), ResourceCategory::ClientEntity);
        assert_eq!(class.label, "clientEntityLock");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let path = "/p4/1/root/server.locks/meta/db";
        assert_eq!(classify(path), classify(path));
    }
}
