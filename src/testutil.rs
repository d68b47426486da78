use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::Store;

/// Opens a throwaway store under the system temp directory.
pub fn test_store(name: &str) -> Store {
    let dir = std::env::temp_dir().join(format!(
        "gearbook_test_{}_{}",
        name,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .subsec_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    Store::open(dir.join("gearbook.db")).unwrap()
}
