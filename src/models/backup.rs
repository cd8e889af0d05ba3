//! Backup record as reported by the backup roster call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One backup belonging to exactly one client.
///
/// `total_bytes` is absent for backups whose size the server has not
/// computed; used-space sums must skip those rather than treat them as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRecord {
    pub id: i64,
    #[serde(default)]
    pub backup_time: i64,
    #[serde(default)]
    pub total_bytes: Option<i64>,
    /// File listing when the server reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// On-disk storage path when the server exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let backup: BackupRecord = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(backup.id, 3);
        assert_eq!(backup.backup_time, 0);
        assert!(backup.total_bytes.is_none());
        assert!(backup.files.is_none());
    }

    #[test]
    fn test_extra_fields_survive() {
        let backup: BackupRecord =
            serde_json::from_str(r#"{"id": 3, "incremental": 1, "archived": false}"#).unwrap();
        assert_eq!(backup.extra.get("incremental"), Some(&Value::from(1)));
    }
}
