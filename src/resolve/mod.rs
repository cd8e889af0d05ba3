//! Resolver: maps loose identifiers onto concrete backend records.
//!
//! Rosters are always fetched fresh by the caller before resolution; nothing
//! here is cached across requests.

use std::fs;
use std::path::Path;

use crate::errors::ApiError;
use crate::models::{BackupRecord, ClientRecord, ClientRef};

/// Find one client in a freshly fetched roster.
///
/// Numeric references are matched against ids only, with no fallback to
/// name search when the id is absent. Name references require an exact,
/// case-sensitive match. First match wins.
pub fn resolve_client<'a>(
    roster: &'a [ClientRecord],
    identifier: &ClientRef,
) -> Result<&'a ClientRecord, ApiError> {
    let found = match identifier {
        ClientRef::Id(id) => roster.iter().find(|c| c.id == *id),
        ClientRef::Name(name) => roster.iter().find(|c| c.name == *name),
    };

    found.ok_or_else(|| ApiError::NotFound(format!("Client '{identifier}' non trouvé")))
}

/// Find one backup in one client's roster, scoped to that client only.
pub fn resolve_backup(
    roster: &[BackupRecord],
    client_id: i64,
    backup_id: i64,
) -> Result<&BackupRecord, ApiError> {
    roster.iter().find(|b| b.id == backup_id).ok_or_else(|| {
        ApiError::NotFound(format!(
            "Sauvegarde '{backup_id}' non trouvée pour le client {client_id}"
        ))
    })
}

/// The backup with the greatest `backup_time`; roster order breaks ties.
pub fn latest_backup(roster: &[BackupRecord]) -> Result<&BackupRecord, ApiError> {
    roster
        .iter()
        .reduce(|best, b| if b.backup_time > best.backup_time { b } else { best })
        .ok_or_else(|| ApiError::NotFound("Aucune sauvegarde trouvée".to_string()))
}

/// Bytes consumed by a client's backups; entries without a size are skipped.
pub fn used_space(roster: &[BackupRecord]) -> i64 {
    roster.iter().filter_map(|b| b.total_bytes).sum()
}

/// Relative paths of every file inside a backup.
///
/// Prefers the listing the server reported; otherwise walks the backup's
/// storage path. Degrades to an empty listing rather than erroring, and
/// walks in sorted directory order so repeated calls agree.
pub fn list_backup_files(backup: &BackupRecord) -> Vec<String> {
    if let Some(files) = &backup.files {
        if !files.is_empty() {
            return files.clone();
        }
    }

    if let Some(path) = &backup.path {
        let root = Path::new(path);
        if root.exists() {
            let mut out = Vec::new();
            walk_files(root, root, &mut out);
            return out;
        }
    }

    Vec::new()
}

fn walk_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk_files(root, &path, out);
        } else if path.is_file() {
            if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_string_lossy().into_owned());
            }
        }
    }
}
