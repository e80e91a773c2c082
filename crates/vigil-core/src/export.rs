//! One-way JSON backup of the plan list.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{Result, VigilError},
    models::OperationPlan,
};

/// File name used when no output path is given.
pub const BACKUP_FILE_NAME: &str = "vigil_backup.json";

fn fs_error(path: &Path) -> impl FnOnce(std::io::Error) -> VigilError + '_ {
    move |source| VigilError::FileSystem {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `plans` as a pretty JSON array to `path`.
///
/// A directory path receives [`BACKUP_FILE_NAME`]. The file is written next
/// to its destination and renamed into place, so readers never observe a
/// partial backup. Returns the path written.
pub fn export_backup(plans: &[OperationPlan], path: &Path) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(BACKUP_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    let json = serde_json::to_string_pretty(plans)?;
    let staging = target.with_extension("json.tmp");
    fs::write(&staging, json).map_err(fs_error(&staging))?;
    fs::rename(&staging, &target).map_err(fs_error(&target))?;

    log::info!("Exported {} plans to {}", plans.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::seed::sample_operations;

    #[test]
    fn test_export_into_directory_uses_default_name() {
        let dir = TempDir::new().unwrap();
        let plans = sample_operations();

        let written = export_backup(&plans, dir.path()).unwrap();
        assert_eq!(written, dir.path().join(BACKUP_FILE_NAME));

        let back: Vec<OperationPlan> =
            serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(back, plans);
        assert!(!written.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = export_backup(&[], &dir.path().join("missing/backup.json")).unwrap_err();
        assert!(matches!(err, VigilError::FileSystem { .. }));
    }
}
