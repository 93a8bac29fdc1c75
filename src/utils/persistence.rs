use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{core::utils::ensure_dir, errors::LedgerError};

const TMP_SUFFIX: &str = "tmp";

/// Writes `data` to `path` by staging to a sibling temporary file and renaming.
pub fn replace_file(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let result = stage_and_rename(&tmp, path, data);
    if result.is_err() && tmp.exists() {
        if let Err(err) = fs::remove_file(&tmp) {
            tracing::warn!(path = %tmp.display(), error = %err, "could not remove staging file");
        }
    }
    result
}

fn stage_and_rename(tmp: &Path, path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Serializes `value` as pretty JSON and writes it atomically.
pub fn save_json_to_file<T: Serialize>(value: &T, path: &Path) -> Result<(), LedgerError> {
    let json = serde_json::to_string_pretty(value)?;
    replace_file(path, &json)
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
