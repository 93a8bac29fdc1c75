use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".finstudent";
const HOME_ENV: &str = "FINSTUDENT_HOME";

/// Resolves where ledger slots live on disk.
pub struct PathResolver;

impl PathResolver {
    /// `$FINSTUDENT_HOME` if set, otherwise `~/.finstudent`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins() {
        let root = PathBuf::from("/tmp/finstudent-explicit");
        assert_eq!(PathResolver::resolve_base(Some(root.clone())), root);
    }

    #[test]
    fn ensure_dir_creates_nested_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).expect("idempotent");
    }
}
