//! The fixed sprite set hosts draw with.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Every sprite a renderer needs, loaded once at startup. The first
/// simulation tick is gated on the full set being present.
pub const SPRITE_NAMES: [&str; 18] = [
    "grass",
    "sand",
    "volcano",
    "hotspring",
    "acidvolcano",
    "person",
    "zombie",
    "house",
    "flag1",
    "flag2",
    "flag3",
    "flag4",
    "flag5",
    "flag6",
    "flag7",
    "flag8",
    "flag9",
    "flag10",
];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing textures: {missing:?}")]
    Missing { missing: Vec<String> },
}

pub struct AssetCatalog {
    dir: PathBuf,
}

impl AssetCatalog {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn texture_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }

    /// Check the whole manifest, reporting every absent texture at once.
    pub fn verify(&self) -> Result<(), AssetError> {
        let missing: Vec<String> = SPRITE_NAMES
            .iter()
            .filter(|name| !self.texture_path(name).exists())
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AssetError::Missing { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn verify_reports_every_missing_texture() {
        let dir = tempfile::tempdir().unwrap();
        for name in SPRITE_NAMES.iter().take(16) {
            fs::write(dir.path().join(format!("{name}.png")), b"png").unwrap();
        }
        let catalog = AssetCatalog::new(dir.path());
        let err = catalog.verify().unwrap_err();
        let AssetError::Missing { missing } = err;
        assert_eq!(missing, vec!["flag9".to_string(), "flag10".to_string()]);
    }

    #[test]
    fn verify_passes_with_full_set() {
        let dir = tempfile::tempdir().unwrap();
        for name in SPRITE_NAMES {
            fs::write(dir.path().join(format!("{name}.png")), b"png").unwrap();
        }
        assert!(AssetCatalog::new(dir.path()).verify().is_ok());
    }
}
