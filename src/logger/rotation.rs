//! Size-based file rotation

use crate::logger::compression::CompressionHandler;
use crate::logger::config::RotationConfig;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Manages rotation of the active log file and cleanup of old rotations.
pub struct RotationManager {
    config: RotationConfig,
    compression_handler: CompressionHandler,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        let compression_handler = CompressionHandler::new(config.compress);

        Self {
            config,
            compression_handler,
        }
    }

    pub fn should_rotate(&self, current_file_size: u64) -> bool {
        current_file_size >= self.config.max_size
    }

    /// Renames the active file to a timestamped sibling, compresses it if
    /// configured, and prunes old rotations.
    pub fn rotate(&mut self, current_path: &Path) -> anyhow::Result<()> {
        let rotated_path = self.generate_rotated_path(current_path);

        if current_path.exists() {
            fs::rename(current_path, &rotated_path)?;

            if self.config.compress {
                self.compression_handler.compress_file(&rotated_path)?;
            }
        }

        self.cleanup_files_internal(current_path, self.config.max_files)?;

        Ok(())
    }

    fn generate_rotated_path(&self, base_path: &Path) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();
        let ext = base_path.extension().unwrap_or_default().to_string_lossy();

        let new_name = if ext.is_empty() {
            format!("{}.{}", stem, timestamp)
        } else {
            format!("{}.{}.{}", stem, timestamp, ext)
        };

        base_path.with_file_name(new_name)
    }

    /// More aggressive cleanup used when writes start failing, keeps only
    /// half of max_files.
    pub fn force_cleanup(&mut self, base_path: &Path) -> anyhow::Result<()> {
        let aggressive_max = (self.config.max_files / 2).max(1);
        self.cleanup_files_internal(base_path, aggressive_max)
    }

    fn cleanup_files_internal(&self, base_path: &Path, max_files: usize) -> anyhow::Result<()> {
        let parent = base_path.parent().unwrap_or(Path::new("."));
        let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();

        let mut rotated_files: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                let file_name = path.file_name().unwrap_or_default().to_string_lossy();
                file_name.starts_with(&*stem) && path != base_path
            })
            .collect();

        // Oldest first
        rotated_files.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            a_time.cmp(&b_time)
        });

        while rotated_files.len() >= max_files {
            if let Some(oldest) = rotated_files.first() {
                fs::remove_file(oldest)?;
                rotated_files.remove(0);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn should_rotate_at_threshold() {
        let config = RotationConfig {
            max_size: 1024,
            max_files: 5,
            compress: false,
        };
        let manager = RotationManager::new(config);

        assert!(!manager.should_rotate(512));
        assert!(!manager.should_rotate(1023));
        assert!(manager.should_rotate(1024));
        assert!(manager.should_rotate(2048));
    }

    #[test]
    fn rotate_renames_and_prunes() {
        let dir = tempdir().unwrap();
        let base_path = dir.path().join("app.log");
        fs::write(&base_path, "current content").unwrap();

        let config = RotationConfig {
            max_size: 8,
            max_files: 3,
            compress: false,
        };
        let mut manager = RotationManager::new(config);
        manager.rotate(&base_path).unwrap();

        assert!(!base_path.exists());
        let rotated: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(rotated.len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn rotation_triggers_iff_size_reaches_max(
            current_size in 1u64..10_000_000u64,
            max_size in 1u64..10_000_000u64
        ) {
            let config = RotationConfig {
                max_size,
                max_files: 5,
                compress: false,
            };
            let manager = RotationManager::new(config);

            prop_assert_eq!(manager.should_rotate(current_size), current_size >= max_size);
        }
    }
}
