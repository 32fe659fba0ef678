//! Gzip compression of rotated log files

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Handles compression of rotated log files
pub struct CompressionHandler {
    enabled: bool,
}

impl CompressionHandler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Gzips the file in place, replacing it with a `.gz` sibling.
    pub fn compress_file(&self, file_path: &Path) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let input = fs::read(file_path)?;

        let compressed_path = file_path.with_extension(
            format!(
                "{}.gz",
                file_path.extension().unwrap_or_default().to_string_lossy()
            )
            .trim_start_matches('.'),
        );

        let output_file = File::create(&compressed_path)?;
        let mut encoder = GzEncoder::new(output_file, Compression::default());
        encoder.write_all(&input)?;
        encoder.finish()?;

        fs::remove_file(file_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn compression_disabled_leaves_file() {
        let handler = CompressionHandler::new(false);
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("sync.log");

        fs::write(&file_path, "sync run complete").unwrap();

        assert!(handler.compress_file(&file_path).is_ok());
        assert!(file_path.exists());
        assert!(!dir.path().join("sync.log.gz").exists());
    }

    #[test]
    fn compression_enabled_roundtrip() {
        let handler = CompressionHandler::new(true);
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("sync.log");
        let content = "fetched 42 jobs from naukri\nskipped 3 duplicates\n";

        fs::write(&file_path, content).unwrap();
        assert!(handler.compress_file(&file_path).is_ok());
        assert!(!file_path.exists());

        let compressed = fs::read(dir.path().join("sync.log.gz")).unwrap();
        let mut decoder = GzDecoder::new(&compressed[..]);
        let mut restored = String::new();
        decoder.read_to_string(&mut restored).unwrap();
        assert_eq!(restored, content);
    }
}
