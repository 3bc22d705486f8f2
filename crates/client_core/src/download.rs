use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::info;

/// Destination for archives returned by the backend.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Stores `bytes` under `filename` and returns where they ended up.
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves downloads into a directory, replacing any earlier file with the
/// same name.
///
/// Bytes go to a `<filename>.part` file first and are renamed into place
/// once fully written, so a failed save never leaves a truncated archive.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .filter(|name| *name == filename)
            .ok_or_else(|| anyhow!("invalid download filename '{filename}'"))?;

        fs::create_dir_all(&self.dir).await.with_context(|| {
            format!(
                "failed to create download directory '{}'",
                self.dir.display()
            )
        })?;

        let target = self.dir.join(name);
        let partial = self.dir.join(format!("{filename}.part"));
        if let Err(err) = write_then_rename(&partial, &target, bytes).await {
            let _ = fs::remove_file(&partial).await;
            return Err(err);
        }

        info!(path = %target.display(), size_bytes = bytes.len(), "saved download");
        Ok(target)
    }
}

async fn write_then_rename(partial: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(partial)
        .await
        .with_context(|| format!("failed to create '{}'", partial.display()))?;
    file.write_all(bytes)
        .await
        .with_context(|| format!("failed to write '{}'", partial.display()))?;
    file.flush().await?;
    drop(file);

    fs::rename(partial, target).await.with_context(|| {
        format!(
            "failed to move '{}' to '{}'",
            partial.display(),
            target.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_archive_without_leftover_part_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = DirectorySink::new(dir.path().join("downloads"));

        let saved = sink
            .save("colmap_project.zip", b"PK\x03\x04archive")
            .await
            .expect("save");

        assert_eq!(saved, dir.path().join("downloads").join("colmap_project.zip"));
        assert_eq!(std::fs::read(&saved).expect("read"), b"PK\x03\x04archive");
        assert!(!dir
            .path()
            .join("downloads")
            .join("colmap_project.zip.part")
            .exists());
    }

    #[tokio::test]
    async fn replaces_existing_archive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = DirectorySink::new(dir.path());
        std::fs::write(dir.path().join("colmap_project.zip"), b"old").expect("seed");

        let saved = sink.save("colmap_project.zip", b"new").await.expect("save");

        assert_eq!(std::fs::read(saved).expect("read"), b"new");
    }

    #[tokio::test]
    async fn rejects_filenames_with_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = DirectorySink::new(dir.path());

        let err = sink
            .save("../escape.zip", b"x")
            .await
            .expect_err("must reject");
        assert!(err.to_string().contains("invalid download filename"));
    }

    #[tokio::test]
    async fn failed_save_removes_part_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory in the target's place makes the final rename fail.
        std::fs::create_dir(dir.path().join("colmap_project.zip")).expect("blocker");
        std::fs::write(dir.path().join("colmap_project.zip").join("keep"), b"x").expect("fill");
        let sink = DirectorySink::new(dir.path());

        sink.save("colmap_project.zip", b"bytes")
            .await
            .expect_err("rename onto directory must fail");

        assert!(!dir.path().join("colmap_project.zip.part").exists());
    }
}
