use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::{
    api::UploadClient,
    domain::{model::DOWNLOAD_FILE_NAME, AppError, SelectedFile},
    utils::{display_name, download_candidates, sniff_mime},
};

/// Bytes read from the head of a file for content sniffing
const SNIFF_LEN: usize = 8;

#[derive(Clone)]
pub struct UploadCoordinator {
    client: UploadClient,
    download_dir: PathBuf,
}

impl UploadCoordinator {
    pub fn new(client: UploadClient, download_dir: PathBuf) -> Self {
        Self {
            client,
            download_dir,
        }
    }

    pub async fn choose_file(&self) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title("Select a PDF")
            .add_filter("PDF document", &["pdf"])
            .pick_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    pub async fn inspect(&self, path: PathBuf) -> Result<SelectedFile, AppError> {
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| AppError::Inspect(e.to_string()))?;
        if !metadata.is_file() {
            return Err(AppError::Inspect(format!(
                "{} is not a file",
                display_name(&path)
            )));
        }

        let head = read_head(&path)
            .await
            .map_err(|e| AppError::Inspect(e.to_string()))?;

        Ok(SelectedFile {
            name: display_name(&path),
            mime: sniff_mime(&path, &head).to_string(),
            size: metadata.len(),
            path,
        })
    }

    pub async fn upload(&self, file: SelectedFile) -> Result<Bytes, AppError> {
        tracing::info!(
            name = %file.name,
            size = file.size,
            endpoint = %self.client.config().endpoint,
            "Uploading document"
        );

        let contents = tokio::fs::read(&file.path)
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read {}: {}", file.name, e)))?;

        match self.client.process_document(&file.name, contents).await {
            Ok(document) => {
                tracing::info!(bytes = document.len(), "Processed document received");
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upload failed");
                Err(AppError::Transport(e.to_string()))
            }
        }
    }

    /// Write the processed document into the download directory under the
    /// fixed download name, numbering it if that name is taken.
    pub async fn save_download(&self, document: Bytes) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create download folder: {}", e)))?;

        let (path, mut file) = create_download_file(&self.download_dir).await?;

        file.write_all(&document)
            .await
            .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;

        tracing::info!(path = %path.display(), "Saved processed document");
        Ok(path)
    }
}

/// Claim the first free download name. `create_new` makes the claim atomic,
/// so a file that appears between attempts is never truncated.
async fn create_download_file(dir: &Path) -> Result<(PathBuf, tokio::fs::File), AppError> {
    for path in download_candidates(dir, DOWNLOAD_FILE_NAME) {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(AppError::Io(format!("Failed to create file: {}", e))),
        }
    }
    Err(AppError::Io(format!(
        "No free name for {} in {}",
        DOWNLOAD_FILE_NAME,
        dir.display()
    )))
}

async fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head).await?;
    Ok(head)
}
