use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::dto::submission_dto::UploadFile;
use crate::util::minio::ObjectStore;

pub const UPLOAD_PREFIX: &str = "uploads";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Upload stopped at `index`; files before it stay stored but are not reported.
    #[error("Failed to upload {filename}: {reason}")]
    FileFailed {
        index: usize,
        filename: String,
        reason: String,
    },
}

/// `.ext` of the original filename, lowercased, or nothing when it has none.
fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.trim()))
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Timestamped, randomized object name so concurrent uploads never collide.
pub fn object_name_for(filename: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}/{}-{}{}",
        UPLOAD_PREFIX,
        Utc::now().timestamp_millis(),
        &suffix[..8],
        extension_of(filename)
    )
}

pub struct UploadServiceImpl {
    pub store: Arc<dyn ObjectStore>,
}

impl UploadServiceImpl {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        UploadServiceImpl { store }
    }

    /// Stores files one after another and returns their public locators in
    /// input order. The first failure ends the run.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload_files(&self, files: Vec<UploadFile>) -> Result<Vec<String>, UploadError> {
        let mut urls = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let object_name = object_name_for(&file.filename);
            let content_type = (!file.content_type.is_empty()).then_some(file.content_type.as_str());

            if let Err(e) = self.store.put_object(&object_name, file.content, content_type).await {
                error!(index, filename = %file.filename, "Upload failed: {e}");
                return Err(UploadError::FileFailed {
                    index,
                    filename: file.filename,
                    reason: e.to_string(),
                });
            }
            urls.push(self.store.public_url(&object_name));
        }
        info!("Uploaded {} files", urls.len());
        Ok(urls)
    }
}
