//! Attachment previews for the compose flow: read a local file,
//! classify it by extension, and hand the bytes to the widget.

use std::path::Path;

use thiserror::Error;

use ripple_core::models::MediaType;

/// Preview payloads are capped well below anything a compose widget
/// would want to hold in memory.
const MAX_PREVIEW_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("unsupported attachment type: {0:?}")]
    UnsupportedType(String),

    #[error("attachment too large: {size} bytes")]
    TooLarge { size: u64 },

    #[error("could not read attachment: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct AttachmentPreview {
    pub media_type: MediaType,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Extension-based classification, mirroring what the compose widget
/// accepts.
pub fn classify(path: &Path) -> Option<MediaType> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "webp" => Some(MediaType::Image),
        "mp4" | "webm" | "mov" => Some(MediaType::Video),
        _ => None,
    }
}

pub async fn load(path: impl AsRef<Path>) -> Result<AttachmentPreview, PreviewError> {
    load_capped(path.as_ref(), MAX_PREVIEW_BYTES).await
}

async fn load_capped(path: &Path, cap: u64) -> Result<AttachmentPreview, PreviewError> {
    let media_type = classify(path).ok_or_else(|| {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        PreviewError::UnsupportedType(ext)
    })?;

    let meta = tokio::fs::metadata(path).await?;
    if meta.len() > cap {
        return Err(PreviewError::TooLarge { size: meta.len() });
    }

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(AttachmentPreview {
        media_type,
        file_name,
        bytes,
    })
}
