//! Tiered share dispatch over capability-detected platform services.
//!
//! Tier order: native share sheet, then the asynchronous clipboard,
//! then the legacy selection-copy command, then a manual-copy
//! instruction. A user dismissing the native sheet ends the chain
//! silently; a provider failing falls through to the next tier. The
//! real OS bindings are injected by the embedder - this crate owns the
//! contract and the fallback logic only.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// Payload handed to the share tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Error, Debug)]
pub enum ShareSheetError {
    /// The user closed the sheet. Not a failure; the chain stops.
    #[error("share dismissed by user")]
    Cancelled,

    #[error("share sheet failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Failed(String),
}

/// Native share sheet, where the platform offers one.
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether the sheet can take this payload at all.
    fn can_share(&self, request: &ShareRequest) -> bool;

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareSheetError>;
}

/// Asynchronous clipboard capability.
#[async_trait]
pub trait Clipboard: Send + Sync {
    fn is_available(&self) -> bool;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Last-resort copy path for hosts without an async clipboard.
#[async_trait]
pub trait LegacyCopy: Send + Sync {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// How a share attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native sheet took the payload.
    Shared,
    /// The user dismissed the native sheet.
    Dismissed,
    /// The link landed on the clipboard, by either copy tier.
    CopiedLink,
    /// Every tier was absent or failed; ask the user to copy the URL
    /// by hand.
    ManualCopyRequired,
}

#[derive(Default)]
pub struct ShareDispatcher {
    sheet: Option<Arc<dyn ShareSheet>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    legacy: Option<Arc<dyn LegacyCopy>>,
}

impl ShareDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, sheet: Arc<dyn ShareSheet>) -> Self {
        self.sheet = Some(sheet);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn with_legacy_copy(mut self, legacy: Arc<dyn LegacyCopy>) -> Self {
        self.legacy = Some(legacy);
        self
    }

    pub async fn share(&self, request: &ShareRequest) -> ShareOutcome {
        if let Some(sheet) = &self.sheet {
            if sheet.can_share(request) {
                match sheet.share(request).await {
                    Ok(()) => return ShareOutcome::Shared,
                    Err(ShareSheetError::Cancelled) => {
                        debug!("share sheet dismissed");
                        return ShareOutcome::Dismissed;
                    }
                    Err(ShareSheetError::Failed(reason)) => {
                        warn!(%reason, "native share failed, trying clipboard");
                    }
                }
            }
        }

        if let Some(clipboard) = &self.clipboard {
            if clipboard.is_available() {
                match clipboard.write_text(&request.url).await {
                    Ok(()) => return ShareOutcome::CopiedLink,
                    Err(error) => warn!(%error, "clipboard write failed, trying legacy copy"),
                }
            }
        }

        if let Some(legacy) = &self.legacy {
            match legacy.copy(&request.url).await {
                Ok(()) => return ShareOutcome::CopiedLink,
                Err(error) => warn!(%error, "legacy copy failed"),
            }
        }

        ShareOutcome::ManualCopyRequired
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn request() -> ShareRequest {
        ShareRequest {
            title: "Maya Torres's post".into(),
            text: "Golden hour at the harbor.".into(),
            url: "https://ripple.app/post/102".into(),
        }
    }

    #[derive(Default)]
    struct FakeSheet {
        refuse_payload: bool,
        cancel: bool,
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ShareSheet for FakeSheet {
        fn can_share(&self, _request: &ShareRequest) -> bool {
            !self.refuse_payload
        }

        async fn share(&self, _request: &ShareRequest) -> Result<(), ShareSheetError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.cancel {
                Err(ShareSheetError::Cancelled)
            } else if self.fail {
                Err(ShareSheetError::Failed("sheet unavailable".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        absent: bool,
        fail: bool,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl Clipboard for FakeClipboard {
        fn is_available(&self) -> bool {
            !self.absent
        }

        async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            self.writes.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                Err(ClipboardError::Failed("permission denied".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct FakeLegacy {
        fail: bool,
        copies: AtomicUsize,
    }

    #[async_trait]
    impl LegacyCopy for FakeLegacy {
        async fn copy(&self, _text: &str) -> Result<(), ClipboardError> {
            self.copies.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                Err(ClipboardError::Failed("copy command rejected".into()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn native_sheet_wins_when_it_accepts() {
        let sheet = Arc::new(FakeSheet::default());
        let clipboard = Arc::new(FakeClipboard::default());
        let dispatcher = ShareDispatcher::new()
            .with_sheet(Arc::clone(&sheet) as Arc<dyn ShareSheet>)
            .with_clipboard(Arc::clone(&clipboard) as Arc<dyn Clipboard>);

        assert_eq!(dispatcher.share(&request()).await, ShareOutcome::Shared);
        assert_eq!(clipboard.writes.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn user_dismissal_stops_the_chain_silently() {
        let sheet = Arc::new(FakeSheet {
            cancel: true,
            ..Default::default()
        });
        let clipboard = Arc::new(FakeClipboard::default());
        let dispatcher = ShareDispatcher::new()
            .with_sheet(Arc::clone(&sheet) as Arc<dyn ShareSheet>)
            .with_clipboard(Arc::clone(&clipboard) as Arc<dyn Clipboard>);

        assert_eq!(dispatcher.share(&request()).await, ShareOutcome::Dismissed);
        assert_eq!(clipboard.writes.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn sheet_failure_falls_through_to_clipboard() {
        let sheet = Arc::new(FakeSheet {
            fail: true,
            ..Default::default()
        });
        let clipboard = Arc::new(FakeClipboard::default());
        let dispatcher = ShareDispatcher::new()
            .with_sheet(Arc::clone(&sheet) as Arc<dyn ShareSheet>)
            .with_clipboard(Arc::clone(&clipboard) as Arc<dyn Clipboard>);

        assert_eq!(dispatcher.share(&request()).await, ShareOutcome::CopiedLink);
        assert_eq!(clipboard.writes.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn refused_payload_skips_the_sheet_entirely() {
        let sheet = Arc::new(FakeSheet {
            refuse_payload: true,
            ..Default::default()
        });
        let clipboard = Arc::new(FakeClipboard::default());
        let dispatcher = ShareDispatcher::new()
            .with_sheet(Arc::clone(&sheet) as Arc<dyn ShareSheet>)
            .with_clipboard(Arc::clone(&clipboard) as Arc<dyn Clipboard>);

        assert_eq!(dispatcher.share(&request()).await, ShareOutcome::CopiedLink);
        assert_eq!(sheet.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn clipboard_failure_falls_through_to_legacy_copy() {
        let clipboard = Arc::new(FakeClipboard {
            fail: true,
            ..Default::default()
        });
        let legacy = Arc::new(FakeLegacy::default());
        let dispatcher = ShareDispatcher::new()
            .with_clipboard(Arc::clone(&clipboard) as Arc<dyn Clipboard>)
            .with_legacy_copy(Arc::clone(&legacy) as Arc<dyn LegacyCopy>);

        assert_eq!(dispatcher.share(&request()).await, ShareOutcome::CopiedLink);
        assert_eq!(legacy.copies.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn exhausted_chain_asks_for_a_manual_copy() {
        let dispatcher = ShareDispatcher::new().with_legacy_copy(Arc::new(FakeLegacy {
            fail: true,
            ..Default::default()
        }) as Arc<dyn LegacyCopy>);

        assert_eq!(
            dispatcher.share(&request()).await,
            ShareOutcome::ManualCopyRequired
        );

        let empty = ShareDispatcher::new();
        assert_eq!(
            empty.share(&request()).await,
            ShareOutcome::ManualCopyRequired
        );
    }
}
