pub mod preview;
pub mod share;

pub use preview::{AttachmentPreview, PreviewError};
pub use share::{
    Clipboard, ClipboardError, LegacyCopy, ShareDispatcher, ShareOutcome, ShareRequest,
    ShareSheet, ShareSheetError,
};
