use std::path::PathBuf;
use std::time::Duration;

pub const PDF_MIME: &str = "application/pdf";

/// Name given to every processed document, whatever the server suggests.
pub const DOWNLOAD_FILE_NAME: &str = "processed_qa.docx";

pub const NOTIFICATION_LIFETIME: Duration = Duration::from_millis(3000);
pub const PROGRESS_TICK: Duration = Duration::from_millis(1000);
pub const DOWNLOAD_NOTICE_DELAY: Duration = Duration::from_millis(1000);
pub const RESET_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn is_pdf(&self) -> bool {
        self.mime == PDF_MIME
    }
}

/// Where a candidate file came from. Only drops are re-validated; the picker
/// is already filtered to PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Picker,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Ready,
    Selecting,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Form visible, status hidden
    Form,
    /// Form hidden, status visible
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
}
