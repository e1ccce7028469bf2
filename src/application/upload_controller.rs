use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use rand::Rng;

use super::notifications::NotificationManager;
use super::progress::ProgressManager;
use crate::domain::model::{DOWNLOAD_NOTICE_DELAY, NOTIFICATION_LIFETIME, RESET_DELAY};
use crate::domain::{
    AppError, Notification, NotificationId, NotificationKind, SelectedFile, SelectionSource,
    UploadPhase, Visibility,
};

/// Work the controller asks the shell to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    OpenPicker,
    Inspect {
        path: PathBuf,
        source: SelectionSource,
    },
    Upload(SelectedFile),
    SaveDownload(Bytes),
    Schedule { after: Duration, event: Deferred },
}

/// Timed follow-ups fed back into the controller once their delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    DismissNotification(NotificationId),
    AnnounceDownload(PathBuf),
    ResetForm,
}

/// Upload workflow state machine.
///
/// Every input returns the effects to run; nothing here touches the network,
/// the filesystem or the window.
#[derive(Debug)]
pub struct UploadController {
    phase: UploadPhase,
    selected: Option<SelectedFile>,
    visibility: Visibility,
    drag_active: bool,
    progress: ProgressManager,
    notifications: NotificationManager,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadController {
    pub fn new() -> Self {
        Self {
            phase: UploadPhase::Ready,
            selected: None,
            visibility: Visibility::Form,
            drag_active: false,
            progress: ProgressManager::new(),
            notifications: NotificationManager::default(),
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// A new browse, drop or submit may start only from an idle form. While a
    /// picker is open or a drop is being inspected the phase is `Selecting`.
    fn accepts_input(&self) -> bool {
        self.visibility == Visibility::Form
            && matches!(self.phase, UploadPhase::Ready | UploadPhase::Failed)
    }

    fn set_phase(&mut self, phase: UploadPhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "Upload phase changed");
            self.phase = phase;
        }
    }

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> Effect {
        let id = self.notifications.show(message, kind);
        Effect::Schedule {
            after: NOTIFICATION_LIFETIME,
            event: Deferred::DismissNotification(id),
        }
    }

    pub fn browse(&mut self) -> Vec<Effect> {
        if !self.accepts_input() {
            return Vec::new();
        }
        self.set_phase(UploadPhase::Selecting);
        vec![Effect::OpenPicker]
    }

    pub fn file_picked(&mut self, path: Option<PathBuf>) -> Vec<Effect> {
        match path {
            Some(path) if self.phase == UploadPhase::Selecting => vec![Effect::Inspect {
                path,
                source: SelectionSource::Picker,
            }],
            Some(_) => Vec::new(),
            None => {
                if self.phase == UploadPhase::Selecting {
                    self.set_phase(UploadPhase::Ready);
                }
                Vec::new()
            }
        }
    }

    pub fn drag_entered(&mut self) {
        if self.visibility == Visibility::Form {
            self.drag_active = true;
        }
    }

    pub fn drag_left(&mut self) {
        self.drag_active = false;
    }

    pub fn file_dropped(&mut self, path: PathBuf) -> Vec<Effect> {
        self.drag_active = false;
        // A multi-file drop arrives as one event per file; only the first counts.
        if !self.accepts_input() {
            tracing::debug!(path = %path.display(), "Ignoring drop while busy");
            return Vec::new();
        }
        self.set_phase(UploadPhase::Selecting);
        vec![Effect::Inspect {
            path,
            source: SelectionSource::Drop,
        }]
    }

    pub fn file_inspected(
        &mut self,
        source: SelectionSource,
        result: Result<SelectedFile, AppError>,
    ) -> Vec<Effect> {
        if self.visibility != Visibility::Form || self.phase != UploadPhase::Selecting {
            return Vec::new();
        }
        self.set_phase(UploadPhase::Ready);

        let file = match result {
            Ok(file) => file,
            Err(e) => return vec![self.notify(e.to_string(), NotificationKind::Error)],
        };

        if source == SelectionSource::Drop && !file.is_pdf() {
            tracing::debug!(name = %file.name, mime = %file.mime, "Rejected dropped file");
            return vec![self.notify(AppError::NotAPdf.to_string(), NotificationKind::Error)];
        }

        let message = format!("File selected: {}", file.name);
        self.selected = Some(file);
        vec![self.notify(message, NotificationKind::Success)]
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        if !self.accepts_input() {
            return Vec::new();
        }

        let Some(file) = self.selected.clone() else {
            let reason = AppError::NoFileSelected.to_string();
            return vec![self.notify(reason, NotificationKind::Error)];
        };

        self.set_phase(UploadPhase::Submitting);
        let notice = self.notify("Starting document processing...", NotificationKind::Success);
        self.visibility = Visibility::Status;
        self.progress.start();

        vec![notice, Effect::Upload(file)]
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        self.progress.tick(rng);
    }

    pub fn upload_finished(&mut self, result: Result<Bytes, AppError>) -> Vec<Effect> {
        if self.phase != UploadPhase::Submitting {
            tracing::warn!("Upload result arrived with no upload in flight");
            return Vec::new();
        }

        // The tick timer is released before anything else on every outcome.
        match &result {
            Ok(_) => self.progress.complete(),
            Err(_) => self.progress.stop(),
        }

        match result {
            Ok(document) => {
                self.set_phase(UploadPhase::Succeeded);
                vec![
                    self.notify(
                        "Processing complete! Download starting...",
                        NotificationKind::Success,
                    ),
                    Effect::SaveDownload(document),
                    Effect::Schedule {
                        after: RESET_DELAY,
                        event: Deferred::ResetForm,
                    },
                ]
            }
            Err(e) => {
                self.set_phase(UploadPhase::Failed);
                self.visibility = Visibility::Form;
                vec![self.notify(format!("Error: {}", e), NotificationKind::Error)]
            }
        }
    }

    pub fn download_saved(&mut self, result: Result<PathBuf, AppError>) -> Vec<Effect> {
        match result {
            Ok(path) => vec![Effect::Schedule {
                after: DOWNLOAD_NOTICE_DELAY,
                event: Deferred::AnnounceDownload(path),
            }],
            Err(e) => vec![self.notify(
                format!("Error: could not save document: {}", e),
                NotificationKind::Error,
            )],
        }
    }

    pub fn deferred(&mut self, event: Deferred) -> Vec<Effect> {
        match event {
            Deferred::DismissNotification(id) => {
                self.notifications.dismiss(id);
                Vec::new()
            }
            Deferred::AnnounceDownload(path) => {
                let name = crate::utils::display_name(&path);
                vec![self.notify(
                    format!("File downloaded successfully: {}", name),
                    NotificationKind::Success,
                )]
            }
            Deferred::ResetForm => {
                if self.phase == UploadPhase::Succeeded {
                    self.reset();
                }
                Vec::new()
            }
        }
    }

    fn reset(&mut self) {
        self.visibility = Visibility::Form;
        self.selected = None;
        self.drag_active = false;
        self.set_phase(UploadPhase::Ready);
    }
}
