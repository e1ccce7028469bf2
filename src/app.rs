use std::path::PathBuf;

use bytes::Bytes;
use iced::{event, window, Event, Subscription, Task};

use crate::api::UploadClient;
use crate::application::{Deferred, Effect, UploadController, UploadCoordinator};
use crate::config::AppConfig;
use crate::domain::model::PROGRESS_TICK;
use crate::domain::{AppError, SelectedFile, SelectionSource};
use crate::ui::{self, UploadMessage};

pub struct UploadApp {
    controller: UploadController,
    coordinator: UploadCoordinator,
}

impl Default for UploadApp {
    fn default() -> Self {
        Self::new(AppConfig::from_env())
    }
}

impl UploadApp {
    pub fn new(config: AppConfig) -> Self {
        tracing::info!(
            endpoint = %config.api.endpoint,
            download_dir = %config.download_dir.display(),
            "Starting uploader"
        );
        let client = UploadClient::new(config.api);

        Self {
            controller: UploadController::new(),
            coordinator: UploadCoordinator::new(client, config.download_dir),
        }
    }

    /// Turn controller effects into iced tasks.
    fn run(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| self.perform(effect)))
    }

    fn perform(&self, effect: Effect) -> Task<Message> {
        let coordinator = self.coordinator.clone();
        match effect {
            Effect::OpenPicker => Task::perform(
                async move { coordinator.choose_file().await },
                Message::PickerClosed,
            ),
            Effect::Inspect { path, source } => Task::perform(
                async move { coordinator.inspect(path).await },
                move |result| Message::FileInspected(source, result),
            ),
            Effect::Upload(file) => Task::perform(
                async move { coordinator.upload(file).await },
                Message::UploadFinished,
            ),
            Effect::SaveDownload(document) => Task::perform(
                async move { coordinator.save_download(document).await },
                Message::DownloadSaved,
            ),
            Effect::Schedule { after, event } => Task::perform(
                tokio::time::sleep(after),
                move |_| Message::Deferred(event.clone()),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(UploadMessage),
    /// Picker dialog closed, with the chosen path if any
    PickerClosed(Option<PathBuf>),
    FileInspected(SelectionSource, Result<SelectedFile, AppError>),
    /// Processed document or the reason the upload failed
    UploadFinished(Result<Bytes, AppError>),
    DownloadSaved(Result<PathBuf, AppError>),
    ProgressTick,
    Deferred(Deferred),
}

pub fn update(app: &mut UploadApp, message: Message) -> Task<Message> {
    let effects = match message {
        Message::UiMessage(ui_msg) => match ui_msg {
            UploadMessage::BrowsePressed => app.controller.browse(),
            UploadMessage::SubmitPressed => app.controller.submit(),
            UploadMessage::DragEntered => {
                app.controller.drag_entered();
                Vec::new()
            }
            UploadMessage::DragLeft => {
                app.controller.drag_left();
                Vec::new()
            }
            UploadMessage::FileDropped(path) => app.controller.file_dropped(path),
        },
        Message::PickerClosed(path) => app.controller.file_picked(path),
        Message::FileInspected(source, result) => app.controller.file_inspected(source, result),
        Message::UploadFinished(result) => app.controller.upload_finished(result),
        Message::DownloadSaved(result) => app.controller.download_saved(result),
        Message::ProgressTick => {
            app.controller.tick(&mut rand::rng());
            Vec::new()
        }
        Message::Deferred(event) => app.controller.deferred(event),
    };

    app.run(effects)
}

pub fn view(app: &UploadApp) -> iced::Element<'_, Message> {
    ui::view(&app.controller).map(Message::UiMessage)
}

pub fn subscription(app: &UploadApp) -> Subscription<Message> {
    let drops = event::listen_with(window_file_event);

    // The tick stream exists only while the progress manager holds a timer.
    if app.controller.progress().is_ticking() {
        Subscription::batch([
            drops,
            iced::time::every(PROGRESS_TICK).map(|_| Message::ProgressTick),
        ])
    } else {
        drops
    }
}

fn window_file_event(
    event: Event,
    _status: event::Status,
    _window: window::Id,
) -> Option<Message> {
    let ui_msg = match event {
        Event::Window(window::Event::FileHovered(_)) => UploadMessage::DragEntered,
        Event::Window(window::Event::FilesHoveredLeft) => UploadMessage::DragLeft,
        Event::Window(window::Event::FileDropped(path)) => UploadMessage::FileDropped(path),
        _ => return None,
    };
    Some(Message::UiMessage(ui_msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_file_events_map_to_ui_messages() {
        let dropped = window_file_event(
            Event::Window(window::Event::FileDropped(PathBuf::from("/tmp/report.pdf"))),
            event::Status::Ignored,
            window::Id::unique(),
        );
        match dropped {
            Some(Message::UiMessage(UploadMessage::FileDropped(path))) => {
                assert_eq!(path, PathBuf::from("/tmp/report.pdf"));
            }
            other => panic!("unexpected message: {:?}", other),
        }

        let left = window_file_event(
            Event::Window(window::Event::FilesHoveredLeft),
            event::Status::Ignored,
            window::Id::unique(),
        );
        assert!(matches!(
            left,
            Some(Message::UiMessage(UploadMessage::DragLeft))
        ));

        let other = window_file_event(
            Event::Window(window::Event::Focused),
            event::Status::Ignored,
            window::Id::unique(),
        );
        assert!(other.is_none());
    }
}
