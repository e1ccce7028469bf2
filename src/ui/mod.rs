use std::path::PathBuf;

use iced::{
    alignment,
    widget::{button, column, container, progress_bar, row, text, Column, Space},
    Background, Border, Color, Element, Length, Theme,
};

use crate::application::UploadController;
use crate::domain::{Notification, NotificationKind, Visibility};

#[derive(Debug, Clone)]
pub enum UploadMessage {
    BrowsePressed,
    SubmitPressed,
    DragEntered,
    DragLeft,
    FileDropped(PathBuf),
}

/// Render the controller state. Holds no state of its own.
pub fn view(controller: &UploadController) -> Element<'_, UploadMessage> {
    let mut content = Column::new().padding(20).spacing(10);

    content = content.push(text("QA Document Processor").size(32));

    if let Some(notification) = controller.notification() {
        content = content.push(toast(notification));
    }

    content = content.push(Space::new().height(Length::Fixed(10.0)));

    content = match controller.visibility() {
        Visibility::Form => content.push(upload_form(controller)),
        Visibility::Status => content.push(processing_status(controller)),
    };

    content.into()
}

fn upload_form(controller: &UploadController) -> Element<'_, UploadMessage> {
    let drag_active = controller.is_drag_active();

    let label = match controller.selected_file() {
        Some(file) => format!("{} ({})", file.name, format_size(file.size)),
        None => "Drag & drop a PDF here, or browse".to_string(),
    };

    let drop_zone = container(
        column![
            text(label).size(16),
            button("Browse...")
                .on_press(UploadMessage::BrowsePressed)
                .padding([8, 16]),
        ]
        .spacing(12)
        .align_x(alignment::Horizontal::Center),
    )
    .padding(30)
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .style(move |theme: &Theme| drop_zone_style(theme, drag_active));

    let mut form = Column::new().spacing(10).push(drop_zone);

    if let Some(file) = controller.selected_file() {
        form = form.push(
            row![text("Selected file:").size(14), text(&file.name).size(14)].spacing(6),
        );
    }

    form.push(Space::new().height(Length::Fixed(10.0)))
        .push(
            button("Process Document")
                .on_press(UploadMessage::SubmitPressed)
                .padding([10, 20]),
        )
        .into()
}

fn processing_status(controller: &UploadController) -> Element<'_, UploadMessage> {
    let percent = controller.progress().percent();

    column![
        text("Processing your document...").size(18),
        progress_bar(0.0..=100.0, percent as f32),
        text(format!("{}%", percent)).size(14),
    ]
    .spacing(10)
    .into()
}

fn toast(notification: &Notification) -> Element<'_, UploadMessage> {
    let kind = notification.kind;
    container(text(&notification.message).size(14))
        .padding([8, 14])
        .width(Length::Fill)
        .style(move |_theme: &Theme| toast_style(kind))
        .into()
}

fn toast_style(kind: NotificationKind) -> container::Style {
    let background = match kind {
        NotificationKind::Success => Color::from_rgb(0.16, 0.6, 0.32),
        NotificationKind::Error => Color::from_rgb(0.8, 0.2, 0.2),
    };
    container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn drop_zone_style(theme: &Theme, highlighted: bool) -> container::Style {
    let palette = theme.extended_palette();
    let (color, width) = if highlighted {
        (palette.primary.strong.color, 2.0)
    } else {
        (palette.background.strong.color, 1.0)
    };
    container::Style {
        background: highlighted
            .then(|| Background::Color(palette.primary.weak.color.scale_alpha(0.2))),
        border: Border {
            color,
            width,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}
