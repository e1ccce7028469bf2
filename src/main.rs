mod api;
mod app;
mod application;
mod config;
mod domain;
mod ui;
mod utils;

use iced::{window, Size};

/// Log level comes from `RUST_LOG` (default: warn).
fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
        .ok();
}

fn main() -> iced::Result {
    let _ = dotenvy::dotenv();
    init_tracing();

    iced::application(app::UploadApp::default, app::update, app::view)
        .title("QA Document Processor")
        .subscription(app::subscription)
        .window(window::Settings {
            size: Size::new(560.0, 460.0),
            ..Default::default()
        })
        .run()
}
