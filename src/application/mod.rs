pub mod notifications;
pub mod progress;
pub mod upload_controller;
pub mod upload_coordinator;

pub use upload_controller::{Deferred, Effect, UploadController};
pub use upload_coordinator::UploadCoordinator;
