pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{
    Notification, NotificationId, NotificationKind, SelectedFile, SelectionSource, UploadPhase,
    Visibility,
};
