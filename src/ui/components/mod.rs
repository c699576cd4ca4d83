//! Reusable UI components.

mod count_input;
mod loading;
mod notification;
mod paginator;

pub use count_input::{CountInput, CountInputAction};
pub use loading::LoadingIndicator;
pub use notification::{Notification, NotificationManager, NotificationType};
pub use paginator::{PageRequest, Paginator};
