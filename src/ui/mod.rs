//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including the artwork table,
//! the selection panel and reusable UI components.

mod components;
mod views;

pub use components::{
    CountInput, CountInputAction, LoadingIndicator, Notification, NotificationManager,
    NotificationType, PageRequest, Paginator,
};
pub use views::{selection_panel, ArtworkTable, HelpAction, HelpView, TableAction};
