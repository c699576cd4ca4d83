//! Application views (screens).

mod help;
pub mod selection_panel;
mod table;

pub use help::{HelpAction, HelpView};
pub use table::{ArtworkTable, TableAction};
