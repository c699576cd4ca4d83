//! LazyArt - browse the Art Institute of Chicago collection from the terminal.
//!
//! A paginated artwork table whose row selection survives page changes.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod selection;
pub mod tasks;
pub mod ui;
