//! Art Institute of Chicago catalog client and types.
//!
//! This module provides the interface for fetching artwork pages from the
//! public catalog REST API.

mod client;
pub mod error;
pub mod types;

pub use client::ArticClient;
pub use error::ApiError;
pub use types::{Artwork, Page};
