//! Bookshelf - book record CRUD services
//!
//! Two independent HTTP services share this crate:
//! - the document-store service (`bookshelf-docstore`), backed by a JSONB
//!   collection in PostgreSQL
//! - the catalog service (`bookshelf-catalog`), backed by an in-memory list
//!   seeded from a CSV file at startup

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
mod shutdown;
pub mod startup;
pub mod state;

pub use error::{Error, Result};
pub use shutdown::shutdown_signal;
