//! Service layer orchestrating CLI commands.

mod query_service;

pub use query_service::{default_folder, QueryService};
