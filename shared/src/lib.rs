//! Shared types and logic for the workshop admin dashboard
//!
//! This crate contains the models, validation rules, line builders and list
//! filters used by the REST client, the CLI and the browser (via WASM).

pub mod drafts;
pub mod filter;
pub mod history;
pub mod lines;
pub mod models;
pub mod routes;
pub mod session;
pub mod types;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use drafts::*;
pub use filter::*;
pub use history::*;
pub use lines::*;
pub use models::*;
pub use routes::*;
pub use session::*;
pub use types::*;
pub use validation::*;
