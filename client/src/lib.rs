//! Workshop admin client
//!
//! Talks to the dashboard REST backend: session handling, typed resource
//! endpoints, the tag-invalidated query cache and the auth gate.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;
pub mod session;
pub mod token;

pub use cache::{QueryCache, ResourceKind, Subscription, Tag};
pub use config::Config;
pub use error::{ClientError, ClientResult, Notification};
pub use gate::{ensure_session, SessionState};
pub use http::{ApiClient, Auth, SharedSession};
pub use session::FileSessionStore;
