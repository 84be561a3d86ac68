//! Domain models for the workshop dashboard

mod auth;
mod dashboard;
mod inventory;
mod material;
mod organization;
mod process;
mod transaction;
mod user;

pub use auth::*;
pub use dashboard::*;
pub use inventory::*;
pub use material::*;
pub use organization::*;
pub use process::*;
pub use transaction::*;
pub use user::*;
