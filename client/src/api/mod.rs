//! Typed bindings for the dashboard REST API

mod auth;
mod dashboard;
mod inventory;
mod materials;
mod organizations;
mod processes;
mod query;
mod resource;
mod transactions;
mod users;

pub use inventory::InventoryItems;
pub use materials::Materials;
pub use organizations::Organizations;
pub use processes::Processes;
pub use query::ListQuery;
pub use resource::{Endpoint, Resource, Saved};
pub use transactions::Transactions;
pub use users::Users;
