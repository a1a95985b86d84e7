//! Domain models for the storefront.
//!
//! - [`user`] - accounts, roles and the reseller approval model
//! - [`session`] - the identity stored in the browser session
//! - [`catalog`] - products and categories managed from the admin console

pub mod catalog;
pub mod session;
pub mod user;

pub use catalog::{Category, CategoryDraft, Product, ProductDraft, UNCATEGORIZED};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{ApprovalState, User};
