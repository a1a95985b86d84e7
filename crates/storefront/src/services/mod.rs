//! Business logic services for the storefront.
//!
//! - `auth` - registration, sign-in and sign-out for every role
//! - `resellers` - admin approval and tier management
//! - `catalog` - product and category management plus storefront listings
//! - `newsletter` - newsletter sign-up
//!
//! Services borrow the injected [`KeyValueStore`](crate::db::KeyValueStore)
//! and are cheap to build per request.

pub mod auth;
pub mod catalog;
mod error;
pub mod newsletter;
pub mod resellers;

pub use auth::{AuthError, AuthService, Registration};
pub use catalog::{CatalogService, ProductListing};
pub use error::AdminError;
pub use resellers::ResellerService;
