//! Ila Beauty Core - Shared types library.
//!
//! This crate provides common types used across the Ila Beauty components:
//! - `storefront` - Public storefront, account system and admin console
//! - `cli` - Command-line tools for schema setup, admin accounts and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles and tiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
