//! Ila Beauty storefront library.
//!
//! Marketing pages, the customer/reseller account system and the admin
//! console. Exposed as a library so the CLI and the integration tests can
//! build the same router and services the server runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
