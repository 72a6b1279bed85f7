//! Rocket Computers admin library.
//!
//! The browser front-end for admins and store associates, built as a
//! library so the router can be driven from integration tests. All data
//! lives in the Rocket Computers backend API; this crate only renders pages
//! and forwards requests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
