//! Famox site API server.
//!
//! Exposes the [`DataProvider`](famox_core::provider::DataProvider) facade
//! as a JSON API at `/v1/*`. The same API is what the remote provider in
//! `famox-core` talks to.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;
