//! Core library for the Famox site.
//!
//! Holds the data model, the static fixture content, the local demo store,
//! and the [`DataProvider`](provider::DataProvider) facade that page-level
//! consumers use. Storage is reached only through the `famox-storage` backend
//! trait, so the store can sit on memory, a redb file, or anything else that
//! implements it.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod model;
pub mod provider;
pub mod store;
