//! GraphQL server for the Fenago campus labs: students, the colleges they
//! attend, and a greeting that only signed-in students get.

pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod logging;
pub mod model;
pub mod store;
pub mod web;

pub use error::ResolverError;
pub use graphql::{schema, Context, Schema};
pub use store::{MemoryStore, Store, StoreError};
