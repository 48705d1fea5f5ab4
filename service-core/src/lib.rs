//! service-core: Shared infrastructure for the clickbait workspace services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
