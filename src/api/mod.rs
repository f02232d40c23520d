//! HTTP API layer.
//!
//! # Modules
//!
//! - [`dto`] - Request/response types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
