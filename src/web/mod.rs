//! Browser-facing submission page.
//!
//! Uses Askama templates for server-side rendering and serves the page
//! script from the static asset directory.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page and asset routes

pub mod handlers;
pub mod routes;
