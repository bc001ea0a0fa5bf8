//! API Module
//!
//! HTTP relay exposing cache groups over the network.
//!
//! # Endpoints
//! - `GET {base_path}<group>/<key>` - Raw cached bytes (`application/octet-stream`)
//! - `GET /stats/:group` - Group statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
