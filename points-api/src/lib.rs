//! Points API Server
//!
//! REST API for receipt scoring.
//!
//! ## Endpoints
//!
//! ### Receipts
//! - POST /receipts/process - Score and store a receipt, returns its id
//! - GET /receipts/:id/points - Get the points awarded to a receipt
//!
//! ### Health
//! - GET /health - Liveness
//! - GET /ready - Store connectivity

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::*;
pub use error::*;
pub use routes::*;
pub use server::*;
pub use state::*;
