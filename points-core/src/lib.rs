//! Points Core
//!
//! Core types and scoring rules for the receipt points service.
//!
//! A [`Receipt`] arrives from an untrusted client, is scored once by
//! [`compute_points`], and is persisted as a [`ScoredReceipt`] that carries the
//! generated [`ReceiptId`] and the immutable point total.

pub mod error;
pub mod logging;
pub mod scoring;
pub mod types;

pub use error::*;
pub use scoring::{compute_points, score, PointsBreakdown};
pub use types::*;
