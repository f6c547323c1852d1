//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};

// ============ Receipt DTOs ============

/// Process receipt response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: String,
}

/// Points lookup response
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

// ============ Health DTOs ============

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store_backend: String,
}
