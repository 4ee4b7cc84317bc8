// src/api/mod.rs
pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
pub mod mock;

// Re-export commonly used types
pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AnalysisRequest, AnalysisResult, Case, InputType, ValidationReport, ValidationRequest,
};
