//! # Error Types
//!
//! This module defines error types used throughout the cartell library.

use thiserror::Error;

/// Main error type for cartell operations
#[derive(Debug, Error)]
pub enum CartellError {
    /// Background, logo strip or photograph file missing or undecodable
    #[error("Asset error: {0}")]
    AssetLoad(String),

    /// Font asset unresolvable or unparsable
    #[error("Font error: {0}")]
    FontLoad(String),

    /// Photograph fetch failure
    #[error("Download error: {0}")]
    Download(String),

    /// Shrink-to-fit cannot satisfy the width constraint
    #[error("Layout error: {0}")]
    Layout(String),

    /// Malformed webhook payload
    #[error("Webhook error: {0}")]
    Webhook(String),

    /// Request signature missing or mismatched
    #[error("Signature error: {0}")]
    Signature(String),

    /// Output image encoding failure
    #[error("Encode error: {0}")]
    Encode(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
