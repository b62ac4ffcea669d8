//! Advisory provider implementations
//!
//! This module contains concrete implementations of the AdvisoryProvider
//! trait for external text-completion services.

pub mod gemini;

pub use gemini::{GeminiAdvisoryProvider, DEFAULT_GEMINI_MODEL};

use mayday_core::{AdviceError, MaydayError};

pub(crate) fn request_failed(
    provider: &str,
    status: i32,
    message: impl Into<String>,
) -> MaydayError {
    MaydayError::Advice(AdviceError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    })
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> MaydayError {
    MaydayError::Advice(AdviceError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    })
}
