//! Gemini provider implementation
//!
//! Calls the Google Generative Language `generateContent` endpoint to draft
//! the dispatcher's advisory sentence.

pub mod advisory;
pub mod types;

pub use advisory::{GeminiAdvisoryProvider, DEFAULT_GEMINI_MODEL};
