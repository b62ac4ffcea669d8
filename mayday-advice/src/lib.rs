//! MAYDAY Advice - Advisory Text Backend
//!
//! Provider-agnostic trait for the text-advice backend: free text in, one
//! calming advisory sentence out. The call may fail or exceed a deadline;
//! callers are expected to fall back to [`FALLBACK_ADVICE`] rather than
//! surface the failure.

use async_trait::async_trait;
use mayday_core::{AdviceError, MaydayError, MaydayResult};

pub mod providers;

pub use providers::{GeminiAdvisoryProvider, DEFAULT_GEMINI_MODEL};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Sentence returned to callers whenever the advisory backend errors,
/// times out, or is not configured.
pub const FALLBACK_ADVICE: &str = "Help is on the way.";

/// Wrap a caller's message in the dispatcher persona prompt.
///
/// The contract baked into the prompt: one calm sentence, an immediate safe
/// action, no questions back, and the reassurance that the caller's location
/// is registered.
pub fn build_prompt(message: &str) -> String {
    format!(
        "You are an emergency dispatcher. The caller is panicked. Respond with \
         one calm, clear sentence that reassures them and gives the most \
         immediate safe action they should take. Do NOT ask questions. Do NOT \
         request more information. Always tell them their location is \
         registered and help is coming. Caller said:\n{}",
        message
    )
}

// ============================================================================
// ADVISORY PROVIDER TRAIT
// ============================================================================

/// Trait for advisory text providers.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Produce one advisory sentence for a caller message.
    ///
    /// # Returns
    /// * `Ok(String)` - The advisory sentence
    /// * `Err(MaydayError::Advice)` - If the backend fails or times out
    async fn advise(&self, message: &str) -> MaydayResult<String>;

    /// Short provider identifier used in logs and errors.
    fn name(&self) -> &str;
}

// ============================================================================
// MOCK PROVIDER FOR TESTING
// ============================================================================

/// Mock advisory provider for testing.
/// Returns a fixed sentence, or a fixed error when built with [`Self::failing`].
#[derive(Debug, Clone)]
pub struct MockAdvisoryProvider {
    reply: String,
    fail: bool,
}

impl MockAdvisoryProvider {
    /// Create a mock that answers every message with a canned sentence.
    pub fn new() -> Self {
        Self::with_reply("Remain where you are; responders have your location.")
    }

    /// Create a mock with a custom canned sentence.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
        }
    }

    /// Create a mock that fails every call.
    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
        }
    }
}

impl Default for MockAdvisoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdvisoryProvider for MockAdvisoryProvider {
    async fn advise(&self, _message: &str) -> MaydayResult<String> {
        if self.fail {
            return Err(MaydayError::Advice(AdviceError::RequestFailed {
                provider: "mock".to_string(),
                status: 503,
                message: "mock configured to fail".to_string(),
            }));
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_returns_canned_reply() {
        let provider = MockAdvisoryProvider::with_reply("stay put");
        let advice = provider.advise("there is smoke").await.unwrap();
        assert_eq!(advice, "stay put");
        assert_eq!(provider.name(), "mock");
    }

    #[tokio::test]
    async fn test_failing_mock_provider_errors() {
        let provider = MockAdvisoryProvider::failing();
        let result = provider.advise("anything").await;
        assert!(matches!(
            result,
            Err(MaydayError::Advice(AdviceError::RequestFailed { .. }))
        ));
    }

    #[test]
    fn test_prompt_carries_caller_message() {
        let prompt = build_prompt("my house is flooding");
        assert!(prompt.contains("my house is flooding"));
        assert!(prompt.contains("Do NOT ask questions"));
    }

    #[test]
    fn test_fallback_sentence_is_stable() {
        // The gateway promises this exact sentence on any backend failure
        assert_eq!(FALLBACK_ADVICE, "Help is on the way.");
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The persona prompt always ends with the caller's own words.
        #[test]
        fn prop_prompt_ends_with_message(message in ".{0,120}") {
            let prompt = build_prompt(&message);
            prop_assert!(prompt.ends_with(&message));
        }

        /// The canned mock never fails and echoes its configured reply.
        #[test]
        fn prop_mock_is_deterministic(reply in ".{1,60}", message in ".{0,60}") {
            let provider = MockAdvisoryProvider::with_reply(reply.clone());
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            let advice = rt.block_on(provider.advise(&message)).unwrap();
            prop_assert_eq!(advice, reply);
        }
    }
}
