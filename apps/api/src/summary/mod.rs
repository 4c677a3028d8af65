//! Summary request orchestration: input check, prompt, one generator call.

pub mod handlers;
pub mod prompts;

use thiserror::Error;
use tracing::warn;

use crate::llm_client::{LlmError, TextGenerator};
use crate::summary::prompts::summary_prompt;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Job role and information are required.")]
    MissingInput,

    #[error("summary generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// Asks the generator for a professional summary.
///
/// Empty or whitespace-only inputs are rejected before the generator is
/// touched. The generated text comes back verbatim; it is neither truncated
/// nor retried.
pub async fn request_summary(
    generator: &dyn TextGenerator,
    job_role: &str,
    info: &str,
) -> Result<String, SummaryError> {
    let (job_role, info) = (job_role.trim(), info.trim());
    if job_role.is_empty() || info.is_empty() {
        return Err(SummaryError::MissingInput);
    }

    generator
        .generate(&summary_prompt(job_role, info))
        .await
        .map_err(|e| {
            warn!("Summary generation failed: {e}");
            SummaryError::Generation(e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubGenerator {
        reply: Result<String, ()>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().map_err(|_| LlmError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_empty_inputs_never_reach_generator() {
        let stub = StubGenerator::replying("unused");
        for (role, info) in [("", "info"), ("role", ""), ("   ", "info"), ("role", "\n\t")] {
            let err = request_summary(&stub, role, info).await.unwrap_err();
            assert!(matches!(err, SummaryError::MissingInput));
        }
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generated_text_returned_verbatim() {
        let long = "A".repeat(1200);
        let stub = StubGenerator::replying(&long);
        let summary = request_summary(&stub, "Nurse", "ICU, 6 years").await.unwrap();
        assert_eq!(summary, long);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Nurse"));
        assert!(prompt.contains("ICU, 6 years"));
    }

    #[tokio::test]
    async fn test_generator_failure_is_not_retried() {
        let stub = StubGenerator::failing();
        let err = request_summary(&stub, "Nurse", "ICU").await.unwrap_err();
        assert!(matches!(err, SummaryError::Generation(_)));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }
}
