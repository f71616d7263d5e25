//! Conversational tutor over the inference endpoint.

use crate::inference::{InferenceClient, InferenceError};

/// Wraps a learner's query in the fixed instructional template and asks the
/// inference endpoint for an explanation. Exactly one reply per query; no
/// retries.
pub struct TutorGateway {
    inference: InferenceClient,
}

impl TutorGateway {
    pub fn new(inference: InferenceClient) -> Self {
        Self { inference }
    }

    /// Produce one plain-language explanation for one query.
    pub async fn explain(&self, query: &str) -> Result<String, InferenceError> {
        self.inference.complete(&explain_prompt(query)).await
    }
}

fn explain_prompt(query: &str) -> String {
    format!("Explain this concept clearly in simple terms:\n\n{}", query)
}
