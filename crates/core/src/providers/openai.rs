use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::analysis::BudgetSummary;

use super::traits::AdvisoryProvider;

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat-completions provider for budget advice.
///
/// - **Requires**: API key (set via settings as "openai").
/// - **Strategy**: one short completion per summary; no retries here,
///   the registry handles fallback.
///
/// Only the summary's aggregate numbers go into the prompt, never the
/// raw category breakdown or any identity data.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Use a specific chat model instead of the default.
    pub fn with_model(api_key: String, model: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            model: model.into(),
        }
    }

    /// Assemble the prompt from the summary's aggregate figures.
    fn build_prompt(summary: &BudgetSummary) -> String {
        format!(
            "Based on the following financial data:\n\
             Monthly income: {:.2} {currency}\n\
             Monthly expenses: {:.2} {currency}\n\
             Current savings ratio: {:.1}%\n\
             Annual savings goal: {:.2} {currency}\n\n\
             Provide 3 specific financial recommendations to help reach the savings goal.",
            summary.income,
            summary.total_expenses,
            summary.savings_ratio,
            summary.savings_goal,
            currency = summary.currency,
        )
    }
}

// ── OpenAI API request/response types ───────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AdvisoryProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate_advisory(&self, summary: &BudgetSummary) -> Result<String, CoreError> {
        let prompt = Self::build_prompt(summary);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(BASE_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CoreError::Api {
                provider: "OpenAI".into(),
                message: format!("Request rejected with status {}", response.status()),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| CoreError::Api {
            provider: "OpenAI".into(),
            message: format!("Failed to parse completion: {e}"),
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CoreError::Api {
                provider: "OpenAI".into(),
                message: "Completion contained no choices".into(),
            })?;

        let text = content.trim();
        if text.is_empty() {
            return Err(CoreError::Api {
                provider: "OpenAI".into(),
                message: "Completion was empty".into(),
            });
        }
        Ok(text.to_string())
    }
}
