use serde::{Deserialize, Serialize};

/// Fixed persona for every completion call. Facts-only and brief by default.
const SYSTEM_PROMPT: &str = "You are a warm, empathetic emotional wellness assistant for \
    CalmCompass. You help users understand their emotional patterns and provide supportive, \
    personalized guidance based on their check-in history. Be conversational, supportive, \
    and encouraging. Keep responses concise and brief (2-4 sentences typically). Only \
    mention facts from their check-in history - do not make assumptions or provide \
    unsolicited advice beyond what is in their data. If they ask for more detail, you can \
    expand, but default to being brief.";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Thin client for the Groq OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_url: &str, api_key: &str, model: &str, timeout_secs: u64) -> Self {
        // Timeout expiry is treated like any other failure by the caller.
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// One synchronous completion call. Any non-2xx status, transport error,
    /// or empty candidate list is an error; the caller falls back.
    pub async fn complete(&self, prompt: &str, word_limit: u32) -> Result<String, anyhow::Error> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: token_budget(word_limit),
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Groq API error {}: {}", status, body);
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("Groq API returned no choices"))?;

        Ok(text)
    }
}

/// English runs roughly 3 words per 4 tokens, so budget words * 4/3.
fn token_budget(word_limit: u32) -> u32 {
    word_limit * 4 / 3
}
