//! Chat-completions adapter covering OpenAI and OpenAI-compatible backends
//! (DeepSeek exposes the same wire shape at a different base URL).

use serde::{Deserialize, Serialize};

use super::{ProviderError, TextProvider};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEEPSEEK_DEFAULT_MODEL: &str = "deepseek-chat";

pub struct ChatCompletionsProvider {
    id: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl ChatCompletionsProvider {
    pub fn new(
        id: &str,
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::HttpClient(e.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
        })
    }

    pub fn openai(api_key: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::new("openai", OPENAI_BASE_URL, api_key, OPENAI_DEFAULT_MODEL, timeout_secs)
    }

    pub fn deepseek(api_key: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::new("deepseek", DEEPSEEK_BASE_URL, api_key, DEEPSEEK_DEFAULT_MODEL, timeout_secs)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
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
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl TextProvider for ChatCompletionsProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingCredentials(self.id.clone()));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature: 0.4,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Connection(self.base_url.clone())
                } else {
                    ProviderError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ProviderError::ResponseParsing(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_constructor_defaults() {
        let p = ChatCompletionsProvider::openai("key", 60).unwrap();
        assert_eq!(p.id(), "openai");
        assert_eq!(p.base_url, OPENAI_BASE_URL);
        assert_eq!(p.model, OPENAI_DEFAULT_MODEL);
    }

    #[test]
    fn deepseek_constructor_defaults() {
        let p = ChatCompletionsProvider::deepseek("key", 60).unwrap();
        assert_eq!(p.id(), "deepseek");
        assert_eq!(p.base_url, DEEPSEEK_BASE_URL);
        assert_eq!(p.model, DEEPSEEK_DEFAULT_MODEL);
    }

    #[test]
    fn trailing_slash_trimmed_from_base_url() {
        let p =
            ChatCompletionsProvider::new("openai", "https://api.openai.com/v1/", "k", "m", 30)
                .unwrap();
        assert_eq!(p.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn empty_key_fails_before_any_network_call() {
        let p = ChatCompletionsProvider::openai("", 5).unwrap();
        let err = p.generate("hola", 128).unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials(_)));
    }

    #[test]
    fn chat_response_parses_first_choice() {
        let json = r#"{"choices":[{"message":{"content":"texto generado"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("texto generado")
        );
    }
}
