use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::prompt::SYSTEM_PROMPT;
use crate::codegen::options::AiProvider;
use crate::error::AiError;

pub const TEMPERATURE: f32 = 0.2;
pub const MAX_OUTPUT_TOKENS: u32 = 4000;

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const GOOGLE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A remote text producer: one prompt in, one block of text out.
pub trait TextGenerator {
    fn provider(&self) -> AiProvider;
    fn generate(&self, prompt: &str, model: &str) -> Result<String, AiError>;
}

/// POST `body` and decode the JSON reply. Non-2xx is a transport failure;
/// a body that does not decode as `R` is malformed.
fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
    request: reqwest::blocking::RequestBuilder,
    body: &B,
    provider_label: &str,
) -> Result<R, AiError> {
    let response = request
        .json(body)
        .send()
        .map_err(|e| AiError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AiError::Transport(format!(
            "HTTP error! status: {}",
            status.as_u16()
        )));
    }

    let text = response
        .text()
        .map_err(|e| AiError::Transport(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| {
        debug!(error = %e, "undecodable provider response");
        unexpected_format(provider_label)
    })
}

fn unexpected_format(provider_label: &str) -> AiError {
    AiError::Malformed(format!(
        "Unexpected response format from {} API",
        provider_label
    ))
}

// ============================================================================
// OpenAI
// ============================================================================

pub struct OpenAiClient {
    pub endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            endpoint: OPENAI_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Full chat-completions URL, for proxies and tests.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

impl TextGenerator for OpenAiClient {
    fn provider(&self) -> AiProvider {
        AiProvider::OpenAi
    }

    fn generate(&self, prompt: &str, model: &str) -> Result<String, AiError> {
        let body = ChatRequest {
            model,
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
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let client = reqwest::blocking::Client::new();
        let request = client.post(&self.endpoint).bearer_auth(&self.api_key);
        let response: ChatResponse = post_json(request, &body, "OpenAI")?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| unexpected_format("OpenAI"))
    }
}

// ============================================================================
// Google
// ============================================================================

pub struct GoogleClient {
    /// Base of the models collection; `/<model>:generateContent` is appended.
    pub endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

impl GoogleClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            endpoint: GOOGLE_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn url_for(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.endpoint, model)
    }
}

impl TextGenerator for GoogleClient {
    fn provider(&self) -> AiProvider {
        AiProvider::Google
    }

    fn generate(&self, prompt: &str, model: &str) -> Result<String, AiError> {
        let body = ContentRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let client = reqwest::blocking::Client::new();
        let request = client
            .post(self.url_for(model))
            .query(&[("key", self.api_key.as_str())]);
        let response: ContentResponse = post_json(request, &body, "Google AI")?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| unexpected_format("Google AI"))
    }
}

/// Client for `provider`, pointed at `endpoint` when one is configured.
pub fn build_generator(
    provider: AiProvider,
    api_key: &str,
    endpoint: Option<&str>,
) -> Box<dyn TextGenerator> {
    match (provider, endpoint) {
        (AiProvider::OpenAi, Some(url)) => Box::new(OpenAiClient::new(api_key).with_endpoint(url)),
        (AiProvider::OpenAi, None) => Box::new(OpenAiClient::new(api_key)),
        (AiProvider::Google, Some(url)) => Box::new(GoogleClient::new(api_key).with_endpoint(url)),
        (AiProvider::Google, None) => Box::new(GoogleClient::new(api_key)),
    }
}

// ============================================================================
// Mock generator (for testing without a network)
// ============================================================================

/// Canned reply; records every prompt it receives. Clones share the record,
/// so a test can keep one handle and hand the other to a generator.
#[derive(Clone)]
pub struct MockTextGenerator {
    reply: Result<String, AiError>,
    calls: Rc<Cell<usize>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl MockTextGenerator {
    pub fn succeeding(code: &str) -> Self {
        Self::with_reply(Ok(code.to_string()))
    }

    pub fn failing(error: AiError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, AiError>) -> Self {
        Self {
            reply,
            calls: Rc::new(Cell::new(0)),
            prompts: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl TextGenerator for MockTextGenerator {
    fn provider(&self) -> AiProvider {
        AiProvider::OpenAi
    }

    fn generate(&self, prompt: &str, _model: &str) -> Result<String, AiError> {
        self.calls.set(self.calls.get() + 1);
        self.prompts.borrow_mut().push(prompt.to_string());
        self.reply.clone()
    }
}
