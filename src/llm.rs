// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const UA: &str = concat!(
    "cardclip/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/cardclip)"
);

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// One-shot completion against a remote reasoning service. Implementations
/// transport the prompt and return the raw reply text; the grammar lives in
/// `protocol` and is never their concern.
pub trait ReasoningClient {
    fn complete(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// Explicit client configuration, constructed once at the edge (main) and
/// passed in. Business logic never reads the environment.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub struct GeminiClient {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Result<Self, PipelineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(UA)
            .build()
            .map_err(|e| PipelineError::Upstream(e.to_string()))?;
        Ok(Self { config, client })
    }
}

impl ReasoningClient for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, PipelineError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        );

        // Single attempt; the client timeout bounds the wait. No retries.
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(|e| PipelineError::Upstream(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PipelineError::Upstream(format!(
                "Gemini API returned status {status}"
            )));
        }

        let parsed: GeminiResponse = resp
            .json()
            .map_err(|e| PipelineError::Upstream(format!("malformed Gemini response: {e}")))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PipelineError::Upstream("no candidates in Gemini response".to_string()))
    }
}
