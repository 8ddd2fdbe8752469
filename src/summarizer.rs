use crate::types::{Article, Digest, Result, TrackerError};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Environment variable holding the Anthropic API credential.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Model used when no override is given.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2000;
const REQUEST_TIMEOUT_SECONDS: u64 = 120;

/// Turns a batch of collected articles into a structured digest.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a digest from the collected articles, or fail visibly.
    /// Partial results are never returned.
    async fn summarize(&self, articles: &[Article]) -> Result<Digest>;
}

/// Summarizer backed by the Anthropic Messages API.
pub struct ClaudeSummarizer {
    client: Client,
    api_key: String,
    model: String,
}

impl ClaudeSummarizer {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Build a summarizer from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| TrackerError::MissingApiKey)?;
        Self::new(api_key, model)
    }

    async fn request_completion(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![MessageParam {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<MessagesResponse>()
            .await?;

        response
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or(TrackerError::EmptyCompletion)
    }
}

#[async_trait]
impl Summarizer for ClaudeSummarizer {
    async fn summarize(&self, articles: &[Article]) -> Result<Digest> {
        info!("Generating digest with Claude ({})", self.model);

        let prompt = build_prompt(articles, Utc::now().date_naive());
        debug!("Prompt assembled ({} chars)", prompt.len());

        let reply = self.request_completion(&prompt).await?;
        let digest = parse_digest_reply(&reply)?;

        info!("Digest generated for {}", digest.date);
        Ok(digest)
    }
}

/// Assemble the analyst prompt: every article as a source/title/link/summary
/// block, followed by the instructions and the JSON shape the reply must
/// take.
pub fn build_prompt(articles: &[Article], date: NaiveDate) -> String {
    let articles_text = articles
        .iter()
        .map(|a| {
            format!(
                "Source: {}\nTitle: {}\nLink: {}\nSummary: {}",
                a.source, a.title, a.link, a.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are an AI trends analyst. Based on the following recent articles and podcast episodes from AI companies, tech news, and industry podcasts, provide a comprehensive daily summary.

Recent Articles & Podcast Episodes:
{articles_text}

Please provide:
1. **Overall Summary** - A 2-3 sentence summary of the day's AI news, including key takeaways from podcasts

2. **Podcast Highlights** - For each podcast episode included, provide:
   - Episode title
   - 2-3 bullet points with key insights, quotes, or takeaways
   - The episode link
   Focus on unique perspectives, interviews, or discussions that add depth beyond news articles.

3. **Top 3 Features/Announcements** - List the 3 most significant product features or announcements from major AI companies (OpenAI, Anthropic, Perplexity, Google, Meta). Include the company name and feature.

4. **Fintech/AI Trends** - Identify and summarize 2-3 key trends in the intersection of Fintech and AI based on the articles.

5. **Fundraising Highlights** - List any significant fundraising announcements or investment rounds mentioned (company name and amount).

Format your response as JSON with this structure:
{{
  "date": "{date}",
  "summary": "A 2-3 sentence overall summary of the day's AI news including podcast takeaways",
  "podcast_highlights": [
    {{
      "title": "Episode title",
      "source": "Podcast name",
      "key_points": [
        "Key insight or takeaway 1",
        "Key insight or takeaway 2",
        "Key insight or takeaway 3"
      ],
      "link": "Episode URL"
    }}
  ],
  "top_features": [
    {{"company": "Company Name", "feature": "Brief description"}}
  ],
  "fintech_trends": [
    "Trend description..."
  ],
  "fundraising": [
    {{"company": "Company Name", "amount": "Amount", "details": "Brief details"}}
  ]
}}

If there's no relevant information for a category, use an empty array [] or empty string "". Be concise but informative."#
    )
}

/// Locate the JSON payload in a model reply. Replies sometimes wrap the
/// object in a markdown code block; prefer a json-tagged fence, fall back to
/// a plain fence, else treat the whole text as JSON.
pub fn extract_json_block(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else if let Some(start) = text.find("```") {
        let rest = &text[start + "```".len()..];
        match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else {
        text
    }
    .trim()
}

/// Parse a model reply into a typed digest, stripping any code fencing.
pub fn parse_digest_reply(text: &str) -> Result<Digest> {
    serde_json::from_str(extract_json_block(text)).map_err(TrackerError::DigestParse)
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Canned summarizer for development and testing.
pub struct MockSummarizer {
    digest: Digest,
    fail: bool,
    calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn new(digest: Digest) -> Self {
        Self {
            digest,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Summarizer that always reports failure.
    pub fn failing() -> Self {
        Self {
            digest: Digest::empty(Utc::now().date_naive()),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `summarize` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, _articles: &[Article]) -> Result<Digest> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(TrackerError::EmptyCompletion);
        }
        Ok(self.digest.clone())
    }
}
