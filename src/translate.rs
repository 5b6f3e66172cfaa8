//! Quick text translation through the public Google Translate endpoint.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const ENV_TRANSLATE_URL: &str = "TRANS_TRANSLATE_URL";
const TRANSLATE_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLang {
    English,
    Chinese,
}

impl TargetLang {
    pub fn code(self) -> &'static str {
        match self {
            TargetLang::English => "en",
            TargetLang::Chinese => "zh-CN",
        }
    }

    /// English for text containing CJK characters, Chinese otherwise.
    pub fn detect_for(text: &str) -> TargetLang {
        if text.chars().any(is_cjk) {
            TargetLang::English
        } else {
            TargetLang::Chinese
        }
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{3000}'..='\u{303F}'
        | '\u{FF00}'..='\u{FFEF}')
}

fn endpoint() -> String {
    std::env::var(ENV_TRANSLATE_URL)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_string())
}

pub fn translate(text: &str, target: TargetLang) -> Result<String> {
    let url = endpoint();
    debug!(%url, target = target.code(), "sending translation request");

    let http = Client::builder()
        .timeout(Duration::from_secs(TRANSLATE_TIMEOUT_SECS))
        .build()
        .context("Failed to create HTTP client")?;
    let response = http
        .get(&url)
        .query(&[
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", target.code()),
            ("dt", "t"),
            ("q", text),
        ])
        .send()
        .context("Translation request failed")?;

    let status = response.status();
    let body = response
        .text()
        .context("Failed to read translation response")?;
    if !status.is_success() {
        bail!(
            "Translation request failed: HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        );
    }
    parse_translation(&body)
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The body is a nested array; `[0]` holds one entry per sentence and each entry starts with the
/// translated text.
pub fn parse_translation(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).context("Failed to parse translation response")?;
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("Unable to parse translation result"))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    Ok(translated)
}
