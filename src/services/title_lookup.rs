//! Remote title lookup
//!
//! `TitleLookup` is the seam between the resolver and the network. The
//! production implementation fetches the workshop item page and pulls the
//! text out of its `workshopItemTitle` element.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("modsort-tui/", env!("CARGO_PKG_VERSION"));

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div[^>]*class\s*=\s*"[^"]*\bworkshopItemTitle\b[^"]*"[^>]*>(.*?)</div>"#)
        .unwrap()
});

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("catalog answered with HTTP {0}")]
    Status(u16),
    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
    #[error("no title element in the response")]
    TitleMissing,
}

/// Anything that can turn a mod id into a display title
pub trait TitleLookup: Send + Sync {
    fn fetch_title(&self, id: &str) -> Result<String, LookupError>;
}

/// Looks titles up on the Steam workshop item pages
pub struct SteamWorkshopLookup {
    agent: ureq::Agent,
    base_url: String,
}

impl SteamWorkshopLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }
}

impl TitleLookup for SteamWorkshopLookup {
    fn fetch_title(&self, id: &str) -> Result<String, LookupError> {
        let response = self
            .agent
            .get(&self.base_url)
            .query("id", id)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => LookupError::Status(code),
                other => LookupError::Transport(other.to_string()),
            })?;
        let body = response.into_string()?;
        extract_title(&body).ok_or(LookupError::TitleMissing)
    }
}

/// Text content of the first `workshopItemTitle` element, if it has any
pub fn extract_title(html: &str) -> Option<String> {
    let inner = TITLE_REGEX.captures(html)?.get(1)?.as_str();
    let text = TAG_REGEX.replace_all(inner, "");
    let title = decode_entities(text.trim());
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ if name.starts_with("#x") || name.starts_with("#X") => {
                    u32::from_str_radix(&name[2..], 16).ok().and_then(char::from_u32)
                }
                _ if name.starts_with('#') => name[1..].parse().ok().and_then(char::from_u32),
                _ => None,
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
