use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const DEFAULT_DATA_FILE: &str = "perks.jsonl";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum PerksError {
    #[error("Failed to read perk data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request to perk backend failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Perk backend returned {0}")]
    Upstream(reqwest::StatusCode),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PerksError>;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Perk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub merchant: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub discount_percent: Option<u8>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    pub visibility: Visibility,
}

impl Perk {
    pub fn new(title: impl Into<String>, merchant: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            merchant: merchant.into(),
            description: None,
            category: None,
            discount_percent: None,
            expires_at: None,
            visibility: Visibility::Public,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A record as it arrives, before any field is trusted.
///
/// Only `title` and `merchant` can disqualify a record. Every other field
/// degrades to its default when it has an unexpected shape.
#[derive(Deserialize)]
struct RawPerk {
    #[serde(default, alias = "_id")]
    id: Value,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    merchant: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    category: Value,
    #[serde(default, alias = "discountPercent")]
    discount_percent: Value,
    #[serde(default, alias = "expiresAt")]
    expires_at: Value,
    #[serde(default)]
    visibility: Value,
}

impl RawPerk {
    fn into_perk(self) -> Option<Perk> {
        let title = required_text(self.title, "title")?;
        let merchant = required_text(self.merchant, "merchant")?;

        Some(Perk {
            id: lenient_id(self.id),
            description: optional_text(self.description, "description", &title),
            category: optional_text(self.category, "category", &title),
            discount_percent: lenient_discount(self.discount_percent, &title),
            expires_at: lenient_expiry(self.expires_at, &title),
            visibility: lenient_visibility(self.visibility, &title),
            title,
            merchant,
        })
    }
}

fn required_text(value: Value, field: &str) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        other => {
            tracing::warn!("Skipping perk with unusable {}: {}", field, other);
            None
        }
    }
}

fn optional_text(value: Value, field: &str, title: &str) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        other => {
            tracing::warn!("Ignoring {} {} on perk {:?}", field, other, title);
            None
        }
    }
}

fn lenient_id(value: Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Accepts numbers and numeric strings in 0..=100, rounded to whole percent.
fn lenient_discount(value: Value, title: &str) -> Option<u8> {
    let pct = match &value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match pct {
        Some(pct) if (0.0..=100.0).contains(&pct) => Some(pct.round() as u8),
        _ => {
            tracing::warn!("Ignoring discount {} on perk {:?}", value, title);
            None
        }
    }
}

/// RFC 3339 timestamps, or bare `YYYY-MM-DD` dates taken as midnight UTC.
fn lenient_expiry(value: Value, title: &str) -> Option<OffsetDateTime> {
    let parsed = match &value {
        Value::Null => return None,
        Value::String(s) => OffsetDateTime::parse(s.trim(), &Rfc3339).ok().or_else(|| {
            Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
                .ok()
                .map(|date| date.midnight().assume_utc())
        }),
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!("Ignoring expiry {} on perk {:?}", value, title);
    }
    parsed
}

/// Case-insensitive; anything unrecognised counts as public.
fn lenient_visibility(value: Value, title: &str) -> Visibility {
    match &value {
        Value::Null => Visibility::Public,
        Value::String(s) if s.trim().eq_ignore_ascii_case("private") => Visibility::Private,
        Value::String(s) if s.trim().eq_ignore_ascii_case("public") => Visibility::Public,
        other => {
            tracing::warn!("Unknown visibility {} on perk {:?}, treating as public", other, title);
            Visibility::Public
        }
    }
}

/// Payload shapes accepted from a remote backend.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Bare(Vec<Value>),
    Wrapped { perks: Vec<Value> },
}

#[derive(Clone, Debug)]
enum Source {
    File(PathBuf),
    Remote { url: String, timeout: Duration },
}

#[derive(Clone)]
pub struct Client {
    source: Source,
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Reads `perks.jsonl` in the working directory until told otherwise.
    pub fn new() -> Self {
        Self {
            source: Source::File(PathBuf::from(DEFAULT_DATA_FILE)),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Source::File(path.into());
        self
    }

    pub fn with_remote(mut self, url: impl Into<String>, timeout: Duration) -> Self {
        self.source = Source::Remote {
            url: url.into(),
            timeout,
        };
        self
    }

    /// Human readable description of where perks come from.
    pub fn source_label(&self) -> String {
        match &self.source {
            Source::File(path) => path.display().to_string(),
            Source::Remote { url, .. } => url.clone(),
        }
    }

    /// Fetches every publicly visible perk, in source order.
    pub async fn list_perks(&self) -> Result<Vec<Perk>> {
        let records = match &self.source {
            Source::File(path) => read_file(path).await?,
            Source::Remote { url, timeout } => self.fetch_remote(url, *timeout).await?,
        };

        let perks: Vec<Perk> = records.into_iter().filter(Perk::is_public).collect();
        tracing::debug!(
            source = %self.source_label(),
            count = perks.len(),
            "Loaded public perks"
        );
        Ok(perks)
    }

    async fn fetch_remote(&self, url: &str, timeout: Duration) -> Result<Vec<Perk>> {
        tracing::debug!("Fetching perks from {}", url);
        let response = self.http.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PerksError::Upstream(status));
        }

        let body = response.bytes().await?;
        parse_listing(&body)
    }
}

async fn read_file(path: &Path) -> Result<Vec<Perk>> {
    let contents = tokio::fs::read(path).await?;

    let mut perks = Vec::new();
    for (index, raw_line) in contents.split(|b| *b == b'\n').enumerate() {
        let line = match std::str::from_utf8(raw_line) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::warn!("Skipping line {} of {}: {}", index + 1, path.display(), e);
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => {
                if let Some(perk) = parse_record(value) {
                    perks.push(perk);
                }
            }
            Err(e) => {
                tracing::warn!("Skipping line {} of {}: {}", index + 1, path.display(), e);
            }
        }
    }

    Ok(perks)
}

/// Parses a backend payload: either a bare array or `{"perks": [...]}`.
pub fn parse_listing(body: &[u8]) -> Result<Vec<Perk>> {
    let records = match serde_json::from_slice::<Listing>(body)? {
        Listing::Bare(records) | Listing::Wrapped { perks: records } => records,
    };
    Ok(records.into_iter().filter_map(parse_record).collect())
}

/// Converts one raw record, dropping it when title or merchant is unusable.
pub fn parse_record(value: Value) -> Option<Perk> {
    match serde_json::from_value::<RawPerk>(value) {
        Ok(raw) => raw.into_perk(),
        Err(e) => {
            tracing::warn!("Skipping malformed perk: {}", e);
            None
        }
    }
}

/// Distinct merchant names, ordered case-insensitively.
pub fn list_merchants(perks: &[Perk]) -> Vec<String> {
    let mut merchants: Vec<String> = perks.iter().map(|p| p.merchant.clone()).collect();
    merchants.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    merchants.dedup();
    merchants
}
