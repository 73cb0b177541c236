//! Gift suggestions as exported from the planner's document store.
//!
//! Only the fields needed to drive previews are interpreted; the rest are
//! carried so a suggestion round-trips through the CLI unchanged.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub wishlist_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User-entered product link; may be empty or not a URL at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// User ID of the member who suggested the gift.
    pub suggested_by: String,
    /// Creation timestamp as stored (RFC 3339); not interpreted here.
    pub created_at: String,
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default)]
    pub is_purchased: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_by: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
}

impl GiftSuggestion {
    /// The link as a preview request, if it is a non-empty absolute http(s) URL.
    pub fn preview_link(&self) -> Option<Url> {
        let link = self.link.as_deref()?.trim();
        if link.is_empty() {
            return None;
        }
        let url = Url::parse(link).ok()?;
        matches!(url.scheme(), "http" | "https").then_some(url)
    }
}

/// Load a JSON array of suggestions from `path`.
pub fn load_suggestions(path: &Path) -> Result<Vec<GiftSuggestion>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read suggestions file: {}", path.display()))?;
    let suggestions: Vec<GiftSuggestion> = serde_json::from_str(&data)
        .with_context(|| format!("parse suggestions JSON: {}", path.display()))?;
    Ok(suggestions)
}
