use serde::{Deserialize, Deserializer, Serialize};

use crate::config::Config;

const TRUNCATE_AT: usize = 100;

// =============================================================================
// Wire types, as returned by the remote directory
// =============================================================================

/// Body of a search response. Only `providers` is consumed.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderListing {
    #[serde(default)]
    pub providers: Option<Vec<Provider>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Provider {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub additional_details: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: ProviderUser,
    pub relevant_sample: Option<RelevantSample>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub picture_small: Option<String>,
    pub picture_medium: Option<String>,
    pub picture_large: Option<String>,
    pub location: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RelevantSample {
    #[serde(default, deserialize_with = "null_as_default")]
    pub file: String,
    pub name: Option<String>,
}

/// Missing keys and explicit `null`s both fall back to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Search state
// =============================================================================

/// One search action. Built fresh for every submit or page change.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub page: u32,
}

impl SearchQuery {
    /// Pages are 1-based; anything lower is treated as the first page.
    pub fn new(keywords: impl Into<String>, page: u32) -> SearchQuery {
        SearchQuery {
            keywords: keywords.into(),
            page: page.max(1),
        }
    }
}

/// Outcome of one successful request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<ResultItem>,
}

impl SearchResult {
    /// Keeps `1 <= page <= total_pages`: a provider that reports fewer pages
    /// than the one just served gets its count raised to that page.
    pub fn new(page: u32, total_pages: u32, items: Vec<ResultItem>) -> SearchResult {
        let page = page.max(1);
        SearchResult {
            page,
            total_pages: total_pages.max(page),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(SearchResult),
    Failure { reason: String },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }
}

// =============================================================================
// Result cards
// =============================================================================

/// Read-only projection of a [`Provider`] as shown on a result card.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultItem {
    pub id: u64,
    pub display_name: String,
    pub username: String,
    pub profile_url: String,
    pub headline: Option<String>,
    pub highlightable_text: String,
    pub additional_details: Option<String>,
    pub location: Option<String>,
    pub sample_name: Option<String>,
    pub media_url: Option<String>,
    pub image_url: Option<String>,
}

/// Settings that shape how provider records become cards.
#[derive(Debug, Clone, Default)]
pub struct CardOptions {
    pub profile_base: String,
    pub fallback_image: Option<String>,
    pub audio_sample_override: Option<String>,
}

impl From<&Config> for CardOptions {
    fn from(config: &Config) -> Self {
        CardOptions {
            profile_base: config.profile_base.clone(),
            fallback_image: config.fallback_image.clone(),
            audio_sample_override: config.audio_sample_override.clone(),
        }
    }
}

impl ResultItem {
    pub fn from_provider(provider: Provider, options: &CardOptions) -> ResultItem {
        let Provider {
            id,
            headline,
            description,
            additional_details,
            user,
            relevant_sample,
        } = provider;

        let image_url = user
            .picture_small
            .filter(|p| !p.is_empty())
            .or(user.picture_medium.filter(|p| !p.is_empty()))
            .or(user.picture_large.filter(|p| !p.is_empty()))
            .or_else(|| options.fallback_image.clone());

        let (media_url, sample_name) = match relevant_sample {
            Some(sample) => (
                Some(sample.file).filter(|f| !f.is_empty()),
                sample.name.filter(|n| !n.is_empty()),
            ),
            None => (None, None),
        };
        let media_url = options.audio_sample_override.clone().or(media_url);

        let highlightable_text = description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(headline.as_deref())
            .map(|text| truncate_text(text, TRUNCATE_AT))
            .unwrap_or_default();

        ResultItem {
            id,
            profile_url: format!("{}{}", options.profile_base, user.username),
            display_name: user.name,
            username: user.username,
            headline: headline.filter(|h| !h.is_empty()),
            highlightable_text,
            additional_details: additional_details
                .filter(|d| !d.is_empty())
                .map(|d| truncate_text(&d, TRUNCATE_AT)),
            location: user.location.filter(|l| !l.is_empty()),
            sample_name,
            media_url,
            image_url,
        }
    }
}

/// Cuts `text` to `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
