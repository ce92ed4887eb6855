use serde::{Deserialize, Serialize};

use crate::views::SearchPageView;

/// Query string of `GET /api/search`, the same `?keywords=&page=` pair the
/// UI keeps in its address bar.
#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    pub keywords: Option<String>,
    pub page: Option<String>,
}

impl SearchParams {
    pub fn keywords(&self) -> &str {
        self.keywords.as_deref().unwrap_or("")
    }

    /// Lenient: anything that is not a positive integer means page 1.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub view: SearchPageView,
    pub processing_time_ms: u128,
}
