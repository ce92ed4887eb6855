use std::future::Future;
use std::sync::Arc;

use reqwest::Url;

use crate::config::Config;
use crate::data_models::{CardOptions, ProviderListing, ResultItem, SearchQuery};
use crate::error::FetchError;

/// Response header carrying the number of result pages.
pub const TOTAL_PAGES_HEADER: &str = "x-list-total-pages";

/// One page of results as delivered by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPage {
    pub items: Vec<ResultItem>,
    pub total_pages: u32,
}

/// Source of search results. One call is one outbound request.
pub trait SearchProvider: Send + Sync {
    fn fetch(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<ProviderPage, FetchError>> + Send;
}

impl<P: SearchProvider> SearchProvider for Arc<P> {
    fn fetch(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<ProviderPage, FetchError>> + Send {
        self.as_ref().fetch(query)
    }
}

/// Page count from the header value; 1 when missing, non-numeric or zero.
pub fn parse_total_pages(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|pages| *pages > 0)
        .unwrap_or(1)
}

/// reqwest-backed client for the Voice123 provider search endpoint.
#[derive(Debug, Clone)]
pub struct Voice123Client {
    http: reqwest::Client,
    base: String,
    service: String,
    cards: CardOptions,
}

impl Voice123Client {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Voice123Client {
            http,
            base: config.api_base.clone(),
            service: config.service.clone(),
            cards: CardOptions::from(config),
        })
    }

    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, FetchError> {
        let page = query.page.to_string();
        Url::parse_with_params(
            &self.base,
            &[
                ("service", self.service.as_str()),
                ("keywords", query.keywords.as_str()),
                ("page", page.as_str()),
            ],
        )
        .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {e}", self.base)))
    }
}

impl SearchProvider for Voice123Client {
    async fn fetch(&self, query: &SearchQuery) -> Result<ProviderPage, FetchError> {
        let url = self.search_url(query)?;
        log::debug!("fetching providers: {url}");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            log::warn!("provider search returned {status}");
            return Err(FetchError::Status(status));
        }

        let total_pages = parse_total_pages(
            res.headers()
                .get(TOTAL_PAGES_HEADER)
                .and_then(|v| v.to_str().ok()),
        );

        let listing: ProviderListing = res.json().await?;
        let items: Vec<ResultItem> = listing
            .providers
            .unwrap_or_default()
            .into_iter()
            .map(|provider| ResultItem::from_provider(provider, &self.cards))
            .collect();

        log::info!(
            "fetched {} providers for {:?} (page {}/{})",
            items.len(),
            query.keywords,
            query.page,
            total_pages
        );

        Ok(ProviderPage { items, total_pages })
    }
}
