//! Render-ready page model shared by the terminal and HTTP front ends.

use serde::Serialize;

use crate::controller::ControllerState;
use crate::data_models::{RequestState, ResultItem};
use crate::highlight::{Segment, highlight};
use crate::pagination::Pagination;

/// Which of the mutually exclusive result areas to show.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayMode {
    Idle,
    Loading,
    Failure { reason: String },
    Empty,
    Results,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    #[serde(flatten)]
    pub item: ResultItem,
    pub highlighted: Vec<Segment>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchPageView {
    pub keywords: String,
    pub display: DisplayMode,
    pub cards: Vec<CardView>,
    pub pagination: Option<Pagination>,
}

impl SearchPageView {
    pub fn from_state(state: &ControllerState) -> SearchPageView {
        SearchPageView::new(state.keywords(), &state.request)
    }

    /// Matches in card text are highlighted against `keywords`.
    pub fn new(keywords: &str, request: &RequestState) -> SearchPageView {
        let (display, cards, pagination) = match request {
            RequestState::Idle => (DisplayMode::Idle, Vec::new(), None),
            RequestState::Loading => (DisplayMode::Loading, Vec::new(), None),
            RequestState::Failure { reason } => (
                DisplayMode::Failure {
                    reason: reason.clone(),
                },
                Vec::new(),
                None,
            ),
            RequestState::Success(result) if result.is_empty() => {
                (DisplayMode::Empty, Vec::new(), None)
            }
            RequestState::Success(result) => {
                let cards = result
                    .items
                    .iter()
                    .map(|item| CardView {
                        highlighted: highlight(&item.highlightable_text, keywords),
                        item: item.clone(),
                    })
                    .collect();
                (
                    DisplayMode::Results,
                    cards,
                    Some(Pagination::new(result.page, result.total_pages)),
                )
            }
        };

        SearchPageView {
            keywords: keywords.to_string(),
            display,
            cards,
            pagination,
        }
    }
}
