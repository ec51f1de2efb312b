//! Filter/sort engine over the loaded quotes.
//!
//! Everything here is a pure function of its inputs: the same dataset, filter,
//! sort key and like set always produce the same derived list.

pub mod facets;
pub mod filter;
pub mod sort;
pub mod summary;

pub use facets::Facets;
pub use filter::FilterConfig;
pub use sort::SortKey;
pub use summary::CatalogSummary;

use crate::likes::LikeStore;
use crate::parsing::DatasetState;
use crate::types::quote::Quote;

/// Quotes passing `filter`, ordered by `sort`.
pub fn derive<'a>(quotes: &'a [Quote], filter: &FilterConfig, sort: SortKey, likes: &LikeStore) -> Vec<&'a Quote> {
    let matcher = filter.matcher();
    let mut derived: Vec<&Quote> = quotes.iter().filter(|q| matcher.matches(q, likes)).collect();
    sort::sort_quotes(&mut derived, sort, likes);
    derived
}

/// What the card area should show.
#[derive(Debug)]
pub enum ViewState<'a> {
    Loading,
    Failed(&'a str),
    /// Loaded, but nothing passes the current filters.
    Empty,
    Results(Vec<&'a Quote>),
}

impl<'a> ViewState<'a> {
    pub fn resolve(state: &'a DatasetState, filter: &FilterConfig, sort: SortKey, likes: &LikeStore) -> Self {
        match state {
            DatasetState::Loading(_) => ViewState::Loading,
            DatasetState::Failed(message) => ViewState::Failed(message.as_str()),
            DatasetState::Ready(dataset) => {
                let derived = derive(&dataset.quotes, filter, sort, likes);
                if derived.is_empty() {
                    ViewState::Empty
                } else {
                    ViewState::Results(derived)
                }
            }
        }
    }

    pub fn results(&self) -> &[&'a Quote] {
        match self {
            ViewState::Results(quotes) => quotes,
            _ => &[],
        }
    }
}
