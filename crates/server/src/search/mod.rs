//! Search dispatch: query classification and lookup strategy selection.
//!
//! The dispatcher decides, from the raw query text alone, whether to treat
//! a search as an SKU-style lookup (substring match over SKU and product
//! name) or as a free-text query (semantic-first with substring fallback),
//! then runs the chosen repository query. It is stateless per call; its
//! collaborators are injected through the [`OfferStore`] and
//! [`CandidateSource`] traits so they can be replaced with test doubles.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

use partdesk_core::{Offer, ProductId, SortKey};

use crate::db::RepositoryError;
use crate::semantic::SemanticLookup;

/// Candidate cap passed to the semantic ranking service.
pub const SEMANTIC_TOP_K: usize = 30;

/// Read-only query interface over the catalog store.
#[async_trait]
pub trait OfferStore: Send + Sync {
    /// Case-insensitive substring match against SKU and product name.
    async fn search_by_term(
        &self,
        term: &str,
        sort: SortKey,
    ) -> Result<Vec<Offer>, RepositoryError>;

    /// Offers restricted to an exact product-id set.
    async fn search_by_product_ids(
        &self,
        ids: &[ProductId],
        sort: SortKey,
    ) -> Result<Vec<Offer>, RepositoryError>;
}

/// Ranked candidate lookup against the semantic service.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn lookup(&self, query: &str, top_k: usize) -> SemanticLookup;
}

/// Errors surfaced by the search dispatcher.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The trimmed query was empty; nothing was looked up.
    #[error("empty query")]
    EmptyQuery,

    /// The query was valid but matched no offers.
    #[error("no results")]
    NoResults,

    /// The catalog store failed; details stay in the logs.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// How a query should be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind {
    /// Digit-bearing catalog code; substring match only. Codes carry no
    /// natural-language semantics, so the ranking service is never asked.
    SkuLike,
    /// Natural-language phrase; semantic-first with substring fallback.
    FreeText,
}

/// Classify a trimmed query.
///
/// A query is SKU-like when its whitespace-stripped form carries at least
/// one digit; everything else is treated as free text.
fn classify(query: &str) -> QueryKind {
    let has_digit = query
        .chars()
        .filter(|c| !c.is_whitespace())
        .any(|c| c.is_ascii_digit());
    if has_digit {
        QueryKind::SkuLike
    } else {
        QueryKind::FreeText
    }
}

/// Run one search: classify, route, and fetch the matching offers.
///
/// All repository queries come back ordered by the resolved sort column
/// ascending; the dispatcher imposes no ordering of its own.
///
/// # Errors
///
/// - [`SearchError::EmptyQuery`] when the trimmed query is empty (no
///   repository or semantic calls are made)
/// - [`SearchError::Repository`] when the store fails
/// - [`SearchError::NoResults`] when the query matched nothing
#[instrument(skip(store, candidates))]
pub async fn dispatch<S, C>(
    store: &S,
    candidates: &C,
    query: &str,
    sort: SortKey,
) -> Result<Vec<Offer>, SearchError>
where
    S: OfferStore,
    C: CandidateSource,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let offers = match classify(query) {
        QueryKind::SkuLike => store.search_by_term(query, sort).await?,
        QueryKind::FreeText => match candidates.lookup(query, SEMANTIC_TOP_K).await {
            SemanticLookup::Candidates(ids) if !ids.is_empty() => {
                debug!(candidates = ids.len(), "restricting to semantic candidates");
                store.search_by_product_ids(&ids, sort).await?
            }
            SemanticLookup::Candidates(_) | SemanticLookup::Degraded => {
                debug!("no semantic candidates, using substring fallback");
                store.search_by_term(query, sort).await?
            }
        },
    };

    if offers.is_empty() {
        return Err(SearchError::NoResults);
    }
    Ok(offers)
}
