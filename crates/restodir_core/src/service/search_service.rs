//! Restaurant search use-case service.
//!
//! # Responsibility
//! - Dispatch one search request to the matching repository query.
//! - Apply the default size of the top-rated list.

use crate::model::cuisine_type::CuisineTypeId;
use crate::model::restaurant::Restaurant;
use crate::repo::restaurant_repo::RestaurantRepository;
use crate::repo::RepoResult;
use crate::search::criteria::{AddressCriteria, MultiCriteria};
use log::info;
use serde::{Deserialize, Serialize};

/// Size of the top-rated list when the caller does not choose one.
pub const TOP_RATED_DEFAULT_LIMIT: u32 = 4;

/// One search form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "criterion", rename_all = "snake_case")]
pub enum SearchRequest {
    ByName { text: String },
    ByAddress(AddressCriteria),
    ByCuisineTypes { ids: Vec<CuisineTypeId> },
    Multi(MultiCriteria),
}

impl SearchRequest {
    /// Stable criterion name used in logs.
    pub fn criterion(&self) -> &'static str {
        match self {
            Self::ByName { .. } => "name",
            Self::ByAddress(_) => "address",
            Self::ByCuisineTypes { .. } => "cuisine_types",
            Self::Multi(_) => "multi",
        }
    }
}

/// Search facade over a restaurant repository.
pub struct SearchService<R: RestaurantRepository> {
    repo: R,
}

impl<R: RestaurantRepository> SearchService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Runs one search request; results are fully assembled restaurants.
    pub fn search(&self, request: &SearchRequest) -> RepoResult<Vec<Restaurant>> {
        let results = match request {
            SearchRequest::ByName { text } => self.repo.get_by_name_substring(text),
            SearchRequest::ByAddress(address) => self.repo.get_by_address(address),
            SearchRequest::ByCuisineTypes { ids } => self.repo.get_by_cuisine_types(ids),
            SearchRequest::Multi(criteria) => self.repo.get_by_multiple_criteria(criteria),
        }?;

        info!(
            "event=restaurant_search module=service status=ok criterion={} results={}",
            request.criterion(),
            results.len()
        );
        Ok(results)
    }

    /// Lists the best rated restaurants, `TOP_RATED_DEFAULT_LIMIT` by default.
    pub fn top_rated(&self, limit: Option<u32>) -> RepoResult<Vec<Restaurant>> {
        self.repo
            .get_top_rated(limit.unwrap_or(TOP_RATED_DEFAULT_LIMIT))
    }
}
