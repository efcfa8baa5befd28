//! Paginated fetch bookkeeping
//!
//! The coordinator owns the query string, the current page, the
//! accumulated result list and the loading flag. It performs no I/O
//! itself: the application asks it for a [`FetchRequest`], runs the
//! network call, and feeds the outcome back through [`FetchCoordinator::apply`].
//!
//! Every request carries a monotonically increasing id. Only the most
//! recently issued id may touch state; responses that arrive for an
//! older id are discarded, so an in-flight search can never overwrite
//! a newer one.

use crate::api::ProviderError;
use crate::state::data::{ImageRecord, ResultPage};

/// A fetch the application should run against the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Sequence id; echoed back in [`FetchCoordinator::apply`]
    pub id: u64,
    /// Query string, empty for the curated feed
    pub query: String,
    /// 1-based page number
    pub page: u32,
}

/// What applying a response did to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result list was updated
    Updated,
    /// The provider call failed; the caller should show a notice
    Failed,
    /// The response belonged to a superseded request and was ignored
    Stale,
}

/// Tracks one search-and-paginate cycle against the provider.
#[derive(Debug, Default)]
pub struct FetchCoordinator {
    query: String,
    page: u32,
    images: Vec<ImageRecord>,
    has_more: bool,
    loading: bool,
    latest_request: u64,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start browsing the curated feed from the first page.
    ///
    /// Supersedes any in-flight request.
    pub fn begin_browse(&mut self) -> FetchRequest {
        self.start(String::new())
    }

    /// Submit a search query.
    ///
    /// Blank and whitespace-only queries issue no request and leave the
    /// coordinator untouched; otherwise the trimmed query starts over
    /// from page 1, superseding any in-flight request.
    pub fn submit_query(&mut self, query: &str) -> Option<FetchRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(self.start(query.to_string()))
    }

    fn start(&mut self, query: String) -> FetchRequest {
        self.query = query;
        self.page = 1;
        self.issue()
    }

    /// Request the next page of the current query.
    ///
    /// Refuses while a fetch is in flight or when the provider reported
    /// no further pages.
    pub fn begin_load_more(&mut self) -> Option<FetchRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchRequest {
        self.latest_request += 1;
        self.loading = true;
        FetchRequest {
            id: self.latest_request,
            query: self.query.clone(),
            page: self.page,
        }
    }

    /// Fold a provider response back into the coordinator.
    ///
    /// Page 1 replaces the accumulated list, later pages append in
    /// order. A failed first page empties the list; a failed later page
    /// leaves it untouched. Either way the loading flag clears.
    pub fn apply(&mut self, id: u64, outcome: Result<ResultPage, ProviderError>) -> Applied {
        if id != self.latest_request {
            return Applied::Stale;
        }
        self.loading = false;
        match outcome {
            Ok(page) => {
                if self.page == 1 {
                    self.images = page.images;
                } else {
                    self.images.extend(page.images);
                }
                self.has_more = page.has_more;
                Applied::Updated
            }
            Err(_) => {
                if self.page == 1 {
                    self.images.clear();
                    self.has_more = false;
                }
                Applied::Failed
            }
        }
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            url: format!("https://images.example/{id}.jpg"),
            alt: format!("photo {id}"),
            photographer: Some("Annie".to_string()),
            width: 4000,
            height: 3000,
        }
    }

    fn page(ids: &[&str], has_more: bool) -> ResultPage {
        ResultPage {
            images: ids.iter().map(|id| record(id)).collect(),
            has_more,
        }
    }

    fn failure() -> ProviderError {
        ProviderError::Status(500)
    }

    #[test]
    fn load_more_appends_in_order() {
        let mut fetch = FetchCoordinator::new();

        let req = fetch.begin_browse();
        assert_eq!(req.page, 1);
        assert!(fetch.is_loading());
        assert_eq!(fetch.apply(req.id, Ok(page(&["a", "b"], true))), Applied::Updated);
        assert!(!fetch.is_loading());

        let req = fetch.begin_load_more().expect("has more pages");
        assert_eq!(req.page, 2);
        assert_eq!(fetch.apply(req.id, Ok(page(&["c"], false))), Applied::Updated);

        let ids: Vec<&str> = fetch.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(!fetch.has_more());
    }

    #[test]
    fn new_search_replaces_accumulated_results() {
        let mut fetch = FetchCoordinator::new();
        let req = fetch.begin_browse();
        fetch.apply(req.id, Ok(page(&["a", "b"], true)));

        let req = fetch.submit_query("cats").expect("non-blank query");
        assert_eq!(req.page, 1);
        assert_eq!(req.query, "cats");
        fetch.apply(req.id, Ok(page(&["x"], true)));

        let ids: Vec<&str> = fetch.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["x"]);
    }

    #[test]
    fn first_page_failure_empties_the_list() {
        let mut fetch = FetchCoordinator::new();
        let req = fetch.begin_browse();
        fetch.apply(req.id, Ok(page(&["a"], true)));

        let req = fetch.submit_query("x").unwrap();
        assert_eq!(fetch.apply(req.id, Err(failure())), Applied::Failed);
        assert!(fetch.images().is_empty());
        assert!(!fetch.has_more());
        assert!(!fetch.is_loading());
    }

    #[test]
    fn later_page_failure_keeps_existing_results() {
        let mut fetch = FetchCoordinator::new();
        let req = fetch.begin_browse();
        fetch.apply(req.id, Ok(page(&["a", "b"], true)));

        let req = fetch.begin_load_more().unwrap();
        assert_eq!(fetch.apply(req.id, Err(failure())), Applied::Failed);
        assert_eq!(fetch.images().len(), 2);
        assert!(!fetch.is_loading());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut fetch = FetchCoordinator::new();
        let old = fetch.submit_query("dogs").unwrap();
        let new = fetch.submit_query("cats").unwrap();

        assert_eq!(fetch.apply(old.id, Ok(page(&["dog"], true))), Applied::Stale);
        assert!(fetch.images().is_empty());
        assert!(fetch.is_loading());

        assert_eq!(fetch.apply(new.id, Ok(page(&["cat"], false))), Applied::Updated);
        assert_eq!(fetch.images()[0].id, "cat");
    }

    #[test]
    fn load_more_refuses_while_loading_or_exhausted() {
        let mut fetch = FetchCoordinator::new();
        assert!(fetch.begin_load_more().is_none());

        let req = fetch.begin_browse();
        assert!(fetch.begin_load_more().is_none());

        fetch.apply(req.id, Ok(page(&["a"], false)));
        assert!(fetch.begin_load_more().is_none());
    }

    #[test]
    fn query_is_trimmed() {
        let mut fetch = FetchCoordinator::new();
        let req = fetch.submit_query("  sunsets  ").unwrap();
        assert_eq!(req.query, "sunsets");
        assert_eq!(fetch.query(), "sunsets");
    }

    #[test]
    fn blank_query_submit_issues_no_request() {
        let mut fetch = FetchCoordinator::new();
        let req = fetch.begin_browse();
        fetch.apply(req.id, Ok(page(&["a"], true)));

        assert!(fetch.submit_query("").is_none());
        assert!(fetch.submit_query("   \t").is_none());

        assert!(!fetch.is_loading());
        assert_eq!(fetch.query(), "");
        let ids: Vec<&str> = fetch.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a"]);
        assert!(fetch.has_more());
    }
}
