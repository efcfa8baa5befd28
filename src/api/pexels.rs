//! Pexels API client
//!
//! Two read endpoints: `/v1/search` when a query is present and
//! `/v1/curated` for the browse feed. Both return the same page shape,
//! which is mapped into [`ResultPage`] view models here so nothing
//! outside this module sees the wire format.

use serde::Deserialize;
use tokio::task;

use crate::api::ProviderError;
use crate::state::data::{ImageRecord, ResultPage};

const BASE_URL: &str = "https://api.pexels.com/v1";

/// Photos requested per page
const PER_PAGE: u32 = 30;

/// One page as returned by both endpoints.
#[derive(Debug, Deserialize)]
struct PexelsResponse {
    page: u32,
    per_page: u32,
    #[serde(default)]
    total_results: u64,
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    photographer: String,
    #[serde(default)]
    alt: String,
    src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsSrc {
    large: String,
}

/// Authenticated handle to the Pexels API.
///
/// Cheap to clone; the credential rides along into the blocking task
/// that performs the actual request.
#[derive(Debug, Clone)]
pub struct PexelsClient {
    agent: ureq::Agent,
    api_key: String,
}

impl PexelsClient {
    pub fn new(api_key: String) -> Self {
        PexelsClient {
            agent: ureq::Agent::new(),
            api_key,
        }
    }

    /// Fetch one page: the search endpoint when `query` is non-empty,
    /// the curated feed otherwise.
    pub async fn load_page(self, query: String, page: u32) -> Result<ResultPage, ProviderError> {
        // Spawn blocking because ureq performs synchronous I/O
        task::spawn_blocking(move || self.load_page_blocking(&query, page))
            .await
            .map_err(|e| ProviderError::Task(e.to_string()))?
    }

    fn load_page_blocking(&self, query: &str, page: u32) -> Result<ResultPage, ProviderError> {
        let page_text = page.to_string();
        let per_page_text = PER_PAGE.to_string();

        let request = if query.is_empty() {
            self.agent.get(&format!("{BASE_URL}/curated"))
        } else {
            self.agent
                .get(&format!("{BASE_URL}/search"))
                .query("query", query)
        };

        let response = request
            .query("page", &page_text)
            .query("per_page", &per_page_text)
            .set("Authorization", &self.api_key)
            .call()?;

        let data: PexelsResponse = response
            .into_json()
            .map_err(|e| ProviderError::Payload(e.to_string()))?;

        Ok(map_response(data))
    }
}

fn map_response(data: PexelsResponse) -> ResultPage {
    let has_more = page_has_more(data.page, data.per_page, data.total_results);
    ResultPage {
        images: data.photos.into_iter().map(map_photo).collect(),
        has_more,
    }
}

/// Page-based continuation: more pages exist while the photos served so
/// far fall short of the provider's total.
fn page_has_more(page: u32, per_page: u32, total_results: u64) -> bool {
    u64::from(page) * u64::from(per_page) < total_results
}

fn map_photo(photo: PexelsPhoto) -> ImageRecord {
    let photographer = if photo.photographer.is_empty() {
        None
    } else {
        Some(photo.photographer)
    };
    let alt = if photo.alt.trim().is_empty() {
        match &photographer {
            Some(name) => format!("Photo by {name}"),
            None => "Untitled photo".to_string(),
        }
    } else {
        photo.alt
    };

    ImageRecord {
        id: photo.id.to_string(),
        url: photo.src.large,
        alt,
        photographer,
        width: photo.width,
        height: photo.height,
    }
}
