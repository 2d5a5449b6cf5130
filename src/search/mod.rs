pub mod google;

pub use google::{build_contact_query, GoogleSearchSource};

use crate::models::Result;

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub raw_text: String,
}

#[derive(Debug, Clone)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub next_page: Option<String>,
}

// A query's result pages form a finite sequence: start with no cursor,
// follow `next_page` until it runs out or the caller has seen enough.
#[async_trait::async_trait]
pub trait SearchSource: Send + Sync {
    async fn fetch_page(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage>;
}
