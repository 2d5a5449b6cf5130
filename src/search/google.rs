// src/search/google.rs
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SearchConfig;
use crate::models::Result;
use crate::search::{SearchHit, SearchPage, SearchSource};

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
const MISSING_TITLE: &str = "Sin título";

// Sector terms are widened with contact-intent words before searching
pub fn build_contact_query(sector: &str) -> String {
    format!(
        "{} AND (\"contacto\" OR \"teléfono\" OR \"telefono\" OR \"contact\" OR \"WhatsApp\" OR \"correo\" OR \"email\")",
        sector
    )
}

pub struct GoogleSearchSource {
    client: Client,
    captcha_retries: u8,
    captcha_backoff_ms: u64,
    result_selector: Selector,
    title_selector: Selector,
    link_selector: Selector,
    next_page_selector: Selector,
}

impl GoogleSearchSource {
    pub fn new(config: &SearchConfig) -> Self {
        let mut headers = HeaderMap::new();
        // Preset consent so the cookie interstitial never shows up
        headers.insert(COOKIE, HeaderValue::from_static("CONSENT=YES+"));

        let client = Client::builder()
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
            )
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            captcha_retries: config.captcha_retries,
            captcha_backoff_ms: config.captcha_backoff_ms,
            result_selector: Selector::parse("div.g, div.hlcw0c").unwrap(),
            title_selector: Selector::parse("h3").unwrap(),
            link_selector: Selector::parse("a[href]").unwrap(),
            next_page_selector: Selector::parse("a#pnnext").unwrap(),
        }
    }

    fn parse_results_page(&self, body: &str) -> SearchPage {
        let document = Html::parse_document(body);

        let mut hits = Vec::new();
        for container in document.select(&self.result_selector) {
            let title = container
                .select(&self.title_selector)
                .next()
                .map(|h| h.text().collect::<Vec<_>>().join(" ").trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| MISSING_TITLE.to_string());

            let link = container
                .select(&self.link_selector)
                .filter_map(|a| a.value().attr("href"))
                .find_map(clean_result_href)
                .unwrap_or_default();

            let raw_text = container
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");

            hits.push(SearchHit {
                title,
                link,
                raw_text,
            });
        }

        let next_page = document
            .select(&self.next_page_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(absolutize);

        SearchPage { hits, next_page }
    }

    async fn backoff(&self, attempt: u8) {
        let delay = self.captcha_backoff_ms * attempt as u64 + fastrand::u64(0..500);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

#[async_trait::async_trait]
impl SearchSource for GoogleSearchSource {
    async fn fetch_page(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage> {
        let mut attempt: u8 = 0;

        loop {
            let request = match cursor {
                Some(next) => self.client.get(next),
                None => self
                    .client
                    .get(GOOGLE_SEARCH_URL)
                    .query(&[("q", query), ("hl", "es")]),
            };

            let body = match request.send().await {
                Ok(response) if response.status().is_success() => response.text().await?,
                Ok(response) => {
                    let status = response.status();
                    attempt += 1;
                    if attempt > self.captcha_retries {
                        return Err(format!(
                            "Search kept answering HTTP {} for \"{}\"",
                            status, query
                        )
                        .into());
                    }
                    warn!(
                        "HTTP {} from search for \"{}\", backing off ({}/{})",
                        status, query, attempt, self.captcha_retries
                    );
                    self.backoff(attempt).await;
                    continue;
                }
                Err(e) => {
                    attempt += 1;
                    if attempt > self.captcha_retries {
                        return Err(e.into());
                    }
                    warn!(
                        "Request for \"{}\" failed: {}. Retrying ({}/{})",
                        query, e, attempt, self.captcha_retries
                    );
                    self.backoff(attempt).await;
                    continue;
                }
            };

            let page = self.parse_results_page(&body);

            // A page with zero result containers is either a genuine empty
            // result set or a challenge interstitial
            if page.hits.is_empty() {
                if no_results(&body) {
                    info!("No results for \"{}\"", query);
                    return Ok(SearchPage {
                        hits: Vec::new(),
                        next_page: None,
                    });
                }

                attempt += 1;
                if attempt > self.captcha_retries {
                    return Err(format!("🚫 Blocked by anti-bot challenge for \"{}\"", query).into());
                }
                warn!(
                    "Challenge page for \"{}\", backing off ({}/{})",
                    query, attempt, self.captcha_retries
                );
                self.backoff(attempt).await;
                continue;
            }

            debug!(
                "Parsed {} results for \"{}\" (next page: {})",
                page.hits.len(),
                query,
                page.next_page.is_some()
            );
            return Ok(page);
        }
    }
}

fn no_results(body: &str) -> bool {
    body.contains("did not match any documents") || body.contains("no obtuvo ningún resultado")
}

// Raw result pages wrap outbound links in a /url?q= redirect; unwrap it and
// keep only links that leave google.com
fn clean_result_href(href: &str) -> Option<String> {
    if href.starts_with("/url?") {
        let resolved = Url::parse("https://www.google.com").ok()?.join(href).ok()?;
        return resolved
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.to_string())
            .filter(|target| is_external(target));
    }

    if is_external(href) {
        return Some(href.to_string());
    }
    None
}

fn is_external(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url
                    .host_str()
                    .map(|host| !host.contains("google."))
                    .unwrap_or(false)
        }
        Err(_) => false,
    }
}

fn absolutize(href: &str) -> Option<String> {
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    Url::parse("https://www.google.com")
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.to_string())
}
