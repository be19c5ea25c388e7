//! Google Scholar author-profile client.
//!
//! Scrapes the author's profile page (stats table plus paginated publication
//! rows) and upgrades each row via its citation-detail page. Detail fetches
//! get a fixed retry budget and then degrade to the row's basic fields; only
//! a failed author lookup is fatal to the run.

use crate::error::{OptionExt, Result, SyncError};
use crate::record::{AuthorField, RawRecord};
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default Google Scholar URL
pub const DEFAULT_SCHOLAR_URL: &str = "https://scholar.google.com";

/// User agent string for requests
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Publication rows requested per profile page
const PAGE_SIZE: usize = 100;

/// Attempts per citation-detail fetch before falling back to basic info
const FILL_ATTEMPTS: u32 = 2;

/// Author-level aggregates parsed from the profile stats table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// The configured Scholar author id
    pub scholar_id: String,
    /// Display name
    pub name: String,
    /// Total citation count across all publications
    pub cited_by: i64,
    pub h_index: i64,
    pub i10_index: i64,
}

/// Outcome of a per-record detail fetch.
///
/// `Basic` carries the record exactly as the profile row gave it, used when
/// the detail page could not be retrieved within the retry budget. Both
/// variants go through the same parser downstream.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Record upgraded with detail-page fields (author list, abstract, venue)
    Full(RawRecord),
    /// Summary fields only; detail retrieval failed
    Basic(RawRecord),
}

impl FetchOutcome {
    /// The raw record regardless of fill outcome
    pub fn record(&self) -> &RawRecord {
        match self {
            FetchOutcome::Full(r) | FetchOutcome::Basic(r) => r,
        }
    }

    /// True when detail retrieval failed and only summary fields are present
    pub fn is_basic(&self) -> bool {
        matches!(self, FetchOutcome::Basic(_))
    }
}

/// Fetch configuration for the Scholar client
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Proxy URL (e.g., "http://127.0.0.1:7890")
    pub proxy: Option<String>,
    /// Custom base URL for mirror sites
    pub base_url: Option<String>,
}

/// HTTP client for the Scholar profile and citation-detail pages
pub struct ScholarClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScholarClient {
    /// Create a new client with optional proxy and mirror base URL
    pub fn new(options: &FetchOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .cookie_store(true);

        if let Some(proxy_url) = options.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                SyncError::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = options
            .base_url
            .as_ref()
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SCHOLAR_URL.to_string());

        Ok(Self { client, base_url })
    }

    /// Fetch the author profile and all publication rows.
    ///
    /// Paginates through the profile table until a short page. An
    /// unresolvable author id is fatal; so is a CAPTCHA at this level, since
    /// without the profile there is nothing to emit.
    pub async fn fetch_author(&self, scholar_id: &str) -> Result<(AuthorProfile, Vec<RawRecord>)> {
        info!(scholar_id = scholar_id, url = %self.base_url, "Fetching author profile");

        let mut profile: Option<AuthorProfile> = None;
        let mut records = Vec::new();
        let mut cstart = 0usize;

        loop {
            let url = build_profile_url(&self.base_url, scholar_id, cstart)?;
            debug!(url = %url, cstart = cstart, "Fetching profile page");

            let html = self.fetch_page(&url).await?;

            if profile.is_none() {
                profile = Some(parse_profile(&html, scholar_id)?);
            }

            let page_records = parse_publication_rows(&html)?;
            let count = page_records.len();
            debug!(cstart = cstart, count = count, "Parsed publication rows");
            records.extend(page_records);

            if count < PAGE_SIZE {
                break;
            }
            cstart += PAGE_SIZE;

            jitter_delay().await;
        }

        let profile = profile.ok_or_else(|| SyncError::AuthorNotFound(scholar_id.to_string()))?;
        info!(
            author = %profile.name,
            publications = records.len(),
            cited_by = profile.cited_by,
            "Profile fetched"
        );

        Ok((profile, records))
    }

    /// Upgrade a profile row with its citation-detail page.
    ///
    /// Retries a fixed number of times, then degrades to the basic record
    /// instead of erroring so one bad record cannot abort the batch.
    pub async fn fill_record(&self, scholar_id: &str, record: RawRecord) -> FetchOutcome {
        let pub_id = match record.author_pub_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                debug!("Record has no publication id, keeping basic info");
                return FetchOutcome::Basic(record);
            }
        };

        let url = match build_detail_url(&self.base_url, scholar_id, &pub_id) {
            Ok(url) => url,
            Err(e) => {
                warn!(pub_id = %pub_id, error = %e, "Could not build detail URL");
                return FetchOutcome::Basic(record);
            }
        };

        for attempt in 1..=FILL_ATTEMPTS {
            jitter_delay().await;

            match self.fetch_page(&url).await {
                Ok(html) => match parse_citation_detail(&html, &record) {
                    Ok(filled) => return FetchOutcome::Full(filled),
                    Err(e) => {
                        warn!(pub_id = %pub_id, attempt = attempt, error = %e, "Detail parse failed");
                    }
                },
                Err(e) => {
                    warn!(pub_id = %pub_id, attempt = attempt, error = %e, "Detail fetch failed");
                }
            }
        }

        debug!(pub_id = %pub_id, "Falling back to basic info");
        FetchOutcome::Basic(record)
    }

    /// Fetch page content, mapping rate limits and CAPTCHA to errors
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SyncError::RateLimited(60));
        }

        if !status.is_success() {
            return Err(SyncError::Api {
                code: status.as_u16() as i32,
                message: format!("HTTP error: {}", status),
            });
        }

        let html = response.text().await.map_err(SyncError::Network)?;

        if html.contains("Solving the above CAPTCHA") || html.contains("unusual traffic") {
            return Err(SyncError::Captcha);
        }

        Ok(html)
    }
}

/// Random delay between requests
async fn jitter_delay() {
    let delay = rand::random::<u64>() % 1500 + 500;
    tokio::time::sleep(Duration::from_millis(delay)).await;
}

/// Build the paginated author profile URL
fn build_profile_url(base_url: &str, scholar_id: &str, cstart: usize) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/citations", base_url))
        .map_err(|e| SyncError::Config(format!("Invalid base URL: {}", e)))?;

    {
        let mut params = url.query_pairs_mut();
        params.append_pair("user", scholar_id);
        params.append_pair("hl", "en");
        params.append_pair("cstart", &cstart.to_string());
        params.append_pair("pagesize", &PAGE_SIZE.to_string());
        params.append_pair("sortby", "pubdate");
    }

    Ok(url)
}

/// Build the citation-detail URL for one publication
fn build_detail_url(base_url: &str, scholar_id: &str, pub_id: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/citations", base_url))
        .map_err(|e| SyncError::Config(format!("Invalid base URL: {}", e)))?;

    {
        let mut params = url.query_pairs_mut();
        params.append_pair("view_op", "view_citation");
        params.append_pair("hl", "en");
        params.append_pair("user", scholar_id);
        params.append_pair("citation_for_view", pub_id);
    }

    Ok(url)
}

/// Parse the profile header and stats table.
///
/// A page without the profile name markup means the author id does not
/// resolve, which aborts the run.
fn parse_profile(html: &str, scholar_id: &str) -> Result<AuthorProfile> {
    let document = Html::parse_document(html);

    let name_selector =
        Selector::parse("#gsc_prf_in").map_err(|e| SyncError::Parse(e.to_string()))?;
    let stats_selector =
        Selector::parse("td.gsc_rsb_std").map_err(|e| SyncError::Parse(e.to_string()))?;

    let name = document
        .select(&name_selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| SyncError::AuthorNotFound(scholar_id.to_string()))?;

    // Stats table cells come in (all, since-year) pairs:
    // citations, h-index, i10-index.
    let cells: Vec<i64> = document
        .select(&stats_selector)
        .map(|e| parse_count(&e.text().collect::<String>()))
        .collect();

    Ok(AuthorProfile {
        scholar_id: scholar_id.to_string(),
        name,
        cited_by: cells.first().copied().unwrap_or(0),
        h_index: cells.get(2).copied().unwrap_or(0),
        i10_index: cells.get(4).copied().unwrap_or(0),
    })
}

/// Parse a stats cell like "1,234" into a count
fn parse_count(text: &str) -> i64 {
    text.trim().replace(',', "").parse::<i64>().unwrap_or(0)
}

/// Parse the publication rows of one profile page into basic records
fn parse_publication_rows(html: &str) -> Result<Vec<RawRecord>> {
    let document = Html::parse_document(html);

    let row_selector =
        Selector::parse("tr.gsc_a_tr").map_err(|e| SyncError::Parse(e.to_string()))?;
    let title_selector =
        Selector::parse("a.gsc_a_at").map_err(|e| SyncError::Parse(e.to_string()))?;
    let gray_selector =
        Selector::parse("div.gs_gray").map_err(|e| SyncError::Parse(e.to_string()))?;
    let cite_selector =
        Selector::parse("td.gsc_a_c a").map_err(|e| SyncError::Parse(e.to_string()))?;
    let year_selector =
        Selector::parse("td.gsc_a_y span").map_err(|e| SyncError::Parse(e.to_string()))?;

    let mut records = Vec::new();

    for row in document.select(&row_selector) {
        let mut record = RawRecord::default();

        if let Some(link) = row.select(&title_selector).next() {
            let title = link.text().collect::<String>().trim().to_string();
            if !title.is_empty() {
                record.bib.title = Some(title);
            }
            if let Some(href) = link.value().attr("href") {
                record.author_pub_id = extract_citation_id(href);
            }
        }

        // First gray line is the author string, second is the venue
        let mut grays = row.select(&gray_selector);
        if let Some(authors) = grays.next() {
            let text = authors.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                record.bib.author = Some(AuthorField::One(text));
            }
        }
        if let Some(venue) = grays.next() {
            let text = venue.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                record.bib.venue = Some(text);
            }
        }

        if let Some(cite) = row.select(&cite_selector).next() {
            let text = cite.text().collect::<String>();
            record.num_citations = text.trim().parse::<i64>().ok();
        }

        if let Some(year) = row.select(&year_selector).next() {
            let text = year.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                record.bib.pub_year = Some(text);
            }
        }

        // Skip rows with neither title nor id (filler rows on short pages)
        if record.bib.title.is_some() || record.author_pub_id.is_some() {
            records.push(record);
        }
    }

    Ok(records)
}

/// Extract the `citation_for_view` id from a profile row link
fn extract_citation_id(href: &str) -> Option<String> {
    href.split("citation_for_view=")
        .nth(1)
        .map(|rest| rest.split('&').next().unwrap_or(rest).to_string())
        .filter(|id| !id.is_empty())
}

/// Parse a citation-detail page, merging its fields over the basic record.
///
/// Detail fields win over the profile row's summary values; anything the
/// detail page lacks keeps the basic value.
fn parse_citation_detail(html: &str, basic: &RawRecord) -> Result<RawRecord> {
    let document = Html::parse_document(html);

    let title_selector =
        Selector::parse("#gsc_oci_title").map_err(|e| SyncError::Parse(e.to_string()))?;
    let link_selector =
        Selector::parse("a.gsc_oci_title_link").map_err(|e| SyncError::Parse(e.to_string()))?;
    let field_row_selector =
        Selector::parse("#gsc_oci_table div.gs_scl").map_err(|e| SyncError::Parse(e.to_string()))?;
    let field_selector =
        Selector::parse("div.gsc_oci_field").map_err(|e| SyncError::Parse(e.to_string()))?;
    let value_selector =
        Selector::parse("div.gsc_oci_value").map_err(|e| SyncError::Parse(e.to_string()))?;

    let year_regex = Regex::new(r"^(\d{4})").map_err(|e| SyncError::Parse(e.to_string()))?;
    let cite_regex = Regex::new(r"Cited by\s*(\d+)").map_err(|e| SyncError::Parse(e.to_string()))?;

    let mut record = basic.clone();

    let title_elem = document
        .select(&title_selector)
        .next()
        .ok_or_parse("Citation detail page has no title block")?;
    let title = title_elem.text().collect::<String>().trim().to_string();
    if !title.is_empty() {
        record.bib.title = Some(title);
    }

    if let Some(link) = document.select(&link_selector).next() {
        if let Some(href) = link.value().attr("href") {
            record.pub_url = Some(href.to_string());
        }
    }

    for row in document.select(&field_row_selector) {
        let field = match row.select(&field_selector).next() {
            Some(f) => f.text().collect::<String>().trim().to_lowercase(),
            None => continue,
        };
        let value = match row.select(&value_selector).next() {
            Some(v) => v.text().collect::<String>().trim().to_string(),
            None => continue,
        };
        if value.is_empty() {
            continue;
        }

        match field.as_str() {
            "authors" | "inventors" => {
                let names: Vec<String> = value.split(", ").map(str::to_string).collect();
                record.bib.author = Some(AuthorField::Many(names));
            }
            "publication date" => {
                if let Some(caps) = year_regex.captures(&value) {
                    record.bib.pub_year = caps.get(1).map(|m| m.as_str().to_string());
                }
            }
            "journal" | "conference" | "book" | "book title" | "source" | "publisher"
            | "series" => {
                if record.bib.venue.is_none() || matches!(field.as_str(), "journal" | "conference" | "book") {
                    record.bib.venue = Some(value);
                }
            }
            "description" => {
                record.bib.abstract_text = Some(value);
            }
            "total citations" => {
                if let Some(caps) = cite_regex.captures(&value) {
                    record.num_citations = caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok());
                }
            }
            _ => {}
        }
    }

    Ok(record)
}
