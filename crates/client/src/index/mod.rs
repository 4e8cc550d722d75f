//! Specification index: heading-delimited chunks of the C2PA spec HTML.
//!
//! ### Chunking
//! Every `h2`/`h3`/`h4` heading opens a chunk. Its text is accumulated from
//! the following sibling nodes up to (not including) the next heading of
//! equal-or-shallower level; a deeper heading is content, not a boundary.
//! Text is whitespace-normalized and capped per chunk; headings with no
//! content are dropped.
//!
//! ### Lifecycle
//! The index is built lazily on first use and held for the process lifetime.
//! Concurrent first callers share a single in-flight build; a failed build
//! leaves the index empty so the next call retries from scratch.

use c2pa_docs_core::Error;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tokio::sync::OnceCell;

use crate::fetch::FetchClient;

/// Specification version baked into the source URL. Changing versions is a
/// rebuild, not a runtime switch.
pub const SPEC_VERSION: &str = "2.2";

/// Cap on the text carried by a single chunk.
const MAX_CHUNK_CHARS: usize = 4000;

/// Canonical URL of the single-page specification HTML.
pub fn spec_html_url() -> String {
    format!("https://c2pa.org/specifications/specifications/{SPEC_VERSION}/specs/C2PA_Specification.html")
}

/// One heading-delimited unit of the indexed specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Dotted section number parsed from the heading title when present,
    /// else the heading's anchor id, else the raw title.
    pub section: String,
    /// Heading text.
    pub title: String,
    /// Whitespace-normalized body text.
    pub text: String,
    /// Spec URL with the heading's anchor as fragment.
    pub permalink: String,
}

/// Lazily built, process-lifetime index over the specification document.
pub struct SpecIndex {
    url: String,
    chunks: OnceCell<Vec<Chunk>>,
}

impl SpecIndex {
    /// Index the official specification document.
    pub fn new() -> Self {
        Self::with_url(spec_html_url())
    }

    /// Index a specification served from a non-default URL.
    pub fn with_url(url: String) -> Self {
        Self { url, chunks: OnceCell::new() }
    }

    /// Borrow the chunk sequence, building it on first use.
    ///
    /// The fetch-and-parse sequence runs at most once; concurrent callers
    /// await the same in-flight build. A fetch failure propagates unchanged
    /// and leaves the cell empty, so the next caller rebuilds from scratch.
    pub async fn ensure(&self, fetcher: &FetchClient) -> Result<&[Chunk], Error> {
        let chunks = self
            .chunks
            .get_or_try_init(|| async {
                let html = fetcher.get(&self.url, Some("text/html")).await?;
                let chunks = chunk_headings(&html, &self.url);
                tracing::info!("indexed {} sections from {}", chunks.len(), self.url);
                Ok(chunks)
            })
            .await?;
        Ok(chunks)
    }

    /// Source document URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the index has been built.
    pub fn is_built(&self) -> bool {
        self.chunks.initialized()
    }
}

impl Default for SpecIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_level(el: &ElementRef) -> Option<u8> {
    match el.value().name() {
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        _ => None,
    }
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Accumulate sibling text after `heading`, stopping at the next heading of
/// equal-or-shallower level.
fn collect_following(heading: &ElementRef, level: u8) -> String {
    let mut parts: Vec<String> = Vec::new();

    for sibling in heading.next_siblings() {
        if let Some(el) = ElementRef::wrap(sibling) {
            if let Some(l) = heading_level(&el)
                && l <= level
            {
                break;
            }
            parts.push(element_text(&el));
        } else if let Some(text) = sibling.value().as_text() {
            parts.push(text.to_string());
        }
    }

    truncate_chars(&normalize_ws(&parts.join(" ")), MAX_CHUNK_CHARS)
}

/// Parse spec HTML into the ordered chunk sequence.
pub fn chunk_headings(html: &str, base_url: &str) -> Vec<Chunk> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h2, h3, h4").expect("invalid selector");
    let section_re = Regex::new(r"^(\d+(?:\.\d+)*)").expect("invalid regex");

    let mut chunks = Vec::new();
    for heading in document.select(&selector) {
        let level = match heading_level(&heading) {
            Some(level) => level,
            None => continue,
        };

        let text = collect_following(&heading, level);
        if text.is_empty() {
            continue;
        }

        let title = normalize_ws(&element_text(&heading));
        let anchor = heading
            .value()
            .attr("id")
            .map(str::to_string)
            .unwrap_or_else(|| title.clone());
        let section = section_re
            .find(&title)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| anchor.clone());
        let permalink = format!("{base_url}#{anchor}");

        chunks.push(Chunk { section, title, text, permalink });
    }

    chunks
}
