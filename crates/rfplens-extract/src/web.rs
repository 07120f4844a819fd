//! URL content extraction
//!
//! Fetches a web page with a bounded timeout and reduces its markup to the
//! visible text: scripts, styles, and chrome elements are dropped and
//! whitespace is collapsed. Unlike PDF extraction, failures propagate; the
//! single-URL workflow has nothing to fall back on.

use crate::ExtractError;
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use tracing::{debug, info};

/// Fetch timeout. Slow government portals are common; anything beyond this
/// is treated as a failed fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like identification. Many procurement sites reject unlabeled
/// bot traffic outright.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Elements whose subtree never carries document content
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "header", "footer"];

/// Fetches web pages and reduces them to plain text.
pub struct WebExtractor {
    client: reqwest::Client,
}

impl WebExtractor {
    /// Create an extractor with the standard timeout and user agent
    pub fn new() -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch `url` and return its visible text.
    ///
    /// DNS and connection failures map to [`ExtractError::Unreachable`];
    /// non-2xx answers map to [`ExtractError::HttpStatus`]; everything else
    /// transport-level maps to [`ExtractError::Fetch`].
    pub async fn fetch_text(&self, url: &str) -> Result<String, ExtractError> {
        info!(%url, "fetching RFP page");

        let response = self.client.get(url).send().await.map_err(classify_fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus(status.as_u16()));
        }

        let html = response.text().await.map_err(classify_fetch)?;
        let text = html_to_text(&html);
        debug!(chars = text.len(), "reduced page to text");
        Ok(text)
    }
}

fn classify_fetch(e: reqwest::Error) -> ExtractError {
    if e.is_connect() {
        ExtractError::Unreachable(e.to_string())
    } else {
        ExtractError::Fetch(e.to_string())
    }
}

/// Reduce an HTML document to its visible text: walk the body, skip
/// non-content subtrees, collapse all whitespace runs to single spaces.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next().map(|el| el.id()));
    match body {
        Some(id) => {
            if let Some(body_ref) = document
                .tree
                .get(id)
                .and_then(ElementRef::wrap)
            {
                collect_text(body_ref, &mut raw);
            }
        }
        None => collect_text(document.root_element(), &mut raw),
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) => {
                if SKIPPED_ELEMENTS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_scripts_styles_and_chrome() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style></head>
              <body>
                <nav>Home | About</nav>
                <header>Site Header</header>
                <p>Request for Proposals: road maintenance.</p>
                <script>alert('tracking');</script>
                <footer>Copyright 2025</footer>
              </body>
            </html>"#;

        let text = html_to_text(html);
        assert!(text.contains("Request for Proposals: road maintenance."));
        assert!(!text.contains("alert"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Site Header"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("Home | About"));
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "<body><p>Due:\n\n   June \t 1</p></body>";
        assert_eq!(html_to_text(html), "Due: June 1");
    }

    #[test]
    fn test_nested_content_survives() {
        let html = "<body><div><section><p>Budget: <b>$50,000</b></p></section></div></body>";
        assert_eq!(html_to_text(html), "Budget: $50,000");
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        let extractor = WebExtractor::new().unwrap();
        // Discard port; nothing listens here
        let result = extractor.fetch_text("http://127.0.0.1:9/rfp").await;
        assert!(matches!(result, Err(ExtractError::Unreachable(_))));
    }
}
