//! # price — reference instrument quote via page scrape
//!
//! The reference price does not come from an API; it is scraped from the
//! instrument's public page (investing.com by default). The page exposes the
//! instrument name in the first `h1` and the last-traded price in a node
//! tagged `data-test="instrument-price-last"`. Layout drift is an expected
//! failure mode and surfaces as `CycleError::Parse`, never a crash.
//!
//! `fetch_price` stands on its own as a one-shot utility: the returned
//! [`PriceQuote`] carries both the parsed number and the raw display string.

use std::time::Duration;

use scraper::{Html, Selector};

use crate::error::CycleError;

/// Browser UA — the price page serves a stripped document to unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const PRICE_SELECTOR: &str = r#"[data-test="instrument-price-last"]"#;

/// One observation of the reference instrument's last-traded price.
/// `raw` keeps the display string (thousands separators and all) for the
/// outgoing message; `price` is the parsed value used in arithmetic.
#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub label: String,
    pub price: f64,
    pub raw:   String,
}

/// Where price quotes come from. Same seam as [`crate::position::PositionSource`].
pub trait PriceSource {
    async fn fetch_price(&self) -> Result<PriceQuote, CycleError>;
}

/// Strip thousands separators and parse the display string to a number.
pub fn parse_price(raw: &str) -> Result<f64, CycleError> {
    raw.replace(',', "")
        .trim()
        .parse()
        .map_err(|_| CycleError::parse("price page", format!("not a price: '{raw}'")))
}

/// Pull label and last price out of the page HTML. Pure; unit-tested
/// against canned documents.
pub fn extract_quote(html: &str) -> Result<PriceQuote, CycleError> {
    let doc = Html::parse_document(html);

    let label_sel = selector("h1")?;
    let price_sel = selector(PRICE_SELECTOR)?;

    let label = doc
        .select(&label_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CycleError::parse("price page", "instrument name node not found"))?;

    let raw = doc
        .select(&price_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CycleError::parse("price page", "price node not found"))?;

    let price = parse_price(&raw)?;

    Ok(PriceQuote { label, price, raw })
}

fn selector(css: &'static str) -> Result<Selector, CycleError> {
    Selector::parse(css).map_err(|e| CycleError::parse("price page", e))
}

/// Production source: GET the instrument page with a browser UA and scrape it.
pub struct InvestingPriceSource {
    client:  reqwest::Client,
    url:     String,
    timeout: Duration,
}

impl InvestingPriceSource {
    pub fn new(client: reqwest::Client, url: String, timeout: Duration) -> Self {
        Self { client, url, timeout }
    }
}

impl PriceSource for InvestingPriceSource {
    async fn fetch_price(&self) -> Result<PriceQuote, CycleError> {
        let resp = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CycleError::fetch("price page", e))?;

        if !resp.status().is_success() {
            return Err(CycleError::fetch("price page", format!("HTTP {}", resp.status())));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| CycleError::fetch("price page", e))?;

        extract_quote(&html)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_page(name: &str, price: &str) -> String {
        format!(
            r#"<html><body>
                 <h1 class="mb-2.5 text-left">{name}</h1>
                 <div data-test="instrument-price-last" class="text-5xl/9">{price}</div>
               </body></html>"#
        )
    }

    #[test]
    fn test_parse_price_with_thousands_separator() {
        assert_eq!(parse_price("20,000.50").unwrap(), 20000.50);
    }

    #[test]
    fn test_parse_price_plain() {
        assert_eq!(parse_price("987.5").unwrap(), 987.5);
    }

    #[test]
    fn test_parse_price_garbage_is_parse_error() {
        let err = parse_price("N/A").unwrap_err();
        assert!(matches!(err, CycleError::Parse { origin: "price page", .. }));
    }

    #[test]
    fn test_extract_quote_from_page() {
        let quote = extract_quote(&make_page("Nasdaq 100 (NDX)", "20,050.00")).unwrap();
        assert_eq!(quote.label, "Nasdaq 100 (NDX)");
        assert_eq!(quote.raw, "20,050.00");
        assert_eq!(quote.price, 20050.00);
    }

    #[test]
    fn test_missing_price_node_is_parse_error() {
        let html = "<html><body><h1>Nasdaq 100 (NDX)</h1></body></html>";
        let err = extract_quote(html).unwrap_err();
        assert!(matches!(err, CycleError::Parse { .. }));
    }

    #[test]
    fn test_missing_name_node_is_parse_error() {
        let html =
            r#"<html><body><div data-test="instrument-price-last">1.0</div></body></html>"#;
        let err = extract_quote(html).unwrap_err();
        assert!(matches!(err, CycleError::Parse { .. }));
    }
}
