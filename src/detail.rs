use scraper::{Html, Selector};
use sha2::{Digest as _, Sha256};
use url::Url;

const REF_SELECTOR: &str = "div.property-meta-item span";
const TITLE_SELECTOR: &str = "h2.property-title";
const PRICE_SELECTOR: &str = "span.property-price";
const STATUS_SELECTOR: &str = "div.property-labels span.label-status";

const REF_MARKER: &str = "REF NO:";

/// Sentinel values stored when a field is missing from the detail page.
/// These are persisted and fingerprinted, so they must stay byte-for-byte
/// stable across releases.
pub mod defaults {
    pub const LIST_ID: &str = "N/A";
    pub const TITLE: &str = "No Title";
    pub const PRICE: &str = "No Price";
    pub const STATUS: &str = "N/A";
}

/// One project as observed on its detail page. `price` stays raw display
/// text. `fingerprint` digests `title + price + status` and is only ever
/// compared against the previously stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub list_id: String,
    pub title: String,
    pub price: String,
    pub status: String,
    pub url: String,
    pub fingerprint: String,
}

/// Parse one detail page. Each field is an independent optional extraction
/// with its own sentinel default; a page where none of the property selectors
/// match at all is treated as malformed and surfaces as an error for the
/// caller to log and skip.
pub fn extract_detail(html: &str, url: &Url) -> anyhow::Result<ProjectRecord> {
    let doc = Html::parse_document(html);

    let ref_text = first_text(&doc, REF_SELECTOR)?;
    let title_text = first_text(&doc, TITLE_SELECTOR)?;
    let price_text = first_text(&doc, PRICE_SELECTOR)?;
    let status_text = first_text(&doc, STATUS_SELECTOR)?;

    if ref_text.is_none() && title_text.is_none() && price_text.is_none() && status_text.is_none()
    {
        anyhow::bail!("no property detail markup found: {url}");
    }

    let list_id = match ref_text {
        Some(text) if text.contains(REF_MARKER) => text
            .rsplit(REF_MARKER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned(),
        _ => defaults::LIST_ID.to_owned(),
    };
    let title = title_text.unwrap_or_else(|| defaults::TITLE.to_owned());
    let price = price_text.unwrap_or_else(|| defaults::PRICE.to_owned());
    let status = status_text.unwrap_or_else(|| defaults::STATUS.to_owned());

    let fingerprint = fingerprint(&title, &price, &status);

    Ok(ProjectRecord {
        list_id,
        title,
        price,
        status,
        url: url.to_string(),
        fingerprint,
    })
}

/// Digest of the mutable display fields, concatenated with no separators.
/// Never exposed outside the store, so only stability matters.
pub fn fingerprint(title: &str, price: &str, status: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(price.as_bytes());
    hasher.update(status.as_bytes());
    hex::encode(hasher.finalize())
}

fn first_text(doc: &Html, selector: &str) -> anyhow::Result<Option<String>> {
    let selector = Selector::parse(selector)
        .map_err(|err| anyhow::anyhow!("invalid selector {selector:?}: {err}"))?;

    Ok(doc
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://norac.co.ke/projects/riverside").unwrap()
    }

    fn full_page() -> &'static str {
        r#"
        <html><body>
          <div class="property-meta-item"><span>REF NO: L1</span></div>
          <h2 class="property-title">Riverside</h2>
          <span class="property-price">KES 5M</span>
          <div class="property-labels"><span class="label-status">Available</span></div>
        </body></html>
        "#
    }

    #[test]
    fn extracts_all_fields() -> anyhow::Result<()> {
        let record = extract_detail(full_page(), &page_url())?;
        assert_eq!(record.list_id, "L1");
        assert_eq!(record.title, "Riverside");
        assert_eq!(record.price, "KES 5M");
        assert_eq!(record.status, "Available");
        assert_eq!(record.url, "https://norac.co.ke/projects/riverside");
        Ok(())
    }

    #[test]
    fn missing_price_defaults_without_failing() -> anyhow::Result<()> {
        let html = r#"
        <html><body>
          <div class="property-meta-item"><span>REF NO: L2</span></div>
          <h2 class="property-title">Hilltop</h2>
          <div class="property-labels"><span class="label-status">Sold</span></div>
        </body></html>
        "#;
        let record = extract_detail(html, &page_url())?;
        assert_eq!(record.price, defaults::PRICE);
        assert_eq!(record.title, "Hilltop");
        Ok(())
    }

    #[test]
    fn meta_item_without_marker_falls_back_to_sentinel_id() -> anyhow::Result<()> {
        let html = r#"
        <html><body>
          <div class="property-meta-item"><span>Bedrooms: 3</span></div>
          <h2 class="property-title">Hilltop</h2>
        </body></html>
        "#;
        let record = extract_detail(html, &page_url())?;
        assert_eq!(record.list_id, defaults::LIST_ID);
        Ok(())
    }

    #[test]
    fn page_without_any_property_markup_is_an_error() {
        let html = "<html><body><p>Under construction</p></body></html>";
        assert!(extract_detail(html, &page_url()).is_err());
    }

    #[test]
    fn fingerprint_is_deterministic() {
        assert_eq!(fingerprint("A", "B", "C"), fingerprint("A", "B", "C"));
    }

    #[test]
    fn fingerprint_changes_when_any_field_changes() {
        let base = fingerprint("A", "B", "C");
        assert_ne!(base, fingerprint("X", "B", "C"));
        assert_ne!(base, fingerprint("A", "X", "C"));
        assert_ne!(base, fingerprint("A", "B", "D"));
    }

    #[test]
    fn record_fingerprint_matches_standalone_computation() -> anyhow::Result<()> {
        let record = extract_detail(full_page(), &page_url())?;
        assert_eq!(
            record.fingerprint,
            fingerprint("Riverside", "KES 5M", "Available")
        );
        Ok(())
    }
}
