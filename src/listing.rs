use scraper::{Html, Selector};
use url::Url;

const PROJECT_CARD_SELECTOR: &str = "a.project-card-link";

/// Pull detail-page urls out of the listing index. Only site-relative hrefs
/// (leading `/`) are kept and resolved against the base url; anything else is
/// dropped. Document order is preserved and duplicates are not collapsed.
pub fn extract_listings(base_url: &Url, html: &str) -> Vec<Url> {
    let doc = Html::parse_document(html);
    let Ok(selector) = Selector::parse(PROJECT_CARD_SELECTOR) else {
        return Vec::new();
    };

    let mut listings = Vec::new();
    for anchor in doc.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.starts_with('/') {
            continue;
        }
        match base_url.join(href) {
            Ok(url) => listings.push(url),
            Err(err) => tracing::debug!(href, ?err, "skipping unresolvable href"),
        }
    }

    listings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://norac.co.ke").unwrap()
    }

    #[test]
    fn keeps_relative_links_and_drops_absolute_ones() {
        let html = r#"
            <html><body>
              <a class="project-card-link" href="/projects/x">X</a>
              <a class="project-card-link" href="https://external.example/y">Y</a>
            </body></html>
        "#;
        let listings = extract_listings(&base(), html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].as_str(), "https://norac.co.ke/projects/x");
    }

    #[test]
    fn ignores_anchors_without_the_card_class() {
        let html = r#"
            <html><body>
              <a href="/projects/x">plain</a>
              <a class="nav-link" href="/about">nav</a>
            </body></html>
        "#;
        assert!(extract_listings(&base(), html).is_empty());
    }

    #[test]
    fn preserves_document_order_and_duplicates() {
        let html = r#"
            <html><body>
              <a class="project-card-link" href="/projects/b">B</a>
              <a class="project-card-link" href="/projects/a">A</a>
              <a class="project-card-link" href="/projects/b">B again</a>
            </body></html>
        "#;
        let listings = extract_listings(&base(), html);
        let paths: Vec<&str> = listings.iter().map(|u| u.path()).collect();
        assert_eq!(paths, vec!["/projects/b", "/projects/a", "/projects/b"]);
    }

    #[test]
    fn empty_document_yields_empty_sequence() {
        assert!(extract_listings(&base(), "<html><body></body></html>").is_empty());
    }
}
