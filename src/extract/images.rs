use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("invalid img selector"));

/// Every image source in the final content, in document order, duplicates
/// included. Informational only (stats and logging).
pub fn collect_images(fragment: &str) -> Vec<String> {
    let doc = Html::parse_fragment(fragment);
    doc.select(&IMG_SELECTOR)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_document_order() {
        let fragment = concat!(
            r#"<p><img src="https://x/a.png"></p>"#,
            r#"<div><img src="https://x/b.png"><img src="https://x/c.png"></div>"#,
        );
        assert_eq!(
            collect_images(fragment),
            vec!["https://x/a.png", "https://x/b.png", "https://x/c.png"]
        );
    }

    #[test]
    fn skips_missing_or_blank_sources() {
        let fragment = r#"<img><img src="   "><img src="https://x/a.png">"#;
        assert_eq!(collect_images(fragment), vec!["https://x/a.png"]);
    }

    #[test]
    fn keeps_duplicates() {
        let fragment = r#"<img src="https://x/a.png"><img src="https://x/a.png">"#;
        assert_eq!(collect_images(fragment).len(), 2);
    }

    #[test]
    fn empty_fragment_yields_empty_list() {
        assert!(collect_images("<p>没有图片</p>").is_empty());
    }
}
