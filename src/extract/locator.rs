use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::extract::normalize::{normalize, strip_noise};

/// A candidate container must keep more than this many characters of markup
/// after noise removal; anything shorter is a near-empty wrapper.
const MIN_CONTENT_LEN: usize = 100;

/// Title candidates, most specific first. Only the first document-order
/// match per selector is considered.
static TITLE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["#activity-name", "h1", "h2"]
        .iter()
        .map(|s| Selector::parse(s).expect("invalid title selector"))
        .collect()
});

/// Content container candidates, platform-specific markers before generic
/// semantic tags. Priority is data: first qualifying candidate wins.
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "#js_content",
        ".rich_media_content",
        "#content",
        ".article-content",
        "article",
        ".content",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("invalid content selector"))
    .collect()
});

static PARAGRAPH_OR_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, img").expect("invalid aggregation selector"));

/// Raw locator output. Either field may be empty; the caller treats
/// both-empty as extraction failure.
#[derive(Debug)]
pub struct ExtractionResult {
    pub title: String,
    pub content: String,
}

pub fn locate(document: &Html) -> ExtractionResult {
    ExtractionResult {
        title: locate_title(document),
        content: locate_content(document),
    }
}

fn locate_title(document: &Html) -> String {
    for selector in TITLE_SELECTORS.iter() {
        if let Some(element) = document.select(selector).next() {
            let text = element.text().collect::<String>();
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

fn locate_content(document: &Html) -> String {
    for selector in CONTENT_SELECTORS.iter() {
        for container in document.select(selector) {
            let stripped = strip_noise(&container.inner_html());
            if stripped.trim().chars().count() > MIN_CONTENT_LEN {
                return normalize(&stripped);
            }
        }
    }
    aggregate_paragraphs(document)
}

/// Last resort when no container qualifies: every paragraph and image in
/// document order, each contributing its own markup. Images inside a
/// paragraph already arrive with it, so only standalone images are added.
fn aggregate_paragraphs(document: &Html) -> String {
    let mut parts = String::new();
    for element in document.select(&PARAGRAPH_OR_IMAGE) {
        if element.value().name() == "img" && has_paragraph_ancestor(&element) {
            continue;
        }
        parts.push_str(&element.html());
    }
    if parts.trim().is_empty() {
        return String::new();
    }
    normalize(&parts)
}

fn has_paragraph_ancestor(element: &ElementRef) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|el| el.name() == "p")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    const LONG_PARAGRAPH: &str = "这是一段足够长的正文内容，用来越过最小内容长度的判断，\
         这里再补充一些文字让它远远超过一百个字符的门槛，确保这个候选容器会被接受。\
         公众号文章的正文通常远比这一段长，所以这个阈值在真实页面上几乎不会误伤，\
         它只用来过滤掉那些近乎空白的包装容器。";

    #[test]
    fn title_prefers_activity_name_over_headings() {
        let d = doc(
            r#"<html><body><h1>备用标题</h1><h2 id="activity-name">  正式标题  </h2></body></html>"#,
        );
        assert_eq!(locate(&d).title, "正式标题");
    }

    #[test]
    fn title_falls_back_to_h1_then_h2() {
        let d = doc("<html><body><h2>二级标题</h2></body></html>");
        assert_eq!(locate(&d).title, "二级标题");

        let d = doc("<html><body><h1>一级标题</h1><h2>二级标题</h2></body></html>");
        assert_eq!(locate(&d).title, "一级标题");
    }

    #[test]
    fn empty_first_heading_moves_to_next_selector() {
        let d = doc("<html><body><h1>   </h1><h2>真正的标题</h2></body></html>");
        assert_eq!(locate(&d).title, "真正的标题");
    }

    #[test]
    fn short_container_is_skipped_for_later_candidate() {
        let html = format!(
            r#"<html><body><div id="js_content">太短</div><article><p>{}</p></article></body></html>"#,
            LONG_PARAGRAPH
        );
        let content = locate(&doc(&html)).content;
        assert!(content.contains("足够长的正文"), "{}", content);
        assert!(!content.contains("太短"), "{}", content);
    }

    #[test]
    fn noise_does_not_count_toward_threshold() {
        // js_content is large only because of the script; the real text is
        // under the threshold, so the article container must win.
        let html = format!(
            concat!(
                r#"<html><body><div id="js_content">短文<script>{}</script></div>"#,
                r#"<article><p>{}</p></article></body></html>"#
            ),
            "var x = 1; ".repeat(30),
            LONG_PARAGRAPH
        );
        let content = locate(&doc(&html)).content;
        assert!(content.contains("足够长的正文"), "{}", content);
    }

    #[test]
    fn accepted_container_is_normalized() {
        let html = format!(
            r#"<html><body><div id="js_content"><p>{}</p><img data-src="https://x/a.png"></div></body></html>"#,
            LONG_PARAGRAPH
        );
        let content = locate(&doc(&html)).content;
        assert!(content.contains(r#"src="https://x/a.png""#), "{}", content);
        assert!(!content.contains("data-src"), "{}", content);
    }

    #[test]
    fn aggregates_paragraphs_when_no_container_qualifies() {
        let html = format!(
            r#"<html><body><p>{}</p><img src="https://x/b.png"></body></html>"#,
            LONG_PARAGRAPH
        );
        let content = locate(&doc(&html)).content;
        assert!(content.contains("足够长的正文"), "{}", content);
        assert!(content.contains("https://x/b.png"), "{}", content);
    }

    #[test]
    fn aggregation_emits_nested_image_once() {
        let html = format!(
            r#"<html><body><p>{}<img src="https://x/only.png"></p></body></html>"#,
            LONG_PARAGRAPH
        );
        let content = locate(&doc(&html)).content;
        assert_eq!(content.matches("https://x/only.png").count(), 1, "{}", content);
    }

    #[test]
    fn aggregation_keeps_standalone_images() {
        let html = format!(
            r#"<html><body><p>{}</p><img src="https://x/solo.png"></body></html>"#,
            LONG_PARAGRAPH
        );
        let content = locate(&doc(&html)).content;
        assert_eq!(content.matches("https://x/solo.png").count(), 1, "{}", content);
    }

    #[test]
    fn empty_document_yields_empty_result() {
        let result = locate(&doc("<html><body></body></html>"));
        assert!(result.title.is_empty());
        assert!(result.content.is_empty());
    }
}
