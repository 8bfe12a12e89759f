pub mod challenge;
pub mod fallback;
pub mod images;
pub mod locator;
pub mod normalize;

use scraper::Html;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::fetch::fetch_html;

/// Title substituted when the article has content but no usable heading.
pub const DEFAULT_TITLE: &str = "未命名文章";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub image_count: usize,
    pub content_length: usize,
}

/// What the caller always gets back: a renderable title and content pair,
/// never empty, plus the image list and stats. Failures are folded into
/// fallback content instead of surfacing.
#[derive(Debug, Serialize)]
pub struct ArticleOutcome {
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub stats: ArticleStats,
}

/// Runs the full pipeline for one article URL: fetch, challenge check,
/// locate, normalize, collect images. Infallible by contract; every failure
/// path produces fallback content.
pub async fn extract_article(url: &str) -> ArticleOutcome {
    let html = match fetch_html(url).await {
        Ok(html) => html,
        Err(e) => {
            println!("Fetch failed for {}: {}", url, e);
            return fallback::error_outcome(url, &e.to_string());
        }
    };
    extract_from_html(url, &html)
}

/// Extraction on already-fetched markup. Split out so the pipeline can be
/// exercised without a network. Failures are classified, then folded into
/// the matching fallback shape.
pub fn extract_from_html(url: &str, html: &str) -> ArticleOutcome {
    match try_extract(url, html) {
        Ok(outcome) => outcome,
        Err(AppError::ChallengeDetected) => {
            println!("Verification challenge detected for {}", url);
            fallback::challenge_outcome(url)
        }
        Err(e) => {
            println!("Extraction failed for {}: {}", url, e);
            fallback::error_outcome(url, &e.to_string())
        }
    }
}

fn try_extract(url: &str, html: &str) -> Result<ArticleOutcome> {
    if challenge::is_challenge(html) {
        return Err(AppError::ChallengeDetected);
    }

    let document = Html::parse_document(html);
    let result = locator::locate(&document);

    if result.content.trim().is_empty() {
        return Err(AppError::ExtractionEmpty);
    }

    let title = if result.title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        result.title
    };

    let images = images::collect_images(&result.content);
    let stats = ArticleStats {
        image_count: images.len(),
        content_length: result.content.chars().count(),
    };
    println!(
        "Extracted \"{}\" from {} ({} chars, {} images)",
        title, url, stats.content_length, stats.image_count
    );

    Ok(ArticleOutcome {
        title,
        content: result.content,
        images,
        stats,
    })
}
