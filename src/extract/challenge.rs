/// Marker phrases the WeChat verification interstitial embeds in its markup.
/// Detection is best-effort: a miss just means the locator runs and fails
/// normally.
const CHALLENGE_MARKERS: &[&str] = &[
    "当前环境异常",
    "环境异常",
    "完成验证后即可继续访问",
    "去验证",
];

/// Returns true when the raw markup looks like the anti-automation
/// interstitial rather than an article page.
pub fn is_challenge(html: &str) -> bool {
    CHALLENGE_MARKERS.iter().any(|marker| html.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_verification_page() {
        let html = "<html><body><p>当前环境异常，完成验证后即可继续访问。</p></body></html>";
        assert!(is_challenge(html));
    }

    #[test]
    fn detects_single_marker() {
        assert!(is_challenge("……环境异常……"));
    }

    #[test]
    fn passes_normal_article() {
        let html = "<html><body><div id=\"js_content\"><p>正文内容</p></div></body></html>";
        assert!(!is_challenge(html));
    }

    #[test]
    fn passes_empty_input() {
        assert!(!is_challenge(""));
    }
}
