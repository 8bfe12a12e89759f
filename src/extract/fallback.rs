use crate::extract::normalize::escape_html;
use crate::extract::{ArticleOutcome, ArticleStats};

/// Title used when the verification interstitial blocked the fetch.
pub const CHALLENGE_TITLE: &str = "文章获取受限";

/// Title used when fetching or extraction failed for any other reason.
pub const ERROR_TITLE: &str = "文章解析失败";

/// Substitute content for a detected verification challenge. Tells the
/// operator what happened and links the original article so it can be opened
/// and copied manually.
pub fn challenge_outcome(url: &str) -> ArticleOutcome {
    let safe_url = escape_html(url);
    let content = format!(
        concat!(
            "<section>",
            "<h2>暂时无法自动获取文章</h2>",
            "<p>微信提示当前访问环境异常，需要在浏览器中完成验证后才能查看原文，自动抓取已停止。</p>",
            "<p>您仍然可以：</p>",
            "<ul>",
            "<li>点击下方链接在浏览器中打开原文，完成验证后手动复制内容</li>",
            "<li>将文章内容直接粘贴到编辑器中继续排版</li>",
            "</ul>",
            "<p>原文链接：<a href=\"{url}\" target=\"_blank\">{url}</a></p>",
            "</section>",
        ),
        url = safe_url,
    );
    outcome(CHALLENGE_TITLE, content)
}

/// Substitute content for a failed fetch or extraction, embedding the
/// failure reason as visible diagnostic text.
pub fn error_outcome(url: &str, message: &str) -> ArticleOutcome {
    let safe_url = escape_html(url);
    let content = format!(
        concat!(
            "<section>",
            "<h2>文章解析失败</h2>",
            "<p>错误信息：{message}</p>",
            "<p>原文链接：<a href=\"{url}\" target=\"_blank\">{url}</a></p>",
            "<p>请确认链接是一篇公开的微信公众号文章（mp.weixin.qq.com）后重试；",
            "如果问题持续存在，可以在浏览器中打开原文并手动复制内容。</p>",
            "</section>",
        ),
        message = escape_html(message),
        url = safe_url,
    );
    outcome(ERROR_TITLE, content)
}

fn outcome(title: &str, content: String) -> ArticleOutcome {
    let stats = ArticleStats {
        image_count: 0,
        content_length: content.chars().count(),
    };
    ArticleOutcome {
        title: title.to_string(),
        content,
        images: Vec::new(),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://mp.weixin.qq.com/s/abc123";

    #[test]
    fn challenge_outcome_links_original_url() {
        let outcome = challenge_outcome(URL);
        assert_eq!(outcome.title, CHALLENGE_TITLE);
        assert!(outcome.content.contains(&format!("href=\"{}\"", URL)));
        assert!(outcome.content.contains("完成验证"));
        assert_eq!(outcome.stats.image_count, 0);
    }

    #[test]
    fn error_outcome_embeds_message_and_url() {
        let outcome = error_outcome(URL, "Request timed out: deadline elapsed");
        assert_eq!(outcome.title, ERROR_TITLE);
        assert!(outcome.content.contains("Request timed out: deadline elapsed"));
        assert!(outcome.content.contains(URL));
    }

    #[test]
    fn error_message_is_escaped() {
        let outcome = error_outcome(URL, "<script>alert(1)</script>");
        assert!(!outcome.content.contains("<script>"));
        assert!(outcome.content.contains("&lt;script&gt;"));
    }

    #[test]
    fn fallback_shapes_are_distinct() {
        let challenge = challenge_outcome(URL);
        let error = error_outcome(URL, "boom");
        assert_ne!(challenge.title, error.title);
        assert_ne!(challenge.content, error.content);
    }
}
