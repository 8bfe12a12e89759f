use reqwest::{Client, ClientBuilder, StatusCode};
use rand::Rng;
use std::time::Duration;
use once_cell::sync::Lazy;
use crate::error::{AppError, Result};

/// Desktop browser user agents for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

const REFERER: &str = "https://mp.weixin.qq.com/";

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(5))
        .redirect(reqwest::redirect::Policy::limited(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    let index = rng.gen_range(0..USER_AGENTS.len());
    USER_AGENTS[index]
}

/// Fetches the raw article page while impersonating a desktop browser.
///
/// Client errors (4xx) still return the body so the caller can inspect it;
/// server errors and transport failures are hard failures.
pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT
        .get(url)
        .header("User-Agent", random_user_agent())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        )
        .header("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8")
        .header("Referer", REFERER)
        .header("Upgrade-Insecure-Requests", "1")
        .send()
        .await?;

    let status = response.status();
    if is_hard_failure(status) {
        return Err(AppError::FetchError(format!(
            "Server returned {} for {}",
            status, url
        )));
    }
    if status.is_client_error() {
        println!("Client error status {} for {}, continuing with body", status, url);
    }

    let html = response.text().await?;
    Ok(html)
}

fn is_hard_failure(status: StatusCode) -> bool {
    status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_not_hard_failures() {
        assert!(!is_hard_failure(StatusCode::NOT_FOUND));
        assert!(!is_hard_failure(StatusCode::FORBIDDEN));
        assert!(is_hard_failure(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_hard_failure(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn user_agent_pool_is_desktop_only() {
        for ua in USER_AGENTS {
            assert!(ua.starts_with("Mozilla/5.0"));
            assert!(!ua.contains("Mobile"));
        }
    }
}
