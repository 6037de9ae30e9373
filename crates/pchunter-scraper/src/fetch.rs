//! Page fetching with bounded navigation and content waits.
//!
//! A fetch is two phases, each with its own deadline:
//! 1. navigation: the request is sent and response headers arrive within
//!    `navigation_timeout_secs`, else [`ScraperError::NavigationTimeout`].
//! 2. content: the body is streamed until `content_wait_secs` elapses. Whatever
//!    arrived by then is returned; an empty body at the deadline is a timeout.
//!
//! There are no retries here. A failed fetch is reported once and the caller
//! decides what an empty source means.

use std::time::Duration;

use pchunter_core::AppConfig;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, USER_AGENT};
use reqwest::{Client, StatusCode};
use tokio::time::{timeout, timeout_at, Instant};

use crate::error::ScraperError;

/// Browser agents rotated per request when no agent is configured.
const BROWSER_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Pages beyond this size are truncated; listings render near the top.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub navigation_timeout_secs: u64,
    pub content_wait_secs: u64,
    /// Fixed `User-Agent`; `None` rotates among browser agents.
    pub user_agent: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            navigation_timeout_secs: 30,
            content_wait_secs: 15,
            user_agent: None,
        }
    }
}

impl FetchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            navigation_timeout_secs: config.navigation_timeout_secs,
            content_wait_secs: config.content_wait_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Shared HTML fetcher used by every source adapter.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    settings: FetchSettings,
}

impl PageFetcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(settings: FetchSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(
                CONNECT_TIMEOUT_SECS.min(settings.navigation_timeout_secs.max(1)),
            ))
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client, settings })
    }

    /// Fetches `url` as HTML, optionally sending a session cookie.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NavigationTimeout`] if headers do not arrive in time, or
    ///   no content arrives before the content wait elapses
    /// - [`ScraperError::BotChallenge`] on 403/429 or an interstitial challenge page
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status
    /// - [`ScraperError::Http`] on transport failure
    pub async fn fetch_page(&self, url: &str, cookie: Option<&str>) -> Result<String, ScraperError> {
        let navigation_secs = self.settings.navigation_timeout_secs;
        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent())
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .header(ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9,en;q=0.8");
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = timeout(Duration::from_secs(navigation_secs), request.send())
            .await
            .map_err(|_| ScraperError::NavigationTimeout {
                url: url.to_owned(),
                timeout_secs: navigation_secs,
            })??;

        let status = response.status();
        if matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) {
            return Err(ScraperError::BotChallenge {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = self.read_body(response, url).await?;
        if looks_like_bot_challenge(&body) {
            return Err(ScraperError::BotChallenge {
                url: url.to_owned(),
            });
        }
        Ok(body)
    }

    fn user_agent(&self) -> &str {
        match &self.settings.user_agent {
            Some(ua) => ua.as_str(),
            None => BROWSER_USER_AGENTS[rand::random_range(0..BROWSER_USER_AGENTS.len())],
        }
    }

    /// Streams the body until it ends or the content wait elapses.
    async fn read_body(
        &self,
        mut response: reqwest::Response,
        url: &str,
    ) -> Result<String, ScraperError> {
        let wait_secs = self.settings.content_wait_secs;
        let deadline = Instant::now() + Duration::from_secs(wait_secs);
        let mut body: Vec<u8> = Vec::new();

        loop {
            match timeout_at(deadline, response.chunk()).await {
                Ok(Ok(Some(chunk))) => {
                    body.extend_from_slice(&chunk);
                    if body.len() >= MAX_BODY_BYTES {
                        tracing::debug!(url, bytes = body.len(), "page truncated at size cap");
                        break;
                    }
                }
                Ok(Ok(None)) => break,
                Ok(Err(e)) if body.is_empty() => return Err(e.into()),
                Ok(Err(e)) => {
                    tracing::debug!(url, error = %e, bytes = body.len(), "body stream failed; using partial page");
                    break;
                }
                Err(_) if body.is_empty() => {
                    return Err(ScraperError::NavigationTimeout {
                        url: url.to_owned(),
                        timeout_secs: wait_secs,
                    });
                }
                Err(_) => {
                    tracing::debug!(url, bytes = body.len(), "content wait elapsed; using partial page");
                    break;
                }
            }
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Interstitials served with a 2xx status in place of the requested page:
/// Cloudflare challenges and the marketplace login wall.
pub(crate) fn looks_like_bot_challenge(body: &str) -> bool {
    let page = body.to_ascii_lowercase();
    let has = |marker: &str| page.contains(marker);

    let cloudflare = has("attention required! | cloudflare")
        || has("/cdn-cgi/challenge-platform/")
        || (has("just a moment...") && (has("please enable cookies") || has("cf-chl-")));

    // A login form counts only when no marketplace item made it onto the page.
    let login_wall = (has(r#"id="login_form""#) || has(r#"action="/login/"#))
        && has(r#"type="password""#)
        && !has("/marketplace/item/");

    cloudflare || login_wall
}
