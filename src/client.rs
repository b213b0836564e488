use reqwest::{header, StatusCode};
use tracing::debug;

use crate::{config::Settings, puzzle::Puzzle};

/// A thin wrapper over `reqwest::Client` that knows the site and the session.
#[derive(Debug, Clone)]
pub struct AocClient {
    http: reqwest::Client,
    base_url: String,
    cookie: String,
}

/// Status and body of a completed request, whatever the status was.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

impl AocClient {
    pub fn new(settings: &Settings) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent())
            .timeout(settings.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url().to_string(),
            cookie: format!("session={}", settings.session()),
        })
    }

    pub fn page_url(&self, puzzle: &Puzzle) -> String {
        puzzle.page_url(&self.base_url)
    }

    pub fn input_url(&self, puzzle: &Puzzle) -> String {
        puzzle.input_url(&self.base_url)
    }

    /// One GET with the session cookie. Only transport failures are errors.
    pub async fn get(&self, url: &str) -> reqwest::Result<FetchResponse> {
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .header(header::COOKIE, self.cookie.as_str())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{url} answered {status} ({} bytes)", body.len());
        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsBuilder;

    #[test]
    fn urls_should_follow_base_url() {
        let settings = SettingsBuilder::default()
            .session("abc")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        let client = AocClient::new(&settings).unwrap();
        let puzzle = Puzzle::new(2021, 9).unwrap();
        assert_eq!(client.page_url(&puzzle), "http://localhost:8080/2021/day/9");
        assert_eq!(
            client.input_url(&puzzle),
            "http://localhost:8080/2021/day/9/input"
        );
        assert_eq!(client.cookie, "session=abc");
    }
}
