use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{MARKET, SENTIMENT};
use crate::data::yahoo::{YAHOO_SIGNATURE, yahoo_client};
use crate::errors::PipelineError;

#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self, symbol: &str) -> Result<Vec<String>, PipelineError>;

    fn signature(&self) -> &'static str;
}

/// Headline fetch for the sentiment step. Any failure becomes "no headlines",
/// which the scorer treats as neutral.
pub async fn headlines_or_empty(source: &dyn HeadlineSource, symbol: &str) -> Vec<String> {
    match source.fetch_headlines(symbol).await {
        Ok(mut headlines) => {
            headlines.truncate(SENTIMENT.max_headlines);
            headlines
        }
        Err(e) => {
            log::warn!(
                "{} headlines unavailable for {}, scoring as neutral: {}",
                source.signature(),
                symbol,
                e
            );
            Vec::new()
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    title: Option<String>,
}

/// Pulls `news[].title` out of a search body, dropping blank titles.
pub fn headlines_from_search_response(body: &str) -> Result<Vec<String>, PipelineError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| PipelineError::upstream(YAHOO_SIGNATURE, format!("bad search body: {}", e)))?;

    Ok(response
        .news
        .into_iter()
        .filter_map(|item| item.title)
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect())
}

pub struct YahooNewsSource {
    client: Client,
    base_url: String,
}

impl YahooNewsSource {
    pub fn new() -> Result<Self, PipelineError> {
        Ok(Self {
            client: yahoo_client()?,
            base_url: MARKET.yahoo.base_url.to_string(),
        })
    }
}

#[async_trait]
impl HeadlineSource for YahooNewsSource {
    fn signature(&self) -> &'static str {
        YAHOO_SIGNATURE
    }

    async fn fetch_headlines(&self, symbol: &str) -> Result<Vec<String>, PipelineError> {
        let url = format!("{}{}", self.base_url, MARKET.yahoo.search_path);
        let body = self
            .client
            .get(&url)
            .query(&[
                ("q", symbol.to_string()),
                ("newsCount", MARKET.defaults.news_count.to_string()),
                ("quotesCount", "0".to_string()),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| PipelineError::upstream(YAHOO_SIGNATURE, e))?
            .text()
            .await
            .map_err(|e| PipelineError::upstream(YAHOO_SIGNATURE, e))?;

        headlines_from_search_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(Result<Vec<String>, PipelineError>);

    #[async_trait]
    impl HeadlineSource for Canned {
        async fn fetch_headlines(&self, _symbol: &str) -> Result<Vec<String>, PipelineError> {
            self.0.clone()
        }

        fn signature(&self) -> &'static str {
            "canned"
        }
    }

    #[test]
    fn titles_are_extracted_and_blank_ones_dropped() {
        let body = r#"{
            "count": 3,
            "quotes": [],
            "news": [
                {"uuid": "a", "title": "Apple beats earnings estimates", "publisher": "Reuters"},
                {"uuid": "b", "title": "   "},
                {"uuid": "c"}
            ]
        }"#;
        assert_eq!(
            headlines_from_search_response(body).unwrap(),
            vec!["Apple beats earnings estimates".to_string()]
        );
    }

    #[test]
    fn body_without_news_is_no_headlines() {
        assert!(headlines_from_search_response(r#"{"quotes":[]}"#).unwrap().is_empty());
        assert!(headlines_from_search_response("not json").is_err());
    }

    #[tokio::test]
    async fn failure_becomes_an_empty_list() {
        let source = Canned(Err(PipelineError::upstream("canned", "timed out")));
        assert!(headlines_or_empty(&source, "AAPL").await.is_empty());
    }

    #[tokio::test]
    async fn long_lists_are_capped() {
        let many = (0..SENTIMENT.max_headlines + 5).map(|i| format!("headline {i}")).collect();
        let source = Canned(Ok(many));
        assert_eq!(headlines_or_empty(&source, "AAPL").await.len(), SENTIMENT.max_headlines);
    }
}
