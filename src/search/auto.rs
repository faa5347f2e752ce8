//! Automatic keyword search
//!
//! Prompt the model with the research request, parse its answer.
//! Single round-trip per call.

use tracing::{debug, info, warn};

use crate::ai::chat::{error_sentinel, ChatClient};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::search::keywords::{parse_keywords, KeywordGroup};
use crate::search::prompt::build_prompt;

/// Keyword generation service shared by the HTTP layer and the CLI
#[derive(Debug, Clone)]
pub struct AutoSearch {
    client: ChatClient,
    model: String,
    temperature: f32,
    degrade_errors: bool,
}

impl AutoSearch {
    pub fn new(client: ChatClient, model: &str, temperature: f32) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
            degrade_errors: false,
        }
    }

    /// Build from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ChatClient::from_config(&config.upstream)?;
        Ok(Self::new(client, &config.upstream.model, config.upstream.temperature)
            .with_degraded_errors(config.upstream.degrade_errors))
    }

    /// When enabled, upstream failures are parsed as `"Error: ..."` text
    /// instead of being returned as errors. Other errors still propagate.
    pub fn with_degraded_errors(mut self, enabled: bool) -> Self {
        self.degrade_errors = enabled;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Turn a free-text research request into keyword groups
    pub async fn auto_search(&self, query: &str) -> Result<Vec<KeywordGroup>> {
        let prompt = build_prompt(query);

        info!(model = %self.model, "Requesting keywords ({} chars of query)", query.chars().count());

        let text = match self
            .client
            .complete(&prompt, &self.model, self.temperature)
            .await
        {
            Ok(text) => text,
            Err(e) if self.degrade_errors && e.is_upstream() => {
                warn!("Upstream failed, parsing error text: {}", e);
                error_sentinel(&e)
            }
            Err(e) => return Err(e),
        };

        debug!("Model answer: {:?}", text);

        let groups = parse_keywords(&text);
        info!("Parsed {} keyword groups", groups.len());
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::search::keywords::{to_query_line, Relation};
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_model(answer: &'static str) -> String {
        let app = Router::new().route(
            "/chat",
            post(move |Json(body): Json<Value>| async move {
                // The request must carry the template with the query at the end
                let prompt = body["messages"][0]["content"].as_str().unwrap_or("");
                let content = if prompt.contains("以下为我的检索要求") {
                    answer
                } else {
                    "unexpected prompt"
                };
                Json(json!({"choices": [{"message": {"content": content}}]}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/chat", addr)
    }

    fn closed_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/chat", addr)
    }

    #[tokio::test]
    async fn test_auto_search_parses_answer() {
        let url = spawn_model("(伪造|私刻) 公章 表见代理\n说明文字").await;
        let search = AutoSearch::new(ChatClient::new(&url, None).unwrap(), "m", 0.3);

        let groups = search.auto_search("伪造公章签订合同").await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].relation, Relation::Or);
        assert_eq!(groups[1].keyword1, "公章");
        assert_eq!(groups[1].keyword2, "表见代理");
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let search = AutoSearch::new(ChatClient::new(&closed_url(), None).unwrap(), "m", 0.3);
        let err = search.auto_search("q").await.unwrap_err();
        assert!(matches!(
            err,
            Error::UpstreamError { .. } | Error::UpstreamTimeout { .. }
        ));
    }

    #[tokio::test]
    async fn test_degraded_mode_parses_sentinel() {
        let search = AutoSearch::new(ChatClient::new(&closed_url(), None).unwrap(), "m", 0.3)
            .with_degraded_errors(true);
        let groups = search.auto_search("q").await.unwrap();
        assert!(!groups.is_empty());
        assert_eq!(groups[0].keyword1, "Error:");
        assert!(groups.len() <= 5);
    }

    #[tokio::test]
    async fn test_degraded_mode_covers_malformed_reply() {
        let app = Router::new().route("/chat", post(|| async { "<html>bad gateway</html>" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let client = ChatClient::new(&format!("http://{}/chat", addr), None).unwrap();

        let err = AutoSearch::new(client.clone(), "m", 0.3)
            .auto_search("q")
            .await
            .unwrap_err();
        assert!(err.is_upstream());

        let groups = AutoSearch::new(client, "m", 0.3)
            .with_degraded_errors(true)
            .auto_search("q")
            .await
            .unwrap();
        assert_eq!(
            to_query_line(&groups),
            "Error: Invalid JSON response"
        );
    }
}
