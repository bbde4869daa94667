//! Client for the Practicum homework-status API

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::io::HttpClient;

const PRACTICUM_API_URL: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Client for the homework-review status endpoint
pub struct PracticumClient {
    token: String,
    endpoint: String,
    http: Arc<dyn HttpClient>,
}

// The OAuth token stays out of Debug output.
impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        Self {
            token: config.practicum_token.clone(),
            endpoint: PRACTICUM_API_URL.to_string(),
            http,
        }
    }

    /// Fetch every homework whose status changed since `from_date`.
    ///
    /// The cursor is transmitted exactly as given; `0` asks for the full
    /// history. Any HTTP status other than 200 is an error, and the body is
    /// returned as parsed JSON without further checks.
    pub async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        tracing::debug!("Polling {} with from_date={}", self.endpoint, from_date);
        let auth = format!("OAuth {}", self.token);
        let from = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", auth.as_str())],
                &[("from_date", from.as_str())],
            )
            .await?;
        if response.status != 200 {
            return Err(crate::BotError::Transport {
                status: response.status,
                endpoint: self.endpoint.clone(),
                from_date,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body)
            .map_err(|e| crate::BotError::Schema(format!("response body is not valid JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{HttpResponse, MockHttpClient};

    fn test_config() -> Config {
        Config {
            practicum_token: "test-token".to_string(),
            telegram_token: "telegram-token".to_string(),
            telegram_chat_id: "12345".to_string(),
        }
    }

    #[tokio::test]
    async fn fetch_sends_auth_header_and_cursor() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .withf(|url, headers, query| {
                url == PRACTICUM_API_URL
                    && headers.contains(&("Authorization", "OAuth test-token"))
                    && query.contains(&("from_date", "1700000000"))
            })
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: r#"{"homeworks": [], "current_date": 1700000600}"#.to_string(),
                    })
                })
            });

        let client = PracticumClient::new(&test_config(), Arc::new(mock));
        let response = client.fetch(1_700_000_000).await.unwrap();
        assert_eq!(response["current_date"], 1_700_000_600);
    }

    #[tokio::test]
    async fn fetch_transmits_zero_cursor_verbatim() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .withf(|_, _, query| query.contains(&("from_date", "0")))
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: r#"{"homeworks": []}"#.to_string(),
                    })
                })
            });

        let client = PracticumClient::new(&test_config(), Arc::new(mock));
        client.fetch(0).await.unwrap();
    }

    #[tokio::test]
    async fn fetch_turns_non_200_into_transport_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().returning(|_, _, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 503,
                    body: "Service Unavailable".to_string(),
                })
            })
        });

        let client = PracticumClient::new(&test_config(), Arc::new(mock));
        let err = client.fetch(1_700_000_000).await.unwrap_err();
        match &err {
            crate::BotError::Transport { status, .. } => assert_eq!(*status, 503),
            other => panic!("expected BotError::Transport, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("503"), "{msg}");
        assert!(msg.contains(PRACTICUM_API_URL), "{msg}");
        assert!(msg.contains("from_date=1700000000"), "{msg}");
        assert!(msg.contains("Service Unavailable"), "{msg}");
    }

    #[tokio::test]
    async fn fetch_rejects_non_json_body() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().returning(|_, _, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 200,
                    body: "<html>gateway</html>".to_string(),
                })
            })
        });

        let client = PracticumClient::new(&test_config(), Arc::new(mock));
        let err = client.fetch(0).await.unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[tokio::test]
    async fn fetch_propagates_request_failures() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().returning(|_, _, _| {
            Box::pin(async { Err(crate::BotError::Http("connection refused".to_string())) })
        });

        let client = PracticumClient::new(&test_config(), Arc::new(mock));
        let err = client.fetch(0).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn debug_output_hides_token() {
        let client = PracticumClient::new(&test_config(), Arc::new(MockHttpClient::new()));
        let rendered = format!("{:?}", client);
        assert!(rendered.contains(PRACTICUM_API_URL), "{rendered}");
        assert!(!rendered.contains("test-token"), "{rendered}");
    }
}
