// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use reqwest::Client;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::SessionError;
use crate::types::timestamp::Timestamp;

/// The first entry of the disposition menu. Never a valid disposition.
pub const PLACEHOLDER: &str = "Select disposition...";

/// Everything except the RFC 3986 unreserved characters gets encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The loss tracker form, as submitted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DispositionForm {
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub disposition: String,
}

/// A validated loss, ready to send to the spreadsheet.
#[derive(Clone, Debug, PartialEq)]
pub struct DispositionLog {
    pub agent_name: String,
    pub agent_id: String,
    pub disposition: String,
    pub timestamp: Timestamp,
}

impl DispositionForm {
    pub fn validate(
        &self,
        dispositions: &[String],
        now: Timestamp,
    ) -> Result<DispositionLog, SessionError> {
        let agent_name = self.agent_name.trim();
        if agent_name.is_empty() {
            return Err(SessionError::MissingField("agent name"));
        }
        let agent_id = self.agent_id.trim();
        if agent_id.is_empty() {
            return Err(SessionError::MissingField("agent id"));
        }
        let disposition = self.disposition.trim();
        if disposition.is_empty() || disposition == PLACEHOLDER {
            return Err(SessionError::MissingField("disposition"));
        }
        if !dispositions.iter().any(|d| d == disposition) {
            return Err(SessionError::UnknownKey(disposition.to_string()));
        }
        Ok(DispositionLog {
            agent_name: agent_name.to_string(),
            agent_id: agent_id.to_string(),
            disposition: disposition.to_string(),
            timestamp: now,
        })
    }
}

impl DispositionLog {
    pub fn query_string(&self) -> String {
        self.query_string_with(&self.timestamp.webhook_format())
    }

    fn query_string_with(&self, timestamp: &str) -> String {
        let params = [
            ("agentName", self.agent_name.as_str()),
            ("agentId", self.agent_id.as_str()),
            ("disposition", self.disposition.as_str()),
            ("timestamp", timestamp),
        ];
        params
            .iter()
            .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn url(&self, base: &str) -> String {
        format!("{base}?{}", self.query_string())
    }
}

/// The outbound spreadsheet hook. Without a URL, logs are accepted and
/// dropped.
#[derive(Clone)]
pub struct Webhook {
    client: Client,
    url: Option<String>,
}

impl Webhook {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Send the log, waiting for the request to go out. The response body
    /// is ignored.
    pub async fn send(&self, log: &DispositionLog) -> Fallible<()> {
        let Some(base) = &self.url else {
            log::warn!("No webhook configured; dropping '{}'.", log.disposition);
            return Ok(());
        };
        let url = log.url(base);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        log::debug!("Webhook responded with {}", response.status());
        Ok(())
    }

    /// Send the log in the background. Returns whether a request was
    /// dispatched. Failures are logged and otherwise lost.
    pub fn dispatch(&self, log: DispositionLog) -> bool {
        if !self.is_configured() {
            log::warn!("No webhook configured; dropping '{}'.", log.disposition);
            return false;
        }
        let webhook = self.clone();
        tokio::spawn(async move {
            if let Err(e) = webhook.send(&log).await {
                log::warn!("Failed to send disposition: {e}");
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::Mutex;

    use axum::Router;
    use axum::extract::Query;
    use axum::extract::State;
    use axum::routing::get;
    use chrono::TimeZone;
    use chrono::Utc;
    use tokio::net::TcpListener;

    use super::*;

    fn dispositions() -> Vec<String> {
        vec!["Price".to_string(), "Out Of Area".to_string()]
    }

    fn form(agent_name: &str, agent_id: &str, disposition: &str) -> DispositionForm {
        DispositionForm {
            agent_name: agent_name.to_string(),
            agent_id: agent_id.to_string(),
            disposition: disposition.to_string(),
        }
    }

    fn timestamp() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 14, 14, 5, 9).unwrap())
    }

    #[test]
    fn test_validate() {
        let log = form(" Jane Doe ", "123", "Price")
            .validate(&dispositions(), timestamp())
            .unwrap();
        assert_eq!(log.agent_name, "Jane Doe");
        assert_eq!(log.agent_id, "123");
        assert_eq!(log.disposition, "Price");
    }

    #[test]
    fn test_validate_missing_agent_name() {
        let result = form("", "123", "Price").validate(&dispositions(), timestamp());
        assert_eq!(result, Err(SessionError::MissingField("agent name")));
        let result = form("   ", "123", "Price").validate(&dispositions(), timestamp());
        assert_eq!(result, Err(SessionError::MissingField("agent name")));
    }

    #[test]
    fn test_validate_missing_agent_id() {
        let result = form("Jane", "", "Price").validate(&dispositions(), timestamp());
        assert_eq!(result, Err(SessionError::MissingField("agent id")));
    }

    #[test]
    fn test_validate_placeholder() {
        let result = form("Jane", "123", PLACEHOLDER).validate(&dispositions(), timestamp());
        assert_eq!(result, Err(SessionError::MissingField("disposition")));
        let result = form("Jane", "123", "").validate(&dispositions(), timestamp());
        assert_eq!(result, Err(SessionError::MissingField("disposition")));
    }

    #[test]
    fn test_validate_unknown_disposition() {
        let result = form("Jane", "123", "Weather").validate(&dispositions(), timestamp());
        assert_eq!(result, Err(SessionError::UnknownKey("Weather".to_string())));
    }

    #[test]
    fn test_query_string() {
        let log = form("Jane Doe", "A&B", "Out Of Area")
            .validate(&dispositions(), timestamp())
            .unwrap();
        let ts = log.timestamp.webhook_format_in(&Utc);
        assert_eq!(
            log.query_string_with(&ts),
            concat!(
                "agentName=Jane%20Doe&agentId=A%26B&disposition=Out%20Of%20Area",
                "&timestamp=03%2F14%2F2025%2C%2002%3A05%3A09%20PM"
            )
        );
    }

    #[test]
    fn test_dispatch_without_url() {
        let webhook = Webhook::new(None);
        let log = form("Jane", "123", "Price")
            .validate(&dispositions(), timestamp())
            .unwrap();
        assert!(!webhook.dispatch(log));
    }

    type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn receive(
        State(received): State<Received>,
        Query(params): Query<HashMap<String, String>>,
    ) -> &'static str {
        received.lock().unwrap().push(params);
        "ok"
    }

    #[tokio::test]
    async fn test_send() -> Fallible<()> {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/exec", get(receive))
            .with_state(received.clone());
        let port = portpicker::pick_unused_port().unwrap();
        let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
        tokio::spawn(async move { axum::serve(listener, app).await });

        let webhook = Webhook::new(Some(format!("http://127.0.0.1:{port}/exec")));
        let log = form("Jane Doe", "123", "Out Of Area")
            .validate(&dispositions(), timestamp())
            .unwrap();
        webhook.send(&log).await?;

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let params = &received[0];
        assert_eq!(params["agentName"], "Jane Doe");
        assert_eq!(params["agentId"], "123");
        assert_eq!(params["disposition"], "Out Of Area");
        assert_eq!(params["timestamp"], log.timestamp.webhook_format());
        Ok(())
    }
}
