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


use std::path::PathBuf;

use crate::config::Overrides;
use crate::config::Settings;
use crate::disposition::DispositionForm;
use crate::disposition::Webhook;
use crate::error::Fallible;
use crate::library::Library;
use crate::types::timestamp::Timestamp;

/// Log a single loss from the command line. The request is awaited, so
/// delivery failures are reported.
pub async fn log_loss(
    directory: Option<String>,
    form: DispositionForm,
    webhook_url: Option<String>,
) -> Fallible<()> {
    let directory = directory.map(PathBuf::from);
    let library = Library::load(directory.clone())?;
    let overrides = Overrides {
        webhook_url,
        ..Overrides::default()
    };
    let settings = Settings::load(directory.as_deref(), overrides)?;
    let entry = form.validate(&library.dispositions, Timestamp::now())?;
    let webhook = Webhook::new(settings.webhook_url);
    webhook.send(&entry).await?;
    if webhook.is_configured() {
        println!("Logged: {}", entry.disposition);
    } else {
        println!("Logged: {} (not sent, no webhook configured)", entry.disposition);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(agent_name: &str, agent_id: &str, disposition: &str) -> DispositionForm {
        DispositionForm {
            agent_name: agent_name.to_string(),
            agent_id: agent_id.to_string(),
            disposition: disposition.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_field() {
        let result = log_loss(None, form("", "42", "Callback"), None).await;
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: missing field: agent name"
        );
    }

    #[tokio::test]
    async fn test_unknown_disposition() {
        let result = log_loss(None, form("Jane", "42", "Weather"), None).await;
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: unknown key: Weather"
        );
    }

    #[tokio::test]
    async fn test_without_webhook() {
        let result = log_loss(None, form("Jane", "42", "Callback"), None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_webhook() {
        let port = portpicker::pick_unused_port().unwrap();
        let url = format!("http://127.0.0.1:{port}/exec");
        let result = log_loss(None, form("Jane", "42", "Callback"), Some(url)).await;
        assert!(result.is_err());
    }
}
