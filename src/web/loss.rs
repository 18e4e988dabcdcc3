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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::Redirect;
use maud::html;

use crate::disposition::DispositionForm;
use crate::disposition::PLACEHOLDER;
use crate::error::SessionError;
use crate::types::timestamp::Timestamp;
use crate::web::state::Notice;
use crate::web::state::ServerState;
use crate::web::template::Tab;
use crate::web::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.lock();
    let notice = mutable.notice.take();
    let selected = state
        .library
        .dispositions
        .iter()
        .find(|disposition| **disposition == mutable.disposition);
    let body = html! {
        div.card {
            h3 { "Log a Loss" }
            form.loss action="/log" method="post" {
                label for="agent_name" { "Agent Name" }
                input #agent_name type="text" name="agent_name" value=(mutable.agent_name);
                label for="agent_id" { "Agent ID" }
                input #agent_id type="text" name="agent_id" value=(mutable.agent_id);
                label for="disposition" { "Disposition" }
                select #disposition name="disposition" {
                    @if selected.is_none() {
                        option value=(PLACEHOLDER) selected { (PLACEHOLDER) }
                    } @else {
                        option value=(PLACEHOLDER) { (PLACEHOLDER) }
                    }
                    @for disposition in &state.library.dispositions {
                        @if selected == Some(disposition) {
                            option value=(disposition) selected { (disposition) }
                        } @else {
                            option value=(disposition) { (disposition) }
                        }
                    }
                }
                input #send type="submit" value="Log & Send to Sheet";
            }
            @if !state.webhook.is_configured() {
                p.hint { "No webhook is configured, so logs are not sent anywhere." }
            }
        }
    };
    let html = page_template(Tab::LossTracker, notice, body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<DispositionForm>,
) -> Redirect {
    let mut mutable = state.lock();
    mutable.agent_name = form.agent_name.trim().to_string();
    mutable.agent_id = form.agent_id.trim().to_string();
    mutable.disposition = form.disposition.trim().to_string();
    let notice = match form.validate(&state.library.dispositions, Timestamp::now()) {
        Ok(entry) => {
            mutable.disposition.clear();
            let disposition = entry.disposition.clone();
            log::info!(
                "Logged '{}' for agent {} ({})",
                entry.disposition,
                entry.agent_name,
                entry.agent_id
            );
            if state.webhook.dispatch(entry) {
                Notice::Success(format!("Logged: {disposition}"))
            } else {
                Notice::Success(format!("Logged: {disposition} (not sent, no webhook configured)"))
            }
        }
        Err(SessionError::MissingField(field)) => {
            log::warn!("Rejected loss log: missing {field}");
            Notice::Warning("Please fill in all fields!".to_string())
        }
        Err(e) => {
            log::warn!("Rejected loss log: {e}");
            Notice::Warning(format!("Could not log: {e}"))
        }
    };
    mutable.notice = Some(notice);
    Redirect::to("/log")
}
