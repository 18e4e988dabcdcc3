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


use std::collections::HashMap;

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;

use crate::guide::detect_services;
use crate::guide::find_service;
use crate::markdown::rich_text;
use crate::types::attach::AttachService;
use crate::web::state::Notice;
use crate::web::state::ServerState;
use crate::web::template::Tab;
use crate::web::template::page_template;

pub async fn get_handler(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let services = &state.library.services;
    let heard = query.get("heard").map(|s| s.as_str()).unwrap_or_default();
    let mut notice = None;
    let detail = match query.get("service").filter(|s| !s.is_empty()) {
        Some(name) => match find_service(services, name) {
            Ok(service) => Some(service),
            Err(e) => {
                log::warn!("Attach triggers: {e}");
                notice = Some(Notice::Error(e.to_string()));
                None
            }
        },
        None => None,
    };
    let listener = html! {
        div.card {
            h3 { "What did the customer say?" }
            form.listen action="/attach" method="get" {
                input #heard type="text" name="heard" value=(heard)
                    placeholder="My leaves are piling up...";
                input #listen type="submit" value="Check";
            }
            @if !heard.trim().is_empty() {
                (render_matches(&detect_services(services, heard)))
            }
        }
    };
    let body = html! {
        (listener)
        @match detail {
            Some(service) => { (render_service(service)) }
            None => { (render_index(services)) }
        }
    };
    let html = page_template(Tab::AttachTriggers, notice, body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_matches(matches: &[&AttachService]) -> Markup {
    html! {
        @if matches.is_empty() {
            p.hint { "No attach triggers in that. Keep listening!" }
        } @else {
            @for service in matches {
                div.card.pitch {
                    span.category-badge { (service.name) }
                    p.approach-label { "Pitch" }
                    p.approach-text { (rich_text(&service.pitch)) }
                    p.reason-label { "Why it helps" }
                    p.reason-text { (rich_text(&service.benefit)) }
                }
            }
        }
    }
}

fn render_service(service: &AttachService) -> Markup {
    html! {
        div.card {
            span.category-badge { (service.name) }
            p.reason-label { "Listen for" }
            ul.triggers {
                @for phrase in &service.trigger_phrases {
                    li { "\"" (phrase) "\"" }
                }
            }
            p.approach-label { "Pitch" }
            p.approach-text { (rich_text(&service.pitch)) }
            p.reason-label { "Why it helps" }
            p.reason-text { (rich_text(&service.benefit)) }
            a.back href="/attach" { "All services" }
        }
    }
}

fn render_index(services: &[AttachService]) -> Markup {
    html! {
        div.services {
            @for service in services {
                @let href = format!("/attach?service={}", urlencode(&service.name));
                div.card.service {
                    a href=(href) { h4 { (service.name) } }
                    p.hint { (service.trigger_phrases.len()) " trigger phrases" }
                }
            }
        }
    }
}

fn urlencode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
