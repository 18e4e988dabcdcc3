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

use crate::error::SessionError;
use crate::guide::Guide;
use crate::guide::compose_guide;
use crate::guide::find_scenario;
use crate::markdown::rich_text;
use crate::types::guide::GuideScenario;
use crate::types::guide::Phrase;
use crate::web::state::Notice;
use crate::web::state::ServerState;
use crate::web::template::Tab;
use crate::web::template::page_template;

/// Checkbox names for key points carry this prefix.
const POINT_PREFIX: &str = "point:";

/// The builder is stateless: every selection lives in the query string.
pub async fn get_handler(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let scenarios = &state.library.scenarios;
    let selected = query.get("scenario").filter(|s| !s.is_empty());
    let (notice, builder) = match selected.map(|name| find_scenario(scenarios, name)) {
        None => (None, html! {}),
        Some(Ok(scenario)) => match render_builder(scenarios, scenario, &query) {
            Ok(markup) => (None, markup),
            Err(e) => {
                log::warn!("Guide builder: {e}");
                (Some(Notice::Error(e.to_string())), html! {})
            }
        },
        Some(Err(e)) => {
            log::warn!("Guide builder: {e}");
            (Some(Notice::Error(e.to_string())), html! {})
        }
    };
    let body = html! {
        div.card {
            h3 { "Build Your Guide" }
            form.scenario action="/guide" method="get" {
                label for="scenario" { "What objection are you handling?" }
                select #scenario name="scenario" {
                    option value="" { "Select a scenario..." }
                    @for scenario in scenarios {
                        @if selected == Some(&scenario.name) {
                            option value=(scenario.name) selected { (scenario.name) }
                        } @else {
                            option value=(scenario.name) { (scenario.name) }
                        }
                    }
                }
                input #choose type="submit" value="Choose";
            }
            (builder)
        }
    };
    let html = page_template(Tab::GuideBuilder, notice, body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_builder(
    scenarios: &[GuideScenario],
    scenario: &GuideScenario,
    query: &HashMap<String, String>,
) -> Result<Markup, SessionError> {
    let opening = selected_phrase(query, "opening", &scenario.openings);
    let close = selected_phrase(query, "close", &scenario.closes);
    let points: Vec<&str> = scenario
        .points
        .iter()
        .map(|point| point.name.as_str())
        .filter(|name| query.contains_key(&format!("{POINT_PREFIX}{name}")))
        .collect();
    let output = if points.is_empty() {
        html! {
            p.hint { "Select at least one key point to see your guide!" }
        }
    } else {
        let guide = compose_guide(scenarios, &scenario.name, opening, &points, close)?;
        render_guide(&guide)
    };
    Ok(html! {
        form.builder action="/guide" method="get" {
            input type="hidden" name="scenario" value=(scenario.name);
            h4 { "Step 1: How do you want to open?" }
            (radio_group("opening", &scenario.openings, opening))
            h4 { "Step 2: Which points do you want to hit?" }
            div.points {
                @for point in &scenario.points {
                    @let name = format!("{POINT_PREFIX}{}", point.name);
                    label.checkbox {
                        @if points.contains(&point.name.as_str()) {
                            input type="checkbox" name=(name) checked;
                        } @else {
                            input type="checkbox" name=(name);
                        }
                        (point.name)
                    }
                }
            }
            h4 { "Step 3: How do you want to close?" }
            (radio_group("close", &scenario.closes, close))
            input #build type="submit" value="Build Guide";
        }
        (output)
    })
}

/// The phrase named in the query, or the first one.
fn selected_phrase<'a>(
    query: &'a HashMap<String, String>,
    key: &str,
    phrases: &'a [Phrase],
) -> &'a str {
    match query.get(key) {
        Some(name) => name.as_str(),
        None => phrases.first().map(|p| p.name.as_str()).unwrap_or_default(),
    }
}

fn radio_group(field: &str, phrases: &[Phrase], selected: &str) -> Markup {
    html! {
        div.radio-group {
            @for phrase in phrases {
                label.radio {
                    @if phrase.name == selected {
                        input type="radio" name=(field) value=(phrase.name) checked;
                    } @else {
                        input type="radio" name=(field) value=(phrase.name);
                    }
                    (phrase.name)
                }
            }
        }
    }
}

fn render_guide(guide: &Guide) -> Markup {
    html! {
        div.guide-output {
            h3 { "Your Custom Guide" }
            div.guide-section {
                p.guide-label { "Your opening" }
                p.guide-text { "\"" (rich_text(&guide.opening)) "\"" }
            }
            div.guide-section {
                p.guide-label { "Key points to hit" }
                ul {
                    @for point in &guide.points {
                        li { (rich_text(point)) }
                    }
                }
            }
            div.guide-section {
                p.guide-label { "Your close" }
                p.guide-text { "\"" (rich_text(&guide.close)) "\"" }
            }
            details {
                summary { "Plain text" }
                textarea.plain readonly rows="10" { (guide.to_string()) }
            }
        }
    }
}
