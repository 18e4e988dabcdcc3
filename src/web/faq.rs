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

use crate::faq::FaqHit;
use crate::faq::browse;
use crate::faq::search;
use crate::markdown::rich_text;
use crate::types::faq::FaqCategory;
use crate::types::faq::FaqEntry;
use crate::web::state::Notice;
use crate::web::state::ServerState;
use crate::web::template::Tab;
use crate::web::template::page_template;

/// A non-blank `q` searches every category. Otherwise `category` (or the
/// first one) is browsed.
pub async fn get_handler(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let faq = &state.library.faq;
    let q = query.get("q").map(|s| s.as_str()).unwrap_or_default();
    let mut notice = None;
    let (selected, results) = if !q.trim().is_empty() {
        (None, render_hits(q, &search(faq, q)))
    } else {
        let name = match query.get("category").filter(|s| !s.is_empty()) {
            Some(name) => Some(name.as_str()),
            None => faq.first().map(|c| c.name.as_str()),
        };
        match name.map(|name| browse(faq, name)) {
            Some(Ok(category)) => (Some(category.name.as_str()), render_category(category)),
            Some(Err(e)) => {
                log::warn!("FAQ: {e}");
                notice = Some(Notice::Error(e.to_string()));
                (None, html! {})
            }
            None => (None, html! { p.hint { "There are no FAQ entries." } }),
        }
    };
    let body = html! {
        div.card {
            form.search action="/faq" method="get" {
                input #q type="search" name="q" value=(q) placeholder="Search the FAQ...";
                input #search type="submit" value="Search";
            }
            (render_categories(faq, selected))
        }
        (results)
    };
    let html = page_template(Tab::Faq, notice, body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_categories(faq: &[FaqCategory], selected: Option<&str>) -> Markup {
    html! {
        form.categories action="/faq" method="get" {
            @for category in faq {
                @if selected == Some(category.name.as_str()) {
                    button.category.active type="submit" name="category" value=(category.name) {
                        (category.name)
                    }
                } @else {
                    button.category type="submit" name="category" value=(category.name) {
                        (category.name)
                    }
                }
            }
        }
    }
}

fn render_hits(q: &str, hits: &[FaqHit<'_>]) -> Markup {
    let count = match hits.len() {
        1 => format!("1 result for \"{q}\""),
        n => format!("{n} results for \"{q}\""),
    };
    html! {
        p.result-count { (count) }
        @for hit in hits {
            (render_entry(Some(hit.category), hit.entry))
        }
    }
}

fn render_category(category: &FaqCategory) -> Markup {
    html! {
        @for entry in &category.entries {
            (render_entry(None, entry))
        }
    }
}

fn render_entry(category: Option<&str>, entry: &FaqEntry) -> Markup {
    html! {
        div.card.faq-entry {
            @if let Some(category) = category {
                span.category-badge { (category) }
            }
            h4.question { (entry.question) }
            p.reason-label { "The facts" }
            p.answer { (rich_text(&entry.factual_answer)) }
            p.approach-label { "How to say it" }
            p.phrasing { (rich_text(&entry.suggested_phrasing)) }
        }
    }
}
