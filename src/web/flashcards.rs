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
use maud::Markup;
use maud::html;
use serde::Deserialize;

use crate::deck::ALL_CATEGORIES;
use crate::deck::DeckCycler;
use crate::error::SessionError;
use crate::markdown::rich_text;
use crate::web::state::Notice;
use crate::web::state::ServerState;
use crate::web::template::Tab;
use crate::web::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.lock();
    let notice = mutable.notice.take();
    let body = render_deck(&mutable.deck);
    let html = page_template(Tab::Flashcards, notice, body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_deck(deck: &DeckCycler) -> Markup {
    let progress = deck.progress();
    let progress_style = format!("width: {}%;", progress.percent());
    let mut categories = vec![ALL_CATEGORIES];
    categories.extend(deck.categories());
    let filter = html! {
        form.filter action="/flashcards" method="post" {
            label for="category" { "Filter by category:" }
            select #category name="category" {
                @for category in categories {
                    @if category == deck.filter() {
                        option value=(category) selected { (category) }
                    } @else {
                        option value=(category) { (category) }
                    }
                }
            }
            input #filter type="submit" name="action" value="Filter";
        }
    };
    let card = match deck.current() {
        Some(card) => {
            let counter = format!("{} of {}", deck.position() + 1, deck.active_len());
            html! {
                div.card {
                    span.category-badge { (card.category()) }
                    span.counter {
                        @if deck.is_visited(card.id()) {
                            "Reviewed · "
                        }
                        (counter)
                    }
                    div.surface-text { "\"" (card.surface_objection()) "\"" }
                    p.reason-label { "The real reason" }
                    p.reason-text { (rich_text(card.underlying_reason())) }
                }
                @if deck.revealed() {
                    div.card.approach {
                        p.approach-label { "Best approach" }
                        p.approach-text { (rich_text(card.recommended_response())) }
                    }
                }
            }
        }
        None => html! {
            div.card {
                p { "No cards to show." }
            }
        },
    };
    html! {
        div.deck {
            (filter)
            div.progress-bar {
                div.progress-fill style=(progress_style) {}
            }
            p.progress { (progress.to_string()) }
            (card)
            div.controls {
                form action="/flashcards" method="post" {
                    input #flip type="submit" name="action" value="Flip"
                        title="Show or hide the response. Shortcut: space.";
                    input #next type="submit" name="action" value="Next"
                        title="Next card. Shortcut: n.";
                    input #reset type="submit" name="action" value="Reset"
                        title="Clear review progress.";
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
enum Action {
    Flip,
    Next,
    Reset,
    Filter,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    category: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    let mut mutable = state.lock();
    match action_handler(&mut mutable.deck, form) {
        Ok(()) => {}
        Err(e) => {
            log::error!("error: {e}");
            mutable.notice = Some(Notice::Error(e.to_string()));
        }
    }
    Redirect::to("/flashcards")
}

fn action_handler(deck: &mut DeckCycler, form: FormData) -> Result<(), SessionError> {
    match form.action {
        Action::Flip => deck.flip(),
        Action::Next => deck.advance()?,
        Action::Reset => deck.reset(),
        Action::Filter => {
            let category = form.category.as_deref().unwrap_or(ALL_CATEGORIES);
            deck.set_category_filter(category)?;
        }
    }
    Ok(())
}
