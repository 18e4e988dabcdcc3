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

use crate::error::SessionError;
use crate::markdown::rich_text;
use crate::quiz::QuizSession;
use crate::quiz::Summary;
use crate::web::state::MutableState;
use crate::web::state::Notice;
use crate::web::state::ServerState;
use crate::web::template::Tab;
use crate::web::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.lock();
    let notice = mutable.notice.take();
    // The results page needs both the agent's request and a complete history.
    let summary = if mutable.quiz_finished {
        mutable.quiz.summary().ok()
    } else {
        None
    };
    let body = match summary {
        Some(summary) => render_summary(&mutable.quiz, summary),
        None => render_question(&mutable.quiz),
    };
    let html = page_template(Tab::Quiz, notice, body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_question(quiz: &QuizSession) -> Markup {
    let Some(question) = quiz.current() else {
        return html! {
            div.card {
                p { "There are no quiz questions." }
            }
        };
    };
    let counter = format!("Question {} of {}", quiz.position() + 1, quiz.total());
    let score = format!("Score: {} / {}", quiz.score(), quiz.history().len());
    let choices = html! {
        form.choices action="/quiz" method="post" {
            input type="hidden" name="action" value="Answer";
            @for (letter, text) in question.choices() {
                @let class = if !quiz.answered() {
                    "choice"
                } else if *letter == question.correct() {
                    "choice correct"
                } else if Some(*letter) == quiz.selected() {
                    "choice incorrect"
                } else {
                    "choice"
                };
                @if quiz.answered() {
                    button class=(class) type="submit" name="choice" value=(letter.as_str())
                        disabled {
                        span.letter { (letter.as_str()) }
                        (rich_text(text))
                    }
                } @else {
                    button class=(class) type="submit" name="choice" value=(letter.as_str()) {
                        span.letter { (letter.as_str()) }
                        (rich_text(text))
                    }
                }
            }
        }
    };
    let feedback = match quiz.history().last() {
        Some(entry) if quiz.answered() => html! {
            div.card.feedback {
                @if entry.was_correct {
                    p.verdict.correct { "Correct!" }
                } @else {
                    p.verdict.incorrect {
                        "Not quite. The answer is " (entry.correct.as_str()) "."
                    }
                }
                p.explanation { (rich_text(question.explanation())) }
            }
        },
        _ => html! {},
    };
    html! {
        div.quiz {
            div.quiz-header {
                span.counter { (counter) }
                span.score { (score) }
            }
            div.card {
                span.category-badge { (question.category()) }
                p.scenario { (rich_text(question.scenario_text())) }
                (choices)
            }
            (feedback)
            div.controls {
                form action="/quiz" method="post" {
                    @if quiz.answered() {
                        @if quiz.is_last_question() {
                            input #finish type="submit" name="action" value="Finish";
                        } @else {
                            input #next type="submit" name="action" value="Next";
                        }
                    }
                    input #reset type="submit" name="action" value="Reset";
                }
            }
        }
    }
}

fn render_summary(quiz: &QuizSession, summary: Summary) -> Markup {
    let score = format!("{} / {} ({}%)", summary.score, summary.total, summary.percentage);
    html! {
        div.finished {
            h1 { "Quiz Complete" }
            div.summary {
                p.final-score { (score) }
                p.tier { (summary.tier.label()) }
            }
            h2 { "Your Answers" }
            div.stats {
                table {
                    thead {
                        tr {
                            th { "Question" }
                            th { "Yours" }
                            th { "Correct" }
                        }
                    }
                    tbody {
                        @for entry in quiz.history() {
                            @let class = if entry.was_correct { "right" } else { "wrong" };
                            tr class=(class) {
                                td.key { (entry.question_text) }
                                td.val { (entry.selected.as_str()) }
                                td.val { (entry.correct.as_str()) }
                            }
                        }
                    }
                }
            }
            div.controls {
                form action="/quiz" method="post" {
                    input #retake type="submit" name="action" value="Reset";
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
enum Action {
    Answer,
    Next,
    Finish,
    Reset,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    choice: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    let mut mutable = state.lock();
    match action_handler(&mut mutable, form) {
        Ok(()) => {}
        Err(e) => {
            log::error!("error: {e}");
            mutable.notice = Some(Notice::Error(e.to_string()));
        }
    }
    Redirect::to("/quiz")
}

fn action_handler(mutable: &mut MutableState, form: FormData) -> Result<(), SessionError> {
    match form.action {
        Action::Answer => {
            let choice = form.choice.unwrap_or_default();
            let correct = mutable.quiz.submit_answer(&choice)?;
            log::debug!("Answered {choice}: correct={correct}");
        }
        Action::Next => mutable.quiz.next_question()?,
        Action::Finish => {
            let summary = mutable.quiz.summary()?;
            log::debug!(
                "Quiz finished: {}/{} ({}%)",
                summary.score,
                summary.total,
                summary.percentage
            );
            mutable.quiz_finished = true;
        }
        Action::Reset => {
            mutable.quiz.reset();
            mutable.quiz_finished = false;
        }
    }
    Ok(())
}
