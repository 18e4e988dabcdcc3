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


use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

use clap::ValueEnum;
use maud::DOCTYPE;
use maud::Markup;
use maud::html;
use serde::Serialize;

use crate::deck::categories;
use crate::error::Fallible;
use crate::library::Library;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// HTML output.
    Html,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Html => write!(f, "html"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_library_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let library = Library::load(directory.map(PathBuf::from))?;
    let stats = Stats::new(&library);
    match format {
        StatsFormat::Html => {
            println!("{}", stats.to_html().into_string());
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    flashcard_count: usize,
    flashcard_category_count: usize,
    disposition_count: usize,
    guide_scenario_count: usize,
    attach_service_count: usize,
    quiz_question_count: usize,
    faq_category_count: usize,
    faq_entry_count: usize,
}

impl Stats {
    pub fn new(library: &Library) -> Self {
        Self {
            flashcard_count: library.flashcards.len(),
            flashcard_category_count: categories(&library.flashcards).len(),
            disposition_count: library.dispositions.len(),
            guide_scenario_count: library.scenarios.len(),
            attach_service_count: library.services.len(),
            quiz_question_count: library.questions.len(),
            faq_category_count: library.faq.len(),
            faq_entry_count: library.faq_entry_count(),
        }
    }

    fn rows(&self) -> [(&'static str, usize); 8] {
        [
            ("Flashcards", self.flashcard_count),
            ("Flashcard categories", self.flashcard_category_count),
            ("Dispositions", self.disposition_count),
            ("Guide scenarios", self.guide_scenario_count),
            ("Attach services", self.attach_service_count),
            ("Quiz questions", self.quiz_question_count),
            ("FAQ categories", self.faq_category_count),
            ("FAQ entries", self.faq_entry_count),
        ]
    }

    fn to_html(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { "Content Stats" }
                }
                body {
                    table {
                        @for (key, value) in self.rows() {
                            tr {
                                td { (key) }
                                td { (value) }
                            }
                        }
                    }
                }
            }
        }
    }
}
