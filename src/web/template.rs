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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::web::state::Notice;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Flashcards,
    LossTracker,
    GuideBuilder,
    AttachTriggers,
    Quiz,
    Faq,
}

const TABS: [Tab; 6] = [
    Tab::Flashcards,
    Tab::LossTracker,
    Tab::GuideBuilder,
    Tab::AttachTriggers,
    Tab::Quiz,
    Tab::Faq,
];

impl Tab {
    fn href(&self) -> &'static str {
        match self {
            Tab::Flashcards => "/flashcards",
            Tab::LossTracker => "/log",
            Tab::GuideBuilder => "/guide",
            Tab::AttachTriggers => "/attach",
            Tab::Quiz => "/quiz",
            Tab::Faq => "/faq",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Tab::Flashcards => "Flashcards",
            Tab::LossTracker => "Loss Tracker",
            Tab::GuideBuilder => "Guide Builder",
            Tab::AttachTriggers => "Attach Triggers",
            Tab::Quiz => "Quiz",
            Tab::Faq => "FAQ",
        }
    }

    fn tagline(&self) -> &'static str {
        match self {
            Tab::Flashcards => "Identify the WHY, then match the right response!",
            Tab::LossTracker => "Track dispositions. Find patterns. Coach smarter.",
            Tab::GuideBuilder => "Build your own approach: your words, your style!",
            Tab::AttachTriggers => "Listen for the cue, then pitch the add-on.",
            Tab::Quiz => "Test yourself on policies and objections.",
            Tab::Faq => "Find the facts, and the words to say them.",
        }
    }
}

pub fn page_template(tab: Tab, notice: Option<Notice>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "The Cutting Edge" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                div.main-header {
                    h1 { "The " span.highlight { "Cutting Edge" } }
                    p { (tab.tagline()) }
                }
                nav.tabs {
                    @for t in TABS {
                        @if t == tab {
                            a.tab.active href=(t.href()) { (t.label()) }
                        } @else {
                            a.tab href=(t.href()) { (t.label()) }
                        }
                    }
                }
                @if let Some(notice) = notice {
                    div class=(notice.class()) { (notice.message()) }
                }
                main {
                    (body)
                }
                script src="/script.js" {};
            }
        }
    }
}
