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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::deck::DeckCycler;
use crate::disposition::Webhook;
use crate::library::Library;
use crate::quiz::QuizSession;

#[derive(Clone)]
pub struct ServerState {
    pub library: Arc<Library>,
    pub webhook: Webhook,
    pub mutable: Arc<Mutex<MutableState>>,
}

/// The state of the one interactive session this server hosts.
pub struct MutableState {
    pub deck: DeckCycler,
    pub quiz: QuizSession,
    /// Set when the agent asks for the quiz results.
    pub quiz_finished: bool,
    /// Shown once, on the next page load.
    pub notice: Option<Notice>,
    /// Remembered so the loss tracker form stays filled in between calls.
    pub agent_name: String,
    pub agent_id: String,
    /// The disposition of a rejected submission, kept for the retry.
    pub disposition: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "notice success",
            Notice::Warning(_) => "notice warning",
            Notice::Error(_) => "notice error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Warning(message) | Notice::Error(message) => {
                message
            }
        }
    }
}

impl ServerState {
    pub fn new(library: Library, webhook: Webhook) -> Self {
        let mutable = MutableState {
            deck: DeckCycler::new(library.flashcards.clone()),
            quiz: QuizSession::new(library.questions.clone()),
            quiz_finished: false,
            notice: None,
            agent_name: String::new(),
            agent_id: String::new(),
            disposition: String::new(),
        };
        Self {
            library: Arc::new(library),
            webhook,
            mutable: Arc::new(Mutex::new(mutable)),
        }
    }

    /// Lock the session, recovering from a poisoned lock.
    pub fn lock(&self) -> MutexGuard<'_, MutableState> {
        self.mutable.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
