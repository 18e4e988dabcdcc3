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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// An application-level error: something went wrong loading content, talking
/// to the network, or running the server.
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(message))
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport::new(format!("I/O error: {value}"))
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport::new(format!("failed to parse TOML: {value}"))
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport::new(format!("JSON error: {value}"))
    }
}

impl From<reqwest::Error> for ErrorReport {
    fn from(value: reqwest::Error) -> Self {
        ErrorReport::new(format!("HTTP error: {value}"))
    }
}

impl From<SessionError> for ErrorReport {
    fn from(value: SessionError) -> Self {
        ErrorReport::new(value.to_string())
    }
}

/// A rejected user action. These never abort anything: the operation is
/// refused and the state it would have touched is left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The active flashcard list is empty.
    EmptyDeck,
    /// The category filter names no category in the deck.
    InvalidFilter(String),
    /// The current question already has an answer.
    AlreadyAnswered,
    /// The current question has not been answered yet.
    NotAnswered,
    /// The choice is not one of the current question's letters.
    InvalidChoice(String),
    /// The current question is the last one.
    NoMoreQuestions,
    /// Not every question has been answered.
    IncompleteSession,
    /// The quiz has no questions.
    EmptyQuiz,
    /// A lookup key names nothing in the content tables.
    UnknownKey(String),
    /// A required form field is blank.
    MissingField(&'static str),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::EmptyDeck => write!(f, "there are no cards to show."),
            SessionError::InvalidFilter(category) => {
                write!(f, "unknown category: {category}")
            }
            SessionError::AlreadyAnswered => write!(f, "this question was already answered."),
            SessionError::NotAnswered => write!(f, "answer the question first."),
            SessionError::InvalidChoice(choice) => write!(f, "invalid choice: {choice}"),
            SessionError::NoMoreQuestions => write!(f, "this is the last question."),
            SessionError::IncompleteSession => {
                write!(f, "the quiz is not finished yet.")
            }
            SessionError::EmptyQuiz => write!(f, "the quiz has no questions."),
            SessionError::UnknownKey(key) => write!(f, "unknown key: {key}"),
            SessionError::MissingField(field) => write!(f, "missing field: {field}"),
        }
    }
}

impl Error for SessionError {}
