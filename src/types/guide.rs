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

use serde::Deserialize;

/// A named, canned line of script.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Phrase {
    pub name: String,
    pub text: String,
}

impl Phrase {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// The menus for one objection scenario in the guide builder. The phrase
/// lists keep the order they were written in.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GuideScenario {
    pub name: String,
    #[serde(rename = "opening")]
    pub openings: Vec<Phrase>,
    #[serde(rename = "point")]
    pub points: Vec<Phrase>,
    #[serde(rename = "close")]
    pub closes: Vec<Phrase>,
}

/// Find a phrase by name.
pub fn find_phrase<'a>(phrases: &'a [Phrase], name: &str) -> Option<&'a Phrase> {
    phrases.iter().find(|phrase| phrase.name == name)
}
