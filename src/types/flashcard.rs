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

pub type FlashcardId = u32;

/// An objection flashcard: what the customer says, why they are really
/// saying it, and how to answer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Flashcard {
    id: FlashcardId,
    category: String,
    /// The objection as the customer voices it.
    #[serde(rename = "objection")]
    surface_objection: String,
    /// The motive hiding behind the objection.
    #[serde(rename = "reason")]
    underlying_reason: String,
    #[serde(rename = "response")]
    recommended_response: String,
}

impl Flashcard {
    #[cfg(test)]
    pub fn new(
        id: FlashcardId,
        category: impl Into<String>,
        surface_objection: impl Into<String>,
        underlying_reason: impl Into<String>,
        recommended_response: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            surface_objection: surface_objection.into(),
            underlying_reason: underlying_reason.into(),
            recommended_response: recommended_response.into(),
        }
    }

    pub fn id(&self) -> FlashcardId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn surface_objection(&self) -> &str {
        &self.surface_objection
    }

    pub fn underlying_reason(&self) -> &str {
        &self.underlying_reason
    }

    pub fn recommended_response(&self) -> &str {
        &self.recommended_response
    }
}
