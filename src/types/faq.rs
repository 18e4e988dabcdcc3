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

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FaqCategory {
    pub name: String,
    #[serde(rename = "entry", default)]
    pub entries: Vec<FaqEntry>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FaqEntry {
    /// What the customer asks.
    pub question: String,
    /// The policy facts.
    #[serde(rename = "answer")]
    pub factual_answer: String,
    /// How to say it on the phone.
    #[serde(rename = "phrasing")]
    pub suggested_phrasing: String,
}

impl FaqEntry {
    #[cfg(test)]
    pub fn new(
        question: impl Into<String>,
        factual_answer: impl Into<String>,
        suggested_phrasing: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            factual_answer: factual_answer.into(),
            suggested_phrasing: suggested_phrasing.into(),
        }
    }
}
