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

use crate::error::SessionError;
use crate::types::faq::FaqCategory;
use crate::types::faq::FaqEntry;

/// An FAQ entry together with the name of its category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaqHit<'a> {
    pub category: &'a str,
    pub entry: &'a FaqEntry,
}

/// Case-insensitive substring search over every entry's question, answer,
/// and phrasing. Results come back in content order. A blank query matches
/// nothing. Surrounding whitespace is part of the query.
pub fn search<'a>(faq: &'a [FaqCategory], query: &str) -> Vec<FaqHit<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();
    let mut hits = Vec::new();
    for category in faq {
        for entry in &category.entries {
            if entry_matches(entry, &query) {
                hits.push(FaqHit {
                    category: &category.name,
                    entry,
                });
            }
        }
    }
    hits
}

fn entry_matches(entry: &FaqEntry, query: &str) -> bool {
    [
        &entry.question,
        &entry.factual_answer,
        &entry.suggested_phrasing,
    ]
    .iter()
    .any(|text| text.to_lowercase().contains(query))
}

/// Every entry in a single category.
pub fn browse<'a>(
    faq: &'a [FaqCategory],
    category: &str,
) -> Result<&'a FaqCategory, SessionError> {
    faq.iter()
        .find(|c| c.name == category)
        .ok_or_else(|| SessionError::UnknownKey(category.to_string()))
}
