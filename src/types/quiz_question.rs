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

use std::collections::BTreeMap;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::choice::ChoiceLetter;

/// A multiple-choice quiz question. Every question has exactly the four
/// choices A through D.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizQuestion {
    category: String,
    scenario_text: String,
    choices: BTreeMap<ChoiceLetter, String>,
    correct: ChoiceLetter,
    explanation: String,
}

impl QuizQuestion {
    pub fn new(
        category: impl Into<String>,
        scenario_text: impl Into<String>,
        choices: BTreeMap<ChoiceLetter, String>,
        correct: ChoiceLetter,
        explanation: impl Into<String>,
    ) -> Fallible<Self> {
        let scenario_text = scenario_text.into();
        for letter in ChoiceLetter::ALL {
            match choices.get(&letter) {
                Some(text) if !text.trim().is_empty() => {}
                _ => {
                    return fail(format!(
                        "question '{scenario_text}' has no text for choice {letter}."
                    ));
                }
            }
        }
        Ok(Self {
            category: category.into(),
            scenario_text,
            choices,
            correct,
            explanation: explanation.into(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn scenario_text(&self) -> &str {
        &self.scenario_text
    }

    pub fn choices(&self) -> &BTreeMap<ChoiceLetter, String> {
        &self.choices
    }

    pub fn has_choice(&self, letter: ChoiceLetter) -> bool {
        self.choices.contains_key(&letter)
    }

    pub fn correct(&self) -> ChoiceLetter {
        self.correct
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(letters: &[ChoiceLetter]) -> BTreeMap<ChoiceLetter, String> {
        letters
            .iter()
            .map(|letter| (*letter, format!("Option {letter}")))
            .collect()
    }

    #[test]
    fn test_new_question() -> Fallible<()> {
        let question = QuizQuestion::new(
            "Policies",
            "When is the card charged?",
            choices(&ChoiceLetter::ALL),
            ChoiceLetter::C,
            "Three days after service.",
        )?;
        assert_eq!(question.correct(), ChoiceLetter::C);
        assert!(question.has_choice(ChoiceLetter::D));
        assert_eq!(question.choices().len(), 4);
        Ok(())
    }

    #[test]
    fn test_missing_choice() {
        let result = QuizQuestion::new(
            "Policies",
            "When is the card charged?",
            choices(&[ChoiceLetter::A, ChoiceLetter::B, ChoiceLetter::C]),
            ChoiceLetter::A,
            "",
        );
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: question 'When is the card charged?' has no text for choice D."
        );
    }
}
