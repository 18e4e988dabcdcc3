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
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::disposition::PLACEHOLDER;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::attach::AttachService;
use crate::types::choice::ChoiceLetter;
use crate::types::faq::FaqCategory;
use crate::types::flashcard::Flashcard;
use crate::types::guide::GuideScenario;
use crate::types::guide::Phrase;
use crate::types::quiz_question::QuizQuestion;

/// A content file, with the copy compiled into the binary.
struct ContentFile {
    name: &'static str,
    default: &'static str,
}

const FLASHCARDS: ContentFile = ContentFile {
    name: "flashcards.toml",
    default: include_str!("../content/flashcards.toml"),
};

const DISPOSITIONS: ContentFile = ContentFile {
    name: "dispositions.toml",
    default: include_str!("../content/dispositions.toml"),
};

const GUIDES: ContentFile = ContentFile {
    name: "guides.toml",
    default: include_str!("../content/guides.toml"),
};

const ATTACH: ContentFile = ContentFile {
    name: "attach.toml",
    default: include_str!("../content/attach.toml"),
};

const QUIZ: ContentFile = ContentFile {
    name: "quiz.toml",
    default: include_str!("../content/quiz.toml"),
};

const FAQ: ContentFile = ContentFile {
    name: "faq.toml",
    default: include_str!("../content/faq.toml"),
};

#[derive(Deserialize)]
struct FlashcardFile {
    #[serde(rename = "flashcard", default)]
    flashcards: Vec<Flashcard>,
}

#[derive(Deserialize)]
struct DispositionFile {
    #[serde(default)]
    dispositions: Vec<String>,
}

#[derive(Deserialize)]
struct GuideFile {
    #[serde(rename = "scenario", default)]
    scenarios: Vec<GuideScenario>,
}

#[derive(Deserialize)]
struct AttachFile {
    #[serde(rename = "service", default)]
    services: Vec<AttachService>,
}

#[derive(Deserialize)]
struct QuizFile {
    #[serde(rename = "question", default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Deserialize)]
struct QuestionRecord {
    category: String,
    scenario: String,
    choices: BTreeMap<String, String>,
    correct: String,
    explanation: String,
}

#[derive(Deserialize)]
struct FaqFile {
    #[serde(rename = "category", default)]
    categories: Vec<FaqCategory>,
}

/// All of the training content, loaded once at startup and read-only after.
pub struct Library {
    /// The content directory, if one was given.
    pub directory: Option<PathBuf>,
    pub flashcards: Vec<Flashcard>,
    pub dispositions: Vec<String>,
    pub scenarios: Vec<GuideScenario>,
    pub services: Vec<AttachService>,
    pub questions: Vec<QuizQuestion>,
    pub faq: Vec<FaqCategory>,
}

impl Library {
    /// Load the content. Files in `directory` take precedence over the
    /// built-in content; missing files fall back to it.
    pub fn load(directory: Option<PathBuf>) -> Fallible<Self> {
        let directory = match directory {
            Some(directory) => {
                if !directory.exists() {
                    return fail("directory does not exist.");
                }
                Some(directory.canonicalize()?)
            }
            None => None,
        };
        let dir = directory.as_deref();

        log::debug!("Loading content...");
        let start = Instant::now();
        let flashcards: FlashcardFile = parse(dir, &FLASHCARDS)?;
        let dispositions: DispositionFile = parse(dir, &DISPOSITIONS)?;
        let guides: GuideFile = parse(dir, &GUIDES)?;
        let attach: AttachFile = parse(dir, &ATTACH)?;
        let quiz: QuizFile = parse(dir, &QUIZ)?;
        let faq: FaqFile = parse(dir, &FAQ)?;
        let questions = quiz
            .questions
            .into_iter()
            .map(into_question)
            .collect::<Fallible<Vec<_>>>()?;
        let duration = start.elapsed().as_millis();
        log::debug!("Content loaded in {duration}ms.");

        let library = Self {
            directory,
            flashcards: flashcards.flashcards,
            dispositions: dispositions.dispositions,
            scenarios: guides.scenarios,
            services: attach.services,
            questions,
            faq: faq.categories,
        };
        library.validate()?;
        Ok(library)
    }

    fn validate(&self) -> Fallible<()> {
        validate_flashcards(&self.flashcards)?;
        validate_dispositions(&self.dispositions)?;
        validate_scenarios(&self.scenarios)?;
        validate_services(&self.services)?;
        if self.questions.is_empty() {
            return fail("the quiz has no questions.");
        }
        validate_faq(&self.faq)?;
        Ok(())
    }

    pub fn faq_entry_count(&self) -> usize {
        self.faq.iter().map(|category| category.entries.len()).sum()
    }
}

fn parse<T: DeserializeOwned>(directory: Option<&Path>, file: &ContentFile) -> Fallible<T> {
    let content = match directory.map(|dir| dir.join(file.name)) {
        Some(path) if path.exists() => {
            log::debug!("Reading {}", path.display());
            read_to_string(path)?
        }
        _ => file.default.to_string(),
    };
    toml::from_str(&content).map_err(|e| ErrorReport::new(format!("{}: {e}", file.name)))
}

fn into_question(record: QuestionRecord) -> Fallible<QuizQuestion> {
    let mut choices = BTreeMap::new();
    for (key, text) in record.choices {
        let letter: ChoiceLetter = key.parse().map_err(|_| {
            ErrorReport::new(format!(
                "question '{}' has an invalid choice letter: {key}",
                record.scenario
            ))
        })?;
        choices.insert(letter, text);
    }
    let correct: ChoiceLetter = record.correct.parse().map_err(|_| {
        ErrorReport::new(format!(
            "question '{}' has an invalid correct letter: {}",
            record.scenario, record.correct
        ))
    })?;
    QuizQuestion::new(
        record.category,
        record.scenario,
        choices,
        correct,
        record.explanation,
    )
}

fn validate_flashcards(flashcards: &[Flashcard]) -> Fallible<()> {
    if flashcards.is_empty() {
        return fail("there are no flashcards.");
    }
    let mut ids = HashSet::new();
    for card in flashcards {
        if !ids.insert(card.id()) {
            return fail(format!("duplicate flashcard id: {}", card.id()));
        }
        let fields = [
            card.category(),
            card.surface_objection(),
            card.underlying_reason(),
            card.recommended_response(),
        ];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return fail(format!("flashcard {} has a blank field.", card.id()));
        }
    }
    Ok(())
}

fn validate_dispositions(dispositions: &[String]) -> Fallible<()> {
    if dispositions.is_empty() {
        return fail("there are no dispositions.");
    }
    let mut seen = HashSet::new();
    for disposition in dispositions {
        if disposition.trim().is_empty() || disposition == PLACEHOLDER {
            return fail(format!("invalid disposition: '{disposition}'"));
        }
        if !seen.insert(disposition.as_str()) {
            return fail(format!("duplicate disposition: {disposition}"));
        }
    }
    Ok(())
}

fn validate_phrases(scenario: &str, kind: &str, phrases: &[Phrase]) -> Fallible<()> {
    if phrases.is_empty() {
        return fail(format!("scenario '{scenario}' has no {kind}s."));
    }
    let mut names = HashSet::new();
    for phrase in phrases {
        if !names.insert(phrase.name.as_str()) {
            return fail(format!(
                "scenario '{scenario}' has a duplicate {kind}: {}",
                phrase.name
            ));
        }
    }
    Ok(())
}

fn validate_scenarios(scenarios: &[GuideScenario]) -> Fallible<()> {
    let mut names = HashSet::new();
    for scenario in scenarios {
        if !names.insert(scenario.name.as_str()) {
            return fail(format!("duplicate scenario: {}", scenario.name));
        }
        validate_phrases(&scenario.name, "opening", &scenario.openings)?;
        validate_phrases(&scenario.name, "point", &scenario.points)?;
        validate_phrases(&scenario.name, "close", &scenario.closes)?;
    }
    Ok(())
}

fn validate_services(services: &[AttachService]) -> Fallible<()> {
    let mut names = HashSet::new();
    for service in services {
        if !names.insert(service.name.as_str()) {
            return fail(format!("duplicate attach service: {}", service.name));
        }
        if service.trigger_phrases.is_empty() {
            return fail(format!(
                "attach service '{}' has no trigger phrases.",
                service.name
            ));
        }
    }
    Ok(())
}

fn validate_faq(faq: &[FaqCategory]) -> Fallible<()> {
    let mut names = HashSet::new();
    for category in faq {
        if !names.insert(category.name.as_str()) {
            return fail(format!("duplicate FAQ category: {}", category.name));
        }
    }
    Ok(())
}
