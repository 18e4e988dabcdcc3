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

use crate::error::SessionError;
use crate::types::attach::AttachService;
use crate::types::guide::GuideScenario;
use crate::types::guide::Phrase;
use crate::types::guide::find_phrase;

/// A call guide assembled from the builder menus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guide {
    pub opening: String,
    pub points: Vec<String>,
    pub close: String,
}

impl Display for Guide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Opening: \"{}\"", self.opening)?;
        writeln!(f, "Key points:")?;
        for point in &self.points {
            writeln!(f, "- {point}")?;
        }
        write!(f, "Close: \"{}\"", self.close)
    }
}

pub fn find_scenario<'a>(
    scenarios: &'a [GuideScenario],
    name: &str,
) -> Result<&'a GuideScenario, SessionError> {
    scenarios
        .iter()
        .find(|scenario| scenario.name == name)
        .ok_or_else(|| SessionError::UnknownKey(name.to_string()))
}

fn lookup<'a>(phrases: &'a [Phrase], name: &str) -> Result<&'a Phrase, SessionError> {
    find_phrase(phrases, name).ok_or_else(|| SessionError::UnknownKey(name.to_string()))
}

/// Assemble a guide. The points come out in the order the scenario lists
/// them, whatever order they were selected in.
pub fn compose_guide(
    scenarios: &[GuideScenario],
    scenario: &str,
    opening: &str,
    points: &[&str],
    close: &str,
) -> Result<Guide, SessionError> {
    let scenario = find_scenario(scenarios, scenario)?;
    let opening = lookup(&scenario.openings, opening)?;
    let close = lookup(&scenario.closes, close)?;
    for point in points {
        lookup(&scenario.points, point)?;
    }
    let points = scenario
        .points
        .iter()
        .filter(|phrase| points.contains(&phrase.name.as_str()))
        .map(|phrase| phrase.text.clone())
        .collect();
    Ok(Guide {
        opening: opening.text.clone(),
        points,
        close: close.text.clone(),
    })
}

pub fn find_service<'a>(
    services: &'a [AttachService],
    name: &str,
) -> Result<&'a AttachService, SessionError> {
    services
        .iter()
        .find(|service| service.name == name)
        .ok_or_else(|| SessionError::UnknownKey(name.to_string()))
}

/// The services with a trigger phrase that occurs in what the customer said.
pub fn detect_services<'a>(
    services: &'a [AttachService],
    utterance: &str,
) -> Vec<&'a AttachService> {
    let utterance = utterance.to_lowercase();
    if utterance.trim().is_empty() {
        return Vec::new();
    }
    services
        .iter()
        .filter(|service| {
            service
                .trigger_phrases
                .iter()
                .any(|phrase| utterance.contains(&phrase.to_lowercase()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenarios() -> Vec<GuideScenario> {
        vec![GuideScenario {
            name: "Price Concern".to_string(),
            openings: vec![
                Phrase::new("Empathetic", "I understand."),
                Phrase::new("Direct", "Here's the deal."),
            ],
            points: vec![
                Phrase::new("Insured", "Every pro is insured."),
                Phrase::new("Guarantee", "Three days to inspect."),
                Phrase::new("Support", "A whole support team."),
            ],
            closes: vec![
                Phrase::new("Soft", "Want me to hold a spot?"),
                Phrase::new("Question", "Would that feel fair?"),
            ],
        }]
    }

    fn services() -> Vec<AttachService> {
        vec![
            AttachService {
                name: "Leaf Removal".to_string(),
                trigger_phrases: vec![
                    "Leaves are piling up".to_string(),
                    "Fall cleanup".to_string(),
                ],
                pitch: "We do leaves too.".to_string(),
                benefit: "Curb appeal.".to_string(),
            },
            AttachService {
                name: "Bush Trimming".to_string(),
                trigger_phrases: vec![
                    "Curb appeal".to_string(),
                    "Getting ready to sell".to_string(),
                ],
                pitch: "We trim bushes.".to_string(),
                benefit: "Neat and clean.".to_string(),
            },
        ]
    }

    #[test]
    fn test_compose_guide() -> Result<(), SessionError> {
        let scenarios = scenarios();
        let guide = compose_guide(
            &scenarios,
            "Price Concern",
            "Direct",
            &["Support", "Insured"],
            "Question",
        )?;
        assert_eq!(guide.opening, "Here's the deal.");
        assert_eq!(
            guide.points,
            vec!["Every pro is insured.", "A whole support team."]
        );
        assert_eq!(guide.close, "Would that feel fair?");
        assert_eq!(
            guide.to_string(),
            concat!(
                "Opening: \"Here's the deal.\"\n",
                "Key points:\n",
                "- Every pro is insured.\n",
                "- A whole support team.\n",
                "Close: \"Would that feel fair?\""
            )
        );
        Ok(())
    }

    #[test]
    fn test_compose_guide_without_points() -> Result<(), SessionError> {
        let scenarios = scenarios();
        let guide = compose_guide(&scenarios, "Price Concern", "Empathetic", &[], "Soft")?;
        assert!(guide.points.is_empty());
        Ok(())
    }

    #[test]
    fn test_compose_guide_unknown_keys() {
        let scenarios = scenarios();
        assert_eq!(
            compose_guide(&scenarios, "Weather", "Direct", &[], "Soft"),
            Err(SessionError::UnknownKey("Weather".to_string()))
        );
        assert_eq!(
            compose_guide(&scenarios, "Price Concern", "Curious", &[], "Soft"),
            Err(SessionError::UnknownKey("Curious".to_string()))
        );
        assert_eq!(
            compose_guide(&scenarios, "Price Concern", "Direct", &["Speed"], "Soft"),
            Err(SessionError::UnknownKey("Speed".to_string()))
        );
        assert_eq!(
            compose_guide(&scenarios, "Price Concern", "Direct", &[], "Assumptive"),
            Err(SessionError::UnknownKey("Assumptive".to_string()))
        );
    }

    #[test]
    fn test_find_service() {
        let services = services();
        assert_eq!(find_service(&services, "Leaf Removal").unwrap().pitch, "We do leaves too.");
        assert!(find_service(&services, "Snow Plowing").is_err());
    }

    #[test]
    fn test_detect_services() {
        let services = services();
        let utterance = "honestly the leaves are piling up and we're getting ready to sell";
        let detected: Vec<&str> = detect_services(&services, utterance)
            .into_iter()
            .map(|service| service.name.as_str())
            .collect();
        assert_eq!(detected, vec!["Leaf Removal", "Bush Trimming"]);
        assert!(detect_services(&services, "the grass is tall").is_empty());
        assert!(detect_services(&services, "").is_empty());
    }
}
