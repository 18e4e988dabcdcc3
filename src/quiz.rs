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
use crate::types::choice::ChoiceLetter;
use crate::types::quiz_question::QuizQuestion;

/// A single pass through the quiz, each question answered at most once.
///
/// Invariants: `score` equals the number of correct history entries, and the
/// history never has more than `position + 1` entries.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    position: usize,
    score: usize,
    answered: bool,
    selected: Option<ChoiceLetter>,
    history: Vec<HistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub question_text: String,
    pub selected: ChoiceLetter,
    pub correct: ChoiceLetter,
    pub was_correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
    /// Whole percent, rounded down.
    pub percentage: usize,
    pub tier: GradeTier,
}

/// Grade tiers, ordered from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GradeTier {
    KeepPracticing,
    GettingThere,
    SolidWork,
    ObjectionPro,
}

impl GradeTier {
    pub fn from_percentage(percentage: usize) -> Self {
        if percentage >= 90 {
            GradeTier::ObjectionPro
        } else if percentage >= 75 {
            GradeTier::SolidWork
        } else if percentage >= 60 {
            GradeTier::GettingThere
        } else {
            GradeTier::KeepPracticing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradeTier::ObjectionPro => "Objection Pro",
            GradeTier::SolidWork => "Solid Work",
            GradeTier::GettingThere => "Getting There",
            GradeTier::KeepPracticing => "Keep Practicing",
        }
    }
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            position: 0,
            score: 0,
            answered: false,
            selected: None,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn selected(&self) -> Option<ChoiceLetter> {
        self.selected
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_last_question(&self) -> bool {
        self.position + 1 >= self.questions.len()
    }

    /// True once every question has an answer.
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.history.len() == self.questions.len()
    }

    /// Answer the current question. Returns whether the answer was correct.
    pub fn submit_answer(&mut self, letter: &str) -> Result<bool, SessionError> {
        let question = match self.questions.get(self.position) {
            Some(question) => question,
            None => return Err(SessionError::EmptyQuiz),
        };
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }
        let letter: ChoiceLetter = letter.parse()?;
        if !question.has_choice(letter) {
            return Err(SessionError::InvalidChoice(letter.to_string()));
        }
        let was_correct = letter == question.correct();
        let entry = HistoryEntry {
            question_text: question.scenario_text().to_string(),
            selected: letter,
            correct: question.correct(),
            was_correct,
        };
        self.answered = true;
        self.selected = Some(letter);
        if was_correct {
            self.score += 1;
        }
        self.history.push(entry);
        Ok(was_correct)
    }

    pub fn next_question(&mut self) -> Result<(), SessionError> {
        if !self.answered {
            return Err(SessionError::NotAnswered);
        }
        if self.is_last_question() {
            return Err(SessionError::NoMoreQuestions);
        }
        self.position += 1;
        self.answered = false;
        self.selected = None;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.score = 0;
        self.answered = false;
        self.selected = None;
        self.history.clear();
    }

    pub fn summary(&self) -> Result<Summary, SessionError> {
        if self.questions.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }
        if !self.is_complete() {
            return Err(SessionError::IncompleteSession);
        }
        let total = self.questions.len();
        let percentage = (self.score * 100) / total;
        Ok(Summary {
            score: self.score,
            total,
            percentage,
            tier: GradeTier::from_percentage(percentage),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn question(text: &str, correct: ChoiceLetter) -> QuizQuestion {
        let choices: BTreeMap<ChoiceLetter, String> = ChoiceLetter::ALL
            .iter()
            .map(|letter| (*letter, format!("{text} option {letter}")))
            .collect();
        QuizQuestion::new("Policies", text, choices, correct, "Because.").unwrap()
    }

    fn two_questions() -> QuizSession {
        QuizSession::new(vec![
            question("first", ChoiceLetter::B),
            question("second", ChoiceLetter::A),
        ])
    }

    fn assert_invariants(quiz: &QuizSession) {
        let correct = quiz.history().iter().filter(|e| e.was_correct).count();
        assert_eq!(quiz.score(), correct);
        assert!(quiz.history().len() <= quiz.position() + 1);
    }

    #[test]
    fn test_two_question_scenario() -> Result<(), SessionError> {
        let mut quiz = two_questions();
        assert!(quiz.submit_answer("B")?);
        assert_invariants(&quiz);
        quiz.next_question()?;
        assert_invariants(&quiz);
        assert!(!quiz.submit_answer("C")?);
        assert_invariants(&quiz);
        assert_eq!(quiz.score(), 1);
        let summary = quiz.summary()?;
        assert_eq!(summary.score, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.percentage, 50);
        assert_eq!(summary.tier, GradeTier::KeepPracticing);
        Ok(())
    }

    #[test]
    fn test_double_submit_is_rejected() -> Result<(), SessionError> {
        let mut quiz = two_questions();
        quiz.submit_answer("B")?;
        assert_eq!(quiz.submit_answer("B"), Err(SessionError::AlreadyAnswered));
        assert_eq!(quiz.submit_answer("A"), Err(SessionError::AlreadyAnswered));
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.history().len(), 1);
        assert_eq!(quiz.selected(), Some(ChoiceLetter::B));
        assert_invariants(&quiz);
        Ok(())
    }

    #[test]
    fn test_invalid_letter() {
        let mut quiz = two_questions();
        assert_eq!(
            quiz.submit_answer("Z"),
            Err(SessionError::InvalidChoice("Z".to_string()))
        );
        assert!(!quiz.answered());
        assert!(quiz.history().is_empty());
    }

    #[test]
    fn test_next_requires_answer() {
        let mut quiz = two_questions();
        assert_eq!(quiz.next_question(), Err(SessionError::NotAnswered));
        assert_eq!(quiz.position(), 0);
    }

    #[test]
    fn test_no_more_questions() -> Result<(), SessionError> {
        let mut quiz = two_questions();
        quiz.submit_answer("A")?;
        quiz.next_question()?;
        quiz.submit_answer("A")?;
        assert_eq!(quiz.next_question(), Err(SessionError::NoMoreQuestions));
        assert_eq!(quiz.position(), 1);
        assert!(quiz.answered());
        Ok(())
    }

    #[test]
    fn test_summary_before_completion() -> Result<(), SessionError> {
        let mut quiz = two_questions();
        assert_eq!(quiz.summary(), Err(SessionError::IncompleteSession));
        quiz.submit_answer("B")?;
        assert_eq!(quiz.summary(), Err(SessionError::IncompleteSession));
        Ok(())
    }

    #[test]
    fn test_reset() -> Result<(), SessionError> {
        let mut quiz = two_questions();
        quiz.submit_answer("B")?;
        quiz.next_question()?;
        quiz.reset();
        assert_eq!(quiz.position(), 0);
        assert_eq!(quiz.score(), 0);
        assert!(!quiz.answered());
        assert_eq!(quiz.selected(), None);
        assert!(quiz.history().is_empty());
        quiz.submit_answer("B")?;
        assert_eq!(quiz.score(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_quiz() {
        let mut quiz = QuizSession::new(Vec::new());
        assert_eq!(quiz.submit_answer("A"), Err(SessionError::EmptyQuiz));
        assert_eq!(quiz.summary(), Err(SessionError::EmptyQuiz));
        assert!(!quiz.is_complete());
    }

    #[test]
    fn test_perfect_score() -> Result<(), SessionError> {
        let mut quiz = two_questions();
        quiz.submit_answer("B")?;
        quiz.next_question()?;
        quiz.submit_answer("A")?;
        let summary = quiz.summary()?;
        assert_eq!(summary.percentage, 100);
        assert_eq!(summary.tier, GradeTier::ObjectionPro);
        Ok(())
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(GradeTier::from_percentage(100), GradeTier::ObjectionPro);
        assert_eq!(GradeTier::from_percentage(90), GradeTier::ObjectionPro);
        assert_eq!(GradeTier::from_percentage(89), GradeTier::SolidWork);
        assert_eq!(GradeTier::from_percentage(75), GradeTier::SolidWork);
        assert_eq!(GradeTier::from_percentage(74), GradeTier::GettingThere);
        assert_eq!(GradeTier::from_percentage(60), GradeTier::GettingThere);
        assert_eq!(GradeTier::from_percentage(59), GradeTier::KeepPracticing);
        assert_eq!(GradeTier::from_percentage(0), GradeTier::KeepPracticing);
    }

    #[test]
    fn test_tiers_are_monotonic() {
        let mut previous = GradeTier::from_percentage(0);
        for percentage in 1..=100 {
            let tier = GradeTier::from_percentage(percentage);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn test_percentage_in_range() -> Result<(), SessionError> {
        // Every possible score on a three-question quiz.
        for correct_answers in 0..=3 {
            let mut quiz = QuizSession::new(vec![
                question("one", ChoiceLetter::A),
                question("two", ChoiceLetter::A),
                question("three", ChoiceLetter::A),
            ]);
            for idx in 0..3 {
                let letter = if idx < correct_answers { "A" } else { "D" };
                quiz.submit_answer(letter)?;
                assert_invariants(&quiz);
                if idx < 2 {
                    quiz.next_question()?;
                }
            }
            let summary = quiz.summary()?;
            assert_eq!(summary.score, correct_answers);
            assert!(summary.percentage <= 100);
        }
        Ok(())
    }
}
