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

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::SessionError;
use crate::types::flashcard::Flashcard;
use crate::types::flashcard::FlashcardId;

/// The filter value that selects every card.
pub const ALL_CATEGORIES: &str = "All";

/// The distinct categories of `cards`, in order of first appearance.
pub fn categories(cards: &[Flashcard]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut categories = Vec::new();
    for card in cards {
        if seen.insert(card.category()) {
            categories.push(card.category());
        }
    }
    categories
}

/// Cycles through a category-filtered view of the objection flashcards.
///
/// The position always points into the active list, unless that list is
/// empty, in which case it is zero.
pub struct DeckCycler {
    /// Every card, in content order.
    cards: Vec<Flashcard>,
    /// The current filter: a category name or [`ALL_CATEGORIES`].
    filter: String,
    /// Indices into `cards` of the cards that pass the filter.
    active: Vec<usize>,
    position: usize,
    revealed: bool,
    visited: HashSet<FlashcardId>,
}

/// How much of the active list has been reviewed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub reviewed: usize,
    pub total: usize,
}

impl Progress {
    /// Percent reviewed, for the progress bar.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            (self.reviewed * 100) / self.total
        }
    }
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} reviewed", self.reviewed, self.total)
    }
}

impl DeckCycler {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        let active = (0..cards.len()).collect();
        Self {
            cards,
            filter: ALL_CATEGORIES.to_string(),
            active,
            position: 0,
            revealed: false,
            visited: HashSet::new(),
        }
    }

    /// The distinct categories, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        categories(&self.cards)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_category_filter(&mut self, category: &str) -> Result<(), SessionError> {
        let active: Vec<usize> = if category == ALL_CATEGORIES {
            (0..self.cards.len()).collect()
        } else {
            self.cards
                .iter()
                .enumerate()
                .filter(|(_, card)| card.category() == category)
                .map(|(idx, _)| idx)
                .collect()
        };
        if active.is_empty() && category != ALL_CATEGORIES {
            return Err(SessionError::InvalidFilter(category.to_string()));
        }
        self.filter = category.to_string();
        self.active = active;
        if self.position >= self.active.len() {
            self.position = 0;
        }
        Ok(())
    }

    /// The cards that pass the current filter.
    pub fn active_cards(&self) -> impl Iterator<Item = &Flashcard> {
        self.active.iter().map(|idx| &self.cards[*idx])
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.active.get(self.position).map(|idx| &self.cards[*idx])
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_visited(&self, id: FlashcardId) -> bool {
        self.visited.contains(&id)
    }

    pub fn flip(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Mark the current card as reviewed and move on to the next one,
    /// wrapping around at the end.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        let id = match self.current() {
            Some(card) => card.id(),
            None => return Err(SessionError::EmptyDeck),
        };
        self.visited.insert(id);
        self.position = (self.position + 1) % self.active.len();
        self.revealed = false;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.visited.clear();
        self.position = 0;
        self.revealed = false;
    }

    pub fn progress(&self) -> Progress {
        let reviewed = self
            .active_cards()
            .filter(|card| self.visited.contains(&card.id()))
            .count();
        Progress {
            reviewed,
            total: self.active.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: FlashcardId, category: &str) -> Flashcard {
        Flashcard::new(
            id,
            category,
            format!("objection {id}"),
            format!("reason {id}"),
            format!("response {id}"),
        )
    }

    fn sample_deck() -> DeckCycler {
        DeckCycler::new(vec![card(1, "A"), card(2, "A"), card(3, "B")])
    }

    fn active_ids(deck: &DeckCycler) -> Vec<FlashcardId> {
        deck.active_cards().map(|card| card.id()).collect()
    }

    #[test]
    fn test_categories_in_order_of_appearance() {
        let deck = DeckCycler::new(vec![card(1, "Price"), card(2, "Trust"), card(3, "Price")]);
        assert_eq!(deck.categories(), vec!["Price", "Trust"]);
    }

    #[test]
    fn test_categories_of_cards() {
        let cards = vec![card(1, "Trust"), card(2, "Fees"), card(3, "Trust")];
        assert_eq!(categories(&cards), vec!["Trust", "Fees"]);
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn test_filter_selects_exactly_the_category() -> Result<(), SessionError> {
        let mut deck = DeckCycler::new(vec![
            card(1, "A"),
            card(2, "B"),
            card(3, "A"),
            card(4, "C"),
            card(5, "A"),
        ]);
        deck.set_category_filter("A")?;
        assert_eq!(active_ids(&deck), vec![1, 3, 5]);
        deck.set_category_filter("C")?;
        assert_eq!(active_ids(&deck), vec![4]);
        deck.set_category_filter(ALL_CATEGORIES)?;
        assert_eq!(active_ids(&deck), vec![1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let mut deck = sample_deck();
        let result = deck.set_category_filter("Lawns");
        assert_eq!(result, Err(SessionError::InvalidFilter("Lawns".to_string())));
        assert_eq!(deck.filter(), ALL_CATEGORIES);
        assert_eq!(deck.active_len(), 3);
    }

    #[test]
    fn test_filter_clamps_position() -> Result<(), SessionError> {
        let mut deck = sample_deck();
        deck.advance()?;
        deck.advance()?;
        assert_eq!(deck.position(), 2);
        deck.flip();
        deck.set_category_filter("B")?;
        assert_eq!(deck.position(), 0);
        // The reveal flag and review progress survive a filter change.
        assert!(deck.revealed());
        assert!(deck.is_visited(1));
        Ok(())
    }

    #[test]
    fn test_filter_keeps_position_in_range() -> Result<(), SessionError> {
        let mut deck = sample_deck();
        deck.advance()?;
        deck.set_category_filter("A")?;
        assert_eq!(deck.position(), 1);
        assert_eq!(deck.current().map(|c| c.id()), Some(2));
        Ok(())
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let mut deck = sample_deck();
        assert!(!deck.revealed());
        deck.flip();
        assert!(deck.revealed());
        deck.flip();
        assert!(!deck.revealed());
    }

    #[test]
    fn test_advance_wraps_and_visits_everything() -> Result<(), SessionError> {
        let mut deck = sample_deck();
        for _ in 0..deck.active_len() {
            deck.flip();
            deck.advance()?;
            assert!(!deck.revealed());
        }
        assert_eq!(deck.position(), 0);
        for id in [1, 2, 3] {
            assert!(deck.is_visited(id));
        }
        Ok(())
    }

    #[test]
    fn test_advance_on_empty_deck() {
        let mut deck = DeckCycler::new(Vec::new());
        assert_eq!(deck.advance(), Err(SessionError::EmptyDeck));
        assert_eq!(deck.position(), 0);
        assert_eq!(deck.progress(), Progress { reviewed: 0, total: 0 });
    }

    #[test]
    fn test_reset() -> Result<(), SessionError> {
        let mut deck = sample_deck();
        deck.advance()?;
        deck.flip();
        deck.reset();
        assert_eq!(deck.position(), 0);
        assert!(!deck.revealed());
        assert_eq!(deck.progress().reviewed, 0);
        Ok(())
    }

    #[test]
    fn test_progress_counts_only_active_cards() -> Result<(), SessionError> {
        let mut deck = sample_deck();
        deck.set_category_filter("B")?;
        deck.advance()?;
        assert_eq!(deck.progress(), Progress { reviewed: 1, total: 1 });
        deck.set_category_filter("A")?;
        assert_eq!(deck.progress(), Progress { reviewed: 0, total: 2 });
        deck.set_category_filter(ALL_CATEGORIES)?;
        assert_eq!(deck.progress(), Progress { reviewed: 1, total: 3 });
        Ok(())
    }

    #[test]
    fn test_two_card_category_scenario() -> Result<(), SessionError> {
        let mut deck = sample_deck();
        deck.set_category_filter("A")?;
        assert_eq!(deck.active_len(), 2);
        deck.advance()?;
        deck.advance()?;
        assert_eq!(deck.position(), 0);
        assert!(deck.is_visited(1));
        assert!(deck.is_visited(2));
        assert_eq!(deck.progress().to_string(), "2 / 2 reviewed");
        assert_eq!(deck.progress().percent(), 100);
        Ok(())
    }
}
