use super::party::Policy;
use crate::error::GameError;
use rand::prelude::SliceRandom;
use rand::Rng;
use std::iter::repeat;

pub const LIBERAL_POLICIES: usize = 6;
pub const FASCIST_POLICIES: usize = 11;

/// The draw pile and discard pile of policy cards.
///
/// Enacted cards live on the [Board](super::board::Board) and drawn cards in the legislators'
/// hands; every other card is in exactly one of these two piles.
#[derive(Clone, Debug)]
pub struct Deck {
    /// The current draw pile; the top card is the last element
    draw: Vec<Policy>,
    discard: Vec<Policy>,
}

impl Deck {
    /// Creates the standard 17 card deck, shuffled.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut draw = Vec::with_capacity(LIBERAL_POLICIES + FASCIST_POLICIES);
        draw.extend(repeat(Policy::Liberal).take(LIBERAL_POLICIES));
        draw.extend(repeat(Policy::Fascist).take(FASCIST_POLICIES));
        draw.shuffle(rng);
        Self { draw, discard: vec![] }
    }

    /// Builds a deck with a known draw order; the first card given is the top card.
    #[cfg(test)]
    pub fn stacked(top_first: &[Policy], discard: &[Policy]) -> Self {
        Self {
            draw: top_first.iter().rev().copied().collect(),
            discard: discard.to_vec(),
        }
    }

    /// Shuffles the discard pile into the deck, if there are fewer than three cards in the draw pile.
    pub fn check_shuffle(&mut self, rng: &mut impl Rng) {
        if self.draw.len() < 3 {
            log::debug!("reshuffling {} discarded policies into the deck", self.discard.len());
            self.draw.append(&mut self.discard);
            self.draw.shuffle(rng);
        }
    }

    /// Draws the top card from the deck.
    pub fn draw_one(&mut self, rng: &mut impl Rng) -> Result<Policy, GameError> {
        self.check_shuffle(rng);
        self.draw.pop().ok_or(GameError::DeckUnderflow)
    }

    /// Draws the top three cards from the deck, topmost first.
    pub fn draw_three(&mut self, rng: &mut impl Rng) -> Result<[Policy; 3], GameError> {
        self.check_shuffle(rng);
        let cards = self.peek_three()?;
        self.draw.truncate(self.draw.len() - 3);
        Ok(cards)
    }

    /// Looks at the top three cards without removing them, topmost first.
    pub fn peek_three(&self) -> Result<[Policy; 3], GameError> {
        let n = self.draw.len();
        if n < 3 {
            return Err(GameError::DeckUnderflow);
        }
        Ok([self.draw[n - 1], self.draw[n - 2], self.draw[n - 3]])
    }

    /// Moves cards to the discard pile.
    pub fn discard(&mut self, cards: &[Policy]) {
        self.discard.extend_from_slice(cards);
    }

    /// The number of cards in the draw pile.
    pub fn count(&self) -> usize {
        self.draw.len()
    }

    /// The number of cards in the discard pile.
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }

    /// The cards in the draw pile, bottom first.
    #[cfg(test)]
    pub fn draw_pile(&self) -> &[Policy] {
        &self.draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::party::Party::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn standard_composition() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let deck = Deck::new(&mut rng);
        assert_eq!(deck.count(), 17);
        assert_eq!(deck.draw.iter().filter(|c| **c == Liberal).count(), 6);
        assert_eq!(deck.discarded(), 0);
    }

    #[test]
    fn peek_leaves_deck_alone() {
        let deck = Deck::stacked(&[Fascist, Liberal, Fascist, Liberal], &[]);
        assert_eq!(deck.peek_three(), Ok([Fascist, Liberal, Fascist]));
        assert_eq!(deck.count(), 4);
    }

    #[test]
    fn reshuffles_discard_when_short() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut deck = Deck::stacked(&[Liberal, Fascist], &[Fascist, Fascist, Liberal]);
        let cards = deck.draw_three(&mut rng).unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(deck.count() + deck.discarded(), 2);
        assert_eq!(deck.discarded(), 0);
    }

    #[test]
    fn underflow_when_both_piles_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut deck = Deck::stacked(&[Liberal], &[Fascist]);
        assert_eq!(deck.draw_three(&mut rng), Err(GameError::DeckUnderflow));
        assert_eq!(deck.count(), 2);
        assert!(deck.draw_one(&mut rng).is_ok());
        assert!(deck.draw_one(&mut rng).is_ok());
        assert_eq!(deck.draw_one(&mut rng), Err(GameError::DeckUnderflow));
    }
}
