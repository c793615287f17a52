//! Player identification and per-player card zones.
//!
//! ## PlayerId
//!
//! Type-safe index into the two player slots.
//!
//! ## Player
//!
//! Owns the four per-player zones (deck, hand, discard, play area) as
//! persistent vectors, plus the shuffle-on-empty draw primitive. The deck
//! top is the back of the vector.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use crate::cards::CardId;

/// Player identifier for the two-player game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first player (takes the opening turn).
    pub const FIRST: PlayerId = PlayerId(0);

    /// The second player.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Get the raw slot index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One player's zones and flags.
///
/// The zone vectors are persistent structures, so cloning a `Player` (and
/// the snapshot containing it) shares unchanged zones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Display name used in log entries.
    pub name: String,

    /// Draw pile; the top is the back of the vector.
    pub deck: Vector<CardId>,

    /// Cards in hand.
    pub hand: Vector<CardId>,

    /// Discard pile.
    pub discard: Vector<CardId>,

    /// Cards played this turn.
    pub play_area: Vector<CardId>,

    /// Whether this player is driven by the scripted opponent.
    pub is_ai: bool,
}

impl Player {
    /// Create a player with empty zones.
    #[must_use]
    pub fn new(name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            name: name.into(),
            deck: Vector::new(),
            hand: Vector::new(),
            discard: Vector::new(),
            play_area: Vector::new(),
            is_ai,
        }
    }

    /// Draw up to `count` cards from the deck into the hand.
    ///
    /// When the deck empties mid-draw, the discard pile is shuffled into a
    /// new deck and drawing continues. Cards drawn before the reshuffle are
    /// unaffected by it. Returns the number actually drawn; running out of
    /// both piles stops early and is not an error.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            if self.deck.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.reshuffle_discard(rng);
            }
            if let Some(card) = self.deck.pop_back() {
                self.hand.push_back(card);
                drawn += 1;
            }
        }
        drawn
    }

    /// Shuffle the discard pile and make it the new deck.
    pub(crate) fn reshuffle_discard(&mut self, rng: &mut GameRng) {
        let mut pile: Vec<CardId> = self.discard.iter().copied().collect();
        rng.shuffle(&mut pile);
        self.deck = pile.into_iter().collect();
        self.discard = Vector::new();
    }

    /// Remove the card at `hand_index`, returning it.
    ///
    /// Panics if out of bounds; callers validate indices first.
    pub(crate) fn take_from_hand(&mut self, hand_index: usize) -> CardId {
        self.hand.remove(hand_index)
    }

    /// Iterate over every card this player owns, across all zones.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
            .chain(self.play_area.iter())
            .copied()
    }

    /// Total number of cards owned across all zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len() + self.play_area.len()
    }
}
