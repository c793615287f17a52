//! The game-state snapshot.
//!
//! ## GameState
//!
//! The root of all game data: supply, the two players, the shared trash,
//! turn counters, the event log, and the pending-effect slot. Snapshots
//! are immutable from the caller's point of view: every transition
//! operation takes a reference and returns a new snapshot. Persistent
//! collections make that clone cheap.
//!
//! ## Supply
//!
//! Remaining counts per pile. Depletion gates gains and triggers the end
//! of the game; a count never goes negative.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::pending::PendingEffect;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::CardId;

/// Turn phase. Cleanup is folded into `end_turn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Action,
    Buy,
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Single winner.
    Winner(PlayerId),
    /// Exact score tie - nobody wins.
    Tie,
}

/// Shared pile counts for every card in the game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply(OrdMap<CardId, u32>);

impl Supply {
    /// Create an empty supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pile size for a card.
    pub fn insert(&mut self, id: CardId, count: u32) {
        self.0.insert(id, count);
    }

    /// Remaining count for a pile; 0 for piles not in this game.
    #[must_use]
    pub fn count(&self, id: CardId) -> u32 {
        self.0.get(&id).copied().unwrap_or(0)
    }

    /// Whether a pile is in the game and has cards left.
    #[must_use]
    pub fn available(&self, id: CardId) -> bool {
        self.count(id) > 0
    }

    /// Remove one card from a pile.
    ///
    /// Panics if the pile is already empty: callers check `available`
    /// first, so an underflow is an engine bug.
    pub fn take(&mut self, id: CardId) {
        let count = self.count(id);
        assert!(count > 0, "supply underflow for {id:?}");
        self.0.insert(id, count - 1);
    }

    /// Number of piles that started in the game and are now empty.
    #[must_use]
    pub fn empty_piles(&self) -> usize {
        self.0.values().filter(|&&c| c == 0).count()
    }

    /// Iterate over (card, remaining) pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, u32)> + '_ {
        self.0.iter().map(|(&id, &c)| (id, c))
    }
}

/// Complete game snapshot.
///
/// All fields are public: the engine is the source of truth for legality,
/// but the presentation layer and the scripted opponent read state freely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Remaining supply piles.
    pub supply: Supply,

    /// The ten kingdom piles in this game.
    pub kingdom: Vec<CardId>,

    /// Shared trash pile (append-only).
    pub trash: Vector<CardId>,

    /// The two players, indexed by `PlayerId`.
    pub players: [Player; 2],

    /// Whose turn it is.
    pub current: PlayerId,

    /// Current phase.
    pub phase: Phase,

    /// Actions remaining this turn.
    pub actions: u32,

    /// Buys remaining this turn.
    pub buys: u32,

    /// Coins available this turn.
    pub coins: u32,

    /// Turn counter; increments when play wraps back to the first player.
    pub turn: u32,

    /// `None` while the game is running.
    pub outcome: Option<GameOutcome>,

    /// Append-only, human-readable event log.
    pub log: Vector<String>,

    /// The interactive choice in progress, if any.
    pub pending: Option<PendingEffect>,

    /// Set by Merchant: +$1 the first time a Silver is played this turn.
    pub merchant_bonus: bool,

    /// Deterministic random source for shuffles.
    pub rng: GameRng,
}

impl GameState {
    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current.index()]
    }

    /// The non-acting player.
    #[must_use]
    pub fn opponent(&self) -> &Player {
        &self.players[self.current.opponent().index()]
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Append a log entry.
    pub fn push_log(&mut self, entry: impl Into<String>) {
        self.log.push_back(entry.into());
    }
}

impl std::ops::Index<PlayerId> for GameState {
    type Output = Player;

    fn index(&self, player: PlayerId) -> &Player {
        &self.players[player.index()]
    }
}

impl std::ops::IndexMut<PlayerId> for GameState {
    fn index_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_counts() {
        let mut supply = Supply::new();
        supply.insert(CardId::Copper, 46);
        supply.insert(CardId::Province, 8);

        assert_eq!(supply.count(CardId::Copper), 46);
        assert_eq!(supply.count(CardId::Witch), 0);
        assert!(supply.available(CardId::Province));
        assert!(!supply.available(CardId::Witch));
    }

    #[test]
    fn test_supply_take() {
        let mut supply = Supply::new();
        supply.insert(CardId::Silver, 2);

        supply.take(CardId::Silver);
        supply.take(CardId::Silver);

        assert_eq!(supply.count(CardId::Silver), 0);
        assert!(!supply.available(CardId::Silver));
    }

    #[test]
    #[should_panic(expected = "supply underflow")]
    fn test_supply_underflow_panics() {
        let mut supply = Supply::new();
        supply.insert(CardId::Gold, 0);
        supply.take(CardId::Gold);
    }

    #[test]
    fn test_empty_piles_counts_only_in_game_piles() {
        let mut supply = Supply::new();
        supply.insert(CardId::Province, 0);
        supply.insert(CardId::Smithy, 0);
        supply.insert(CardId::Copper, 10);

        // Witch was never in this game and must not count.
        assert_eq!(supply.empty_piles(), 2);
    }
}
