//! The pending-effect protocol.
//!
//! Some card effects cannot resolve without a player choice. Instead of
//! suspending, the engine records a `PendingEffect` on the snapshot and
//! returns; the caller completes the resolution with a follow-up operation
//! whose shape matches the recorded choice. At most one pending effect is
//! active at a time, and normal action play and buying are rejected while
//! one is open.
//!
//! Two-step effects (Remodel, Mine, Artisan) advance from one choice to the
//! next instead of clearing to none.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{CardId, CardType};

/// How many cards a discard selection must contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectCount {
    /// Exactly this many (Militia, Poacher).
    Exactly(usize),
    /// Any number, including zero (Cellar).
    AnyNumber,
}

impl SelectCount {
    /// Check a selection size against this constraint.
    #[must_use]
    pub fn accepts(self, len: usize) -> bool {
        match self {
            SelectCount::Exactly(n) => len == n,
            SelectCount::AnyNumber => true,
        }
    }
}

/// Where a gained card goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainTo {
    Discard,
    Hand,
    DeckTop,
}

/// The choice an actor still has to make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingChoice {
    /// Discard selected hand cards, optionally drawing that many after.
    Discard {
        /// The player who must discard (Militia targets the opponent).
        player: PlayerId,
        count: SelectCount,
        redraw: bool,
    },

    /// Trash up to `up_to` hand cards.
    Trash { up_to: usize },

    /// Gain a card from supply under a cost ceiling.
    Gain {
        max_cost: u32,
        to: GainTo,
        restriction: Option<CardType>,
        /// Advance to a topdeck step after gaining (Artisan).
        then_topdeck: bool,
    },

    /// Trash one hand card, then gain under a ceiling derived from its cost.
    TrashThenGain {
        cost_bonus: u32,
        restriction: Option<CardType>,
        to: GainTo,
    },

    /// Put one hand card on top of the deck.
    Topdeck,

    /// Choose an Action card in hand to play twice.
    PlayTwice,
}

/// An interactive card resolution in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEffect {
    /// The card whose effect is waiting on a choice.
    pub source: CardId,

    /// The choice to make.
    pub choice: PendingChoice,
}

impl PendingEffect {
    /// Create a pending effect.
    #[must_use]
    pub fn new(source: CardId, choice: PendingChoice) -> Self {
        Self { source, choice }
    }

    /// Whether `cancel_pending_effect` may discard this choice.
    ///
    /// Opponent-forced discards (Militia, Poacher) and steps of a
    /// resolution already under way (Remodel/Mine/Artisan) are binding.
    #[must_use]
    pub fn is_cancelable(&self) -> bool {
        matches!(
            self.source,
            CardId::Cellar | CardId::Chapel | CardId::Workshop | CardId::ThroneRoom
        )
    }

    /// The player who must answer this choice.
    #[must_use]
    pub fn chooser(&self, current: PlayerId) -> PlayerId {
        match self.choice {
            PendingChoice::Discard { player, .. } => player,
            _ => current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_count() {
        assert!(SelectCount::Exactly(3).accepts(3));
        assert!(!SelectCount::Exactly(3).accepts(2));
        assert!(SelectCount::AnyNumber.accepts(0));
        assert!(SelectCount::AnyNumber.accepts(7));
    }

    #[test]
    fn test_cancelable() {
        let cellar = PendingEffect::new(
            CardId::Cellar,
            PendingChoice::Discard {
                player: PlayerId::FIRST,
                count: SelectCount::AnyNumber,
                redraw: true,
            },
        );
        assert!(cellar.is_cancelable());

        let militia = PendingEffect::new(
            CardId::Militia,
            PendingChoice::Discard {
                player: PlayerId::SECOND,
                count: SelectCount::Exactly(3),
                redraw: false,
            },
        );
        assert!(!militia.is_cancelable());

        let remodel_gain = PendingEffect::new(
            CardId::Remodel,
            PendingChoice::Gain {
                max_cost: 4,
                to: GainTo::Discard,
                restriction: None,
                then_topdeck: false,
            },
        );
        assert!(!remodel_gain.is_cancelable());
    }

    #[test]
    fn test_chooser() {
        let militia = PendingEffect::new(
            CardId::Militia,
            PendingChoice::Discard {
                player: PlayerId::SECOND,
                count: SelectCount::Exactly(2),
                redraw: false,
            },
        );
        assert_eq!(militia.chooser(PlayerId::FIRST), PlayerId::SECOND);

        let chapel = PendingEffect::new(CardId::Chapel, PendingChoice::Trash { up_to: 4 });
        assert_eq!(chapel.chooser(PlayerId::FIRST), PlayerId::FIRST);
    }
}
