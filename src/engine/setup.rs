//! Initial game construction.
//!
//! `GameSetup` is the entry point: seed, optional explicit kingdom, and
//! player flavor. Supply sizing follows the two-player base-set rules.

use im::Vector;

use crate::cards::{Catalog, CardId, KINGDOM_SIZE};
use crate::core::{GameRng, GameState, Phase, Player, PlayerId, Supply};

/// Copies of each victory pile in a two-player game.
const VICTORY_PILE: u32 = 8;
/// Curses per opponent.
const CURSE_PILE: u32 = 10;
/// Copies of each kingdom action pile.
const KINGDOM_PILE: u32 = 10;
/// Coppers dealt to each starting deck.
const STARTING_COPPER: usize = 7;
/// Estates dealt to each starting deck.
const STARTING_ESTATE: usize = 3;
/// Cards drawn at the start of each turn.
pub(crate) const HAND_SIZE: usize = 5;

/// Builder for a fresh two-player game.
///
/// ```
/// use provincial::engine::GameSetup;
///
/// let state = GameSetup::new(42).build();
/// assert_eq!(state.players[0].hand.len(), 5);
/// ```
pub struct GameSetup {
    seed: u64,
    kingdom: Option<Vec<CardId>>,
    opponent_is_ai: bool,
    names: [String; 2],
}

impl GameSetup {
    /// Start a setup with the given RNG seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            kingdom: None,
            opponent_is_ai: true,
            names: ["You".to_string(), "AI".to_string()],
        }
    }

    /// Use an explicit kingdom instead of a random pick.
    ///
    /// Panics unless exactly `KINGDOM_SIZE` distinct non-basic cards are
    /// given.
    #[must_use]
    pub fn kingdom(mut self, cards: Vec<CardId>) -> Self {
        assert_eq!(cards.len(), KINGDOM_SIZE, "kingdom must have 10 piles");
        let mut unique = cards.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), KINGDOM_SIZE, "kingdom piles must be distinct");
        assert!(
            cards.iter().all(|id| !id.is_basic()),
            "kingdom piles must be non-basic cards"
        );
        self.kingdom = Some(cards);
        self
    }

    /// Whether the second player is driven by the scripted opponent.
    #[must_use]
    pub fn opponent_is_ai(mut self, ai: bool) -> Self {
        self.opponent_is_ai = ai;
        self
    }

    /// Set the display names used in log entries.
    #[must_use]
    pub fn names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.names = [first.into(), second.into()];
        self
    }

    /// Build the initial snapshot: supply sized, kingdom chosen, starting
    /// decks shuffled and opening hands drawn.
    #[must_use]
    pub fn build(self) -> GameState {
        let mut rng = GameRng::new(self.seed);
        let kingdom = self
            .kingdom
            .unwrap_or_else(|| Catalog::select_kingdom(&mut rng));

        let supply = build_supply(&kingdom);

        let [first_name, second_name] = self.names;
        let mut players = [
            Player::new(first_name, false),
            Player::new(second_name, self.opponent_is_ai),
        ];
        for player in &mut players {
            let mut deck: Vec<CardId> = std::iter::repeat(CardId::Copper)
                .take(STARTING_COPPER)
                .chain(std::iter::repeat(CardId::Estate).take(STARTING_ESTATE))
                .collect();
            rng.shuffle(&mut deck);
            player.deck = deck.into_iter().collect();
            player.draw(HAND_SIZE, &mut rng);
        }

        let mut state = GameState {
            supply,
            kingdom,
            trash: Vector::new(),
            players,
            current: PlayerId::FIRST,
            phase: Phase::Action,
            actions: 1,
            buys: 1,
            coins: 0,
            turn: 1,
            outcome: None,
            log: Vector::new(),
            pending: None,
            merchant_bonus: false,
            rng,
        };
        let opener = state.current_player().name.clone();
        state.push_log(format!("Game started! {opener}'s turn."));
        state
    }
}

/// Size every pile for a two-player game.
fn build_supply(kingdom: &[CardId]) -> Supply {
    let mut supply = Supply::new();

    supply.insert(CardId::Copper, 60 - 2 * STARTING_COPPER as u32);
    supply.insert(CardId::Silver, 40);
    supply.insert(CardId::Gold, 30);
    supply.insert(CardId::Estate, VICTORY_PILE);
    supply.insert(CardId::Duchy, VICTORY_PILE);
    supply.insert(CardId::Province, VICTORY_PILE);
    supply.insert(CardId::Curse, CURSE_PILE);

    for &id in kingdom {
        // Gardens is a victory pile and uses the victory pile size.
        let count = if Catalog::global().get_unchecked(id).dynamic_vp
            || Catalog::global().has_type(id, crate::cards::CardType::Victory)
        {
            VICTORY_PILE
        } else {
            KINGDOM_PILE
        };
        supply.insert(id, count);
    }

    supply
}

/// Convenience constructor with a random kingdom.
#[must_use]
pub fn new_game(seed: u64) -> GameState {
    GameSetup::new(seed).build()
}
