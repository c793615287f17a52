//! A deterministic two-player deck-building card game engine.
//!
//! The engine models the full loop of a base-set deck-builder: an Action
//! phase, a Buy phase spending auto-played treasures, cleanup with a fresh
//! five-card hand, and a shared supply whose depletion ends the game.
//! Interactive card effects suspend into a pending-effect slot on the
//! snapshot and resolve through explicit choice operations.
//!
//! ## Design
//!
//! - **Snapshot transitions.** Every operation is `fn(&GameState, ..) ->
//!   GameState`. Illegal calls return an unchanged clone, so drivers and
//!   search code never pre-validate. Persistent collections (`im`) keep
//!   the clones cheap.
//! - **Determinism.** All randomness flows through a seeded [`GameRng`]
//!   stored on the snapshot. Same seed, same inputs, same game.
//! - **Data-driven cards.** Each card declares an [`EffectSpec`] of
//!   primitive bonuses plus optional attack and special tags; the engine
//!   interprets the spec rather than dispatching on card identity.
//!
//! ## Example
//!
//! ```
//! use provincial::engine::{new_game, go_to_buy_phase, buy_card, end_turn};
//! use provincial::cards::CardId;
//!
//! let state = new_game(42);
//! let state = go_to_buy_phase(&state);
//! let state = buy_card(&state, CardId::Copper);
//! let state = end_turn(&state);
//! assert_eq!(state.turn, 1);
//! ```

pub mod ai;
pub mod cards;
pub mod core;
pub mod engine;

pub use cards::{Card, CardId, CardType, Catalog, EffectSpec};
pub use core::{GameOutcome, GameRng, GameState, PendingChoice, PendingEffect, Phase, PlayerId};
