//! Core state types: players, zones, RNG, pending effects, the snapshot.

pub mod pending;
pub mod player;
pub mod rng;
pub mod state;

pub use pending::{GainTo, PendingChoice, PendingEffect, SelectCount};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{GameOutcome, GameState, Phase, Supply};
