//! Transition operations over game snapshots.
//!
//! Every public function here takes a `&GameState` and returns the next
//! snapshot. Illegal calls (wrong phase, bad index, pending effect open,
//! game over) return an unchanged clone, so drivers never need to
//! pre-validate.

mod attack;
mod choice;
mod effects;
mod score;
mod setup;
mod special;
mod turn;

pub use choice::{
    can_select_hand_card, cancel_pending_effect, discard_cards, select_gain_card,
    select_trash_card, topdeck_card, trash_cards,
};
pub use effects::play_action;
pub use score::victory_points;
pub use setup::{new_game, GameSetup};
pub use turn::{buy_card, end_turn, go_to_buy_phase};
