//! Resolution of pending choices.
//!
//! Each operation here matches one `PendingChoice` shape. A call whose
//! shape or payload does not match the open choice returns the snapshot
//! unchanged; a matching call applies the effect, clears the pending slot
//! (or advances a two-step resolution to its next choice), and logs.

use crate::cards::{Catalog, CardId, CardType};
use crate::core::{GameState, PendingChoice, PendingEffect};

use super::effects::gain_card;

/// Resolve a pending `Discard`: discard the hand cards at `indices`.
///
/// Indices must be distinct and in bounds for the chooser's hand, and the
/// selection size must satisfy the recorded count. A Cellar discard draws
/// one replacement per discarded card.
#[must_use]
pub fn discard_cards(state: &GameState, indices: &[usize]) -> GameState {
    let Some(pending) = state.pending else {
        return state.clone();
    };
    let PendingChoice::Discard { player, count, redraw } = pending.choice else {
        return state.clone();
    };

    let hand_size = state[player].hand.len();
    if !valid_selection(indices, hand_size) || !count.accepts(indices.len()) {
        return state.clone();
    }

    let mut next = state.clone();
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    for idx in sorted {
        let card = next[player].take_from_hand(idx);
        next[player].discard.push_back(card);
    }
    if redraw {
        next.players[player.index()].draw(indices.len(), &mut next.rng);
    }
    next.pending = None;

    let name = next[player].name.clone();
    let n = indices.len();
    if redraw {
        next.push_log(format!("{name} discards {n} cards and draws {n}"));
    } else {
        next.push_log(format!("{name} discards {n} cards"));
    }
    next
}

/// Resolve a pending `Trash`: trash 1 to `up_to` hand cards.
#[must_use]
pub fn trash_cards(state: &GameState, indices: &[usize]) -> GameState {
    let Some(pending) = state.pending else {
        return state.clone();
    };
    let PendingChoice::Trash { up_to } = pending.choice else {
        return state.clone();
    };

    let current = state.current;
    let hand_size = state[current].hand.len();
    if indices.is_empty() || indices.len() > up_to || !valid_selection(indices, hand_size) {
        return state.clone();
    }

    let mut next = state.clone();
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    for idx in sorted {
        let card = next[current].take_from_hand(idx);
        next.trash.push_back(card);
    }
    next.pending = None;

    let name = next[current].name.clone();
    next.push_log(format!("{name} trashes {} cards", indices.len()));
    next
}

/// Resolve a pending `Gain`: take `id` from supply.
///
/// The pile must be non-empty, the card's cost within the ceiling, and its
/// type within the restriction if one is recorded. An Artisan gain does
/// not finish the resolution; it advances to the topdeck step.
#[must_use]
pub fn select_gain_card(state: &GameState, id: CardId) -> GameState {
    let Some(pending) = state.pending else {
        return state.clone();
    };
    let PendingChoice::Gain { max_cost, to, restriction, then_topdeck } = pending.choice else {
        return state.clone();
    };

    let catalog = Catalog::global();
    let card = catalog.get_unchecked(id);
    if !state.supply.available(id)
        || card.cost > max_cost
        || restriction.map_or(false, |ty| !card.is(ty))
    {
        return state.clone();
    }

    let mut next = state.clone();
    let current = next.current;
    gain_card(&mut next, current, id, to);

    let name = next[current].name.clone();
    next.push_log(format!("{name} gains {}", card.name));

    next.pending = if then_topdeck {
        Some(PendingEffect::new(pending.source, PendingChoice::Topdeck))
    } else {
        None
    };
    next
}

/// Resolve the first half of a pending `TrashThenGain`: trash the hand
/// card at `hand_index` and advance to a `Gain` whose cost ceiling is the
/// trashed card's cost plus the recorded bonus.
#[must_use]
pub fn select_trash_card(state: &GameState, hand_index: usize) -> GameState {
    let Some(pending) = state.pending else {
        return state.clone();
    };
    let PendingChoice::TrashThenGain { cost_bonus, restriction, to } = pending.choice else {
        return state.clone();
    };

    let current = state.current;
    let Some(&id) = state[current].hand.get(hand_index) else {
        return state.clone();
    };
    let card = Catalog::global().get_unchecked(id);
    if restriction.map_or(false, |ty| !card.is(ty)) {
        return state.clone();
    }

    let mut next = state.clone();
    let trashed = next[current].take_from_hand(hand_index);
    next.trash.push_back(trashed);

    let name = next[current].name.clone();
    next.push_log(format!("{name} trashes {}", card.name));

    next.pending = Some(PendingEffect::new(
        pending.source,
        PendingChoice::Gain {
            max_cost: card.cost + cost_bonus,
            to,
            restriction,
            then_topdeck: false,
        },
    ));
    next
}

/// Resolve a pending `Topdeck`: put the hand card at `hand_index` on top
/// of the deck.
#[must_use]
pub fn topdeck_card(state: &GameState, hand_index: usize) -> GameState {
    let Some(pending) = state.pending else {
        return state.clone();
    };
    if pending.choice != PendingChoice::Topdeck {
        return state.clone();
    }

    let current = state.current;
    if hand_index >= state[current].hand.len() {
        return state.clone();
    }

    let mut next = state.clone();
    let card = next[current].take_from_hand(hand_index);
    next[current].deck.push_back(card);

    let name = next[current].name.clone();
    let card_name = Catalog::global().get_unchecked(card).name;
    next.push_log(format!("{name} puts {card_name} on their deck"));
    next.pending = None;
    next
}

/// Abandon a cancelable pending effect.
///
/// Only optional choices the player opened themselves (Cellar, Chapel,
/// Workshop, Throne Room) can be walked away from; forced discards and
/// mid-resolution steps are binding and leave the snapshot unchanged.
#[must_use]
pub fn cancel_pending_effect(state: &GameState) -> GameState {
    let Some(pending) = state.pending else {
        return state.clone();
    };
    if !pending.is_cancelable() {
        return state.clone();
    }
    let mut next = state.clone();
    next.pending = None;
    next
}

/// Indices are a set of in-bounds hand positions.
fn valid_selection(indices: &[usize], hand_size: usize) -> bool {
    if indices.iter().any(|&i| i >= hand_size) {
        return false;
    }
    let mut seen: Vec<usize> = indices.to_vec();
    seen.sort_unstable();
    seen.windows(2).all(|w| w[0] != w[1])
}

/// True when the hand card at `hand_index` is a legal answer to the open
/// choice. Useful for driving a UI's highlighting.
#[must_use]
pub fn can_select_hand_card(state: &GameState, hand_index: usize) -> bool {
    let Some(pending) = state.pending else {
        return false;
    };
    let chooser = pending.chooser(state.current);
    let Some(&id) = state[chooser].hand.get(hand_index) else {
        return false;
    };
    let card = Catalog::global().get_unchecked(id);
    match pending.choice {
        PendingChoice::Discard { .. } | PendingChoice::Trash { .. } | PendingChoice::Topdeck => {
            true
        }
        PendingChoice::TrashThenGain { restriction, .. } => {
            restriction.map_or(true, |ty| card.is(ty))
        }
        PendingChoice::PlayTwice => card.is(CardType::Action),
        PendingChoice::Gain { .. } => false,
    }
}
