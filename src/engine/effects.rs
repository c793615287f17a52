//! The effect resolver.
//!
//! `apply_effect` interprets a card's declared `EffectSpec` against the
//! snapshot in a fixed order: draws, +actions, +buys, +coins, then the
//! attack, then the special handler. Specials may read counters the
//! earlier steps wrote, so the order is part of the contract.

use crate::cards::{Catalog, CardId, CardType, EffectSpec};
use crate::core::{GainTo, GameState, PendingChoice, Phase, PlayerId};

use super::attack::apply_attack;
use super::special::handle_special;

/// Play the Action card at `hand_index` from the current player's hand.
///
/// Normal play costs one action and is legal only in the Action phase with
/// no pending effect open. While a Throne Room choice is pending, this
/// operation instead resolves that choice: the selected Action is played
/// twice without consuming an action. Illegal calls return the snapshot
/// unchanged.
#[must_use]
pub fn play_action(state: &GameState, hand_index: usize) -> GameState {
    if let Some(pending) = state.pending {
        if pending.choice == PendingChoice::PlayTwice {
            return play_twice(state, hand_index);
        }
        return state.clone();
    }

    if state.is_over() || state.phase != Phase::Action || state.actions == 0 {
        return state.clone();
    }
    let Some(&card_id) = state.current_player().hand.get(hand_index) else {
        return state.clone();
    };
    let card = Catalog::global().get_unchecked(card_id);
    if !card.is(CardType::Action) {
        return state.clone();
    }

    let mut next = state.clone();
    let current = next.current;
    let played = next[current].take_from_hand(hand_index);
    next[current].play_area.push_back(played);
    next.actions -= 1;

    let name = next[current].name.clone();
    next.push_log(format!("{name} plays {}", card.name));

    if let Some(effect) = card.effect {
        apply_effect(&mut next, &effect, card_id);
    }
    next
}

/// Resolve a pending Throne Room: play the chosen Action twice.
fn play_twice(state: &GameState, hand_index: usize) -> GameState {
    let Some(&card_id) = state.current_player().hand.get(hand_index) else {
        return state.clone();
    };
    let card = Catalog::global().get_unchecked(card_id);
    if !card.is(CardType::Action) {
        return state.clone();
    }

    let mut next = state.clone();
    let current = next.current;
    let played = next[current].take_from_hand(hand_index);
    next[current].play_area.push_back(played);
    next.pending = None;

    let name = next[current].name.clone();
    next.push_log(format!("{name} plays {} twice with Throne Room", card.name));

    if let Some(effect) = card.effect {
        // Bonuses apply twice independently; the second draw batch sees
        // whatever the first one left in the deck and discard.
        apply_effect(&mut next, &effect, card_id);
        apply_effect(&mut next, &effect, card_id);
    }
    next
}

/// Apply a declared effect for the current player.
pub(crate) fn apply_effect(state: &mut GameState, effect: &EffectSpec, source: CardId) {
    if effect.cards > 0 {
        let current = state.current;
        state.players[current.index()].draw(effect.cards as usize, &mut state.rng);
    }
    state.actions += effect.actions;
    state.buys += effect.buys;
    state.coins += effect.coins;

    if let Some(attack) = effect.attack {
        apply_attack(state, attack, source);
    }
    if let Some(special) = effect.special {
        handle_special(state, special, source);
    }
}

/// Move one card from supply to a player's zone.
///
/// Returns false (and leaves the state untouched) when the pile is empty
/// or absent; gaining is always gated on availability.
pub(crate) fn gain_card(state: &mut GameState, player: PlayerId, id: CardId, to: GainTo) -> bool {
    if !state.supply.available(id) {
        return false;
    }
    state.supply.take(id);
    let slot = &mut state.players[player.index()];
    match to {
        GainTo::Discard => slot.discard.push_back(id),
        GainTo::Hand => slot.hand.push_back(id),
        GainTo::DeckTop => slot.deck.push_back(id),
    }
    true
}
