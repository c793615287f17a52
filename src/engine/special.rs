//! Special-effect handlers.
//!
//! One handler per card whose behavior goes beyond the primitive bonuses.
//! Each handler forks on the acting player: the scripted opponent resolves
//! in one step with a fixed heuristic, a human player gets a
//! `PendingEffect` and the resolution completes through the choice
//! operations.

use std::cmp::Reverse;

use smallvec::SmallVec;

use crate::cards::{Catalog, CardId, CardType, SpecialKind};
use crate::core::{
    GainTo, GameState, PendingChoice, PendingEffect, PlayerId, SelectCount,
};

use super::effects::{apply_effect, gain_card};

/// Hand size an opponent is knocked down to by Militia.
pub(crate) const MILITIA_HAND_SIZE: usize = 3;

/// Most cards Chapel may trash.
const CHAPEL_LIMIT: usize = 4;

/// Library draws until the hand holds this many cards.
const LIBRARY_HAND_SIZE: usize = 7;

/// Dispatch a special effect for the current player.
pub(crate) fn handle_special(state: &mut GameState, kind: SpecialKind, source: CardId) {
    let current = state.current;
    let is_ai = state.current_player().is_ai;

    match kind {
        SpecialKind::Moneylender => moneylender(state),
        SpecialKind::Merchant => state.merchant_bonus = true,

        SpecialKind::Cellar => {
            if is_ai {
                ai_cellar(state);
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::Discard {
                        player: current,
                        count: SelectCount::AnyNumber,
                        redraw: true,
                    },
                ));
            }
        }

        SpecialKind::Chapel => {
            if is_ai {
                ai_chapel(state);
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::Trash { up_to: CHAPEL_LIMIT },
                ));
            }
        }

        SpecialKind::Workshop => {
            if is_ai {
                ai_workshop(state);
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::Gain {
                        max_cost: 4,
                        to: GainTo::Discard,
                        restriction: None,
                        then_topdeck: false,
                    },
                ));
            }
        }

        SpecialKind::Remodel => {
            if is_ai {
                ai_remodel(state);
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::TrashThenGain {
                        cost_bonus: 2,
                        restriction: None,
                        to: GainTo::Discard,
                    },
                ));
            }
        }

        SpecialKind::Mine => {
            if is_ai {
                ai_mine(state);
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::TrashThenGain {
                        cost_bonus: 3,
                        restriction: Some(CardType::Treasure),
                        to: GainTo::Hand,
                    },
                ));
            }
        }

        SpecialKind::Artisan => {
            if is_ai {
                ai_artisan(state);
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::Gain {
                        max_cost: 5,
                        to: GainTo::Hand,
                        restriction: None,
                        then_topdeck: true,
                    },
                ));
            }
        }

        SpecialKind::Bureaucrat => {
            let name = state.current_player().name.clone();
            if gain_card(state, current, CardId::Silver, GainTo::DeckTop) {
                state.push_log(format!("{name} gains a Silver onto their deck"));
            }
        }

        SpecialKind::Bandit => {
            let name = state.current_player().name.clone();
            if gain_card(state, current, CardId::Gold, GainTo::Discard) {
                state.push_log(format!("{name} gains a Gold"));
            }
        }

        SpecialKind::CouncilRoom => {
            let other = current.opponent();
            state.players[other.index()].draw(1, &mut state.rng);
            let name = state[other].name.clone();
            state.push_log(format!("{name} draws a card"));
        }

        SpecialKind::Library => {
            let short = LIBRARY_HAND_SIZE.saturating_sub(state.current_player().hand.len());
            if short > 0 {
                state.players[current.index()].draw(short, &mut state.rng);
                let name = state.current_player().name.clone();
                state.push_log(format!("{name} draws to {LIBRARY_HAND_SIZE} cards"));
            }
        }

        SpecialKind::Vassal => vassal(state),
        SpecialKind::Harbinger => harbinger(state),
        SpecialKind::Sentry => sentry(state),

        SpecialKind::Poacher => {
            let empty = state.supply.empty_piles();
            let hand_size = state.current_player().hand.len();
            let to_discard = empty.min(hand_size);
            if to_discard == 0 {
                return;
            }
            if is_ai {
                let discarded = discard_worst(state, current, to_discard);
                let name = state.current_player().name.clone();
                state.push_log(format!("{name} discards {discarded} cards (Poacher)"));
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::Discard {
                        player: current,
                        count: SelectCount::Exactly(to_discard),
                        redraw: false,
                    },
                ));
            }
        }

        SpecialKind::ThroneRoom => {
            if is_ai {
                ai_throne_room(state);
            } else {
                state.pending = Some(PendingEffect::new(source, PendingChoice::PlayTwice));
            }
        }
    }
}

/// Moneylender: no human/AI distinction - trash one Copper for +$3.
fn moneylender(state: &mut GameState) {
    let current = state.current;
    let Some(idx) = state[current].hand.iter().position(|&c| c == CardId::Copper) else {
        return;
    };
    let copper = state[current].take_from_hand(idx);
    state.trash.push_back(copper);
    state.coins += 3;
    let name = state[current].name.clone();
    state.push_log(format!("{name} trashes a Copper for +$3"));
}

/// Vassal: discard the deck top; the scripted opponent auto-plays it if it
/// is an Action. (The human "may play it" choice is not modeled.)
fn vassal(state: &mut GameState) {
    let current = state.current;
    if state[current].deck.is_empty() {
        if state[current].discard.is_empty() {
            return;
        }
        state.players[current.index()].reshuffle_discard(&mut state.rng);
    }
    let Some(top) = state[current].deck.pop_back() else {
        return;
    };
    state[current].discard.push_back(top);

    let card = Catalog::global().get_unchecked(top);
    let name = state[current].name.clone();
    state.push_log(format!("{name} discards {}", card.name));

    if card.is(CardType::Action) && state[current].is_ai {
        let _ = state[current].discard.pop_back();
        state[current].play_area.push_back(top);
        if let Some(effect) = card.effect {
            apply_effect(state, &effect, top);
        }
    }
}

/// Harbinger, scripted opponent only: move the most expensive discard-pile
/// card to the deck top.
fn harbinger(state: &mut GameState) {
    let current = state.current;
    if !state[current].is_ai || state[current].discard.is_empty() {
        return;
    }
    let catalog = Catalog::global();
    let best = state[current]
        .discard
        .iter()
        .enumerate()
        .max_by_key(|(_, &id)| catalog.get_unchecked(id).cost)
        .map(|(i, _)| i)
        .expect("discard is non-empty");
    let card = state[current].discard.remove(best);
    state[current].deck.push_back(card);
    let name = state[current].name.clone();
    state.push_log(format!("{name} topdecks {}", catalog.get_unchecked(card).name));
}

/// Sentry, scripted opponent only: reveal the top 2, trash junk among
/// them, return the rest to the deck top.
fn sentry(state: &mut GameState) {
    let current = state.current;
    if !state[current].is_ai {
        return;
    }
    let mut revealed: SmallVec<[CardId; 2]> = SmallVec::new();
    for _ in 0..2 {
        if let Some(card) = state[current].deck.pop_back() {
            revealed.push(card);
        }
    }
    let (junk, keep): (SmallVec<[CardId; 2]>, SmallVec<[CardId; 2]>) = revealed
        .into_iter()
        .partition(|&id| matches!(id, CardId::Copper | CardId::Curse | CardId::Estate));

    for card in keep {
        state[current].deck.push_back(card);
    }
    let trashed = junk.len();
    for card in junk {
        state.trash.push_back(card);
    }
    if trashed > 0 {
        let name = state[current].name.clone();
        state.push_log(format!("{name} trashes {trashed} cards with Sentry"));
    }
}

fn ai_cellar(state: &mut GameState) {
    let current = state.current;
    let catalog = Catalog::global();
    let junk: Vec<usize> = state[current]
        .hand
        .iter()
        .enumerate()
        .filter(|(_, &id)| {
            catalog.has_type(id, CardType::Victory) || catalog.has_type(id, CardType::Curse)
        })
        .map(|(i, _)| i)
        .collect();
    if junk.is_empty() {
        return;
    }
    let count = junk.len();
    for &idx in junk.iter().rev() {
        let card = state[current].take_from_hand(idx);
        state[current].discard.push_back(card);
    }
    state.players[current.index()].draw(count, &mut state.rng);
    let name = state[current].name.clone();
    state.push_log(format!("{name} discards {count} cards and draws {count}"));
}

/// Chapel heuristic: trash up to 4 junk cards, Copper before Estate
/// before Curse.
fn ai_chapel(state: &mut GameState) {
    let current = state.current;
    let mut trashed = 0;
    for target in [CardId::Copper, CardId::Estate, CardId::Curse] {
        while trashed < CHAPEL_LIMIT {
            let Some(idx) = state[current].hand.iter().position(|&c| c == target) else {
                break;
            };
            let card = state[current].take_from_hand(idx);
            state.trash.push_back(card);
            trashed += 1;
        }
    }
    if trashed > 0 {
        let name = state[current].name.clone();
        state.push_log(format!("{name} trashes {trashed} cards"));
    }
}

/// Workshop heuristic: the first of Silver, Village, Smithy still in
/// supply.
fn ai_workshop(state: &mut GameState) {
    let current = state.current;
    let pick = [CardId::Silver, CardId::Village, CardId::Smithy]
        .into_iter()
        .find(|&id| state.supply.available(id));
    if let Some(id) = pick {
        gain_card(state, current, id, GainTo::Discard);
        let name = state[current].name.clone();
        state.push_log(format!(
            "{name} gains {}",
            Catalog::global().get_unchecked(id).name
        ));
    }
}

fn ai_remodel(state: &mut GameState) {
    let current = state.current;
    if state[current].hand.is_empty() {
        return;
    }
    let catalog = Catalog::global();
    let worst = state[current]
        .hand
        .iter()
        .enumerate()
        .min_by_key(|(_, &id)| catalog.get_unchecked(id).cost)
        .map(|(i, _)| i)
        .expect("hand is non-empty");
    let trashed = state[current].take_from_hand(worst);
    state.trash.push_back(trashed);
    let max_cost = catalog.get_unchecked(trashed).cost + 2;

    if let Some(best) = best_affordable(state, max_cost, None) {
        gain_card(state, current, best, GainTo::Discard);
        let name = state[current].name.clone();
        state.push_log(format!(
            "{name} remodels {} into {}",
            catalog.get_unchecked(trashed).name,
            catalog.get_unchecked(best).name
        ));
    }
}

/// Mine heuristic: Silver to Gold, otherwise Copper to Silver.
fn ai_mine(state: &mut GameState) {
    let current = state.current;
    let upgrade = [(CardId::Silver, CardId::Gold), (CardId::Copper, CardId::Silver)]
        .into_iter()
        .find(|&(from, to)| state[current].hand.contains(&from) && state.supply.available(to));
    let Some((from, to)) = upgrade else {
        return;
    };
    let idx = state[current]
        .hand
        .iter()
        .position(|&c| c == from)
        .expect("upgrade source is in hand");
    let trashed = state[current].take_from_hand(idx);
    state.trash.push_back(trashed);
    gain_card(state, current, to, GainTo::Hand);

    let catalog = Catalog::global();
    let name = state[current].name.clone();
    state.push_log(format!(
        "{name} mines {} into {}",
        catalog.get_unchecked(from).name,
        catalog.get_unchecked(to).name
    ));
}

/// Artisan heuristic: gain the best card up to $5 to hand, then topdeck
/// the cheapest card in the resulting hand. The $5 ceiling already rules
/// out Gold.
fn ai_artisan(state: &mut GameState) {
    let current = state.current;
    let Some(gained) = best_affordable(state, 5, None) else {
        return;
    };
    gain_card(state, current, gained, GainTo::Hand);

    let catalog = Catalog::global();
    let cheapest = state[current]
        .hand
        .iter()
        .enumerate()
        .min_by_key(|(_, &id)| catalog.get_unchecked(id).cost)
        .map(|(i, _)| i)
        .expect("hand holds at least the gained card");
    let put_back = state[current].take_from_hand(cheapest);
    state[current].deck.push_back(put_back);

    let name = state[current].name.clone();
    state.push_log(format!(
        "{name} gains {} and topdecks a card",
        catalog.get_unchecked(gained).name
    ));
}

fn ai_throne_room(state: &mut GameState) {
    let current = state.current;
    let catalog = Catalog::global();
    let best = state[current]
        .hand
        .iter()
        .enumerate()
        .filter(|(_, &id)| catalog.has_type(id, CardType::Action))
        .max_by_key(|(_, &id)| catalog.get_unchecked(id).cost)
        .map(|(i, _)| i);
    let Some(idx) = best else {
        return;
    };
    let played = state[current].take_from_hand(idx);
    state[current].play_area.push_back(played);

    let card = catalog.get_unchecked(played);
    let name = state[current].name.clone();
    state.push_log(format!("{name} plays {} twice with Throne Room", card.name));

    if let Some(effect) = card.effect {
        apply_effect(state, &effect, played);
        apply_effect(state, &effect, played);
    }
}

/// Most expensive supply card costing at most `max_cost`, optionally
/// filtered by type. Ties break toward the lower `CardId` for determinism.
pub(crate) fn best_affordable(
    state: &GameState,
    max_cost: u32,
    restriction: Option<CardType>,
) -> Option<CardId> {
    let catalog = Catalog::global();
    state
        .supply
        .iter()
        .filter(|&(id, count)| {
            count > 0
                && catalog.get_unchecked(id).cost <= max_cost
                && restriction.map_or(true, |ty| catalog.has_type(id, ty))
        })
        .max_by_key(|&(id, _)| (catalog.get_unchecked(id).cost, Reverse(id)))
        .map(|(id, _)| id)
}

/// Discard the lowest-priority cards first: Victory and Curse cards, then
/// ascending cost. Used by the Militia and Poacher heuristics.
pub(crate) fn discard_worst(state: &mut GameState, player: PlayerId, count: usize) -> usize {
    let catalog = Catalog::global();
    let mut discarded = 0;
    while discarded < count && !state[player].hand.is_empty() {
        let worst = state[player]
            .hand
            .iter()
            .enumerate()
            .min_by_key(|(_, &id)| {
                let card = catalog.get_unchecked(id);
                let junk = card.is(CardType::Victory) || card.is(CardType::Curse);
                (!junk, card.cost)
            })
            .map(|(i, _)| i)
            .expect("hand is non-empty");
        let card = state[player].take_from_hand(worst);
        state[player].discard.push_back(card);
        discarded += 1;
    }
    discarded
}

/// Scripted-opponent Militia response: discard down to `target` cards.
pub(crate) fn ai_discard_down_to(state: &mut GameState, player: PlayerId, target: usize) {
    let excess = state[player].hand.len().saturating_sub(target);
    let discarded = discard_worst(state, player, excess);
    let name = state[player].name.clone();
    state.push_log(format!("{name} discards {discarded} cards"));
}
