//! The attack resolver.
//!
//! Attacks always target the single non-acting player. A Reaction card
//! (Moat) in the defender's hand negates the attack outright: it is
//! revealed, not played or discarded, and only a log entry is produced.

use smallvec::SmallVec;

use crate::cards::{AttackKind, Catalog, CardId, CardType};
use crate::core::{GainTo, GameState, PendingChoice, PendingEffect, SelectCount};

use super::effects::gain_card;
use super::special::{ai_discard_down_to, MILITIA_HAND_SIZE};

/// Apply an attack from `source` to the opponent of the current player.
pub(crate) fn apply_attack(state: &mut GameState, kind: AttackKind, source: CardId) {
    let defender = state.current.opponent();

    if state[defender].hand.contains(&CardId::Moat) {
        let name = state[defender].name.clone();
        state.push_log(format!("{name} reveals Moat and blocks the attack!"));
        return;
    }

    match kind {
        AttackKind::DiscardToThree => {
            let hand_size = state[defender].hand.len();
            if hand_size <= MILITIA_HAND_SIZE {
                return;
            }
            if state[defender].is_ai {
                ai_discard_down_to(state, defender, MILITIA_HAND_SIZE);
            } else {
                state.pending = Some(PendingEffect::new(
                    source,
                    PendingChoice::Discard {
                        player: defender,
                        count: SelectCount::Exactly(hand_size - MILITIA_HAND_SIZE),
                        redraw: false,
                    },
                ));
            }
        }

        AttackKind::Curse => {
            let name = state[defender].name.clone();
            if gain_card(state, defender, CardId::Curse, GainTo::Discard) {
                state.push_log(format!("{name} gains a Curse"));
            } else {
                state.push_log(format!("{name} is spared: the Curse pile is empty"));
            }
        }

        AttackKind::TopdeckVictory => {
            let victory = state[defender]
                .hand
                .iter()
                .position(|&id| Catalog::global().has_type(id, CardType::Victory));
            let name = state[defender].name.clone();
            match victory {
                Some(idx) => {
                    let card = state[defender].take_from_hand(idx);
                    state[defender].deck.push_back(card);
                    let card_name = Catalog::global().get_unchecked(card).name;
                    state.push_log(format!("{name} puts {card_name} on their deck"));
                }
                None => state.push_log(format!("{name} reveals no Victory cards")),
            }
        }

        AttackKind::TrashTreasure => {
            bandit_attack(state);
        }
    }
}

/// Bandit: reveal the defender's top 2 cards, trash the most expensive
/// non-Copper treasure among them, discard the rest.
fn bandit_attack(state: &mut GameState) {
    let defender = state.current.opponent();

    // Top up the deck before revealing; the reshuffled discard goes on top
    // of whatever was already there.
    if state[defender].deck.len() < 2 && !state[defender].discard.is_empty() {
        let old_deck = std::mem::take(&mut state.players[defender.index()].deck);
        state.players[defender.index()].reshuffle_discard(&mut state.rng);
        let reshuffled = std::mem::take(&mut state.players[defender.index()].deck);
        state.players[defender.index()].deck = old_deck + reshuffled;
    }

    let mut revealed: SmallVec<[CardId; 2]> = SmallVec::new();
    for _ in 0..2 {
        if let Some(card) = state[defender].deck.pop_back() {
            revealed.push(card);
        }
    }

    let catalog = Catalog::global();
    let (mut treasures, others): (SmallVec<[CardId; 2]>, SmallVec<[CardId; 2]>) = revealed
        .into_iter()
        .partition(|&id| catalog.has_type(id, CardType::Treasure) && id != CardId::Copper);

    let name = state[defender].name.clone();
    if treasures.is_empty() {
        for card in others {
            state[defender].discard.push_back(card);
        }
        return;
    }

    treasures.sort_by_key(|&id| std::cmp::Reverse(catalog.get_unchecked(id).cost));
    let trashed = treasures.remove(0);
    state.trash.push_back(trashed);
    for card in treasures.into_iter().chain(others) {
        state[defender].discard.push_back(card);
    }
    let trashed_name = catalog.get_unchecked(trashed).name;
    state.push_log(format!("{name} trashes {trashed_name}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::setup::new_game;

    #[test]
    fn test_moat_blocks() {
        let mut state = new_game(42);
        state.players[1].hand.push_back(CardId::Moat);
        let curses_before = state.supply.count(CardId::Curse);
        let hand_before = state.players[1].hand.clone();

        apply_attack(&mut state, AttackKind::Curse, CardId::Witch);

        assert_eq!(state.supply.count(CardId::Curse), curses_before);
        assert_eq!(state.players[1].hand, hand_before);
        assert!(state.log.last().unwrap().contains("blocks the attack"));
    }

    #[test]
    fn test_bureaucrat_topdecks_first_victory() {
        let mut state = new_game(42);
        state.players[1].hand = im::vector![CardId::Copper, CardId::Duchy, CardId::Estate];

        apply_attack(&mut state, AttackKind::TopdeckVictory, CardId::Bureaucrat);

        assert_eq!(state.players[1].deck.back(), Some(&CardId::Duchy));
        assert_eq!(state.players[1].hand.len(), 2);
    }

    #[test]
    fn test_bureaucrat_no_victory_logs() {
        let mut state = new_game(42);
        state.players[1].hand = im::vector![CardId::Copper, CardId::Copper];

        apply_attack(&mut state, AttackKind::TopdeckVictory, CardId::Bureaucrat);

        assert!(state.log.last().unwrap().contains("no Victory cards"));
    }

    #[test]
    fn test_bandit_trashes_best_treasure() {
        let mut state = new_game(42);
        state.players[1].deck = im::vector![CardId::Estate, CardId::Silver, CardId::Gold];

        apply_attack(&mut state, AttackKind::TrashTreasure, CardId::Bandit);

        // Gold and Silver revealed; Gold trashed, Silver discarded.
        assert_eq!(state.trash, im::vector![CardId::Gold]);
        assert_eq!(state.players[1].discard, im::vector![CardId::Silver]);
        assert_eq!(state.players[1].deck, im::vector![CardId::Estate]);
    }

    #[test]
    fn test_bandit_spares_copper() {
        let mut state = new_game(42);
        state.players[1].deck = im::vector![CardId::Copper, CardId::Copper];

        apply_attack(&mut state, AttackKind::TrashTreasure, CardId::Bandit);

        assert!(state.trash.is_empty());
        assert_eq!(state.players[1].discard.len(), 2);
    }
}
