//! Phase and turn transitions.
//!
//! `go_to_buy_phase` auto-plays every treasure in hand, `buy_card` spends
//! coins and buys, and `end_turn` runs cleanup, passes the turn, and
//! checks the end conditions. All three reject calls while a pending
//! effect is open or after the game has ended.

use crate::cards::{Catalog, CardId, CardType};
use crate::core::{GainTo, GameOutcome, GameState, Phase, PlayerId};

use super::effects::gain_card;
use super::score::victory_points;
use super::setup::HAND_SIZE;

/// Piles (besides Province) whose depletion ends the game.
const EMPTY_PILES_TO_END: usize = 3;

/// Leave the Action phase: move every treasure in hand to the play area
/// and bank their coins.
///
/// Merchant's bonus pays out here, once, if at least one Silver was
/// played. Legal only in the Action phase with no pending effect open.
#[must_use]
pub fn go_to_buy_phase(state: &GameState) -> GameState {
    if state.is_over() || state.phase != Phase::Action || state.pending.is_some() {
        return state.clone();
    }

    let mut next = state.clone();
    let current = next.current;
    let catalog = Catalog::global();

    let mut gained = 0;
    let mut played_silver = false;
    let mut idx = 0;
    while idx < next[current].hand.len() {
        let id = next[current].hand[idx];
        if catalog.has_type(id, CardType::Treasure) {
            let card = next[current].take_from_hand(idx);
            next[current].play_area.push_back(card);
            gained += catalog.get_unchecked(card).coins;
            played_silver |= card == CardId::Silver;
        } else {
            idx += 1;
        }
    }
    next.coins += gained;
    next.phase = Phase::Buy;

    let name = next[current].name.clone();
    next.push_log(format!("{name} plays treasures for ${gained}"));

    if next.merchant_bonus && played_silver {
        next.coins += 1;
        next.merchant_bonus = false;
        next.push_log("Merchant bonus: +$1".to_string());
    }
    next
}

/// Buy one card from supply.
///
/// Needs the Buy phase, a remaining buy, enough coins, a non-empty pile,
/// and no pending effect. The card lands in the discard pile.
#[must_use]
pub fn buy_card(state: &GameState, id: CardId) -> GameState {
    if state.is_over() || state.phase != Phase::Buy || state.pending.is_some() || state.buys == 0 {
        return state.clone();
    }
    let card = Catalog::global().get_unchecked(id);
    if card.cost > state.coins || !state.supply.available(id) {
        return state.clone();
    }

    let mut next = state.clone();
    let current = next.current;
    gain_card(&mut next, current, id, GainTo::Discard);
    next.coins -= card.cost;
    next.buys -= 1;

    let name = next[current].name.clone();
    next.push_log(format!("{name} buys {}", card.name));
    next
}

/// Clean up and pass the turn.
///
/// Hand and play area go to the discard pile, a fresh hand of five is
/// drawn, counters reset, and the other player becomes current. The turn
/// number advances when play wraps back to the first player. End
/// conditions are checked after cleanup, so a pile emptied this turn ends
/// the game before the opponent acts.
#[must_use]
pub fn end_turn(state: &GameState) -> GameState {
    if state.is_over() || state.pending.is_some() {
        return state.clone();
    }

    let mut next = state.clone();
    let current = next.current;

    let hand = std::mem::take(&mut next[current].hand);
    let play_area = std::mem::take(&mut next[current].play_area);
    next[current].discard.append(hand);
    next[current].discard.append(play_area);
    next.players[current.index()].draw(HAND_SIZE, &mut next.rng);

    next.current = current.opponent();
    next.phase = Phase::Action;
    next.actions = 1;
    next.buys = 1;
    next.coins = 0;
    next.merchant_bonus = false;
    if next.current == PlayerId::FIRST {
        next.turn += 1;
    }

    let name = next.current_player().name.clone();
    let turn = next.turn;
    next.push_log(format!("--- Turn {turn}: {name}'s turn ---"));

    check_game_over(&mut next);
    next
}

/// End the game if the Province pile or any three piles are empty.
fn check_game_over(state: &mut GameState) {
    let provinces_gone = !state.supply.available(CardId::Province);
    if !provinces_gone && state.supply.empty_piles() < EMPTY_PILES_TO_END {
        return;
    }

    let scores = [
        victory_points(&state.players[0]),
        victory_points(&state.players[1]),
    ];
    state.outcome = Some(match scores[0].cmp(&scores[1]) {
        std::cmp::Ordering::Greater => GameOutcome::Winner(PlayerId::FIRST),
        std::cmp::Ordering::Less => GameOutcome::Winner(PlayerId::SECOND),
        std::cmp::Ordering::Equal => GameOutcome::Tie,
    });

    let summary = format!(
        "Game Over! Scores: {}: {}, {}: {}",
        state.players[0].name, scores[0], state.players[1].name, scores[1]
    );
    state.push_log(summary);
    match state.outcome {
        Some(GameOutcome::Winner(winner)) => {
            let name = state[winner].name.clone();
            state.push_log(format!("{name} wins!"));
        }
        Some(GameOutcome::Tie) => state.push_log("It's a tie!".to_string()),
        None => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PendingChoice, PendingEffect, SelectCount};
    use crate::engine::setup::new_game;

    #[test]
    fn test_buy_phase_plays_all_treasures() {
        let mut state = new_game(42);
        state.players[0].hand =
            im::vector![CardId::Copper, CardId::Estate, CardId::Copper, CardId::Silver];

        let next = go_to_buy_phase(&state);

        assert_eq!(next.phase, Phase::Buy);
        assert_eq!(next.coins, 1 + 1 + 2);
        assert_eq!(next.players[0].hand, im::vector![CardId::Estate]);
        assert_eq!(next.players[0].play_area.len(), 3);
    }

    #[test]
    fn test_merchant_bonus_pays_once() {
        let mut state = new_game(42);
        state.merchant_bonus = true;
        state.players[0].hand = im::vector![CardId::Silver, CardId::Silver];

        let next = go_to_buy_phase(&state);

        assert_eq!(next.coins, 4 + 1);
        assert!(!next.merchant_bonus);
    }

    #[test]
    fn test_merchant_bonus_needs_silver() {
        let mut state = new_game(42);
        state.merchant_bonus = true;
        state.players[0].hand = im::vector![CardId::Copper];

        let next = go_to_buy_phase(&state);

        assert_eq!(next.coins, 1);
        assert!(next.merchant_bonus); // unspent; cleared at end of turn
    }

    #[test]
    fn test_buy_decrements_and_gains() {
        let mut state = new_game(42);
        state.phase = Phase::Buy;
        state.coins = 3;

        let next = buy_card(&state, CardId::Silver);

        assert_eq!(next.coins, 0);
        assert_eq!(next.buys, 0);
        assert_eq!(next.players[0].discard, im::vector![CardId::Silver]);
        assert_eq!(next.supply.count(CardId::Silver), 39);

        // No buys left.
        let again = buy_card(&next, CardId::Copper);
        assert_eq!(again, next);
    }

    #[test]
    fn test_buy_rejects_unaffordable() {
        let mut state = new_game(42);
        state.phase = Phase::Buy;
        state.coins = 5;

        let next = buy_card(&state, CardId::Gold);
        assert_eq!(next, state);
    }

    #[test]
    fn test_buy_rejects_in_action_phase() {
        let mut state = new_game(42);
        state.coins = 9;

        let next = buy_card(&state, CardId::Copper);
        assert_eq!(next, state);
    }

    #[test]
    fn test_end_turn_cleanup_and_handoff() {
        let mut state = new_game(42);
        state.players[0].play_area = im::vector![CardId::Village];
        state.coins = 5;
        state.phase = Phase::Buy;

        let next = end_turn(&state);

        assert_eq!(next.current, PlayerId::SECOND);
        assert_eq!(next.phase, Phase::Action);
        assert_eq!(next.actions, 1);
        assert_eq!(next.buys, 1);
        assert_eq!(next.coins, 0);
        assert_eq!(next.turn, 1); // wraps only on return to the first player
        assert_eq!(next.players[0].hand.len(), 5);
        assert!(next.players[0].play_area.is_empty());
        // 5 old hand cards + 1 play-area card discarded, then 5 redrawn
        // from a 5-card deck leaves the discard as-is.
        assert_eq!(next.players[0].discard.len(), 6);
    }

    #[test]
    fn test_turn_counter_wraps() {
        let state = new_game(42);
        let after_first = end_turn(&state);
        let after_second = end_turn(&after_first);

        assert_eq!(after_second.current, PlayerId::FIRST);
        assert_eq!(after_second.turn, 2);
    }

    #[test]
    fn test_end_turn_blocked_by_pending() {
        let mut state = new_game(42);
        state.pending = Some(PendingEffect::new(
            CardId::Militia,
            PendingChoice::Discard {
                player: PlayerId::SECOND,
                count: SelectCount::Exactly(2),
                redraw: false,
            },
        ));

        let next = end_turn(&state);
        assert_eq!(next, state);
    }

    #[test]
    fn test_province_pile_empty_ends_game() {
        let mut state = new_game(42);
        state.supply.insert(CardId::Province, 0);

        let next = end_turn(&state);

        assert!(next.is_over());
        // Equal starting decks score 3 VP each.
        assert_eq!(next.outcome, Some(GameOutcome::Tie));
        assert!(next.log.last().unwrap().contains("tie"));
    }

    #[test]
    fn test_three_empty_piles_end_game() {
        let mut state = new_game(42);
        state.supply.insert(CardId::Curse, 0);
        state.supply.insert(CardId::Estate, 0);

        let running = end_turn(&state);
        assert!(!running.is_over());

        state.supply.insert(CardId::Duchy, 0);
        let over = end_turn(&state);
        assert!(over.is_over());
    }

    #[test]
    fn test_winner_by_score() {
        let mut state = new_game(42);
        state.supply.insert(CardId::Province, 0);
        state.players[0].discard.push_back(CardId::Duchy);

        let next = end_turn(&state);

        assert_eq!(next.outcome, Some(GameOutcome::Winner(PlayerId::FIRST)));
        assert!(next.log.last().unwrap().contains("wins"));
    }

    #[test]
    fn test_game_over_freezes_transitions() {
        let mut state = new_game(42);
        state.supply.insert(CardId::Province, 0);
        let over = end_turn(&state);
        assert!(over.is_over());

        assert_eq!(end_turn(&over), over);
        assert_eq!(go_to_buy_phase(&over), over);
        assert_eq!(buy_card(&over, CardId::Copper), over);
    }
}
