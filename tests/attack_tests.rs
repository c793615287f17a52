//! Attack and reaction behavior through the public API.

use provincial::cards::CardId;
use provincial::engine::{discard_cards, play_action, GameSetup};
use provincial::{GameState, PendingChoice, PlayerId};

fn attack_game() -> GameState {
    GameSetup::new(42)
        .kingdom(vec![
            CardId::Militia,
            CardId::Witch,
            CardId::Bureaucrat,
            CardId::Bandit,
            CardId::Moat,
            CardId::Village,
            CardId::Smithy,
            CardId::Market,
            CardId::Cellar,
            CardId::Festival,
        ])
        .opponent_is_ai(false)
        .build()
}

fn give_and_play(state: &GameState, card: CardId) -> GameState {
    let mut state = state.clone();
    let player = state.current.index();
    state.players[player].hand.push_back(card);
    play_action(&state, state.players[player].hand.len() - 1)
}

#[test]
fn militia_forces_discard_to_three() {
    let state = attack_game();
    assert_eq!(state.players[1].hand.len(), 5);

    let state = give_and_play(&state, CardId::Militia);

    assert_eq!(state.coins, 2);
    let pending = state.pending.expect("defender must discard");
    assert_eq!(
        pending.choice,
        PendingChoice::Discard {
            player: PlayerId::SECOND,
            count: provincial::core::SelectCount::Exactly(2),
            redraw: false,
        }
    );

    // Wrong count leaves the snapshot alone.
    let rejected = discard_cards(&state, &[0]);
    assert_eq!(rejected, state);

    let next = discard_cards(&state, &[0, 4]);
    assert!(next.pending.is_none());
    assert_eq!(next.players[1].hand.len(), 3);
    assert_eq!(next.players[1].discard.len(), 2);
}

#[test]
fn militia_skips_small_hands() {
    let mut state = attack_game();
    state.players[1].hand = im::Vector::from(vec![CardId::Copper; 3]);

    let next = give_and_play(&state, CardId::Militia);

    assert!(next.pending.is_none());
    assert_eq!(next.players[1].hand.len(), 3);
}

#[test]
fn moat_blocks_militia() {
    let mut state = attack_game();
    state.players[1].hand.push_back(CardId::Moat);

    let next = give_and_play(&state, CardId::Militia);

    // The attacker still gets the coins; the defender keeps all 6 cards.
    assert_eq!(next.coins, 2);
    assert!(next.pending.is_none());
    assert_eq!(next.players[1].hand.len(), 6);
    assert!(next.log.iter().any(|l| l.contains("blocks the attack")));
}

#[test]
fn witch_hands_out_a_curse() {
    let state = attack_game();
    let curses_before = state.supply.count(CardId::Curse);

    let next = give_and_play(&state, CardId::Witch);

    assert_eq!(next.supply.count(CardId::Curse), curses_before - 1);
    assert!(next.players[1].discard.contains(&CardId::Curse));
}

#[test]
fn witch_with_empty_curse_pile() {
    let mut state = attack_game();
    state.supply.insert(CardId::Curse, 0);

    let next = give_and_play(&state, CardId::Witch);

    assert!(next.players[1].discard.is_empty());
    assert!(next.log.iter().any(|l| l.contains("Curse pile is empty")));
}

#[test]
fn moat_blocks_witch_without_leaving_hand() {
    let mut state = attack_game();
    state.players[1].hand.push_back(CardId::Moat);
    let curses_before = state.supply.count(CardId::Curse);

    let next = give_and_play(&state, CardId::Witch);

    assert_eq!(next.supply.count(CardId::Curse), curses_before);
    assert!(next.players[1].hand.contains(&CardId::Moat));
    assert!(next.players[1].discard.is_empty());
}

#[test]
fn bureaucrat_gains_silver_and_topdecks_victory() {
    let mut state = attack_game();
    state.players[1].hand = im::vector![CardId::Copper, CardId::Estate, CardId::Duchy];

    let next = give_and_play(&state, CardId::Bureaucrat);

    // Attacker's Silver goes on top of their deck.
    assert_eq!(next.players[0].deck.back(), Some(&CardId::Silver));
    // Defender topdecks the first Victory card found.
    assert_eq!(next.players[1].deck.back(), Some(&CardId::Estate));
    assert_eq!(next.players[1].hand.len(), 2);
}

#[test]
fn bandit_trashes_best_revealed_treasure() {
    let mut state = attack_game();
    state.players[1].deck = im::vector![CardId::Estate, CardId::Silver, CardId::Gold];

    let next = give_and_play(&state, CardId::Bandit);

    // Attacker gains a Gold.
    assert!(next.players[0].discard.contains(&CardId::Gold));
    // Defender reveals Gold and Silver; the Gold is trashed.
    assert_eq!(next.trash, im::vector![CardId::Gold]);
    assert_eq!(next.players[1].discard, im::vector![CardId::Silver]);
}

#[test]
fn bandit_reshuffles_a_thin_deck() {
    let mut state = attack_game();
    state.players[1].deck = im::vector![CardId::Gold];
    state.players[1].discard = im::vector![CardId::Silver, CardId::Copper];

    let next = give_and_play(&state, CardId::Bandit);

    // Two cards were revealed even though the deck held one.
    let defender = &next.players[1];
    assert_eq!(defender.deck.len() + defender.discard.len(), 2);
    assert_eq!(next.trash.len(), 1);
}
