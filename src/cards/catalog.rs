//! The base-set card catalog.
//!
//! The `Catalog` stores every card definition and provides lookup by
//! `CardId`. It is immutable, built once per process, and shared through
//! `Catalog::global()`. A missing id on a lookup marks corrupted game
//! state and panics rather than surfacing a recoverable error.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::definition::{AttackKind, Card, CardId, CardType, EffectSpec, SpecialKind};
use crate::core::GameRng;

/// Number of kingdom piles in a game.
pub const KINGDOM_SIZE: usize = 10;

static GLOBAL: OnceLock<Catalog> = OnceLock::new();

/// Registry of all card definitions in the base set.
#[derive(Clone, Debug)]
pub struct Catalog {
    cards: FxHashMap<CardId, Card>,
}

impl Catalog {
    /// Get the process-wide catalog, building it on first use.
    #[must_use]
    pub fn global() -> &'static Catalog {
        GLOBAL.get_or_init(Catalog::base_set)
    }

    /// Get a card definition by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a card definition, panicking if absent.
    ///
    /// Well-formed game state only ever holds registered ids, so a miss
    /// here is an engine bug, not a user error.
    #[must_use]
    pub fn get_unchecked(&self, id: CardId) -> &Card {
        self.cards.get(&id).expect("card not found in catalog")
    }

    /// Check whether a card carries a type tag.
    #[must_use]
    pub fn has_type(&self, id: CardId, ty: CardType) -> bool {
        self.get_unchecked(id).is(ty)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Pick `KINGDOM_SIZE` kingdom cards uniformly without replacement.
    #[must_use]
    pub fn select_kingdom(rng: &mut GameRng) -> Vec<CardId> {
        let mut pool = CardId::KINGDOM_POOL.to_vec();
        rng.shuffle(&mut pool);
        pool.truncate(KINGDOM_SIZE);
        pool
    }

    /// Build the base set.
    fn base_set() -> Self {
        use CardId::*;
        use CardType::{Action, Attack, Curse as CurseType, Reaction, Treasure, Victory};

        let mut cards = FxHashMap::default();
        let mut add = |card: Card| {
            let prev = cards.insert(card.id, card);
            assert!(prev.is_none(), "duplicate card registration");
        };

        // Treasures
        add(Card::new(Copper, "Copper", 0, &[Treasure]).treasure(1));
        add(Card::new(Silver, "Silver", 3, &[Treasure]).treasure(2));
        add(Card::new(Gold, "Gold", 6, &[Treasure]).treasure(3));

        // Victory and Curse
        add(Card::new(Estate, "Estate", 2, &[Victory]).victory(1));
        add(Card::new(Duchy, "Duchy", 5, &[Victory]).victory(3));
        add(Card::new(Province, "Province", 8, &[Victory]).victory(6));
        add(Card::new(Curse, "Curse", 0, &[CurseType]).victory(-1));
        add(Card::new(Gardens, "Gardens", 4, &[Victory]).dynamic_victory());

        // Plain action cards
        add(Card::new(Moat, "Moat", 2, &[Action, Reaction]).effect(EffectSpec::new().cards(2)));
        add(Card::new(Village, "Village", 3, &[Action])
            .effect(EffectSpec::new().cards(1).actions(2)));
        add(Card::new(Smithy, "Smithy", 4, &[Action]).effect(EffectSpec::new().cards(3)));
        add(Card::new(Festival, "Festival", 5, &[Action])
            .effect(EffectSpec::new().actions(2).buys(1).coins(2)));
        add(Card::new(Laboratory, "Laboratory", 5, &[Action])
            .effect(EffectSpec::new().cards(2).actions(1)));
        add(Card::new(Market, "Market", 5, &[Action])
            .effect(EffectSpec::new().cards(1).actions(1).buys(1).coins(1)));

        // Specials
        add(Card::new(Cellar, "Cellar", 2, &[Action])
            .effect(EffectSpec::new().actions(1).special(SpecialKind::Cellar)));
        add(Card::new(Chapel, "Chapel", 2, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::Chapel)));
        add(Card::new(Harbinger, "Harbinger", 3, &[Action])
            .effect(EffectSpec::new().cards(1).actions(1).special(SpecialKind::Harbinger)));
        add(Card::new(Merchant, "Merchant", 3, &[Action])
            .effect(EffectSpec::new().cards(1).actions(1).special(SpecialKind::Merchant)));
        add(Card::new(Vassal, "Vassal", 3, &[Action])
            .effect(EffectSpec::new().coins(2).special(SpecialKind::Vassal)));
        add(Card::new(Workshop, "Workshop", 3, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::Workshop)));
        add(Card::new(Moneylender, "Moneylender", 4, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::Moneylender)));
        add(Card::new(Poacher, "Poacher", 4, &[Action])
            .effect(EffectSpec::new().cards(1).actions(1).coins(1).special(SpecialKind::Poacher)));
        add(Card::new(Remodel, "Remodel", 4, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::Remodel)));
        add(Card::new(ThroneRoom, "Throne Room", 4, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::ThroneRoom)));
        add(Card::new(CouncilRoom, "Council Room", 5, &[Action])
            .effect(EffectSpec::new().cards(4).buys(1).special(SpecialKind::CouncilRoom)));
        add(Card::new(Library, "Library", 5, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::Library)));
        add(Card::new(Mine, "Mine", 5, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::Mine)));
        add(Card::new(Sentry, "Sentry", 5, &[Action])
            .effect(EffectSpec::new().cards(1).actions(1).special(SpecialKind::Sentry)));
        add(Card::new(Artisan, "Artisan", 6, &[Action])
            .effect(EffectSpec::new().special(SpecialKind::Artisan)));

        // Attacks
        add(Card::new(Bureaucrat, "Bureaucrat", 4, &[Action, Attack]).effect(
            EffectSpec::new()
                .attack(AttackKind::TopdeckVictory)
                .special(SpecialKind::Bureaucrat),
        ));
        add(Card::new(Militia, "Militia", 4, &[Action, Attack])
            .effect(EffectSpec::new().coins(2).attack(AttackKind::DiscardToThree)));
        add(Card::new(Bandit, "Bandit", 5, &[Action, Attack]).effect(
            EffectSpec::new()
                .attack(AttackKind::TrashTreasure)
                .special(SpecialKind::Bandit),
        ));
        add(Card::new(Witch, "Witch", 5, &[Action, Attack])
            .effect(EffectSpec::new().cards(2).attack(AttackKind::Curse)));

        Self { cards }
    }
}
