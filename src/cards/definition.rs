//! Card definitions - static card data.
//!
//! `Card` holds the immutable properties of a card: cost, type tags,
//! treasure value, victory points, and the declared effect. Cards never
//! change after catalog load; all game state references cards by `CardId`.

use serde::{Deserialize, Serialize};

/// Identifier for a card in the base set.
///
/// This identifies the "type" of card (e.g. Silver), not a specific copy
/// in a game. `Ord` gives deterministic iteration for supply scans and
/// AI tie-breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardId {
    // Basic cards
    Copper,
    Silver,
    Gold,
    Estate,
    Duchy,
    Province,
    Curse,
    // Kingdom cards
    Artisan,
    Bandit,
    Bureaucrat,
    Cellar,
    Chapel,
    CouncilRoom,
    Festival,
    Gardens,
    Harbinger,
    Laboratory,
    Library,
    Market,
    Merchant,
    Militia,
    Mine,
    Moat,
    Moneylender,
    Poacher,
    Remodel,
    Sentry,
    Smithy,
    ThroneRoom,
    Vassal,
    Village,
    Witch,
    Workshop,
}

impl CardId {
    /// The seven basic cards present in every game.
    pub const BASIC: [CardId; 7] = [
        CardId::Copper,
        CardId::Silver,
        CardId::Gold,
        CardId::Estate,
        CardId::Duchy,
        CardId::Province,
        CardId::Curse,
    ];

    /// The 26 kingdom cards eligible for random kingdom selection.
    pub const KINGDOM_POOL: [CardId; 26] = [
        CardId::Artisan,
        CardId::Bandit,
        CardId::Bureaucrat,
        CardId::Cellar,
        CardId::Chapel,
        CardId::CouncilRoom,
        CardId::Festival,
        CardId::Gardens,
        CardId::Harbinger,
        CardId::Laboratory,
        CardId::Library,
        CardId::Market,
        CardId::Merchant,
        CardId::Militia,
        CardId::Mine,
        CardId::Moat,
        CardId::Moneylender,
        CardId::Poacher,
        CardId::Remodel,
        CardId::Sentry,
        CardId::Smithy,
        CardId::ThroneRoom,
        CardId::Vassal,
        CardId::Village,
        CardId::Witch,
        CardId::Workshop,
    ];

    /// Check if this is one of the basic (non-kingdom) cards.
    #[must_use]
    pub fn is_basic(self) -> bool {
        Self::BASIC.contains(&self)
    }
}

/// Card type tags.
///
/// A card may carry several tags (Moat is Action + Reaction).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Treasure,
    Victory,
    Action,
    Attack,
    Reaction,
    Curse,
}

/// Attack consequence applied to the non-acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    /// Militia: discard down to 3 cards in hand.
    DiscardToThree,
    /// Witch: gain a Curse.
    Curse,
    /// Bureaucrat: topdeck a Victory card from hand.
    TopdeckVictory,
    /// Bandit: reveal top 2, trash the best non-Copper treasure.
    TrashTreasure,
}

/// Non-primitive card behavior, dispatched by the special-effect handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialKind {
    Artisan,
    Bandit,
    Bureaucrat,
    Cellar,
    Chapel,
    CouncilRoom,
    Harbinger,
    Library,
    Merchant,
    Mine,
    Moneylender,
    Poacher,
    Remodel,
    Sentry,
    ThroneRoom,
    Vassal,
    Workshop,
}

/// Declared effect of an Action card.
///
/// Primitive bonuses are applied in a fixed order (draws, actions, buys,
/// coins), then the attack, then the special behavior. Some specials read
/// counters set by the earlier steps, so the order is load-bearing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectSpec {
    /// Cards to draw.
    pub cards: u32,
    /// Actions to add.
    pub actions: u32,
    /// Buys to add.
    pub buys: u32,
    /// Coins to add.
    pub coins: u32,
    /// Attack on the opponent, if any.
    pub attack: Option<AttackKind>,
    /// Special handler tag, if any.
    pub special: Option<SpecialKind>,
}

impl EffectSpec {
    /// Create an empty effect (builder pattern).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: 0,
            actions: 0,
            buys: 0,
            coins: 0,
            attack: None,
            special: None,
        }
    }

    /// Add card draws.
    #[must_use]
    pub const fn cards(mut self, n: u32) -> Self {
        self.cards = n;
        self
    }

    /// Add actions.
    #[must_use]
    pub const fn actions(mut self, n: u32) -> Self {
        self.actions = n;
        self
    }

    /// Add buys.
    #[must_use]
    pub const fn buys(mut self, n: u32) -> Self {
        self.buys = n;
        self
    }

    /// Add coins.
    #[must_use]
    pub const fn coins(mut self, n: u32) -> Self {
        self.coins = n;
        self
    }

    /// Set the attack tag.
    #[must_use]
    pub const fn attack(mut self, kind: AttackKind) -> Self {
        self.attack = Some(kind);
        self
    }

    /// Set the special handler tag.
    #[must_use]
    pub const fn special(mut self, kind: SpecialKind) -> Self {
        self.special = Some(kind);
        self
    }
}

/// Static card definition.
///
/// Immutable after catalog load. Victory points are the fixed value;
/// `dynamic_vp` cards (Gardens) are scored from total owned cards instead.
#[derive(Clone, Debug)]
pub struct Card {
    /// Identifier of this card.
    pub id: CardId,

    /// Display name.
    pub name: &'static str,

    /// Cost in coins (non-negative).
    pub cost: u32,

    /// Type tags.
    pub types: &'static [CardType],

    /// Coin value when played as a treasure.
    pub coins: u32,

    /// Fixed victory-point value (Curse = -1).
    pub vp: i32,

    /// Scored as 1 VP per 10 owned cards instead of `vp`.
    pub dynamic_vp: bool,

    /// Declared effect when played as an Action.
    pub effect: Option<EffectSpec>,
}

impl Card {
    /// Create a card with no treasure value, no VP, and no effect.
    #[must_use]
    pub const fn new(id: CardId, name: &'static str, cost: u32, types: &'static [CardType]) -> Self {
        Self {
            id,
            name,
            cost,
            types,
            coins: 0,
            vp: 0,
            dynamic_vp: false,
            effect: None,
        }
    }

    /// Set the treasure coin value (builder pattern).
    #[must_use]
    pub const fn treasure(mut self, coins: u32) -> Self {
        self.coins = coins;
        self
    }

    /// Set the fixed victory-point value.
    #[must_use]
    pub const fn victory(mut self, vp: i32) -> Self {
        self.vp = vp;
        self
    }

    /// Mark as dynamically scored (Gardens).
    #[must_use]
    pub const fn dynamic_victory(mut self) -> Self {
        self.dynamic_vp = true;
        self
    }

    /// Attach the declared effect.
    #[must_use]
    pub const fn effect(mut self, spec: EffectSpec) -> Self {
        self.effect = Some(spec);
        self
    }

    /// Check whether this card carries a type tag.
    #[must_use]
    pub fn is(&self, ty: CardType) -> bool {
        self.types.contains(&ty)
    }
}
