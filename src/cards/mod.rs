//! Card definitions and the base-set catalog.

pub mod catalog;
pub mod definition;

pub use catalog::{Catalog, KINGDOM_SIZE};
pub use definition::{AttackKind, Card, CardId, CardType, EffectSpec, SpecialKind};
