//! Victory-point accounting.

use crate::cards::Catalog;
use crate::core::Player;

/// Cards per victory point for Gardens.
const GARDENS_DIVISOR: usize = 10;

/// Total victory points across all of a player's zones.
///
/// Fixed values come straight off the cards (Curse counts -1). Gardens is
/// worth one point per ten cards owned, rounded down, counted against the
/// full deck at the moment of scoring.
#[must_use]
pub fn victory_points(player: &Player) -> i32 {
    let catalog = Catalog::global();
    let total = player.total_cards();

    player
        .all_cards()
        .map(|id| {
            let card = catalog.get_unchecked(id);
            if card.dynamic_vp {
                (total / GARDENS_DIVISOR) as i32
            } else {
                card.vp
            }
        })
        .sum()
}
