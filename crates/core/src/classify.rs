//! Item classifier.
//!
//! Maps one uniform draw in `[0, 1)` to an item. The draw is partitioned as
//! `[0, coin_p)` → coin, `[coin_p, coin_p + bomb_p)` → bomb, the rest → fruit.
//! Inside the fruit band the draw is rescaled to pick the fruit token, so a
//! uniform draw yields a uniform token and the whole function stays
//! deterministic in its single input.

use crate::types::{ItemKind, BOMB_P, BOMB_TOKEN, COIN_P, COIN_TOKEN, FRUIT_TOKENS};

/// An item with its display token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub kind: ItemKind,
    pub token: &'static str,
}

impl Item {
    pub const fn new(kind: ItemKind, token: &'static str) -> Self {
        Self { kind, token }
    }
}

/// Classify with the default 20/30/50 split.
///
/// # Examples
///
/// ```
/// use tui_fruit_whack_core::classify;
/// use tui_fruit_whack_core::types::ItemKind;
///
/// assert_eq!(classify(0.1).kind, ItemKind::Coin);
/// assert_eq!(classify(0.2).kind, ItemKind::Bomb);
/// assert_eq!(classify(0.5).kind, ItemKind::Fruit);
/// assert_eq!(classify(0.1).token, "🪙");
/// ```
pub fn classify(draw: f64) -> Item {
    classify_with(draw, COIN_P, BOMB_P)
}

/// Classify with explicit coin and bomb probabilities.
pub fn classify_with(draw: f64, coin_p: f64, bomb_p: f64) -> Item {
    if draw < coin_p {
        return Item::new(ItemKind::Coin, COIN_TOKEN);
    }
    let fruit_floor = coin_p + bomb_p;
    if draw < fruit_floor {
        return Item::new(ItemKind::Bomb, BOMB_TOKEN);
    }
    Item::new(ItemKind::Fruit, fruit_token(draw, fruit_floor))
}

fn fruit_token(draw: f64, fruit_floor: f64) -> &'static str {
    let band = 1.0 - fruit_floor;
    if band <= 0.0 {
        return FRUIT_TOKENS[0];
    }
    let pos = ((draw - fruit_floor) / band * FRUIT_TOKENS.len() as f64) as usize;
    FRUIT_TOKENS[pos.min(FRUIT_TOKENS.len() - 1)]
}
