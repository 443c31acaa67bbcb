//! Upgrade shop
//!
//! A fixed three-slot catalog over the player's gold and inventory. The shop
//! holds no stock of its own: a purchase debits gold and applies the item
//! effect directly to the player. Every invalid purchase (closed shop, short
//! gold, dash already owned) is a silent rejection with no state change.

use super::state::Player;
use crate::consts::*;

/// Purchasable slots, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopSlot {
    Potion,
    Bomb,
    Dash,
}

/// A catalog entry
#[derive(Debug, Clone, Copy)]
pub struct ShopItem {
    pub slot: ShopSlot,
    pub price: u32,
    pub description: &'static str,
}

/// The full catalog; index order matches the buy-slot boundary commands
pub const CATALOG: [ShopItem; 3] = [
    ShopItem {
        slot: ShopSlot::Potion,
        price: POTION_PRICE,
        description: "Healing potion (+30 HP)",
    },
    ShopItem {
        slot: ShopSlot::Bomb,
        price: BOMB_PRICE,
        description: "Bomb (clears nearby enemies)",
    },
    ShopItem {
        slot: ShopSlot::Dash,
        price: DASH_PRICE,
        description: "Dash boots (speed burst, one-time)",
    },
];

/// Open/closed toggle plus transaction processing
#[derive(Debug, Clone)]
pub struct Shop {
    open: bool,
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}

impl Shop {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip between Closed and Open (explicit boundary command)
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Catalog entry for a slot (declaration order matches the catalog)
    pub fn item(slot: ShopSlot) -> &'static ShopItem {
        &CATALOG[slot as usize]
    }

    /// Attempt a purchase. Returns whether the transaction went through; a
    /// rejection leaves gold and inventory untouched.
    pub fn buy(&self, slot: ShopSlot, player: &mut Player) -> bool {
        if !self.open {
            return false;
        }
        let item = Self::item(slot);
        if slot == ShopSlot::Dash && player.has_dash {
            return false;
        }
        if player.gold < item.price {
            return false;
        }

        player.gold -= item.price;
        match slot {
            ShopSlot::Potion => player.potions += 1,
            ShopSlot::Bomb => player.bombs += 1,
            ShopSlot::Dash => player.has_dash = true,
        }
        log::debug!("Bought {:?} for {} gold, {} left", slot, item.price, player.gold);
        true
    }
}
