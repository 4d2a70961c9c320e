use super::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A shopper's cart. There is at most one per user, keyed by the user's ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user: UserId,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
}

impl Cart {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.items.len(),
            total_quantity: self.items.iter().map(|i| u64::from(i.quantity)).sum(),
        }
    }

    /// Increments an existing line or appends a new one.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id,
                quantity,
            }),
        }
        self.updated_at = Utc::now();
    }

    /// Returns `false` when the product has no line in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        let Some(line) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            return false;
        };
        line.quantity = quantity;
        self.updated_at = Utc::now();
        true
    }

    /// Returns `false` when the product has no line in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() == before {
            return false;
        }
        self.updated_at = Utc::now();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CartCreate {
    pub user: UserId,
}
