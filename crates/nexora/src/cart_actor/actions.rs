use crate::model::ProductId;

/// Line edits. Every action answers with the cart as it stands afterwards.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Increments an existing line or appends a new one.
    AddItem { product_id: ProductId, quantity: u32 },
    SetQuantity { product_id: ProductId, quantity: u32 },
    RemoveItem(ProductId),
    Clear,
}
