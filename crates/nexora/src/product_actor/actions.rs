use crate::model::Product;

#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Validates that the given number of units is on hand. Stock is left as is;
    /// a shortfall answers `OutOfStock`.
    CheckStock(u32),
}

/// One variant per [`ProductAction`].
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// Snapshot of the product the check passed against, so the caller prices
    /// from the same state it validated.
    CheckStock(Product),
}
