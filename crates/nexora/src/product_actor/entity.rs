//! [`ActorEntity`] implementation for [`Product`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use nexora_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        Ok(Product::new(id, params))
    }

    /// Applies owner edits.
    ///
    /// # Fields Updated
    /// - `title`, `description`
    /// - `price.amount`, `price.currency`
    /// - `stock`
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if update.requested_by != self.seller {
            return Err(ProductError::ForbiddenUpdate);
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(amount) = update.price_amount {
            self.price.amount = amount;
        }
        if let Some(currency) = update.price_currency {
            self.price.currency = currency;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock(requested) => {
                if self.stock < requested {
                    return Err(ProductError::OutOfStock {
                        title: self.title.clone(),
                        requested,
                        available: self.stock,
                    });
                }
                Ok(ProductActionResult::CheckStock(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Currency, Price, UserId};

    fn product(stock: u32) -> Product {
        Product::new(
            ProductId(1),
            ProductCreate {
                title: "Brass Diya".into(),
                description: None,
                price: Price::new(250.0, Currency::Inr),
                stock,
                seller: UserId(5),
                images: vec![],
            },
        )
    }

    fn edit(by: u32) -> ProductUpdate {
        ProductUpdate {
            requested_by: UserId(by),
            title: Some("Brass Diya (pair)".into()),
            description: None,
            price_amount: Some(450.0),
            price_currency: None,
            stock: None,
        }
    }

    #[tokio::test]
    async fn check_stock_never_decrements() {
        let mut p = product(3);
        let ProductActionResult::CheckStock(snapshot) =
            p.handle_action(ProductAction::CheckStock(3), &()).await.unwrap();
        assert_eq!(snapshot.stock, 3);
        assert_eq!(p.stock, 3);
    }

    #[tokio::test]
    async fn check_stock_rejects_shortfall() {
        let mut p = product(2);
        let err = p
            .handle_action(ProductAction::CheckStock(3), &())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product Brass Diya is out of stock");
    }

    #[tokio::test]
    async fn owner_edits_apply_and_keep_currency() {
        let mut p = product(2);
        p.on_update(edit(5), &()).await.unwrap();
        assert_eq!(p.title, "Brass Diya (pair)");
        assert_eq!(p.price.amount, 450.0);
        assert_eq!(p.price.currency, Currency::Inr);
    }

    #[tokio::test]
    async fn other_sellers_cannot_edit() {
        let mut p = product(2);
        assert_eq!(
            p.on_update(edit(6), &()).await.unwrap_err(),
            ProductError::ForbiddenUpdate
        );
        assert_eq!(p.title, "Brass Diya");
    }
}
