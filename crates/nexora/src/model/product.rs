use super::{Currency, Price, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded product picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub thumbnail: String,
    pub id: String,
}

/// A catalogue entry owned by one seller.
///
/// `stock` is only ever checked by the order workflow, never decremented.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub stock: u32,
    pub seller: UserId,
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            title: params.title,
            description: params.description,
            price: params.price,
            stock: params.stock,
            seller: params.seller,
            images: params.images,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match on title or description.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: u32,
    pub seller: UserId,
    pub images: Vec<ProductImage>,
}

/// Owner edits. Only these fields can change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub requested_by: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_amount: Option<f64>,
    pub price_currency: Option<Currency>,
    pub stock: Option<u32>,
}

/// Catalogue search. `None` bounds are open; pagination is applied after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub text: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub seller: Option<UserId>,
    pub skip: usize,
    pub limit: usize,
}

impl ProductQuery {
    pub fn accepts(&self, product: &Product) -> bool {
        if let Some(text) = &self.text {
            if !product.matches_text(text) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price.amount < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price.amount > max) {
            return false;
        }
        self.seller.map_or(true, |seller| product.seller == seller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, description: Option<&str>, amount: f64) -> Product {
        Product::new(
            ProductId(1),
            ProductCreate {
                title: title.into(),
                description: description.map(Into::into),
                price: Price::new(amount, Currency::Inr),
                stock: 3,
                seller: UserId(9),
                images: vec![],
            },
        )
    }

    #[test]
    fn text_match_is_case_insensitive_over_both_fields() {
        let p = product("Handloom Saree", Some("Pure cotton weave"), 1200.0);
        assert!(p.matches_text("saree"));
        assert!(p.matches_text("COTTON"));
        assert!(!p.matches_text("silk"));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let p = product("Lamp", None, 500.0);
        let q = ProductQuery {
            min_price: Some(500.0),
            max_price: Some(500.0),
            ..Default::default()
        };
        assert!(q.accepts(&p));
        let q = ProductQuery {
            min_price: Some(500.01),
            ..Default::default()
        };
        assert!(!q.accepts(&p));
    }

    #[test]
    fn seller_filter() {
        let p = product("Lamp", None, 500.0);
        let mine = ProductQuery {
            seller: Some(UserId(9)),
            ..Default::default()
        };
        let theirs = ProductQuery {
            seller: Some(UserId(2)),
            ..Default::default()
        };
        assert!(mine.accepts(&p));
        assert!(!theirs.accepts(&p));
    }
}
