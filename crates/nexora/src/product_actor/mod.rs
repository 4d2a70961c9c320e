//! # Product Actor
//!
//! The catalogue. Sellers create and edit their own products; shoppers search
//! them; the order workflow asks it to confirm stock with
//! [`ProductAction::CheckStock`], which validates but never reserves.
//!
//! - [`entity`]: [`ActorEntity`](nexora_actor::ActorEntity) implementation for [`Product`]
//! - [`error`]: [`ProductError`]
//! - [`actions`]: [`ProductAction`] and [`ProductActionResult`]
//!
//! ```rust
//! use nexora::clients::ProductClient;
//! use nexora::model::{Currency, Price, ProductCreate, UserId};
//! use nexora::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let dohar = client
//!         .create_product(ProductCreate {
//!             title: "Block-print Dohar".into(),
//!             description: None,
//!             price: Price::new(1499.0, Currency::Inr),
//!             stock: 4,
//!             seller: UserId(1),
//!             images: vec![],
//!         })
//!         .await?;
//!
//!     assert!(client.check_stock(dohar.id, 4).await.is_ok());
//!     assert!(client.check_stock(dohar.id, 5).await.is_err());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use nexora_actor::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
