//! Plain data for every marketplace resource. The actor behaviour lives in the
//! `*_actor` modules.

mod address;
mod cart;
mod ids;
mod money;
mod order;
mod payment;
mod product;
mod user;

pub use address::*;
pub use cart::*;
pub use ids::*;
pub use money::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use user::*;
