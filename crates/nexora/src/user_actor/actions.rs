//! Address-book actions on a [`User`](crate::model::User).

use crate::model::{Address, AddressId, NewAddress};

#[derive(Debug, Clone)]
pub enum UserAction {
    AddAddress(NewAddress),
    RemoveAddress(AddressId),
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    /// The stored address, with its ID and final default flag.
    AddressAdded(Address),
    /// The address book after removal.
    AddressRemoved(Vec<Address>),
}
