//! Accounts and their address books.
//!
//! [`User`] implements [`ActorEntity`](nexora_actor::ActorEntity) in
//! [`crate::user_actor::entity`].

use super::{Address, AddressId, NewAddress, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Seller,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::Admin => "admin",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    /// Only roles a visitor may pick at registration parse; admins are provisioned.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "seller" => Ok(Role::Seller),
            other => Err(format!("unknown role {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullName {
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: FullName,
    pub role: Role,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    next_address: u32,
}

impl User {
    pub fn new(id: UserId, params: UserCreate) -> Self {
        let mut user = Self {
            id,
            username: params.username,
            email: params.email,
            password_hash: params.password_hash,
            full_name: params.full_name,
            role: params.role,
            addresses: Vec::new(),
            created_at: Utc::now(),
            next_address: 1,
        };
        for address in params.addresses {
            user.add_address(address);
        }
        user
    }

    /// Appends an address and keeps exactly one default in the book.
    pub fn add_address(&mut self, new: NewAddress) -> Address {
        let make_default = self.addresses.is_empty() || new.is_default;
        if make_default {
            for existing in &mut self.addresses {
                existing.is_default = false;
            }
        }

        let address = Address {
            id: AddressId(self.next_address),
            street: new.street,
            city: new.city,
            state: new.state,
            pincode: new.pincode,
            country: new.country,
            is_default: make_default,
        };
        self.next_address += 1;
        self.addresses.push(address.clone());
        address
    }

    /// Removes an address; if it was the default, the first remaining one takes over.
    pub fn remove_address(&mut self, id: AddressId) -> Option<Address> {
        let index = self.addresses.iter().position(|a| a.id == id)?;
        let removed = self.addresses.remove(index);
        if removed.is_default {
            if let Some(first) = self.addresses.first_mut() {
                first.is_default = true;
            }
        }
        Some(removed)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }
}

/// Registration payload after validation. The password is already hashed.
#[derive(Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: FullName,
    pub role: Role,
    pub addresses: Vec<NewAddress>,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("addresses", &self.addresses.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(street: &str, is_default: bool) -> NewAddress {
        NewAddress {
            street: street.into(),
            city: "Pune".into(),
            state: "MH".into(),
            pincode: "411001".into(),
            country: "India".into(),
            is_default,
        }
    }

    fn user() -> User {
        User::new(
            UserId(1),
            UserCreate {
                username: "asha".into(),
                email: "asha@example.com".into(),
                password_hash: "$2b$10$hash".into(),
                full_name: FullName {
                    first_name: "Asha".into(),
                    last_name: "Rao".into(),
                },
                role: Role::User,
                addresses: vec![],
            },
        )
    }

    #[test]
    fn first_address_is_default_even_if_not_requested() {
        let mut u = user();
        let a = u.add_address(addr("1 MG Road", false));
        assert!(a.is_default);
        assert_eq!(a.id, AddressId(1));
    }

    #[test]
    fn new_default_clears_the_others() {
        let mut u = user();
        u.add_address(addr("1 MG Road", false));
        u.add_address(addr("2 FC Road", false));
        let third = u.add_address(addr("3 JM Road", true));

        assert_eq!(u.default_address().unwrap().id, third.id);
        assert_eq!(u.addresses.iter().filter(|a| a.is_default).count(), 1);
    }

    #[test]
    fn removing_default_promotes_first_remaining() {
        let mut u = user();
        let first = u.add_address(addr("1 MG Road", false));
        let second = u.add_address(addr("2 FC Road", false));
        u.add_address(addr("3 JM Road", false));

        u.remove_address(first.id).unwrap();
        assert_eq!(u.default_address().unwrap().id, second.id);
        assert!(u.remove_address(first.id).is_none());
    }

    #[test]
    fn password_hash_never_serializes() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["fullName"]["firstName"], "Asha");
        assert_eq!(json["role"], "user");
    }
}
