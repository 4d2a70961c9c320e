use super::error::AuthError;
use crate::model::{Role, User, UserId};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// What a session token carries. `exp` is seconds since the epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub exp: u64,
}

/// HS256 tokens signed with the shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let exp = (Utc::now().timestamp().max(0) as u64).saturating_add(self.ttl.as_secs());
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Issue(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FullName, UserCreate};

    fn user() -> User {
        User::new(
            UserId(3),
            UserCreate {
                username: "ravi".into(),
                email: "ravi@example.com".into(),
                password_hash: String::new(),
                full_name: FullName {
                    first_name: "Ravi".into(),
                    last_name: "K".into(),
                },
                role: Role::Seller,
                addresses: vec![],
            },
        )
    }

    #[test]
    fn issued_tokens_verify_with_the_same_secret() {
        let tokens = TokenService::new("secret", Duration::from_secs(60));
        let token = tokens.issue(&user()).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, UserId(3));
        assert_eq!(claims.role, Role::Seller);
        assert_eq!(claims.email, "ravi@example.com");
    }

    #[test]
    fn other_secrets_and_garbage_are_rejected() {
        let token = TokenService::new("secret", Duration::from_secs(60))
            .issue(&user())
            .unwrap();
        let other = TokenService::new("different", Duration::from_secs(60));

        assert_eq!(other.verify(&token), Err(AuthError::InvalidToken));
        assert_eq!(other.verify("not.a.jwt"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let tokens = TokenService::new("secret", Duration::ZERO);
        let expired = Claims {
            sub: UserId(3),
            username: "ravi".into(),
            email: "ravi@example.com".into(),
            role: Role::User,
            exp: 1,
        };
        let token = encode(&Header::default(), &expired, &tokens.encoding).unwrap();
        assert_eq!(tokens.verify(&token), Err(AuthError::InvalidToken));
    }
}
