use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Logged-out tokens. Entries expire after `ttl`, by which time the token has
/// expired on its own.
#[derive(Debug)]
pub struct TokenDenylist {
    entries: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl TokenDenylist {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn revoke(&self, token: &str) {
        let now = Instant::now();
        let mut entries = self.lock();
        entries.retain(|_, expires| *expires > now);
        entries.insert(token.to_string(), now + self.ttl);
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.lock()
            .get(token)
            .is_some_and(|expires| *expires > Instant::now())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Instant>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_tokens_stay_revoked_until_ttl() {
        let list = TokenDenylist::new(Duration::from_secs(60));
        list.revoke("abc");
        assert!(list.is_revoked("abc"));
        assert!(!list.is_revoked("abd"));
    }

    #[test]
    fn entries_lapse_after_ttl() {
        let list = TokenDenylist::new(Duration::ZERO);
        list.revoke("abc");
        assert!(!list.is_revoked("abc"));
    }
}
