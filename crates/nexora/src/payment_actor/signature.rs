//! Razorpay checkout signatures: hex HMAC-SHA256 of `"<order_id>|<payment_id>"`
//! keyed with the account's key secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str, gateway_order_id: &str, payment_id: &str) -> HmacSha256 {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 takes any key length"),
    };
    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}

pub fn sign(secret: &str, gateway_order_id: &str, payment_id: &str) -> String {
    hex::encode(mac(secret, gateway_order_id, payment_id).finalize().into_bytes())
}

/// Constant-time comparison; malformed hex is simply invalid.
pub fn verify(secret: &str, gateway_order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    mac(secret, gateway_order_id, payment_id)
        .verify_slice(&expected)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_round_trips() {
        let sig = sign("s3cret", "order_Nx1", "pay_77");
        assert_eq!(sig.len(), 64);
        assert!(verify("s3cret", "order_Nx1", "pay_77", &sig));
    }

    #[test]
    fn any_changed_input_fails() {
        let sig = sign("s3cret", "order_Nx1", "pay_77");
        assert!(!verify("other", "order_Nx1", "pay_77", &sig));
        assert!(!verify("s3cret", "order_Nx2", "pay_77", &sig));
        assert!(!verify("s3cret", "order_Nx1", "pay_78", &sig));
        assert!(!verify("s3cret", "order_Nx1", "pay_77", "not-hex"));
    }

    #[test]
    fn separator_is_part_of_the_message() {
        // "a|bc" and "ab|c" must not collide.
        assert_ne!(sign("k", "a", "bc"), sign("k", "ab", "c"));
    }
}
