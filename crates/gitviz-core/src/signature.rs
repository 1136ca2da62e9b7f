// Webhook signature verification

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Verifies a GitHub webhook signature using constant-time comparison.
///
/// GitHub sends `X-Hub-Signature: sha1=<hex>`. This function validates the
/// HMAC-SHA1 of the raw request body against that header value. Missing
/// prefix, bad hex, and digest mismatch all return false.
pub fn verify(secret: &str, body: &[u8], signature_header: &str) -> bool {
    let hex_sig = match signature_header.strip_prefix("sha1=") {
        Some(s) => s,
        None => return false,
    };

    let Ok(expected) = hex::decode(hex_sig) else {
        return false;
    };

    let Ok(mut mac) = HmacSha1::new_from_slice(secret.as_bytes()) else {
        return false;
    };

    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Computes the `sha1=<hex>` signature for a payload.
///
/// The receiver only ever verifies; this is for tests and tooling that need
/// to sign a request the way GitHub would.
pub fn compute(secret: &str, body: &[u8]) -> String {
    // new_from_slice only fails for unusable key lengths, which HMAC does not have
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signature_passes() {
        let sig = compute("test-secret", b"hello world");
        assert!(verify("test-secret", b"hello world", &sig));
    }

    #[test]
    fn wrong_secret_fails() {
        let sig = compute("correct-secret", b"body");
        assert!(!verify("wrong-secret", b"body", &sig));
    }

    #[test]
    fn tampered_body_fails() {
        let sig = compute("secret", b"original body");
        assert!(!verify("secret", b"tampered body", &sig));
    }

    #[test]
    fn missing_sha1_prefix_fails() {
        let sig = compute("secret", b"body");
        let raw_hex = sig.strip_prefix("sha1=").unwrap().to_string();
        assert!(!verify("secret", b"body", &raw_hex));
    }

    #[test]
    fn empty_header_fails() {
        assert!(!verify("secret", b"body", ""));
    }

    #[test]
    fn invalid_hex_fails() {
        assert!(!verify("secret", b"body", "sha1=not-valid-hex!"));
    }

    #[test]
    fn empty_body_with_valid_sig_passes() {
        let sig = compute("secret", b"");
        assert!(verify("secret", b"", &sig));
    }
}
