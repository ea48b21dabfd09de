use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies that an inbound notification was signed by the provider.
///
/// Behind a trait so the dispatcher can be exercised with a stand-in
/// verifier in tests.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `true` only when `provided_b64` matches the expected digest
    /// for this exact request. A mismatch is a normal outcome, not an error.
    fn verify(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        body: &[u8],
        provided_b64: &str,
    ) -> bool;
}

/// HMAC-SHA256 over the provider's canonical message, compared in constant
/// time.
pub struct HmacSha256Verifier {
    secret: Vec<u8>,
}

impl HmacSha256Verifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Base64-encoded HMAC-SHA256 digest of the canonical message. This is
    /// the value the provider puts in the signature header.
    pub fn compute(&self, method: &str, path: &str, timestamp: &str, body: &[u8]) -> String {
        let message = canonical_message(method, path, timestamp, body);
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(message.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }
}

impl SignatureVerifier for HmacSha256Verifier {
    fn verify(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        body: &[u8],
        provided_b64: &str,
    ) -> bool {
        let expected = self.compute(method, path, timestamp, body);
        constant_time_eq(expected.as_bytes(), provided_b64.as_bytes())
    }
}

/// The exact byte string the signature covers: the body is base64-encoded so
/// the digest covers the raw bytes, not a re-serialized JSON rendering.
pub fn canonical_message(method: &str, path: &str, timestamp: &str, body: &[u8]) -> String {
    format!("{method}.{path}.{timestamp}.{}", BASE64.encode(body))
}

/// Length mismatch short-circuits, but equal-length comparison goes through
/// `subtle` so the cost does not depend on where the first difference sits.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "test_key";
    const PATH: &str = "/wp_webhook";
    const TS: &str = "1700000000";

    #[test]
    fn matches_reference_digest() {
        // Reference vector computed with the provider's published algorithm:
        // HMAC-SHA256("test_key", "POST./wp_webhook.1700000000.W10=")
        let verifier = HmacSha256Verifier::new(KEY);
        let expected = "nDFNDGQDqVR5W75d3vaybH9S+Xh8xttVx6P+w7sJnv8=";
        assert_eq!(verifier.compute("POST", PATH, TS, b"[]"), expected);
        assert!(verifier.verify("POST", PATH, TS, b"[]", expected));
    }

    #[test]
    fn canonical_message_joins_with_dots() {
        assert_eq!(
            canonical_message("POST", PATH, TS, b"[]"),
            "POST./wp_webhook.1700000000.W10="
        );
    }

    #[test]
    fn accepts_own_computation_for_arbitrary_inputs() {
        let verifier = HmacSha256Verifier::new("another key");
        let body = br#"[{"eventId":"1"}]"#;
        let sig = verifier.compute("POST", "/hooks/in", "ts-header", body);
        assert!(verifier.verify("POST", "/hooks/in", "ts-header", body, &sig));
    }

    #[test]
    fn rejects_any_mutated_input() {
        let verifier = HmacSha256Verifier::new(KEY);
        let body = br#"[{"eventId":"1"}]"#.to_vec();
        let sig = verifier.compute("POST", PATH, TS, &body);

        let mut flipped = body.clone();
        flipped[3] ^= 0x01;
        assert!(!verifier.verify("POST", PATH, TS, &flipped, &sig));
        assert!(!verifier.verify("GET", PATH, TS, &body, &sig));
        assert!(!verifier.verify("POST", "/other", TS, &body, &sig));
        assert!(!verifier.verify("POST", PATH, "1700000001", &body, &sig));

        let mut bad_sig = sig.into_bytes();
        bad_sig[0] ^= 0x01;
        let bad_sig = String::from_utf8(bad_sig).unwrap();
        assert!(!verifier.verify("POST", PATH, TS, &body, &bad_sig));
    }

    #[test]
    fn rejects_wrong_key() {
        let signer = HmacSha256Verifier::new("key_a");
        let verifier = HmacSha256Verifier::new("key_b");
        let sig = signer.compute("POST", PATH, TS, b"[]");
        assert!(!verifier.verify("POST", PATH, TS, b"[]", &sig));
    }

    #[test]
    fn rejects_length_mismatch() {
        let verifier = HmacSha256Verifier::new(KEY);
        assert!(!verifier.verify("POST", PATH, TS, b"[]", ""));
        assert!(!verifier.verify("POST", PATH, TS, b"[]", "short"));
    }
}
