//! Webhook signature verification

use hex::decode as hex_decode;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::error;

// Nexus signs with HMAC-SHA1; kept for wire compatibility.
type HmacSha1 = Hmac<Sha1>;

/// Verifies the webhook signature the repository sent along with the payload.
///
/// `provided_hex` is the lowercase hex digest from the signature header.
/// Returns `false` on any decoding or computation error; the caller treats
/// a broken signature the same as a mismatched one.
pub fn verify_signature(secret: &str, payload: &[u8], provided_hex: &str) -> bool {
    let mut mac = match HmacSha1::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);

    match hex_decode(provided_hex) {
        // verify_slice is a constant-time comparison
        Ok(provided_bytes) => mac.verify_slice(&provided_bytes).is_ok(),
        Err(_) => {
            error!("Signature header is not valid hex");
            false
        }
    }
}

/// Computes the lowercase hex HMAC-SHA1 digest for a payload.
/// What a correctly configured repository would put in the signature header.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 2202 HMAC-SHA1 test case 1
    #[test]
    fn rfc2202_case_1() {
        let key = String::from_utf8(vec![0x0b; 20]).unwrap();
        assert!(verify_signature(
            &key,
            b"Hi There",
            "b617318655057264e28bc0b6fb378c8ef146be00"
        ));
    }

    // RFC 2202 HMAC-SHA1 test case 2
    #[test]
    fn rfc2202_case_2() {
        assert!(verify_signature(
            "Jefe",
            b"what do ya want for nothing?",
            "effcbf48b04cb01935ad0833722342968c1bdcb4"
        ));
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let secret = "test-secret-key";
        let payload = b"{\"repositoryName\":\"maven-releases\"}";
        let hex_sig = sign_payload(secret, payload);
        assert!(verify_signature(secret, payload, &hex_sig));
    }

    #[test]
    fn mismatched_digest_is_rejected() {
        let secret = "test-secret-key";
        let payload = b"some payload";
        let mut hex_sig = sign_payload(secret, payload);
        // flip one nibble
        let last = hex_sig.pop().unwrap();
        hex_sig.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_signature(secret, payload, &hex_sig));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let payload = b"some payload";
        let hex_sig = sign_payload("secret-1", payload);
        assert!(!verify_signature("secret-2", payload, &hex_sig));
    }

    #[test]
    fn non_hex_signature_is_rejected() {
        assert!(!verify_signature("secret", b"payload", "not hex at all"));
    }
}
