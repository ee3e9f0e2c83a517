//! Org-resolution token decryption.
//!
//! Dashboard links carry an opaque token identifying the requesting
//! organization: `<payloadPart>.<keyPart>`, both halves URL-safe Base64
//! (padding optional). `keyPart` is an unencrypted PKCS#8 DER RSA
//! private key; `payloadPart` is 256 bytes of RSA-OAEP(SHA-1)-wrapped
//! AES-256 key, a 16-byte IV, and the AES-256-CBC ciphertext of a small
//! serialized map carrying `org_id`. The wire layout is an interop
//! contract with the platform's link generator and must stay bit-exact.
//!
//! Failures are typed internally ([`TokenError`]) so the cause stays
//! debuggable, but the public resolver collapses every failure to the
//! sentinel [`OrgId::EMPTY`] — token trouble must never surface as an
//! error to the transport layer.

use aes::Aes256;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Oaep, RsaPrivateKey};
use sha1::Sha1;

use crate::domain::OrgId;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// RSA-2048 wraps the AES key into exactly this many bytes.
const WRAPPED_KEY_LEN: usize = 256;

/// AES-CBC initialization vector length.
const IV_LEN: usize = 16;

/// Stages at which token decryption can fail.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Token has no `.` separator and is not a bare numeric org id.
    #[error("token is neither split nor a bare org id")]
    Malformed,

    /// One of the Base64 halves did not decode.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Payload shorter than wrapped key + IV.
    #[error("payload truncated: {0} bytes")]
    Truncated(usize),

    /// The key half is not a PKCS#8 RSA private key.
    #[error("private key parse failed: {0}")]
    KeyParse(#[from] rsa::pkcs8::Error),

    /// RSA-OAEP unwrap of the AES key failed.
    #[error("AES key unwrap failed: {0}")]
    KeyUnwrap(#[from] rsa::Error),

    /// Unwrapped key or IV had the wrong length for AES-256-CBC.
    #[error("cipher parameter length invalid")]
    CipherParams,

    /// AES decryption or PKCS#7 unpadding failed.
    #[error("payload decryption failed")]
    Decrypt,

    /// Decrypted payload is not UTF-8.
    #[error("payload is not valid UTF-8")]
    Utf8,

    /// Decrypted payload carries no usable `org_id`.
    #[error("payload has no org_id")]
    OrgIdMissing,
}

/// Decrypts an org token into the organization id it names.
///
/// A token without the `.` separator is treated as a bare numeric org
/// id (legacy links pass the id in the clear).
///
/// # Errors
///
/// Returns a [`TokenError`] naming the stage that failed; callers that
/// must not fail use [`resolve_org`] instead.
pub fn decrypt_org_token(token: &str) -> Result<OrgId, TokenError> {
    let Some((payload_part, key_part)) = token.split_once('.') else {
        return token
            .trim()
            .parse::<i64>()
            .map(OrgId::new)
            .map_err(|_| TokenError::Malformed);
    };

    let combined = decode_base64url(payload_part)?;
    let key_bytes = decode_base64url(key_part)?;

    if combined.len() < WRAPPED_KEY_LEN + IV_LEN {
        return Err(TokenError::Truncated(combined.len()));
    }
    let (wrapped_key, rest) = combined.split_at(WRAPPED_KEY_LEN);
    let (iv, ciphertext) = rest.split_at(IV_LEN);

    let private_key = RsaPrivateKey::from_pkcs8_der(&key_bytes)?;
    let aes_key = private_key.decrypt(Oaep::new::<Sha1>(), wrapped_key)?;

    let decryptor = Aes256CbcDec::new_from_slices(&aes_key, iv)
        .map_err(|_| TokenError::CipherParams)?;
    let plaintext = decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| TokenError::Decrypt)?;

    let text = String::from_utf8(plaintext).map_err(|_| TokenError::Utf8)?;
    extract_org_id(&text).ok_or(TokenError::OrgIdMissing)
}

/// Resolves an optional token header into an org scope.
///
/// Any failure — absent header, corrupted ciphertext, foreign key —
/// collapses to [`OrgId::EMPTY`], which scopes every downstream query
/// to nothing. The failure stage is traced for operators.
#[must_use]
pub fn resolve_org(token: Option<&str>) -> OrgId {
    let Some(token) = token else {
        return OrgId::EMPTY;
    };
    match decrypt_org_token(token) {
        Ok(org_id) => org_id,
        Err(reason) => {
            tracing::debug!(%reason, "org token rejected");
            OrgId::EMPTY
        }
    }
}

/// Restores URL-safe Base64 (optional padding) to standard Base64 and
/// decodes it.
fn decode_base64url(part: &str) -> Result<Vec<u8>, TokenError> {
    let mut standard = part.replace('-', "+").replace('_', "/");
    let missing = standard.len() % 4;
    if missing != 0 {
        standard.extend(std::iter::repeat_n('=', 4 - missing));
    }
    Ok(BASE64.decode(standard)?)
}

/// Pulls the `org_id` value out of the decrypted payload.
///
/// The generator serializes a one-entry map; depending on its vintage
/// the text is JSON or a single-quoted map literal, so a JSON parse is
/// tried first and a tolerant scan second.
fn extract_org_id(text: &str) -> Option<OrgId> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        let field = value.get("org_id")?;
        if let Some(id) = field.as_i64() {
            return Some(OrgId::new(id));
        }
        if let Some(raw) = field.as_str() {
            return raw.parse().ok().map(OrgId::new);
        }
        return None;
    }

    let (_, after_key) = text.split_once("org_id")?;
    let (_, after_colon) = after_key.split_once(':')?;
    let digits: String = after_colon
        .trim_start()
        .trim_start_matches(['\'', '"'])
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok().map(OrgId::new)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use cbc::cipher::BlockEncryptMut;
    use rsa::pkcs8::EncodePrivateKey;

    type Aes256CbcEnc = cbc::Encryptor<Aes256>;

    /// Builds a token the way the platform's link generator does:
    /// random RSA-2048 key, random AES-256 key and IV, single-quoted
    /// map payload, both halves URL-safe Base64 without padding.
    fn build_token(org_id: i64) -> String {
        let mut rng = rand::thread_rng();
        let Ok(private_key) = RsaPrivateKey::new(&mut rng, 2048) else {
            panic!("key generation failed");
        };

        let aes_key: [u8; 32] = rand::random();
        let iv: [u8; 16] = rand::random();
        let payload = format!("{{'org_id': {org_id}}}");

        let encryptor = Aes256CbcEnc::new_from_slices(&aes_key, &iv).unwrap();
        let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(payload.as_bytes());

        let wrapped_key = private_key
            .to_public_key()
            .encrypt(&mut rng, Oaep::new::<Sha1>(), &aes_key)
            .unwrap();
        assert_eq!(wrapped_key.len(), WRAPPED_KEY_LEN);

        let combined = [wrapped_key.as_slice(), &iv, &ciphertext].concat();
        let key_der = private_key.to_pkcs8_der().unwrap();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(combined),
            URL_SAFE_NO_PAD.encode(key_der.as_bytes())
        )
    }

    #[test]
    fn valid_token_round_trips() {
        let token = build_token(17881);
        let org = decrypt_org_token(&token).unwrap();
        assert_eq!(org, OrgId::new(17881));
    }

    #[test]
    fn corrupted_ciphertext_resolves_to_sentinel_not_error() {
        let token = build_token(17881);
        // Flip the tail of the payload half.
        let (payload, key) = token.split_once('.').unwrap();
        let mut mangled: String = payload.chars().rev().collect();
        mangled.push('.');
        mangled.push_str(key);

        assert!(decrypt_org_token(&mangled).is_err());
        assert_eq!(resolve_org(Some(&mangled)), OrgId::EMPTY);
    }

    #[test]
    fn bare_numeric_token_passes_through() {
        assert_eq!(decrypt_org_token("17881").unwrap(), OrgId::new(17881));
    }

    #[test]
    fn garbage_without_separator_is_rejected() {
        assert!(matches!(
            decrypt_org_token("not-a-token"),
            Err(TokenError::Malformed)
        ));
        assert_eq!(resolve_org(Some("not-a-token")), OrgId::EMPTY);
    }

    #[test]
    fn missing_header_is_the_sentinel() {
        assert_eq!(resolve_org(None), OrgId::EMPTY);
    }

    #[test]
    fn truncated_payload_is_reported_as_such() {
        let short = URL_SAFE_NO_PAD.encode([0u8; 100]);
        let key = URL_SAFE_NO_PAD.encode([0u8; 16]);
        assert!(matches!(
            decrypt_org_token(&format!("{short}.{key}")),
            Err(TokenError::Truncated(100))
        ));
    }

    #[test]
    fn extract_handles_both_payload_vintages() {
        assert_eq!(
            extract_org_id("{\"org_id\": 42}"),
            Some(OrgId::new(42))
        );
        assert_eq!(extract_org_id("{'org_id': 42}"), Some(OrgId::new(42)));
        assert_eq!(
            extract_org_id("{'org_id': '42'}"),
            Some(OrgId::new(42))
        );
        assert_eq!(extract_org_id("{'other': 1}"), None);
    }
}
