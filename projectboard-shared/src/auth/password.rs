/// Password hashing module using scrypt
///
/// Stored credentials are the URL-safe base64 encoding of `salt || derived_key`.
/// The salt is 16 random bytes and the key is derived with scrypt, so the
/// stored value never contains the plaintext password.
///
/// # Security
///
/// - **Algorithm**: scrypt (memory-hard KDF)
/// - **Cost**: N = 2^14, r = 8, p = 1 (about 16 MB per derivation)
/// - **Salt**: 16 bytes from the OS CSPRNG
/// - **Output**: 64-byte derived key
/// - **Comparison**: constant time via `subtle`
///
/// # Example
///
/// ```
/// use projectboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Correct-Horse-9")?;
///
/// assert!(verify_password("Correct-Horse-9", &hash));
/// assert!(!verify_password("wrong", &hash));
/// # Ok(())
/// # }
/// ```

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::{rngs::OsRng, RngCore};
use scrypt::Params;
use subtle::ConstantTimeEq;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes
pub const KEY_LEN: usize = 64;

/// scrypt cost parameter as log2(N)
const LOG_N: u8 = 14;

/// scrypt block size
const R: u32 = 8;

/// scrypt parallelism
const P: u32 = 1;

/// Characters accepted as the "special character" of the password policy
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*()-_=+[]{}|;:'\",.<>/?`~";

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 10;

/// Well-formed hash matching no password; verified against when a login names
/// an unknown user so both failure paths pay for one key derivation
pub const DUMMY_PASSWORD_HASH: &str =
    "Y0ea1poJCyWCd-yPum-ZQTLJ-3VqI-_cHxjRSdxy2MgISPE2xVV1zAW1yuFZdH7GnFZI2Yp2SUJ8z2GGXxggGaHEMV-MV07jN_wrWfhVRMM=";

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

fn derive_key(password: &str, salt: &[u8], output: &mut [u8]) -> Result<(), String> {
    let params = Params::new(LOG_N, R, P, output.len())
        .map_err(|e| format!("Invalid parameters: {}", e))?;

    scrypt::scrypt(password.as_bytes(), salt, &params, output)
        .map_err(|e| format!("Key derivation failed: {}", e))
}

/// Hashes a password with a fresh random salt
///
/// # Returns
///
/// URL-safe base64 of the 16-byte salt followed by the 64-byte derived key.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if the OS RNG or the KDF fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut payload = [0u8; SALT_LEN + KEY_LEN];
    let (salt, key) = payload.split_at_mut(SALT_LEN);

    OsRng
        .try_fill_bytes(salt)
        .map_err(|e| PasswordError::HashError(format!("Salt generation failed: {}", e)))?;

    derive_key(password, salt, key).map_err(PasswordError::HashError)?;

    Ok(URL_SAFE.encode(payload))
}

/// Verifies a password against an encoded hash
///
/// Fails closed: malformed base64, a payload with no key bytes, or a KDF
/// failure all return `false`. The derived key is compared in constant time.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let payload = match URL_SAFE.decode(encoded.as_bytes()) {
        Ok(payload) => payload,
        Err(_) => return false,
    };

    if payload.len() <= SALT_LEN {
        return false;
    }

    let (salt, stored) = payload.split_at(SALT_LEN);
    let mut derived = vec![0u8; stored.len()];

    if derive_key(password, salt, &mut derived).is_err() {
        return false;
    }

    derived.ct_eq(stored).into()
}

/// Checks a signup password against the policy
///
/// Every rule is evaluated; the returned vector lists all violations in a
/// stable order and is empty when the password is acceptable.
///
/// # Example
///
/// ```
/// use projectboard_shared::auth::password::validate_password_policy;
///
/// assert!(validate_password_policy("Tr0ub4dor&3x").is_empty());
/// assert_eq!(validate_password_policy("short").len(), 4);
/// ```
pub fn validate_password_policy(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        ));
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit".to_string());
    }

    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        errors.push("Password must contain at least one special character".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_layout() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        let payload = URL_SAFE.decode(hash.as_bytes()).expect("Hash should be base64");
        assert_eq!(payload.len(), SALT_LEN + KEY_LEN);
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let password = "PlainTextPassword";
        let hash = hash_password(password).expect("Hash should succeed");
        assert!(!hash.contains(password));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1));
        assert!(verify_password("same_password", &hash2));
    }

    #[test]
    fn test_verify_password_correct_and_incorrect() {
        let hash = hash_password("correct_password").expect("Hash should succeed");

        assert!(verify_password("correct_password", &hash));
        assert!(!verify_password("wrong_password", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        assert!(!verify_password("password", "not base64 at all!"));
        assert!(!verify_password("password", ""));

        // Salt only, no key bytes
        let salt_only = URL_SAFE.encode([7u8; SALT_LEN]);
        assert!(!verify_password("password", &salt_only));
    }

    #[test]
    fn test_dummy_hash_is_well_formed_and_matches_nothing() {
        let payload = URL_SAFE.decode(DUMMY_PASSWORD_HASH).unwrap();
        assert_eq!(payload.len(), SALT_LEN + KEY_LEN);
        assert!(!verify_password("", DUMMY_PASSWORD_HASH));
        assert!(!verify_password("Correct-Horse-9", DUMMY_PASSWORD_HASH));
    }

    #[test]
    fn test_verify_password_tampered_key() {
        let hash = hash_password("password").expect("Hash should succeed");
        let mut payload = URL_SAFE.decode(hash.as_bytes()).unwrap();
        let last = payload.len() - 1;
        payload[last] ^= 0xff;

        assert!(!verify_password("password", &URL_SAFE.encode(payload)));
    }

    #[test]
    fn test_unicode_password_roundtrip() {
        let password = "unicode-密码-パスワード";
        let hash = hash_password(password).expect("Hash should succeed");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn test_policy_accepts_strong_password() {
        for password in ["MyP@ssw0rd!x", "Str0ng!Passw", "C0mpl3x#Pwd1"] {
            assert!(
                validate_password_policy(password).is_empty(),
                "Password '{}' should be valid",
                password
            );
        }
    }

    #[test]
    fn test_policy_lists_all_violations_for_short() {
        let errors = validate_password_policy("short");

        assert_eq!(
            errors,
            vec![
                "Password must be at least 10 characters long".to_string(),
                "Password must contain at least one uppercase letter".to_string(),
                "Password must contain at least one digit".to_string(),
                "Password must contain at least one special character".to_string(),
            ]
        );
    }

    #[test]
    fn test_policy_single_violations() {
        assert_eq!(validate_password_policy("lowercase1!xx").len(), 1);
        assert!(validate_password_policy("UPPERCASE1!XX")[0].contains("lowercase letter"));
        assert!(validate_password_policy("NoDigits!abc")[0].contains("digit"));
        assert!(validate_password_policy("NoSpecial123")[0].contains("special character"));
    }

    #[test]
    fn test_policy_ignores_unlisted_symbols() {
        // '€' is not in the accepted special set
        let errors = validate_password_policy("Abcdefgh1€");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("special character"));
    }
}
