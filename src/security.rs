use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex HMAC-SHA256 signature of `data`
pub fn sign(data: &str, secret: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(data.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Verify HMAC-SHA256 signature
///
/// Comparison is constant-time via `verify_slice`.
pub fn verify_hmac(data: &str, signature: &str, secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };

    mac.update(data.as_bytes());

    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    mac.verify_slice(&sig_bytes).is_ok()
}

/// Encode `payload` as `hex(payload).signature`
pub fn seal(payload: &str, secret: &str) -> Option<String> {
    let signature = sign(payload, secret)?;
    Some(format!("{}.{}", hex::encode(payload), signature))
}

/// Reverse of [`seal`]; `None` if the value was altered or signed with another key
pub fn unseal(value: &str, secret: &str) -> Option<String> {
    let (encoded, signature) = value.split_once('.')?;
    let payload = String::from_utf8(hex::decode(encoded).ok()?).ok()?;

    if verify_hmac(&payload, signature, secret) {
        Some(payload)
    } else {
        None
    }
}
