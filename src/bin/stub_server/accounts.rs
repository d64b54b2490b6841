use super::*;

pub(super) fn hash_token(secret: &str) -> String {
    blake3::hash(secret.as_bytes()).to_hex().to_string()
}

pub(super) fn generate_token_secret() -> Result<String> {
    // 32 bytes of entropy, hex-encoded.
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

/// Parses a `left:right` flag value such as `--user name:password`.
pub(super) fn parse_pair(value: &str) -> Result<(String, String)> {
    let (left, right) = value
        .split_once(':')
        .with_context(|| format!("invalid value {:?} (expected a:b)", value))?;
    if left.is_empty() || right.is_empty() {
        anyhow::bail!("invalid value {:?}: both sides must be non-empty", value);
    }
    Ok((left.to_string(), right.to_string()))
}
