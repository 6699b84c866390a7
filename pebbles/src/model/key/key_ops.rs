use rand::Rng;

use super::ranged_key::{SENTINEL, SEPARATOR, UNIQUIFIER_LEN};
use super::KeyError;

const UNIQUIFIER_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// validates an id used as cache key material: non-empty ASCII graphic
/// characters, free of the field separator and the range sentinel.
pub fn validate_id(field: &'static str, value: &str) -> Result<(), KeyError> {
    let reject = |reason: &str| KeyError::InvalidIdField {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    };
    if value.is_empty() {
        return Err(reject("ids must be non-empty"));
    }
    for c in value.chars() {
        if c == SEPARATOR || c == SENTINEL {
            return Err(reject(&format!(
                "ids may not contain the key separator '{SEPARATOR}' or sentinel '{SENTINEL}'"
            )));
        }
        if !c.is_ascii_graphic() {
            return Err(reject(&format!(
                "ids are restricted to ASCII graphic characters, found {c:?}"
            )));
        }
    }
    Ok(())
}

/// draws a fresh random uniquifier suffix from `[0-9a-z]`.
pub fn uniquifier() -> String {
    let mut rng = rand::rng();
    (0..UNIQUIFIER_LEN)
        .map(|_| UNIQUIFIER_CHARSET[rng.random_range(0..UNIQUIFIER_CHARSET.len())] as char)
        .collect()
}

/// validates a stored uniquifier suffix: exactly [`UNIQUIFIER_LEN`]
/// characters from `[0-9a-z]`.
pub fn validate_uniquifier(value: &str) -> Result<(), KeyError> {
    if value.len() != UNIQUIFIER_LEN || !value.bytes().all(|b| UNIQUIFIER_CHARSET.contains(&b)) {
        return Err(KeyError::InvalidIdField {
            field: "uniquifier",
            value: value.to_string(),
            reason: format!("expected {UNIQUIFIER_LEN} characters from [0-9a-z]"),
        });
    }
    Ok(())
}

/// parses a fixed-width zero-padded numeric field, enforcing both the
/// expected width and the declared domain maximum.
pub fn parse_fixed_width(
    field: &'static str,
    value: &str,
    width: usize,
    max: u32,
) -> Result<u32, KeyError> {
    let reject = |reason: String| KeyError::InvalidIdField {
        field,
        value: value.to_string(),
        reason,
    };
    if value.len() != width || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject(format!("expected {width} zero-padded digits")));
    }
    let parsed = value
        .parse::<u32>()
        .map_err(|e| reject(format!("unparseable numeric field: {e}")))?;
    if parsed > max {
        return Err(KeyError::OutOfDomain {
            field,
            value: parsed as u64,
            max: max as u64,
        });
    }
    Ok(parsed)
}
