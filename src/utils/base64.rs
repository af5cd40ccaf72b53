use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// # Arguments
/// * `input` - The Base64 encoded string.
/// * `accept_urlsafe` - A boolean indicating whether to accept URL-safe Base64 encoding.
///
/// # Returns
/// The decoded string, or an empty string if the input is invalid.
pub fn base64_decode(input: &str, accept_urlsafe: bool) -> String {
    let engine = if accept_urlsafe { URL_SAFE } else { STANDARD };

    match engine.decode(input) {
        Ok(decoded) => String::from_utf8_lossy(&decoded).to_string(),
        Err(_) => String::new(), // Handle invalid Base64 input
    }
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Converts a Base64 string to URL-safe Base64 format by replacing specific characters.
pub fn url_safe_base64_apply(input: &str) -> String {
    input
        .replace('+', "-")
        .replace('/', "_")
        .replace('=', "") // Remove padding
}

/// Decodes a URL-safe Base64 string to its original form.
pub fn url_safe_base64_decode(input: &str) -> String {
    let reversed = url_safe_base64_reverse(input);
    match STANDARD.decode(&reversed) {
        Ok(decoded) => String::from_utf8_lossy(&decoded).to_string(),
        Err(_) => match STANDARD_NO_PAD.decode(&reversed) {
            Ok(decoded) => String::from_utf8_lossy(&decoded).to_string(),
            Err(_) => String::new(),
        },
    }
}

/// Encodes a string to URL-safe Base64 format.
pub fn url_safe_base64_encode(input: &str) -> String {
    url_safe_base64_apply(&base64_encode(input))
}

/// Probes whether the whole input is a Base64 wrapper around valid UTF-8 text.
///
/// Accepts standard and URL-safe alphabets, padded or not. The decode must
/// consume the entire input and yield a non-empty string, otherwise the input
/// is not treated as a wrapper at all.
pub fn decode_base64_if_valid(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    for engine in [&STANDARD, &STANDARD_NO_PAD, &URL_SAFE, &URL_SAFE_NO_PAD] {
        if let Ok(bytes) = engine.decode(trimmed) {
            if let Ok(text) = String::from_utf8(bytes) {
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        let encoded = base64_encode("ss://abc123");
        assert_eq!(encoded, "c3M6Ly9hYmMxMjM=");
        assert_eq!(base64_decode(&encoded, false), "ss://abc123");
    }

    #[test]
    fn test_url_safe_round_trip() {
        let encoded = url_safe_base64_encode("subject?+/");
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('='));
        assert_eq!(url_safe_base64_decode(&encoded), "subject?+/");
    }

    #[test]
    fn test_decode_base64_if_valid_accepts_padded_and_unpadded() {
        assert_eq!(
            decode_base64_if_valid("c3M6Ly9hYmMxMjM=").as_deref(),
            Some("ss://abc123")
        );
        assert_eq!(
            decode_base64_if_valid("c3M6Ly9hYmMxMjM").as_deref(),
            Some("ss://abc123")
        );
    }

    #[test]
    fn test_decode_base64_if_valid_rejects_plain_links() {
        // ':' is outside every Base64 alphabet, so links never false-positive
        assert_eq!(decode_base64_if_valid("ss://abc123"), None);
        assert_eq!(decode_base64_if_valid(""), None);
        assert_eq!(decode_base64_if_valid("not base64!"), None);
    }
}
