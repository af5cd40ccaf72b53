//! Clash-style proxy list documents.
//!
//! Unlike the link decoders, this layer is fail-fast: a structurally broken
//! document aborts the whole call with a `DocumentError` instead of being
//! silently dropped. Entries of unsupported kinds are still skipped one by
//! one, which lets a mixed document contribute its supported entries.

use serde_yaml::Value;
use thiserror::Error;

use crate::models::Profile;

/// Marker key that routes content to this parser.
pub const PROXY_LIST_MARKER: &str = "proxies:";

/// Structural failure while parsing a proxy list document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document syntax: {0}")]
    Syntax(#[from] serde_yaml::Error),
    #[error("proxy entry {index}: port is not an integer")]
    InvalidPort { index: usize },
}

/// Parse a proxy list document into profiles.
///
/// A document without a `proxies` sequence yields no profiles and no error.
/// A non-integer `port` on any entry fails the whole document, while entries
/// of unsupported types are skipped.
pub fn explode_document(content: &str) -> Result<Vec<Profile>, DocumentError> {
    let yaml: Value = serde_yaml::from_str(content)?;

    let proxies = match yaml.get("proxies") {
        Some(Value::Sequence(seq)) => seq,
        _ => return Ok(Vec::new()),
    };

    let mut profiles = Vec::new();

    for (index, entry) in proxies.iter().enumerate() {
        let kind = entry.get("type").and_then(Value::as_str).unwrap_or("");
        let name = entry.get("name").and_then(Value::as_str).unwrap_or("");
        let server = entry.get("server").and_then(Value::as_str).unwrap_or("");
        let port = integer_port(entry.get("port")).ok_or(DocumentError::InvalidPort { index })?;

        match kind {
            "ss" | "shadowsocks" => {
                profiles.push(parse_shadowsocks_entry(entry, name, server, port));
            }
            // Other kinds are not supported yet
            _ => continue,
        }
    }

    Ok(profiles)
}

/// Build a Shadowsocks profile from one document entry.
fn parse_shadowsocks_entry(entry: &Value, name: &str, server: &str, port: u16) -> Profile {
    let method = entry
        .get("cipher")
        .and_then(Value::as_str)
        .unwrap_or("")
        .replace("dummy", "none");
    let password = entry.get("password").and_then(Value::as_str).unwrap_or("");

    // Only the obfs plugin is recognized; its options are folded into one
    // plugin configuration string
    let mut plugin = None;
    if let (Some("obfs"), Some(opts)) = (
        entry.get("plugin").and_then(Value::as_str),
        entry.get("plugin-opts"),
    ) {
        let mode = opts.get("mode").and_then(Value::as_str).unwrap_or("");
        let host = opts.get("host").and_then(Value::as_str).unwrap_or("");
        plugin = Some(format!("obfs-local;obfs={};obfs-host={}", mode, host));
    }

    Profile::ss_construct(name, server, port, &method, password, plugin)
}

/// The port field must be an integer, or a string holding one.
fn integer_port(value: Option<&Value>) -> Option<u16> {
    match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|port| u16::try_from(port).ok()),
        Some(Value::String(s)) => s.trim().parse::<u16>().ok(),
        _ => None,
    }
}
