use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::models::Profile;
use crate::utils::base64::decode_base64_if_valid;
use crate::utils::url::url_decode;

/// Standard VMess link: `vmess://uuid-alterId@hostname:port[?params]`
static STD_VMESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})-(\d+)@(.+):(\d+)(.*)$",
    )
    .unwrap()
});

/// Parse a VMess share link (base64-wrapped JSON) into a profile.
pub fn explode_vmess(vmess: &str) -> Option<Profile> {
    let encoded = vmess.strip_prefix("vmess://")?;

    let decoded = decode_base64_if_valid(encoded)?;
    let json: Value = serde_json::from_str(&decoded).ok()?;

    // Share format version: "v" is a string in v2 links, a number in some v1 ones
    let version = json["v"]
        .as_u64()
        .or_else(|| json["v"].as_str().and_then(|v| v.parse().ok()))
        .unwrap_or(1);

    let add = json["add"].as_str().unwrap_or("").to_string();
    let port = int_or_string(&json["port"])?;
    let id = json["id"].as_str().unwrap_or("").to_string();
    let aid = int_or_string(&json["aid"]).unwrap_or(0);
    let net = json["net"].as_str().unwrap_or("tcp").to_string();
    let security = json["scy"].as_str().unwrap_or("auto").to_string();
    let mut host = json["host"].as_str().unwrap_or("").to_string();
    let mut path = json["path"].as_str().unwrap_or("").to_string();
    let tls = json["tls"].as_str().unwrap_or("").to_string();
    let sni = json["sni"].as_str().unwrap_or("").to_string();
    let remark = json["ps"].as_str().unwrap_or("").to_string();

    if add.is_empty() || port == 0 {
        return None;
    }
    Uuid::parse_str(&id).ok()?;

    // v2 links may pack "host;path" into the host field
    if version == 2 && host.contains(';') {
        let parts: Vec<&str> = host.split(';').collect();
        if parts.len() == 2 {
            path = parts[1].to_string();
            host = parts[0].to_string();
        }
    }

    let remark = if remark.is_empty() {
        format!("{} ({})", add, port)
    } else {
        remark
    };

    Some(Profile::vmess_construct(
        &remark,
        &add,
        port,
        &id,
        aid,
        &security,
        &net,
        none_if_empty(host),
        none_if_empty(path),
        tls == "tls",
        none_if_empty(sni),
    ))
}

/// Parse a standard VMess link into a profile.
/// Format: `vmess://uuid-alterId@hostname:port[/?network=ws&host=xxx&path=yyy]`
pub fn explode_std_vmess(vmess: &str) -> Option<Profile> {
    let body = vmess.strip_prefix("vmess://")?;

    // Split off the fragment (remark)
    let (body, remark) = match body.find('#') {
        Some(pos) => (&body[..pos], url_decode(&body[pos + 1..])),
        None => (body, String::new()),
    };

    let caps = STD_VMESS_RE.captures(body)?;

    let id = caps.get(1).map_or("", |m| m.as_str());
    let aid = caps
        .get(2)
        .map_or("0", |m| m.as_str())
        .parse::<u16>()
        .ok()?;
    let hostname = caps.get(3).map_or("", |m| m.as_str());
    let port = caps
        .get(4)
        .map_or("0", |m| m.as_str())
        .parse::<u16>()
        .ok()?;
    if port == 0 {
        return None;
    }

    // Optional transport parameters in the query string
    let mut net = "tcp".to_string();
    let mut host = String::new();
    let mut path = String::new();
    let mut tls_secure = false;
    if let Some(rest) = caps.get(5).map(|m| m.as_str()) {
        if let Some(query_pos) = rest.find('?') {
            for (key, value) in url::form_urlencoded::parse(rest[query_pos + 1..].as_bytes()) {
                match key.as_ref() {
                    "network" => net = value.into_owned(),
                    "host" => host = value.into_owned(),
                    "path" => path = value.into_owned(),
                    "tls" => tls_secure = value == "1" || value == "true",
                    _ => {}
                }
            }
        }
    }

    let remark = if remark.is_empty() {
        format!("{} ({})", hostname, port)
    } else {
        remark
    };

    Some(Profile::vmess_construct(
        &remark,
        hostname,
        port,
        id,
        aid,
        "auto",
        &net,
        none_if_empty(host),
        none_if_empty(path),
        tls_secure,
        None,
    ))
}

/// Accept a field that may be serialized as an integer or a numeric string.
fn int_or_string(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.parse::<u16>().ok(),
        _ => None,
    }
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
