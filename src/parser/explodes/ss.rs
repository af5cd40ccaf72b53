use crate::models::Profile;
use crate::utils::base64::url_safe_base64_decode;
use crate::utils::url::url_decode;

/// Parse a Shadowsocks link into a profile.
///
/// Handles the SIP002 format `ss://base64(method:password)@server:port` as
/// well as the legacy format `ss://base64(method:password@server:port)`.
/// Returns `None` for anything malformed.
pub fn explode_ss(ss: &str) -> Option<Profile> {
    let mut ss_content = ss.strip_prefix("ss://")?.to_string();
    ss_content = ss_content.replace("/?", "?");

    // Extract fragment (remark) if present
    let mut remark = String::new();
    if let Some(hash_pos) = ss_content.find('#') {
        remark = url_decode(&ss_content[hash_pos + 1..]);
        ss_content.truncate(hash_pos);
    }

    // Extract the plugin configuration from the query string
    let mut plugin = None;
    if let Some(query_pos) = ss_content.find('?') {
        let addition = ss_content[query_pos + 1..].to_string();
        ss_content.truncate(query_pos);

        for (key, value) in url::form_urlencoded::parse(addition.as_bytes()) {
            if key == "plugin" && !value.is_empty() {
                plugin = Some(value.into_owned());
            }
        }
    }

    let (method, password, server, port) = if let Some((secret, server_port)) =
        ss_content.split_once('@')
    {
        // SIP002 format, userinfo is base64(method:password) or plain text
        let (server, port) = split_server_port(server_port)?;

        let decoded = url_safe_base64_decode(secret);
        let secret = if decoded.is_empty() {
            secret.to_string()
        } else {
            decoded
        };
        let (method, password) = secret.split_once(':')?;
        (method.to_string(), password.to_string(), server, port)
    } else {
        // Legacy format, the whole body is base64(method:password@server:port)
        let decoded = url_safe_base64_decode(&ss_content);
        if decoded.is_empty() {
            return None;
        }

        let (method_pass, server_port) = decoded.split_once('@')?;
        let (method, password) = method_pass.split_once(':')?;
        let (server, port) = split_server_port(server_port)?;
        (method.to_string(), password.to_string(), server, port)
    };

    if port == 0 {
        return None;
    }

    // Use server:port as remark if none provided
    if remark.is_empty() {
        remark = format!("{} ({})", server, port);
    }

    Some(Profile::ss_construct(
        &remark, &server, port, &method, &password, plugin,
    ))
}

/// Split `server:port`, keeping bracketed IPv6 hosts intact.
fn split_server_port(server_port: &str) -> Option<(String, u16)> {
    let (server, port) = server_port.rsplit_once(':')?;
    if server.is_empty() {
        return None;
    }
    let port = port.parse::<u16>().ok()?;
    Some((server.to_string(), port))
}
