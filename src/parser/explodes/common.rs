use crate::models::Profile;

/// Decode a single proxy link into a profile.
///
/// Matches the link's scheme prefix against the supported set, first match
/// wins, and hands off to the per-protocol decoder. Returns `None` for
/// unrecognized schemes and for malformed link bodies alike; a batch caller
/// drops such units and carries on.
pub fn explode(link: &str) -> Option<Profile> {
    let link = link.trim();

    if link.is_empty() {
        return None;
    }

    if link.starts_with("socks5://") || link.starts_with("socks4://") {
        super::socks::explode_socks(link)
    } else if link.starts_with("ss://") {
        super::ss::explode_ss(link)
    } else if link.starts_with("vmess://") {
        // Try the share-link format first, then the standard link format
        super::vmess::explode_vmess(link).or_else(|| super::vmess::explode_std_vmess(link))
    } else {
        None
    }
}
