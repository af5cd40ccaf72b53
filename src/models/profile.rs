//! Profile model definitions
//!
//! Contains the core data structures for parsed proxy profiles.

use std::fmt;

/// Identity of a stored profile. Assigned once by the store at insert time
/// and never derived from field values.
pub type ProfileId = u32;

/// Identity of a profile group (one subscription source).
pub type GroupId = u32;

/// Represents the protocol kind of a profile.
/// This is the canonical enum used for protocol identification across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    Socks,
    Shadowsocks,
    VMess,
}

impl ProxyKind {
    /// Converts a `ProxyKind` into a human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyKind::Socks => "SOCKS",
            ProxyKind::Shadowsocks => "SS",
            ProxyKind::VMess => "VMess",
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SOCKS-specific connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocksParams {
    /// Protocol version, 4 or 5.
    pub version: u8,
    pub username: Option<String>,
    pub password: Option<String>,
    pub udp: Option<bool>,
}

/// Shadowsocks-specific connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowsocksParams {
    pub method: String,
    pub password: String,
    /// Full plugin configuration string, e.g.
    /// `obfs-local;obfs=http;obfs-host=example.com`.
    pub plugin: Option<String>,
}

/// VMess-specific connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VMessParams {
    pub user_id: String,
    pub alter_id: u16,
    pub security: String,
    pub transfer_protocol: String,
    pub host: Option<String>,
    pub path: Option<String>,
    pub tls_secure: bool,
    pub sni: Option<String>,
}

/// Protocol-specific parameter bundle, one variant per supported kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyParams {
    Socks(SocksParams),
    Shadowsocks(ShadowsocksParams),
    VMess(VMessParams),
}

/// Represents one parsed proxy profile.
///
/// `id` is the record's identity: two profiles re-parsed from identical
/// content are distinct records with distinct ids. All other fields are the
/// record's value and never change after insertion into a store.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    /// Display name.
    pub remark: String,
    pub hostname: String,
    pub port: u16,
    pub params: ProxyParams,
}

impl Profile {
    /// Construct a SOCKS profile.
    pub fn socks_construct(
        remark: &str,
        hostname: &str,
        port: u16,
        version: u8,
        username: Option<String>,
        password: Option<String>,
        udp: Option<bool>,
    ) -> Profile {
        Profile {
            id: 0,
            remark: remark.to_string(),
            hostname: hostname.to_string(),
            port,
            params: ProxyParams::Socks(SocksParams {
                version,
                username,
                password,
                udp,
            }),
        }
    }

    /// Construct a Shadowsocks profile.
    pub fn ss_construct(
        remark: &str,
        hostname: &str,
        port: u16,
        method: &str,
        password: &str,
        plugin: Option<String>,
    ) -> Profile {
        Profile {
            id: 0,
            remark: remark.to_string(),
            hostname: hostname.to_string(),
            port,
            params: ProxyParams::Shadowsocks(ShadowsocksParams {
                method: method.to_string(),
                password: password.to_string(),
                plugin,
            }),
        }
    }

    /// Construct a VMess profile.
    pub fn vmess_construct(
        remark: &str,
        hostname: &str,
        port: u16,
        user_id: &str,
        alter_id: u16,
        security: &str,
        transfer_protocol: &str,
        host: Option<String>,
        path: Option<String>,
        tls_secure: bool,
        sni: Option<String>,
    ) -> Profile {
        Profile {
            id: 0,
            remark: remark.to_string(),
            hostname: hostname.to_string(),
            port,
            params: ProxyParams::VMess(VMessParams {
                user_id: user_id.to_string(),
                alter_id,
                security: security.to_string(),
                transfer_protocol: transfer_protocol.to_string(),
                host,
                path,
                tls_secure,
                sni,
            }),
        }
    }

    pub fn kind(&self) -> ProxyKind {
        match self.params {
            ProxyParams::Socks(_) => ProxyKind::Socks,
            ProxyParams::Shadowsocks(_) => ProxyKind::Shadowsocks,
            ProxyParams::VMess(_) => ProxyKind::VMess,
        }
    }

    /// Value equality: same semantic content, identity ignored.
    pub fn same_content(&self, other: &Profile) -> bool {
        self.remark == other.remark
            && self.hostname == other.hostname
            && self.port == other.port
            && self.params == other.params
    }

    /// Kind plus display name, for user-facing change reports.
    pub fn display_type_and_name(&self) -> String {
        format!("[{}] {}", self.kind(), self.remark)
    }
}
