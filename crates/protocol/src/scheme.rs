//! The registry of recognized proxy protocol schemes
//!
//! Every descriptor the pipeline handles starts with `<scheme>://`. The
//! registry is fixed at compile time; unknown schemes are not rejected by the
//! pipeline, they simply fall into the `other` bucket when categorizing and
//! resolve neither identity nor endpoint.

/// A recognized proxy protocol scheme tag
///
/// The variants mirror the scheme tokens seen in the wild. Matching is done
/// on the exact token before `://`, lowercased - prefix ambiguity between
/// e.g. `ss` and `ssr` or `trojan` and `trojan-go` cannot occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scheme {
    Vmess,
    Vless,
    V2ray,
    Trojan,
    TrojanGo,
    Shadowsocks,
    ShadowsocksR,
    Ss,
    Ssr,
    Hysteria,
    Hysteria2,
    Tuic,
    NaiveProxy,
    Wireguard,
    Socks,
    Socks5,
    Http,
    Https,
    Clash,
    SingBox,
    Xray,
}

/// Parsing behavior grouped by how a scheme encodes its server address
///
/// The family drives identity and endpoint resolution: the pipeline never
/// implements full protocol semantics, only enough to find `(host, port)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolFamily {
    /// Payload is Base64-wrapped JSON with `add`/`address` and `port` fields
    JsonPayload,
    /// Payload is `credential@host:port` with optional `#fragment`/`?query`
    CredentialHost,
    /// No known payload structure - identity is unresolvable
    Opaque,
}

impl Scheme {
    /// All registered schemes, in categorization order
    pub const ALL: [Scheme; 21] = [
        Scheme::Vmess,
        Scheme::Vless,
        Scheme::V2ray,
        Scheme::Trojan,
        Scheme::TrojanGo,
        Scheme::Shadowsocks,
        Scheme::ShadowsocksR,
        Scheme::Ss,
        Scheme::Ssr,
        Scheme::Hysteria,
        Scheme::Hysteria2,
        Scheme::Tuic,
        Scheme::NaiveProxy,
        Scheme::Wireguard,
        Scheme::Socks,
        Scheme::Socks5,
        Scheme::Http,
        Scheme::Https,
        Scheme::Clash,
        Scheme::SingBox,
        Scheme::Xray,
    ];

    /// Get the scheme token as it appears before `://`
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vmess => "vmess",
            Self::Vless => "vless",
            Self::V2ray => "v2ray",
            Self::Trojan => "trojan",
            Self::TrojanGo => "trojan-go",
            Self::Shadowsocks => "shadowsocks",
            Self::ShadowsocksR => "shadowsocksr",
            Self::Ss => "ss",
            Self::Ssr => "ssr",
            Self::Hysteria => "hysteria",
            Self::Hysteria2 => "hysteria2",
            Self::Tuic => "tuic",
            Self::NaiveProxy => "naiveproxy",
            Self::Wireguard => "wireguard",
            Self::Socks => "socks",
            Self::Socks5 => "socks5",
            Self::Http => "http",
            Self::Https => "https",
            Self::Clash => "clash",
            Self::SingBox => "sing-box",
            Self::Xray => "xray",
        }
    }

    /// Parse a scheme from its token (case-insensitive)
    ///
    /// The token is everything before `://`, without the separator.
    pub fn from_token(token: &str) -> Option<Self> {
        let lowered = token.to_ascii_lowercase();
        Self::ALL.iter().copied().find(|s| s.as_str() == lowered)
    }

    /// How this scheme encodes its server address
    #[inline]
    pub const fn family(self) -> ProtocolFamily {
        match self {
            Self::Vmess | Self::Vless => ProtocolFamily::JsonPayload,
            Self::Trojan
            | Self::TrojanGo
            | Self::Shadowsocks
            | Self::ShadowsocksR
            | Self::Ss
            | Self::Ssr => ProtocolFamily::CredentialHost,
            _ => ProtocolFamily::Opaque,
        }
    }

    /// Static selection priority (higher = preferred)
    ///
    /// Used by the selector when latency probing yields too few reachable
    /// candidates to rank on. Values follow the conventional desirability of
    /// each protocol; unregistered schemes rank below all of these.
    #[inline]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Vless => 10,
            Self::Vmess => 9,
            Self::Trojan | Self::TrojanGo => 8,
            Self::Shadowsocks | Self::Ss => 7,
            Self::Hysteria | Self::Hysteria2 => 6,
            Self::Tuic => 5,
            Self::Socks | Self::Socks5 => 4,
            Self::Http | Self::Https => 3,
            _ => 2,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
