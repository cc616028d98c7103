use serde::Serialize;
use std::fmt;

/// Semantic type of an extracted indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// Onion-service hostname
    OnionAddress,

    /// Email address
    Email,

    /// Bitcoin-style wallet address
    CryptoWallet,

    /// Matched a pattern but fits no known type
    Unknown,
}

impl IndicatorKind {
    /// Classifies a raw indicator value
    ///
    /// Precedence is fixed and order-sensitive: a value ending in `.onion`
    /// is an onion address even when it also contains `@` or starts with a
    /// wallet prefix; the `@` check precedes the wallet-prefix check.
    pub fn classify(value: &str) -> Self {
        if value.ends_with(".onion") {
            Self::OnionAddress
        } else if value.contains('@') {
            Self::Email
        } else if value.starts_with("bc1") || value.starts_with('1') || value.starts_with('3') {
            Self::CryptoWallet
        } else {
            Self::Unknown
        }
    }

    /// Converts the kind to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::OnionAddress => "onion_address",
            Self::Email => "email",
            Self::CryptoWallet => "crypto_wallet",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a kind from its database string representation
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "onion_address" => Some(Self::OnionAddress),
            "email" => Some(Self::Email),
            "crypto_wallet" => Some(Self::CryptoWallet),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}
