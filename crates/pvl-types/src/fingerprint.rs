use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content-addressed fingerprint of a structured value.
///
/// A `Fingerprint` is the lowercase-hex SHA-256 digest of a value's
/// canonical serialization, carrying a fixed `0x` scheme prefix — 66
/// characters total. Identical logical content always produces the same
/// fingerprint, which is what makes recorded payloads tamper-evident: any
/// party holding the same data can recompute and compare.
///
/// The genesis sentinel `0x0` is a reserved non-digest value used as the
/// `previousLinkHash` of the first ledger record.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

/// Length of a digest fingerprint: `0x` prefix plus 64 hex characters.
const DIGEST_LEN: usize = 66;

/// The genesis sentinel value.
const GENESIS: &str = "0x0";

impl Fingerprint {
    /// Wrap a pre-computed 32-byte digest.
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(digest)))
    }

    /// The genesis sentinel (`0x0`). Not a digest; only valid as the
    /// previous-link of the first record.
    pub fn genesis() -> Self {
        Self(GENESIS.to_string())
    }

    /// Parse a fingerprint string: either the genesis sentinel or a
    /// `0x`-prefixed 64-character lowercase hex digest.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s == GENESIS {
            return Ok(Self::genesis());
        }
        let Some(body) = s.strip_prefix("0x") else {
            return Err(TypeError::InvalidFingerprint(format!(
                "missing 0x prefix: {s}"
            )));
        };
        if body.len() != DIGEST_LEN - 2 {
            return Err(TypeError::InvalidFingerprint(format!(
                "expected {} hex characters, got {}",
                DIGEST_LEN - 2,
                body.len()
            )));
        }
        if !body
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(TypeError::InvalidFingerprint(format!(
                "non-lowercase-hex character in {s}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns `true` if this is the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        self.0 == GENESIS
    }

    /// Returns `true` if this is a full 66-character digest fingerprint.
    pub fn is_digest(&self) -> bool {
        self.0.len() == DIGEST_LEN
    }

    /// The fingerprint string, prefix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation: prefix plus the first 8 hex characters.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(10);
        &self.0[..end]
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_digest_is_66_chars() {
        let fp = Fingerprint::from_digest([0xab; 32]);
        assert_eq!(fp.as_str().len(), 66);
        assert!(fp.as_str().starts_with("0xabab"));
        assert!(fp.is_digest());
        assert!(!fp.is_genesis());
    }

    #[test]
    fn genesis_sentinel() {
        let g = Fingerprint::genesis();
        assert_eq!(g.as_str(), "0x0");
        assert!(g.is_genesis());
        assert!(!g.is_digest());
    }

    #[test]
    fn parse_roundtrip() {
        let fp = Fingerprint::from_digest([7; 32]);
        let parsed = Fingerprint::parse(fp.as_str()).unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn parse_accepts_genesis() {
        let parsed = Fingerprint::parse("0x0").unwrap();
        assert!(parsed.is_genesis());
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let err = Fingerprint::parse(&"a".repeat(66)).unwrap_err();
        assert!(matches!(err, TypeError::InvalidFingerprint(_)));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = Fingerprint::parse("0xabcd").unwrap_err();
        assert!(matches!(err, TypeError::InvalidFingerprint(_)));
    }

    #[test]
    fn parse_rejects_uppercase_hex() {
        let s = format!("0x{}", "AB".repeat(32));
        let err = Fingerprint::parse(&s).unwrap_err();
        assert!(matches!(err, TypeError::InvalidFingerprint(_)));
    }

    #[test]
    fn serde_roundtrip() {
        let fp = Fingerprint::from_digest([3; 32]);
        let json = serde_json::to_string(&fp).unwrap();
        let parsed: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn serde_serializes_as_plain_string() {
        let g = Fingerprint::genesis();
        assert_eq!(serde_json::to_string(&g).unwrap(), "\"0x0\"");
    }

    #[test]
    fn serde_rejects_malformed() {
        let result: Result<Fingerprint, _> = serde_json::from_str("\"0xnothex\"");
        assert!(result.is_err());
    }

    #[test]
    fn short_is_prefix_plus_8() {
        let fp = Fingerprint::from_digest([0xcd; 32]);
        assert_eq!(fp.short(), "0xcdcdcdcd");
        assert_eq!(Fingerprint::genesis().short(), "0x0");
    }
}
