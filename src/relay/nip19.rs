//! Public keys and their NIP-19 `npub` encoding.
//!
//! Authors are configured in the human-readable `npub1…` form but relays
//! filter on raw hex. Both directions live here.

use std::fmt;

use bech32::{Bech32, Hrp};

const NPUB_HRP: &str = "npub";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nip19Error {
    /// The string is not valid bech32.
    Bech32(String),
    /// Valid bech32, but not an `npub`.
    WrongPrefix(String),
    /// Decoded payload is not 32 bytes.
    WrongLength(usize),
    /// Not valid hex.
    Hex(String),
}

impl fmt::Display for Nip19Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nip19Error::Bech32(e) => write!(f, "invalid bech32: {e}"),
            Nip19Error::WrongPrefix(hrp) => write!(f, "expected an npub, got prefix '{hrp}'"),
            Nip19Error::WrongLength(len) => write!(f, "public key must be 32 bytes, got {len}"),
            Nip19Error::Hex(e) => write!(f, "invalid hex: {e}"),
        }
    }
}

impl std::error::Error for Nip19Error {}

/// A 32-byte x-only public key identifying an author.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Accepts either an `npub1…` string or 64 hex characters.
    pub fn parse(input: &str) -> Result<Self, Nip19Error> {
        let input = input.trim();
        if input.to_ascii_lowercase().starts_with("npub1") {
            Self::from_npub(input)
        } else {
            Self::from_hex(input)
        }
    }

    pub fn from_npub(npub: &str) -> Result<Self, Nip19Error> {
        let (hrp, data) = bech32::decode(npub).map_err(|e| Nip19Error::Bech32(e.to_string()))?;
        let prefix = hrp.to_lowercase();
        if prefix != NPUB_HRP {
            return Err(Nip19Error::WrongPrefix(prefix));
        }
        Self::from_slice(&data)
    }

    pub fn from_hex(hex_key: &str) -> Result<Self, Nip19Error> {
        let bytes = hex::decode(hex_key).map_err(|e| Nip19Error::Hex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, Nip19Error> {
        <[u8; 32]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Nip19Error::WrongLength(bytes.len()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bech32 `npub` form. Falls back to hex if encoding fails, which cannot
    /// happen for a 32-byte payload under a fixed short prefix.
    pub fn to_npub(&self) -> String {
        let hrp = Hrp::parse_unchecked(NPUB_HRP);
        bech32::encode::<Bech32>(hrp, &self.0).unwrap_or_else(|_| self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_npub())
    }
}

/// Converts an event's hex pubkey to `npub` for display.
pub fn npub_from_hex(hex_key: &str) -> Option<String> {
    PublicKey::from_hex(hex_key).ok().map(|key| key.to_npub())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test vector from NIP-19.
    const NPUB: &str = "npub10elfcs4fr0l0r8af98jlmgdh9c8tcxjvz9qkw038js35mp4dma8qzvjptg";
    const HEX: &str = "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e";

    #[test]
    fn test_decode_npub() {
        let key = PublicKey::parse(NPUB).unwrap();
        assert_eq!(key.to_hex(), HEX);
    }

    #[test]
    fn test_encode_npub() {
        let key = PublicKey::from_hex(HEX).unwrap();
        assert_eq!(key.to_npub(), NPUB);
    }

    #[test]
    fn test_parse_accepts_hex() {
        let key = PublicKey::parse(HEX).unwrap();
        assert_eq!(key.to_npub(), NPUB);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let key = PublicKey::parse(&format!("  {NPUB}\n")).unwrap();
        assert_eq!(key.to_hex(), HEX);
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        let bytes = hex::decode(HEX).unwrap();
        let nsec = bech32::encode::<Bech32>(Hrp::parse_unchecked("nsec"), &bytes).unwrap();
        assert_eq!(
            PublicKey::from_npub(&nsec),
            Err(Nip19Error::WrongPrefix("nsec".to_string()))
        );
    }

    #[test]
    fn test_short_hex_rejected() {
        assert_eq!(PublicKey::parse("abcd"), Err(Nip19Error::WrongLength(2)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(PublicKey::parse("not a key"), Err(Nip19Error::Hex(_))));
        assert!(matches!(PublicKey::parse("npub1invalid"), Err(Nip19Error::Bech32(_))));
    }

    #[test]
    fn test_npub_from_hex() {
        assert_eq!(npub_from_hex(HEX).as_deref(), Some(NPUB));
        assert_eq!(npub_from_hex("zz"), None);
    }
}
