use serde::{Deserialize, Serialize, Serializer, de::Deserializer};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// ObjectIdError
///

#[derive(Debug, ThisError)]
pub enum ObjectIdError {
    #[error("invalid object id length: {len} characters")]
    InvalidLength { len: usize },

    #[error("invalid object id: non-hex character")]
    InvalidHex,
}

///
/// ObjectId
///
/// Store-generated document identifier: 12 raw bytes, 24 hex characters in
/// text form. Conversion between the two is explicit; no serialization
/// round-trip is involved anywhere.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct ObjectId([u8; Self::BYTE_LEN]);

impl ObjectId {
    pub const BYTE_LEN: usize = 12;
    pub const TEXT_LEN: usize = 24;

    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::BYTE_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; Self::BYTE_LEN] {
        self.0
    }

    /// parse_str
    /// Accepts exactly 24 hex characters, either case.
    pub fn parse_str(text: &str) -> Result<Self, ObjectIdError> {
        if text.len() != Self::TEXT_LEN {
            return Err(ObjectIdError::InvalidLength { len: text.len() });
        }

        let mut bytes = [0u8; Self::BYTE_LEN];
        hex::decode_to_slice(text, &mut bytes).map_err(|_| ObjectIdError::InvalidHex)?;

        Ok(Self(bytes))
    }

    /// is_valid
    /// Syntax check without constructing the identifier. Filter translation
    /// runs this before anything touches the raw text.
    #[must_use]
    pub fn is_valid(text: &str) -> bool {
        text.len() == Self::TEXT_LEN && text.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// to_hex
    /// Canonical lowercase text form.
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse_str(text)
    }
}

// Wire form is the 24-hex text the form layer submits, not the raw bytes.
impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        Self::parse_str(&text).map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///
