//! Ship registries: `LLL-DDD` plus a displayed checksum digit.
//!
//! The checksum is the sum of the character codes of both groups, mod 10.
//! The *displayed* checksum is stored separately and may disagree with the
//! computed one; that is how a forged registry is represented.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters per registry group.
pub const GROUP_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("registry letter group {0:?} must be 3 uppercase letters")]
    InvalidLetters(String),
    #[error("registry digit group {0:?} must be 3 digits")]
    InvalidDigits(String),
    #[error("displayed checksum {0} is not a single digit")]
    InvalidChecksum(u8),
    #[error("registry {0:?} is not in LLL-DDD form")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RegistryParts")]
pub struct Registry {
    letters: [u8; GROUP_LEN],
    digits: [u8; GROUP_LEN],
    displayed_checksum: u8,
}

impl Registry {
    /// Authentic registry: the displayed checksum is the computed one.
    pub fn new(letters: &str, digits: &str) -> Result<Self, RegistryError> {
        let letters = parse_group(letters, |b| b.is_ascii_uppercase())
            .ok_or_else(|| RegistryError::InvalidLetters(letters.to_string()))?;
        let digits = parse_group(digits, |b| b.is_ascii_digit())
            .ok_or_else(|| RegistryError::InvalidDigits(digits.to_string()))?;
        Ok(Self {
            letters,
            digits,
            displayed_checksum: compute_checksum(&letters, &digits),
        })
    }

    /// Registry showing an arbitrary checksum digit, possibly forged.
    pub fn with_checksum(letters: &str, digits: &str, displayed: u8) -> Result<Self, RegistryError> {
        if displayed > 9 {
            return Err(RegistryError::InvalidChecksum(displayed));
        }
        let mut registry = Self::new(letters, digits)?;
        registry.displayed_checksum = displayed;
        Ok(registry)
    }

    /// Authentic registry from alphabet positions: letter `i` is
    /// `'A' + i % 26`, digit `i` is `'0' + i % 10`.
    pub fn from_indices(letters: [u8; GROUP_LEN], digits: [u8; GROUP_LEN]) -> Self {
        let letters = letters.map(|i| b'A' + i % 26);
        let digits = digits.map(|i| b'0' + i % 10);
        Self {
            letters,
            digits,
            displayed_checksum: compute_checksum(&letters, &digits),
        }
    }

    /// Same registry showing `checksum % 10` instead.
    pub fn displaying(mut self, checksum: u8) -> Self {
        self.displayed_checksum = checksum % 10;
        self
    }

    /// Parse `"LLL-DDD"` into an authentic registry.
    pub fn parse(text: &str) -> Result<Self, RegistryError> {
        match text.split_once('-') {
            Some((letters, digits)) => Self::new(letters, digits),
            None => Err(RegistryError::Malformed(text.to_string())),
        }
    }

    pub fn letters(&self) -> &str {
        // Validated ASCII on construction.
        std::str::from_utf8(&self.letters).unwrap_or_default()
    }

    pub fn digits(&self) -> &str {
        std::str::from_utf8(&self.digits).unwrap_or_default()
    }

    pub fn displayed_checksum(&self) -> u8 {
        self.displayed_checksum
    }

    /// Checksum recomputed from the registry characters.
    pub fn checksum(&self) -> u8 {
        compute_checksum(&self.letters, &self.digits)
    }

    /// `false` for a forged registry.
    pub fn is_authentic(&self) -> bool {
        self.displayed_checksum == self.checksum()
    }
}

/// Unchecked wire form of a [`Registry`]; validated on the way in.
#[derive(Deserialize)]
struct RegistryParts {
    letters: [u8; GROUP_LEN],
    digits: [u8; GROUP_LEN],
    displayed_checksum: u8,
}

impl TryFrom<RegistryParts> for Registry {
    type Error = RegistryError;

    fn try_from(parts: RegistryParts) -> Result<Self, Self::Error> {
        if !parts.letters.iter().all(u8::is_ascii_uppercase) {
            return Err(RegistryError::InvalidLetters(
                String::from_utf8_lossy(&parts.letters).into_owned(),
            ));
        }
        if !parts.digits.iter().all(u8::is_ascii_digit) {
            return Err(RegistryError::InvalidDigits(
                String::from_utf8_lossy(&parts.digits).into_owned(),
            ));
        }
        if parts.displayed_checksum > 9 {
            return Err(RegistryError::InvalidChecksum(parts.displayed_checksum));
        }
        Ok(Self {
            letters: parts.letters,
            digits: parts.digits,
            displayed_checksum: parts.displayed_checksum,
        })
    }
}

impl std::fmt::Display for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.letters(), self.digits())
    }
}

fn parse_group(group: &str, valid: impl Fn(u8) -> bool) -> Option<[u8; GROUP_LEN]> {
    let bytes: [u8; GROUP_LEN] = group.as_bytes().try_into().ok()?;
    bytes.iter().all(|&b| valid(b)).then_some(bytes)
}

fn compute_checksum(letters: &[u8; GROUP_LEN], digits: &[u8; GROUP_LEN]) -> u8 {
    let sum: u32 = letters.iter().chain(digits.iter()).map(|&b| b as u32).sum();
    (sum % 10) as u8
}
