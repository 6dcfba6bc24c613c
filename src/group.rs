//! SAE group dispatch.
//!
//! SAE-PK only supports ECC groups. Rather than threading a raw `u16` group
//! number (and a `match` with a panicking fallback arm) through every
//! function that needs a hash or prime length, the three supported groups
//! are represented as a closed enum and the lengths hang off it.

use crate::SaePkError;

/// One of the three ECC groups SAE-PK supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaeGroup {
    /// NIST P-256, SHA-256, 32-octet prime.
    Group19,
    /// NIST P-384, SHA-384, 48-octet prime.
    Group20,
    /// NIST P-521, SHA-512, 66-octet prime.
    Group21,
}

impl SaeGroup {
    /// Maps an IANA SAE group number onto a [`SaeGroup`], failing closed for
    /// anything outside `{19, 20, 21}`.
    pub fn from_u16(group: u16) -> Result<Self, SaePkError> {
        match group {
            19 => Ok(SaeGroup::Group19),
            20 => Ok(SaeGroup::Group20),
            21 => Ok(SaeGroup::Group21),
            _ => Err(SaePkError::UnsupportedGroup),
        }
    }

    /// The IANA group number.
    pub fn as_u16(self) -> u16 {
        match self {
            SaeGroup::Group19 => 19,
            SaeGroup::Group20 => 20,
            SaeGroup::Group21 => 21,
        }
    }

    /// Hash output length in octets: 32 / 48 / 64 for group 19 / 20 / 21.
    pub fn hash_len(self) -> usize {
        match self {
            SaeGroup::Group19 => 32,
            SaeGroup::Group20 => 48,
            SaeGroup::Group21 => 64,
        }
    }

    /// Field prime length in octets: 32 / 48 / 66 for group 19 / 20 / 21.
    pub fn prime_len(self) -> usize {
        match self {
            SaeGroup::Group19 => 32,
            SaeGroup::Group20 => 48,
            SaeGroup::Group21 => 66,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u16_accepts_only_ecc_groups() {
        assert_eq!(SaeGroup::from_u16(19).unwrap(), SaeGroup::Group19);
        assert_eq!(SaeGroup::from_u16(20).unwrap(), SaeGroup::Group20);
        assert_eq!(SaeGroup::from_u16(21).unwrap(), SaeGroup::Group21);
        assert!(SaeGroup::from_u16(22).is_err());
        assert!(SaeGroup::from_u16(0).is_err());
    }

    #[test]
    fn lengths_match_spec_table() {
        assert_eq!(SaeGroup::Group19.hash_len(), 32);
        assert_eq!(SaeGroup::Group20.hash_len(), 48);
        assert_eq!(SaeGroup::Group21.hash_len(), 64);
        assert_eq!(SaeGroup::Group19.prime_len(), 32);
        assert_eq!(SaeGroup::Group20.prime_len(), 48);
        assert_eq!(SaeGroup::Group21.prime_len(), 66);
    }
}
