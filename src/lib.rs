//! SAE-PK confirm-stage message construction and verification.
//!
//! This crate implements the station (STA) and access point (AP) halves of
//! the SAE-PK ("Simultaneous Authentication of Equals, Public Key")
//! confirm-message exchange used by WPA3 to bind a human-memorable password
//! to an AP public key. It covers:
//!
//! - [`base32`]: the custom lowercase RFC 4648 base-32 password encoding.
//! - [`transcript`]: the canonical SAE-PK signed transcript and hash dispatch.
//! - [`fingerprint`]: re-deriving and constant-time-comparing the password
//!   fingerprint against a candidate AP public key.
//! - [`confirm`]: the AP-side element builder and STA-side element parser.
//! - [`key_container`]: parsing the AP's provisioning string into a usable
//!   signing key, modifier, and public key.
//!
//! Everything outside this crate (the SAE commit/confirm exchange proper,
//! EC point/scalar arithmetic beyond encoding, and the surrounding station
//! configuration and management-frame plumbing) is a collaborator this
//! crate consumes rather than implements. See [`collab`] for how those
//! contracts are realized with concrete RustCrypto-family crates.
//!
//! Fragmentation and reassembly of the confirm element across multiple IE
//! fragments, non-ECC SAE groups, and persisting a validated `K_AP` into a
//! network profile are all out of scope; see `DESIGN.md` for the reasoning.

pub mod base32;
pub mod collab;
pub mod confirm;
pub mod fingerprint;
pub mod group;
pub mod key_container;
pub mod secret;
pub mod session;
pub mod transcript;
pub mod wire;

pub use confirm::{ApConfirmBuilder, ConfirmOutcome, StaConfirmParser, VerifiedApKey};
pub use group::SaeGroup;
pub use key_container::ApPkKeyContainer;
pub use session::SaeConfirmContext;

use thiserror::Error;

/// Length in octets of the AP-chosen Modifier M.
pub const SAE_PK_M_LEN: usize = 16;

/// AES block size, also the AES-SIV authentication tag length.
pub const AES_BLOCK_SIZE: usize = 16;

/// Every failure this crate can produce surfaces as one of these variants.
///
/// No error is recovered locally and no partial wire output is ever left
/// behind on a failure path; see the module-level docs on [`confirm`] for
/// the atomicity guarantee on the builder side.
#[derive(Error, Debug)]
pub enum SaePkError {
    #[error("password does not meet SAE-PK validity requirements")]
    PasswordInvalid,

    #[error("malformed AP-PK provisioning string")]
    BadProvisioning,

    #[error("unsupported or non-ECC SAE group")]
    UnsupportedGroup,

    #[error("no usable key-encryption key for this session")]
    KekUnavailable,

    #[error("malformed SAE-PK confirm element: {0}")]
    WireMalformed(&'static str),

    #[error("AES-SIV authentication failed while decrypting the modifier")]
    AuthFail,

    #[error("K_AP fingerprint does not match the configured password")]
    FingerprintMismatch,

    #[error("K_AP group does not match the negotiated SAE group")]
    GroupMismatch,

    #[error("KeyAuth signature verification failed")]
    SignatureInvalid,

    #[error("insufficient room in the output buffer for the SAE-PK element")]
    NoRoom,

    #[error("internal collaborator failure: {0}")]
    Internal(String),
}
