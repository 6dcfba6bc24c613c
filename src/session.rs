//! The per-handshake material the confirm builder/parser need, gathered from
//! the SAE commit exchange collaborator (§6 "SAE core") into one validated
//! struct so [`crate::transcript`] never has to guess a field's width.

use crate::group::SaeGroup;
use crate::SaePkError;

/// Commit-stage and identity values a completed SAE commit exchange has
/// already produced, needed to rebuild the signed transcript on either side.
///
/// `own_*`/`peer_*` are from the caller's point of view: on the AP these are
/// the AP's own values / the STA's values, and vice versa on the STA.
/// [`crate::transcript::transcript_hash`] maps them onto the transcript's
/// fixed AP/STA slots using its `ap` argument.
pub struct SaeConfirmContext {
    pub group: SaeGroup,
    /// This side's commit element, `X || Y`, each coordinate `prime_len`
    /// octets wide.
    pub own_commit_element: Vec<u8>,
    /// The peer's commit element, same width.
    pub peer_commit_element: Vec<u8>,
    /// This side's commit scalar, `prime_len` octets.
    pub own_commit_scalar: Vec<u8>,
    /// The peer's commit scalar, same width.
    pub peer_commit_scalar: Vec<u8>,
    /// This side's MAC address (AP's BSSID, or the STA's MAC).
    pub own_addr: [u8; 6],
    /// The peer's MAC address.
    pub peer_addr: [u8; 6],
}

impl SaeConfirmContext {
    /// Builds a context, checking that every commit value already has the
    /// width its group implies instead of deferring that check to the first
    /// transcript hash.
    pub fn new(
        group: SaeGroup,
        own_commit_element: Vec<u8>,
        peer_commit_element: Vec<u8>,
        own_commit_scalar: Vec<u8>,
        peer_commit_scalar: Vec<u8>,
        own_addr: [u8; 6],
        peer_addr: [u8; 6],
    ) -> Result<Self, SaePkError> {
        let prime_len = group.prime_len();
        let elem_len = 2 * prime_len;
        if own_commit_element.len() != elem_len
            || peer_commit_element.len() != elem_len
            || own_commit_scalar.len() != prime_len
            || peer_commit_scalar.len() != prime_len
        {
            return Err(SaePkError::Internal(
                "commit value width does not match the negotiated group".into(),
            ));
        }
        Ok(SaeConfirmContext {
            group,
            own_commit_element,
            peer_commit_element,
            own_commit_scalar,
            peer_commit_scalar,
            own_addr,
            peer_addr,
        })
    }
}
