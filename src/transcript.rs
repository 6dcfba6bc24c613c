//! The canonical SAE-PK signed transcript and its hash.
//!
//! KeyAuth signs `Hash(eleAP || eleSTA || scaAP || scaSTA || M || K_AP ||
//! AP-BSSID || STA-MAC)`. The field order and widths are taken verbatim from
//! hostap's `sae_pk_hash_sig_data`. The byte layout
//! is built with a single append-only, pre-sized buffer and width-checked
//! primitives rather than ad hoc concatenation, so a width mismatch is a
//! caught error instead of a silently misaligned transcript.

use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::group::SaeGroup;
use crate::session::SaeConfirmContext;
use crate::SaePkError;

/// Hashes `data` with the hash function the group selects.
pub fn hash_group(group: SaeGroup, data: &[u8]) -> Vec<u8> {
    match group {
        SaeGroup::Group19 => Sha256::digest(data).to_vec(),
        SaeGroup::Group20 => Sha384::digest(data).to_vec(),
        SaeGroup::Group21 => Sha512::digest(data).to_vec(),
    }
}

/// An append-only builder for the signed transcript, pre-sized from the
/// group's prime length and the variable-length fields it will hold.
pub struct TranscriptBuilder {
    buf: Vec<u8>,
}

impl TranscriptBuilder {
    pub fn with_capacity(cap: usize) -> Self {
        TranscriptBuilder { buf: Vec::with_capacity(cap) }
    }

    /// Appends `bytes` verbatim.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Left-pads `value` with zeros to exactly `width` octets and appends
    /// it. Fails if `value` is already wider than `width`.
    pub fn put_fixed_width(&mut self, value: &[u8], width: usize) -> Result<(), SaePkError> {
        if value.len() > width {
            return Err(SaePkError::Internal(
                "transcript field wider than its fixed width".into(),
            ));
        }
        let pad = width - value.len();
        self.buf.extend(std::iter::repeat(0u8).take(pad));
        self.buf.extend_from_slice(value);
        Ok(())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Encodes a curve point as `X || Y`, each coordinate left-padded to
/// `prime_len` octets, the uncompressed-affine wire width every point
/// representation in this crate uses.
pub fn encode_point(x: &[u8], y: &[u8], prime_len: usize) -> Result<Vec<u8>, SaePkError> {
    let mut builder = TranscriptBuilder::with_capacity(2 * prime_len);
    builder.put_fixed_width(x, prime_len)?;
    builder.put_fixed_width(y, prime_len)?;
    Ok(builder.finish())
}

/// Computes `Hash(eleAP || eleSTA || scaAP || scaSTA || M || K_AP ||
/// AP-BSSID || STA-MAC)` for the given role.
///
/// `ap` selects which session-held values take the AP vs. STA positions:
/// when the caller is the AP, `ap = true` puts its own commit values in the
/// `*_AP` slots; when the caller is the STA, `ap = false` does the same with
/// its own values in the `*_STA` slots. `m` and `pubkey` are passed in
/// explicitly because the builder uses `m`/`K_AP` values that may not be the
/// ones already bound to `ctx` (the STA side decrypts and parses them fresh
/// from the wire before calling this).
pub fn transcript_hash(
    ctx: &SaeConfirmContext,
    ap: bool,
    m: &[u8],
    pubkey: &[u8],
) -> Result<Vec<u8>, SaePkError> {
    let prime_len = ctx.group.prime_len();
    let elem_len = 2 * prime_len;

    if ctx.own_commit_element.len() != elem_len || ctx.peer_commit_element.len() != elem_len {
        return Err(SaePkError::Internal(
            "commit element has unexpected width for this group".into(),
        ));
    }

    let mut builder =
        TranscriptBuilder::with_capacity(2 * elem_len + 2 * prime_len + m.len() + pubkey.len() + 12);

    let (ele_ap, ele_sta) = if ap {
        (&ctx.own_commit_element, &ctx.peer_commit_element)
    } else {
        (&ctx.peer_commit_element, &ctx.own_commit_element)
    };
    builder.put_bytes(ele_ap);
    builder.put_bytes(ele_sta);

    let (sca_ap, sca_sta) = if ap {
        (&ctx.own_commit_scalar, &ctx.peer_commit_scalar)
    } else {
        (&ctx.peer_commit_scalar, &ctx.own_commit_scalar)
    };
    builder.put_fixed_width(sca_ap, prime_len)?;
    builder.put_fixed_width(sca_sta, prime_len)?;

    builder.put_bytes(m);
    builder.put_bytes(pubkey);

    let (bssid_ap, mac_sta) = if ap {
        (ctx.own_addr, ctx.peer_addr)
    } else {
        (ctx.peer_addr, ctx.own_addr)
    };
    builder.put_bytes(&bssid_ap);
    builder.put_bytes(&mac_sta);

    Ok(hash_group(ctx.group, &builder.finish()))
}
