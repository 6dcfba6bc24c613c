//! Fingerprint re-derivation and constant-time comparison (§4.3).
//!
//! `Fingerprint = L(Hash(SSID || M || K_AP), 0, 8*Sec + 5*Lambda - 2)`,
//! compared against the password bytes shifted left by 2 bits. Ported
//! instruction-for-instruction from hostap's `sae_pk_valid_fingerprint`,
//! including the exact trailing-bit-clearing and byte-shift arithmetic.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::group::SaeGroup;
use crate::transcript::hash_group;
use crate::SaePkError;

/// Re-derives the expected fingerprint from `pw`/`lambda` and compares it,
/// in constant time, against `Hash(ssid || m || k_ap)` truncated to the
/// width the password's `Sec` parameter implies.
///
/// All intermediate buffers holding password- or hash-derived material are
/// zeroized before returning, on every exit path.
pub fn verify_fingerprint(
    pw: &[u8],
    lambda: usize,
    ssid: &[u8],
    m: &[u8],
    k_ap: &[u8],
    group: SaeGroup,
) -> Result<(), SaePkError> {
    if pw.is_empty() {
        log::debug!("SAE-PK: no password available for K_AP fingerprint check");
        return Err(SaePkError::FingerprintMismatch);
    }

    let mut hash_data = Vec::with_capacity(ssid.len() + m.len() + k_ap.len());
    hash_data.extend_from_slice(ssid);
    hash_data.extend_from_slice(m);
    hash_data.extend_from_slice(k_ap);
    let mut hash = hash_group(group, &hash_data);
    hash_data.zeroize();

    let sec = (pw[0] >> 6) as usize + 2;
    let hash_len = group.hash_len();
    let fingerprint_bits = 8 * sec + 5 * lambda - 2;
    log::debug!("SAE-PK: Sec={sec} Lambda={lambda} fingerprint_bits={fingerprint_bits}");

    if fingerprint_bits > hash_len * 8 {
        log::info!("SAE-PK: not enough hash output bits for the fingerprint");
        hash.zeroize();
        return Err(SaePkError::FingerprintMismatch);
    }

    let fingerprint_bytes = (fingerprint_bits + 7) / 8;
    if fingerprint_bits % 8 != 0 {
        let extra = 8 - fingerprint_bits % 8;
        let pos = fingerprint_bits / 8;
        hash[pos] = (hash[pos] >> extra) << extra;
    }

    let mut fingerprint_exp = vec![0u8; sec + pw.len()];
    for i in 0..pw.len() {
        let next = if i + 1 < pw.len() { pw[i + 1] } else { 0 };
        fingerprint_exp[sec + i] = (pw[i] << 2) | (next >> 6);
    }

    if fingerprint_bytes > fingerprint_exp.len() || fingerprint_bytes > hash.len() {
        hash.zeroize();
        fingerprint_exp.zeroize();
        return Err(SaePkError::FingerprintMismatch);
    }

    let matches: bool = hash[..fingerprint_bytes]
        .ct_eq(&fingerprint_exp[..fingerprint_bytes])
        .into();

    hash.zeroize();
    fingerprint_exp.zeroize();

    if matches {
        log::debug!("SAE-PK: valid K_AP fingerprint");
        Ok(())
    } else {
        log::debug!("SAE-PK: K_AP fingerprint mismatch");
        Err(SaePkError::FingerprintMismatch)
    }
}
