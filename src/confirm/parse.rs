//! C5: the STA-side confirm element parser, the inverse of
//! [`super::build::ApConfirmBuilder`].

use crate::collab::{aead_decrypt, EcVerifyingKey};
use crate::fingerprint::verify_fingerprint;
use crate::group::SaeGroup;
use crate::secret::Secret;
use crate::session::SaeConfirmContext;
use crate::transcript::transcript_hash;
use crate::wire::{
    find_vendor_ie, EID_EXTENSION, EID_EXT_FILS_KEY_CONFIRM, EID_EXT_FILS_PUBLIC_KEY,
    FILS_PUBLIC_KEY_TYPE_ECDSA,
};
use crate::SaePkError;
use crate::{AES_BLOCK_SIZE, SAE_PK_M_LEN};

/// The AP identity a successful parse has verified: its public key, now
/// bound to the password via the fingerprint check and to the transcript via
/// the KeyAuth signature.
pub struct VerifiedApKey {
    pub pubkey_der: Vec<u8>,
    pub group: SaeGroup,
    pub m: Secret<Vec<u8>>,
}

/// Distinguishes "nothing to verify here" from an actual verified result,
/// mirroring `sae_check_confirm_pk`'s benign-no-op vs. hard-failure `int`
/// return convention more precisely than a flat boolean would. A benign
/// no-op is `Ok(ConfirmOutcome::NotApplicable)`; only genuine parse or
/// cryptographic failures are `Err(SaePkError::...)`.
pub enum ConfirmOutcome {
    NotApplicable,
    Verified(VerifiedApKey),
}

pub struct StaConfirmParser;

impl StaConfirmParser {
    /// Parses and verifies the SAE-PK confirm element among `ies`, if SAE-PK
    /// is applicable to this session (`sae_pk_enabled`) and no AP key is
    /// already pinned (`already_pinned`).
    pub fn parse(
        ctx: &SaeConfirmContext,
        ies: &[u8],
        kek: &[u8],
        ssid: &[u8],
        pw: &[u8],
        lambda: usize,
        sae_pk_enabled: bool,
        already_pinned: bool,
    ) -> Result<ConfirmOutcome, SaePkError> {
        if !sae_pk_enabled || already_pinned {
            log::debug!("SAE-PK: not applicable to this session, skipping confirm parse");
            return Ok(ConfirmOutcome::NotApplicable);
        }
        if !matches!(kek.len(), 32 | 48 | 64) {
            return Err(SaePkError::KekUnavailable);
        }

        let body = find_vendor_ie(ies).ok_or(SaePkError::WireMalformed("SAE-PK vendor element not found"))?;

        let enc_len_pos = 0usize;
        if body.len() < enc_len_pos + 1 {
            return Err(SaePkError::WireMalformed("truncated before EncryptedModifier length"));
        }
        let enc_len = body[enc_len_pos] as usize;
        if enc_len != SAE_PK_M_LEN + AES_BLOCK_SIZE {
            return Err(SaePkError::WireMalformed("unexpected EncryptedModifier length"));
        }
        let mut pos = enc_len_pos + 1;
        if body.len() < pos + enc_len {
            return Err(SaePkError::WireMalformed("truncated EncryptedModifier"));
        }
        let enc_m = &body[pos..pos + enc_len];
        pos += enc_len;

        if body.len() < pos + 2 {
            return Err(SaePkError::WireMalformed("truncated before FILS Public Key sub-element"));
        }
        if body[pos] != EID_EXTENSION {
            return Err(SaePkError::WireMalformed("expected FILS Public Key extension ID"));
        }
        let pk_sub_len = body[pos + 1] as usize;
        if pk_sub_len < 2 || pos + 2 + pk_sub_len > body.len() {
            return Err(SaePkError::WireMalformed("FILS Public Key sub-element length out of range"));
        }
        if body[pos + 2] != EID_EXT_FILS_PUBLIC_KEY {
            return Err(SaePkError::WireMalformed("expected FILS Public Key extension ID"));
        }
        if body[pos + 3] != FILS_PUBLIC_KEY_TYPE_ECDSA {
            return Err(SaePkError::WireMalformed("unsupported FILS Public Key key type"));
        }
        let k_ap_der = &body[pos + 4..pos + 2 + pk_sub_len];
        pos += 2 + pk_sub_len;

        if body.len() < pos + 2 {
            return Err(SaePkError::WireMalformed("truncated before FILS Key Confirmation sub-element"));
        }
        if body[pos] != EID_EXTENSION {
            return Err(SaePkError::WireMalformed("expected FILS Key Confirmation extension ID"));
        }
        let sig_sub_len = body[pos + 1] as usize;
        if sig_sub_len < 1 || pos + 2 + sig_sub_len > body.len() {
            return Err(SaePkError::WireMalformed("FILS Key Confirmation sub-element length out of range"));
        }
        if body[pos + 2] != EID_EXT_FILS_KEY_CONFIRM {
            return Err(SaePkError::WireMalformed("expected FILS Key Confirmation extension ID"));
        }
        let key_auth = &body[pos + 3..pos + 2 + sig_sub_len];
        pos += 2 + sig_sub_len;

        if pos < body.len() {
            log::debug!("SAE-PK: {} trailing octets after Key Confirmation, ignoring", body.len() - pos);
        }

        let m = aead_decrypt(kek, &[], enc_m)?;

        let k_ap = EcVerifyingKey::from_public_key_der(k_ap_der)?;
        let group = k_ap.group();

        verify_fingerprint(pw, lambda, ssid, &m, k_ap_der, group)?;

        if group != ctx.group {
            log::warn!("SAE-PK: K_AP group {} does not match session group {}", group.as_u16(), ctx.group.as_u16());
            return Err(SaePkError::GroupMismatch);
        }

        let hash = transcript_hash(ctx, false, &m, k_ap_der)?;
        k_ap.verify_prehash(&hash, key_auth)?;

        log::debug!("SAE-PK: confirm element verified for group {}", group.as_u16());
        Ok(ConfirmOutcome::Verified(VerifiedApKey {
            pubkey_der: k_ap_der.to_vec(),
            group,
            m: Secret::new(m),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::build::ApConfirmBuilder;
    use crate::key_container::ApPkKeyContainer;
    use p256::ecdsa::SigningKey;

    fn test_ctx(ap: bool) -> SaeConfirmContext {
        let own_elem = vec![1u8; 64];
        let peer_elem = vec![2u8; 64];
        let own_sca = vec![3u8; 32];
        let peer_sca = vec![4u8; 32];
        let ap_addr = [0x02, 0, 0, 0, 0, 1];
        let sta_addr = [0x02, 0, 0, 0, 0, 2];
        if ap {
            SaeConfirmContext::new(SaeGroup::Group19, own_elem, peer_elem, own_sca, peer_sca, ap_addr, sta_addr)
                .unwrap()
        } else {
            SaeConfirmContext::new(SaeGroup::Group19, peer_elem, own_elem, peer_sca, own_sca, sta_addr, ap_addr)
                .unwrap()
        }
    }

    fn test_key() -> ApPkKeyContainer {
        let signing_key = SigningKey::from_bytes(&[7u8; 32].into()).unwrap();
        ApPkKeyContainer {
            m: Secret::new(vec![9u8; SAE_PK_M_LEN]),
            signing_key: crate::collab::EcSigningKey::P256(signing_key),
            group: SaeGroup::Group19,
        }
    }

    fn matching_password(ssid: &[u8], m: &[u8], k_ap_der: &[u8]) -> (Vec<u8>, usize) {
        // Construct a password whose fingerprint matches the given M/K_AP,
        // the same way fingerprint.rs's own unit tests do.
        let group = SaeGroup::Group19;
        let sec = 3u8;
        let lambda = 16usize;
        let mut hash_data = Vec::new();
        hash_data.extend_from_slice(ssid);
        hash_data.extend_from_slice(m);
        hash_data.extend_from_slice(k_ap_der);
        let mut hash = crate::transcript::hash_group(group, &hash_data);
        let fingerprint_bits = 8 * sec as usize + 5 * lambda - 2;
        if fingerprint_bits % 8 != 0 {
            let extra = 8 - fingerprint_bits % 8;
            let pos = fingerprint_bits / 8;
            hash[pos] = (hash[pos] >> extra) << extra;
        }
        let fingerprint_bytes = (fingerprint_bits + 7) / 8;
        let mut pw = vec![0u8; 11];
        pw[0] = sec.wrapping_sub(2) << 6;
        for i in 0..pw.len().min(fingerprint_bytes.saturating_sub(sec as usize)) {
            let byte = hash[sec as usize + i];
            pw[i] |= byte >> 2;
            if i + 1 < pw.len() {
                pw[i + 1] |= (byte & 0x03) << 6;
            }
        }
        (pw, lambda)
    }

    #[test]
    fn not_applicable_when_sae_pk_disabled() {
        let ctx = test_ctx(false);
        let outcome = StaConfirmParser::parse(&ctx, &[], &[0u8; 32], b"ssid", b"pw", 1, false, false).unwrap();
        assert!(matches!(outcome, ConfirmOutcome::NotApplicable));
    }

    #[test]
    fn not_applicable_when_already_pinned() {
        let ctx = test_ctx(false);
        let outcome = StaConfirmParser::parse(&ctx, &[], &[0u8; 32], b"ssid", b"pw", 1, true, true).unwrap();
        assert!(matches!(outcome, ConfirmOutcome::NotApplicable));
    }

    #[test]
    fn full_build_then_parse_round_trip_succeeds() {
        let ap_ctx = test_ctx(true);
        let sta_ctx = test_ctx(false);
        let key = test_key();
        let kek = [5u8; 32];
        let ssid = b"roundtrip-ssid";

        let elem = ApConfirmBuilder::build(&ap_ctx, Some(&key), &kek, 1024).unwrap().unwrap();

        let pubkey = key.signing_key.verifying_key_spki_der().unwrap();
        let (pw, lambda) = matching_password(ssid, key.m.expose(), &pubkey);

        let outcome = StaConfirmParser::parse(&sta_ctx, &elem, &kek, ssid, &pw, lambda, true, false).unwrap();
        match outcome {
            ConfirmOutcome::Verified(verified) => {
                assert_eq!(verified.group, SaeGroup::Group19);
                assert_eq!(verified.pubkey_der, pubkey);
            }
            ConfirmOutcome::NotApplicable => panic!("expected a verified outcome"),
        }
    }

    #[test]
    fn tampered_ciphertext_fails_with_auth_error() {
        let ap_ctx = test_ctx(true);
        let sta_ctx = test_ctx(false);
        let key = test_key();
        let kek = [5u8; 32];
        let ssid = b"roundtrip-ssid";

        let mut elem = ApConfirmBuilder::build(&ap_ctx, Some(&key), &kek, 1024).unwrap().unwrap();
        elem[7] ^= 0xFF; // inside enc_m

        let pubkey = key.signing_key.verifying_key_spki_der().unwrap();
        let (pw, lambda) = matching_password(ssid, key.m.expose(), &pubkey);

        let err = StaConfirmParser::parse(&sta_ctx, &elem, &kek, ssid, &pw, lambda, true, false);
        assert!(matches!(err, Err(SaePkError::AuthFail)));
    }

    #[test]
    fn vendor_element_absent_is_a_wire_error() {
        let ctx = test_ctx(false);
        let err = StaConfirmParser::parse(&ctx, &[1, 2, 3], &[0u8; 32], b"ssid", b"pw", 1, true, false);
        assert!(matches!(err, Err(SaePkError::WireMalformed(_))));
    }
}
