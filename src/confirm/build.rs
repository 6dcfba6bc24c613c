//! C4: the AP-side confirm element builder.

use crate::collab::aead_encrypt;
use crate::key_container::ApPkKeyContainer;
use crate::session::SaeConfirmContext;
use crate::transcript::transcript_hash;
use crate::wire::{
    EID_EXTENSION, EID_EXT_FILS_KEY_CONFIRM, EID_EXT_FILS_PUBLIC_KEY, EID_VENDOR_SPECIFIC,
    FILS_PUBLIC_KEY_TYPE_ECDSA, SAE_PK_VENDOR_TYPE,
};
use crate::{SaePkError, AES_BLOCK_SIZE, SAE_PK_M_LEN};

/// Builds the SAE-PK confirm vendor specific element for a session with a
/// bound AP key container.
///
/// Mirrors `sae_write_confirm_pk`'s "no key bound → no-op" behavior: when
/// `key` is `None` the element is simply not emitted (`Ok(None)`), since
/// SAE-PK is opportunistic per session rather than mandatory.
pub struct ApConfirmBuilder;

impl ApConfirmBuilder {
    /// Builds the element, checking it fits within `max_len` octets before
    /// returning it. Never partially constructs or mutates caller state;
    /// everything is assembled into a local buffer first.
    pub fn build(
        ctx: &SaeConfirmContext,
        key: Option<&ApPkKeyContainer>,
        kek: &[u8],
        max_len: usize,
    ) -> Result<Option<Vec<u8>>, SaePkError> {
        let key = match key {
            Some(key) => key,
            None => {
                log::debug!("SAE-PK: no AP key container bound, skipping confirm element");
                return Ok(None);
            }
        };

        if !matches!(kek.len(), 32 | 48 | 64) {
            return Err(SaePkError::KekUnavailable);
        }

        let pubkey = key.signing_key.verifying_key_spki_der()?;
        let hash = transcript_hash(ctx, true, key.m.expose(), &pubkey)?;
        let sig = key.signing_key.sign_prehash(&hash)?;

        let enc_m = aead_encrypt(kek, &[], key.m.expose())?;
        if enc_m.len() != SAE_PK_M_LEN + AES_BLOCK_SIZE {
            return Err(SaePkError::Internal(
                "AES-SIV ciphertext has unexpected length".into(),
            ));
        }

        let mut inner = Vec::with_capacity(1 + enc_m.len() + 4 + pubkey.len() + 3 + sig.len());
        inner.push(enc_m.len() as u8);
        inner.extend_from_slice(&enc_m);

        let pubkey_sub_len = 2 + pubkey.len();
        if pubkey_sub_len > u8::MAX as usize {
            return Err(SaePkError::Internal("pubkey too large for sub-element".into()));
        }
        inner.push(EID_EXTENSION);
        inner.push(pubkey_sub_len as u8);
        inner.push(EID_EXT_FILS_PUBLIC_KEY);
        inner.push(FILS_PUBLIC_KEY_TYPE_ECDSA);
        inner.extend_from_slice(&pubkey);

        let sig_sub_len = 1 + sig.len();
        if sig_sub_len > u8::MAX as usize {
            return Err(SaePkError::Internal("signature too large for sub-element".into()));
        }
        inner.push(EID_EXTENSION);
        inner.push(sig_sub_len as u8);
        inner.push(EID_EXT_FILS_KEY_CONFIRM);
        inner.extend_from_slice(&sig);

        let vendor_len = SAE_PK_VENDOR_TYPE.len() + inner.len();
        if vendor_len > u8::MAX as usize {
            return Err(SaePkError::Internal("confirm element too large".into()));
        }

        let total_len = 2 + vendor_len;
        if total_len > max_len {
            log::warn!("SAE-PK: confirm element ({total_len} octets) does not fit in {max_len}");
            return Err(SaePkError::NoRoom);
        }

        let mut out = Vec::with_capacity(total_len);
        out.push(EID_VENDOR_SPECIFIC);
        out.push(vendor_len as u8);
        out.extend_from_slice(&SAE_PK_VENDOR_TYPE);
        out.extend_from_slice(&inner);

        log::debug!("SAE-PK: built {}-octet confirm element for group {}", out.len(), ctx.group.as_u16());
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::SaeGroup;
    use p256::ecdsa::SigningKey;

    fn test_ctx() -> SaeConfirmContext {
        SaeConfirmContext::new(
            SaeGroup::Group19,
            vec![1u8; 64],
            vec![2u8; 64],
            vec![3u8; 32],
            vec![4u8; 32],
            [0x02, 0, 0, 0, 0, 1],
            [0x02, 0, 0, 0, 0, 2],
        )
        .unwrap()
    }

    fn test_key() -> ApPkKeyContainer {
        let signing_key = SigningKey::from_bytes(&[7u8; 32].into()).unwrap();
        ApPkKeyContainer {
            m: crate::secret::Secret::new(vec![9u8; SAE_PK_M_LEN]),
            signing_key: crate::collab::EcSigningKey::P256(signing_key),
            group: SaeGroup::Group19,
        }
    }

    #[test]
    fn no_key_container_is_a_no_op() {
        let ctx = test_ctx();
        let result = ApConfirmBuilder::build(&ctx, None, &[0u8; 32], 300).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn bad_kek_length_is_rejected() {
        let ctx = test_ctx();
        let key = test_key();
        let err = ApConfirmBuilder::build(&ctx, Some(&key), &[0u8; 24], 300);
        assert!(matches!(err, Err(SaePkError::KekUnavailable)));
    }

    #[test]
    fn insufficient_room_fails_without_partial_output() {
        let ctx = test_ctx();
        let key = test_key();
        let err = ApConfirmBuilder::build(&ctx, Some(&key), &[0u8; 32], 4);
        assert!(matches!(err, Err(SaePkError::NoRoom)));
    }

    #[test]
    fn builds_a_well_formed_element() {
        let ctx = test_ctx();
        let key = test_key();
        let elem = ApConfirmBuilder::build(&ctx, Some(&key), &[0u8; 32], 512)
            .unwrap()
            .unwrap();
        assert_eq!(elem[0], EID_VENDOR_SPECIFIC);
        assert_eq!(elem[2..6], SAE_PK_VENDOR_TYPE);
        assert_eq!(elem[6], (SAE_PK_M_LEN + AES_BLOCK_SIZE) as u8);
    }
}
