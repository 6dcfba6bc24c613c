//! C6: parsing an AP's provisioning string into a usable key container.
//!
//! The provisioning format is `<hex(M)>:<base64(DER private key)>`, a fixed
//! 16-octet modifier followed by a PKCS#8 DER-encoded EC private key, the
//! group inferred from the key's curve the same way [`crate::collab`] infers
//! it everywhere else.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::collab::EcSigningKey;
use crate::group::SaeGroup;
use crate::secret::Secret;
use crate::SaePkError;
use crate::SAE_PK_M_LEN;

/// An AP's bound SAE-PK identity: the fixed modifier `M`, the KeyAuth signing
/// key, and its group (redundant with the key but cached to avoid re-deriving
/// it on every build).
pub struct ApPkKeyContainer {
    pub m: Secret<Vec<u8>>,
    pub signing_key: EcSigningKey,
    pub group: SaeGroup,
}

impl ApPkKeyContainer {
    /// Parses `<hex(M)>:<base64(DER private key)>`, failing with
    /// [`SaePkError::BadProvisioning`] on any structural problem: missing
    /// separator, malformed hex/base64, wrong modifier length, or a key that
    /// isn't one of the three supported curves.
    pub fn from_provisioning_string(s: &str) -> Result<Self, SaePkError> {
        let (m_hex, key_b64) = s.split_once(':').ok_or(SaePkError::BadProvisioning)?;

        let m = hex::decode(m_hex).map_err(|_| SaePkError::BadProvisioning)?;
        if m.len() != SAE_PK_M_LEN {
            log::warn!("SAE-PK: provisioning string has a {}-octet modifier, expected {}", m.len(), SAE_PK_M_LEN);
            return Err(SaePkError::BadProvisioning);
        }

        let der = BASE64.decode(key_b64.trim()).map_err(|_| SaePkError::BadProvisioning)?;
        let signing_key = EcSigningKey::from_pkcs8_der(&der)?;
        let group = signing_key.group();

        log::debug!("SAE-PK: loaded AP-PK key container for group {}", group.as_u16());

        Ok(ApPkKeyContainer {
            m: Secret::new(m),
            signing_key,
            group,
        })
    }
}
