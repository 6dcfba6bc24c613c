//! External collaborators §6: the ECDSA (KeyAuth) signature primitive and the
//! AES-SIV AEAD primitive the confirm element is built and checked against.
//!
//! Both are modeled as closed enums dispatching on [`SaeGroup`]/KEK length
//! rather than trait objects, since the set of curves and key sizes SAE-PK
//! supports is fixed to three groups.

use aes_siv::siv::Siv;
use aes_siv::KeyInit;
use cmac::Cmac;
use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use elliptic_curve::pkcs8::{DecodePrivateKey, DecodePublicKey};

use crate::group::SaeGroup;
use crate::SaePkError;

/// AES-128/192/256-SIV, hand-assembled from the generic [`Siv`] construction
/// since `aes_siv` only ships `*SivAead` (RFC 5297 `SIV-AES` wrapped as an
/// `Aead` impl with an implicit empty nonce) as root-level convenience
/// aliases, not the raw multi-header S2V `Siv` construction this module
/// needs.
type Aes128Siv = Siv<aes::Aes128, Cmac<aes::Aes128>>;
type Aes192Siv = Siv<aes::Aes192, Cmac<aes::Aes192>>;
type Aes256Siv = Siv<aes::Aes256, Cmac<aes::Aes256>>;

/// A KeyAuth private signing key, one of the three curves SAE-PK supports.
pub enum EcSigningKey {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    // p521 0.13's `p521::ecdsa::SigningKey` is a hand-rolled newtype that
    // (unlike p256/p384, which alias the generic `ecdsa::SigningKey<C>`
    // directly) does not implement pkcs8 decode/encode or DER signatures.
    // Using the generic type it wraps, instantiated over the same curve
    // marker, gets the identical P-521 ECDSA behavior with those impls.
    P521(ecdsa::SigningKey<p521::NistP521>),
}

/// The corresponding public key, as carried in the FILS Public Key element.
pub enum EcVerifyingKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    P521(ecdsa::VerifyingKey<p521::NistP521>),
}

impl EcSigningKey {
    /// Parses a PKCS#8 DER private key, inferring the group from the curve
    /// it names.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, SaePkError> {
        if let Ok(k) = p256::ecdsa::SigningKey::from_pkcs8_der(der) {
            return Ok(EcSigningKey::P256(k));
        }
        if let Ok(k) = p384::ecdsa::SigningKey::from_pkcs8_der(der) {
            return Ok(EcSigningKey::P384(k));
        }
        if let Ok(k) = ecdsa::SigningKey::<p521::NistP521>::from_pkcs8_der(der) {
            return Ok(EcSigningKey::P521(k));
        }
        Err(SaePkError::BadProvisioning)
    }

    pub fn group(&self) -> SaeGroup {
        match self {
            EcSigningKey::P256(_) => SaeGroup::Group19,
            EcSigningKey::P384(_) => SaeGroup::Group20,
            EcSigningKey::P521(_) => SaeGroup::Group21,
        }
    }

    /// The SubjectPublicKeyInfo DER encoding of the matching public key, as
    /// transmitted in the FILS Public Key element and bound into the signed
    /// transcript.
    pub fn verifying_key_spki_der(&self) -> Result<Vec<u8>, SaePkError> {
        use elliptic_curve::pkcs8::EncodePublicKey;
        let der = match self {
            EcSigningKey::P256(k) => k
                .verifying_key()
                .to_public_key_der()
                .map_err(|_| SaePkError::Internal("SPKI encode failed".into()))?,
            EcSigningKey::P384(k) => k
                .verifying_key()
                .to_public_key_der()
                .map_err(|_| SaePkError::Internal("SPKI encode failed".into()))?,
            EcSigningKey::P521(k) => k
                .verifying_key()
                .to_public_key_der()
                .map_err(|_| SaePkError::Internal("SPKI encode failed".into()))?,
        };
        Ok(der.as_bytes().to_vec())
    }

    /// Signs an already-computed transcript hash (never re-hashes it), DER
    /// encoding the resulting signature.
    pub fn sign_prehash(&self, hash: &[u8]) -> Result<Vec<u8>, SaePkError> {
        match self {
            EcSigningKey::P256(k) => {
                let sig: p256::ecdsa::DerSignature = k
                    .sign_prehash(hash)
                    .map_err(|_| SaePkError::Internal("ECDSA sign failed".into()))?;
                Ok(sig.to_bytes().to_vec())
            }
            EcSigningKey::P384(k) => {
                let sig: p384::ecdsa::DerSignature = k
                    .sign_prehash(hash)
                    .map_err(|_| SaePkError::Internal("ECDSA sign failed".into()))?;
                Ok(sig.to_bytes().to_vec())
            }
            EcSigningKey::P521(k) => {
                let sig: ecdsa::der::Signature<p521::NistP521> = k
                    .sign_prehash(hash)
                    .map_err(|_| SaePkError::Internal("ECDSA sign failed".into()))?;
                Ok(sig.to_bytes().to_vec())
            }
        }
    }
}

impl EcVerifyingKey {
    /// Parses a SubjectPublicKeyInfo DER public key, inferring the group.
    pub fn from_public_key_der(der: &[u8]) -> Result<Self, SaePkError> {
        if let Ok(k) = p256::ecdsa::VerifyingKey::from_public_key_der(der) {
            return Ok(EcVerifyingKey::P256(k));
        }
        if let Ok(k) = p384::ecdsa::VerifyingKey::from_public_key_der(der) {
            return Ok(EcVerifyingKey::P384(k));
        }
        if let Ok(k) = ecdsa::VerifyingKey::<p521::NistP521>::from_public_key_der(der) {
            return Ok(EcVerifyingKey::P521(k));
        }
        Err(SaePkError::WireMalformed("FILS public key is not a supported EC SPKI"))
    }

    pub fn group(&self) -> SaeGroup {
        match self {
            EcVerifyingKey::P256(_) => SaeGroup::Group19,
            EcVerifyingKey::P384(_) => SaeGroup::Group20,
            EcVerifyingKey::P521(_) => SaeGroup::Group21,
        }
    }

    /// Verifies a DER signature over an already-computed transcript hash.
    pub fn verify_prehash(&self, hash: &[u8], der_sig: &[u8]) -> Result<(), SaePkError> {
        let ok = match self {
            EcVerifyingKey::P256(k) => {
                let sig = p256::ecdsa::DerSignature::try_from(der_sig)
                    .map_err(|_| SaePkError::SignatureInvalid)?;
                k.verify_prehash(hash, &sig).is_ok()
            }
            EcVerifyingKey::P384(k) => {
                let sig = p384::ecdsa::DerSignature::try_from(der_sig)
                    .map_err(|_| SaePkError::SignatureInvalid)?;
                k.verify_prehash(hash, &sig).is_ok()
            }
            EcVerifyingKey::P521(k) => {
                let sig = <ecdsa::der::Signature<p521::NistP521>>::try_from(der_sig)
                    .map_err(|_| SaePkError::SignatureInvalid)?;
                k.verify_prehash(hash, &sig).is_ok()
            }
        };
        if ok {
            Ok(())
        } else {
            log::debug!("SAE-PK: KeyAuth signature verification failed");
            Err(SaePkError::SignatureInvalid)
        }
    }
}

/// Encrypts `plaintext` under `kek` with AES-SIV, dispatching the AES key
/// size by `kek.len()` (32/48/64 octets for AES-128/192/256-SIV). `aad` is
/// authenticated but not encrypted.
///
/// An empty `aad` is passed to S2V as zero associated-data components, not
/// one empty component: the latter folds in an extra `dbl(D) xor CMAC("")`
/// step per RFC 5297 and would produce a tag hostapd's
/// `aes_siv_encrypt(..., num_elem=0, NULL, NULL, ...)` does not.
pub fn aead_encrypt(kek: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, SaePkError> {
    let components: &[&[u8]] = if aad.is_empty() { &[] } else { &[aad] };
    match kek.len() {
        32 => {
            let mut cipher = Aes128Siv::new_from_slice(kek)
                .map_err(|_| SaePkError::KekUnavailable)?;
            cipher
                .encrypt(components, plaintext)
                .map_err(|_| SaePkError::Internal("AES-128-SIV encrypt failed".into()))
        }
        48 => {
            let mut cipher = Aes192Siv::new_from_slice(kek)
                .map_err(|_| SaePkError::KekUnavailable)?;
            cipher
                .encrypt(components, plaintext)
                .map_err(|_| SaePkError::Internal("AES-192-SIV encrypt failed".into()))
        }
        64 => {
            let mut cipher = Aes256Siv::new_from_slice(kek)
                .map_err(|_| SaePkError::KekUnavailable)?;
            cipher
                .encrypt(components, plaintext)
                .map_err(|_| SaePkError::Internal("AES-256-SIV encrypt failed".into()))
        }
        _ => Err(SaePkError::KekUnavailable),
    }
}

/// Decrypts and authenticates `ciphertext` under `kek`/`aad`, dispatching by
/// `kek.len()` the same way [`aead_encrypt`] does. See [`aead_encrypt`] on
/// why an empty `aad` is zero S2V components, not one.
pub fn aead_decrypt(kek: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SaePkError> {
    let components: &[&[u8]] = if aad.is_empty() { &[] } else { &[aad] };
    match kek.len() {
        32 => {
            let mut cipher = Aes128Siv::new_from_slice(kek)
                .map_err(|_| SaePkError::KekUnavailable)?;
            cipher
                .decrypt(components, ciphertext)
                .map_err(|_| SaePkError::AuthFail)
        }
        48 => {
            let mut cipher = Aes192Siv::new_from_slice(kek)
                .map_err(|_| SaePkError::KekUnavailable)?;
            cipher.decrypt(components, ciphertext).map_err(|_| SaePkError::AuthFail)
        }
        64 => {
            let mut cipher = Aes256Siv::new_from_slice(kek)
                .map_err(|_| SaePkError::KekUnavailable)?;
            cipher
                .decrypt(components, ciphertext)
                .map_err(|_| SaePkError::AuthFail)
        }
        _ => Err(SaePkError::KekUnavailable),
    }
}
