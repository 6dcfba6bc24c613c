//! RFC 4648 base-32 password encoding (lowercase alphabet, `-` separators).
//!
//! SAE-PK passwords carry a short fingerprint in a string short enough for a
//! human to type or read off a label. The bit-packing here is lifted
//! instruction-for-instruction from hostap's `sae_pk_base32_encode`/
//! `sae_pk_base32_decode` in `sae_pk.c`, in particular the
//! dash-insertion arithmetic in `decode`/`add_char`, which counts the
//! *total* output length including already-emitted dashes, not just the
//! alphabet characters. Re-deriving that rule from prose alone is error
//! prone; the worked example `encode(0, 40) == "aaaa-aaaa"` only falls out
//! of the original's exact counter.

use crate::secret::Secret;
use crate::SaePkError;

/// RFC 4648 base-32 alphabet, lowercase.
pub const ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// A password decoded into its payload bytes plus the non-separator
/// character count `lambda` used throughout the fingerprint computation.
pub struct DecodedPassword {
    pub pw: Secret<Vec<u8>>,
    pub lambda: usize,
}

/// Checks the structural rules an SAE-PK password must satisfy:
/// at least 9 characters, a `-` at every index `i > 0` with `i % 5 == 4`,
/// an alphabet character everywhere else, and no trailing `-`.
pub fn valid_password(pw: &str) -> bool {
    let bytes = pw.as_bytes();
    if bytes.len() < 9 {
        return false;
    }
    for (pos, &b) in bytes.iter().enumerate() {
        if pos > 0 && pos % 5 == 4 {
            if b != b'-' {
                return false;
            }
            continue;
        }
        if !ALPHABET.contains(&b) {
            return false;
        }
    }
    bytes.last() != Some(&b'-')
}

/// Validates, decodes, and computes `lambda` for a password in one step,
/// the entry point AP configuration tooling uses to turn an operator's
/// password into the `pw` byte vector consumed by [`crate::fingerprint`].
pub fn decode_password(password: &str) -> Result<DecodedPassword, SaePkError> {
    if !valid_password(password) {
        return Err(SaePkError::PasswordInvalid);
    }
    let lambda = password.len() - password.len() / 5;
    let pw = decode(password)?;
    Ok(DecodedPassword {
        pw: Secret::new(pw),
        lambda,
    })
}

/// Appends one base-32 character for `idx`, inserting a `-` first whenever
/// the output written so far (dashes included) is a multiple of 5, and
/// consuming 5 bits from the remaining bit budget. A no-op once the budget
/// is exhausted, so encoding a short bit string naturally stops early.
fn add_char(out: &mut Vec<u8>, idx: u8, bits_left: &mut usize) {
    if *bits_left == 0 {
        return;
    }
    *bits_left = bits_left.saturating_sub(5);
    if out.len() % 5 == 4 {
        out.push(b'-');
    }
    out.push(ALPHABET[idx as usize]);
}

/// Encodes `src`, treated as a bit string of `len_bits` bits right-padded to
/// whole octets, as dash-separated base-32 text.
pub fn encode(src: &[u8], len_bits: usize) -> Result<String, SaePkError> {
    let len = (len_bits + 7) / 8;
    if len == 0 || len >= usize::MAX / 8 {
        return Err(SaePkError::Internal(
            "base32 encode: input length is zero or overflows".into(),
        ));
    }

    let mut out = Vec::with_capacity(len * 8 / 5 + len * 2 / 5 + 2);
    let extra_pad = (5 - len % 5) % 5;
    let mut block: u64 = 0;
    let mut left = len_bits;

    for i in 0..(len + extra_pad) {
        let val = if i < len { src[i] } else { 0 };
        block = (block << 8) | val as u64;
        if i % 5 == 4 {
            for j in (0..=7).rev() {
                let idx = ((block >> (j * 5)) & 0x1f) as u8;
                add_char(&mut out, idx, &mut left);
            }
            block = 0;
        }
    }

    Ok(String::from_utf8(out).expect("base32 alphabet is ASCII"))
}

/// Decodes `s`, skipping any character that is not an alphabet letter or
/// `=`. A run of `=` encountered while filling the last 8-character group
/// truncates the output to the bits actually present and stops; bytes
/// after that point are not produced, matching hostap's decoder.
pub fn decode(s: &str) -> Result<Vec<u8>, SaePkError> {
    let mut dtable = [0x80u8; 256];
    for (i, &c) in ALPHABET.iter().enumerate() {
        dtable[c as usize] = i as u8;
    }
    dtable[b'=' as usize] = 0;

    let bytes = s.as_bytes();
    let count = bytes.iter().filter(|&&b| dtable[b as usize] != 0x80).count();
    if count == 0 {
        return Err(SaePkError::WireMalformed(
            "base32 input contains no alphabet characters",
        ));
    }
    let extra_pad = (8 - count % 8) % 8;
    let olen = (count + extra_pad) / 8 * 5;
    let mut out = Vec::with_capacity(olen);

    let mut block: u64 = 0;
    let mut run = 0usize;
    let mut pad = 0usize;

    'outer: for i in 0..(bytes.len() + extra_pad) {
        let val = if i >= bytes.len() { b'=' } else { bytes[i] };
        let tmp = dtable[val as usize];
        if tmp == 0x80 {
            continue;
        }
        if val == b'=' {
            pad += 1;
        }
        block = (block << 5) | tmp as u64;
        run += 1;
        if run == 8 {
            out.push(((block >> 32) & 0xff) as u8);
            out.push(((block >> 24) & 0xff) as u8);
            out.push(((block >> 16) & 0xff) as u8);
            out.push(((block >> 8) & 0xff) as u8);
            out.push((block & 0xff) as u8);
            run = 0;
            block = 0;
            if pad > 0 {
                let trim = pad * 5 / 8;
                out.truncate(out.len() - trim);
                break 'outer;
            }
        }
    }

    Ok(out)
}
