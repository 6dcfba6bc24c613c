//! A scoped secret-buffer wrapper.
//!
//! The system this crate implements relies on manual zero-and-free macros
//! (`bin_clear_free`) around every password, KEK, modifier, and private-key
//! buffer. `Secret<T>` models the same discipline as a type: the wrapped
//! value is wiped on drop and `Debug` is overridden to redact the payload
//! rather than derived, which would print it. No implicit `Copy`.

use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Wraps a zeroizable value so it is scrubbed when it goes out of scope.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Secret(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T: Zeroize> Deref for Secret<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expose_returns_the_wrapped_value() {
        let s = Secret::new(vec![1u8, 2, 3]);
        assert_eq!(s.expose(), &vec![1u8, 2, 3]);
    }

    #[test]
    fn debug_never_prints_the_payload() {
        let s = Secret::new(vec![0xDEu8, 0xAD]);
        assert_eq!(format!("{:?}", s), "Secret(..)");
    }
}
