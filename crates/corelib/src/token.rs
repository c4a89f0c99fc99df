//! Ring token: a 128-bit position on the unit circle of the hash ring.
//!
//! `Token::of(s) = u128(MD5(utf8(s)))`, interpreted as a big-endian integer
//! (§4.1 of the workspace root SPEC_FULL.md). MD5 is used purely for its
//! uniform output distribution; no cryptographic property is required, and
//! this token is never used outside the ring's own placement math.

use std::fmt;

/// A position on the ring, derived from `MD5(utf8(s))`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u128);

impl Token {
    pub const MIN: Token = Token(u128::MIN);
    pub const MAX: Token = Token(u128::MAX);

    /// Hashes `s` into a ring position.
    pub fn of(s: &str) -> Self {
        let digest = md5::compute(s.as_bytes());
        Token(u128::from_be_bytes(digest.0))
    }

    /// Clockwise distance from `self` to `other`, wrapping past `MAX`.
    pub fn distance_to(&self, other: &Self) -> u128 {
        if other.0 >= self.0 {
            other.0 - self.0
        } else {
            (u128::MAX - self.0) + other.0 + 1
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:032x})", self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(Token::of("node1-vn0"), Token::of("node1-vn0"));
    }

    #[test]
    fn distinct_inputs_usually_differ() {
        assert_ne!(Token::of("node1-vn0"), Token::of("node1-vn1"));
    }

    #[test]
    fn distance_wraps() {
        let a = Token(u128::MAX - 5);
        let b = Token(5);
        assert_eq!(a.distance_to(&b), 11);
    }
}
