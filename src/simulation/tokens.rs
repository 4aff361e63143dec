use rand::Rng;
use rand::rngs::ThreadRng;

use super::{NONCE_RANGE, TOKEN_LEN};

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of the opaque values stamped on mock blocks.
pub trait TokenSource {
    /// Opaque alphanumeric token used for block hashes and merkle roots.
    fn token(&mut self) -> String;
    fn nonce(&mut self) -> u32;
}

/// Random lowercase base-36 tokens.
#[derive(Debug, Default)]
pub struct RandomTokens;

impl RandomTokens {
    fn rng() -> ThreadRng {
        rand::thread_rng()
    }
}

impl TokenSource for RandomTokens {
    fn token(&mut self) -> String {
        let mut rng = Self::rng();
        (0..TOKEN_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    fn nonce(&mut self) -> u32 {
        Self::rng().gen_range(0..NONCE_RANGE)
    }
}

/// Replays fixed tokens and nonces; once exhausted it falls back to
/// numbered tokens (`tok-<n>`) and nonce 0.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FixedTokens {
    tokens: std::collections::VecDeque<String>,
    nonces: std::collections::VecDeque<u32>,
    issued: usize,
}

#[cfg(test)]
impl FixedTokens {
    pub fn new<T, I, N>(tokens: I, nonces: N) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = T>,
        N: IntoIterator<Item = u32>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            nonces: nonces.into_iter().collect(),
            issued: 0,
        }
    }
}

#[cfg(test)]
impl TokenSource for FixedTokens {
    fn token(&mut self) -> String {
        self.issued += 1;
        self.tokens
            .pop_front()
            .unwrap_or_else(|| format!("tok-{}", self.issued))
    }

    fn nonce(&mut self) -> u32 {
        self.nonces.pop_front().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tokens_are_base36() {
        let mut src = RandomTokens;
        for _ in 0..50 {
            let t = src.token();
            assert_eq!(t.len(), TOKEN_LEN);
            assert!(t.bytes().all(|b| ALPHABET.contains(&b)));
            assert!(src.nonce() < NONCE_RANGE);
        }
    }

    #[test]
    fn random_tokens_are_independent() {
        let mut src = RandomTokens;
        assert_ne!(src.token(), src.token());
    }

    #[test]
    fn fixed_tokens_fall_back_when_exhausted() {
        let mut src = FixedTokens::new(["a"], [7]);
        assert_eq!(src.token(), "a");
        assert_eq!(src.token(), "tok-2");
        assert_eq!(src.nonce(), 7);
        assert_eq!(src.nonce(), 0);
    }
}
