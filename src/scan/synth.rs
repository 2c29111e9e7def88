use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::results::{KeyType, ScanResult};

const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ALPHANUMERIC: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Share of discoveries attributed to AWS; the remainder are SendGrid.
const AWS_SHARE: f64 = 0.7;

/// Fabricates credential-shaped values and whole scan results.
///
/// All randomness flows through the injected `Rng`, so tests can seed a
/// `StdRng` and pin the exact output. The internal sequence number keeps ids
/// unique for the lifetime of the synthesizer even across restarted scans.
pub struct KeySynthesizer<R: Rng = StdRng> {
    rng: R,
    seq: u64,
}

impl KeySynthesizer<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> KeySynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, seq: 0 }
    }

    /// Build one result attributed to `url`.
    pub fn next_result(&mut self, url: &str) -> ScanResult {
        let key_type = self.next_key_type();
        ScanResult {
            id: self.next_id(),
            url: url.to_string(),
            key_type,
            key_value: self.next_key_value(key_type),
            discovered_at: Utc::now(),
            source_file: format!("/assets/js/main-{}.js", self.rng.gen_range(0..100)),
        }
    }

    /// AWS with probability 0.7, SendGrid otherwise.
    pub fn next_key_type(&mut self) -> KeyType {
        if self.rng.gen::<f64>() > AWS_SHARE {
            KeyType::SendGrid
        } else {
            KeyType::Aws
        }
    }

    pub fn next_key_value(&mut self, key_type: KeyType) -> String {
        match key_type {
            KeyType::Aws => format!("AKIA{}", self.random_chars(UPPER_ALPHANUMERIC, 16)),
            KeyType::SendGrid => format!(
                "SG.{}.{}",
                self.random_chars(ALPHANUMERIC, 22),
                self.random_chars(ALPHANUMERIC, 43)
            ),
        }
    }

    fn next_id(&mut self) -> String {
        let seq = self.seq;
        self.seq += 1;
        format!(
            "result-{}-{}-{}",
            Utc::now().timestamp_millis(),
            seq,
            self.random_chars(ALPHANUMERIC, 9)
        )
    }

    fn random_chars(&mut self, charset: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| charset[self.rng.gen_range(0..charset.len())] as char)
            .collect()
    }
}

impl Default for KeySynthesizer<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}
