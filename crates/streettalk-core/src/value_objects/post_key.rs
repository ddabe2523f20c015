//! Push keys - time-ordered, collision-resistant identifiers for feed records
//!
//! Structure (20 characters over an ASCII-ordered 64 symbol alphabet):
//! - Characters 0-7:  milliseconds since the Unix epoch, most significant first
//! - Characters 8-19: random suffix, incremented when two keys share a millisecond
//!
//! Because the alphabet is in ASCII order, a key generated later always sorts
//! after an earlier one from the same generator.

use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alphabet in ASCII order so that lexicographic order follows generation order.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIMESTAMP_LEN: usize = 8;
const RANDOM_LEN: usize = 12;

/// Opaque key assigned to a record when it is appended to the feed
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostKey(String);

impl PostKey {
    /// Total length of a generated key
    pub const LEN: usize = TIMESTAMP_LEN + RANDOM_LEN;

    /// Wrap an existing key (e.g. read back from a snapshot)
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the embedded timestamp (milliseconds since the Unix epoch)
    ///
    /// Returns `None` for keys that were not produced by [`PushKeyGenerator`].
    pub fn timestamp_millis(&self) -> Option<i64> {
        let bytes = self.0.as_bytes();
        if bytes.len() != Self::LEN {
            return None;
        }

        bytes[..TIMESTAMP_LEN].iter().try_fold(0_i64, |acc, byte| {
            let digit = PUSH_CHARS.iter().position(|c| c == byte)?;
            Some(acc * 64 + digit as i64)
        })
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for PostKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl AsRef<str> for PostKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

struct GeneratorState {
    last_millis: i64,
    last_random: [u8; RANDOM_LEN],
}

/// Thread-safe push key generator
///
/// Keys are strictly increasing per generator, even when the wall clock
/// stalls or steps backwards.
pub struct PushKeyGenerator {
    state: Mutex<GeneratorState>,
}

impl PushKeyGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GeneratorState {
                last_millis: i64::MIN,
                last_random: [0; RANDOM_LEN],
            }),
        }
    }

    /// Generate a key for the current time
    pub fn generate(&self) -> PostKey {
        self.generate_at(chrono::Utc::now().timestamp_millis())
    }

    /// Generate a key as if the clock read `now_millis`
    pub fn generate_at(&self, now_millis: i64) -> PostKey {
        let mut state = self.state.lock();

        if now_millis > state.last_millis {
            state.last_millis = now_millis;
            let mut rng = rand::thread_rng();
            for slot in &mut state.last_random {
                *slot = rng.gen_range(0..64);
            }
        } else if !increment(&mut state.last_random) {
            // Suffix space for this millisecond is exhausted; borrow the next one.
            state.last_millis += 1;
            state.last_random = [0; RANDOM_LEN];
        }

        let mut key = String::with_capacity(PostKey::LEN);
        let mut millis = state.last_millis.max(0);
        let mut stamp = [0_u8; TIMESTAMP_LEN];
        for slot in stamp.iter_mut().rev() {
            *slot = PUSH_CHARS[(millis % 64) as usize];
            millis /= 64;
        }
        key.extend(stamp.iter().map(|&b| b as char));
        key.extend(
            state
                .last_random
                .iter()
                .map(|&digit| PUSH_CHARS[digit as usize] as char),
        );

        PostKey(key)
    }
}

impl Default for PushKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Increment a base-64 digit array in place; returns false on overflow.
fn increment(digits: &mut [u8; RANDOM_LEN]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit < 63 {
            *digit += 1;
            return true;
        }
        *digit = 0;
    }
    false
}
