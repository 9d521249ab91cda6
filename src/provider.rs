//! Pluggable randomness and time sources.
//!
//! The CDM never reaches for a global generator or the wall clock directly;
//! it goes through these traits so tests can substitute deterministic stubs.
//! Implementations must be safe to call from several threads at once.

use std::time::{SystemTime, UNIX_EPOCH};

use rsa::rand_core::{self, CryptoRng, OsRng, RngCore};

/// Source of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> SystemTime + Send + Sync,
{
    fn now(&self) -> SystemTime {
        self()
    }
}

/// Read exactly `n` bytes from a random source.
#[must_use]
pub fn random_bytes(source: &dyn RandomSource, n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    source.fill_bytes(&mut buf);
    buf
}

/// Read a little-endian `u32` from a random source.
#[must_use]
pub fn random_u32(source: &dyn RandomSource) -> u32 {
    let mut buf = [0u8; 4];
    source.fill_bytes(&mut buf);
    u32::from_le_bytes(buf)
}

/// Seconds since the Unix epoch; negative for instants before it.
#[must_use]
pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Adapter that lets RSA padding schemes draw from an injected [`RandomSource`].
pub(crate) struct SourceRng<'a>(pub(crate) &'a dyn RandomSource);

impl RngCore for SourceRng<'_> {
    fn next_u32(&mut self) -> u32 {
        random_u32(self.0)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.0.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        self.0.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for SourceRng<'_> {}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn random_bytes_returns_requested_length() {
        assert_eq!(random_bytes(&OsRandom, 16).len(), 16);
        assert_eq!(random_bytes(&OsRandom, 32).len(), 32);
        assert!(random_bytes(&OsRandom, 0).is_empty());
    }

    #[test]
    fn closures_are_clocks() {
        let fixed = || UNIX_EPOCH + Duration::from_secs(42);
        assert_eq!(unix_seconds(Clock::now(&fixed)), 42);
    }

    #[test]
    fn unix_seconds_before_epoch_is_negative() {
        assert_eq!(unix_seconds(UNIX_EPOCH - Duration::from_secs(5)), -5);
        assert_eq!(unix_seconds(UNIX_EPOCH), 0);
    }
}
