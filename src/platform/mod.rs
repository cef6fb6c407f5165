//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (session idle detection)
//! - Seeding

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed derived from the clock, for callers that don't supply one
pub fn clock_seed() -> u64 {
    (now_ms() as u64).wrapping_mul(2654435761)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_reads_past_epoch() {
        assert!(now_ms() > 0.0);
    }
}
