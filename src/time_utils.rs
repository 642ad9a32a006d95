// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Shared helpers for date/time arithmetic.

use chrono::{DateTime, Duration, Utc};

/// Whole seconds remaining until `deadline`, rounded up. Zero once passed.
pub fn seconds_until_ceil(now: DateTime<Utc>, deadline: DateTime<Utc>) -> u64 {
    let remaining = deadline.signed_duration_since(now);
    if remaining <= Duration::zero() {
        return 0;
    }
    let whole = remaining.num_seconds().unsigned_abs();
    if remaining.subsec_nanos() > 0 {
        whole + 1
    } else {
        whole
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_until_rounds_up() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let deadline = now + Duration::milliseconds(1_500);
        assert_eq!(seconds_until_ceil(now, deadline), 2);
        assert_eq!(seconds_until_ceil(now, now + Duration::seconds(60)), 60);
    }

    #[test]
    fn test_sub_millisecond_remainder_counts_as_a_second() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(seconds_until_ceil(now, now + Duration::microseconds(500)), 1);
        assert_eq!(seconds_until_ceil(now, now + Duration::nanoseconds(1)), 1);
        assert_eq!(
            seconds_until_ceil(now, now + Duration::seconds(3) + Duration::nanoseconds(1)),
            4
        );
    }

    #[test]
    fn test_seconds_until_past_deadline_is_zero() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(seconds_until_ceil(now, now - Duration::seconds(5)), 0);
    }
}
