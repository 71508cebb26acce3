//! Core logic for the flip countdown: time math, progress, and the state
//! machines that drive the Yew front-end in `main.rs`.
//!
//! Everything in this crate takes the current time as an explicit `now_ms`
//! argument so it can be exercised on the host without a browser clock.

pub mod config;
pub mod digit;
pub mod form;
pub mod session;
pub mod theme;

use chrono::TimeZone;
use config::{CLOCK_FORMAT, TITLE_MAX_PX, TITLE_MIN_PX, TITLE_REFERENCE_PX, TITLE_SAFETY};
use std::fmt;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Remaining time split into display fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    pub const ZERO: TimeLeft = TimeLeft {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Total whole milliseconds represented by the fields.
    pub fn as_ms(&self) -> u64 {
        self.days * MS_PER_DAY
            + self.hours * MS_PER_HOUR
            + self.minutes * MS_PER_MINUTE
            + self.seconds * MS_PER_SECOND
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Split a signed duration into days/hours/minutes/seconds.
///
/// The sign is discarded, so a target that has already passed still yields a
/// well-formed value.
pub fn time_left_from_ms(duration_ms: i64) -> TimeLeft {
    let abs = duration_ms.unsigned_abs();
    TimeLeft {
        days: abs / MS_PER_DAY,
        hours: abs / MS_PER_HOUR % 24,
        minutes: abs / MS_PER_MINUTE % 60,
        seconds: abs / MS_PER_SECOND % 60,
    }
}

/// Share of `start..target` already elapsed at `now`, as a percentage in
/// `[0, 100]`.
///
/// A degenerate window (`target <= start`) counts as complete.
pub fn progress_percent(start_ms: i64, target_ms: i64, now_ms: i64) -> f64 {
    if target_ms <= start_ms {
        return 100.0;
    }
    let total = (target_ms - start_ms) as f64;
    let elapsed = (now_ms - start_ms) as f64;
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

/// Current wall-clock time in epoch milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Zero-padded decimal digits of a field value, at least two wide.
pub fn field_digits(value: u64) -> Vec<char> {
    format!("{:02}", value).chars().collect()
}

/// Title font size that fits `container_px`, given the title's width when
/// rendered at the reference size. `None` when the title has no width yet.
pub fn fit_title_px(container_px: f64, natural_px: f64) -> Option<f64> {
    if natural_px <= 0.0 {
        return None;
    }
    let scaled = TITLE_REFERENCE_PX * (container_px / natural_px) * TITLE_SAFETY;
    Some(scaled.clamp(TITLE_MIN_PX, TITLE_MAX_PX))
}

/// Live clock text for `epoch_ms` in `tz`.
pub fn format_clock<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> String {
    tz.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.naive_local().format(CLOCK_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn decomposes_into_mixed_radix_fields() {
        let d = 3 * 86_400_000 + 5 * 3_600_000 + 7 * 60_000 + 9 * 1_000 + 999;
        let left = time_left_from_ms(d);
        assert_eq!(
            left,
            TimeLeft {
                days: 3,
                hours: 5,
                minutes: 7,
                seconds: 9
            }
        );
    }

    #[test]
    fn decomposition_brackets_the_duration() {
        let samples = [
            0_i64,
            1,
            999,
            1_000,
            59_999,
            60_000,
            3_599_999,
            86_399_999,
            86_400_000,
            123_456_789,
            9_876_543_210,
        ];
        for d in samples {
            let left = time_left_from_ms(d);
            let floor = left.as_ms() as i64;
            assert!(floor <= d && d < floor + 1_000, "bad split for {}", d);
            assert!(left.hours < 24 && left.minutes < 60 && left.seconds < 60);
        }
    }

    #[test]
    fn sign_does_not_matter() {
        for d in [1_i64, 61_001, 7_200_000, 100_000_000_000] {
            assert_eq!(time_left_from_ms(d), time_left_from_ms(-d));
        }
        // Must not overflow on the extreme value.
        let _ = time_left_from_ms(i64::MIN);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(1_000, 2_000, 500), 0.0);
        assert_eq!(progress_percent(1_000, 2_000, 1_500), 50.0);
        assert_eq!(progress_percent(1_000, 2_000, 5_000), 100.0);
    }

    #[test]
    fn degenerate_window_counts_as_complete() {
        assert_eq!(progress_percent(2_000, 2_000, 0), 100.0);
        assert_eq!(progress_percent(3_000, 2_000, 0), 100.0);
    }

    #[test]
    fn field_digits_pad_to_two() {
        assert_eq!(field_digits(0), vec!['0', '0']);
        assert_eq!(field_digits(7), vec!['0', '7']);
        assert_eq!(field_digits(42), vec!['4', '2']);
        assert_eq!(field_digits(365), vec!['3', '6', '5']);
    }

    #[test]
    fn title_scales_to_container() {
        let half = fit_title_px(600.0, 1200.0).unwrap();
        assert!((half - 57.0).abs() < 1e-9);
        assert_eq!(fit_title_px(100.0, 2400.0), Some(TITLE_MIN_PX));
        assert_eq!(fit_title_px(2000.0, 100.0), Some(TITLE_MAX_PX));
        assert_eq!(fit_title_px(500.0, 0.0), None);
    }

    #[test]
    fn clock_text_uses_twelve_hour_time() {
        // 2030-01-01T15:04:05Z, a Tuesday
        let ms = 1_893_456_000_000 + 15 * 3_600_000 + 4 * 60_000 + 5_000;
        assert_eq!(format_clock(ms, &Utc), "2030. 1. 1. (Tue) PM 3:04:05");
    }
}
