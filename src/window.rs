//! Epoch-aligned time windows.
//!
//! A window is a fixed-width, half-open interval `[start, start + period)`
//! counted from 1970-01-01T00:00:00Z. Every instant belongs to exactly one
//! window, and the window index only grows as time advances. The edge card
//! uses this to show which rotation bucket the current request falls into
//! and when the next one begins.
//!
//! # Examples
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use ic_dynamic_svg::window::{compute_window, Period};
//!
//! let now: DateTime<Utc> = "1970-01-01T04:30:00Z".parse().unwrap();
//! let window = compute_window(now, Period::DEFAULT);
//! assert_eq!(window.index, 1);
//! assert_eq!(window.start.to_rfc3339(), "1970-01-01T04:00:00+00:00");
//! ```

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Window width in whole hours.
///
/// A `Period` is always within `1..=Period::MAX_HOURS`, so window arithmetic
/// can never divide by zero or leave the range `chrono` can represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(u32);

impl Period {
    /// Upper bound on the window width: 876 000 hours, roughly a century.
    pub const MAX_HOURS: u32 = 876_000;

    /// The width used when a request does not name one.
    pub const DEFAULT: Period = Period(4);

    /// Build a period from an exact hour count.
    ///
    /// Returns `None` for `0` and for anything above [`Period::MAX_HOURS`].
    pub fn from_hours(hours: u32) -> Option<Self> {
        (1..=Self::MAX_HOURS).contains(&hours).then_some(Self(hours))
    }

    /// Build a period from untrusted input, clamping into `1..=MAX_HOURS`.
    pub fn clamped(hours: i64) -> Self {
        Self(hours.clamp(1, i64::from(Self::MAX_HOURS)) as u32)
    }

    pub fn hours(self) -> u32 {
        self.0
    }

    /// Width of one window in milliseconds.
    pub fn window_ms(self) -> i64 {
        i64::from(self.0) * MS_PER_HOUR
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.0)
    }
}

/// The window containing a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Whole windows elapsed since the epoch. Negative before 1970.
    pub index: i64,
    /// Epoch-aligned beginning of the window.
    pub start: DateTime<Utc>,
    /// Width the window was computed with.
    pub period: Period,
}

impl Window {
    /// First instant of the following window, i.e. when the card content
    /// rotates next.
    pub fn next_refresh(&self) -> DateTime<Utc> {
        self.start
            .checked_add_signed(TimeDelta::milliseconds(self.period.window_ms()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether `instant` falls in `[start, next_refresh)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.next_refresh()
    }
}

/// Map `now` to the window of width `period` that contains it.
///
/// The index is the floor of the elapsed milliseconds divided by the window
/// width, so an instant lying exactly on a boundary opens the new window.
pub fn compute_window(now: DateTime<Utc>, period: Period) -> Window {
    let window_ms = period.window_ms();
    let index = now.timestamp_millis().div_euclid(window_ms);
    // Only unrepresentable within one window of chrono's lower bound.
    let start =
        DateTime::from_timestamp_millis(index * window_ms).unwrap_or(DateTime::<Utc>::MIN_UTC);
    Window {
        index,
        start,
        period,
    }
}

/// Render an instant as `YYYY-MM-DD HH:mm:ssZ`.
pub fn format_refresh(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%SZ").to_string()
}

/// Convert IC system time (nanoseconds since the epoch) into an instant.
pub fn instant_from_nanos(nanos: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(i64::try_from(nanos).unwrap_or(i64::MAX))
}
