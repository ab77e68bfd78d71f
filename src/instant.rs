// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-parameterised Julian-day instant.
//!
//! [`Time<S>`] stores a Julian Date in [`Days`] whose *axis* is fixed at
//! compile time by the marker `S: TimeScale`.  A mid-time measured in
//! BJD TDB is a `Time<TDB>`, a civil timestamp is a `Time<UTC>`, and the
//! two can only be mixed through an explicit [`Time::to`] conversion.

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time scales.
///
/// A **time scale** defines a display label and a pair of conversions
/// between its own Julian-day axis and **Julian Date in TT** (JD(TT)), the
/// canonical representation every conversion routes through.
///
/// Scales whose offset to TT is constant (TT, TAI) fold down to a single
/// addition.  TDB adds a periodic term and UTC looks up the leap-second
/// table, so their conversions depend on the instant itself.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a Julian day on this scale's axis to an absolute JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert an absolute JD(TT) back to this scale's axis.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// Julian Date of the Unix epoch, 1970-01-01T00:00:00.
const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

/// A Julian Date on time scale `S`.
///
/// `PhantomData` is zero-sized, so `Time<S>` is layout-identical to a
/// single `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// J2000.0 on this scale's axis (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Create from a raw Julian Date.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The Julian Date as a quantity.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The Julian Date as a scalar.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute JD(TT) corresponding to this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd_tt(self.quantity)
    }

    /// Build an instant from an absolute JD(TT).
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd_tt(jd))
    }

    /// Convert this instant to another time scale, routing through JD(TT).
    ///
    /// ```
    /// use transit_timing::{Time, TDB, UTC};
    ///
    /// let utc = Time::<UTC>::new(2_459_000.5);
    /// let tdb = utc.to::<TDB>();
    /// // TT − UTC is 69.184 s in 2020; TDB − TT stays below 2 ms.
    /// let offset = (tdb.value() - utc.value()) * 86_400.0;
    /// assert!((offset - 69.184).abs() < 0.002);
    /// ```
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd_tt(self.quantity))
    }

    /// Julian centuries elapsed since J2000.0, measured on this scale's axis.
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        (self.quantity - Self::J2000.quantity).value() / Self::JULIAN_CENTURY.value()
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        use super::scales::UTC;
        let jd_utc = self.to::<UTC>().quantity();
        let seconds_since_epoch = (jd_utc - UNIX_EPOCH_JD).to::<Second>().value();
        if !seconds_since_epoch.is_finite() {
            return None;
        }
        let mut secs = seconds_since_epoch.floor() as i64;
        let mut nanos = ((seconds_since_epoch - secs as f64) * 1e9).round() as u32;
        if nanos >= 1_000_000_000 {
            secs += 1;
            nanos -= 1_000_000_000;
        }
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// The timestamp is placed on the [`UTC`](super::scales::UTC) axis and
    /// the leap-second offset is applied when converting to `S`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        use super::scales::UTC;
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let jd_utc = UNIX_EPOCH_JD + (seconds_since_epoch + nanos).to::<Day>();
        Time::<UTC>::from_days(jd_utc).to::<S>()
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

// ── From/Into Days ────────────────────────────────────────────────────────

impl<S: TimeScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl<S: TimeScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{JD, TDB, TT, UTC};
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_julian_day_creation() {
        let jd = Time::<JD>::new(2_451_545.0);
        assert_eq!(jd.quantity(), Days::new(2_451_545.0));
        assert_eq!(jd.value(), 2_451_545.0);
    }

    #[test]
    fn test_utc_roundtrip() {
        let datetime = Utc.with_ymd_and_hms(2021, 6, 15, 3, 30, 0).unwrap();
        let tdb = Time::<TDB>::from_utc(datetime);
        let back = tdb.to_utc().expect("to_utc");
        let delta_ns =
            back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
        assert!(delta_ns.abs() < 100_000, "roundtrip error: {} ns", delta_ns);
    }

    #[test]
    fn test_from_utc_lands_on_utc_axis() {
        // 2000-01-01 12:00:00 UTC is JD(UTC) 2451545.0 exactly.
        let datetime = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let utc = Time::<UTC>::from_utc(datetime);
        assert!((utc.value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_utc_applies_leap_seconds() {
        // TT − UTC = 32 + 32.184 s in 2000.
        let datetime = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let tt = Time::<TT>::from_utc(datetime);
        let offset = (tt.quantity() - Days::new(2_451_545.0)).to::<Second>();
        assert!((offset - Seconds::new(64.184)).abs() < Seconds::new(1e-3));
    }

    #[test]
    fn test_julian_centuries() {
        let jd = Time::<JD>::J2000 + Days::new(36_525.0 * 0.25);
        assert!((jd.julian_centuries() - 0.25).abs() < 1e-12);
        assert_eq!(Time::<TDB>::J2000.julian_centuries(), 0.0);
    }

    #[test]
    fn test_add_sub_days() {
        let mut t = Time::<TDB>::new(2_459_000.0);
        t += Days::new(1.0);
        assert_eq!(t.quantity(), Days::new(2_459_001.0));
        t -= Days::new(0.5);
        assert_eq!(t.quantity(), Days::new(2_459_000.5));
        assert_eq!((t + Days::new(2.0)) - t, Days::new(2.0));
        assert_eq!((t - Days::new(2.0)).value(), 2_458_998.5);
    }

    #[test]
    fn test_comparison() {
        let a = Time::<TDB>::new(2_459_000.0);
        let b = Time::<TDB>::new(2_459_001.0);
        assert!(a < b);
    }

    #[test]
    fn test_display_carries_label() {
        let t = Time::<TDB>::new(2_459_000.5);
        assert!(format!("{t}").starts_with("TDB"));
    }

    #[test]
    fn test_into_days() {
        let t = Time::<UTC>::new(2_459_000.5);
        let days: Days = t.into();
        assert_eq!(days, Days::new(2_459_000.5));
        assert_eq!(Time::<UTC>::from(days), t);
    }
}
