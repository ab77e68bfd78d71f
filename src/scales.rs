// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies the axis a Julian Date is measured on and
//! encodes how that axis relates to the canonical **Julian Date in TT**.
//!
//! | Marker | Scale | Relation to TT |
//! |--------|-------|----------------|
//! | [`JD`]  | Julian Date on the TT axis | identity |
//! | [`TT`]  | Terrestrial Time | identity |
//! | [`TAI`] | International Atomic Time | `TT = TAI + 32.184 s` |
//! | [`TDB`] | Barycentric Dynamical Time | periodic term, ≈1.7 ms |
//! | [`UTC`] | Coordinated Universal Time | leap-second table |

use super::instant::TimeScale;
use super::leap_seconds::{tt_minus_utc_from_tt, tt_minus_utc_from_utc, TT_MINUS_TAI};
use qtty::{Day, Days};

// ---------------------------------------------------------------------------
// TT-axis counters
// ---------------------------------------------------------------------------

/// Julian Date, the identity scale.
///
/// `to_jd_tt(v) = v`, i.e. the quantity *is* a Julian Day number on the TT
/// axis.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Terrestrial Time.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// International Atomic Time.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TAI;

impl TimeScale for TAI {
    const LABEL: &'static str = "TAI";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value + TT_MINUS_TAI.to::<Day>()
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt - TT_MINUS_TAI.to::<Day>()
    }
}

// ---------------------------------------------------------------------------
// Barycentric Dynamical Time
// ---------------------------------------------------------------------------

/// Barycentric Dynamical Time, the scale of BJD TDB mid-times.
///
/// TDB differs from TT by a periodic term of ≈1.7 ms amplitude
/// (Fairhead & Bretagnon 1990), applied automatically in both directions.
/// Accuracy is better than 30 μs within ±10 000 years of J2000.
///
/// ## References
/// * Fairhead & Bretagnon (1990), A&A 229, 240
/// * USNO Circular 179, eq. 2.6
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TDB;

/// TDB − TT in days for an instant on the TT axis.
#[inline]
pub(crate) fn tdb_minus_tt(jd_tt: Days) -> Days {
    let t = (jd_tt.value() - 2_451_545.0) / 36_525.0;

    // Earth's mean anomaly
    let m_e = (357.5291092 + 35999.0502909 * t).to_radians();
    // Jupiter's mean anomaly
    let m_j = (246.4512 + 3035.2335 * t).to_radians();
    // Mean elongation of the Moon
    let d = (297.8502042 + 445267.1115168 * t).to_radians();
    // Longitude of the lunar ascending node
    let om = (125.0445550 - 1934.1362091 * t).to_radians();

    let dt_sec = 0.001_657 * (m_e + 0.01671 * m_e.sin()).sin()
        + 0.000_022 * (d - m_e).sin()
        + 0.000_014 * (2.0 * d).sin()
        + 0.000_005 * m_j.sin()
        + 0.000_005 * om.sin();

    Days::new(dt_sec / 86_400.0)
}

impl TimeScale for TDB {
    const LABEL: &'static str = "TDB";

    #[inline]
    fn to_jd_tt(tdb_value: Days) -> Days {
        // The correction varies by nanoseconds over 2 ms; evaluating it on
        // the TDB value is exact at f64 resolution.
        tdb_value - tdb_minus_tt(tdb_value)
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt + tdb_minus_tt(jd_tt)
    }
}

// ---------------------------------------------------------------------------
// Civil time
// ---------------------------------------------------------------------------

/// Coordinated Universal Time.
///
/// A `Time<UTC>` is a Julian Date counted on the UTC axis, i.e. what an
/// observatory log or a plain `"2020-01-01 12:00"` string denotes.
/// Conversion to TT adds `TAI − UTC` from the leap-second table plus
/// 32.184 s.  Leap seconds themselves are not representable.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UTC;

impl TimeScale for UTC {
    const LABEL: &'static str = "UTC";

    #[inline]
    fn to_jd_tt(value: Days) -> Days {
        value + tt_minus_utc_from_utc(value).to::<Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt - tt_minus_utc_from_tt(jd_tt).to::<Day>()
    }
}

// ---------------------------------------------------------------------------
// Cross-scale From/Into (generated by macro)
// ---------------------------------------------------------------------------

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<super::instant::Time<$first>> for super::instant::Time<$rest> {
                #[inline]
                fn from(t: super::instant::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<super::instant::Time<$rest>> for super::instant::Time<$first> {
                #[inline]
                fn from(t: super::instant::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(JD, TT, TAI, TDB, UTC);

#[cfg(test)]
mod tests {
    use super::super::instant::Time;
    use super::*;
    use qtty::{Second, Seconds};

    #[test]
    fn tai_tt_offset() {
        let tai = Time::<TAI>::new(2_451_545.0);
        let tt: Time<TT> = tai.to::<TT>();
        let offset = (tt.quantity() - tai.quantity()).to::<Second>();
        assert!((offset - Seconds::new(32.184)).abs() < Seconds::new(1e-4));
    }

    #[test]
    fn tdb_stays_within_two_milliseconds_of_tt() {
        for i in 0..400 {
            let tt = Time::<TT>::new(2_451_545.0 + i as f64 * 9.13);
            let tdb = tt.to::<TDB>();
            let offset = (tdb.quantity() - tt.quantity()).to::<Second>();
            assert!(offset.abs() < Seconds::new(0.002), "TDB − TT = {offset}");
        }
    }

    #[test]
    fn tdb_roundtrip() {
        let tdb = Time::<TDB>::new(2_458_849.5);
        let back = tdb.to::<TT>().to::<TDB>();
        assert!((back - tdb).abs() < Days::new(1e-8));
    }

    #[test]
    fn utc_after_2017_is_69_184_seconds_behind_tt() {
        let utc = Time::<UTC>::new(2_459_000.5);
        let tt: Time<TT> = utc.into();
        let offset = (tt.quantity() - utc.quantity()).to::<Second>();
        assert!((offset - Seconds::new(69.184)).abs() < Seconds::new(1e-3));
    }

    #[test]
    fn utc_roundtrip() {
        let utc = Time::<UTC>::new(2_455_000.25);
        let back = utc.to::<TDB>().to::<UTC>();
        assert!((back - utc).abs() < Days::new(1e-8));
    }

    #[test]
    fn jd_is_tt_axis() {
        let jd = Time::<JD>::new(2_451_545.0);
        let tt: Time<TT> = jd.into();
        assert_eq!(tt.value(), jd.value());
    }
}
