// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap seconds: the UTC to TAI correction layer
//!
//! Cumulative **TAI − UTC** from IERS Bulletin C.  The correction is
//! applied automatically by the [`UTC`](super::UTC) scale marker, so callers
//! never need to query this table directly:
//!
//! ```rust
//! use transit_timing::{Time, TT, UTC};
//!
//! let utc = Time::<UTC>::new(2_459_000.5); // 2020-05-31 00:00 UTC
//! let tt = utc.to::<TT>();
//! let offset_s = (tt.value() - utc.value()) * 86_400.0;
//! assert!((offset_s - 69.184).abs() < 1e-3);
//! ```
//!
//! ## Valid range
//! The table covers 1972-01-01 through the latest announced insertion
//! (2017-01-01).  Earlier dates use the initial 10 s offset.

use qtty::{Days, Seconds};

/// Total number of tabulated leap-second epochs.
const TERMS: usize = 28;

/// `(JD(UTC) at 00:00 of the first day in effect, TAI − UTC in seconds)`.
#[rustfmt::skip]
const LEAP_SECONDS: [(f64, f64); TERMS] = [
    (2_441_317.5, 10.0), // 1972-01-01
    (2_441_499.5, 11.0), // 1972-07-01
    (2_441_683.5, 12.0), // 1973-01-01
    (2_442_048.5, 13.0), // 1974-01-01
    (2_442_413.5, 14.0), // 1975-01-01
    (2_442_778.5, 15.0), // 1976-01-01
    (2_443_144.5, 16.0), // 1977-01-01
    (2_443_509.5, 17.0), // 1978-01-01
    (2_443_874.5, 18.0), // 1979-01-01
    (2_444_239.5, 19.0), // 1980-01-01
    (2_444_786.5, 20.0), // 1981-07-01
    (2_445_151.5, 21.0), // 1982-07-01
    (2_445_516.5, 22.0), // 1983-07-01
    (2_446_247.5, 23.0), // 1985-07-01
    (2_447_161.5, 24.0), // 1988-01-01
    (2_447_892.5, 25.0), // 1990-01-01
    (2_448_257.5, 26.0), // 1991-01-01
    (2_448_804.5, 27.0), // 1992-07-01
    (2_449_169.5, 28.0), // 1993-07-01
    (2_449_534.5, 29.0), // 1994-07-01
    (2_450_083.5, 30.0), // 1996-01-01
    (2_450_630.5, 31.0), // 1997-07-01
    (2_451_179.5, 32.0), // 1999-01-01
    (2_453_736.5, 33.0), // 2006-01-01
    (2_454_832.5, 34.0), // 2009-01-01
    (2_456_109.5, 35.0), // 2012-07-01
    (2_457_204.5, 36.0), // 2015-07-01
    (2_457_754.5, 37.0), // 2017-01-01
];

/// TT − TAI, fixed by definition.
pub(crate) const TT_MINUS_TAI: Seconds = Seconds::new(32.184);

/// Largest TT − UTC in the table, used to seed the inverse lookup.
const MAX_TT_MINUS_UTC: Seconds = Seconds::new(LEAP_SECONDS[TERMS - 1].1 + 32.184);

/// Returns **TAI − UTC** in effect at a Julian Date on the UTC axis.
pub fn tai_minus_utc(jd_utc: Days) -> Seconds {
    let idx = LEAP_SECONDS.partition_point(|&(start, _)| start <= jd_utc.value());
    match idx {
        // Before 1972-01-01 UTC had fractional offsets; hold the first value.
        0 => Seconds::new(LEAP_SECONDS[0].1),
        i => Seconds::new(LEAP_SECONDS[i - 1].1),
    }
}

/// TT − UTC for a Julian Date on the UTC axis.
#[inline]
pub(crate) fn tt_minus_utc_from_utc(jd_utc: Days) -> Seconds {
    tai_minus_utc(jd_utc) + TT_MINUS_TAI
}

/// TT − UTC for a Julian Date on the TT axis.
///
/// Subtracting the largest plausible offset first lands on the correct side
/// of any step except during the inserted second itself.
pub(crate) fn tt_minus_utc_from_tt(jd_tt: Days) -> Seconds {
    let approx_utc = jd_tt - MAX_TT_MINUS_UTC.to::<qtty::Day>();
    let offset = tt_minus_utc_from_utc(approx_utc);
    tt_minus_utc_from_utc(jd_tt - offset.to::<qtty::Day>())
}
