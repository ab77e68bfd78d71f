// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Orbital cycle counting for new observations.

use qtty::Days;

use crate::eclipse::EclipseKind;
use crate::error::{Result, TimingError};
use crate::instant::Time;
use crate::scales::TDB;

/// 2^63, the first magnitude an `i64` cannot hold.
const EPOCH_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Integer epoch of an observed mid-time relative to a reference conjunction.
///
/// `N = (t − t0) / P` is rounded according to `kind`:
///
/// - [`EclipseKind::Occultation`]: floor, toward −∞.
/// - [`EclipseKind::Transit`]: truncation, toward zero.
///
/// The two rules differ only for negative fractional cycles, e.g. half a
/// period before `t0` gives `-1` for an occultation and `0` for a transit.
///
/// # Errors
///
/// [`TimingError::InvalidPeriod`] for a zero or non-finite period and
/// [`TimingError::NonFiniteEpoch`] when `N` does not fit an `i64`.
///
/// ```
/// use qtty::Days;
/// use transit_timing::{get_epochs_for_new_data, EclipseKind, Time, TDB};
///
/// let t0 = Time::<TDB>::new(2_454_955.788);
/// let half_before = t0 - Days::new(0.5);
/// let period = Days::new(1.0);
/// assert_eq!(get_epochs_for_new_data(half_before, t0, period, EclipseKind::Occultation), Ok(-1));
/// assert_eq!(get_epochs_for_new_data(half_before, t0, period, EclipseKind::Transit), Ok(0));
/// ```
pub fn get_epochs_for_new_data(
    t: Time<TDB>,
    t0: Time<TDB>,
    period: Days,
    kind: EclipseKind,
) -> Result<i64> {
    let p = period.value();
    if !p.is_finite() || p == 0.0 {
        return Err(TimingError::InvalidPeriod(p));
    }

    let cycles = (t - t0).value() / p;
    let rounded = match kind {
        EclipseKind::Occultation => cycles.floor(),
        EclipseKind::Transit => cycles.trunc(),
    };

    if !rounded.is_finite() || rounded.abs() >= EPOCH_LIMIT {
        return Err(TimingError::NonFiniteEpoch(cycles));
    }
    Ok(rounded as i64)
}
