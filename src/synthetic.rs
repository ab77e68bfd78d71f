// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Simulated future observations.
//!
//! Random dates are drawn within an interval, moved forward to the next
//! eclipse of the requested kind, converted to BJD TDB and numbered with
//! their epoch against a reference ephemeris.

use qtty::Days;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coords::{EarthLocation, SkyCoord};
use crate::dates::{parse_utc, random_date, RANDOM_DATE_FORMAT};
use crate::eclipse::{EclipseKind, EclipseTarget};
use crate::epochs::get_epochs_for_new_data;
use crate::error::{Result, TimingError};
use crate::instant::Time;
use crate::light_time::convert_all_to_tdb;
use crate::oc::TimingData;
use crate::scales::{TDB, UTC};

/// Seed used by [`get_n_random_observations_seeded`].
pub const DEFAULT_SEED: u64 = 1;

/// Mid-time uncertainty, in days, attached to every simulated observation.
pub const PLACEHOLDER_MID_TIME_ERR: f64 = 0.0001;

/// A batch of simulated observations; all columns are index-aligned.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntheticObservations {
    pub new_epochs: Vec<i64>,
    /// BJD TDB.
    pub new_mid_times: Vec<Time<TDB>>,
    pub new_mid_time_errs: Vec<f64>,
    /// Always [`EclipseKind::Occultation`], whatever kind was simulated.
    pub new_tra_or_occ: Vec<EclipseKind>,
}

impl SyntheticObservations {
    pub fn len(&self) -> usize {
        self.new_epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_epochs.is_empty()
    }

    /// The batch as a [`TimingData`] table.
    pub fn to_timing_data(&self) -> Result<TimingData> {
        TimingData::new(
            self.new_epochs.clone(),
            self.new_mid_times.clone(),
            self.new_mid_time_errs.clone(),
            self.new_tra_or_occ.clone(),
        )
    }
}

/// Simulate `n` observations of `target` between `start` and `end`.
///
/// `start` and `end` use [`RANDOM_DATE_FORMAT`]. Each uniform draw from
/// `rng` picks a date in the interval; the next eclipse of `kind` after it
/// (read as UTC) becomes a mid-time, corrected to BJD TDB for `coord` seen
/// from `location`.  Epochs are counted from `conjunction_time` with
/// `period` using the rounding rule of `kind`.
///
/// # Errors
///
/// The first failure aborts the batch: an unparsable bound
/// ([`TimingError::InvalidDate`]), a target without a next eclipse
/// ([`TimingError::EclipseNotFound`]) or a degenerate period.
#[allow(clippy::too_many_arguments)]
pub fn get_n_random_observations<T, R>(
    n: usize,
    kind: EclipseKind,
    start: &str,
    end: &str,
    target: &T,
    coord: &SkyCoord,
    location: &EarthLocation,
    conjunction_time: Time<TDB>,
    period: Days,
    rng: &mut R,
) -> Result<SyntheticObservations>
where
    T: EclipseTarget,
    R: Rng,
{
    log::debug!("simulating {n} {kind} observations between {start} and {end}");

    let mut eclipse_times: Vec<Time<UTC>> = Vec::with_capacity(n);
    for _ in 0..n {
        let date = random_date(start, end, rng.random::<f64>())?;
        let query = Time::<UTC>::from_utc(parse_utc(&date, RANDOM_DATE_FORMAT)?);
        let eclipse = target
            .next_eclipse_time(kind, query, 1)
            .into_iter()
            .next()
            .ok_or(TimingError::EclipseNotFound)?;
        log::trace!("{date} -> next {kind} at {eclipse}");
        eclipse_times.push(eclipse);
    }

    let new_mid_times = convert_all_to_tdb(coord, location, &eclipse_times);
    let new_epochs = new_mid_times
        .iter()
        .map(|&mid_time| get_epochs_for_new_data(mid_time, conjunction_time, period, kind))
        .collect::<Result<Vec<_>>>()?;

    Ok(SyntheticObservations {
        new_epochs,
        new_mid_times,
        new_mid_time_errs: vec![PLACEHOLDER_MID_TIME_ERR; n],
        new_tra_or_occ: vec![EclipseKind::Occultation; n],
    })
}

/// [`get_n_random_observations`] with a generator seeded by
/// [`DEFAULT_SEED`], so identical arguments give identical batches.
#[allow(clippy::too_many_arguments)]
pub fn get_n_random_observations_seeded<T: EclipseTarget>(
    n: usize,
    kind: EclipseKind,
    start: &str,
    end: &str,
    target: &T,
    coord: &SkyCoord,
    location: &EarthLocation,
    conjunction_time: Time<TDB>,
    period: Days,
) -> Result<SyntheticObservations> {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    get_n_random_observations(
        n,
        kind,
        start,
        end,
        target,
        coord,
        location,
        conjunction_time,
        period,
        &mut rng,
    )
}
