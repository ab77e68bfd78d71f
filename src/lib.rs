// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Transit Timing
//!
//! Helpers for exoplanet transit and occultation timing analysis.
//!
//! # Core operations
//!
//! - [`find_oc_outliers`]: flag observations whose O−C residual against a
//!   linear [`Ephemeris`] falls below a threshold.
//! - [`convert_to_tdb`] / [`convert_all_to_tdb`]: observation time on any
//!   scale to BJD TDB, corrected for barycentric light-travel time.
//! - [`get_epochs_for_new_data`]: integer orbital cycle of a mid-time.
//! - [`str_time_prop`] / [`random_date`]: date strings interpolated within
//!   an interval.
//! - [`get_n_random_observations`]: simulated future observations of an
//!   [`EclipseTarget`].
//!
//! # Time scales
//!
//! Instants are [`Time<S>`] values tagged with a [`TimeScale`] marker:
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date (TT axis) |
//! | [`TT`] | Terrestrial Time |
//! | [`TAI`] | International Atomic Time |
//! | [`TDB`] | Barycentric Dynamical Time |
//! | [`UTC`] | Coordinated Universal Time |
//!
//! # Features
//!
//! - `serde`: (de)serialization of instants, eclipse kinds, timing tables,
//!   outlier records and synthetic batches.

mod coords;
mod dates;
mod eclipse;
mod epochs;
mod error;
pub(crate) mod instant;
mod leap_seconds;
mod light_time;
mod oc;
pub(crate) mod scales;
mod solar_system;
mod synthetic;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use coords::{EarthLocation, SkyCoord};
pub use dates::{random_date, str_time_prop, RANDOM_DATE_FORMAT};
pub use eclipse::{EclipseKind, EclipseTarget, EclipsingSystem};
pub use epochs::get_epochs_for_new_data;
pub use error::{Result, TimingError};
pub use instant::{Time, TimeScale};
pub use leap_seconds::tai_minus_utc;
pub use light_time::{convert_all_to_tdb, convert_to_tdb, light_travel_time};
pub use oc::{
    find_oc_outliers, Ephemeris, FittedEphemeris, LinearEphemeris, OcOutlier, OutlierReport,
    ReturnType, TimingData,
};
pub use scales::{JD, TAI, TDB, TT, UTC};
pub use solar_system::{
    earth_barycentric_position, earth_heliocentric_position, sun_barycentric_position,
};
pub use synthetic::{
    get_n_random_observations, get_n_random_observations_seeded, SyntheticObservations,
    DEFAULT_SEED, PLACEHOLDER_MID_TIME_ERR,
};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Date on the TT axis.
pub type JulianDate = Time<JD>;

/// Barycentric Julian Date in TDB, the scale of published mid-times.
pub type BarycentricJulianDate = Time<TDB>;
