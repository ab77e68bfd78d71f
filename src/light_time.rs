// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Barycentric light-travel-time correction and BJD TDB conversion.
//!
//! A photon from a distant target reaches the solar-system barycenter
//! `(r · n̂) / c` later than it reaches an observer at barycentric position
//! `r`, with `n̂` the unit vector toward the target.  Adding that delay to
//! the observation time expressed in TDB yields the Barycentric Julian Date
//! used for transit and occultation mid-times.
//!
//! ```rust
//! use qtty::{Degrees, Meters};
//! use transit_timing::{convert_to_tdb, EarthLocation, SkyCoord, Time, UTC};
//!
//! let target = SkyCoord::from_degrees(330.79, 18.88); // HD 209458
//! let site = EarthLocation::from_geodetic(
//!     Degrees::new(-111.5967),
//!     Degrees::new(31.9583),
//!     Meters::new(2096.0),
//! );
//! let observed = Time::<UTC>::new(2_459_100.75);
//! let bjd = convert_to_tdb(&target, &site, observed);
//! let shift_s = (bjd.value() - observed.to::<transit_timing::TDB>().value()) * 86_400.0;
//! assert!(shift_s.abs() < 510.0);
//! ```

use qtty::{Day, Seconds};

use crate::coords::{EarthLocation, SkyCoord, AU_METERS};
use crate::instant::{Time, TimeScale};
use crate::scales::{TDB, UTC};
use crate::solar_system::earth_barycentric_position;

/// Speed of light in metres per second.
const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Light time across one astronomical unit, in seconds.
const AU_LIGHT_SECONDS: f64 = AU_METERS / SPEED_OF_LIGHT;

/// Light-travel time from the observer to the solar-system barycenter along
/// the direction of `target`.
///
/// Positive when the observer is closer to the target than the barycenter
/// is, i.e. when the photon still has to travel to reach the barycenter.
pub fn light_travel_time<S: TimeScale>(
    target: &SkyCoord,
    location: &EarthLocation,
    time: Time<S>,
) -> Seconds {
    let tdb = time.to::<TDB>();
    let observer = earth_barycentric_position(tdb) + location.celestial_position(time.to::<UTC>());
    Seconds::new(observer.dot(&target.unit_vector()) * AU_LIGHT_SECONDS)
}

/// Convert an observation time on any scale to BJD TDB.
///
/// The result is the instant on the TDB axis plus the barycentric
/// light-travel time toward `target` as seen from `location`.
pub fn convert_to_tdb<S: TimeScale>(
    target: &SkyCoord,
    location: &EarthLocation,
    time: Time<S>,
) -> Time<TDB> {
    let ltt = light_travel_time(target, location, time);
    log::trace!("light travel time at {time}: {ltt}");
    time.to::<TDB>() + ltt.to::<Day>()
}

/// Batch form of [`convert_to_tdb`], one BJD TDB per input time, in order.
pub fn convert_all_to_tdb<S: TimeScale>(
    target: &SkyCoord,
    location: &EarthLocation,
    times: &[Time<S>],
) -> Vec<Time<TDB>> {
    log::debug!("converting {} times to BJD TDB", times.len());
    times
        .iter()
        .map(|&time| convert_to_tdb(target, location, time))
        .collect()
}
