// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Target direction and observatory position.
//!
//! Both types only feed the barycentric light-travel-time correction, so
//! they carry exactly what that correction needs:
//!
//! - [`SkyCoord`]: ICRS right ascension and declination of the target.
//! - [`EarthLocation`]: WGS84 geodetic position of the observatory, turned
//!   into a geocentric vector in the celestial frame by the Earth rotation
//!   angle.  Precession and nutation are neglected; at the Earth's radius
//!   they move the observer by well under a millisecond of light time.

use nalgebra::Vector3;
use qtty::{Degrees, Meters};
use std::f64::consts::TAU;

use crate::instant::Time;
use crate::scales::UTC;

/// Astronomical unit in metres (IAU 2012).
pub(crate) const AU_METERS: f64 = 149_597_870_700.0;

/// WGS84 equatorial radius in metres.
const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Sky position of a target in the ICRS.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SkyCoord {
    ra: Degrees,
    dec: Degrees,
}

impl SkyCoord {
    /// Create from right ascension and declination.
    pub const fn new(ra: Degrees, dec: Degrees) -> Self {
        Self { ra, dec }
    }

    /// Create from right ascension and declination given in degrees.
    pub const fn from_degrees(ra: f64, dec: f64) -> Self {
        Self::new(Degrees::new(ra), Degrees::new(dec))
    }

    /// Right ascension.
    pub const fn ra(&self) -> Degrees {
        self.ra
    }

    /// Declination.
    pub const fn dec(&self) -> Degrees {
        self.dec
    }

    /// Unit vector pointing at the target, equatorial ICRS axes.
    pub fn unit_vector(&self) -> Vector3<f64> {
        let (sin_ra, cos_ra) = self.ra.value().to_radians().sin_cos();
        let (sin_dec, cos_dec) = self.dec.value().to_radians().sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
    }
}

/// Observatory location, stored as an Earth-fixed (ITRS) vector in metres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EarthLocation {
    itrs: Vector3<f64>,
}

impl EarthLocation {
    /// Create from WGS84 geodetic longitude (east positive), latitude and
    /// height above the ellipsoid.
    pub fn from_geodetic(longitude: Degrees, latitude: Degrees, height: Meters) -> Self {
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let (sin_lat, cos_lat) = latitude.value().to_radians().sin_cos();
        let (sin_lon, cos_lon) = longitude.value().to_radians().sin_cos();
        let h = height.value();

        // Prime vertical radius of curvature.
        let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();

        Self {
            itrs: Vector3::new(
                (n + h) * cos_lat * cos_lon,
                (n + h) * cos_lat * sin_lon,
                (n * (1.0 - e2) + h) * sin_lat,
            ),
        }
    }

    /// Create from Earth-fixed cartesian coordinates.
    pub fn from_geocentric(x: Meters, y: Meters, z: Meters) -> Self {
        Self {
            itrs: Vector3::new(x.value(), y.value(), z.value()),
        }
    }

    /// The geocenter, for which only the Earth's barycentric motion matters.
    pub fn geocenter() -> Self {
        Self {
            itrs: Vector3::zeros(),
        }
    }

    /// Earth-fixed (ITRS) cartesian position in metres.
    pub fn geocentric(&self) -> Vector3<f64> {
        self.itrs
    }

    /// Geocentric position in the celestial frame at `time`, in AU.
    ///
    /// UTC stands in for UT1; the sub-second difference rotates the
    /// observer by a few metres.
    pub fn celestial_position(&self, time: Time<UTC>) -> Vector3<f64> {
        let era = earth_rotation_angle(time);
        let (sin_era, cos_era) = era.sin_cos();
        let itrs = self.itrs;
        Vector3::new(
            cos_era * itrs.x - sin_era * itrs.y,
            sin_era * itrs.x + cos_era * itrs.y,
            itrs.z,
        ) / AU_METERS
    }
}

/// Earth rotation angle (IERS 2003), in radians within `[0, 2π)`.
fn earth_rotation_angle(time: Time<UTC>) -> f64 {
    let du = time.value() - 2_451_545.0;
    // Split the fractional day out first to keep precision.
    let frac = du.rem_euclid(1.0);
    (TAU * (frac + 0.779_057_273_264 + 0.002_737_811_911_354_48 * du)).rem_euclid(TAU)
}
