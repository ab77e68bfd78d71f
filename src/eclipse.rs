// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Eclipse kinds and eclipse-time prediction.
//!
//! - [`EclipseKind`]: transit (`"tra"`, planet in front of the star) or
//!   occultation (`"occ"`, planet behind the star).
//! - [`EclipseTarget`]: anything that can predict the next primary or
//!   secondary eclipses after a given instant.
//! - [`EclipsingSystem`]: a circular-orbit system defined by a reference
//!   primary eclipse and an orbital period.

use qtty::Days;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TimingError};
use crate::instant::{Time, TimeScale};
use crate::scales::TDB;

/// Kind of eclipse an observation records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EclipseKind {
    /// Primary eclipse, tagged `"tra"`.
    #[cfg_attr(feature = "serde", serde(rename = "tra"))]
    Transit,
    /// Secondary eclipse, tagged `"occ"`.
    #[cfg_attr(feature = "serde", serde(rename = "occ"))]
    Occultation,
}

impl EclipseKind {
    /// The short tag used in timing tables.
    pub const fn code(&self) -> &'static str {
        match self {
            EclipseKind::Transit => "tra",
            EclipseKind::Occultation => "occ",
        }
    }
}

impl fmt::Display for EclipseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EclipseKind {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tra" => Ok(EclipseKind::Transit),
            "occ" => Ok(EclipseKind::Occultation),
            other => Err(TimingError::UnknownEclipseKind(other.to_string())),
        }
    }
}

/// Something that predicts eclipse times.
///
/// Predictions are returned on the scale of the query instant, earliest
/// first, strictly after it.
pub trait EclipseTarget {
    /// The next `n_eclipses` primary eclipses (transits) after `time`.
    fn next_primary_eclipse_time<S: TimeScale>(
        &self,
        time: Time<S>,
        n_eclipses: usize,
    ) -> Vec<Time<S>>;

    /// The next `n_eclipses` secondary eclipses (occultations) after `time`.
    fn next_secondary_eclipse_time<S: TimeScale>(
        &self,
        time: Time<S>,
        n_eclipses: usize,
    ) -> Vec<Time<S>>;

    /// Dispatch on `kind`.
    fn next_eclipse_time<S: TimeScale>(
        &self,
        kind: EclipseKind,
        time: Time<S>,
        n_eclipses: usize,
    ) -> Vec<Time<S>> {
        match kind {
            EclipseKind::Transit => self.next_primary_eclipse_time(time, n_eclipses),
            EclipseKind::Occultation => self.next_secondary_eclipse_time(time, n_eclipses),
        }
    }
}

/// Eclipsing system on a circular orbit.
///
/// Primary eclipses happen at `primary_eclipse_time + k · orbital_period`,
/// secondary eclipses half a period later.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawEclipsingSystem", into = "RawEclipsingSystem")
)]
pub struct EclipsingSystem {
    primary_eclipse_time: Time<TDB>,
    orbital_period: Days,
}

/// Serialized form of [`EclipsingSystem`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawEclipsingSystem {
    primary_eclipse_time: Time<TDB>,
    orbital_period: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEclipsingSystem> for EclipsingSystem {
    type Error = TimingError;

    fn try_from(raw: RawEclipsingSystem) -> Result<Self> {
        Self::new(raw.primary_eclipse_time, Days::new(raw.orbital_period))
    }
}

#[cfg(feature = "serde")]
impl From<EclipsingSystem> for RawEclipsingSystem {
    fn from(system: EclipsingSystem) -> Self {
        Self {
            primary_eclipse_time: system.primary_eclipse_time,
            orbital_period: system.orbital_period.value(),
        }
    }
}

impl EclipsingSystem {
    /// Phase of the secondary eclipse for a circular orbit.
    const SECONDARY_PHASE: f64 = 0.5;

    /// Build a system from a reference mid-transit (BJD TDB) and a period.
    ///
    /// Fails with [`TimingError::InvalidPeriod`] unless the period is finite
    /// and positive.
    pub fn new(primary_eclipse_time: Time<TDB>, orbital_period: Days) -> Result<Self> {
        let period = orbital_period.value();
        if !period.is_finite() || period <= 0.0 {
            return Err(TimingError::InvalidPeriod(period));
        }
        Ok(Self {
            primary_eclipse_time,
            orbital_period,
        })
    }

    pub fn primary_eclipse_time(&self) -> Time<TDB> {
        self.primary_eclipse_time
    }

    pub fn orbital_period(&self) -> Days {
        self.orbital_period
    }

    /// Orbital phase in `[0, 1)`, zero at primary eclipse.
    pub fn phase<S: TimeScale>(&self, time: Time<S>) -> f64 {
        let period = self.orbital_period.value();
        let elapsed = (time.to::<TDB>() - self.primary_eclipse_time).value();
        elapsed.rem_euclid(period) / period
    }

    /// `n` eclipses spaced by one period, the first `offset` periods after
    /// `time`.
    fn eclipses_from<S: TimeScale>(&self, time: Time<S>, offset: f64, n: usize) -> Vec<Time<S>> {
        (0..n)
            .map(|k| time + self.orbital_period * (offset + k as f64))
            .collect()
    }
}

impl EclipseTarget for EclipsingSystem {
    fn next_primary_eclipse_time<S: TimeScale>(
        &self,
        time: Time<S>,
        n_eclipses: usize,
    ) -> Vec<Time<S>> {
        let phase = self.phase(time);
        self.eclipses_from(time, 1.0 - phase, n_eclipses)
    }

    fn next_secondary_eclipse_time<S: TimeScale>(
        &self,
        time: Time<S>,
        n_eclipses: usize,
    ) -> Vec<Time<S>> {
        let phase = self.phase(time);
        let next = if phase >= Self::SECONDARY_PHASE {
            Self::SECONDARY_PHASE + 1.0
        } else {
            Self::SECONDARY_PHASE
        };
        self.eclipses_from(time, next - phase, n_eclipses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::UTC;

    const T0: f64 = 2_454_955.788_011_8;
    const PERIOD: f64 = 1.091_419_108;

    fn system() -> EclipsingSystem {
        EclipsingSystem::new(Time::<TDB>::new(T0), Days::new(PERIOD)).expect("valid period")
    }

    #[test]
    fn kind_codes_roundtrip() {
        for kind in [EclipseKind::Transit, EclipseKind::Occultation] {
            assert_eq!(kind.code().parse::<EclipseKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.code());
        }
        assert_eq!(
            "ecl".parse::<EclipseKind>(),
            Err(TimingError::UnknownEclipseKind("ecl".into()))
        );
    }

    #[test]
    fn rejects_degenerate_periods() {
        let t0 = Time::<TDB>::new(T0);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                EclipsingSystem::new(t0, Days::new(bad)),
                Err(TimingError::InvalidPeriod(_))
            ));
        }
    }

    #[test]
    fn accessors_keep_construction_values() {
        let sys = system();
        assert_eq!(sys.primary_eclipse_time(), Time::<TDB>::new(T0));
        assert_eq!(sys.orbital_period(), Days::new(PERIOD));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip_and_period_validation() {
        let json = serde_json::to_string(&system()).unwrap();
        assert!(json.contains("\"orbital_period\":1.091419108"));
        let back: EclipsingSystem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, system());

        for bad in ["0.0", "-2.5"] {
            let json = format!(
                "{{\"primary_eclipse_time\":{T0},\"orbital_period\":{bad}}}"
            );
            let err = serde_json::from_str::<EclipsingSystem>(&json).unwrap_err();
            assert!(err.to_string().contains("invalid orbital period"), "{err}");
        }
    }

    #[test]
    fn phase_wraps_into_unit_interval() {
        let sys = system();
        let at_t0 = sys.phase(Time::<TDB>::new(T0));
        assert!((0.0..1.0).contains(&at_t0));
        assert!(at_t0 < 1e-8 || at_t0 > 1.0 - 1e-8);
        let quarter = sys.phase(Time::<TDB>::new(T0 + 0.25 * PERIOD));
        assert!((quarter - 0.25).abs() < 1e-8);
        let before = sys.phase(Time::<TDB>::new(T0 - 0.25 * PERIOD));
        assert!((before - 0.75).abs() < 1e-8);
    }

    #[test]
    fn next_primary_lands_on_ephemeris() {
        let sys = system();
        let query = Time::<TDB>::new(T0 + 100.3 * PERIOD);
        let next = sys.next_primary_eclipse_time(query, 3);
        assert_eq!(next.len(), 3);
        for (k, t) in next.iter().enumerate() {
            let expected = T0 + (101.0 + k as f64) * PERIOD;
            assert!((t.value() - expected).abs() < 1e-8, "eclipse {k}");
        }
    }

    #[test]
    fn next_secondary_is_half_a_period_after_primary() {
        let sys = system();
        let early = Time::<TDB>::new(T0 + 10.2 * PERIOD);
        let late = Time::<TDB>::new(T0 + 10.7 * PERIOD);
        let a = sys.next_secondary_eclipse_time(early, 1)[0];
        let b = sys.next_secondary_eclipse_time(late, 1)[0];
        assert!((a.value() - (T0 + 10.5 * PERIOD)).abs() < 1e-8);
        assert!((b.value() - (T0 + 11.5 * PERIOD)).abs() < 1e-8);
    }

    #[test]
    fn predictions_stay_on_query_scale() {
        let sys = system();
        let query = Time::<UTC>::new(2_459_000.5);
        let next: Vec<Time<UTC>> = sys.next_primary_eclipse_time(query, 1);
        assert!(next[0] > query);
        assert!((next[0] - query).value() <= PERIOD);
        assert!(sys.phase(next[0]) < 1e-7 || sys.phase(next[0]) > 1.0 - 1e-7);
    }

    #[test]
    fn dispatch_by_kind() {
        let sys = system();
        let query = Time::<TDB>::new(T0 + 3.1 * PERIOD);
        assert_eq!(
            sys.next_eclipse_time(EclipseKind::Transit, query, 2),
            sys.next_primary_eclipse_time(query, 2)
        );
        assert_eq!(
            sys.next_eclipse_time(EclipseKind::Occultation, query, 2),
            sys.next_secondary_eclipse_time(query, 2)
        );
        assert!(sys.next_eclipse_time(EclipseKind::Transit, query, 0).is_empty());
    }
}
