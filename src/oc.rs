// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observed-minus-calculated residuals and outlier detection.
//!
//! An [`Ephemeris`] exposes observed timing data together with a linear
//! model `T(E) = T0 + P · E`.  [`find_oc_outliers`] flags every observation
//! whose residual, in seconds, lies strictly below a threshold.

use qtty::{Days, Second, Seconds};
use std::fmt;

use crate::eclipse::EclipseKind;
use crate::error::{Result, TimingError};
use crate::instant::Time;
use crate::scales::TDB;

/// Observed mid-times with their epochs, uncertainties and eclipse kinds.
///
/// All four columns are index-aligned.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTimingData")
)]
pub struct TimingData {
    epochs: Vec<i64>,
    mid_times: Vec<Time<TDB>>,
    mid_time_uncertainties: Vec<f64>,
    tra_or_occ: Vec<EclipseKind>,
}

/// Unchecked columns, as read from a serialized table.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTimingData {
    epochs: Vec<i64>,
    mid_times: Vec<Time<TDB>>,
    mid_time_uncertainties: Vec<f64>,
    tra_or_occ: Vec<EclipseKind>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTimingData> for TimingData {
    type Error = TimingError;

    fn try_from(raw: RawTimingData) -> Result<Self> {
        Self::new(
            raw.epochs,
            raw.mid_times,
            raw.mid_time_uncertainties,
            raw.tra_or_occ,
        )
    }
}

impl TimingData {
    /// Build a table, rejecting columns whose length differs from `epochs`.
    pub fn new(
        epochs: Vec<i64>,
        mid_times: Vec<Time<TDB>>,
        mid_time_uncertainties: Vec<f64>,
        tra_or_occ: Vec<EclipseKind>,
    ) -> Result<Self> {
        let expected = epochs.len();
        for (field, found) in [
            ("mid_times", mid_times.len()),
            ("mid_time_uncertainties", mid_time_uncertainties.len()),
            ("tra_or_occ", tra_or_occ.len()),
        ] {
            if found != expected {
                return Err(TimingError::LengthMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(Self {
            epochs,
            mid_times,
            mid_time_uncertainties,
            tra_or_occ,
        })
    }

    pub fn epochs(&self) -> &[i64] {
        &self.epochs
    }

    pub fn mid_times(&self) -> &[Time<TDB>] {
        &self.mid_times
    }

    pub fn mid_time_uncertainties(&self) -> &[f64] {
        &self.mid_time_uncertainties
    }

    pub fn tra_or_occ(&self) -> &[EclipseKind] {
        &self.tra_or_occ
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }
}

/// Linear ephemeris `T(E) = conjunction_time + period · E`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearEphemeris {
    /// Reference conjunction, BJD TDB.
    pub conjunction_time: Time<TDB>,
    pub period: Days,
}

impl LinearEphemeris {
    pub const fn new(conjunction_time: Time<TDB>, period: Days) -> Self {
        Self {
            conjunction_time,
            period,
        }
    }

    /// Predicted mid-time of cycle `epoch`.
    pub fn predict(&self, epoch: i64) -> Time<TDB> {
        self.conjunction_time + self.period * epoch as f64
    }
}

/// Source of timing data and its linear model.
pub trait Ephemeris {
    /// The observations the model was fitted to.
    fn timing_data(&self) -> &TimingData;

    /// The fitted linear model.
    fn linear_model(&self) -> LinearEphemeris;

    /// Observed minus calculated mid-times under `model`, one per
    /// observation.
    fn residuals(&self, model: &LinearEphemeris) -> Vec<Days> {
        let data = self.timing_data();
        data.mid_times()
            .iter()
            .zip(data.epochs())
            .map(|(&observed, &epoch)| observed - model.predict(epoch))
            .collect()
    }
}

/// Timing data paired with an already fitted linear model.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedEphemeris {
    timing_data: TimingData,
    model: LinearEphemeris,
}

impl FittedEphemeris {
    pub fn new(timing_data: TimingData, model: LinearEphemeris) -> Self {
        Self { timing_data, model }
    }
}

impl Ephemeris for FittedEphemeris {
    fn timing_data(&self) -> &TimingData {
        &self.timing_data
    }

    fn linear_model(&self) -> LinearEphemeris {
        self.model
    }
}

/// One flagged observation.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OcOutlier {
    /// Position in the timing data.
    pub index: usize,
    pub epoch: i64,
    /// O−C residual in seconds.
    pub residual: f64,
    pub mid_time: Time<TDB>,
}

impl fmt::Display for OcOutlier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index: {}, epoch: {}, y value: {}, mid-time: {}",
            self.index,
            self.epoch,
            self.residual,
            self.mid_time.value()
        )
    }
}

/// Shape of the report produced by [`find_oc_outliers`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReturnType {
    /// Human-readable lines.
    Str,
    /// Structured records.
    Numerical,
}

/// Flagged observations, in index order.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlierReport {
    Str(Vec<String>),
    Numerical(Vec<OcOutlier>),
}

impl OutlierReport {
    pub fn len(&self) -> usize {
        match self {
            OutlierReport::Str(lines) => lines.len(),
            OutlierReport::Numerical(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flag observations whose O−C residual is strictly below `y_limit`.
///
/// There is no lower bound: large negative residuals are always flagged.
pub fn find_oc_outliers<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    y_limit: Seconds,
    return_type: ReturnType,
) -> OutlierReport {
    let model = ephemeris.linear_model();
    let data = ephemeris.timing_data();

    let outliers: Vec<OcOutlier> = ephemeris
        .residuals(&model)
        .into_iter()
        .zip(data.epochs().iter().zip(data.mid_times()))
        .enumerate()
        .map(|(index, (residual, (&epoch, &mid_time)))| OcOutlier {
            index,
            epoch,
            residual: residual.to::<Second>().value(),
            mid_time,
        })
        .filter(|outlier| Seconds::new(outlier.residual) < y_limit)
        .collect();

    log::debug!(
        "{} of {} observations below {}",
        outliers.len(),
        data.len(),
        y_limit
    );

    match return_type {
        ReturnType::Str => {
            OutlierReport::Str(outliers.iter().map(ToString::to_string).collect())
        }
        ReturnType::Numerical => OutlierReport::Numerical(outliers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T0: f64 = 2_454_955.788_011_8;
    const PERIOD: f64 = 1.091_419_108;

    fn model() -> LinearEphemeris {
        LinearEphemeris::new(Time::new(T0), Days::new(PERIOD))
    }

    /// Observations at the given epochs, offset from the model by
    /// `residuals_s` seconds.
    fn ephemeris(epochs: &[i64], residuals_s: &[f64]) -> FittedEphemeris {
        let model = model();
        let mid_times = epochs
            .iter()
            .zip(residuals_s)
            .map(|(&e, &r)| model.predict(e) + Days::new(r / 86_400.0))
            .collect();
        let data = TimingData::new(
            epochs.to_vec(),
            mid_times,
            vec![0.0001; epochs.len()],
            vec![EclipseKind::Transit; epochs.len()],
        )
        .expect("aligned columns");
        FittedEphemeris::new(data, model)
    }

    fn indices(report: &OutlierReport) -> Vec<usize> {
        match report {
            OutlierReport::Numerical(records) => records.iter().map(|o| o.index).collect(),
            OutlierReport::Str(lines) => lines
                .iter()
                .map(|line| {
                    line.strip_prefix("index: ")
                        .and_then(|rest| rest.split(',').next())
                        .and_then(|i| i.parse().ok())
                        .expect("index field")
                })
                .collect(),
        }
    }

    #[test]
    fn timing_data_rejects_ragged_columns() {
        let err = TimingData::new(
            vec![0, 1, 2],
            vec![Time::new(T0); 3],
            vec![0.0001; 2],
            vec![EclipseKind::Transit; 3],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TimingError::LengthMismatch {
                field: "mid_time_uncertainties",
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn timing_data_exposes_its_columns() {
        let data = TimingData::new(
            vec![-3, 0, 4],
            vec![Time::new(T0 - 3.0 * PERIOD), Time::new(T0), Time::new(T0 + 4.0 * PERIOD)],
            vec![0.0002, 0.0001, 0.0003],
            vec![EclipseKind::Transit, EclipseKind::Occultation, EclipseKind::Transit],
        )
        .unwrap();
        assert_eq!(data.len(), 3);
        assert!(!data.is_empty());
        assert_eq!(data.epochs(), &[-3, 0, 4]);
        assert_eq!(data.mid_times()[1], Time::new(T0));
        assert_eq!(data.mid_time_uncertainties(), &[0.0002, 0.0001, 0.0003]);
        assert_eq!(data.tra_or_occ()[1], EclipseKind::Occultation);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_rejects_ragged_columns() {
        let aligned = r#"{"epochs":[0,1],"mid_times":[2454955.5,2454956.6],
            "mid_time_uncertainties":[0.0001,0.0001],"tra_or_occ":["tra","occ"]}"#;
        let data: TimingData = serde_json::from_str(aligned).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.tra_or_occ(), &[EclipseKind::Transit, EclipseKind::Occultation]);

        let ragged = r#"{"epochs":[0,1,2],"mid_times":[2454955.5],
            "mid_time_uncertainties":[],"tra_or_occ":["tra"]}"#;
        let err = serde_json::from_str::<TimingData>(ragged).unwrap_err();
        assert!(err.to_string().contains("length mismatch for mid_times"), "{err}");
    }

    /// Reports more residuals than there are observations.
    struct Overlong(FittedEphemeris);

    impl Ephemeris for Overlong {
        fn timing_data(&self) -> &TimingData {
            self.0.timing_data()
        }

        fn linear_model(&self) -> LinearEphemeris {
            self.0.linear_model()
        }

        fn residuals(&self, _: &LinearEphemeris) -> Vec<Days> {
            vec![Days::new(-1.0); self.0.timing_data().len() + 3]
        }
    }

    #[test]
    fn extra_residuals_are_ignored() {
        let eph = Overlong(ephemeris(&[0, 1], &[0.0, 0.0]));
        let report = find_oc_outliers(&eph, Seconds::new(0.0), ReturnType::Numerical);
        assert_eq!(indices(&report), vec![0, 1]);
    }

    #[test]
    fn residuals_are_observed_minus_calculated() {
        let eph = ephemeris(&[0, 10, 250], &[30.0, -45.0, 0.0]);
        let residuals = eph.residuals(&eph.linear_model());
        let expected = [30.0, -45.0, 0.0];
        for (r, e) in residuals.iter().zip(expected) {
            assert!((r.to::<Second>().value() - e).abs() < 1e-3);
        }
    }

    #[test]
    fn flags_strictly_below_limit_without_lower_bound() {
        let eph = ephemeris(&[0, 1, 2, 3, 4], &[-600.0, 15.0, -20.0, 400.0, 3.0]);
        let report = find_oc_outliers(&eph, Seconds::new(10.0), ReturnType::Numerical);
        assert_eq!(indices(&report), vec![0, 2, 4]);

        let OutlierReport::Numerical(records) = report else {
            panic!("numerical report expected");
        };
        assert_eq!(records[1].epoch, 2);
        assert!((records[1].residual + 20.0).abs() < 1e-3);
        assert_eq!(records[1].mid_time, eph.timing_data().mid_times()[2]);
    }

    #[test]
    fn string_lines_follow_record_format() {
        let eph = ephemeris(&[7], &[-120.0]);
        let OutlierReport::Str(lines) = find_oc_outliers(&eph, Seconds::new(0.0), ReturnType::Str)
        else {
            panic!("string report expected");
        };
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("index: 0, epoch: 7, y value: -1"));
        assert!(lines[0].contains(", mid-time: 2454963."));
    }

    #[test]
    fn empty_data_gives_empty_report() {
        let eph = ephemeris(&[], &[]);
        let report = find_oc_outliers(&eph, Seconds::new(1e9), ReturnType::Str);
        assert!(report.is_empty());
    }

    proptest! {
        #[test]
        fn reports_exactly_the_indices_below_limit(
            residuals in prop::collection::vec(-900.0f64..900.0, 0..40),
            limit in -900.0f64..900.0,
        ) {
            let epochs: Vec<i64> = (0..residuals.len() as i64).map(|e| e * 3 - 20).collect();
            let eph = ephemeris(&epochs, &residuals);
            let expected: Vec<usize> = eph
                .residuals(&eph.linear_model())
                .iter()
                .enumerate()
                .filter(|(_, r)| r.to::<Second>() < Seconds::new(limit))
                .map(|(i, _)| i)
                .collect();

            let numerical = find_oc_outliers(&eph, Seconds::new(limit), ReturnType::Numerical);
            let strings = find_oc_outliers(&eph, Seconds::new(limit), ReturnType::Str);
            prop_assert_eq!(indices(&numerical), expected.clone());
            prop_assert_eq!(indices(&strings), expected);
        }
    }
}
