use crate::store::{RecordStore, StudentRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Clamp a points sum into the finite `f64` range. JSON has no infinities,
/// so an overflowed total would export as `null`.
pub fn saturate_points(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Points attributed to one identity, split by source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PointsBreakdown {
    pub marksheet_points: f64,
    pub certificate_count: usize,
    pub certificates_points: f64,
    pub total_points: f64,
}

impl PointsBreakdown {
    pub fn for_record(record: &StudentRecord) -> Self {
        let marksheet_points = record
            .marksheet
            .as_ref()
            .map_or(0.0, |m| m.points_or_zero());
        let certificates_sum = record
            .certificates
            .iter()
            .map(|c| c.points_or_zero())
            .fold(0.0, |acc, p| acc + p);
        // Summed from the two parts so the total always equals them exactly.
        let total_sum = marksheet_points + certificates_sum;

        if !total_sum.is_finite() {
            warn!(
                identity = %record.identity,
                total = total_sum,
                "points total is not finite, saturating"
            );
        }

        Self {
            marksheet_points,
            certificate_count: record.certificates.len(),
            certificates_points: saturate_points(certificates_sum),
            total_points: saturate_points(total_sum),
        }
    }
}

/// Reads totals from the live store; nothing is cached between calls.
#[derive(Debug, Clone, Copy)]
pub struct PointsCalculator<'a> {
    store: &'a RecordStore,
}

impl<'a> PointsCalculator<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Breakdown for `identity`; all zero for an identity not in the store.
    pub fn breakdown(&self, identity: &str) -> PointsBreakdown {
        self.store
            .get(identity)
            .map(PointsBreakdown::for_record)
            .unwrap_or_default()
    }

    pub fn total(&self, identity: &str) -> f64 {
        self.breakdown(identity).total_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractionResult;

    #[test]
    fn unknown_identity_totals_zero() {
        let store = RecordStore::new();
        assert_eq!(PointsCalculator::new(&store).total("R404"), 0.0);
    }

    #[test]
    fn missing_points_count_as_zero() {
        let mut store = RecordStore::new();
        let mut no_points = ExtractionResult::certificate("R1_a.png", 0.0);
        no_points.points = None;
        store.push_certificate("R1", no_points);
        store.push_certificate("R1", ExtractionResult::certificate("R1_b.png", 3.0));

        let b = PointsCalculator::new(&store).breakdown("R1");
        assert_eq!(b.marksheet_points, 0.0);
        assert_eq!(b.certificate_count, 2);
        assert_eq!(b.certificates_points, 3.0);
        assert_eq!(b.total_points, 3.0);
    }

    #[test]
    fn overflowing_totals_saturate() {
        let mut store = RecordStore::new();
        store.set_marksheet("R1", ExtractionResult::marksheet("R1", "Asha", "B.Sc.", 8.0, 1e308));
        store.push_certificate("R1", ExtractionResult::certificate("R1_a.png", 1e308));
        store.push_certificate("R1", ExtractionResult::certificate("R1_b.png", 1e308));

        let b = PointsCalculator::new(&store).breakdown("R1");
        assert_eq!(b.certificates_points, f64::MAX);
        assert_eq!(b.total_points, f64::MAX);
        assert!(b.total_points.is_finite());
    }

    #[test]
    fn total_reflects_later_mutation() {
        let mut store = RecordStore::new();
        store.set_marksheet("R1", ExtractionResult::marksheet("R1", "Asha", "B.Sc.", 8.0, 50.0));
        assert_eq!(PointsCalculator::new(&store).total("R1"), 50.0);

        store.push_certificate("R1", ExtractionResult::certificate("R1_a.png", 2.5));
        assert_eq!(PointsCalculator::new(&store).total("R1"), 52.5);
    }
}
