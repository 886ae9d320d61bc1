//! Ever-semantics relationship predicates between temporal points and
//! static shapes.
//!
//! Every predicate answers "did the relation hold at some instant of the
//! operands' common lifetime?" and returns `Ok(None)` when that question
//! has no answer: the static operand is empty, or the two temporal
//! operands never coexist. Frame violations (SRID, kind, dimensionality)
//! are hard errors, as is asking a planar-only predicate of geographic
//! operands.
//!
//! Predicates with one temporal operand reduce it to its footprint and
//! delegate to the static library. Predicates over two temporal operands
//! synchronize them first; `dwithin` then walks the synchronized segments
//! with a closest-approach solver instead of comparing footprints, because
//! two moving points can come within range at an instant that neither
//! footprint records.

pub mod dwithin;
pub mod library;

use crate::error::{RelError, Result};
use crate::point::{PointValue, Shape, SpatialKind};
use crate::temporal::align::{LinearAligner, TemporalAligner};
use crate::temporal::TemporalPoint;
use crate::trajectory::footprint;
use dwithin::{dwithin_synced_sequences, dwithin_synced_sets};
use geo::relate::IntersectionMatrix;
use geo::Geometry;
use library::{GeoPredicateLibrary, PredicateLibrary};

/// Evaluator for spatial relationship predicates, parameterized over the
/// static predicate library and the temporal aligner.
///
/// The default configuration is what nearly all callers want:
///
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// use trajrel::{PointValue, RelationEvaluator, Shape, TInstant, TSequence, TemporalPoint};
///
/// let eval = RelationEvaluator::new();
/// let tp = TemporalPoint::Sequence(TSequence::linear(vec![
///     TInstant::new(PointValue::new(0.0, 0.0), UNIX_EPOCH),
///     TInstant::new(PointValue::new(10.0, 0.0), UNIX_EPOCH + Duration::from_secs(10)),
/// ])?);
/// let origin = Shape::point(&PointValue::new(5.0, 0.0));
/// assert_eq!(eval.intersects_tpoint_geo(&tp, &origin)?, Some(true));
/// # Ok::<(), trajrel::RelError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelationEvaluator<L = GeoPredicateLibrary, A = LinearAligner> {
    library: L,
    aligner: A,
}

impl RelationEvaluator {
    /// Evaluator with the `geo`-backed library and the linear aligner.
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_valid_distance(dist: f64) -> Result<()> {
    if !dist.is_finite() || dist < 0.0 {
        return Err(RelError::InvalidInput(format!(
            "distance must be finite and non-negative, got {}",
            dist
        )));
    }
    Ok(())
}

fn require_planar(relation: &'static str, kind: SpatialKind) -> Result<()> {
    if kind == SpatialKind::Geography {
        return Err(RelError::UnsupportedKind { relation, kind });
    }
    Ok(())
}

impl<L: PredicateLibrary, A: TemporalAligner> RelationEvaluator<L, A> {
    /// Evaluator with a custom library and aligner.
    pub fn with_parts(library: L, aligner: A) -> Self {
        Self { library, aligner }
    }

    fn ensure_frame_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<()> {
        let frame = tp.start_value();
        if frame.srid != shape.srid() {
            return Err(RelError::SridMismatch(frame.srid, shape.srid()));
        }
        if frame.kind != shape.kind() {
            return Err(RelError::InvalidInput(format!(
                "cannot mix {} and {} operands",
                frame.kind,
                shape.kind()
            )));
        }
        if frame.dims() != shape.dims() {
            return Err(RelError::DimensionalityMismatch(frame.dims(), shape.dims()));
        }
        Ok(())
    }

    /// Footprint-vs-shape evaluation. The closure receives (trajectory,
    /// shape); callers swap arguments inside it for the inverted direction.
    fn eval_geo<F>(&self, tp: &TemporalPoint, shape: &Shape, f: F) -> Result<Option<bool>>
    where
        F: FnOnce(&L, &Geometry<f64>, &Geometry<f64>) -> Result<bool>,
    {
        self.ensure_frame_geo(tp, shape)?;
        if shape.is_empty() {
            log::debug!("static operand is empty, relation is unknown");
            return Ok(None);
        }
        let traj = footprint(tp);
        f(&self.library, traj.geometry(), shape.geometry()).map(Some)
    }

    /// Footprint-vs-footprint evaluation over the synchronized operands.
    fn eval_tpoint<F>(&self, a: &TemporalPoint, b: &TemporalPoint, f: F) -> Result<Option<bool>>
    where
        F: FnOnce(&L, &Geometry<f64>, &Geometry<f64>) -> Result<bool>,
    {
        a.start_value().ensure_same_frame(b.start_value())?;
        let Some((sa, sb)) = self.aligner.synchronize(a, b)? else {
            log::debug!("time spans do not intersect, relation is unknown");
            return Ok(None);
        };
        let (fa, fb) = (footprint(&sa), footprint(&sb));
        f(&self.library, fa.geometry(), fb.geometry()).map(Some)
    }

    // --- contains ---

    /// Whether the shape ever contains the moving point.
    pub fn contains_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        require_planar("contains", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_contains(g, t))
    }

    /// Whether the moving point's footprint ever contains the shape.
    pub fn contains_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        require_planar("contains", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_contains(t, g))
    }

    /// Whether the first footprint contains the second over the common span.
    pub fn contains_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("contains", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_contains(x, y))
    }

    // --- containsproperly ---

    /// Contains with no boundary contact, shape against moving point.
    pub fn containsproperly_geo_tpoint(
        &self,
        shape: &Shape,
        tp: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("containsproperly", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_containsproperly(g, t))
    }

    pub fn containsproperly_tpoint_geo(
        &self,
        tp: &TemporalPoint,
        shape: &Shape,
    ) -> Result<Option<bool>> {
        require_planar("containsproperly", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_containsproperly(t, g))
    }

    pub fn containsproperly_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("containsproperly", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_containsproperly(x, y))
    }

    // --- covers ---

    /// Whether the shape ever covers the moving point. Defined for both
    /// planar and geographic operands.
    pub fn covers_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        match tp.kind() {
            SpatialKind::Geometry => self.eval_geo(tp, shape, |l, t, g| l.geom_covers(g, t)),
            SpatialKind::Geography => self.eval_geo(tp, shape, |l, t, g| l.geog_covers(g, t)),
        }
    }

    pub fn covers_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        match tp.kind() {
            SpatialKind::Geometry => self.eval_geo(tp, shape, |l, t, g| l.geom_covers(t, g)),
            SpatialKind::Geography => self.eval_geo(tp, shape, |l, t, g| l.geog_covers(t, g)),
        }
    }

    pub fn covers_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        match a.kind() {
            SpatialKind::Geometry => self.eval_tpoint(a, b, |l, x, y| l.geom_covers(x, y)),
            SpatialKind::Geography => self.eval_tpoint(a, b, |l, x, y| l.geog_covers(x, y)),
        }
    }

    // --- coveredby ---

    pub fn coveredby_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        match tp.kind() {
            SpatialKind::Geometry => self.eval_geo(tp, shape, |l, t, g| l.geom_coveredby(g, t)),
            SpatialKind::Geography => self.eval_geo(tp, shape, |l, t, g| l.geog_coveredby(g, t)),
        }
    }

    /// Whether the moving point ever stays within the shape's closure.
    pub fn coveredby_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        match tp.kind() {
            SpatialKind::Geometry => self.eval_geo(tp, shape, |l, t, g| l.geom_coveredby(t, g)),
            SpatialKind::Geography => self.eval_geo(tp, shape, |l, t, g| l.geog_coveredby(t, g)),
        }
    }

    pub fn coveredby_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        match a.kind() {
            SpatialKind::Geometry => self.eval_tpoint(a, b, |l, x, y| l.geom_coveredby(x, y)),
            SpatialKind::Geography => self.eval_tpoint(a, b, |l, x, y| l.geog_coveredby(x, y)),
        }
    }

    // --- crosses ---

    pub fn crosses_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        require_planar("crosses", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_crosses(g, t))
    }

    /// Whether the trajectory ever crosses the shape.
    pub fn crosses_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        require_planar("crosses", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_crosses(t, g))
    }

    pub fn crosses_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("crosses", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_crosses(x, y))
    }

    // --- disjoint ---

    pub fn disjoint_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        require_planar("disjoint", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_disjoint(g, t))
    }

    /// Whether the trajectory and the shape never meet.
    pub fn disjoint_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        require_planar("disjoint", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_disjoint(t, g))
    }

    pub fn disjoint_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("disjoint", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_disjoint(x, y))
    }

    // --- equals ---

    pub fn equals_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        require_planar("equals", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_equals(g, t))
    }

    /// Whether the trajectory and the shape occupy the same point set.
    pub fn equals_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        require_planar("equals", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_equals(t, g))
    }

    pub fn equals_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("equals", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_equals(x, y))
    }

    // --- intersects ---

    pub fn intersects_geo_tpoint(
        &self,
        shape: &Shape,
        tp: &TemporalPoint,
    ) -> Result<Option<bool>> {
        self.intersects_tpoint_geo(tp, shape)
    }

    /// Whether the moving point ever intersects the shape. Defined for both
    /// planar and geographic operands.
    pub fn intersects_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        match tp.kind() {
            SpatialKind::Geometry => self.eval_geo(tp, shape, |l, t, g| l.geom_intersects(t, g)),
            SpatialKind::Geography => self.eval_geo(tp, shape, |l, t, g| l.geog_intersects(t, g)),
        }
    }

    pub fn intersects_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        match a.kind() {
            SpatialKind::Geometry => self.eval_tpoint(a, b, |l, x, y| l.geom_intersects(x, y)),
            SpatialKind::Geography => self.eval_tpoint(a, b, |l, x, y| l.geog_intersects(x, y)),
        }
    }

    // --- overlaps ---

    pub fn overlaps_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        require_planar("overlaps", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_overlaps(g, t))
    }

    pub fn overlaps_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        require_planar("overlaps", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_overlaps(t, g))
    }

    pub fn overlaps_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("overlaps", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_overlaps(x, y))
    }

    // --- touches ---

    pub fn touches_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        require_planar("touches", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_touches(g, t))
    }

    /// Whether the trajectory ever touches the shape's boundary without
    /// entering its interior.
    pub fn touches_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        require_planar("touches", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_touches(t, g))
    }

    pub fn touches_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        require_planar("touches", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_touches(x, y))
    }

    // --- within ---

    /// `within` is `contains` with the operands swapped.
    pub fn within_geo_tpoint(&self, shape: &Shape, tp: &TemporalPoint) -> Result<Option<bool>> {
        self.contains_tpoint_geo(tp, shape)
    }

    pub fn within_tpoint_geo(&self, tp: &TemporalPoint, shape: &Shape) -> Result<Option<bool>> {
        self.contains_geo_tpoint(shape, tp)
    }

    pub fn within_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<bool>> {
        self.contains_tpoint_tpoint(b, a)
    }

    // --- dwithin ---

    pub fn dwithin_geo_tpoint(
        &self,
        shape: &Shape,
        tp: &TemporalPoint,
        dist: f64,
    ) -> Result<Option<bool>> {
        self.dwithin_tpoint_geo(tp, shape, dist)
    }

    /// Whether the moving point ever comes within `dist` of the shape.
    /// Distance is in coordinate units for planar operands and meters for
    /// geographic ones.
    pub fn dwithin_tpoint_geo(
        &self,
        tp: &TemporalPoint,
        shape: &Shape,
        dist: f64,
    ) -> Result<Option<bool>> {
        ensure_valid_distance(dist)?;
        match tp.kind() {
            SpatialKind::Geometry => self.eval_geo(tp, shape, |l, t, g| l.geom_dwithin(t, g, dist)),
            SpatialKind::Geography => {
                self.eval_geo(tp, shape, |l, t, g| l.geog_dwithin(t, g, dist))
            }
        }
    }

    /// Whether the two moving points ever come within `dist` of each other.
    ///
    /// Unlike the other predicates this does not compare footprints: the
    /// operands are synchronized and walked segment by segment with a
    /// closest-approach solver, so an approach at an unsampled instant is
    /// still found.
    pub fn dwithin_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
        dist: f64,
    ) -> Result<Option<bool>> {
        ensure_valid_distance(dist)?;
        a.start_value().ensure_same_frame(b.start_value())?;
        let Some((sa, sb)) = self.aligner.synchronize(a, b)? else {
            log::debug!("time spans do not intersect, relation is unknown");
            return Ok(None);
        };
        let within = |p: &PointValue, q: &PointValue| match p.kind {
            SpatialKind::Geometry => self.library.geom_dwithin_points(p, q, dist),
            SpatialKind::Geography => self.library.geog_dwithin_points(p, q, dist),
        };
        let ever = match (&sa, &sb) {
            (TemporalPoint::Instant(x), TemporalPoint::Instant(y)) => {
                within(x.value(), y.value())?
            }
            (TemporalPoint::InstantSet(x), TemporalPoint::InstantSet(y)) => {
                let mut hit = false;
                for (i, j) in x.instants().iter().zip(y.instants()) {
                    if within(i.value(), j.value())? {
                        hit = true;
                        break;
                    }
                }
                hit
            }
            (TemporalPoint::Sequence(x), TemporalPoint::Sequence(y)) => {
                dwithin_synced_sequences(x, y, &within)?
            }
            (TemporalPoint::SequenceSet(x), TemporalPoint::SequenceSet(y)) => {
                dwithin_synced_sets(x, y, &within)?
            }
            _ => {
                return Err(RelError::InvalidTemporal(
                    "synchronization produced mismatched representations".into(),
                ));
            }
        };
        Ok(Some(ever))
    }

    // --- relate ---

    /// The full DE-9IM matrix between the footprint and the shape.
    pub fn relate_tpoint_geo(
        &self,
        tp: &TemporalPoint,
        shape: &Shape,
    ) -> Result<Option<IntersectionMatrix>> {
        require_planar("relate", tp.kind())?;
        self.ensure_frame_geo(tp, shape)?;
        if shape.is_empty() {
            return Ok(None);
        }
        let traj = footprint(tp);
        self.library
            .geom_relate(traj.geometry(), shape.geometry())
            .map(Some)
    }

    pub fn relate_geo_tpoint(
        &self,
        shape: &Shape,
        tp: &TemporalPoint,
    ) -> Result<Option<IntersectionMatrix>> {
        require_planar("relate", tp.kind())?;
        self.ensure_frame_geo(tp, shape)?;
        if shape.is_empty() {
            return Ok(None);
        }
        let traj = footprint(tp);
        self.library
            .geom_relate(shape.geometry(), traj.geometry())
            .map(Some)
    }

    pub fn relate_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
    ) -> Result<Option<IntersectionMatrix>> {
        require_planar("relate", a.kind())?;
        a.start_value().ensure_same_frame(b.start_value())?;
        let Some((sa, sb)) = self.aligner.synchronize(a, b)? else {
            return Ok(None);
        };
        let (fa, fb) = (footprint(&sa), footprint(&sb));
        self.library
            .geom_relate(fa.geometry(), fb.geometry())
            .map(Some)
    }

    // --- relate_pattern ---

    /// Whether the footprint/shape DE-9IM matrix matches `pattern`.
    pub fn relate_pattern_tpoint_geo(
        &self,
        tp: &TemporalPoint,
        shape: &Shape,
        pattern: &str,
    ) -> Result<Option<bool>> {
        require_planar("relate_pattern", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_relate_matches(t, g, pattern))
    }

    pub fn relate_pattern_geo_tpoint(
        &self,
        shape: &Shape,
        tp: &TemporalPoint,
        pattern: &str,
    ) -> Result<Option<bool>> {
        require_planar("relate_pattern", tp.kind())?;
        self.eval_geo(tp, shape, |l, t, g| l.geom_relate_matches(g, t, pattern))
    }

    pub fn relate_pattern_tpoint_tpoint(
        &self,
        a: &TemporalPoint,
        b: &TemporalPoint,
        pattern: &str,
    ) -> Result<Option<bool>> {
        require_planar("relate_pattern", a.kind())?;
        self.eval_tpoint(a, b, |l, x, y| l.geom_relate_matches(x, y, pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{TInstant, TSequence};
    use geo::{polygon, MultiPoint};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn ts(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn inst(x: f64, y: f64, secs: u64) -> TInstant {
        TInstant::new(PointValue::new(x, y), ts(secs))
    }

    fn linear(points: &[(f64, f64, u64)]) -> TemporalPoint {
        let instants = points.iter().map(|&(x, y, s)| inst(x, y, s)).collect();
        TemporalPoint::Sequence(TSequence::linear(instants).expect("valid sequence"))
    }

    fn square() -> Shape {
        Shape::from(polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0),
        ])
    }

    #[test]
    fn test_empty_static_operand_is_unknown() {
        let eval = RelationEvaluator::new();
        let tp = linear(&[(0.0, 0.0, 0), (1.0, 1.0, 10)]);
        let empty = Shape::from(Geometry::MultiPoint(MultiPoint(vec![])));
        assert_eq!(eval.intersects_tpoint_geo(&tp, &empty).unwrap(), None);
        assert_eq!(eval.contains_geo_tpoint(&empty, &tp).unwrap(), None);
    }

    #[test]
    fn test_srid_mismatch_is_an_error() {
        let eval = RelationEvaluator::new();
        let tp = linear(&[(0.0, 0.0, 0), (1.0, 1.0, 10)]);
        let shape = Shape::new(geo::Point::new(0.0, 0.0), 3857, SpatialKind::Geometry);
        assert!(matches!(
            eval.intersects_tpoint_geo(&tp, &shape),
            Err(RelError::SridMismatch(0, 3857))
        ));
    }

    #[test]
    fn test_planar_only_predicate_rejects_geography() {
        let eval = RelationEvaluator::new();
        let a = TInstant::new(PointValue::geographic(0.0, 0.0), ts(0));
        let b = TInstant::new(PointValue::geographic(1.0, 1.0), ts(10));
        let tp = TemporalPoint::Sequence(TSequence::linear(vec![a, b]).unwrap());
        let shape = Shape::new(geo::Point::new(0.0, 0.0), 4326, SpatialKind::Geography);
        assert!(matches!(
            eval.touches_tpoint_geo(&tp, &shape),
            Err(RelError::UnsupportedKind {
                relation: "touches",
                ..
            })
        ));
        // But intersects is defined for geography.
        assert_eq!(eval.intersects_tpoint_geo(&tp, &shape).unwrap(), Some(true));
    }

    #[test]
    fn test_within_is_contains_swapped() {
        let eval = RelationEvaluator::new();
        let tp = linear(&[(2.0, 2.0, 0), (8.0, 8.0, 10)]);
        let shape = square();
        assert_eq!(eval.within_tpoint_geo(&tp, &shape).unwrap(), Some(true));
        assert_eq!(eval.contains_geo_tpoint(&shape, &tp).unwrap(), Some(true));
    }

    #[test]
    fn test_time_disjoint_operands_are_unknown() {
        let eval = RelationEvaluator::new();
        let a = linear(&[(0.0, 0.0, 0), (1.0, 1.0, 10)]);
        let b = linear(&[(0.0, 0.0, 20), (1.0, 1.0, 30)]);
        assert_eq!(eval.intersects_tpoint_tpoint(&a, &b).unwrap(), None);
        assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 100.0).unwrap(), None);
    }

    #[test]
    fn test_dwithin_rejects_bad_distance() {
        let eval = RelationEvaluator::new();
        let tp = linear(&[(0.0, 0.0, 0), (1.0, 1.0, 10)]);
        assert!(eval.dwithin_tpoint_geo(&tp, &square(), -1.0).is_err());
        assert!(eval.dwithin_tpoint_geo(&tp, &square(), f64::NAN).is_err());
    }

    #[test]
    fn test_dwithin_finds_unsampled_approach() {
        let eval = RelationEvaluator::new();
        // Footprints stay 5 apart at the breakpoints; the paths cross at
        // t = 5 where the distance is zero.
        let a = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
        let b = linear(&[(0.0, 5.0, 0), (10.0, -5.0, 10)]);
        assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 1.0).unwrap(), Some(true));
    }

    #[test]
    fn test_relate_matrix_against_shape() {
        let eval = RelationEvaluator::new();
        let tp = linear(&[(2.0, 2.0, 0), (8.0, 8.0, 10)]);
        let im = eval.relate_tpoint_geo(&tp, &square()).unwrap().unwrap();
        assert!(im.matches("T*F**F***").unwrap());
    }
}
