use trajrel::prelude::*;
use trajrel::Shape;
use geo::polygon;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

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

/// Test 1: a path through the square intersects and crosses it.
#[test]
fn test_path_through_polygon() {
    let eval = RelationEvaluator::new();
    let tp = linear(&[(-5.0, 5.0, 0), (15.0, 5.0, 20)]);
    assert_eq!(eval.intersects_tpoint_geo(&tp, &square()).unwrap(), Some(true));
    assert_eq!(eval.crosses_tpoint_geo(&tp, &square()).unwrap(), Some(true));
    assert_eq!(eval.disjoint_tpoint_geo(&tp, &square()).unwrap(), Some(false));
}

/// Test 2: contains/within and covers/coveredby are argument-swapped pairs.
#[test]
fn test_inverse_predicate_pairs() {
    let eval = RelationEvaluator::new();
    let tp = linear(&[(2.0, 2.0, 0), (8.0, 8.0, 10)]);
    let shape = square();

    let contains = eval.contains_geo_tpoint(&shape, &tp).unwrap();
    let within = eval.within_tpoint_geo(&tp, &shape).unwrap();
    assert_eq!(contains, Some(true));
    assert_eq!(contains, within);

    let covers = eval.covers_geo_tpoint(&shape, &tp).unwrap();
    let coveredby = eval.coveredby_tpoint_geo(&tp, &shape).unwrap();
    assert_eq!(covers, Some(true));
    assert_eq!(covers, coveredby);
}

/// Test 3: a path along the boundary is covered but not contained.
#[test]
fn test_covers_accepts_boundary_contains_does_not() {
    let eval = RelationEvaluator::new();
    let boundary_path = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
    let shape = square();
    assert_eq!(
        eval.covers_geo_tpoint(&shape, &boundary_path).unwrap(),
        Some(true)
    );
    assert_eq!(
        eval.contains_geo_tpoint(&shape, &boundary_path).unwrap(),
        Some(false)
    );
    assert_eq!(
        eval.touches_tpoint_geo(&boundary_path, &shape).unwrap(),
        Some(true)
    );
}

/// Test 4: empty static operand yields unknown, never an error.
#[test]
fn test_empty_shape_is_unknown() {
    init_logging();
    let eval = RelationEvaluator::new();
    let tp = linear(&[(0.0, 0.0, 0), (1.0, 1.0, 10)]);
    let empty = Shape::from(trajrel::Geometry::MultiPoint(geo::MultiPoint(vec![])));
    assert_eq!(eval.intersects_tpoint_geo(&tp, &empty).unwrap(), None);
    assert_eq!(eval.dwithin_tpoint_geo(&tp, &empty, 5.0).unwrap(), None);
    assert!(eval.relate_tpoint_geo(&tp, &empty).unwrap().is_none());
}

/// Test 5: temporal operands that never coexist yield unknown.
#[test]
fn test_time_disjoint_is_unknown() {
    init_logging();
    let eval = RelationEvaluator::new();
    let morning = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 100)]);
    let evening = linear(&[(0.0, 0.0, 200), (10.0, 0.0, 300)]);
    assert_eq!(eval.intersects_tpoint_tpoint(&morning, &evening).unwrap(), None);
    assert_eq!(
        eval.dwithin_tpoint_tpoint(&morning, &evening, 1e9).unwrap(),
        None
    );
}

/// Test 6: moving/moving dwithin finds an approach that neither footprint
/// nor any sampled instant records.
#[test]
fn test_dwithin_closest_approach_between_breakpoints() {
    let eval = RelationEvaluator::new();
    let a = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
    let b = linear(&[(0.0, 5.0, 0), (10.0, -5.0, 10)]);
    // 5 apart at both endpoints, colliding at t = 5.
    assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 1.0).unwrap(), Some(true));
    assert_eq!(eval.intersects_tpoint_tpoint(&a, &b).unwrap(), Some(true));
}

/// Test 7: parallel motion never closes the gap.
#[test]
fn test_dwithin_parallel_paths() {
    let eval = RelationEvaluator::new();
    let a = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
    let b = linear(&[(0.0, 3.0, 0), (10.0, 3.0, 10)]);
    assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 2.9).unwrap(), Some(false));
    assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 3.0).unwrap(), Some(true));
}

/// Test 8: dwithin is monotone in the threshold.
#[test]
fn test_dwithin_monotonicity() {
    let eval = RelationEvaluator::new();
    let tp = linear(&[(20.0, 0.0, 0), (20.0, 10.0, 10)]);
    let shape = square();
    // Minimum distance from the path to the square is 10.
    let mut previous = false;
    for dist in [5.0, 9.9, 10.0, 15.0, 100.0] {
        let hit = eval.dwithin_tpoint_geo(&tp, &shape, dist).unwrap().unwrap();
        assert!(hit || !previous, "dwithin must not flip back to false");
        previous = hit;
    }
    assert!(previous);
}

/// Test 9: a stationary pair reduces to a single distance check.
#[test]
fn test_stationary_points() {
    let eval = RelationEvaluator::new();
    let a = linear(&[(0.0, 0.0, 0), (0.0, 0.0, 10)]);
    let b = linear(&[(3.0, 4.0, 0), (3.0, 4.0, 10)]);
    assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 5.0).unwrap(), Some(true));
    assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 4.9).unwrap(), Some(false));
    assert_eq!(eval.equals_tpoint_tpoint(&a, &a.clone()).unwrap(), Some(true));
}

/// Test 10: instant against sequence probes the sequence at that timestamp.
#[test]
fn test_instant_against_sequence() {
    let eval = RelationEvaluator::new();
    let probe = TemporalPoint::Instant(inst(5.0, 1.0, 5));
    let path = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
    // The path is at (5, 0) when the probe exists.
    assert_eq!(eval.dwithin_tpoint_tpoint(&probe, &path, 1.0).unwrap(), Some(true));
    assert_eq!(
        eval.dwithin_tpoint_tpoint(&probe, &path, 0.5).unwrap(),
        Some(false)
    );
}

/// Test 11: sequence sets are paired component-wise before walking.
#[test]
fn test_sequence_set_dwithin() {
    let eval = RelationEvaluator::new();
    let s1 = TSequence::linear(vec![inst(0.0, 0.0, 0), inst(10.0, 0.0, 10)]).unwrap();
    let s2 = TSequence::linear(vec![inst(0.0, 0.0, 20), inst(10.0, 0.0, 30)]).unwrap();
    let gaps = TemporalPoint::SequenceSet(TSequenceSet::new(vec![s1, s2]).unwrap());
    // Close only during the second component.
    let other = linear(&[(0.0, 100.0, 0), (10.0, 100.0, 10), (5.0, 1.0, 25), (5.0, 1.0, 30)]);
    assert_eq!(eval.dwithin_tpoint_tpoint(&gaps, &other, 2.0).unwrap(), Some(true));
}

/// Test 12: geographic operands route to the geodetic library and reject
/// planar-only predicates.
#[test]
fn test_geographic_routing() {
    let eval = RelationEvaluator::new();
    let nyc = PointValue::geographic(-74.0060, 40.7128);
    let nearby = PointValue::geographic(-74.0070, 40.7128);
    let tp = TemporalPoint::Sequence(
        TSequence::linear(vec![
            TInstant::new(nyc, ts(0)),
            TInstant::new(nearby, ts(60)),
        ])
        .unwrap(),
    );
    let dest = Shape::point(&nearby);

    // ~84 m between the endpoints at this latitude.
    assert_eq!(eval.dwithin_tpoint_geo(&tp, &dest, 100.0).unwrap(), Some(true));
    assert_eq!(eval.intersects_tpoint_geo(&tp, &dest).unwrap(), Some(true));
    assert_eq!(eval.covers_geo_tpoint(&dest, &tp).unwrap(), Some(false));

    assert!(matches!(
        eval.crosses_tpoint_geo(&tp, &dest),
        Err(RelError::UnsupportedKind { .. })
    ));
    assert!(matches!(
        eval.relate_tpoint_geo(&tp, &dest),
        Err(RelError::UnsupportedKind { .. })
    ));
}

/// Test 13: geodetic dwithin against a point near the middle of a long
/// segment, far from every vertex.
#[test]
fn test_geographic_dwithin_mid_segment() {
    let eval = RelationEvaluator::new();
    let tp = TemporalPoint::Sequence(
        TSequence::linear(vec![
            TInstant::new(PointValue::geographic(0.0, 0.0), ts(0)),
            TInstant::new(PointValue::geographic(10.0, 0.0), ts(3600)),
        ])
        .unwrap(),
    );
    // ~11 m off the path at its midpoint, ~550 km from either endpoint.
    let buoy = Shape::point(&PointValue::geographic(5.0, 0.0001));
    assert_eq!(eval.dwithin_tpoint_geo(&tp, &buoy, 1000.0).unwrap(), Some(true));
    assert_eq!(eval.dwithin_geo_tpoint(&buoy, &tp, 1000.0).unwrap(), Some(true));
    assert_eq!(eval.dwithin_tpoint_geo(&tp, &buoy, 1.0).unwrap(), Some(false));
}

/// Test 14: geodetic moving/moving dwithin in meters.
#[test]
fn test_geographic_dwithin_between_trajectories() {
    let eval = RelationEvaluator::new();
    let a = TemporalPoint::Sequence(
        TSequence::linear(vec![
            TInstant::new(PointValue::geographic(-74.000, 40.7128), ts(0)),
            TInstant::new(PointValue::geographic(-74.010, 40.7128), ts(100)),
        ])
        .unwrap(),
    );
    let b = TemporalPoint::Sequence(
        TSequence::linear(vec![
            TInstant::new(PointValue::geographic(-74.010, 40.7128), ts(0)),
            TInstant::new(PointValue::geographic(-74.000, 40.7128), ts(100)),
        ])
        .unwrap(),
    );
    // Head-on along the same parallel: they meet in the middle.
    assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 10.0).unwrap(), Some(true));
    // ~840 m apart at the endpoints, near zero at the crossing.
    assert_eq!(eval.dwithin_tpoint_tpoint(&a, &b, 0.001).unwrap(), Some(true));
}

/// Test 15: 3D operands use the full 3D distance and reject 2D mixes.
#[test]
fn test_3d_dwithin() {
    let eval = RelationEvaluator::new();
    let low = TemporalPoint::Sequence(
        TSequence::linear(vec![
            TInstant::new(PointValue::new_3d(0.0, 0.0, 0.0), ts(0)),
            TInstant::new(PointValue::new_3d(10.0, 0.0, 0.0), ts(10)),
        ])
        .unwrap(),
    );
    let high = TemporalPoint::Sequence(
        TSequence::linear(vec![
            TInstant::new(PointValue::new_3d(0.0, 0.0, 12.0), ts(0)),
            TInstant::new(PointValue::new_3d(10.0, 0.0, 12.0), ts(10)),
        ])
        .unwrap(),
    );
    assert_eq!(eval.dwithin_tpoint_tpoint(&low, &high, 12.0).unwrap(), Some(true));
    assert_eq!(
        eval.dwithin_tpoint_tpoint(&low, &high, 11.9).unwrap(),
        Some(false)
    );

    let flat = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
    assert!(matches!(
        eval.dwithin_tpoint_tpoint(&low, &flat, 100.0),
        Err(RelError::DimensionalityMismatch(3, 2))
    ));
}

/// Test 16: relate exposes the raw matrix and relate_pattern matches it.
#[test]
fn test_relate_and_pattern() {
    let eval = RelationEvaluator::new();
    let tp = linear(&[(2.0, 2.0, 0), (8.0, 8.0, 10)]);
    let shape = square();

    let im = eval.relate_tpoint_geo(&tp, &shape).unwrap().unwrap();
    // Line interior inside the polygon interior, neither boundary touched.
    assert!(im.matches("T*F**F***").unwrap());

    assert_eq!(
        eval.relate_pattern_tpoint_geo(&tp, &shape, "T*F**F***").unwrap(),
        Some(true)
    );
    assert_eq!(
        eval.relate_pattern_geo_tpoint(&shape, &tp, "T*****FF*").unwrap(),
        Some(true)
    );
    assert!(eval.relate_pattern_tpoint_geo(&tp, &shape, "junk").is_err());
}

/// Test 17: mismatched SRIDs fail loudly instead of comparing garbage.
#[test]
fn test_srid_mismatch() {
    let eval = RelationEvaluator::new();
    let tp = linear(&[(0.0, 0.0, 0), (1.0, 1.0, 10)]);
    let reprojected = Shape::new(Point::new(0.0, 0.0), 3857, SpatialKind::Geometry);
    assert!(matches!(
        eval.intersects_tpoint_geo(&tp, &reprojected),
        Err(RelError::SridMismatch(0, 3857))
    ));
}

/// Test 18: discrete motion only exists at its sampled instants.
#[test]
fn test_instant_set_semantics() {
    let eval = RelationEvaluator::new();
    let hops = TemporalPoint::InstantSet(
        TInstantSet::new(vec![inst(0.0, 20.0, 0), inst(5.0, 20.0, 5), inst(10.0, 20.0, 10)])
            .unwrap(),
    );
    // The in-between positions are undefined, so the footprint is the
    // sampled points only and never enters the square.
    assert_eq!(eval.intersects_tpoint_geo(&hops, &square()).unwrap(), Some(false));

    // Against a moving point, only shared timestamps are compared.
    let path = linear(&[(0.0, 20.0, 0), (10.0, 20.0, 10)]);
    assert_eq!(eval.dwithin_tpoint_tpoint(&hops, &path, 0.1).unwrap(), Some(true));
}

/// Test 19: overlaps requires same-dimension operands with partial overlap.
#[test]
fn test_overlaps_between_paths() {
    let eval = RelationEvaluator::new();
    let a = linear(&[(0.0, 0.0, 0), (10.0, 0.0, 10)]);
    // Shares the segment x in [5, 10] with a, then continues.
    let b = linear(&[(5.0, 0.0, 0), (15.0, 0.0, 10)]);
    assert_eq!(eval.overlaps_tpoint_tpoint(&a, &b).unwrap(), Some(true));
    // A path never overlaps a polygon (dimension mismatch).
    assert_eq!(eval.overlaps_tpoint_geo(&a, &square()).unwrap(), Some(false));
}
