//! Trajectory reduction: collapsing a temporal point to its static
//! footprint.
//!
//! Most relationship predicates under "ever" semantics only depend on the
//! set of positions a moving point visits, not on when it visits them.
//! Those predicates evaluate once against the footprint: a multipoint for
//! discrete motion, a polyline for linear motion, a union of polylines for
//! a sequence set. Footprints are computed on demand and never cached on
//! the temporal value.

use crate::point::Shape;
use crate::temporal::{Interpolation, TInstant, TSequence, TemporalPoint};
use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, Point};

/// The static footprint of a temporal point: the union of all positions it
/// takes over its lifetime.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// use trajrel::{footprint, PointValue, TInstant, TSequence, TemporalPoint};
///
/// let seq = TSequence::linear(vec![
///     TInstant::new(PointValue::new(0.0, 0.0), UNIX_EPOCH),
///     TInstant::new(PointValue::new(10.0, 0.0), UNIX_EPOCH + Duration::from_secs(10)),
/// ])?;
/// let shape = footprint(&TemporalPoint::Sequence(seq));
/// assert!(matches!(shape.geometry(), trajrel::Geometry::LineString(_)));
/// # Ok::<(), trajrel::RelError>(())
/// ```
pub fn footprint(tp: &TemporalPoint) -> Shape {
    let frame = tp.start_value();
    let geom = match tp {
        TemporalPoint::Instant(inst) => Geometry::Point(inst.value().to_geo()),
        TemporalPoint::InstantSet(set) => points_geometry(set.instants()),
        TemporalPoint::Sequence(seq) => sequence_geometry(seq),
        TemporalPoint::SequenceSet(set) => {
            let pieces: Vec<Geometry<f64>> =
                set.sequences().iter().map(sequence_geometry).collect();
            union_geometry(pieces)
        }
    };
    let shape = Shape::new(geom, frame.srid, frame.kind);
    if frame.has_z() { shape.with_z() } else { shape }
}

/// Distinct positions of a run of instants, in first-visit order.
fn distinct_coords(instants: &[TInstant]) -> Vec<Coord<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(instants.len());
    for inst in instants {
        let c = Coord {
            x: inst.value().x,
            y: inst.value().y,
        };
        if !coords.contains(&c) {
            coords.push(c);
        }
    }
    coords
}

fn points_geometry(instants: &[TInstant]) -> Geometry<f64> {
    let coords = distinct_coords(instants);
    if coords.len() == 1 {
        Geometry::Point(Point(coords[0]))
    } else {
        Geometry::MultiPoint(MultiPoint(coords.into_iter().map(Point).collect()))
    }
}

fn sequence_geometry(seq: &TSequence) -> Geometry<f64> {
    match seq.interpolation() {
        // A stepwise sequence only ever occupies its sampled positions.
        Interpolation::Stepwise => points_geometry(seq.instants()),
        Interpolation::Linear => {
            let coords: Vec<Coord<f64>> = seq
                .instants()
                .iter()
                .map(|i| Coord {
                    x: i.value().x,
                    y: i.value().y,
                })
                .collect();
            if coords.iter().all(|c| *c == coords[0]) {
                Geometry::Point(Point(coords[0]))
            } else {
                Geometry::LineString(LineString(coords))
            }
        }
    }
}

fn union_geometry(mut pieces: Vec<Geometry<f64>>) -> Geometry<f64> {
    // Sequence sets hold at least one sequence, so pieces is never empty.
    if pieces.len() == 1 {
        return pieces.remove(0);
    }
    if pieces.iter().all(|g| matches!(g, Geometry::LineString(_))) {
        let lines = pieces
            .into_iter()
            .filter_map(|g| match g {
                Geometry::LineString(l) => Some(l),
                _ => None,
            })
            .collect();
        return Geometry::MultiLineString(MultiLineString(lines));
    }
    if pieces.iter().all(|g| matches!(g, Geometry::Point(_))) {
        let points = pieces
            .into_iter()
            .filter_map(|g| match g {
                Geometry::Point(p) => Some(p),
                _ => None,
            })
            .collect();
        return Geometry::MultiPoint(MultiPoint(points));
    }
    Geometry::GeometryCollection(geo::GeometryCollection(pieces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointValue;
    use crate::temporal::{TInstantSet, TSequenceSet};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn ts(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn inst(x: f64, y: f64, secs: u64) -> TInstant {
        TInstant::new(PointValue::new(x, y), ts(secs))
    }

    #[test]
    fn test_instant_footprint_is_point() {
        let tp = TemporalPoint::Instant(inst(1.0, 2.0, 0));
        assert!(matches!(footprint(&tp).geometry(), Geometry::Point(_)));
    }

    #[test]
    fn test_instant_set_footprint_dedups() {
        let set =
            TInstantSet::new(vec![inst(1.0, 1.0, 0), inst(1.0, 1.0, 5), inst(2.0, 2.0, 10)])
                .unwrap();
        let shape = footprint(&TemporalPoint::InstantSet(set));
        let Geometry::MultiPoint(mp) = shape.geometry() else {
            panic!("expected multipoint");
        };
        assert_eq!(mp.0.len(), 2);
    }

    #[test]
    fn test_linear_sequence_footprint_is_polyline() {
        let seq =
            TSequence::linear(vec![inst(0.0, 0.0, 0), inst(5.0, 5.0, 5), inst(10.0, 0.0, 10)])
                .unwrap();
        let shape = footprint(&TemporalPoint::Sequence(seq));
        let Geometry::LineString(line) = shape.geometry() else {
            panic!("expected linestring");
        };
        assert_eq!(line.0.len(), 3);
    }

    #[test]
    fn test_stationary_sequence_footprint_is_point() {
        let seq = TSequence::linear(vec![inst(3.0, 3.0, 0), inst(3.0, 3.0, 10)]).unwrap();
        let shape = footprint(&TemporalPoint::Sequence(seq));
        assert!(matches!(shape.geometry(), Geometry::Point(_)));
    }

    #[test]
    fn test_stepwise_sequence_footprint_is_points() {
        let seq = TSequence::stepwise(vec![inst(0.0, 0.0, 0), inst(10.0, 0.0, 10)]).unwrap();
        let shape = footprint(&TemporalPoint::Sequence(seq));
        assert!(matches!(shape.geometry(), Geometry::MultiPoint(_)));
    }

    #[test]
    fn test_sequence_set_footprint_is_multiline() {
        let s1 = TSequence::linear(vec![inst(0.0, 0.0, 0), inst(1.0, 0.0, 10)]).unwrap();
        let s2 = TSequence::linear(vec![inst(2.0, 0.0, 20), inst(3.0, 0.0, 30)]).unwrap();
        let set = TSequenceSet::new(vec![s1, s2]).unwrap();
        let shape = footprint(&TemporalPoint::SequenceSet(set));
        let Geometry::MultiLineString(ml) = shape.geometry() else {
            panic!("expected multilinestring");
        };
        assert_eq!(ml.0.len(), 2);
    }

    #[test]
    fn test_single_component_sequence_set_footprint() {
        let seq = TSequence::linear(vec![inst(0.0, 0.0, 0), inst(5.0, 5.0, 5)]).unwrap();
        let set = TSequenceSet::new(vec![seq]).unwrap();
        let shape = footprint(&TemporalPoint::SequenceSet(set));
        // A lone component's geometry is passed through, not wrapped.
        let Geometry::LineString(line) = shape.geometry() else {
            panic!("expected linestring");
        };
        assert_eq!(line.0.len(), 2);
    }

    #[cfg(feature = "geojson")]
    #[test]
    fn test_footprint_geojson() {
        let seq = TSequence::linear(vec![inst(0.0, 0.0, 0), inst(10.0, 0.0, 10)]).unwrap();
        let json = footprint(&TemporalPoint::Sequence(seq))
            .to_geojson()
            .unwrap();
        assert!(json.contains("LineString"));
    }
}
