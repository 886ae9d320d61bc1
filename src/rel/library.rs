//! The static predicate library seam.
//!
//! Relationship evaluation bottoms out in classical predicates over static
//! shapes. [`PredicateLibrary`] is the interface the dispatcher and walker
//! consume: a planar (`geom_*`) family covering the full predicate set and
//! a geodetic (`geog_*`) family covering only covers, coveredby, intersects
//! and dwithin. [`GeoPredicateLibrary`] is the shipped implementation,
//! backed by the `geo` crate's DE-9IM engine and distance metrics.

use crate::error::{RelError, Result};
use crate::point::PointValue;
use geo::dimensions::{Dimensions, HasDimensions};
use geo::relate::IntersectionMatrix;
use geo::{
    Closest, CoordsIter, Distance, Euclidean, Geometry, Haversine, HaversineClosestPoint,
    Intersects, Point, Relate,
};

/// Distance tolerance for geodetic intersection, in meters.
const GEOG_EPSILON: f64 = 1e-8;

/// Static predicates over planar and geodetic shapes.
///
/// Implementations must be pure: no retained state across calls. The
/// `*_dwithin_points` methods are the instantaneous distance tests the
/// moving/moving walker evaluates at specific timestamps; they honor z
/// when both points carry one.
pub trait PredicateLibrary {
    // Planar family.
    fn geom_contains(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_containsproperly(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_covers(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_coveredby(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_crosses(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_disjoint(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_equals(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_intersects(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_overlaps(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_touches(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geom_relate(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<IntersectionMatrix>;
    fn geom_relate_matches(
        &self,
        a: &Geometry<f64>,
        b: &Geometry<f64>,
        pattern: &str,
    ) -> Result<bool>;
    fn geom_dwithin(&self, a: &Geometry<f64>, b: &Geometry<f64>, dist: f64) -> Result<bool>;
    fn geom_dwithin_points(&self, a: &PointValue, b: &PointValue, dist: f64) -> Result<bool>;

    // Geodetic family.
    fn geog_covers(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geog_coveredby(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geog_intersects(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool>;
    fn geog_dwithin(&self, a: &Geometry<f64>, b: &Geometry<f64>, dist: f64) -> Result<bool>;
    fn geog_dwithin_points(&self, a: &PointValue, b: &PointValue, dist: f64) -> Result<bool>;
}

/// DE-9IM patterns for the pattern-defined predicates.
const PAT_CONTAINS: &str = "T*****FF*";
const PAT_CONTAINSPROPERLY: &str = "T**FF*FF*";
const PAT_EQUALS: &str = "T*F**FFF*";
const PAT_DISJOINT: &str = "FF*FF****";
const PAT_COVERS: [&str; 4] = ["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"];
const PAT_COVEREDBY: [&str; 4] = ["T*F**F***", "*TF**F***", "**FT*F***", "**F*TF***"];
const PAT_TOUCHES: [&str; 3] = ["FT*******", "F**T*****", "F***T****"];

/// Predicate library backed by the `geo` crate.
///
/// DE-9IM predicates go through `Relate`; planar distances are Euclidean;
/// geodetic distances use the haversine formula, with altitude folded in
/// for 3D points. Geodetic covers/coveredby evaluate the topological
/// pattern on raw lon/lat coordinates, an approximation an exact
/// ellipsoidal implementation of [`PredicateLibrary`] can replace.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoPredicateLibrary;

impl GeoPredicateLibrary {
    fn matches_one(a: &Geometry<f64>, b: &Geometry<f64>, pattern: &str) -> Result<bool> {
        a.relate(b)
            .matches(pattern)
            .map_err(|e| RelError::InvalidInput(format!("invalid DE-9IM pattern: {}", e)))
    }

    fn matches_any(a: &Geometry<f64>, b: &Geometry<f64>, patterns: &[&str]) -> Result<bool> {
        let im = a.relate(b);
        for pattern in patterns {
            let hit = im
                .matches(pattern)
                .map_err(|e| RelError::InvalidInput(format!("invalid DE-9IM pattern: {}", e)))?;
            if hit {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl PredicateLibrary for GeoPredicateLibrary {
    fn geom_contains(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_one(a, b, PAT_CONTAINS)
    }

    fn geom_containsproperly(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_one(a, b, PAT_CONTAINSPROPERLY)
    }

    fn geom_covers(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_any(a, b, &PAT_COVERS)
    }

    fn geom_coveredby(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_any(a, b, &PAT_COVEREDBY)
    }

    fn geom_crosses(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        let (da, db) = (dim_rank(a.dimensions()), dim_rank(b.dimensions()));
        if da < db {
            Self::matches_one(a, b, "T*T******")
        } else if da > db {
            Self::matches_one(a, b, "T*****T**")
        } else if da == 1 {
            // Two lines cross when their interiors meet in a point.
            Self::matches_one(a, b, "0********")
        } else {
            Ok(false)
        }
    }

    fn geom_disjoint(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_one(a, b, PAT_DISJOINT)
    }

    fn geom_equals(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_one(a, b, PAT_EQUALS)
    }

    fn geom_intersects(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Ok(a.intersects(b))
    }

    fn geom_overlaps(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        let (da, db) = (dim_rank(a.dimensions()), dim_rank(b.dimensions()));
        if da != db {
            return Ok(false);
        }
        let pattern = if da == 1 { "1*T***T**" } else { "T*T***T**" };
        Self::matches_one(a, b, pattern)
    }

    fn geom_touches(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_any(a, b, &PAT_TOUCHES)
    }

    fn geom_relate(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<IntersectionMatrix> {
        Ok(a.relate(b))
    }

    fn geom_relate_matches(
        &self,
        a: &Geometry<f64>,
        b: &Geometry<f64>,
        pattern: &str,
    ) -> Result<bool> {
        Self::matches_one(a, b, pattern)
    }

    fn geom_dwithin(&self, a: &Geometry<f64>, b: &Geometry<f64>, dist: f64) -> Result<bool> {
        Ok(Euclidean.distance(a, b) <= dist)
    }

    fn geom_dwithin_points(&self, a: &PointValue, b: &PointValue, dist: f64) -> Result<bool> {
        Ok(a.euclidean_distance(b) <= dist)
    }

    fn geog_covers(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_any(a, b, &PAT_COVERS)
    }

    fn geog_coveredby(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Self::matches_any(a, b, &PAT_COVEREDBY)
    }

    fn geog_intersects(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
        Ok(haversine_distance(a, b) < GEOG_EPSILON)
    }

    fn geog_dwithin(&self, a: &Geometry<f64>, b: &Geometry<f64>, dist: f64) -> Result<bool> {
        Ok(haversine_distance(a, b) <= dist)
    }

    fn geog_dwithin_points(&self, a: &PointValue, b: &PointValue, dist: f64) -> Result<bool> {
        Ok(a.haversine_distance(b) <= dist)
    }
}

fn dim_rank(d: Dimensions) -> u8 {
    match d {
        Dimensions::Empty | Dimensions::ZeroDimensional => 0,
        Dimensions::OneDimensional => 1,
        Dimensions::TwoDimensional => 2,
    }
}

/// Minimum haversine distance between two geometries, in meters.
///
/// A planar intersection check catches containment and crossing (distance
/// zero); otherwise each vertex of one side is measured against its
/// geodesic closest point anywhere on the other, both ways. A vertex near
/// the middle of a long segment is therefore handled, not just vertex
/// pairs. Returns infinity when either side is empty.
pub(crate) fn haversine_distance(a: &Geometry<f64>, b: &Geometry<f64>) -> f64 {
    if a.intersects(b) {
        return 0.0;
    }
    let mut min = f64::INFINITY;
    for ca in a.coords_iter() {
        min = min.min(haversine_to(b, Point(ca)));
    }
    for cb in b.coords_iter() {
        min = min.min(haversine_to(a, Point(cb)));
    }
    min
}

/// Distance from `p` to its geodesic closest point on `g`.
fn haversine_to(g: &Geometry<f64>, p: Point<f64>) -> f64 {
    match g.haversine_closest_point(&p) {
        Closest::Intersection(_) => 0.0,
        Closest::SinglePoint(c) => Haversine.distance(p, c),
        // Only empty geometries are indeterminate.
        Closest::Indeterminate => f64::INFINITY,
    }
}
