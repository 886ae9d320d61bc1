//! Point values and static shapes.
//!
//! A [`PointValue`] is the instantaneous value of a moving point: a 2D or 3D
//! coordinate tagged with a spatial reference identifier (SRID) and a kind
//! (planar geometry or ellipsoidal geography). A [`Shape`] is a static
//! operand for relationship predicates, wrapping a `geo` geometry with the
//! same frame tags.
//!
//! Two values are comparable only when SRID, kind and dimensionality all
//! match; the relation dispatcher rejects mismatches as hard errors.

use crate::error::{RelError, Result};
use geo::dimensions::HasDimensions;
use geo::{Distance, Euclidean, Haversine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spatial kind of a value: planar or ellipsoidal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpatialKind {
    /// Planar (projected) coordinates; the full predicate set is defined.
    #[default]
    Geometry,
    /// Ellipsoidal lon/lat coordinates; only covers, coveredby, intersects
    /// and dwithin are defined.
    Geography,
}

impl fmt::Display for SpatialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry => write!(f, "geometry"),
            Self::Geography => write!(f, "geography"),
        }
    }
}

/// A 2D or 3D point tagged with SRID and spatial kind.
///
/// # Examples
///
/// ```
/// use trajrel::PointValue;
///
/// let p = PointValue::new(3.0, 4.0);
/// assert_eq!(p.euclidean_distance(&PointValue::new(0.0, 0.0)), 5.0);
///
/// let q = PointValue::new_3d(3.0, 4.0, 12.0);
/// assert_eq!(q.dims(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointValue {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub srid: i32,
    pub kind: SpatialKind,
}

impl PointValue {
    /// Create a planar 2D point with SRID 0.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            srid: 0,
            kind: SpatialKind::Geometry,
        }
    }

    /// Create a planar 3D point with SRID 0.
    #[inline]
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::new(x, y)
        }
    }

    /// Create a geographic (lon/lat) 2D point with SRID 4326.
    #[inline]
    pub fn geographic(lon: f64, lat: f64) -> Self {
        Self {
            x: lon,
            y: lat,
            z: None,
            srid: 4326,
            kind: SpatialKind::Geography,
        }
    }

    /// Create a geographic 3D point (altitude in meters) with SRID 4326.
    #[inline]
    pub fn geographic_3d(lon: f64, lat: f64, alt: f64) -> Self {
        Self {
            z: Some(alt),
            ..Self::geographic(lon, lat)
        }
    }

    /// Replace the SRID tag.
    #[inline]
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    /// Coordinate dimensionality: 2 or 3.
    #[inline]
    pub fn dims(&self) -> u8 {
        if self.z.is_some() { 3 } else { 2 }
    }

    /// Whether the point carries a z coordinate.
    #[inline]
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Project to a 2D `geo` point, dropping z if present.
    #[inline]
    pub fn to_geo(&self) -> geo::Point<f64> {
        geo::Point::new(self.x, self.y)
    }

    /// Check that `other` lives in the same reference frame (SRID, kind and
    /// dimensionality).
    pub fn ensure_same_frame(&self, other: &PointValue) -> Result<()> {
        if self.srid != other.srid {
            return Err(RelError::SridMismatch(self.srid, other.srid));
        }
        if self.kind != other.kind {
            return Err(RelError::InvalidInput(format!(
                "cannot mix {} and {} operands",
                self.kind, other.kind
            )));
        }
        if self.dims() != other.dims() {
            return Err(RelError::DimensionalityMismatch(self.dims(), other.dims()));
        }
        Ok(())
    }

    /// Whether the two points occupy the same position.
    #[inline]
    pub fn position_eq(&self, other: &PointValue) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    /// Straight-line interpolation towards `other` at fraction `frac` in
    /// [0, 1]. z is interpolated when both points carry one.
    pub fn lerp(&self, other: &PointValue, frac: f64) -> PointValue {
        let z = match (self.z, other.z) {
            (Some(a), Some(b)) => Some(a + frac * (b - a)),
            _ => None,
        };
        PointValue {
            x: self.x + frac * (other.x - self.x),
            y: self.y + frac * (other.y - self.y),
            z,
            srid: self.srid,
            kind: self.kind,
        }
    }

    /// Euclidean distance, 3D when both points carry z.
    pub fn euclidean_distance(&self, other: &PointValue) -> f64 {
        let planar = Euclidean.distance(self.to_geo(), other.to_geo());
        match (self.z, other.z) {
            (Some(a), Some(b)) => planar.hypot(a - b),
            _ => planar,
        }
    }

    /// Haversine distance in meters, combined with the altitude difference
    /// when both points carry z.
    pub fn haversine_distance(&self, other: &PointValue) -> f64 {
        let surface = Haversine.distance(self.to_geo(), other.to_geo());
        match (self.z, other.z) {
            (Some(a), Some(b)) => surface.hypot(a - b),
            _ => surface,
        }
    }
}

impl From<(f64, f64)> for PointValue {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64, f64)> for PointValue {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new_3d(x, y, z)
    }
}

/// A static operand: a `geo` geometry tagged with SRID, kind and a z flag.
///
/// Footprints of temporal points are `Shape`s, and callers pass `Shape`s as
/// the static side of mixed predicates. The geometry itself is planar; the
/// `has_z` flag participates in dimensionality checks so that 2D shapes are
/// never silently compared against 3D trajectories.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    geom: geo::Geometry<f64>,
    srid: i32,
    kind: SpatialKind,
    has_z: bool,
}

impl Shape {
    /// Wrap a geometry with explicit frame tags.
    pub fn new(geom: impl Into<geo::Geometry<f64>>, srid: i32, kind: SpatialKind) -> Self {
        Self {
            geom: geom.into(),
            srid,
            kind,
            has_z: false,
        }
    }

    /// Mark the shape as three-dimensional for frame checks.
    pub fn with_z(mut self) -> Self {
        self.has_z = true;
        self
    }

    /// A single-point shape inheriting the point's frame.
    pub fn point(value: &PointValue) -> Self {
        Self {
            geom: geo::Geometry::Point(value.to_geo()),
            srid: value.srid,
            kind: value.kind,
            has_z: value.has_z(),
        }
    }

    #[inline]
    pub fn geometry(&self) -> &geo::Geometry<f64> {
        &self.geom
    }

    #[inline]
    pub fn srid(&self) -> i32 {
        self.srid
    }

    #[inline]
    pub fn kind(&self) -> SpatialKind {
        self.kind
    }

    #[inline]
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    #[inline]
    pub fn dims(&self) -> u8 {
        if self.has_z { 3 } else { 2 }
    }

    /// Whether the underlying geometry is empty (e.g. an empty multipoint).
    pub fn is_empty(&self) -> bool {
        self.geom.is_empty()
    }

    /// Serialize the geometry as a GeoJSON string.
    #[cfg(feature = "geojson")]
    pub fn to_geojson(&self) -> Result<String> {
        let geom = geojson::Geometry::new(geojson::Value::from(&self.geom));
        serde_json::to_string(&geom)
            .map_err(|e| RelError::InvalidInput(format!("failed to serialize GeoJSON: {}", e)))
    }
}

impl From<geo::Geometry<f64>> for Shape {
    fn from(geom: geo::Geometry<f64>) -> Self {
        Self::new(geom, 0, SpatialKind::Geometry)
    }
}

impl From<geo::Point<f64>> for Shape {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(geo::Geometry::Point(point), 0, SpatialKind::Geometry)
    }
}

impl From<geo::Polygon<f64>> for Shape {
    fn from(polygon: geo::Polygon<f64>) -> Self {
        Self::new(geo::Geometry::Polygon(polygon), 0, SpatialKind::Geometry)
    }
}

impl From<geo::LineString<f64>> for Shape {
    fn from(line: geo::LineString<f64>) -> Self {
        Self::new(geo::Geometry::LineString(line), 0, SpatialKind::Geometry)
    }
}
