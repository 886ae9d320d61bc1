//! Ever-semantics spatial relationship predicates for temporal (moving) points.
//!
//! A temporal point is a position that changes over time: a single instant,
//! a discrete set of instants, a continuous sequence, or a set of disjoint
//! sequences. Predicates ask whether a relation ever held over the operands'
//! common lifetime and answer with `Ok(Some(bool))`, or `Ok(None)` when the
//! question is unanswerable (empty static operand, disjoint time spans).
//!
//! ```rust
//! use std::time::{Duration, UNIX_EPOCH};
//! use trajrel::{PointValue, RelationEvaluator, Shape, TInstant, TSequence, TemporalPoint};
//!
//! let eval = RelationEvaluator::new();
//! let tp = TemporalPoint::Sequence(TSequence::linear(vec![
//!     TInstant::new(PointValue::new(0.0, 0.0), UNIX_EPOCH),
//!     TInstant::new(PointValue::new(10.0, 10.0), UNIX_EPOCH + Duration::from_secs(10)),
//! ])?);
//! let waypoint = Shape::point(&PointValue::new(5.0, 5.0));
//! assert_eq!(eval.intersects_tpoint_geo(&tp, &waypoint)?, Some(true));
//! # Ok::<(), trajrel::RelError>(())
//! ```

pub mod error;
pub mod point;
pub mod rel;
pub mod temporal;
pub mod trajectory;

pub use error::{RelError, Result};

pub use point::{PointValue, Shape, SpatialKind};

pub use temporal::{
    Interpolation, TInstant, TInstantSet, TSequence, TSequenceSet, TemporalPoint, TimeSpan,
};

pub use temporal::align::{LinearAligner, TemporalAligner};

pub use trajectory::footprint;

pub use rel::library::{GeoPredicateLibrary, PredicateLibrary};
pub use rel::RelationEvaluator;

pub use geo::relate::IntersectionMatrix;
pub use geo::{Geometry, LineString, Point, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{RelError, RelationEvaluator, Result};

    pub use crate::{PointValue, Shape, SpatialKind};

    pub use crate::{
        Interpolation, TInstant, TInstantSet, TSequence, TSequenceSet, TemporalPoint,
    };

    pub use crate::footprint;

    pub use geo::{LineString, Point, Polygon, Rect};

    pub use std::time::{Duration, SystemTime, UNIX_EPOCH};
}
