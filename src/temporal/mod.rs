//! The temporal point value model.
//!
//! A moving point is one of four representations sharing a common
//! capability set (`value_at`, `time_span`, frame accessors):
//!
//! - [`TInstant`] — a single (timestamp, point) pair;
//! - [`TInstantSet`] — discrete ordered instants, no value in between;
//! - [`TSequence`] — ≥1 instants with bound inclusivity flags and an
//!   interpolation mode (linear or stepwise);
//! - [`TSequenceSet`] — ordered sequences with disjoint, non-adjacent spans.
//!
//! Constructors validate structure (strictly increasing timestamps, a
//! uniform reference frame across instants, disjoint ordered spans) and
//! reject violations as [`RelError::InvalidTemporal`]. Values are immutable
//! snapshots; relationship evaluation never mutates them.

use crate::error::{RelError, Result};
use crate::point::{PointValue, SpatialKind};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

pub mod align;

/// Fractional seconds from `a` to `b`, zero when `b` precedes `a`.
#[inline]
pub(crate) fn seconds_between(a: SystemTime, b: SystemTime) -> f64 {
    b.duration_since(a)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Interpolation mode of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Straight-line motion between consecutive instants; the value
    /// function is continuous within the sequence.
    #[default]
    Linear,
    /// The value holds the preceding instant's value until the next
    /// instant; right-continuous with jumps.
    Stepwise,
}

/// A closed-or-open time interval with per-bound inclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: SystemTime,
    pub end: SystemTime,
    pub lower_inc: bool,
    pub upper_inc: bool,
}

impl TimeSpan {
    /// The degenerate span holding a single instant.
    pub fn instant(t: SystemTime) -> Self {
        Self {
            start: t,
            end: t,
            lower_inc: true,
            upper_inc: true,
        }
    }

    /// Whether `t` lies inside the span, honoring bound inclusivity.
    pub fn contains(&self, t: SystemTime) -> bool {
        (t > self.start || (t == self.start && self.lower_inc))
            && (t < self.end || (t == self.end && self.upper_inc))
    }

    /// Intersection of two spans, `None` when they do not overlap.
    pub fn intersection(&self, other: &TimeSpan) -> Option<TimeSpan> {
        use std::cmp::Ordering;
        let (start, lower_inc) = match self.start.cmp(&other.start) {
            Ordering::Greater => (self.start, self.lower_inc),
            Ordering::Less => (other.start, other.lower_inc),
            Ordering::Equal => (self.start, self.lower_inc && other.lower_inc),
        };
        let (end, upper_inc) = match self.end.cmp(&other.end) {
            Ordering::Less => (self.end, self.upper_inc),
            Ordering::Greater => (other.end, other.upper_inc),
            Ordering::Equal => (self.end, self.upper_inc && other.upper_inc),
        };
        if start > end || (start == end && !(lower_inc && upper_inc)) {
            return None;
        }
        Some(TimeSpan {
            start,
            end,
            lower_inc,
            upper_inc,
        })
    }
}

/// One (timestamp, point) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TInstant {
    value: PointValue,
    timestamp: SystemTime,
}

impl TInstant {
    pub fn new(value: PointValue, timestamp: SystemTime) -> Self {
        Self { value, timestamp }
    }

    #[inline]
    pub fn value(&self) -> &PointValue {
        &self.value
    }

    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

/// Validate strictly increasing timestamps and a uniform frame.
fn validate_instants(instants: &[TInstant], what: &str) -> Result<()> {
    if instants.is_empty() {
        return Err(RelError::InvalidTemporal(format!(
            "{} must contain at least one instant",
            what
        )));
    }
    let first = instants[0].value();
    for pair in instants.windows(2) {
        if pair[1].timestamp() <= pair[0].timestamp() {
            return Err(RelError::InvalidTemporal(format!(
                "{} timestamps must be strictly increasing",
                what
            )));
        }
    }
    for inst in &instants[1..] {
        first.ensure_same_frame(inst.value()).map_err(|e| {
            RelError::InvalidTemporal(format!("{} mixes reference frames: {}", what, e))
        })?;
    }
    Ok(())
}

/// An ordered set of instants with no defined value between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TInstantSet {
    instants: Vec<TInstant>,
}

impl TInstantSet {
    pub fn new(instants: Vec<TInstant>) -> Result<Self> {
        validate_instants(&instants, "instant set")?;
        Ok(Self { instants })
    }

    #[inline]
    pub fn instants(&self) -> &[TInstant] {
        &self.instants
    }

    pub fn value_at(&self, t: SystemTime) -> Option<PointValue> {
        self.instants
            .binary_search_by(|inst| inst.timestamp().cmp(&t))
            .ok()
            .map(|i| *self.instants[i].value())
    }

    pub fn time_span(&self) -> TimeSpan {
        TimeSpan {
            start: self.instants[0].timestamp(),
            end: self.instants[self.instants.len() - 1].timestamp(),
            lower_inc: true,
            upper_inc: true,
        }
    }
}

/// A continuous (or stepwise) motion over a single time span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSequence {
    instants: Vec<TInstant>,
    lower_inc: bool,
    upper_inc: bool,
    interp: Interpolation,
}

impl TSequence {
    pub fn new(
        instants: Vec<TInstant>,
        lower_inc: bool,
        upper_inc: bool,
        interp: Interpolation,
    ) -> Result<Self> {
        validate_instants(&instants, "sequence")?;
        if instants.len() == 1 && !(lower_inc && upper_inc) {
            return Err(RelError::InvalidTemporal(
                "a single-instant sequence must be inclusive on both bounds".into(),
            ));
        }
        Ok(Self {
            instants,
            lower_inc,
            upper_inc,
            interp,
        })
    }

    /// A linear sequence inclusive on both bounds.
    pub fn linear(instants: Vec<TInstant>) -> Result<Self> {
        Self::new(instants, true, true, Interpolation::Linear)
    }

    /// A stepwise sequence inclusive on both bounds.
    pub fn stepwise(instants: Vec<TInstant>) -> Result<Self> {
        Self::new(instants, true, true, Interpolation::Stepwise)
    }

    #[inline]
    pub fn instants(&self) -> &[TInstant] {
        &self.instants
    }

    #[inline]
    pub fn num_instants(&self) -> usize {
        self.instants.len()
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interp
    }

    pub fn time_span(&self) -> TimeSpan {
        TimeSpan {
            start: self.instants[0].timestamp(),
            end: self.instants[self.instants.len() - 1].timestamp(),
            lower_inc: self.lower_inc,
            upper_inc: self.upper_inc,
        }
    }

    /// Timestamps of the sequence's instants, in order.
    pub fn timestamps(&self) -> impl Iterator<Item = SystemTime> + '_ {
        self.instants.iter().map(|i| i.timestamp())
    }

    /// Value at `t`, honoring bound inclusivity.
    pub fn value_at(&self, t: SystemTime) -> Option<PointValue> {
        if !self.time_span().contains(t) {
            return None;
        }
        self.interpolated_value_at(t)
    }

    /// Value at `t` ignoring bound inclusivity; `None` only when `t` falls
    /// outside the closed span. Used when re-expressing the sequence over a
    /// new breakpoint set, where the result carries its own bound flags.
    pub(crate) fn interpolated_value_at(&self, t: SystemTime) -> Option<PointValue> {
        let first = self.instants[0].timestamp();
        let last = self.instants[self.instants.len() - 1].timestamp();
        if t < first || t > last {
            return None;
        }
        // Index of the last instant at or before t.
        let idx = self.instants.partition_point(|i| i.timestamp() <= t) - 1;
        let floor = &self.instants[idx];
        if floor.timestamp() == t || self.interp == Interpolation::Stepwise {
            return Some(*floor.value());
        }
        let next = &self.instants[idx + 1];
        Some(segment_value_at(floor, next, self.interp, t))
    }
}

/// Value of the segment `[start, end]` at `t`, respecting the interpolation
/// mode. Stepwise segments are constant at the start value.
pub(crate) fn segment_value_at(
    start: &TInstant,
    end: &TInstant,
    interp: Interpolation,
    t: SystemTime,
) -> PointValue {
    match interp {
        Interpolation::Stepwise => *start.value(),
        Interpolation::Linear => {
            let len = seconds_between(start.timestamp(), end.timestamp());
            if len <= 0.0 {
                return *start.value();
            }
            let frac = seconds_between(start.timestamp(), t) / len;
            start.value().lerp(end.value(), frac.clamp(0.0, 1.0))
        }
    }
}

/// An ordered set of sequences with disjoint, non-adjacent time spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TSequenceSet {
    sequences: Vec<TSequence>,
}

impl TSequenceSet {
    pub fn new(sequences: Vec<TSequence>) -> Result<Self> {
        if sequences.is_empty() {
            return Err(RelError::InvalidTemporal(
                "sequence set must contain at least one sequence".into(),
            ));
        }
        let interp = sequences[0].interpolation();
        for seq in &sequences[1..] {
            if seq.interpolation() != interp {
                return Err(RelError::InvalidTemporal(
                    "sequence set mixes interpolation modes".into(),
                ));
            }
        }
        for pair in sequences.windows(2) {
            if pair[1].time_span().start <= pair[0].time_span().end {
                return Err(RelError::InvalidTemporal(
                    "sequence set spans must be disjoint, non-adjacent and increasing".into(),
                ));
            }
        }
        let first = sequences[0].instants()[0].value();
        for seq in &sequences[1..] {
            first
                .ensure_same_frame(seq.instants()[0].value())
                .map_err(|e| {
                    RelError::InvalidTemporal(format!("sequence set mixes reference frames: {}", e))
                })?;
        }
        Ok(Self { sequences })
    }

    #[inline]
    pub fn sequences(&self) -> &[TSequence] {
        &self.sequences
    }

    pub fn value_at(&self, t: SystemTime) -> Option<PointValue> {
        self.sequences.iter().find_map(|seq| seq.value_at(t))
    }

    pub fn time_span(&self) -> TimeSpan {
        let first = self.sequences[0].time_span();
        let last = self.sequences[self.sequences.len() - 1].time_span();
        TimeSpan {
            start: first.start,
            end: last.end,
            lower_inc: first.lower_inc,
            upper_inc: last.upper_inc,
        }
    }
}

/// A temporal point: one of the four motion representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemporalPoint {
    Instant(TInstant),
    InstantSet(TInstantSet),
    Sequence(TSequence),
    SequenceSet(TSequenceSet),
}

impl TemporalPoint {
    /// Value at timestamp `t`, `None` when the point is undefined there.
    pub fn value_at(&self, t: SystemTime) -> Option<PointValue> {
        match self {
            Self::Instant(i) => (i.timestamp() == t).then(|| *i.value()),
            Self::InstantSet(s) => s.value_at(t),
            Self::Sequence(s) => s.value_at(t),
            Self::SequenceSet(s) => s.value_at(t),
        }
    }

    /// The span from the first to the last instant.
    pub fn time_span(&self) -> TimeSpan {
        match self {
            Self::Instant(i) => TimeSpan::instant(i.timestamp()),
            Self::InstantSet(s) => s.time_span(),
            Self::Sequence(s) => s.time_span(),
            Self::SequenceSet(s) => s.time_span(),
        }
    }

    /// The first instant in time order.
    pub fn start_instant(&self) -> &TInstant {
        match self {
            Self::Instant(i) => i,
            Self::InstantSet(s) => &s.instants()[0],
            Self::Sequence(s) => &s.instants()[0],
            Self::SequenceSet(s) => &s.sequences()[0].instants()[0],
        }
    }

    /// The last instant in time order.
    pub fn end_instant(&self) -> &TInstant {
        match self {
            Self::Instant(i) => i,
            Self::InstantSet(s) => &s.instants()[s.instants().len() - 1],
            Self::Sequence(s) => &s.instants()[s.num_instants() - 1],
            Self::SequenceSet(s) => {
                let last = &s.sequences()[s.sequences().len() - 1];
                &last.instants()[last.num_instants() - 1]
            }
        }
    }

    /// Position at the first instant.
    #[inline]
    pub fn start_value(&self) -> &PointValue {
        self.start_instant().value()
    }

    /// Position at the last instant.
    #[inline]
    pub fn end_value(&self) -> &PointValue {
        self.end_instant().value()
    }

    pub fn num_instants(&self) -> usize {
        match self {
            Self::Instant(_) => 1,
            Self::InstantSet(s) => s.instants().len(),
            Self::Sequence(s) => s.num_instants(),
            Self::SequenceSet(s) => s.sequences().iter().map(TSequence::num_instants).sum(),
        }
    }

    #[inline]
    pub fn srid(&self) -> i32 {
        self.start_instant().value().srid
    }

    #[inline]
    pub fn kind(&self) -> SpatialKind {
        self.start_instant().value().kind
    }

    #[inline]
    pub fn has_z(&self) -> bool {
        self.start_instant().value().has_z()
    }

    #[inline]
    pub fn dims(&self) -> u8 {
        self.start_instant().value().dims()
    }
}

impl From<TInstant> for TemporalPoint {
    fn from(i: TInstant) -> Self {
        Self::Instant(i)
    }
}

impl From<TInstantSet> for TemporalPoint {
    fn from(s: TInstantSet) -> Self {
        Self::InstantSet(s)
    }
}

impl From<TSequence> for TemporalPoint {
    fn from(s: TSequence) -> Self {
        Self::Sequence(s)
    }
}

impl From<TSequenceSet> for TemporalPoint {
    fn from(s: TSequenceSet) -> Self {
        Self::SequenceSet(s)
    }
}
