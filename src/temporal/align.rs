//! Temporal synchronization of two moving points.
//!
//! Relationship predicates over two temporal operands first re-express both
//! onto a common set of breakpoints within their overlapping time span. The
//! [`TemporalAligner`] trait is the seam for that operation; the shipped
//! [`LinearAligner`] handles all sixteen variant combinations. No synthetic
//! crossing instants are inserted: the distance-threshold walker works
//! directly on raw segment endpoints.

use crate::error::{RelError, Result};
use crate::temporal::{TInstant, TInstantSet, TSequence, TSequenceSet, TemporalPoint};
use smallvec::SmallVec;
use std::time::SystemTime;

/// Produces a synchronized pair from two temporal points, or `None` when
/// their time spans do not intersect (the predicate result is then unknown).
pub trait TemporalAligner {
    fn synchronize(
        &self,
        lhs: &TemporalPoint,
        rhs: &TemporalPoint,
    ) -> Result<Option<(TemporalPoint, TemporalPoint)>>;
}

/// Default aligner: breakpoint-union synchronization over the common span.
///
/// Sequence sets are paired component-wise by a time-overlap sweep, so the
/// two sides of the result always have the same number of components with
/// identical spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearAligner;

impl TemporalAligner for LinearAligner {
    fn synchronize(
        &self,
        lhs: &TemporalPoint,
        rhs: &TemporalPoint,
    ) -> Result<Option<(TemporalPoint, TemporalPoint)>> {
        if lhs.time_span().intersection(&rhs.time_span()).is_none() {
            return Ok(None);
        }
        match (lhs, rhs) {
            (TemporalPoint::Instant(i), _) => sync_instant(i, rhs, false),
            (_, TemporalPoint::Instant(i)) => sync_instant(i, lhs, true),
            (TemporalPoint::InstantSet(s), _) => sync_discrete(s, rhs, false),
            (_, TemporalPoint::InstantSet(s)) => sync_discrete(s, lhs, true),
            _ => sync_continuous(lhs, rhs),
        }
    }
}

fn sync_instant(
    inst: &TInstant,
    other: &TemporalPoint,
    invert: bool,
) -> Result<Option<(TemporalPoint, TemporalPoint)>> {
    let Some(value) = other.value_at(inst.timestamp()) else {
        return Ok(None);
    };
    let probed = TInstant::new(value, inst.timestamp());
    let (a, b) = if invert { (probed, *inst) } else { (*inst, probed) };
    Ok(Some((TemporalPoint::Instant(a), TemporalPoint::Instant(b))))
}

fn sync_discrete(
    set: &TInstantSet,
    other: &TemporalPoint,
    invert: bool,
) -> Result<Option<(TemporalPoint, TemporalPoint)>> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for inst in set.instants() {
        if let Some(value) = other.value_at(inst.timestamp()) {
            left.push(*inst);
            right.push(TInstant::new(value, inst.timestamp()));
        }
    }
    if left.is_empty() {
        return Ok(None);
    }
    let wrap = |instants: Vec<TInstant>| -> Result<TemporalPoint> {
        if instants.len() == 1 {
            Ok(TemporalPoint::Instant(instants[0]))
        } else {
            Ok(TemporalPoint::InstantSet(TInstantSet::new(instants)?))
        }
    };
    let (a, b) = if invert {
        (wrap(right)?, wrap(left)?)
    } else {
        (wrap(left)?, wrap(right)?)
    };
    Ok(Some((a, b)))
}

fn sequences_of(tp: &TemporalPoint) -> &[TSequence] {
    match tp {
        TemporalPoint::Sequence(s) => std::slice::from_ref(s),
        TemporalPoint::SequenceSet(s) => s.sequences(),
        // Callers dispatch Instant/InstantSet before reaching here.
        _ => &[],
    }
}

fn sync_continuous(
    lhs: &TemporalPoint,
    rhs: &TemporalPoint,
) -> Result<Option<(TemporalPoint, TemporalPoint)>> {
    let a = sequences_of(lhs);
    let b = sequences_of(rhs);
    let mut pairs: Vec<(TSequence, TSequence)> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (sa, sb) = (&a[i], &b[j]);
        if sa.time_span().intersection(&sb.time_span()).is_some() {
            if let Some(pair) = sync_sequences(sa, sb)? {
                pairs.push(pair);
            }
        }
        // Advance whichever component ends first.
        if sa.time_span().end <= sb.time_span().end {
            i += 1;
        } else {
            j += 1;
        }
    }
    match pairs.len() {
        0 => Ok(None),
        1 => {
            let (sa, sb) = pairs.remove(0);
            Ok(Some((
                TemporalPoint::Sequence(sa),
                TemporalPoint::Sequence(sb),
            )))
        }
        _ => {
            let (left, right): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
            Ok(Some((
                TemporalPoint::SequenceSet(TSequenceSet::new(left)?),
                TemporalPoint::SequenceSet(TSequenceSet::new(right)?),
            )))
        }
    }
}

/// Re-express two overlapping sequences over the union of their breakpoints
/// restricted to the common span.
fn sync_sequences(a: &TSequence, b: &TSequence) -> Result<Option<(TSequence, TSequence)>> {
    let Some(span) = a.time_span().intersection(&b.time_span()) else {
        return Ok(None);
    };

    let mut times: SmallVec<[SystemTime; 8]> = SmallVec::new();
    times.push(span.start);
    for t in a.timestamps().chain(b.timestamps()) {
        if t > span.start && t < span.end {
            times.push(t);
        }
    }
    if span.end > span.start {
        times.push(span.end);
    }
    times.sort();
    times.dedup();

    let resample = |seq: &TSequence| -> Result<TSequence> {
        let instants = times
            .iter()
            .map(|&t| {
                seq.interpolated_value_at(t)
                    .map(|v| TInstant::new(v, t))
                    .ok_or_else(|| {
                        RelError::InvalidTemporal(
                            "timestamp outside sequence span during synchronization".into(),
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        TSequence::new(instants, span.lower_inc, span.upper_inc, seq.interpolation())
    };

    Ok(Some((resample(a)?, resample(b)?)))
}
