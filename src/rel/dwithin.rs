//! Distance-threshold evaluation under motion.
//!
//! For two synchronized linear segments the inter-point distance is a
//! quadratic in time, so its minimum over a segment is either at a bound or
//! at a single interior instant. The walker tests every shared breakpoint
//! and every interior closest approach, which makes moving/moving `dwithin`
//! exact instead of a footprint approximation: two trajectories can pass
//! within range of each other at an instant neither sampled.

use crate::error::Result;
use crate::point::PointValue;
use crate::temporal::{Interpolation, TSequence, TSequenceSet};

/// Fraction `u` in (0, 1) at which two co-temporal linear segments attain
/// their minimum distance, or `None` when the minimum sits on a bound.
///
/// With relative position `p = s1 - s2` and relative displacement
/// `v = (e1 - s1) - (e2 - s2)`, the squared distance at fraction `u` is
/// `|p + u v|^2`, minimized at `u = -(p . v) / |v|^2`. Zero relative
/// displacement means constant distance, also a bound case.
pub(crate) fn closest_approach_frac(
    s1: &PointValue,
    e1: &PointValue,
    s2: &PointValue,
    e2: &PointValue,
) -> Option<f64> {
    let z = |p: &PointValue| p.z.unwrap_or(0.0);
    let (px, py, pz) = (s1.x - s2.x, s1.y - s2.y, z(s1) - z(s2));
    let vx = (e1.x - s1.x) - (e2.x - s2.x);
    let vy = (e1.y - s1.y) - (e2.y - s2.y);
    let vz = (z(e1) - z(s1)) - (z(e2) - z(s2));
    let k = vx * vx + vy * vy + vz * vz;
    if k <= f64::EPSILON {
        return None;
    }
    let m = px * vx + py * vy + pz * vz;
    let u = -m / k;
    (u > 0.0 && u < 1.0).then_some(u)
}

/// Start and effective end value of segment `i`. A stepwise segment holds
/// its start value, so its effective displacement is zero.
fn segment_values(seq: &TSequence, i: usize) -> (PointValue, PointValue) {
    let start = *seq.instants()[i].value();
    let end = match seq.interpolation() {
        Interpolation::Linear => *seq.instants()[i + 1].value(),
        Interpolation::Stepwise => start,
    };
    (start, end)
}

/// Ever-dwithin over two synchronized sequences.
///
/// Both sequences must share the same breakpoints (the aligner guarantees
/// this). `within` is the instantaneous threshold test, planar or geodetic
/// per the operands' kind.
pub(crate) fn dwithin_synced_sequences<F>(a: &TSequence, b: &TSequence, within: &F) -> Result<bool>
where
    F: Fn(&PointValue, &PointValue) -> Result<bool>,
{
    let ia = a.instants();
    let ib = b.instants();
    debug_assert_eq!(ia.len(), ib.len());

    for (x, y) in ia.iter().zip(ib) {
        if within(x.value(), y.value())? {
            return Ok(true);
        }
    }
    if a.interpolation() == Interpolation::Stepwise
        && b.interpolation() == Interpolation::Stepwise
    {
        return Ok(false);
    }
    for i in 0..ia.len().saturating_sub(1) {
        let (s1, e1) = segment_values(a, i);
        let (s2, e2) = segment_values(b, i);
        if let Some(u) = closest_approach_frac(&s1, &e1, &s2, &e2) {
            if within(&s1.lerp(&e1, u), &s2.lerp(&e2, u))? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Ever-dwithin over two synchronized sequence sets, paired component-wise.
pub(crate) fn dwithin_synced_sets<F>(a: &TSequenceSet, b: &TSequenceSet, within: &F) -> Result<bool>
where
    F: Fn(&PointValue, &PointValue) -> Result<bool>,
{
    for (sa, sb) in a.sequences().iter().zip(b.sequences()) {
        if dwithin_synced_sequences(sa, sb, within)? {
            return Ok(true);
        }
    }
    Ok(false)
}
