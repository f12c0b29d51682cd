use crate::foundation::core::PointSequence;
use crate::foundation::error::{MorphError, MorphResult};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Per-point linear interpolation of two sequences at `progress`.
///
/// The sequences must have equal length; index `i` of `from` moves toward index `i` of `to`.
pub fn interpolate(
    from: &PointSequence,
    to: &PointSequence,
    progress: f64,
) -> MorphResult<PointSequence> {
    if from.len() != to.len() {
        return Err(MorphError::interpolation(format!(
            "point sequences differ in length: from has {}, to has {}",
            from.len(),
            to.len()
        )));
    }

    Ok(from
        .iter()
        .zip(to.iter())
        .map(|(a, b)| a.lerp(*b, progress))
        .collect::<Vec<_>>()
        .into())
}
