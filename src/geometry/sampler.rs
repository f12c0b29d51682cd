use crate::foundation::core::PointSequence;
use crate::foundation::error::{MorphError, MorphResult};
use crate::geometry::outline::PathGeometry;

/// Sample `steps` points evenly spaced by arc length, point `i` at `total * i / steps`.
///
/// The end of the outline is never sampled; for a closed outline it coincides with the start.
pub fn sample_path<G>(geometry: &G, steps: usize) -> MorphResult<PointSequence>
where
    G: PathGeometry + ?Sized,
{
    if steps == 0 {
        return Err(MorphError::validation("sample steps must be > 0"));
    }

    let total = geometry.total_length();
    if !total.is_finite() || total <= 0.0 {
        return Err(MorphError::geometry(format!(
            "path has no measurable length (total length {total})"
        )));
    }

    let mut points = Vec::with_capacity(steps);
    for i in 0..steps {
        let distance = total * (i as f64) / (steps as f64);
        let p = geometry
            .point_at_length(distance)
            .ok_or_else(|| MorphError::geometry("path has no drawable segments"))?;
        points.push(p);
    }
    Ok(PointSequence::new(points))
}
