//! Piecewise-linear normalization over `LinearNorm` anchors

use crate::error::{EvalError, Result};
use crate::models::{LinearNorm, OutlierTreatment};

/// Map an original value into normalized space.
///
/// Returns `None` when the value is an outlier treated as missing.
pub fn normalize(
    field: &str,
    linear_norms: &[LinearNorm],
    outliers: OutlierTreatment,
    value: f64,
) -> Result<Option<f64>> {
    check_anchors(field, linear_norms)?;

    let first = linear_norms[0];
    let last = linear_norms[linear_norms.len() - 1];

    if value < first.orig || value > last.orig {
        match outliers {
            OutlierTreatment::AsMissingValues => return Ok(None),
            OutlierTreatment::AsExtremeValues => {
                let edge = if value < first.orig { first } else { last };
                return Ok(Some(edge.norm));
            }
            OutlierTreatment::AsIs => {}
        }
    }

    let (start, end) = segment(linear_norms, value, |norm| norm.orig);
    interpolate(field, value, (start.orig, start.norm), (end.orig, end.norm)).map(Some)
}

/// Map a normalized value back into original space (inverse of [`normalize`]).
///
/// Values outside the declared `norm` range are extrapolated from the
/// nearest segment.
pub fn denormalize(field: &str, linear_norms: &[LinearNorm], value: f64) -> Result<f64> {
    check_anchors(field, linear_norms)?;

    let (start, end) = segment(linear_norms, value, |norm| norm.norm);
    interpolate(field, value, (start.norm, start.orig), (end.norm, end.orig))
}

fn check_anchors(field: &str, linear_norms: &[LinearNorm]) -> Result<()> {
    if linear_norms.len() < 2 {
        return Err(EvalError::invalid(format!(
            "NormContinuous for {} needs at least two LinearNorm anchors, got {}",
            field,
            linear_norms.len()
        )));
    }
    Ok(())
}

/// Pick the pair of adjacent anchors whose key range contains `value`,
/// or the outermost segment when `value` lies beyond the anchors.
fn segment<F>(linear_norms: &[LinearNorm], value: f64, key: F) -> (LinearNorm, LinearNorm)
where
    F: Fn(&LinearNorm) -> f64,
{
    let last_start = linear_norms.len() - 2;
    let index = linear_norms
        .windows(2)
        .position(|pair| value <= key(&pair[1]))
        .unwrap_or(last_start);
    (linear_norms[index], linear_norms[index + 1])
}

fn interpolate(field: &str, x: f64, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> Result<f64> {
    if x1 == x2 {
        return Err(EvalError::invalid(format!(
            "NormContinuous for {} has duplicate anchor at {}",
            field, x1
        )));
    }
    Ok(y1 + (x - x1) / (x2 - x1) * (y2 - y1))
}
