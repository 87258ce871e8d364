use crate::prelude::{Real, INF};

/// Index of the first maximum value. NaNs are ignored.
///
/// Return None if there are no comparable values.
pub fn argmax<'a>(values: impl IntoIterator<Item = &'a Real>) -> Option<usize> {
    let mut best: Option<(usize, Real)> = None;
    for (i, &x) in values.into_iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        match best {
            Some((_, y)) if x <= y => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first minimum value. NaNs are ignored.
///
/// Return None if there are no comparable values.
pub fn argmin<'a>(values: impl IntoIterator<Item = &'a Real>) -> Option<usize> {
    let mut best: Option<(usize, Real)> = None;
    for (i, &x) in values.into_iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        match best {
            Some((_, y)) if x >= y => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first finite minimum. Infinite losses mark rejected candidates
/// and are never selected.
pub fn argmin_finite<'a>(values: impl IntoIterator<Item = &'a Real>) -> Option<usize> {
    let mut best: Option<(usize, Real)> = None;
    for (i, &x) in values.into_iter().enumerate() {
        if !x.is_finite() {
            continue;
        }
        match best {
            Some((_, y)) if x >= y => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

/// Return n evenly spaced values over the closed interval [start, stop].
pub fn linspace(start: Real, stop: Real, n: usize) -> Vec<Real> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as Real;
            let mut out: Vec<Real> = (0..n).map(|k| start + step * k as Real).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Squared error between observed and predicted values.
#[inline]
pub fn squared_error(observed: Real, predicted: Real) -> Real {
    let err = observed - predicted;
    err * err
}

/// Replace NaNs by zero and infinities by the largest finite values.
#[inline]
pub fn nan_to_num(x: Real) -> Real {
    if x.is_nan() {
        0.0
    } else if x == INF {
        Real::MAX
    } else if x == -INF {
        Real::MIN
    } else {
        x
    }
}
