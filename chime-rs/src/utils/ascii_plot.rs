use std::iter;

use crate::prelude::{Day, Real, INF};

/// ASCII plot of a day-indexed sequence of positive values, drawn
/// horizontally.
///
/// Each day is a row filled with '='s proportionally to the maximum value,
/// which occupies the full width.
pub fn plot_hbars(days: &[Day], values: &[Real], width: usize) -> String {
    let mut out = String::new();
    if values.is_empty() {
        return out;
    }
    let max = values.iter().cloned().fold(-INF, Real::max);
    let step = if max > 0.0 { max / width as Real } else { 1.0 };

    for (day, &x) in days.iter().zip(values) {
        let n = (x.max(0.0) / step) as usize;
        out.push_str(&format!("{:>5} |", day));
        out.extend(iter::repeat('=').take(n));
        out.push_str(&format!(" {:.0}\n", x));
    }
    return out;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_with_maximum() {
        let plot = plot_hbars(&[0, 1], &[5.0, 10.0], 4);
        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines[0], "    0 |== 5");
        assert_eq!(lines[1], "    1 |==== 10");
    }
}
