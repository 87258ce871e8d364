use crate::prelude::{Real, Series};
use ndarray::Array1;

/// Number of patients present each day given daily admissions and a fixed
/// length of stay.
///
/// Patients admitted in the last `los` days (the current one included) are
/// counted. This is the difference of the cumulative sum of admissions over a
/// trailing window, so there is no discharge-rate modeling. A zero length of
/// stay gives an empty census. Rounding noise never makes the census
/// negative.
pub fn census_from_admits(admits: &Series, los: u32) -> Series {
    let n = admits.len();
    let los = los as usize;
    if los == 0 {
        return Array1::zeros(n);
    }

    let mut cumsum = Vec::with_capacity(n);
    let mut acc: Real = 0.0;
    for &x in admits.iter() {
        acc += x;
        cumsum.push(acc);
    }

    let mut census = Array1::zeros(n);
    for t in 0..n {
        let discharged = if t >= los { cumsum[t - los] } else { 0.0 };
        census[t] = (cumsum[t] - discharged).max(0.0);
    }
    return census;
}

/// Shift a series `days` positions into the future, padding the start with
/// zeros and dropping values that fall past the end.
pub fn shift_forward(series: &Series, days: u32) -> Series {
    let n = series.len();
    let days = days as usize;
    let mut out = Array1::zeros(n);
    for t in days..n {
        out[t] = series[t - days];
    }
    return out;
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn admits(values: &[Real]) -> Series {
        Array1::from(values.to_vec())
    }

    #[test]
    fn census_counts_trailing_window() {
        // Ten days admitting one patient per day, then nothing
        let mut data = vec![1.0; 10];
        data.extend_from_slice(&[0.0, 0.0, 0.0]);
        let census = census_from_admits(&admits(&data), 7);
        let expected = [1., 2., 3., 4., 5., 6., 7., 7., 7., 7., 6., 5., 4.];
        for (x, y) in census.iter().zip(expected.iter()) {
            assert_approx_eq!(x, y);
        }
    }

    #[test]
    fn census_is_never_negative() {
        // Cumulative curves can dip by a rounding error once they flatten
        let mut data = vec![1234.567; 20];
        data.extend(std::iter::repeat(-1e-12).take(20));
        let census = census_from_admits(&admits(&data), 7);
        assert!(census.iter().all(|&x| x >= 0.0));
        assert!(census.iter().skip(27).all(|&x| x.floor() == 0.0));
    }

    #[test]
    fn constant_admissions_reach_steady_state() {
        let rate = 2.5;
        let los = 9;
        let mut data = vec![0.0];
        data.extend(std::iter::repeat(rate).take(30));
        data.extend(std::iter::repeat(0.0).take(15));
        let census = census_from_admits(&admits(&data), los);

        // Steady state is rate * LOS
        for t in (los as usize)..=30 {
            assert_approx_eq!(census[t], rate * los as Real, 1e-9);
        }

        // Linear decay to zero in exactly LOS days after admissions stop
        for k in 1..=(los as usize) {
            assert_approx_eq!(census[30 + k], rate * (los as usize - k) as Real, 1e-9);
        }
        assert_approx_eq!(census[30 + los as usize], 0.0, 1e-9);
        assert_approx_eq!(census[45], 0.0, 1e-9);
    }

    #[test]
    fn zero_length_of_stay_is_empty() {
        let census = census_from_admits(&admits(&[1.0, 2.0, 3.0]), 0);
        assert_eq!(census, Array1::<Real>::zeros(3));
    }

    #[test]
    fn shift_pads_with_zeros() {
        let shifted = shift_forward(&admits(&[1.0, 2.0, 3.0, 4.0]), 2);
        assert_eq!(shifted, admits(&[0.0, 0.0, 1.0, 2.0]));
        assert_eq!(shift_forward(&admits(&[1.0, 2.0]), 5), admits(&[0.0, 0.0]));
    }
}
