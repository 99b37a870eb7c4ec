/// Outcome of a weighted average over `(weight, value)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// `Σ(weight·value) / Σweight`, or `None` when the weights sum to zero.
    pub value: Option<f64>,
    pub total_weight: f64,
}

/// Weighted average used for both SGPA (subject level) and CGPA (semester level).
///
/// No rounding is applied. An empty input or a zero total weight produces
/// `value: None` instead of NaN.
pub fn aggregate<I>(pairs: I) -> Aggregate
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut total_weight = 0.0_f64;
    let mut weighted_sum = 0.0_f64;

    for (weight, value) in pairs {
        total_weight += weight;
        weighted_sum += weight * value;
    }

    let value = if total_weight == 0.0 {
        None
    } else {
        Some(weighted_sum / total_weight).filter(|value| value.is_finite())
    };

    Aggregate {
        value,
        total_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn computes_weighted_average() {
        let result = aggregate([(4.0, 8.0), (3.0, 9.0)]);
        assert_eq!(result.total_weight, 7.0);
        assert!(close(result.value.unwrap(), 59.0 / 7.0));
    }

    #[test]
    fn empty_input_has_no_value() {
        let result = aggregate(std::iter::empty());
        assert_eq!(result.value, None);
        assert_eq!(result.total_weight, 0.0);
    }

    #[test]
    fn zero_weights_have_no_value() {
        let result = aggregate([(0.0, 9.0), (0.0, 7.0)]);
        assert_eq!(result.value, None);
    }

    #[test]
    fn zero_weight_entries_do_not_shift_result() {
        let result = aggregate([(3.0, 6.0), (0.0, 10.0)]);
        assert_eq!(result.value, Some(6.0));
    }

    #[test]
    fn result_is_bounded_by_values() {
        let pairs = [(1.5, 6.0), (4.0, 9.5), (2.0, 7.25), (0.5, 10.0)];
        let value = aggregate(pairs).value.unwrap();
        assert!((6.0..=10.0).contains(&value));
    }

    #[test]
    fn result_ignores_ordering() {
        let forward = [(1.0, 7.0), (3.0, 8.5), (2.5, 9.0), (4.0, 6.0)];
        let mut backward = forward;
        backward.reverse();
        let rotated = [forward[2], forward[0], forward[3], forward[1]];

        let a = aggregate(forward).value.unwrap();
        assert!(close(a, aggregate(backward).value.unwrap()));
        assert!(close(a, aggregate(rotated).value.unwrap()));
    }
}
