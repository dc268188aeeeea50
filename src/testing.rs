//! Testing helpers.

use assert_float_eq::*;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that each element of `values` is no smaller than its predecessor.
pub fn assert_non_decreasing(values: &[f64]) {
    for (index, pair) in values.windows(2).enumerate() {
        assert!(
            pair[0] <= pair[1],
            "element {} ({}) exceeds element {} ({}) in {values:?}",
            index,
            pair[0],
            index + 1,
            pair[1]
        );
    }
}
