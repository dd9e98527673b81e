//! Softmax and log-sum-exp.
//!
//! Both are computed with the usual max-shift so that large logits do not
//! overflow `exp`. The class scores in this project stay small, but the
//! primitives should not rely on that.

/// `ln(Σ exp(v_i))`, computed stably.
///
/// Returns negative infinity for an empty slice (the sum of zero terms).
pub fn log_sum_exp(v: &[f64]) -> f64 {
    let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = v.iter().map(|x| (x - max).exp()).sum();
    max + sum.ln()
}

/// Replace `v` with `softmax(v)` in place.
///
/// After the call the entries are non-negative and sum to 1 (up to rounding).
pub fn softmax_in_place(v: &mut [f64]) {
    let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return;
    }
    let mut sum = 0.0;
    for x in v.iter_mut() {
        *x = (*x - max).exp();
        sum += *x;
    }
    for x in v.iter_mut() {
        *x /= sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one() {
        let mut v = [1.0, 2.0, 3.0];
        softmax_in_place(&mut v);
        let sum: f64 = v.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "softmax sum: {sum}");
        assert!(v[2] > v[1] && v[1] > v[0], "softmax must preserve order");
    }

    #[test]
    fn softmax_is_shift_invariant_and_stable() {
        let mut a = [1.0, 2.0, 3.0];
        let mut b = [1001.0, 1002.0, 1003.0];
        softmax_in_place(&mut a);
        softmax_in_place(&mut b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-12, "shifted softmax diverged: {x} vs {y}");
            assert!(x.is_finite());
        }
    }

    #[test]
    fn log_sum_exp_matches_direct_computation() {
        let v: [f64; 3] = [0.5, -1.0, 2.0];
        let direct: f64 = v.iter().map(|x| x.exp()).sum::<f64>().ln();
        assert!((log_sum_exp(&v) - direct).abs() < 1e-12);
    }

    #[test]
    fn log_sum_exp_survives_large_inputs() {
        let v = [1000.0, 1000.0];
        let expected = 1000.0 + 2.0_f64.ln();
        assert!((log_sum_exp(&v) - expected).abs() < 1e-9);
    }
}
