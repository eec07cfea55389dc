//! Savitzky-Golay smoothing differentiation.
//!
//! Fits a low-order polynomial across a sliding window by least squares
//! and evaluates the requested derivative, giving smoothed velocity and
//! acceleration estimates from noisy angle samples. Output length always
//! equals input length: near the edges the window is pinned inside the
//! series and the fitted polynomial is evaluated off-center instead of
//! truncating.

use crate::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Savitzky-Golay differentiation filter
#[derive(Debug, Clone)]
pub struct SavgolFilter {
    window_length: usize,
    poly_order: usize,
}

impl SavgolFilter {
    /// Create a filter with the given window length and polynomial order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the window is even or not larger
    /// than the polynomial order.
    pub fn new(window_length: usize, poly_order: usize) -> Result<Self> {
        if window_length % 2 == 0 {
            return Err(Error::InvalidInput(format!(
                "window length must be odd, got {window_length}"
            )));
        }
        if window_length <= poly_order {
            return Err(Error::InvalidInput(format!(
                "window length {window_length} must exceed polynomial order {poly_order}"
            )));
        }
        Ok(Self {
            window_length,
            poly_order,
        })
    }

    #[must_use]
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    #[must_use]
    pub fn poly_order(&self) -> usize {
        self.poly_order
    }

    /// Differentiate a sample series taken at interval `dt` seconds.
    ///
    /// `deriv` is the derivative order: 1 for velocity, 2 for acceleration.
    /// If the configured window exceeds the series length it is shrunk to
    /// the largest odd value that fits.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `deriv` exceeds the polynomial order or
    ///   `dt` is not positive.
    /// - [`Error::InsufficientSamples`] if the series is too short to fit
    ///   the polynomial at all.
    pub fn derivative(&self, samples: &[f64], deriv: usize, dt: f64) -> Result<Vec<f64>> {
        if deriv > self.poly_order {
            return Err(Error::InvalidInput(format!(
                "derivative order {deriv} exceeds polynomial order {}",
                self.poly_order
            )));
        }
        if dt <= 0.0 {
            return Err(Error::InvalidInput(format!("sample interval must be positive, got {dt}")));
        }

        let n = samples.len();
        let window = self.effective_window(n)?;
        let half = window / 2;
        let n_coeffs = self.poly_order + 1;

        // Least-squares projector for a window centered at t = 0:
        // coeffs = (V^T V)^-1 V^T y, with V the Vandermonde matrix over
        // offsets -half..=half.
        let vandermonde = DMatrix::from_fn(window, n_coeffs, |row, col| {
            let t = row as f64 - half as f64;
            t.powi(col as i32)
        });
        let normal = vandermonde.transpose() * &vandermonde;
        let projector = normal
            .try_inverse()
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "singular normal equations for window {window}, order {}",
                    self.poly_order
                ))
            })?
            * vandermonde.transpose();

        let scale = dt.powi(deriv as i32).recip();
        let mut output = Vec::with_capacity(n);
        for i in 0..n {
            // Pin the window inside the series near the edges
            let center = i.clamp(half, n - 1 - half);
            let window_values = DVector::from_row_slice(&samples[center - half..=center + half]);
            let coeffs = &projector * window_values;
            let offset = i as f64 - center as f64;
            output.push(evaluate_derivative(coeffs.as_slice(), deriv, offset) * scale);
        }
        Ok(output)
    }

    /// Shrink the configured window to fit `available` samples, keeping it odd
    fn effective_window(&self, available: usize) -> Result<usize> {
        if available <= self.poly_order {
            return Err(Error::InsufficientSamples {
                needed: self.poly_order + 1,
                available,
            });
        }
        let mut window = self.window_length.min(available);
        if window % 2 == 0 {
            window -= 1;
        }
        if window <= self.poly_order {
            return Err(Error::InsufficientSamples {
                needed: self.poly_order + 1,
                available,
            });
        }
        Ok(window)
    }
}

/// Evaluate the `deriv`-th derivative of a polynomial at `t`
fn evaluate_derivative(coeffs: &[f64], deriv: usize, t: f64) -> f64 {
    let mut value = 0.0;
    for (power, &coeff) in coeffs.iter().enumerate().skip(deriv) {
        // Falling factorial: power * (power-1) * ... * (power-deriv+1)
        let factor: f64 = (power - deriv + 1..=power).map(|k| k as f64).product();
        value += coeff * factor * t.powi((power - deriv) as i32);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic(n: usize, dt: f64) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * dt).powi(2)).collect()
    }

    #[test]
    fn test_rejects_even_window() {
        assert!(SavgolFilter::new(30, 2).is_err());
        assert!(SavgolFilter::new(31, 2).is_ok());
    }

    #[test]
    fn test_rejects_window_not_exceeding_order() {
        assert!(SavgolFilter::new(1, 2).is_err());
    }

    #[test]
    fn test_output_length_equals_input_length() {
        let filter = SavgolFilter::new(7, 2).unwrap();
        for n in [7, 8, 20, 100] {
            let samples: Vec<f64> = (0..n).map(|i| f64::from(i)).collect();
            let out = filter.derivative(&samples, 1, 0.1).unwrap();
            assert_eq!(out.len(), samples.len());
        }
    }

    #[test]
    fn test_quadratic_signal_exact_derivatives() {
        // A degree-2 polynomial is reproduced exactly by the order-2 fit,
        // including at the boundary-adjusted edges.
        let dt = 1.0 / 30.0;
        let samples = quadratic(50, dt);
        let filter = SavgolFilter::new(7, 2).unwrap();

        let velocity = filter.derivative(&samples, 1, dt).unwrap();
        for (i, v) in velocity.iter().enumerate() {
            let expected = 2.0 * i as f64 * dt;
            assert!((v - expected).abs() < 1e-6, "velocity at {i}: {v} vs {expected}");
        }

        let acceleration = filter.derivative(&samples, 2, dt).unwrap();
        for (i, a) in acceleration.iter().enumerate() {
            assert!((a - 2.0).abs() < 1e-6, "acceleration at {i}: {a}");
        }
    }

    #[test]
    fn test_linear_signal_constant_velocity() {
        let dt = 0.02;
        let samples: Vec<f64> = (0..40).map(|i| 3.0 * i as f64 * dt + 1.0).collect();
        let filter = SavgolFilter::new(9, 2).unwrap();
        let velocity = filter.derivative(&samples, 1, dt).unwrap();
        for v in &velocity {
            assert!((v - 3.0).abs() < 1e-6);
        }
        let acceleration = filter.derivative(&samples, 2, dt).unwrap();
        for a in &acceleration {
            assert!(a.abs() < 1e-6);
        }
    }

    #[test]
    fn test_window_shrinks_to_odd() {
        let filter = SavgolFilter::new(31, 2).unwrap();
        // 10 samples: window shrinks to 9, not 10
        let samples = quadratic(10, 0.1);
        let out = filter.derivative(&samples, 2, 0.1).unwrap();
        assert_eq!(out.len(), 10);
        for a in &out {
            assert!((a - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_too_few_samples() {
        let filter = SavgolFilter::new(7, 2).unwrap();
        let result = filter.derivative(&[1.0, 2.0], 1, 0.1);
        assert!(matches!(result, Err(Error::InsufficientSamples { .. })));
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let filter = SavgolFilter::new(31, 2).unwrap();
        let result = filter.derivative(&[], 1, 1.0 / 30.0);
        assert!(matches!(
            result,
            Err(Error::InsufficientSamples { needed: 3, available: 0 })
        ));
    }

    #[test]
    fn test_deriv_beyond_order_is_rejected() {
        let filter = SavgolFilter::new(7, 2).unwrap();
        let samples = quadratic(20, 0.1);
        assert!(filter.derivative(&samples, 3, 0.1).is_err());
    }

    #[test]
    fn test_nonpositive_dt_is_rejected() {
        let filter = SavgolFilter::new(7, 2).unwrap();
        let samples = quadratic(20, 0.1);
        assert!(filter.derivative(&samples, 1, 0.0).is_err());
        assert!(filter.derivative(&samples, 1, -0.5).is_err());
    }

    #[test]
    fn test_smooths_noise() {
        // Noisy constant signal: derivative should stay near zero
        let samples: Vec<f64> = (0..100)
            .map(|i| 10.0 + if i % 2 == 0 { 0.1 } else { -0.1 })
            .collect();
        let filter = SavgolFilter::new(31, 2).unwrap();
        let velocity = filter.derivative(&samples, 1, 1.0 / 30.0).unwrap();
        // Interior estimates average the jitter out
        for v in &velocity[15..85] {
            assert!(v.abs() < 1.0, "velocity {v} not smoothed");
        }
    }
}
