//! Error statistics over aligned values.
//!
//! With `diff = candidate - reference` for each common key:
//!
//! | field               | value                                   |
//! |---------------------|-----------------------------------------|
//! | `mae`               | mean \|diff\|                            |
//! | `rmse`              | √(mean diff²)                            |
//! | `max_abs_error`     | largest \|diff\|, with its key           |
//! | `mape`              | mean \|diff\| / max(\|reference\|, ε)     |
//! | `mean_signed_error` | mean diff                                |
//! | `l1_error`          | Σ \|diff\|                               |
//! | `l2_error`          | √(Σ diff²)                               |
//!
//! With no common keys every field is 0 and the max-error key is `None`.

use serde::Serialize;

/// Running sums over the common keys.
#[derive(Debug, Clone)]
pub struct ErrorAccumulator {
    epsilon: f64,
    count: usize,
    sum_abs: f64,
    sum_sq: f64,
    sum_signed: f64,
    sum_rel: f64,
    max_abs: f64,
    max_key: Option<String>,
}

impl ErrorAccumulator {
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            count: 0,
            sum_abs: 0.0,
            sum_sq: 0.0,
            sum_signed: 0.0,
            sum_rel: 0.0,
            max_abs: -1.0,
            max_key: None,
        }
    }

    /// Record one key. Returns `(abs_error, signed_error)`.
    pub fn push(&mut self, key: &str, reference: f64, candidate: f64) -> (f64, f64) {
        let diff = candidate - reference;
        let ad = diff.abs();

        self.count += 1;
        self.sum_abs += ad;
        self.sum_sq += diff * diff;
        self.sum_signed += diff;
        self.sum_rel += ad / reference.abs().max(self.epsilon);

        // Strict: the first key reaching the maximum keeps it.
        if ad > self.max_abs {
            self.max_abs = ad;
            self.max_key = Some(key.to_string());
        }

        (ad, diff)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(self) -> ErrorSummary {
        if self.count == 0 {
            return ErrorSummary::default();
        }
        let n = self.count as f64;
        let max_abs_error = if self.max_key.is_some() { self.max_abs } else { 0.0 };

        ErrorSummary {
            mae: self.sum_abs / n,
            rmse: (self.sum_sq / n).sqrt(),
            max_abs_error,
            max_abs_error_node: self.max_key,
            mape: self.sum_rel / n,
            mean_signed_error: self.sum_signed / n,
            l1_error: self.sum_abs,
            l2_error: self.sum_sq.sqrt(),
        }
    }
}

/// Aggregate error statistics of one metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorSummary {
    pub mae: f64,
    pub rmse: f64,
    pub max_abs_error: f64,
    pub max_abs_error_node: Option<String>,
    pub mape: f64,
    pub mean_signed_error: f64,
    pub l1_error: f64,
    pub l2_error: f64,
}

impl ErrorSummary {
    /// Mean squared error, `rmse²`.
    #[must_use]
    pub fn mse(&self) -> f64 {
        self.rmse * self.rmse
    }
}
