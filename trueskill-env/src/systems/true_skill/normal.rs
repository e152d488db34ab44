use overload::overload;
use serde::{Deserialize, Serialize};
use std::ops;

/// Variances are never allowed below this, so a belief never claims perfect certainty.
pub const MIN_SIGMA: f64 = 1e-4;
pub const MIN_VARIANCE: f64 = MIN_SIGMA * MIN_SIGMA;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mu: f64,
    pub sigma: f64,
}

pub const G_ZERO: Gaussian = Gaussian { mu: 0., sigma: 0. };

// Sum and difference of independent random variables
overload!((a: ?Gaussian) + (b: ?Gaussian) -> Gaussian {
    Gaussian {
        mu: a.mu + b.mu,
        sigma: a.sigma.hypot(b.sigma),
    }
});

overload!((a: ?Gaussian) - (b: ?Gaussian) -> Gaussian {
    Gaussian {
        mu: a.mu - b.mu,
        sigma: a.sigma.hypot(b.sigma),
    }
});

impl Gaussian {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    /// Independent combination; the same as `a + b`.
    pub fn combine_independent(a: Self, b: Self) -> Self {
        a + b
    }

    /// Shifts the mean additively and scales the variance multiplicatively, flooring the
    /// result at `MIN_VARIANCE`.
    pub fn precision_update(self, mean_delta: f64, variance_multiplier: f64) -> Self {
        let variance = (self.variance() * variance_multiplier).max(MIN_VARIANCE);
        Self {
            mu: self.mu + mean_delta,
            sigma: variance.sqrt(),
        }
    }

    /// Adds independent noise of standard deviation `sig_noise`.
    pub fn with_noise(self, sig_noise: f64) -> Self {
        Self {
            mu: self.mu,
            sigma: self.sigma.hypot(sig_noise),
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            mu: self.mu,
            sigma: self.sigma.max(MIN_SIGMA),
        }
    }
}
