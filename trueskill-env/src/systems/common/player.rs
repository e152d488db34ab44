use super::Rating;
use crate::systems::true_skill::{Gaussian, MIN_SIGMA};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    name: String,
    pub approx_posterior: Rating,
    pub num_matches: usize,
}

impl Player {
    pub fn with_rating(name: impl Into<String>, mu: f64, sig: f64) -> Self {
        Player {
            name: name.into(),
            approx_posterior: Rating {
                mu,
                sig: sig.max(MIN_SIGMA),
            },
            num_matches: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mu(&self) -> f64 {
        self.approx_posterior.mu
    }

    pub fn sigma(&self) -> f64 {
        self.approx_posterior.sig
    }

    pub fn skill(&self) -> Gaussian {
        Gaussian::new(self.approx_posterior.mu, self.approx_posterior.sig)
    }

    /// Commits the outcome of one rated match.
    pub fn update_rating(&mut self, posterior: Gaussian) {
        let posterior = posterior.clamped();
        self.approx_posterior = Rating {
            mu: posterior.mu,
            sig: posterior.sigma,
        };
        self.num_matches += 1;
    }
}
