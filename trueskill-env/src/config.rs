use crate::error::{RatingError, Result};
use crate::numerical::draw_margin_from_probability;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_mu0() -> f64 {
    25.
}

fn default_sigma0() -> f64 {
    default_mu0() / 3.
}

fn default_beta() -> f64 {
    default_sigma0() / 2.
}

fn default_tau() -> f64 {
    default_sigma0() / 100.
}

fn default_draw_probability() -> f64 {
    0.1
}

fn zero() -> f64 {
    0.
}

fn is_zero(&trust: &f64) -> bool {
    trust == zero()
}

/// Tunable parameters shared by every update within one environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingEnvironmentConfig {
    /// Skill mean assigned to new players.
    #[serde(default = "default_mu0")]
    pub mu0: f64,
    /// Skill uncertainty assigned to new players.
    #[serde(default = "default_sigma0")]
    pub sigma0: f64,
    /// Standard deviation of a player's performance around their skill.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Skill drift per match, added in quadrature to each participant's sigma.
    #[serde(default = "default_tau")]
    pub tau: f64,
    /// Prior probability that a match between equals ends in a draw.
    #[serde(default = "default_draw_probability")]
    pub draw_probability: f64,
    /// Explicit draw margin. When set, it takes precedence over `draw_probability`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_margin: Option<f64>,
    /// Scale of the extra performance variance `trust * sigma^2`; 0 disables it.
    #[serde(default = "zero", skip_serializing_if = "is_zero")]
    pub trust: f64,
}

impl Default for RatingEnvironmentConfig {
    fn default() -> Self {
        Self {
            mu0: default_mu0(),
            sigma0: default_sigma0(),
            beta: default_beta(),
            tau: default_tau(),
            draw_probability: default_draw_probability(),
            draw_margin: None,
            trust: zero(),
        }
    }
}

impl RatingEnvironmentConfig {
    pub fn from_file(source: impl AsRef<Path>) -> Result<Self> {
        let path = source.as_ref().display().to_string();
        // json5 rather than serde_json, so that configs may carry comments
        let params_json = std::fs::read_to_string(&source).map_err(|source| RatingError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            json5::from_str(&params_json).map_err(|source| RatingError::Parse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_draw_margin(self, draw_margin: f64) -> Self {
        Self {
            draw_margin: Some(draw_margin),
            ..self
        }
    }

    pub fn with_trust(self, trust: f64) -> Self {
        Self { trust, ..self }
    }

    /// The margin in effect: the explicit one if given, else derived from `draw_probability`.
    pub fn draw_margin(&self) -> f64 {
        self.draw_margin
            .unwrap_or_else(|| draw_margin_from_probability(self.draw_probability, self.beta))
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("mu0", self.mu0),
            ("sigma0", self.sigma0),
            ("beta", self.beta),
            ("tau", self.tau),
            ("draw_probability", self.draw_probability),
            ("trust", self.trust),
        ];
        if let Some((name, val)) = finite.iter().find(|(_, val)| !val.is_finite()) {
            return Err(RatingError::invalid_config(format!(
                "{} must be finite, got {}",
                name, val
            )));
        }
        let squared = [("sigma0", self.sigma0), ("beta", self.beta), ("tau", self.tau)];
        if let Some((name, val)) = squared.iter().find(|(_, val)| !(val * val).is_finite()) {
            return Err(RatingError::invalid_config(format!(
                "{} = {} is too large to square",
                name, val
            )));
        }
        if self.sigma0 <= 0. {
            return Err(RatingError::invalid_config("sigma0 must be positive"));
        }
        if self.beta <= 0. {
            return Err(RatingError::invalid_config("beta must be positive"));
        }
        if self.tau < 0. {
            return Err(RatingError::invalid_config("tau must be non-negative"));
        }
        if !(0. ..1.).contains(&self.draw_probability) {
            return Err(RatingError::invalid_config(
                "draw_probability must lie in [0, 1)",
            ));
        }
        if let Some(margin) = self.draw_margin {
            if !margin.is_finite() || margin < 0. {
                return Err(RatingError::invalid_config(
                    "draw_margin must be finite and non-negative",
                ));
            }
        }
        if self.trust < 0. {
            return Err(RatingError::invalid_config("trust must be non-negative"));
        }
        Ok(())
    }
}
