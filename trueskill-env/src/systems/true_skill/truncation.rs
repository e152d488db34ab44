//! Moments of a Gaussian truncated to the region consistent with an observed outcome.
//! `t` is the standardized mean performance difference and `eps` the standardized draw
//! margin; `v` is the resulting mean shift and `w` the fractional variance reduction.

use crate::error::NumericalInstability;
use crate::numerical::{standard_normal_cdf, standard_normal_pdf};
use serde::Serialize;

/// Below this, a CDF denominator is treated as zero and `v` takes its asymptotic form.
const MIN_DENOMINATOR: f64 = 2.222758749e-162;
/// `w` is kept inside `[W_MIN, W_MAX]`, strictly within (0, 1).
const W_MIN: f64 = 1e-12;
const W_MAX: f64 = 1. - 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TruncatedMoments {
    pub v: f64,
    pub w: f64,
    pub instability: Option<NumericalInstability>,
}

pub fn v_win(t: f64, eps: f64) -> f64 {
    let x = t - eps;
    let denom = standard_normal_cdf(x);
    if denom < MIN_DENOMINATOR {
        // Mills ratio asymptote for x -> -inf
        -x - x.recip()
    } else {
        standard_normal_pdf(x) / denom
    }
}

pub fn w_win(t: f64, eps: f64) -> f64 {
    let v = v_win(t, eps);
    v * (v + t - eps)
}

pub fn v_draw(t: f64, eps: f64) -> f64 {
    let abs_t = t.abs();
    let (upper, lower) = (eps - abs_t, -eps - abs_t);
    let denom = standard_normal_cdf(upper) - standard_normal_cdf(lower);
    let v_abs = if denom < MIN_DENOMINATOR {
        // the truncated mean sits at the near edge of [-eps, eps]
        upper
    } else {
        (standard_normal_pdf(lower) - standard_normal_pdf(upper)) / denom
    };
    if t < 0. { -v_abs } else { v_abs }
}

pub fn w_draw(t: f64, eps: f64) -> f64 {
    let abs_t = t.abs();
    let (upper, lower) = (eps - abs_t, -eps - abs_t);
    let denom = standard_normal_cdf(upper) - standard_normal_cdf(lower);
    if denom < MIN_DENOMINATOR {
        return 1.;
    }
    let v = v_draw(abs_t, eps);
    v * v
        + (upper * standard_normal_pdf(upper) - lower * standard_normal_pdf(lower)) / denom
}

/// Truncation to `diff > eps`: the first team outperformed the second.
pub fn win_moments(t: f64, eps: f64) -> TruncatedMoments {
    let x = t - eps;
    let underflow = (standard_normal_cdf(x) < MIN_DENOMINATOR)
        .then_some(NumericalInstability::DenominatorUnderflow { x });
    finish(v_win(t, eps), w_win(t, eps), underflow)
}

/// Truncation to `|diff| <= eps`: the two teams tied.
pub fn draw_moments(t: f64, eps: f64) -> TruncatedMoments {
    let abs_t = t.abs();
    let denom = standard_normal_cdf(eps - abs_t) - standard_normal_cdf(-eps - abs_t);
    let underflow = (denom < MIN_DENOMINATOR)
        .then_some(NumericalInstability::DenominatorUnderflow { x: eps - abs_t });
    finish(v_draw(t, eps), w_draw(t, eps), underflow)
}

fn finish(v: f64, w: f64, instability: Option<NumericalInstability>) -> TruncatedMoments {
    if !v.is_finite() || !w.is_finite() {
        tracing::warn!("Non-finite truncation moments v={} w={}", v, w);
        return TruncatedMoments {
            v: 0.,
            w: W_MIN,
            instability: Some(NumericalInstability::NonFinite),
        };
    }
    if (W_MIN..=W_MAX).contains(&w) {
        return TruncatedMoments { v, w, instability };
    }
    tracing::warn!("Clamping w={} into (0, 1)", w);
    TruncatedMoments {
        v,
        w: w.clamp(W_MIN, W_MAX),
        instability: instability.or(Some(NumericalInstability::VarianceFactorClamped { w })),
    }
}
