pub fn standard_normal_pdf(z: f64) -> f64 {
    const NORMALIZE: f64 = 0.5 * std::f64::consts::FRAC_2_SQRT_PI / std::f64::consts::SQRT_2;
    NORMALIZE * (-0.5 * z * z).exp()
}

pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * statrs::function::erf::erfc(-z / std::f64::consts::SQRT_2)
    // Less numerically stable: 0.5 + 0.5 * statrs::function::erf::erf(z / std::f64::consts::SQRT_2)
}

pub fn standard_normal_cdf_inv(prob: f64) -> f64 {
    -std::f64::consts::SQRT_2 * statrs::function::erf::erfc_inv(2. * prob)
    // Equivalently: std::f64::consts::SQRT_2 * statrs::function::erf::erf_inv(2. * prob - 1.)
}

/// Half-width of the performance-difference interval that a 1v1 match between equally
/// skilled players lands in with the given probability. Each player contributes `beta`
/// of noise, so the difference has standard deviation `sqrt(2) * beta`.
pub fn draw_margin_from_probability(draw_probability: f64, beta: f64) -> f64 {
    standard_normal_cdf_inv(0.5 * (draw_probability + 1.)) * std::f64::consts::SQRT_2 * beta
}
