// CDF approximations for significance testing
//
// These are approximations, not an exact Student-t CDF:
// - df >= 30: standard normal CDF via the Abramowitz-Stegun 7.1.26 erf
//   approximation (max abs error ~1.5e-7)
// - df < 30: x = t/sqrt(df) mapped through
//     z = sqrt(df) * x * (1 - 1/(4 df)) / sqrt(1 + x^2 / 2)
//   and then the normal CDF. Sign follows x.
//
// The p < 0.10 decision threshold is calibrated against this approximation.

/// Degrees of freedom at which the normal approximation takes over
pub const NORMAL_APPROX_MIN_DF: f64 = 30.0;

/// Error function, Abramowitz-Stegun 7.1.26
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal CDF
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Approximate CDF of a t statistic with `df` degrees of freedom
pub fn t_cdf(t: f64, df: f64) -> f64 {
    if df >= NORMAL_APPROX_MIN_DF {
        return normal_cdf(t);
    }
    if df <= 0.0 {
        return 0.5;
    }

    let x = t / df.sqrt();
    let z = df.sqrt() * x * (1.0 - 1.0 / (4.0 * df)) / (1.0 + x * x / 2.0).sqrt();
    normal_cdf(z)
}

/// Two-tailed p-value `2 * (1 - CDF(|t|, df))`, clamped to [0, 1]
///
/// Non-finite statistics give `1.0`.
pub fn two_tailed_p_value(t: f64, df: f64) -> f64 {
    let p = 2.0 * (1.0 - t_cdf(t.abs(), df));
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        1.0
    }
}
