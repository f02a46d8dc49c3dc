use crate::math::Real;

pub fn inv_exact(e: Real) -> Real {
    // We don't want to use any threshold here.
    if e == 0.0 {
        0.0
    } else {
        1.0 / e
    }
}

/// Computes the Lamé parameters (lambda, mu) from the young modulus and poisson ratio.
pub fn lame_lambda_mu(young_modulus: Real, poisson_ratio: Real) -> (Real, Real) {
    (
        young_modulus * poisson_ratio / ((1.0 + poisson_ratio) * (1.0 - 2.0 * poisson_ratio)),
        shear_modulus(young_modulus, poisson_ratio),
    )
}

pub fn shear_modulus(young_modulus: Real, poisson_ratio: Real) -> Real {
    young_modulus / (2.0 * (1.0 + poisson_ratio))
}

pub fn bulk_modulus(young_modulus: Real, poisson_ratio: Real) -> Real {
    young_modulus / (3.0 * (1.0 - 2.0 * poisson_ratio))
}

/// Elastic wave speed estimate `sqrt(E / rho)`.
pub fn bar_wave_speed(young_modulus: Real, density: Real) -> Real {
    (young_modulus / density).sqrt()
}
