use crate::units::Real;

/// Viscosity weight.
///
/// Linear falloff 1 - r/h used in place of a laplacian when diffusing velocity differences.
/// Not normalized, the viscosity coefficient absorbs the scale.
#[derive(Copy, Clone)]
pub struct Viscosity {
    h: Real,
    h_inv: Real,
}

impl Viscosity {
    pub fn new(smoothing_length: Real) -> Viscosity {
        Viscosity {
            h: smoothing_length,
            h_inv: 1.0 / smoothing_length,
        }
    }

    #[inline]
    pub fn laplacian(&self, r: Real) -> Real {
        if r < self.h {
            1.0 - r * self.h_inv
        } else {
            0.0
        }
    }
}
