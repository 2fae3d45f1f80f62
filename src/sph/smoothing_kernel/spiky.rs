use super::kernel::Kernel;
use crate::units::{Real, Vector};
use cgmath::prelude::*;

/// Debrun's "Spiky" smoothing kernel.
///
/// Refer to "Particle-Based Fluid Simulation for Interactive Applications", Müller et al.
/// Kernel well suited for pressure since its gradient doesn't vanish at the center.
///
/// Distances below `min_separation` are clamped before dividing by them.
/// Coincident particles have a zero distance vector, so they end up with a zero gradient instead of NaN.
#[derive(Copy, Clone)]
pub struct Spiky {
    h: Real,
    hsq: Real,
    min_separation: Real,
    normalizer: Real,
    normalizer_grad: Real,
}

impl Spiky {
    pub fn new(smoothing_length: Real, min_separation: Real) -> Spiky {
        let normalizer = 15.0 / (std::f64::consts::PI as Real * smoothing_length.powi(6));
        Spiky {
            h: smoothing_length,
            hsq: smoothing_length * smoothing_length,
            min_separation,
            normalizer,
            normalizer_grad: -3.0 * normalizer,
        }
    }
}

impl Kernel for Spiky {
    fn smoothing_length(&self) -> Real {
        self.h
    }

    #[inline]
    fn evaluate(&self, r_sq: Real, r: Real) -> Real {
        if r_sq < self.hsq {
            let hsubr = self.h - r;
            self.normalizer * hsubr * hsubr * hsubr
        } else {
            0.0
        }
    }

    #[inline]
    fn gradient(&self, ri_to_rj: Vector, r_sq: Real, r: Real) -> Vector {
        if r_sq < self.hsq {
            let r = r.max(self.min_separation);
            let hsubr = self.h - r;
            (self.normalizer_grad * hsubr * hsubr / r) * ri_to_rj
        } else {
            Vector::zero()
        }
    }

    #[inline]
    fn laplacian(&self, r_sq: Real, r: Real) -> Real {
        if r_sq < self.hsq {
            let r = r.max(self.min_separation);
            let hsubr = self.h - r;
            2.0 * self.normalizer_grad * hsubr * (self.h - 2.0 * r) / r
        } else {
            0.0
        }
    }
}

generate_kernel_tests!(Spiky, Spiky::new(1.0, 1.0e-6));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_closed_form_gradient() {
        let h: Real = 0.057;
        let kernel = Spiky::new(h, 1.0e-6);
        let ri_to_rj = Vector::new(0.01, -0.02, 0.005);
        let r = ri_to_rj.magnitude();
        let expected = -(45.0 / (std::f32::consts::PI * h.powi(6))) * (h - r).powi(2) / r * ri_to_rj;
        let gradient = kernel.gradient(ri_to_rj, r * r, r);
        assert!((gradient - expected).magnitude() <= expected.magnitude() * 1.0e-4);
    }

    #[test]
    fn coincident_positions_have_no_gradient() {
        let kernel = Spiky::new(0.057, 1.0e-6);
        let gradient = kernel.gradient(Vector::zero(), 0.0, 0.0);
        assert_eq!(gradient, Vector::zero());
        assert!(kernel.laplacian(0.0, 0.0).is_finite());
    }
}
