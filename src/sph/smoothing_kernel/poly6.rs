use super::kernel::Kernel;
use crate::units::{Real, Vector};
use cgmath::prelude::*;

/// Poly6 smoothing kernel.
///
/// Refer to "Particle-Based Fluid Simulation for Interactive Applications", Müller et al.
/// Kernel not well suited for computing pressure forces since derivative approaches zero.
#[derive(Copy, Clone)]
pub struct Poly6 {
    h: Real,
    hsq: Real,
    normalizer: Real,
    normalizer_grad: Real,
}

impl Poly6 {
    pub fn new(smoothing_length: Real) -> Poly6 {
        let normalizer = 315.0 / (64.0 * std::f64::consts::PI as Real * smoothing_length.powi(9));
        Poly6 {
            h: smoothing_length,
            hsq: smoothing_length * smoothing_length,
            normalizer,
            normalizer_grad: -6.0 * normalizer,
        }
    }
}

impl Kernel for Poly6 {
    fn smoothing_length(&self) -> Real {
        self.h
    }

    #[inline]
    fn evaluate(&self, r_sq: Real, _r: Real) -> Real {
        if r_sq < self.hsq {
            let hsq_sub_rsq = self.hsq - r_sq;
            self.normalizer * hsq_sub_rsq * hsq_sub_rsq * hsq_sub_rsq
        } else {
            0.0
        }
    }

    #[inline]
    fn gradient(&self, ri_to_rj: Vector, r_sq: Real, _r: Real) -> Vector {
        if r_sq < self.hsq {
            let hsq_sub_rsq = self.hsq - r_sq;
            (self.normalizer_grad * hsq_sub_rsq * hsq_sub_rsq) * ri_to_rj
        } else {
            Vector::zero()
        }
    }

    #[inline]
    fn laplacian(&self, r_sq: Real, _r: Real) -> Real {
        if r_sq < self.hsq {
            6.0 * self.normalizer * (self.hsq - r_sq) * (7.0 * r_sq - 3.0 * self.hsq)
        } else {
            0.0
        }
    }
}

generate_kernel_tests!(Poly6, Poly6::new(1.0));
