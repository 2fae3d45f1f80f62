use crate::units::{Real, Vector};

/// SPH smoothing kernel
///
/// Only radially symmetric kernels are supported.
/// All kernels have compact support within the smoothing length, i.e. for |r|>=h they return zero.
pub trait Kernel {
    fn smoothing_length(&self) -> Real;

    /// Evaluates the kernel function for a given distance
    /// `r_sq`:     Squared length of ri_to_rj
    /// `r`:        Length of ri_to_rj
    fn evaluate(&self, r_sq: Real, r: Real) -> Real;

    /// Evaluates the gradient of the kernel with respect to the neighbor position, i.e. W'(r) * ri_to_rj / r
    /// `ri_to_rj`: Vector from a position i to a position j, so rj - ri. Not normalized!
    /// `r_sq`:     Squared length of ri_to_rj
    /// `r`:        Length of ri_to_rj
    fn gradient(&self, ri_to_rj: Vector, r_sq: Real, r: Real) -> Vector;

    /// Evaluates the laplacian of the kernel, i.e. W''(r) + 2 W'(r) / r in three dimensions.
    /// `r_sq`:     Squared length of ri_to_rj
    /// `r`:        Length of ri_to_rj
    fn laplacian(&self, r_sq: Real, r: Real) -> Real;
}

// Tests every kernel needs to pass. Expects an expression creating a kernel with smoothing length 1.
macro_rules! generate_kernel_tests {
    ($kernel_type:ident, $constructor:expr) => {
    };
}
