/// Smoothing Kernels.
pub use self::cohesion::Cohesion;
pub use self::kernel::Kernel;
pub use self::poly6::Poly6;
pub use self::spiky::Spiky;
pub use self::viscosity::Viscosity;

#[macro_use]
mod kernel;
mod cohesion;
mod poly6;
mod spiky;
mod viscosity;

use super::parameters::SimulationParameters;

/// The kernels used by the pipeline, all sharing the same smoothing length.
#[derive(Copy, Clone)]
pub struct SmoothingKernels {
    pub density: Poly6,
    pub pressure: Spiky,
    pub viscosity: Viscosity,
    pub cohesion: Cohesion,
}

impl SmoothingKernels {
    pub fn new(parameters: &SimulationParameters) -> SmoothingKernels {
        let h = parameters.smoothing_length;
        SmoothingKernels {
            density: Poly6::new(h),
            pressure: Spiky::new(h, parameters.min_separation),
            viscosity: Viscosity::new(h),
            cohesion: Cohesion::new(h),
        }
    }
}
