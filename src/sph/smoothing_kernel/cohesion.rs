use crate::units::Real;

/// Cohesion kernel for surface tension.
///
/// Two cubic bands as in "Versatile Surface Tension and Adhesion for SPH Fluids", Akinci et al. 2013.
/// Multiplied with the vector to the neighbor it gives a short range attraction that peaks at h/2,
/// repels slightly at very short range and vanishes at 0 and h.
#[derive(Copy, Clone)]
pub struct Cohesion {
    h: Real,
    half_h: Real,
    normalizer: Real,
    offset: Real, // h⁶/64, keeps both bands continuous at h/2
}

impl Cohesion {
    pub fn new(smoothing_length: Real) -> Cohesion {
        Cohesion {
            h: smoothing_length,
            half_h: smoothing_length * 0.5,
            normalizer: 32.0 / (std::f64::consts::PI as Real * smoothing_length.powi(9)),
            offset: smoothing_length.powi(6) / 64.0,
        }
    }

    #[inline]
    pub fn evaluate(&self, r: Real) -> Real {
        if r <= 0.0 || r > self.h {
            return 0.0;
        }
        let hsubr = self.h - r;
        let band = hsubr * hsubr * hsubr * r * r * r;
        if r > self.half_h {
            self.normalizer * band
        } else {
            self.normalizer * (2.0 * band - self.offset)
        }
    }
}
