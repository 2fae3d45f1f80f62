use crate::units::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::SimulationError;

/// How the integrator interprets the accumulated per-particle force.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceUnits {
    // Accumulated value is already an accelleration and is applied as is.
    Acceleration,
    // Accumulated value is a force in N, divided by particle mass before integration.
    Force,
}

/// All tunables of the SPH pipeline.
///
/// Defaults describe a 1m³ box (half width 0.5m) of water-like fluid with particles at 0.0125m rest spacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub smoothing_length: Real,      // typically expressed as 'h', also the cell size of the spatial partition
    pub timestep: Real,              // fixed dt in seconds
    pub particle_mass: Real,         // kg
    pub pressure_coefficient: Real,  // stiffness k of the linear equation of state
    pub rest_density: Real,          // kg/m³ for the resting fluid (ρ0)
    pub min_density: Real,           // floor for estimated densities, avoids singular pressure weights
    pub max_density: Real,           // ceiling for estimated densities
    pub viscosity: Real,             // viscosity coefficient μ
    pub surface_tension: Real,       // cohesion coefficient γ, 0 disables the surface tension term
    pub half_boundary_width: Real,   // the simulation box spans [-w, w] on every axis
    pub restitution: Real,           // fraction of velocity kept when reflected at the box
    pub gravity: Real,               // m/s², pulls along -y
    pub min_separation: Real,        // distances below are clamped before dividing in the gradient kernel
    pub force_units: ForceUnits,
    pub uses_spatial_partition: bool, // grid based neighbor search instead of testing all pairs
    pub has_static_particles: bool,   // honor the static flag of particles
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            smoothing_length: 0.057,
            timestep: 0.001,
            particle_mass: 0.001953125,
            pressure_coefficient: 0.5,
            rest_density: 1000.0,
            min_density: 0.2,
            max_density: 1000000.0,
            viscosity: 200.05,
            surface_tension: 0.0,
            half_boundary_width: 0.5,
            restitution: 0.8,
            gravity: 9.8,
            min_separation: 1.0e-6,
            force_units: ForceUnits::Acceleration,
            uses_spatial_partition: true,
            has_static_particles: false,
        }
    }
}

impl SimulationParameters {
    pub fn from_json_str(json: &str) -> Result<SimulationParameters, SimulationError> {
        let parameters: SimulationParameters = serde_json::from_str(json)?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn load_json(path: &Path) -> Result<SimulationParameters, SimulationError> {
        let json = std::fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lattice spacing at which a particle of `particle_mass` occupies the volume it has at `rest_density`.
    pub fn rest_spacing(&self) -> Real {
        (self.particle_mass / self.rest_density).cbrt()
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        fn check(name: &'static str, value: Real, valid: bool, reason: &'static str) -> Result<(), SimulationError> {
            if valid && value.is_finite() {
                Ok(())
            } else {
                Err(SimulationError::InvalidParameter { name, value, reason })
            }
        }

        check("smoothing_length", self.smoothing_length, self.smoothing_length > 0.0, "must be positive")?;
        check("timestep", self.timestep, self.timestep > 0.0, "must be positive")?;
        check("particle_mass", self.particle_mass, self.particle_mass > 0.0, "must be positive")?;
        check("pressure_coefficient", self.pressure_coefficient, self.pressure_coefficient >= 0.0, "must not be negative")?;
        check("rest_density", self.rest_density, self.rest_density > 0.0, "must be positive")?;
        check("min_density", self.min_density, self.min_density > 0.0, "must be positive")?;
        check(
            "max_density",
            self.max_density,
            self.max_density >= self.min_density,
            "must not be smaller than min_density",
        )?;
        check("viscosity", self.viscosity, self.viscosity >= 0.0, "must not be negative")?;
        check("surface_tension", self.surface_tension, self.surface_tension >= 0.0, "must not be negative")?;
        check("half_boundary_width", self.half_boundary_width, self.half_boundary_width > 0.0, "must be positive")?;
        check(
            "restitution",
            self.restitution,
            (0.0..=1.0).contains(&self.restitution),
            "must be within [0, 1]",
        )?;
        check("gravity", self.gravity, true, "must be finite")?;
        check(
            "min_separation",
            self.min_separation,
            self.min_separation > 0.0 && self.min_separation < self.smoothing_length,
            "must be positive and smaller than smoothing_length",
        )?;
        Ok(())
    }
}
