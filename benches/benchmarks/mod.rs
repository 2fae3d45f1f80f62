pub mod morton;
pub mod neighborhood_search;
pub mod smoothing_kernel;
pub mod update_densities;
