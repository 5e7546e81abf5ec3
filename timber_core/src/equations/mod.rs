//! # Structural Engineering Equations
//!
//! Fundamental mechanics formulas used by the utilization model. Keeping
//! them in one place documents assumptions and sign conventions once.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported uniform load formulas (moment, shear, deflection)
//! - [`section`] - Rectangular cross-section properties (A, I, i)
//! - [`buckling`] - Column buckling (slenderness, instability factor, k_c)
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Moment**: Positive causes tension on bottom fiber (sagging)
//! - **Deflection**: Positive downward
//! - **Axial force**: Positive in compression

pub mod beam;
pub mod buckling;
pub mod section;

// Re-export commonly used items
pub use beam::{
    deflection_limit,
    rectangular_shear_stress,
    uniform_load_max_deflection,
    uniform_load_max_moment,
    uniform_load_reaction,
};

pub use buckling::{
    buckling_reduction,
    instability_factor,
    relative_slenderness,
    slenderness_ratio,
};

pub use section::{
    radius_of_gyration,
    rectangular_area,
    rectangular_moment_of_inertia,
};
