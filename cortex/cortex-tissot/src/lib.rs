//! Geodesic disc sampling on cortical surfaces.
//!
//! A Tissot indicatrix marks the surface with evenly spaced geodesic discs
//! of equal radius; drawn on a flatmap, the discs show how the flattening
//! stretches and shrinks the cortex.
//!
//! Centres are placed by rejection sampling: random vertices are accepted
//! if no earlier centre lies within the spacing distance along the surface.
//! Sampling is seeded from [`TissotParams::seed`] or from a caller-supplied
//! RNG, so results are reproducible.
//!
//! # Example
//!
//! ```
//! use cortex_tissot::{tissot_indicatrix, TissotParams};
//! use cortex_types::{Point3, Surface};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let surface = Surface::from_parts(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![[0, 1, 2]],
//! );
//! let params = TissotParams::default().with_radius(0.5).with_max_fails(10);
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let discs = tissot_indicatrix(&surface, &params, &mut rng).unwrap();
//! // Every vertex is within the default spacing of the first centre.
//! assert_eq!(discs.center_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod params;
mod sampler;

pub use error::{TissotError, TissotResult};
pub use params::TissotParams;
pub use sampler::{tissot_indicatrix, tissots_indicatrix, TissotIndicatrix};
