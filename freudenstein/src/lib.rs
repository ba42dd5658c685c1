//! Freudenstein is a closed-form position solver for planar four-bar linkages.
//!
//! Given the four link lengths and the crank angle, [`Linkage::solve`] returns
//! the open- and crossed-circuit postures of the coupler and follower links.
//! [`GrashofClass`] and [`Mobility`] classify the mobility of the loop, and
//! [`Linkage::crank_range`] gives the crank angles at which the loop closes.
#![warn(missing_docs)]
pub use crate::grashof::*;
pub use crate::linkage::*;

mod grashof;
mod linkage;
