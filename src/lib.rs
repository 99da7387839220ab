//! Crossroad Simulation Library
//!
//! Vehicles crossing an unsignalled intersection under right-hand priority.

pub mod simulation;
