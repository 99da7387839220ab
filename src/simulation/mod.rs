//! Standalone crossroad simulation module
//!
//! This module contains all the decision logic for vehicles crossing an
//! unsignalled four-way intersection. It has no presentation of its own and
//! can be driven from the console or from tests.

mod config;
mod energy;
mod priority;
mod types;
mod vehicle;
mod world;

pub use config::{
    SimConfig, FIELD_HEIGHT, FIELD_WIDTH, FOLLOWING_GAP, INTERSECTION_RADIUS, LATERAL_OFFSET,
    MIN_VEHICLE_COUNT, STANDARD_ENERGY_LEVEL, VEHICLE_HEIGHT, VEHICLE_SPEED, VEHICLE_WIDTH,
};
pub use energy::{EnergyKind, EnergyReserve};
pub use priority::{find_blocker, must_yield, YieldReason};
pub use types::{Direction, Rect, VehicleId};
pub use vehicle::{rect_in_bounds, SimVehicle};
pub use world::{SimStats, SimWorld, TickReport, VehicleSnapshot};
