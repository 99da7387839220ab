//! Simulation constants
//!
//! Everything is fixed once a world is built; there is no runtime mutation.

use anyhow::{bail, Result};

/// Width of the visible field
pub const FIELD_WIDTH: i32 = 1024;
/// Height of the visible field
pub const FIELD_HEIGHT: i32 = 768;
/// Level an empty energy counter is refilled with
pub const STANDARD_ENERGY_LEVEL: u32 = 11;
/// Distance travelled per tick
pub const VEHICLE_SPEED: i32 = 5;
/// Vehicle extent across its travel axis
pub const VEHICLE_WIDTH: i32 = 50;
/// Vehicle extent along its travel axis
pub const VEHICLE_HEIGHT: i32 = 100;
/// Lane distance from the centerline
pub const LATERAL_OFFSET: i32 = 10;
/// Spacing kept between vehicles in the same lane
pub const FOLLOWING_GAP: i32 = 125;
/// How far ahead of a crossing vehicle the right-of-way check reaches
pub const INTERSECTION_RADIUS: i32 = 80;
/// The world spawns replacements while it holds fewer vehicles than this
pub const MIN_VEHICLE_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub standard_energy_level: u32,
    pub speed: i32,
    pub vehicle_width: i32,
    pub vehicle_height: i32,
    pub lateral_offset: i32,
    pub following_gap: i32,
    pub intersection_radius: i32,
    pub min_vehicle_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            standard_energy_level: STANDARD_ENERGY_LEVEL,
            speed: VEHICLE_SPEED,
            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            lateral_offset: LATERAL_OFFSET,
            following_gap: FOLLOWING_GAP,
            intersection_radius: INTERSECTION_RADIUS,
            min_vehicle_count: MIN_VEHICLE_COUNT,
        }
    }
}

impl SimConfig {
    pub fn center_x(&self) -> i32 {
        self.field_width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.field_height / 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_width <= 0 || self.field_height <= 0 {
            bail!(
                "field must have a positive size, got {}x{}",
                self.field_width,
                self.field_height
            );
        }
        if self.vehicle_width <= 0 || self.vehicle_height <= 0 {
            bail!(
                "vehicles must have a positive size, got {}x{}",
                self.vehicle_width,
                self.vehicle_height
            );
        }
        if self.speed <= 0 {
            bail!("speed must be positive, got {}", self.speed);
        }
        if self.standard_energy_level == 0 {
            bail!("standard energy level must be at least 1");
        }
        if self.lateral_offset < 0 || self.following_gap < 0 || self.intersection_radius < 0 {
            bail!(
                "offset, gap and radius must not be negative (offset={}, gap={}, radius={})",
                self.lateral_offset,
                self.following_gap,
                self.intersection_radius
            );
        }
        Ok(())
    }
}
