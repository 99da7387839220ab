//! Main simulation world that ties everything together
//!
//! The world owns every vehicle, keeps them in insertion order and runs the
//! per-tick decisions.

use anyhow::{Context, Result};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use super::config::SimConfig;
use super::energy::EnergyKind;
use super::priority::{self, YieldReason};
use super::types::{Direction, Rect, VehicleId};
use super::vehicle::SimVehicle;

/// Running totals since the world was created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub total_spawned: u64,
    /// Vehicles removed after leaving the field
    pub total_exited: u64,
    pub deadlock_breaks: u64,
    pub direct_blocks: u64,
    pub right_of_way_yields: u64,
}

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Vehicles that advanced through the normal rules
    pub moved: usize,
    pub respawned: usize,
    /// Whether the deadlock-breaker pushed a vehicle forward
    pub deadlock_broken: bool,
}

/// Read-only view of a vehicle for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub rect: Rect,
    pub direction: Direction,
    pub energy_kind: EnergyKind,
    pub energy_level: u32,
}

/// The main simulation world
pub struct SimWorld {
    config: SimConfig,

    /// All live vehicles
    vehicles: HashMap<VehicleId, SimVehicle>,

    /// Vehicle ids in insertion order; this is the processing order
    order: Vec<VehicleId>,

    /// Next ID to assign
    next_id: usize,

    rng: StdRng,

    stats: SimStats,
}

impl SimWorld {
    fn new_internal(config: SimConfig, rng: StdRng) -> Result<Self> {
        config.validate().context("invalid simulation config")?;
        Ok(Self {
            config,
            vehicles: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
            rng,
            stats: SimStats::default(),
        })
    }

    /// Create a world filled up to the minimum vehicle count, seeded from the OS
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut world = Self::new_internal(config, StdRng::from_os_rng())?;
        world.populate();
        Ok(world)
    }

    /// Create a populated world with a seeded RNG for reproducible simulations
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        let mut world = Self::new_internal(config, StdRng::seed_from_u64(seed))?;
        world.populate();
        Ok(world)
    }

    /// Create a seeded world with no vehicles, for building scenarios by hand
    pub fn empty_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, StdRng::seed_from_u64(seed))
    }

    fn populate(&mut self) {
        while self.vehicles.len() < self.config.min_vehicle_count {
            self.spawn_vehicle();
        }
    }

    /// Choose a random element from a slice
    fn choose_random<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.rng)
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, vehicle: SimVehicle) -> VehicleId {
        let id = vehicle.id;
        self.order.push(id);
        self.vehicles.insert(id, vehicle);
        self.stats.total_spawned += 1;
        id
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.get(&id)
    }

    /// All live vehicles in processing order
    pub fn vehicles(&self) -> impl Iterator<Item = &SimVehicle> + '_ {
        self.order.iter().filter_map(|id| self.vehicles.get(id))
    }

    pub fn snapshot(&self) -> Vec<VehicleSnapshot> {
        self.vehicles()
            .map(|vehicle| VehicleSnapshot {
                id: vehicle.id,
                rect: vehicle.rect(),
                direction: vehicle.direction(),
                energy_kind: vehicle.energy().kind(),
                energy_level: vehicle.energy().level(),
            })
            .collect()
    }

    /// Insert a vehicle at an explicit position
    pub fn add_vehicle(
        &mut self,
        kind: EnergyKind,
        direction: Direction,
        rect: Rect,
    ) -> VehicleId {
        let id = self.next_vehicle_id();
        let vehicle = SimVehicle::with_placement(id, kind, direction, rect, &self.config);
        self.insert(vehicle)
    }

    /// Spawn a random vehicle at a random entry edge, queued behind any
    /// vehicle already waiting there
    pub fn spawn_vehicle(&mut self) -> VehicleId {
        let kind = match self.choose_random(&EnergyKind::ALL) {
            Some(kind) => *kind,
            None => {
                error!("no energy kind to choose from, spawning combustion");
                EnergyKind::Combustion
            }
        };
        let direction = match self.choose_random(&Direction::ENTRY) {
            Some(direction) => *direction,
            None => {
                error!("no entry direction to choose from, spawning rightward");
                Direction::Right
            }
        };

        let id = self.next_vehicle_id();
        let mut vehicle = SimVehicle::new(id, kind, &self.config);
        vehicle.place_entering(direction, &self.config);

        // Each step moves the new vehicle strictly further back, so this ends.
        while let Some(ahead) = self.vehicles().find(|other| {
            vehicle.direction() != Direction::Undef
                && other.direction() == vehicle.direction()
                && other.rect().overlaps(&vehicle.rect())
        }) {
            vehicle.place_behind(ahead, &self.config);
        }

        debug!(
            "spawned vehicle {:?}: {:?} heading {:?} at ({}, {})",
            id,
            kind,
            direction,
            vehicle.rect().x,
            vehicle.rect().y
        );
        self.insert(vehicle)
    }

    /// Remove a vehicle and, if the world has dropped below its minimum size,
    /// spawn one replacement. Returns the replacement's id.
    pub fn respawn(&mut self, id: VehicleId) -> Option<VehicleId> {
        if self.vehicles.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
            self.stats.total_exited += 1;
            debug!("vehicle {:?} left the field", id);
        }

        if self.vehicles.len() < self.config.min_vehicle_count {
            Some(self.spawn_vehicle())
        } else {
            None
        }
    }

    /// First vehicle that `id` currently has to wait for
    fn blocker_for(&self, id: VehicleId) -> Option<(VehicleId, YieldReason)> {
        let vehicle = self.vehicles.get(&id)?;
        priority::find_blocker(vehicle, self.vehicles(), &self.config)
    }

    /// Main simulation tick
    pub fn tick(&mut self) -> TickReport {
        self.stats.ticks += 1;
        let mut report = TickReport::default();

        // Vehicles can be removed mid-scan, so walk a copy of the ids
        let ids = self.order.clone();

        for id in ids {
            let in_bounds = match self.vehicles.get(&id) {
                Some(vehicle) => vehicle.is_in_bounds(&self.config),
                None => continue,
            };

            if !in_bounds {
                self.respawn(id);
                report.respawned += 1;
                continue;
            }

            match self.blocker_for(id) {
                Some((_, YieldReason::DirectBlock)) => self.stats.direct_blocks += 1,
                Some((_, YieldReason::RightOfWay)) => self.stats.right_of_way_yields += 1,
                None => {
                    if let Some(vehicle) = self.vehicles.get_mut(&id) {
                        vehicle.advance(&mut self.rng, &self.config);
                        report.moved += 1;
                    }
                }
            }
        }

        if report.moved == 0 {
            report.deadlock_broken = self.break_deadlock();
        }

        report
    }

    /// Let a rightward vehicle waiting just left of the center go if the
    /// space in front of it is physically free.
    fn break_deadlock(&mut self) -> bool {
        let config = &self.config;
        let center_x = config.center_x();

        let candidate = self.vehicles().find(|vehicle| {
            let rect = vehicle.rect();
            vehicle.direction() == Direction::Right
                && rect.x < center_x
                && rect.x
                    >= center_x
                        - (config.intersection_radius + rect.height + config.following_gap)
        });

        let Some(candidate) = candidate else {
            return false;
        };

        let ahead = candidate.projected_position(config);
        if let Some(other) = self
            .vehicles()
            .find(|other| other.id != candidate.id && ahead.overlaps(&other.rect()))
        {
            debug!(
                "deadlock: vehicle {:?} cannot be released, {:?} is in the way",
                candidate.id, other.id
            );
            return false;
        }

        let id = candidate.id;
        if let Some(vehicle) = self.vehicles.get_mut(&id) {
            vehicle.advance(&mut self.rng, &self.config);
            self.stats.deadlock_breaks += 1;
            debug!("deadlock: released vehicle {:?}", id);
            return true;
        }
        false
    }

    /// Summary of the world state as text
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "=== Crossroad Simulation Summary ===".to_string(),
            format!("Tick: {}", self.stats.ticks),
            format!(
                "Vehicles: {} (target {})",
                self.len(),
                self.config.min_vehicle_count
            ),
        ];

        for direction in Direction::ENTRY {
            let count = self
                .vehicles()
                .filter(|vehicle| vehicle.direction() == direction)
                .count();
            lines.push(format!("  heading {:?}: {}", direction, count));
        }

        lines.push("--- Active Vehicles ---".to_string());
        for vehicle in self.vehicles() {
            let rect = vehicle.rect();
            lines.push(format!(
                "  Vehicle {}: {:?} {:?}, speed={}, position=({}, {}), energy={}, visible={}",
                vehicle.id.0,
                vehicle.energy().kind(),
                vehicle.direction(),
                vehicle.speed(),
                rect.x,
                rect.y,
                vehicle.energy().level(),
                vehicle.is_visible(&self.config)
            ));
        }

        lines.join("\n")
    }

    pub fn log_summary(&self) {
        for line in self.summary().lines() {
            info!("{}", line);
        }
    }
}
