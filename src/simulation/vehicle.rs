//! Vehicle movement and placement logic for the crossroad simulation

use log::error;
use rand::Rng;

use super::config::SimConfig;
use super::energy::{EnergyKind, EnergyReserve};
use super::types::{Direction, Rect, VehicleId};

/// A vehicle in the crossroad simulation
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    rect: Rect,
    direction: Direction,
    speed: i32,
    energy: EnergyReserve,
}

/// Whether `rect`, travelling in `direction`, has not yet left the field
/// through the edge it is heading for.
pub fn rect_in_bounds(rect: &Rect, direction: Direction, config: &SimConfig) -> bool {
    match direction {
        Direction::Right => rect.x < config.field_width,
        Direction::Left => rect.right() > 0,
        Direction::Up => rect.bottom() > 0,
        Direction::Down => rect.y < config.field_height,
        Direction::Undef => false,
    }
}

impl SimVehicle {
    /// Create an unplaced vehicle in its default (vertical) orientation
    pub fn new(id: VehicleId, kind: EnergyKind, config: &SimConfig) -> Self {
        Self {
            id,
            rect: Rect::new(0, 0, config.vehicle_width, config.vehicle_height),
            direction: Direction::Undef,
            speed: config.speed,
            energy: EnergyReserve::new(kind, config.standard_energy_level),
        }
    }

    /// Create a vehicle at an explicit position, bypassing entry placement
    pub fn with_placement(
        id: VehicleId,
        kind: EnergyKind,
        direction: Direction,
        rect: Rect,
        config: &SimConfig,
    ) -> Self {
        Self {
            direction,
            rect,
            ..Self::new(id, kind, config)
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn energy(&self) -> &EnergyReserve {
        &self.energy
    }

    /// Offset of one step of `distance` along the direction of travel
    fn step(&self, distance: i32) -> Option<(i32, i32)> {
        match self.direction {
            Direction::Up => Some((0, -distance)),
            Direction::Down => Some((0, distance)),
            Direction::Right => Some((distance, 0)),
            Direction::Left => Some((-distance, 0)),
            Direction::Undef => None,
        }
    }

    /// Burn one unit of energy and move one tick forward
    pub fn advance<R: Rng>(&mut self, rng: &mut R, config: &SimConfig) {
        self.energy.consume_one_unit(rng, config.standard_energy_level);

        match self.step(self.speed) {
            Some((dx, dy)) => self.rect = self.rect.translated(dx, dy),
            None => error!("vehicle {:?} advanced without a direction", self.id),
        }
    }

    /// The rectangle this vehicle would need free to move: one tick ahead plus
    /// the following gap.
    pub fn projected_position(&self, config: &SimConfig) -> Rect {
        match self.step(self.speed + config.following_gap) {
            Some((dx, dy)) => self.rect.translated(dx, dy),
            None => {
                error!(
                    "projected position requested for vehicle {:?} with no direction",
                    self.id
                );
                self.rect
            }
        }
    }

    pub fn is_in_bounds(&self, config: &SimConfig) -> bool {
        rect_in_bounds(&self.rect, self.direction, config)
    }

    /// Whether any part of the vehicle is inside the visible field
    pub fn is_visible(&self, config: &SimConfig) -> bool {
        let field = Rect::new(0, 0, config.field_width, config.field_height);
        self.rect.overlaps(&field)
    }

    /// Put the vehicle just outside the entry edge for `direction`, in the
    /// lane to the right of the centerline.
    pub fn place_entering(&mut self, direction: Direction, config: &SimConfig) {
        let (width, height) = if direction.is_horizontal() {
            (config.vehicle_height, config.vehicle_width)
        } else {
            (config.vehicle_width, config.vehicle_height)
        };
        let offset = config.lateral_offset;

        let (x, y) = match direction {
            Direction::Left => (config.field_width, config.center_y() - (offset + height)),
            Direction::Right => (-width, config.center_y() + offset),
            Direction::Up => (config.center_x() + offset, config.field_height),
            Direction::Down => (config.center_x() - (width + offset), -height),
            Direction::Undef => {
                error!("vehicle {:?} cannot enter without a direction", self.id);
                return;
            }
        };

        self.rect = Rect::new(x, y, width, height);
        self.direction = direction;
    }

    /// Queue this vehicle behind `other` in the same lane, keeping the
    /// following gap.
    pub fn place_behind(&mut self, other: &SimVehicle, config: &SimConfig) {
        let gap = config.following_gap;
        let ahead = other.rect;

        match self.direction {
            Direction::Right => self.rect.x = ahead.x - (self.rect.width + gap),
            Direction::Left => self.rect.x = ahead.right() + gap,
            Direction::Up => self.rect.y = ahead.bottom() + gap,
            Direction::Down => self.rect.y = ahead.y - (gap + self.rect.height),
            Direction::Undef => {
                error!(
                    "vehicle {:?} cannot queue behind {:?} without a direction",
                    self.id, other.id
                );
            }
        }
    }
}
