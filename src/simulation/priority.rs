//! Right-of-way decisions
//!
//! A vehicle waits when the space it is about to drive into is taken, or when
//! a vehicle coming from its right is heading into the same space and this
//! vehicle has not yet entered that vehicle's lane.

use log::trace;

use super::config::SimConfig;
use super::types::{Direction, Rect, VehicleId};
use super::vehicle::SimVehicle;

/// Why a vehicle has to wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YieldReason {
    /// The look-ahead rectangle overlaps the other vehicle as it stands now
    DirectBlock,
    /// Both vehicles head into the same space and the other one comes from
    /// the right
    RightOfWay,
}

/// Whether `vehicle` has not yet reached the lane of `other`, whose projected
/// position `other_ahead` is widened by the intersection radius on the side
/// facing `vehicle`. Only one branch applies per direction.
fn short_of_crossing(
    vehicle: &Rect,
    direction: Direction,
    other_ahead: &Rect,
    config: &SimConfig,
) -> bool {
    let radius = config.intersection_radius;
    match direction {
        Direction::Up => vehicle.y > other_ahead.bottom() + radius,
        Direction::Down => vehicle.bottom() < other_ahead.y - radius,
        Direction::Left => vehicle.x > other_ahead.right() + radius,
        Direction::Right => vehicle.right() < other_ahead.x - (radius + config.lateral_offset),
        Direction::Undef => false,
    }
}

/// Decide whether `vehicle` must give way to `other` this tick.
///
/// A vehicle never yields to itself.
pub fn must_yield(
    vehicle: &SimVehicle,
    other: &SimVehicle,
    config: &SimConfig,
) -> Option<YieldReason> {
    if vehicle.id == other.id {
        return None;
    }

    let ahead = vehicle.projected_position(config);

    if ahead.overlaps(&other.rect()) {
        return Some(YieldReason::DirectBlock);
    }

    let other_ahead = other.projected_position(config);
    if !ahead.overlaps(&other_ahead) {
        return None;
    }

    let direction = vehicle.direction();
    if direction.yields_to() == Some(other.direction())
        && short_of_crossing(&vehicle.rect(), direction, &other_ahead, config)
    {
        return Some(YieldReason::RightOfWay);
    }

    None
}

/// Find the first vehicle in `candidates` that `vehicle` has to wait for.
pub fn find_blocker<'a, I>(
    vehicle: &SimVehicle,
    candidates: I,
    config: &SimConfig,
) -> Option<(VehicleId, YieldReason)>
where
    I: IntoIterator<Item = &'a SimVehicle>,
{
    candidates.into_iter().find_map(|other| {
        must_yield(vehicle, other, config).map(|reason| {
            trace!(
                "vehicle {:?} ({:?}) waits for {:?} ({:?}): {:?}",
                vehicle.id,
                vehicle.direction(),
                other.id,
                other.direction(),
                reason
            );
            (other.id, reason)
        })
    })
}
