//! Energy accounting for vehicles
//!
//! Each vehicle carries one reserve. Running dry is not an error: an empty
//! counter is topped up before the unit that would take it below zero.
//! Counters saturate at `u32::MAX` instead of wrapping.

use rand::Rng;

/// Which kind of reserve a vehicle runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyKind {
    Combustion,
    Electric,
    Hybrid,
}

impl EnergyKind {
    pub const ALL: [EnergyKind; 3] = [
        EnergyKind::Combustion,
        EnergyKind::Electric,
        EnergyKind::Hybrid,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnergyReserve {
    Combustion { fuel: u32 },
    Electric { charge: u32 },
    /// Burns one side per tick, picked by a coin flip
    Hybrid { charge: u32, fuel: u32 },
}

/// Splits an amount between the two hybrid sides, charge taking the odd unit
fn split_hybrid(amount: u32) -> (u32, u32) {
    (amount - amount / 2, amount / 2)
}

impl EnergyReserve {
    pub fn new(kind: EnergyKind, standard_level: u32) -> Self {
        match kind {
            EnergyKind::Combustion => EnergyReserve::Combustion {
                fuel: standard_level,
            },
            EnergyKind::Electric => EnergyReserve::Electric {
                charge: standard_level,
            },
            EnergyKind::Hybrid => {
                let (charge, fuel) = split_hybrid(standard_level);
                EnergyReserve::Hybrid { charge, fuel }
            }
        }
    }

    pub fn kind(&self) -> EnergyKind {
        match self {
            EnergyReserve::Combustion { .. } => EnergyKind::Combustion,
            EnergyReserve::Electric { .. } => EnergyKind::Electric,
            EnergyReserve::Hybrid { .. } => EnergyKind::Hybrid,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            EnergyReserve::Combustion { fuel } => *fuel,
            EnergyReserve::Electric { charge } => *charge,
            EnergyReserve::Hybrid { charge, fuel } => charge.saturating_add(*fuel),
        }
    }

    pub fn refill(&mut self, amount: u32) {
        match self {
            EnergyReserve::Combustion { fuel: counter }
            | EnergyReserve::Electric { charge: counter } => {
                *counter = counter.saturating_add(amount);
            }
            EnergyReserve::Hybrid { charge, fuel } => {
                let (to_charge, to_fuel) = split_hybrid(amount);
                *charge = charge.saturating_add(to_charge);
                *fuel = fuel.saturating_add(to_fuel);
            }
        }
    }

    /// Use up exactly one unit of energy. If the counter about to be drawn
    /// from is empty it is refilled with `standard_level` first; a hybrid
    /// splits that refill with the odd unit going to the empty side, so there
    /// is always a unit to draw.
    pub fn consume_one_unit<R: Rng>(&mut self, rng: &mut R, standard_level: u32) {
        let standard_level = standard_level.max(1);
        match self {
            EnergyReserve::Combustion { fuel: counter }
            | EnergyReserve::Electric { charge: counter } => {
                if *counter == 0 {
                    *counter = standard_level;
                }
                *counter -= 1;
            }
            EnergyReserve::Hybrid { charge, fuel } => {
                let (side, other) = if rng.random_bool(0.5) {
                    (charge, fuel)
                } else {
                    (fuel, charge)
                };
                if *side == 0 {
                    let (to_side, to_other) = split_hybrid(standard_level);
                    *side = to_side;
                    *other = other.saturating_add(to_other);
                }
                *side -= 1;
            }
        }
    }
}
