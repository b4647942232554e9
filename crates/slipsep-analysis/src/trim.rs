//! Which half of each map-view bedding trace belongs to its block.
//!
//! The footwall and hangingwall traces are full lines; only the part on the
//! correct side of the fault is geologically visible. The side is decided by
//! the east component of the fault normal and by how the folded bedding dip
//! direction compares with the folded fault dip direction.

use serde::{Deserialize, Serialize};
use slipsep_math::Point2;

use crate::trace::BlockTrace;

/// Sign of the east component of the fault normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalSense {
    East,
    West,
    /// No east component: the table has no entry for this case.
    NorthSouth,
}

impl NormalSense {
    pub fn of(normal_east: f64) -> Self {
        if normal_east > 0.0 {
            NormalSense::East
        } else if normal_east < 0.0 {
            NormalSense::West
        } else {
            NormalSense::NorthSouth
        }
    }
}

/// Folded bedding dip direction relative to the folded fault dip direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzimuthRelation {
    /// Bedding azimuth is 0.
    Zero,
    /// Bedding azimuth is 180.
    HalfTurn,
    Lesser,
    Greater,
    Equal,
}

impl AzimuthRelation {
    /// Checked in order: 0, 180, then the comparison with the fault.
    pub fn of(bedding: f64, fault: f64) -> Self {
        if bedding == 0.0 {
            AzimuthRelation::Zero
        } else if bedding == 180.0 {
            AzimuthRelation::HalfTurn
        } else if bedding < fault {
            AzimuthRelation::Lesser
        } else if bedding > fault {
            AzimuthRelation::Greater
        } else {
            AzimuthRelation::Equal
        }
    }
}

/// Half plane kept, bounded through a pivot point (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    pub fn keeps(self, p: Point2, pivot: Point2) -> bool {
        match self {
            Side::North => p.y >= pivot.y,
            Side::South => p.y <= pivot.y,
            Side::East => p.x >= pivot.x,
            Side::West => p.x <= pivot.x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimRule {
    pub footwall: Side,
    pub hangingwall: Side,
}

impl TrimRule {
    const fn new(footwall: Side, hangingwall: Side) -> Self {
        Self {
            footwall,
            hangingwall,
        }
    }

    /// Trim both traces. The footwall is split through the footwall
    /// reference point, the hangingwall through its cutoff point.
    pub fn apply(
        &self,
        footwall: &mut BlockTrace,
        hangingwall: &mut BlockTrace,
        footwall_pivot: Point2,
        hangingwall_pivot: Point2,
    ) {
        footwall.retain(|p| self.footwall.keeps(p, footwall_pivot));
        hangingwall.retain(|p| self.hangingwall.keeps(p, hangingwall_pivot));
    }
}

/// The eight-case trimming table. `None` leaves both traces whole.
pub fn trim_rule(sense: NormalSense, relation: AzimuthRelation) -> Option<TrimRule> {
    use AzimuthRelation::*;
    use Side::*;

    let rule = match (sense, relation) {
        (NormalSense::East, Zero) => TrimRule::new(North, East),
        (NormalSense::East, HalfTurn) => TrimRule::new(South, East),
        (NormalSense::East, Lesser) => TrimRule::new(North, South),
        (NormalSense::East, Greater) => TrimRule::new(South, North),
        (NormalSense::West, Zero) => TrimRule::new(South, West),
        (NormalSense::West, HalfTurn) => TrimRule::new(North, West),
        (NormalSense::West, Lesser) => TrimRule::new(South, North),
        (NormalSense::West, Greater) => TrimRule::new(North, South),
        (NormalSense::NorthSouth, _) | (_, Equal) => return None,
    };
    Some(rule)
}
