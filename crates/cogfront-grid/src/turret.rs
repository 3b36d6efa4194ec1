//! Turret charging and auto-gear aiming.

use glam::Vec2;

use cogfront_core::constants::AUTO_GEAR_SNAP_STEP;
use cogfront_core::enums::PartKind;
use cogfront_core::types::{angle_of, delta_angle, PartId};

use crate::board::Board;
use crate::parts::PartRegistry;

/// A turret that reached its interval this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurretShot {
    pub turret: PartId,
    pub origin: Vec2,
    pub direction: Vec2,
}

/// A turret may charge only while placed next to a powered gear-family part.
pub fn can_shoot(board: &Board, parts: &PartRegistry, turret: PartId) -> bool {
    let Some(part) = parts.get(turret) else {
        return false;
    };
    if part.kind != PartKind::Turret || !part.placed {
        return false;
    }
    board
        .cell_of(turret)
        .is_some_and(|key| !board.adjacent_powered(parts, key).is_empty())
}

/// Advance every turret's charge. Disabled turrets reset to zero.
pub fn charge_turrets(
    board: &Board,
    parts: &mut PartRegistry,
    dt: f32,
    interval: f32,
) -> Vec<TurretShot> {
    let turrets: Vec<(PartId, bool)> = parts
        .iter()
        .filter(|p| p.kind == PartKind::Turret)
        .map(|p| (p.id, can_shoot(board, parts, p.id)))
        .collect();

    let mut shots = Vec::new();
    for (id, enabled) in turrets {
        let Some(part) = parts.get_mut(id) else { continue };
        if !enabled {
            part.charge = 0.0;
            continue;
        }
        part.charge += dt;
        if part.charge >= interval {
            part.charge = 0.0;
            shots.push(TurretShot {
                turret: id,
                origin: part.position,
                direction: part.facing(board.rotation()),
            });
        }
    }
    shots
}

/// Snap turrets next to powered auto gears toward the closest target.
pub fn aim_auto_gears(board: &Board, parts: &mut PartRegistry, targets: &[Vec2]) {
    if targets.is_empty() {
        return;
    }
    let mut aimed = Vec::new();
    for (key, id) in board.occupied() {
        let Some(gear) = parts.get(id) else { continue };
        if gear.kind != PartKind::AutoGear || !gear.placed || !gear.is_powered() {
            continue;
        }
        for neighbor in board.adjacent_parts(key) {
            if parts.kind(neighbor) == Some(PartKind::Turret) && !aimed.contains(&neighbor) {
                aimed.push(neighbor);
            }
        }
    }

    let board_rotation = board.rotation();
    for id in aimed {
        let Some(turret) = parts.get_mut(id) else { continue };
        let here = turret.position;
        let Some(closest) = targets
            .iter()
            .copied()
            .min_by(|a, b| a.distance(here).total_cmp(&b.distance(here)))
        else {
            continue;
        };
        let desired = angle_of(closest - here) - 90.0;
        let current = board_rotation + turret.rotation;
        let steps = (delta_angle(current, desired) / AUTO_GEAR_SNAP_STEP).round();
        let snapped = current + steps * AUTO_GEAR_SNAP_STEP;
        turret.rotation = (snapped - board_rotation).rem_euclid(360.0);
    }
}
