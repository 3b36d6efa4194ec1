//! Per-tick power derivation.
//!
//! A gear powers up when it finds a powered neighbor and caches the powered
//! neighbors it saw. A powered gear drops power when it leaves the board,
//! drifts from where it powered up, or any cached neighbor is unpowered.
//! Both rules run to a fixpoint each tick, so a chain energizes in one tick
//! and a broken link de-energizes everything downstream in one tick.

use std::collections::BTreeSet;

use log::trace;

use cogfront_core::enums::PartKind;
use cogfront_core::types::PartId;

use crate::board::Board;
use crate::parts::PartRegistry;

/// Parts whose power state changed this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerReport {
    pub powered_up: Vec<PartId>,
    pub powered_down: Vec<PartId>,
}

/// Re-derive power for every gear-family part.
///
/// `sources_online` is false when a reserve meter has run dry.
pub fn propagate(board: &Board, parts: &mut PartRegistry, sources_online: bool) -> PowerReport {
    let before = powered_set(parts);

    update_sources(board, parts, sources_online);
    invalidate(board, parts);
    rescan(board, parts);

    let after = powered_set(parts);
    let report = PowerReport {
        powered_up: after.difference(&before).copied().collect(),
        powered_down: before.difference(&after).copied().collect(),
    };
    if !report.powered_up.is_empty() || !report.powered_down.is_empty() {
        trace!(
            "power: +{:?} -{:?}",
            report.powered_up,
            report.powered_down
        );
    }
    report
}

fn powered_set(parts: &PartRegistry) -> BTreeSet<PartId> {
    parts.iter().filter(|p| p.is_powered()).map(|p| p.id).collect()
}

/// Sources are powered while placed and online. They never scan.
fn update_sources(board: &Board, parts: &mut PartRegistry, online: bool) {
    for part in parts.iter_mut() {
        if part.kind != PartKind::PowerSource {
            continue;
        }
        let on_board = part.placed && board.cell_of(part.id).is_some();
        part.power.powered = online && on_board;
        part.power.neighbors.clear();
    }
}

fn is_relay(kind: PartKind) -> bool {
    matches!(kind, PartKind::Gear | PartKind::AutoGear)
}

/// Drop power from relays whose support is gone, until nothing changes.
fn invalidate(board: &Board, parts: &mut PartRegistry) {
    let ids = parts.ids();
    let epsilon = board.move_epsilon();
    loop {
        let mut changed = false;
        for &id in &ids {
            let Some(part) = parts.get(id) else { continue };
            if !is_relay(part.kind) || !part.power.powered {
                continue;
            }
            let moved = match board.local_position(id) {
                Some(local) => local.distance(part.power.anchor) > epsilon,
                None => true,
            };
            let broken = part.power.neighbors.iter().any(|n| !parts.is_powered(*n));
            if !part.placed || moved || broken {
                if let Some(part) = parts.get_mut(id) {
                    part.depower();
                }
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Let unpowered placed relays look for powered neighbors, until nothing changes.
fn rescan(board: &Board, parts: &mut PartRegistry) {
    let ids = parts.ids();
    loop {
        let mut changed = false;
        for &id in &ids {
            let Some(part) = parts.get(id) else { continue };
            if !is_relay(part.kind) || part.power.powered || !part.power.neighbors.is_empty() {
                continue;
            }
            if !part.placed {
                continue;
            }
            let Some(key) = board.cell_of(id) else { continue };
            let found = board.adjacent_powered(parts, key);
            if found.is_empty() {
                continue;
            }
            let anchor = board.cell_local(key);
            if let Some(part) = parts.get_mut(id) {
                part.power.powered = true;
                part.power.neighbors = found;
                part.power.anchor = anchor;
            }
            changed = true;
        }
        if !changed {
            break;
        }
    }
}
