//! Cleanup system: removes projectiles that left the play area or were used up.

use hecs::{Entity, World};

use cogfront_core::types::Bounds;

use crate::components::{Position, Projectile};

/// Despawn out-of-bounds projectiles plus everything in `consumed`.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, bounds: &Bounds, consumed: &[Entity], despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend_from_slice(consumed);

    for (entity, (pos, _projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        if !bounds.contains(pos.0) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
