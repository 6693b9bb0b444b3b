//! Interceptor assignment and per-tick pursuit.

use hecs::{Entity, World};
use sentry_core::components::{Guidance, Kinematics};
use sentry_core::types::TargetId;

use crate::guidance;
use crate::world_setup::Roster;

/// Bind the first idle interceptor (in id order) to `target`.
/// Returns the interceptor's id, or `None` if every interceptor is busy.
pub fn assign(world: &mut World, roster: &Roster, target: TargetId) -> Option<TargetId> {
    for (&id, &entity) in roster {
        if id == target {
            continue;
        }
        if let Ok(mut guidance) = world.get::<&mut Guidance>(entity) {
            if guidance.target.is_none() {
                guidance.target = Some(target);
                return Some(id);
            }
        }
    }
    None
}

/// Steer one interceptor toward its prey and clear the assignment on a hit.
///
/// Returns the prey's id when the interceptor closed within the hit radius.
/// The prey itself is left untouched.
pub fn steer(world: &mut World, roster: &Roster, entity: Entity) -> Option<TargetId> {
    let prey_id = world.get::<&Guidance>(entity).ok()?.target?;

    let prey = roster
        .get(&prey_id)
        .and_then(|&prey_entity| world.get::<&Kinematics>(prey_entity).ok().map(|k| *k));

    let (kin, assignment) = world
        .query_one_mut::<(&mut Kinematics, &mut Guidance)>(entity)
        .ok()?;

    let Some(prey) = prey else {
        assignment.target = None;
        return None;
    };

    let update = guidance::pursue(kin, &prey);
    kin.heading = update.heading;
    if update.hit {
        assignment.target = None;
        Some(prey_id)
    } else {
        None
    }
}
