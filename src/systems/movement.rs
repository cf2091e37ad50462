//! Movement system.
//!
//! Applies each held key's [`ControlAction`](crate::components::controls::ControlAction)
//! to the entity's [`Transform`](crate::components::transform::Transform)
//! and integrates the position. Velocity and speed are rebuilt from scratch
//! every tick, so releasing all keys stops the entity.
use crate::ecs::system::{System, SystemKind};
use crate::ecs::world::World;

#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        MovementSystem
    }
}

impl System for MovementSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::Movement
    }

    /// For every entity with Transform and Controls: reset motion, apply the
    /// actions of all held keys in press order (later keys win on the same
    /// field), then `position += speed * velocity`.
    fn update(&mut self, world: &mut World) {
        let components = world.components_mut();
        for (entity, controls) in components.controls.iter() {
            let Some(transform) = components.transforms.get_mut(entity) else {
                log::trace!("entity {} has Controls but no Transform", entity);
                continue;
            };
            transform.reset_motion();
            for key in controls.held_keys() {
                if let Some(action) = controls.action_for(*key) {
                    action.apply(transform);
                }
            }
            transform.integrate();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::components::controls::{ControlAction, Controls};
    use crate::components::transform::{Direction, Transform};
    use crate::ecs::entity::Entity;
    use crate::resources::input::Key;

    fn player(world: &mut World, held: &[Key]) -> Entity {
        let e = world.create_entity();
        let mut controls = Controls::new()
            .with_binding(Key::W, ControlAction::Move(Direction::Up))
            .with_binding(Key::A, ControlAction::Move(Direction::Left))
            .with_binding(Key::S, ControlAction::Move(Direction::Down))
            .with_binding(Key::D, ControlAction::Move(Direction::Right))
            .with_binding(Key::LeftShift, ControlAction::SpeedModifier { speed: 2.0 });
        for key in held {
            controls.press(*key);
        }
        world.add_component(e, controls);
        world.add_component(e, Transform::default());
        e
    }

    fn transform(world: &World, e: Entity) -> Transform {
        *world.get_component::<Transform>(e).unwrap()
    }

    #[test]
    fn test_no_keys_resets_and_stays_put() {
        let mut world = World::new();
        let e = player(&mut world, &[]);
        {
            let t = world.get_component_mut::<Transform>(e).unwrap();
            t.position = Vec2::new(4.0, 4.0);
            t.velocity = Vec2::new(1.0, 1.0);
            t.speed = 2.0;
        }
        MovementSystem::new().update(&mut world);
        let t = transform(&world, e);
        assert_eq!(t.position, Vec2::new(4.0, 4.0));
        assert_eq!(t.velocity, Vec2::ZERO);
        assert_eq!(t.speed, 1.0);
    }

    #[test]
    fn test_single_key_moves_one_unit() {
        let mut world = World::new();
        let e = player(&mut world, &[Key::D]);
        MovementSystem::new().update(&mut world);
        let t = transform(&world, e);
        assert_eq!(t.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(t.direction, Direction::Right);
        assert_eq!(t.position, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_speed_modifier_doubles_step() {
        let mut world = World::new();
        let e = player(&mut world, &[Key::D, Key::LeftShift]);
        let mut system = MovementSystem::new();
        system.update(&mut world);
        system.update(&mut world);
        let t = transform(&world, e);
        assert_eq!(t.speed, 2.0);
        assert_eq!(t.position, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_all_held_keys_apply_in_order() {
        let mut world = World::new();
        let e = player(&mut world, &[Key::W, Key::D]);
        MovementSystem::new().update(&mut world);
        let t = transform(&world, e);
        assert_eq!(t.velocity, Vec2::new(1.0, -1.0));
        // D was pressed last, so it decides the facing.
        assert_eq!(t.direction, Direction::Right);
        assert_eq!(t.position, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_later_key_overrides_same_axis() {
        let mut world = World::new();
        let e = player(&mut world, &[Key::A, Key::D]);
        MovementSystem::new().update(&mut world);
        let t = transform(&world, e);
        assert_eq!(t.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(t.direction, Direction::Right);
    }

    #[test]
    fn test_integration_is_exact_over_many_ticks() {
        let mut world = World::new();
        let e = player(&mut world, &[Key::S, Key::LeftShift]);
        let mut system = MovementSystem::new();
        for _ in 0..100 {
            system.update(&mut world);
        }
        assert_eq!(transform(&world, e).position, Vec2::new(0.0, 200.0));
    }

    #[test]
    fn test_entity_without_transform_is_skipped() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Controls::new());
        MovementSystem::new().update(&mut world);
        assert!(world.get_component::<Transform>(e).is_none());
    }

    #[test]
    fn test_transform_without_controls_is_untouched() {
        let mut world = World::new();
        let e = world.create_entity();
        let mut t = Transform::at(2.0, 3.0);
        t.velocity = Vec2::new(1.0, 0.0);
        world.add_component(e, t);
        MovementSystem::new().update(&mut world);
        assert_eq!(transform(&world, e), t);
    }
}
