//! Animation system.
//!
//! Each tick, for every entity with a
//! [`Transform`](crate::components::transform::Transform) and an
//! [`Animation`](crate::components::animation::Animation):
//!
//! 1. [`select_clip`] evaluates the animation's rules in order against the
//!    transform; the first rule that holds names the active clip. If none
//!    holds, the previous clip stays active.
//! 2. [`advance_clip`] ticks the active clip's fixed-cadence frame counter.
//!
//! Clips that are not active keep their frame and tick state untouched.

use crate::components::animation::{Animation, Clip, CmpOp, Condition};
use crate::components::transform::Transform;
use crate::ecs::system::{System, SystemKind};
use crate::ecs::world::World;

#[derive(Debug, Default)]
pub struct AnimationSystem;

impl AnimationSystem {
    pub fn new() -> Self {
        AnimationSystem
    }
}

impl System for AnimationSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::Animation
    }

    fn update(&mut self, world: &mut World) {
        let components = world.components_mut();
        for (entity, animation) in components.animations.iter_mut() {
            let Some(transform) = components.transforms.get(entity) else {
                log::trace!("entity {} has Animation but no Transform", entity);
                continue;
            };
            if select_clip(animation, transform) {
                log::debug!("entity {} animation -> {}", entity, animation.active_clip());
            }
            advance_clip(animation.active_mut());
        }
    }
}

/// Make the first matching rule's clip active. Returns true on a change.
pub fn select_clip(animation: &mut Animation, transform: &Transform) -> bool {
    let selected = animation
        .rules
        .iter()
        .find(|rule| evaluate_condition(transform, &rule.when))
        .map(|rule| rule.clip.as_str());
    match selected {
        Some(clip) if clip != animation.active_clip => {
            animation.active_clip = clip.to_string();
            true
        }
        _ => false,
    }
}

/// One tick of fixed-cadence playback. Returns true if the frame advanced.
///
/// While `tick_counter < ticks_per_phase`, the frame advances (looping) on
/// ticks where `tick_counter % frame_advance_divisor == 0`. The counter then
/// increments and wraps to 0 once it reaches `ticks_per_phase`.
pub fn advance_clip(clip: &mut Clip) -> bool {
    let mut advanced = false;
    if clip.tick_counter < clip.ticks_per_phase
        && clip.tick_counter % clip.frame_advance_divisor == 0
    {
        clip.frame_index = (clip.frame_index + 1) % clip.frames.len();
        advanced = true;
    }
    clip.tick_counter += 1;
    if clip.tick_counter >= clip.ticks_per_phase {
        clip.tick_counter = 0;
    }
    advanced
}

fn compare(lhs: f32, op: CmpOp, rhs: f32) -> bool {
    match op {
        CmpOp::Lt => lhs < rhs,
        CmpOp::Le => lhs <= rhs,
        CmpOp::Gt => lhs > rhs,
        CmpOp::Ge => lhs >= rhs,
        CmpOp::Eq => (lhs - rhs).abs() < f32::EPSILON,
        CmpOp::Ne => (lhs - rhs).abs() >= f32::EPSILON,
    }
}

/// Evaluate a rule condition against a transform.
///
/// Recursively evaluates `All`, `Any` and `Not` combinators.
pub fn evaluate_condition(transform: &Transform, condition: &Condition) -> bool {
    match condition {
        Condition::Facing(direction) => transform.direction == *direction,
        Condition::Stationary => transform.is_stationary(),
        Condition::Heading { dx, dy } => {
            transform.velocity.x == *dx && transform.velocity.y == *dy
        }
        Condition::Speed { op, value } => compare(transform.speed, *op, *value),
        Condition::All(conditions) => conditions
            .iter()
            .all(|cond| evaluate_condition(transform, cond)),
        Condition::Any(conditions) => conditions
            .iter()
            .any(|cond| evaluate_condition(transform, cond)),
        Condition::Not(cond) => !evaluate_condition(transform, cond),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::components::animation::ClipRule;
    use crate::components::transform::Direction;
    use crate::resources::spritesheet::{FrameRect, SpriteFrame};

    fn frames(n: usize) -> Vec<SpriteFrame> {
        (0..n)
            .map(|i| SpriteFrame {
                tex_key: Arc::from("sheet"),
                src: FrameRect {
                    x: i as f32 * 80.0,
                    y: 0.0,
                    width: 80.0,
                    height: 80.0,
                },
            })
            .collect()
    }

    fn moving(direction: Direction, speed: f32) -> Transform {
        let mut t = Transform::default();
        t.direction = direction;
        t.velocity = direction.unit();
        t.speed = speed;
        t
    }

    // --- evaluate_condition ---

    #[test]
    fn test_facing() {
        let t = moving(Direction::Left, 1.0);
        assert!(evaluate_condition(&t, &Condition::Facing(Direction::Left)));
        assert!(!evaluate_condition(&t, &Condition::Facing(Direction::Right)));
    }

    #[test]
    fn test_stationary() {
        assert!(evaluate_condition(&Transform::default(), &Condition::Stationary));
        assert!(!evaluate_condition(
            &moving(Direction::Up, 1.0),
            &Condition::Stationary
        ));
    }

    #[test]
    fn test_heading_is_exact() {
        let t = moving(Direction::Up, 1.0);
        assert!(evaluate_condition(&t, &Condition::Heading { dx: 0.0, dy: -1.0 }));
        assert!(!evaluate_condition(&t, &Condition::Heading { dx: 0.0, dy: 1.0 }));
    }

    #[test]
    fn test_speed_cmp() {
        let t = moving(Direction::Down, 2.0);
        let speed = |op, value| Condition::Speed { op, value };
        assert!(evaluate_condition(&t, &speed(CmpOp::Eq, 2.0)));
        assert!(evaluate_condition(&t, &speed(CmpOp::Ne, 1.0)));
        assert!(evaluate_condition(&t, &speed(CmpOp::Gt, 1.5)));
        assert!(evaluate_condition(&t, &speed(CmpOp::Ge, 2.0)));
        assert!(evaluate_condition(&t, &speed(CmpOp::Le, 2.0)));
        assert!(!evaluate_condition(&t, &speed(CmpOp::Lt, 2.0)));
    }

    #[test]
    fn test_combinators() {
        let t = moving(Direction::Right, 1.0);
        let walk_right = Condition::All(vec![
            Condition::Facing(Direction::Right),
            Condition::Heading { dx: 1.0, dy: 0.0 },
        ]);
        assert!(evaluate_condition(&t, &walk_right));
        assert!(!evaluate_condition(&t, &Condition::Not(Box::new(walk_right))));
        let either = Condition::Any(vec![
            Condition::Stationary,
            Condition::Facing(Direction::Right),
        ]);
        assert!(evaluate_condition(&t, &either));
        assert!(evaluate_condition(&t, &Condition::All(Vec::new())));
        assert!(!evaluate_condition(&t, &Condition::Any(Vec::new())));
    }

    // --- select_clip ---

    fn two_clip_animation() -> Animation {
        let clips: FxHashMap<String, Clip> = ["idle", "walk"]
            .iter()
            .map(|n| (n.to_string(), Clip::new(n, frames(4), 60, 10).unwrap()))
            .collect();
        let rules = vec![
            ClipRule {
                when: Condition::Not(Box::new(Condition::Stationary)),
                clip: "walk".into(),
            },
            ClipRule {
                when: Condition::Any(vec![
                    Condition::Stationary,
                    Condition::Facing(Direction::Right),
                ]),
                clip: "idle".into(),
            },
        ];
        Animation::new("idle", clips, rules).unwrap()
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let mut anim = two_clip_animation();
        // Both rules hold for a right-moving transform; "walk" is listed first.
        assert!(select_clip(&mut anim, &moving(Direction::Right, 1.0)));
        assert_eq!(anim.active_clip(), "walk");
    }

    #[test]
    fn test_no_match_keeps_active_clip() {
        let clips: FxHashMap<String, Clip> = ["idle", "walk"]
            .iter()
            .map(|n| (n.to_string(), Clip::new(n, frames(4), 60, 10).unwrap()))
            .collect();
        let rules = vec![ClipRule {
            when: Condition::Facing(Direction::Up),
            clip: "walk".into(),
        }];
        let mut anim = Animation::new("idle", clips, rules).unwrap();
        assert!(!select_clip(&mut anim, &moving(Direction::Down, 1.0)));
        assert_eq!(anim.active_clip(), "idle");
    }

    #[test]
    fn test_reselecting_same_clip_reports_no_change() {
        let mut anim = two_clip_animation();
        assert!(!select_clip(&mut anim, &Transform::default()));
        assert_eq!(anim.active_clip(), "idle");
    }

    // --- advance_clip ---

    #[test]
    fn test_advances_every_divisor_ticks() {
        let mut clip = Clip::new("walk", frames(8), 60, 10).unwrap();
        let advanced: Vec<bool> = (0..12).map(|_| advance_clip(&mut clip)).collect();
        let expected: Vec<bool> = (0..12).map(|t| t % 10 == 0).collect();
        assert_eq!(advanced, expected);
        assert_eq!(clip.frame_index(), 2);
    }

    #[test]
    fn test_phase_of_60_ticks_advances_six_times_without_wrap() {
        let mut clip = Clip::new("walk", frames(8), 60, 10).unwrap();
        let advances = (0..60).filter(|_| advance_clip(&mut clip)).count();
        assert_eq!(advances, 6);
        assert_eq!(clip.frame_index(), 6);
        assert_eq!(clip.tick_counter(), 0);
    }

    #[test]
    fn test_phase_repeats_identically() {
        let mut clip = Clip::new("idle", frames(4), 60, 10).unwrap();
        let first: Vec<bool> = (0..60).map(|_| advance_clip(&mut clip)).collect();
        let second: Vec<bool> = (0..60).map(|_| advance_clip(&mut clip)).collect();
        assert_eq!(first, second);
        // 12 advances over 4 frames brings the clip back to frame 0.
        assert_eq!(clip.frame_index(), 0);
    }

    #[test]
    fn test_frame_index_wraps_at_frame_count() {
        let mut clip = Clip::new("idle", frames(4), 60, 10).unwrap();
        for _ in 0..41 {
            advance_clip(&mut clip);
        }
        // Advances at ticks 0,10,20,30,40 -> 5 advances, 5 % 4 == 1.
        assert_eq!(clip.frame_index(), 1);
    }

    #[test]
    fn test_divisor_not_dividing_phase() {
        let mut clip = Clip::new("odd", frames(100), 25, 7).unwrap();
        let advances = (0..25).filter(|_| advance_clip(&mut clip)).count();
        // ticks 0, 7, 14, 21
        assert_eq!(advances, 4);
        assert_eq!(clip.tick_counter(), 0);
    }

    // --- system ---

    #[test]
    fn test_system_selects_then_ticks_only_active_clip() {
        let mut world = World::new();
        let e = world.create_entity();
        let mut t = moving(Direction::Right, 1.0);
        t.position = Vec2::new(5.0, 5.0);
        world.add_component(e, t);
        world.add_component(e, two_clip_animation());

        AnimationSystem::new().update(&mut world);

        let anim = world.get_component::<Animation>(e).unwrap();
        assert_eq!(anim.active_clip(), "walk");
        assert_eq!(anim.active().frame_index(), 1);
        assert_eq!(anim.active().tick_counter(), 1);
        let idle = anim.clip("idle").unwrap();
        assert_eq!(idle.frame_index(), 0);
        assert_eq!(idle.tick_counter(), 0);
    }

    #[test]
    fn test_system_skips_animation_without_transform() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, two_clip_animation());
        AnimationSystem::new().update(&mut world);
        let anim = world.get_component::<Animation>(e).unwrap();
        assert_eq!(anim.active().tick_counter(), 0);
    }
}
