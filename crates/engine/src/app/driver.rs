use std::fmt::Debug;
use std::time::Duration;

use tracing::debug;

use super::collision::{detect_collisions, pair_is_live};
use super::entity::{Entity, EntityId};
use super::geometry::Viewport;
use super::input::Command;
use super::rendering::{render_world, RenderSink};
use super::world::ArcadeWorld;

pub type LogicWorld<G> = ArcadeWorld<<G as GameLogic>::Kind, <G as GameLogic>::Alarm>;

/// The game plugged into the frame driver.
pub trait GameLogic: Sized {
    type Kind: Copy + Eq + Debug;
    type Alarm: Copy + Eq + Debug;

    fn load(&mut self, world: &mut LogicWorld<Self>);

    /// Per-frame logic, run before movement with the frame's input command.
    fn update(&mut self, command: Option<Command>, world: &mut LogicWorld<Self>);

    fn on_collision(&mut self, first: EntityId, second: EntityId, world: &mut LogicWorld<Self>);

    fn on_alarm(&mut self, key: Self::Alarm, world: &mut LogicWorld<Self>);

    /// Called once for every entity that leaves the registry, whatever the cause.
    fn on_object_deleted(&mut self, entity: &Entity<Self::Kind>, world: &mut LogicWorld<Self>);

    fn debug_title(&self, _world: &LogicWorld<Self>) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub collisions: usize,
    pub alarms_fired: usize,
    pub evicted: usize,
}

/// Owns a game and its world and runs the per-frame sequence:
/// update, movement, collisions, alarms, cleanup.
pub struct FrameDriver<G: GameLogic> {
    logic: G,
    world: LogicWorld<G>,
    is_loaded: bool,
}

impl<G: GameLogic> FrameDriver<G> {
    pub fn new(logic: G, viewport: Viewport) -> Self {
        Self {
            logic,
            world: ArcadeWorld::new(viewport),
            is_loaded: false,
        }
    }

    pub fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.logic.load(&mut self.world);
        self.dispatch_deleted();
        self.is_loaded = true;
    }

    pub fn step(&mut self, command: Option<Command>, elapsed: Duration) -> FrameReport {
        let mut report = FrameReport::default();
        self.world.set_last_frame_time(elapsed);

        self.logic.update(command, &mut self.world);
        self.dispatch_deleted();

        self.world.advance(elapsed.as_secs_f32());

        if !self.world.events_paused() {
            for pair in detect_collisions(self.world.entities()) {
                if !pair_is_live(self.world.entities(), pair) {
                    continue;
                }
                self.logic
                    .on_collision(pair.first, pair.second, &mut self.world);
                self.dispatch_deleted();
                report.collisions += 1;
            }

            self.world.alarms_mut().tick(elapsed);
            // Handlers may cancel keys that expired this frame, so pop one at a time.
            while let Some(key) = self.world.alarms_mut().next_due() {
                self.logic.on_alarm(key, &mut self.world);
                self.dispatch_deleted();
                report.alarms_fired += 1;
            }
        }

        report.evicted = self.world.entities_mut().evict();
        self.dispatch_deleted();

        if report.alarms_fired > 0 || report.evicted > 0 {
            debug!(
                collisions = report.collisions,
                alarms_fired = report.alarms_fired,
                evicted = report.evicted,
                "frame_events"
            );
        }
        report
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        render_world(&self.world, sink);
    }

    pub fn debug_title(&self) -> Option<String> {
        self.logic.debug_title(&self.world)
    }

    pub fn logic(&self) -> &G {
        &self.logic
    }

    pub fn logic_mut(&mut self) -> &mut G {
        &mut self.logic
    }

    pub fn world(&self) -> &LogicWorld<G> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut LogicWorld<G> {
        &mut self.world
    }

    /// Handlers may delete more entities, so drain until quiet.
    fn dispatch_deleted(&mut self) {
        loop {
            let deleted = self.world.entities_mut().take_deleted();
            if deleted.is_empty() {
                break;
            }
            for entity in &deleted {
                self.logic.on_object_deleted(entity, &mut self.world);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::entity::EntityDesc;
    use crate::app::geometry::Size;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Ship,
        Rock,
        Shot,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Tick,
        Other,
    }

    #[derive(Default)]
    struct Recorder {
        updates: Vec<Option<Command>>,
        collisions: Vec<(EntityId, EntityId)>,
        alarms: Vec<Key>,
        deleted: Vec<EntityId>,
        kill_on_collision: bool,
        rearm: bool,
        cancel_all_on_alarm: bool,
        loaded: u32,
    }

    impl GameLogic for Recorder {
        type Kind = Kind;
        type Alarm = Key;

        fn load(&mut self, _world: &mut LogicWorld<Self>) {
            self.loaded += 1;
        }

        fn update(&mut self, command: Option<Command>, _world: &mut LogicWorld<Self>) {
            self.updates.push(command);
        }

        fn on_collision(&mut self, first: EntityId, second: EntityId, world: &mut LogicWorld<Self>) {
            self.collisions.push((first, second));
            if self.kill_on_collision {
                world.kill(second);
            }
        }

        fn on_alarm(&mut self, key: Key, world: &mut LogicWorld<Self>) {
            self.alarms.push(key);
            if self.cancel_all_on_alarm {
                world.alarms_mut().cancel_all();
            }
            if self.rearm {
                world.set_alarm(key, 1.0).expect("rearm");
            }
        }

        fn on_object_deleted(&mut self, entity: &Entity<Kind>, _world: &mut LogicWorld<Self>) {
            self.deleted.push(entity.id());
        }
    }

    fn driver(recorder: Recorder) -> FrameDriver<Recorder> {
        let mut driver = FrameDriver::new(recorder, Viewport::new(800, 600));
        driver.load();
        driver
    }

    fn box_at(kind: Kind, x: f32, y: f32) -> EntityDesc<Kind> {
        EntityDesc::new(kind, Size::new(20, 20)).at(x, y)
    }

    #[test]
    fn load_runs_once() {
        let mut driver = driver(Recorder::default());
        driver.load();
        assert_eq!(driver.logic().loaded, 1);
    }

    #[test]
    fn position_follows_velocity_integral() {
        let mut driver = driver(Recorder::default());
        let rock = driver
            .world_mut()
            .spawn(box_at(Kind::Rock, 100.0, 100.0).with_velocity(3.0, 4.0, 50.0));
        let frames = [16u64, 33, 20, 41, 7];
        for ms in frames {
            driver.step(None, Duration::from_millis(ms));
        }
        let total: f32 = frames.iter().map(|ms| *ms as f32 / 1000.0).sum();
        let position = driver.world().entities().get(rock).expect("rock").position;
        assert!((position.x - (100.0 + 0.6 * 50.0 * total)).abs() < 1e-3);
        assert!((position.y - (100.0 + 0.8 * 50.0 * total)).abs() < 1e-3);
    }

    #[test]
    fn overlapping_pair_reported_once_per_frame() {
        let mut driver = driver(Recorder::default());
        let ship = driver.world_mut().spawn(box_at(Kind::Ship, 50.0, 50.0));
        let rock = driver.world_mut().spawn(box_at(Kind::Rock, 55.0, 50.0));
        driver.world_mut().spawn(box_at(Kind::Rock, 45.0, 50.0));
        for _ in 0..3 {
            driver.step(None, Duration::from_millis(33));
        }
        let with_first_rock = driver
            .logic()
            .collisions
            .iter()
            .filter(|pair| **pair == (ship, rock))
            .count();
        assert_eq!(with_first_rock, 3);
        assert_eq!(driver.logic().collisions.len(), 6);
    }

    #[test]
    fn killed_entity_is_skipped_and_evicted_same_frame() {
        let mut driver = driver(Recorder {
            kill_on_collision: true,
            ..Recorder::default()
        });
        let ship = driver.world_mut().spawn(box_at(Kind::Ship, 50.0, 50.0));
        let rock = driver.world_mut().spawn(box_at(Kind::Rock, 50.0, 50.0));
        driver.world_mut().spawn(box_at(Kind::Shot, 50.0, 50.0));
        let report = driver.step(None, Duration::from_millis(33));
        // ship+rock kills the rock, so rock+shot never dispatches.
        assert_eq!(report.collisions, 2);
        assert_eq!(report.evicted, 2);
        assert!(driver.logic().deleted.contains(&rock));
        assert!(!driver.logic().collisions.iter().any(|pair| pair.0 == rock));
        assert!(driver.world().entities().contains(ship));
    }

    #[test]
    fn alarms_fire_after_collisions_and_may_rearm() {
        let mut driver = driver(Recorder {
            rearm: true,
            ..Recorder::default()
        });
        driver.world_mut().set_alarm(Key::Tick, 1.0).expect("arm");
        driver.world_mut().set_alarm(Key::Other, 0.5).expect("arm");
        driver.step(None, Duration::from_millis(600));
        assert_eq!(driver.logic().alarms, vec![Key::Other]);
        driver.step(None, Duration::from_millis(500));
        assert_eq!(driver.logic().alarms, vec![Key::Other, Key::Tick]);
        assert!(driver.world().alarm_is_active(Key::Tick));
    }

    #[test]
    fn alarm_cancelled_by_an_earlier_handler_does_not_fire() {
        let mut driver = driver(Recorder {
            cancel_all_on_alarm: true,
            ..Recorder::default()
        });
        driver.world_mut().set_alarm(Key::Tick, 0.1).expect("arm");
        driver.world_mut().set_alarm(Key::Other, 0.1).expect("arm");
        let report = driver.step(None, Duration::from_millis(200));
        assert_eq!(driver.logic().alarms, vec![Key::Tick]);
        assert_eq!(report.alarms_fired, 1);
        driver.step(None, Duration::from_millis(200));
        assert_eq!(driver.logic().alarms, vec![Key::Tick]);
        assert_eq!(driver.world().alarms().due_count(), 0);
    }

    #[test]
    fn paused_events_freeze_alarms_and_collisions() {
        let mut driver = driver(Recorder::default());
        driver.world_mut().spawn(box_at(Kind::Ship, 50.0, 50.0));
        driver.world_mut().spawn(box_at(Kind::Rock, 50.0, 50.0));
        driver.world_mut().set_alarm(Key::Tick, 0.1).expect("arm");
        driver.world_mut().pause_events(true);
        driver.step(None, Duration::from_millis(200));
        assert!(driver.logic().collisions.is_empty());
        assert!(driver.logic().alarms.is_empty());
        driver.world_mut().pause_events(false);
        driver.step(None, Duration::from_millis(100));
        assert_eq!(driver.logic().alarms, vec![Key::Tick]);
        assert_eq!(driver.logic().collisions.len(), 1);
    }

    #[test]
    fn entities_leaving_alive_zone_are_deleted_with_notification() {
        let mut driver = driver(Recorder::default());
        let rock = driver.world_mut().spawn(
            box_at(Kind::Rock, 95.0, 50.0)
                .with_velocity(1.0, 0.0, 100.0)
                .alive_zone(crate::app::geometry::IntRect::new(0, 0, 100, 100)),
        );
        driver.step(Some(Command::Fire), Duration::from_millis(100));
        assert_eq!(driver.logic().deleted, vec![rock]);
        assert_eq!(driver.logic().updates, vec![Some(Command::Fire)]);
        assert_eq!(driver.world().last_frame_time(), Duration::from_millis(100));
    }
}
