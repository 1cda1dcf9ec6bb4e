//! Game session
//!
//! One running game: owns the world, the physics stepper, the strike handler
//! and everything they share. Built with `GameSession::new`, driven with
//! `update`, and shut down with `teardown`. There is no global state; two
//! sessions never see each other.

use std::time::Duration;

use glam::Vec2;

use crate::board::Board;
use crate::consts::SIM_DT;
use crate::error::ConfigError;
use crate::overlay::{self, TextLabel, TextSink};
use crate::settings::Settings;
use crate::sim::{
    BallSpawner, BodyId, CollisionHandler, CollisionPair, Engine, EventKind, Label, Runner,
    Scoreboard, Strike, StrikeContext, Subscriptions, Timers, World,
};
use crate::ui::{Controls, UiCommand};

pub struct GameSession {
    settings: Settings,
    board: Board,
    world: World,
    engine: Engine,
    runner: Runner,
    subscriptions: Subscriptions,
    handler: CollisionHandler,
    scoreboard: Scoreboard,
    spawner: BallSpawner,
    timers: Timers,
    controls: Controls,
    /// Wall-clock time since the session started
    clock: Duration,
    live: bool,
}

impl GameSession {
    /// Validate settings, lay out the board, stock the starting balls and
    /// start the runner
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let board = Board::from_settings(&settings)?;

        let mut session = Self {
            board,
            world: World::new(),
            engine: Engine::new(settings.gravity, settings.seed),
            runner: Runner::new(),
            subscriptions: Subscriptions::new(),
            handler: CollisionHandler::new(&settings),
            scoreboard: Scoreboard::new(settings.width),
            spawner: BallSpawner::new(&settings),
            timers: Timers::new(),
            controls: Controls::new(settings.ball_count, settings.pointer_spawn),
            clock: Duration::ZERO,
            live: true,
            settings,
        };
        session.init();
        Ok(session)
    }

    fn init(&mut self) {
        self.subscriptions.on(EventKind::CollisionStart);
        self.subscriptions.on(EventKind::CollisionEnd);
        self.subscriptions.on(EventKind::MouseDown);

        self.board.populate(&mut self.world);
        let initial = self.settings.initial_balls;
        self.create_balls(initial);
        self.world.extend(self.board.walls());

        self.runner.start();
        log::info!(
            "Session started: {} bodies ({} balls)",
            self.world.len(),
            self.world.count(Label::Ball)
        );
    }

    /// Advance by one frame of wall-clock time: step physics, dispatch its
    /// collision events, then fire any reverts that have come due.
    pub fn update(&mut self, elapsed: Duration) -> Vec<Strike> {
        if !self.live {
            return Vec::new();
        }
        self.clock += elapsed;

        let mut strikes = Vec::new();
        for _ in 0..self.runner.advance(elapsed.as_secs_f32()) {
            strikes.extend(self.step());
        }
        self.fire_due_timers();
        strikes
    }

    /// One fixed physics step with event dispatch
    pub fn step(&mut self) -> Vec<Strike> {
        if !self.live {
            return Vec::new();
        }
        let events = self.engine.step(&mut self.world, SIM_DT);
        let strikes = self.handle_collision_start(&events.collision_start);
        self.handle_collision_end(&events.collision_end);
        strikes
    }

    /// Deliver a collision-start event
    pub fn handle_collision_start(&mut self, pairs: &[CollisionPair]) -> Vec<Strike> {
        if !self.live || !self.subscriptions.is_on(EventKind::CollisionStart) || pairs.is_empty() {
            return Vec::new();
        }
        let mut ctx = StrikeContext {
            world: &mut self.world,
            timers: &mut self.timers,
            scoreboard: &mut self.scoreboard,
            now: self.clock,
        };
        self.handler.collision_start(&mut ctx, pairs)
    }

    /// Deliver a collision-end event
    pub fn handle_collision_end(&mut self, pairs: &[CollisionPair]) {
        if self.live && self.subscriptions.is_on(EventKind::CollisionEnd) {
            self.handler.collision_end(pairs);
        }
    }

    /// Apply every revert due by now. Returns how many touched a live body.
    pub fn fire_due_timers(&mut self) -> usize {
        if !self.live {
            return 0;
        }
        self.timers
            .take_due(self.clock)
            .into_iter()
            .filter(|due| due.restore.apply(&mut self.world, due.body))
            .count()
    }

    /// Pointer pressed on the board
    pub fn mouse_down(&mut self, position: Vec2) -> Option<BodyId> {
        if !self.live || !self.subscriptions.is_on(EventKind::MouseDown) {
            return None;
        }
        self.spawner.spawn_at(&mut self.world, position)
    }

    /// Drop `count` balls at the top center (capped)
    pub fn create_balls(&mut self, count: usize) -> Vec<BodyId> {
        if !self.live {
            return Vec::new();
        }
        self.spawner
            .create_balls(&mut self.world, &mut self.engine, count)
    }

    /// Apply a control panel or pointer command. Returns any balls it spawned.
    pub fn apply(&mut self, command: UiCommand) -> Vec<BodyId> {
        match command {
            UiCommand::SetBallCount(value) => {
                self.controls.set_ball_count(value);
                Vec::new()
            }
            UiCommand::SliderReleased(value) => {
                let count = self.controls.set_ball_count(value);
                self.create_balls(count as usize)
            }
            UiCommand::CreateBalls => {
                let count = self.controls.ball_count();
                self.create_balls(count as usize)
            }
            UiCommand::TogglePointerSpawn => {
                if self.controls.toggle_pointer_spawn() {
                    self.spawner
                        .set_pointer_enabled(self.controls.pointer_spawn());
                }
                Vec::new()
            }
            UiCommand::MouseDown(position) => self.mouse_down(position).into_iter().collect(),
        }
    }

    /// Stop the runner, detach from events, then clear the world.
    /// Pending reverts are cancelled; every later call is a no-op.
    pub fn teardown(&mut self) {
        if !self.live {
            return;
        }
        self.runner.stop();
        self.subscriptions.off_all();
        self.timers.clear();
        self.world.clear();
        self.engine.clear();
        self.live = false;
        log::info!(
            "Session torn down after {:.1}s, {} hits",
            self.clock.as_secs_f32(),
            self.scoreboard.total_hits()
        );
    }

    /// Labels the overlay would draw this frame
    pub fn overlay_labels(&self) -> Vec<TextLabel> {
        overlay::labels(&self.world)
    }

    pub fn draw_overlay(&self, sink: &mut dyn TextSink) -> usize {
        overlay::draw_frame(&self.world, sink)
    }

    /// Scoreboard texts, oldest first
    pub fn scoreboard(&self) -> Vec<String> {
        self.scoreboard.annotations(&self.world)
    }

    pub fn total_hits(&self) -> u64 {
        self.scoreboard.total_hits()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn pending_reverts(&self) -> usize {
        self.timers.len()
    }

    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Fill;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn quiet_settings() -> Settings {
        Settings {
            initial_balls: 0,
            ..Default::default()
        }
    }

    fn first_partition(session: &GameSession) -> BodyId {
        session.world().with_label(Label::Partition).next().unwrap().id
    }

    #[test]
    fn test_initial_world() {
        let session = GameSession::new(Settings::default()).unwrap();
        let world = session.world();
        assert_eq!(world.count(Label::Peg), 95);
        assert_eq!(world.count(Label::Partition), 15);
        assert_eq!(world.count(Label::Ball), 5);
        assert_eq!(world.len(), 4 + 95 + 15 + 5);
        assert!(world.bodies().iter().filter(|b| b.label.is_wall()).count() == 4);
        assert!(session.is_running());
    }

    #[test]
    fn test_create_balls_adds_only_balls() {
        let mut session = GameSession::new(Settings::default()).unwrap();
        let before = session.world().len();
        let ids = session.create_balls(7);
        assert_eq!(ids.len(), 7);
        assert_eq!(session.world().len(), before + 7);
        assert_eq!(session.world().count(Label::Ball), 12);
        assert_eq!(session.world().count(Label::Peg), 95);
        assert_eq!(session.world().count(Label::Partition), 15);
    }

    #[test]
    fn test_ui_commands() {
        let mut session = GameSession::new(quiet_settings()).unwrap();
        assert_eq!(session.apply(UiCommand::SetBallCount(3)).len(), 0);
        assert_eq!(session.apply(UiCommand::CreateBalls).len(), 3);
        assert_eq!(session.apply(UiCommand::SliderReleased(7)).len(), 7);
        assert_eq!(session.controls().ball_count(), 7);
        assert_eq!(session.apply(UiCommand::MouseDown(Vec2::new(300.0, 40.0))).len(), 1);
        // Checkbox is locked; pointer spawn stays on
        session.apply(UiCommand::TogglePointerSpawn);
        assert!(session.mouse_down(Vec2::new(200.0, 40.0)).is_some());
        assert_eq!(session.world().count(Label::Ball), 12);
    }

    #[test]
    fn test_strike_then_bounce_back_on_wall_clock() {
        let mut session = GameSession::new(quiet_settings()).unwrap();
        let partition = first_partition(&session);
        let rest = session.world().get(partition).unwrap().position;
        let ball = session.mouse_down(Vec2::new(rest.x, rest.y - 32.0)).unwrap();

        let strikes = session.handle_collision_start(&[CollisionPair::new(partition, ball)]);
        assert_eq!(strikes.len(), 1);
        let p = session.world().get(partition).unwrap();
        assert_eq!(p.position.y, rest.y + 10.0);
        assert_eq!(p.render.fill, Fill::Navy);
        assert!(session.world().get(ball).is_none());
        assert_eq!(session.scoreboard(), vec!["10x"]);

        session.update(ms(100));
        assert_eq!(session.world().get(partition).unwrap().position.y, rest.y + 10.0);
        session.update(ms(100));
        let p = session.world().get(partition).unwrap();
        assert_eq!(p.position, rest);
        assert_eq!(p.render.fill, Fill::Red);
        assert_eq!(session.pending_reverts(), 0);
    }

    #[test]
    fn test_three_hits_keep_last_two() {
        let mut session = GameSession::new(quiet_settings()).unwrap();
        let partitions: Vec<BodyId> = session
            .world()
            .with_label(Label::Partition)
            .map(|b| b.id)
            .take(3)
            .collect();
        for &p in &partitions {
            let ball = session.mouse_down(Vec2::new(400.0, 20.0)).unwrap();
            session.handle_collision_start(&[CollisionPair::new(ball, p)]);
        }
        assert_eq!(session.scoreboard(), vec!["5x", "3.3x"]);
        let labels = session.overlay_labels();
        let points: Vec<_> = labels.iter().filter(|l| l.position.x == 750.0).collect();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].text, "3.3x");
        assert_eq!(points[1].position.y, 100.0);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut session = GameSession::new(quiet_settings()).unwrap();
        let partition = first_partition(&session);
        let ball = session.mouse_down(Vec2::new(400.0, 20.0)).unwrap();
        session.handle_collision_start(&[CollisionPair::new(partition, ball)]);
        assert_eq!(session.pending_reverts(), 1);

        session.teardown();
        assert!(!session.is_live());
        assert!(!session.is_running());
        assert!(session.world().is_empty());
        assert_eq!(session.pending_reverts(), 0);

        // Nothing fires or spawns after teardown
        assert!(session.update(ms(500)).is_empty());
        assert!(session.create_balls(3).is_empty());
        assert!(session.mouse_down(Vec2::ONE).is_none());
        assert!(session.world().is_empty());
        session.teardown();
    }

    #[test]
    fn test_rejects_bad_settings() {
        let settings = Settings {
            rows: -2,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(settings),
            Err(ConfigError::NegativeRows(-2))
        ));
        let settings = Settings {
            rows: 20,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(settings),
            Err(ConfigError::BoardOverflow { .. })
        ));
    }

    fn assert_balls_inside(session: &GameSession) {
        let (min, max) = session.board().interior();
        for ball in session.world().with_label(Label::Ball) {
            let p = ball.position;
            assert!(
                p.x > min.x && p.y > min.y && p.x < max.x && p.y < max.y,
                "ball {} escaped to {p}",
                ball.id
            );
        }
    }

    #[test]
    fn test_free_run_keeps_invariants() {
        let mut session = GameSession::new(Settings::default()).unwrap();
        // Twenty simulated seconds at 60 fps
        for _ in 0..1200 {
            session.update(ms(16));
            assert_balls_inside(&session);
        }
        // Only a partition strike takes a ball out of play
        let balls = session.world().count(Label::Ball);
        assert!(session.total_hits() > 0);
        assert_eq!(session.total_hits() as usize + balls, 5);
        assert!(session.scoreboard().len() <= 2);
        // Static layout never drifts for good
        assert_eq!(session.world().count(Label::Peg), 95);
    }

    #[test]
    fn test_bulk_drop_stays_on_the_board() {
        let mut session = GameSession::new(quiet_settings()).unwrap();
        assert_eq!(session.create_balls(10).len(), 10);
        for _ in 0..600 {
            session.update(ms(16));
            assert_balls_inside(&session);
        }
        assert!(session.total_hits() > 0);
        assert_eq!(
            session.total_hits() as usize + session.world().count(Label::Ball),
            10
        );
    }

    #[test]
    fn test_short_board_rejected() {
        let settings = Settings {
            height: 200.0,
            initial_balls: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(settings),
            Err(ConfigError::BoardTooShort { .. })
        ));
    }

    #[test]
    fn test_zero_rows_session() {
        let settings = Settings {
            rows: 0,
            ..Default::default()
        };
        let session = GameSession::new(settings).unwrap();
        assert_eq!(session.world().len(), 4 + 5);
        assert!(session.overlay_labels().is_empty());
    }
}
