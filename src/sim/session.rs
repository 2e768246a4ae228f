//! The session state machine
//!
//! A cooperative, single-threaded controller. Each frame the caller polls
//! input, passes the events plus a monotonic clock reading into `advance`,
//! and then presents a scene snapshot. There is no busy-waiting: the timed
//! release cadence and the inter-wave breather are both measured against the
//! injected clock, so tests drive the machine with a scripted timeline.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::player::{Direction, Player};
use super::wave::{Wave, WaveCounter};
use crate::consts::*;

/// Symbolic game keys, already translated from backend key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Toggle mouse-follow mode (E)
    ToggleMouse,
    /// Reset wave numbering and start a fresh wave (R)
    Restart,
    /// Quit (X)
    Exit,
}

/// One polled input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window close was requested
    Quit,
    KeyDown(GameKey),
    /// Absolute cursor position in window coordinates
    MouseMove(f32, f32),
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Projectiles queued but none released; input and redraw only
    AwaitingStart,
    /// Active gameplay: physics, timed releases, death checks
    Running,
    /// Player hit a projectile; waiting for restart or quit
    PlayerDead,
    /// Wave cleared; breather until `resume_at`
    InterWavePause { resume_at: Duration },
}

/// Outcome of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// A quit command was received; the caller should close the display
    Quit,
}

/// Timing and playfield knobs for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub width: f32,
    pub height: f32,
    /// One waiting projectile is released per elapsed interval
    pub release_interval: Duration,
    /// Breather between a cleared wave and the next one
    pub wave_pause: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            release_interval: RELEASE_INTERVAL,
            wave_pause: WAVE_PAUSE,
        }
    }
}

/// Session controller: owns the player, the current wave, and the phase
/// machine that drives timed releases.
pub struct Session {
    config: SessionConfig,
    rng: Pcg32,
    counter: WaveCounter,
    wave: Wave,
    player: Player,
    phase: Phase,
    mouse_control: bool,
    /// Clock reading of the previous advance, for measured dt
    last_now: Option<Duration>,
    /// Deadline for the next timed release
    next_release: Duration,
}

impl Session {
    /// Create a session with wave 1 queued and nothing released. The game
    /// begins on the first restart command.
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut counter = WaveCounter::new();
        let wave = Wave::new(counter.advance(), &mut rng, config.width, config.height);
        let player = Player::new(config.width, config.height);
        log::info!("session started (seed {seed})");
        Self {
            config,
            rng,
            counter,
            wave,
            player,
            phase: Phase::AwaitingStart,
            mouse_control: false,
            last_now: None,
            next_release: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.wave.number()
    }

    pub fn mouse_control(&self) -> bool {
        self.mouse_control
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Advance the session to `now`, applying `events` first. `now` must be
    /// monotonic across calls.
    pub fn advance(&mut self, now: Duration, events: &[InputEvent]) -> Step {
        for event in events {
            if self.apply_event(event) == Step::Quit {
                return Step::Quit;
            }
        }

        let dt = match self.last_now {
            Some(prev) => now.saturating_sub(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_now = Some(now);

        match self.phase {
            Phase::AwaitingStart => {
                if self.wave.released_count() > 0 {
                    self.phase = Phase::Running;
                    self.next_release = now + self.config.release_interval;
                }
            }
            Phase::Running => self.tick_running(now, dt),
            Phase::PlayerDead => {}
            Phase::InterWavePause { resume_at } => {
                if now >= resume_at {
                    self.start_next_wave();
                    self.phase = Phase::AwaitingStart;
                }
            }
        }

        Step::Continue
    }

    fn tick_running(&mut self, now: Duration, dt: f32) {
        self.wave.on_tick(dt);

        // Timed releases: one projectile per elapsed interval
        while self.wave.waiting_count() > 0 && now >= self.next_release {
            self.wave.release(1);
            self.next_release += self.config.release_interval;
        }

        if self.player.has_died(&self.wave) {
            log::info!("player died on wave {}", self.wave.number());
            self.mouse_control = false;
            self.phase = Phase::PlayerDead;
        } else if self.wave.is_cleared() {
            log::debug!("wave {} cleared", self.wave.number());
            self.phase = Phase::InterWavePause {
                resume_at: now + self.config.wave_pause,
            };
        }
    }

    fn apply_event(&mut self, event: &InputEvent) -> Step {
        let alive = !matches!(self.phase, Phase::PlayerDead);
        match *event {
            InputEvent::Quit => return Step::Quit,
            InputEvent::KeyDown(key) => match key {
                GameKey::Exit => return Step::Quit,
                GameKey::Restart => self.restart(),
                GameKey::ToggleMouse if alive => self.mouse_control = !self.mouse_control,
                GameKey::MoveLeft if alive => self.player.step(Direction::Left, KEY_STEP_SECS),
                GameKey::MoveRight if alive => self.player.step(Direction::Right, KEY_STEP_SECS),
                GameKey::MoveUp if alive => self.player.step(Direction::Up, KEY_STEP_SECS),
                GameKey::MoveDown if alive => self.player.step(Direction::Down, KEY_STEP_SECS),
                _ => {}
            },
            InputEvent::MouseMove(x, y) => {
                if alive && self.mouse_control {
                    self.player.move_to(x, y);
                }
            }
        }
        Step::Continue
    }

    /// Reset wave numbering and begin a fresh wave with one projectile
    /// already released. Cancels any pending breather; the player keeps
    /// their position.
    fn restart(&mut self) {
        self.counter.reset();
        self.start_next_wave();
        self.phase = Phase::AwaitingStart;
    }

    fn start_next_wave(&mut self) {
        let number = self.counter.advance();
        self.wave = Wave::new(number, &mut self.rng, self.config.width, self.config.height);
        self.wave.release(1);
        log::info!("wave {number} started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::Projectile;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::VecDeque;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn key(k: GameKey) -> InputEvent {
        InputEvent::KeyDown(k)
    }

    fn session() -> Session {
        Session::new(SessionConfig::default(), 99)
    }

    /// Session whose wave holds exactly `count` projectiles, the first one
    /// already released
    fn stocked_session(count: usize) -> Session {
        let mut session = session();
        let mut rng = Pcg32::seed_from_u64(5);
        let waiting: VecDeque<_> = (0..count)
            .map(|_| Projectile::spawn(&mut rng, 1, SCREEN_WIDTH, SCREEN_HEIGHT))
            .collect();
        session.wave = Wave {
            number: session.wave.number(),
            waiting,
            released: Vec::new(),
        };
        session.wave.release(1);
        session
    }

    #[test]
    fn new_session_awaits_start_without_ticking() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::AwaitingStart);
        assert_eq!(s.wave_number(), 1);

        s.advance(ms(0), &[]);
        s.advance(ms(500), &[]);
        assert_eq!(s.phase(), Phase::AwaitingStart);
        assert_eq!(s.wave().released_count(), 0);
    }

    #[test]
    fn restart_begins_wave_one_with_one_release() {
        let mut s = session();
        assert_eq!(s.advance(ms(0), &[key(GameKey::Restart)]), Step::Continue);
        assert_eq!(s.wave_number(), 1);
        assert_eq!(s.wave().released_count(), 1);
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn releases_follow_the_cadence() {
        let mut s = stocked_session(5);
        s.advance(ms(0), &[]);
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.wave().released_count(), 1);

        s.advance(ms(100), &[]);
        assert_eq!(s.wave().released_count(), 1);

        s.advance(ms(150), &[]);
        assert_eq!(s.wave().released_count(), 2);

        // Two whole intervals elapsed at once release two projectiles
        s.advance(ms(460), &[]);
        assert_eq!(s.wave().released_count(), 4);

        s.advance(ms(600), &[]);
        assert_eq!(s.wave().released_count(), 5);

        // Nothing left to release
        s.advance(ms(750), &[]);
        assert_eq!(s.wave().released_count(), 5);
        assert_eq!(s.wave().waiting_count(), 0);
    }

    #[test]
    fn death_freezes_play_and_disables_mouse_mode() {
        let mut s = stocked_session(2);
        s.advance(ms(0), &[key(GameKey::ToggleMouse)]);
        assert!(s.mouse_control());

        // Drop the released projectile onto the player
        s.wave.released[0].pos = s.player.pos;
        s.advance(ms(1), &[]);
        assert_eq!(s.phase(), Phase::PlayerDead);
        assert!(!s.mouse_control());

        // Movement and mouse events are ignored while dead
        let pos = s.player.pos;
        s.advance(
            ms(2),
            &[
                key(GameKey::MoveLeft),
                key(GameKey::ToggleMouse),
                InputEvent::MouseMove(100.0, 400.0),
            ],
        );
        assert_eq!(s.player.pos, pos);
        assert!(!s.mouse_control());
        assert_eq!(s.phase(), Phase::PlayerDead);

        // Restart revives the session with a fresh wave 1
        s.advance(ms(3), &[key(GameKey::Restart)]);
        assert_eq!(s.wave_number(), 1);
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn cleared_wave_pauses_then_starts_the_next() {
        let mut s = stocked_session(1);
        s.advance(ms(0), &[]);
        assert_eq!(s.phase(), Phase::Running);

        // Sink the only projectile past the bottom edge
        s.wave.released[0].pos.y = SCREEN_HEIGHT + 20.0;
        s.advance(ms(10), &[]);
        s.advance(ms(20), &[]);
        assert_eq!(
            s.phase(),
            Phase::InterWavePause {
                resume_at: ms(20) + WAVE_PAUSE
            }
        );

        // The breather holds for the configured pause
        s.advance(ms(1000), &[]);
        assert!(matches!(s.phase(), Phase::InterWavePause { .. }));

        s.advance(ms(2520), &[]);
        assert_eq!(s.wave_number(), 2);
        assert!(s.wave().released_count() >= 1);
        assert_eq!(s.phase(), Phase::AwaitingStart);

        s.advance(ms(2530), &[]);
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn restart_cancels_a_pending_breather() {
        let mut s = stocked_session(1);
        s.advance(ms(0), &[]);
        s.wave.released[0].pos.y = SCREEN_HEIGHT + 20.0;
        s.advance(ms(10), &[]);
        s.advance(ms(20), &[]);
        assert!(matches!(s.phase(), Phase::InterWavePause { .. }));

        s.advance(ms(30), &[key(GameKey::Restart)]);
        assert_eq!(s.wave_number(), 1);
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn quit_is_honored_in_every_phase() {
        let mut s = session();
        assert_eq!(s.advance(ms(0), &[InputEvent::Quit]), Step::Quit);

        let mut s = stocked_session(1);
        s.advance(ms(0), &[]);
        assert_eq!(s.advance(ms(1), &[key(GameKey::Exit)]), Step::Quit);
    }

    #[test]
    fn directional_keys_move_the_player_while_alive() {
        let mut s = session();
        let x0 = s.player.pos.x;
        s.advance(ms(0), &[key(GameKey::MoveLeft)]);
        assert!((s.player.pos.x - (x0 - PLAYER_SPEED * KEY_STEP_SECS)).abs() < 1e-4);
    }

    #[test]
    fn mouse_motion_requires_mouse_mode() {
        let mut s = session();
        let pos = s.player.pos;
        s.advance(ms(0), &[InputEvent::MouseMove(100.0, 400.0)]);
        assert_eq!(s.player.pos, pos);

        s.advance(
            ms(1),
            &[
                key(GameKey::ToggleMouse),
                InputEvent::MouseMove(100.0, 400.0),
            ],
        );
        assert_eq!(s.player.pos, Vec2::new(100.0, 400.0));
    }
}
