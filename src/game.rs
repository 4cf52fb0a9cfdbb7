/// The simulation loop's update half.
///
/// `Game` owns the session state, the high-score store and the RNG.  The
/// host calls `advance` once per frame with that frame's key snapshot and
/// renders `state()` afterwards; when the ship is destroyed `advance`
/// returns the notice to show, and `restart` starts a fresh session once
/// the player has acknowledged it.

use rand::Rng;

use crate::compute::{init_state, session_end_notice, tick};
use crate::entities::{GameEvent, GameState, GameStatus, KeySnapshot, Notice};
use crate::storage::{HighScoreStore, KeyValueStore};

pub struct Game<S, R> {
    state: GameState,
    scores: HighScoreStore<S>,
    rng: R,
    /// Sessions started so far, including the current one.
    sessions: u32,
}

impl<S: KeyValueStore, R: Rng> Game<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        let scores = HighScoreStore::new(store);
        let state = init_state(scores.load());
        log::info!("Session 1 started (high score {})", state.high_score);
        Self { state, scores, rng, sessions: 1 }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Advance one frame.  Returns the session-end notice on the frame the
    /// ship is destroyed, `None` otherwise (and on every frame after that
    /// until `restart`).
    pub fn advance(&mut self, keys: &KeySnapshot) -> Option<Notice> {
        if self.state.status == GameStatus::GameOver {
            return None;
        }

        let (next, events) = tick(&self.state, keys, &mut self.rng);
        self.state = next;

        let mut notice = None;
        for event in events {
            match event {
                GameEvent::ProjectileFired => log::trace!("frame {}: fired", self.state.frame),
                GameEvent::EnemySpawned { x, speed } => {
                    log::trace!("frame {}: enemy at x={:.1} speed={}", self.state.frame, x, speed)
                }
                GameEvent::ScoreChanged(score) => log::trace!("score {}", score),
                GameEvent::HighScore(score) => self.scores.save(score),
                GameEvent::ShipDestroyed => notice = Some(self.game_over()),
            }
        }
        notice
    }

    fn game_over(&mut self) -> Notice {
        let notice = session_end_notice(&self.state);
        if let Notice::NewHighScore { score } = notice {
            self.scores.save(score);
        }
        log::info!(
            "Session {} over: score {} after {} frames",
            self.sessions,
            self.state.score,
            self.state.frame
        );
        notice
    }

    /// Discard the session and start a new one.  The high score is read
    /// back from the store, as on a fresh start.
    pub fn restart(&mut self) {
        self.sessions += 1;
        self.state = init_state(self.scores.load());
        log::info!(
            "Session {} started (high score {})",
            self.sessions,
            self.state.high_score
        );
    }
}
