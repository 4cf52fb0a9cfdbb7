/// All game entity types — pure data, no logic.

// ── Canvas & entity dimensions ────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const SHIP_WIDTH: f32 = 40.0;
pub const SHIP_HEIGHT: f32 = 40.0;
pub const SHIP_SPEED: f32 = 5.0;
/// Distance from the ship's top edge to the bottom of the canvas.
pub const SHIP_BOTTOM_OFFSET: f32 = 50.0;

pub const PROJECTILE_WIDTH: f32 = 4.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;
pub const PROJECTILE_SPEED: f32 = 7.0;

pub const ENEMY_WIDTH: f32 = 30.0;
pub const ENEMY_HEIGHT: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Axis-aligned rectangle in canvas coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    /// Fixed once the session starts.
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Downward speed, fixed at spawn time from the score.
    pub speed: f32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
}

impl Ship {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: SHIP_WIDTH, height: SHIP_HEIGHT }
    }
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: ENEMY_WIDTH, height: ENEMY_HEIGHT }
    }
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: PROJECTILE_WIDTH, height: PROJECTILE_HEIGHT }
    }
}

// ── Frame input ───────────────────────────────────────────────────────────────

/// Which controls are held for the frame being advanced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Frame output ──────────────────────────────────────────────────────────────

/// Things that happened during one frame that the host loop has to act on
/// (persistence, HUD refresh, the session-end notice).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ProjectileFired,
    EnemySpawned { x: f32, speed: f32 },
    /// An enemy was destroyed; carries the new score.
    ScoreChanged(u32),
    /// The score passed the high score; carries the new high score.
    HighScore(u32),
    ShipDestroyed,
}

/// Text shown in the blocking session-end dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NewHighScore { score: u32 },
    GameOver { score: u32, high_score: u32 },
}

impl Notice {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Notice::NewHighScore { score } => {
                vec![format!("New High Score: {}!", score), "Game Over!".to_string()]
            }
            Notice::GameOver { score, high_score } => vec![
                format!("Game Over! Score: {}", score),
                format!("High Score: {}", high_score),
            ],
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// The highest score seen so far (updated live during play).
    pub high_score: u32,
    pub status: GameStatus,
    pub frame: u64,
}
