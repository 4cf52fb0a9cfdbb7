/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, the frame's key snapshot and an RNG
/// handle) and returns a brand-new `GameState`.  Side effects are limited
/// to the injected RNG; anything the host must do (persist, notify) is
/// reported back as `GameEvent`s.

use rand::Rng;

use crate::entities::{
    Enemy, GameEvent, GameState, GameStatus, KeySnapshot, Notice, Projectile, Rect, Ship,
    CANVAS_HEIGHT, CANVAS_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH, PROJECTILE_HEIGHT,
    PROJECTILE_SPEED, PROJECTILE_WIDTH, SHIP_BOTTOM_OFFSET, SHIP_SPEED, SHIP_WIDTH,
};

// ── Timing & scoring ─────────────────────────────────────────────────────────

/// Frames between shots while fire is held.
pub const FIRE_INTERVAL: u64 = 10;

/// Frames between enemy spawns.
pub const SPAWN_INTERVAL: u64 = 60;

pub const BASE_ENEMY_SPEED: f32 = 2.0;

/// Enemies spawned after every this-many points fall one unit faster.
pub const SCORE_PER_SPEED_STEP: u32 = 50;

/// Score awarded per enemy destroyed.
pub const KILL_REWARD: u32 = 10;

/// Speed given to an enemy spawned at `score`.
pub fn enemy_speed(score: u32) -> f32 {
    BASE_ENEMY_SPEED + (score / SCORE_PER_SPEED_STEP) as f32
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Strict rectangle overlap: rectangles that only share an edge do not
/// collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session.  Only the high score carries over.
pub fn init_state(high_score: u32) -> GameState {
    GameState {
        ship: Ship {
            x: CANVAS_WIDTH / 2.0,
            y: CANVAS_HEIGHT - SHIP_BOTTOM_OFFSET,
        },
        projectiles: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        high_score,
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_ship_left(state: &GameState) -> GameState {
    let new_x = (state.ship.x - SHIP_SPEED).max(0.0);
    GameState {
        ship: Ship { x: new_x, ..state.ship.clone() },
        ..state.clone()
    }
}

pub fn move_ship_right(state: &GameState) -> GameState {
    let new_x = (state.ship.x + SHIP_SPEED).min(CANVAS_WIDTH - SHIP_WIDTH);
    GameState {
        ship: Ship { x: new_x, ..state.ship.clone() },
        ..state.clone()
    }
}

/// Fire a projectile centred on the ship's top edge.  Fire-rate gating is
/// the caller's job (see `tick`).
pub fn ship_fire(state: &GameState) -> GameState {
    let projectile = Projectile {
        x: state.ship.x + SHIP_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0,
        y: state.ship.y,
    };
    let mut projectiles = state.projectiles.clone();
    projectiles.push(projectile);
    GameState { projectiles, ..state.clone() }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the session by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Frame 0 is a fire and spawn tick, like every other multiple of the
/// respective interval.  A finished session is returned unchanged.
pub fn tick(
    state: &GameState,
    keys: &KeySnapshot,
    rng: &mut impl Rng,
) -> (GameState, Vec<GameEvent>) {
    if state.status == GameStatus::GameOver {
        return (state.clone(), Vec::new());
    }

    let mut events = Vec::new();

    // ── 1. Move ship (both directions may apply) ─────────────────────────────
    let mut next = state.clone();
    if keys.left {
        next = move_ship_left(&next);
    }
    if keys.right {
        next = move_ship_right(&next);
    }

    // ── 2. Fire on the interval ──────────────────────────────────────────────
    if keys.fire && state.frame % FIRE_INTERVAL == 0 {
        next = ship_fire(&next);
        events.push(GameEvent::ProjectileFired);
    }

    // ── 3. Move projectiles, drop the ones past the top ──────────────────────
    let mut projectiles: Vec<Projectile> = next
        .projectiles
        .iter()
        .map(|p| Projectile { y: p.y - PROJECTILE_SPEED, ..p.clone() })
        .filter(|p| p.y > -PROJECTILE_HEIGHT)
        .collect();

    // ── 4. Spawn a new enemy ─────────────────────────────────────────────────
    let mut spawned = Vec::new();
    if state.frame % SPAWN_INTERVAL == 0 {
        let x = rng.gen_range(0.0..=CANVAS_WIDTH - ENEMY_WIDTH);
        let speed = enemy_speed(next.score);
        spawned.push(Enemy { x, y: -ENEMY_HEIGHT, speed });
        events.push(GameEvent::EnemySpawned { x, speed });
    }

    // ── 5. Move enemies and resolve hits ─────────────────────────────────────
    let ship_rect = next.ship.rect();
    let mut score = next.score;
    let mut high_score = next.high_score;
    let mut status = GameStatus::Playing;
    let mut enemies = Vec::with_capacity(next.enemies.len() + spawned.len());

    for enemy in next.enemies.iter().chain(spawned.iter()) {
        let enemy = Enemy { y: enemy.y + enemy.speed, ..enemy.clone() };
        let rect = enemy.rect();

        // First overlapping projectile takes the enemy down with it
        if let Some(hit) = projectiles.iter().position(|p| overlaps(&p.rect(), &rect)) {
            projectiles.remove(hit);
            score += KILL_REWARD;
            events.push(GameEvent::ScoreChanged(score));
            if score > high_score {
                high_score = score;
                events.push(GameEvent::HighScore(high_score));
            }
            continue;
        }

        if overlaps(&rect, &ship_rect) {
            if status == GameStatus::Playing {
                status = GameStatus::GameOver;
                events.push(GameEvent::ShipDestroyed);
            }
            continue;
        }

        if enemy.y < CANVAS_HEIGHT {
            enemies.push(enemy);
        }
    }

    // ── 6. Advance the frame counter ─────────────────────────────────────────
    let state = GameState {
        projectiles,
        enemies,
        score,
        high_score,
        status,
        frame: state.frame + 1,
        ..next
    };
    (state, events)
}

// ── Session end ──────────────────────────────────────────────────────────────

/// The notice to show once the ship is destroyed.  The comparison is
/// against the live high score, which `tick` already raises with every
/// kill; a record set during play therefore reads as a plain game over
/// showing score and high score equal.
pub fn session_end_notice(state: &GameState) -> Notice {
    if state.score > state.high_score {
        Notice::NewHighScore { score: state.score }
    } else {
        Notice::GameOver { score: state.score, high_score: state.high_score }
    }
}
