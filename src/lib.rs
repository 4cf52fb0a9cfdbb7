//! Terminal arcade shooter: move the ship, shoot the descending enemies,
//! don't get hit.
//!
//! * `entities` — plain data for the session.
//! * `compute` — the pure per-frame update.
//! * `game` — session ownership, high-score persistence, restarts.
//! * `display` — drawing and terminal presentation.

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod storage;
