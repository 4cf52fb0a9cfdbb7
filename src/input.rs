/// Held-key tracking.
///
/// Key events arrive asynchronously from the reader thread; the frame loop
/// folds them in here and then takes a `KeySnapshot` so the frame step only
/// ever sees a fixed view of the controls.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after the hold window of silence,
///   which is shorter than the OS repeat interval, so a key stays live
///   while it is actively generating repeats.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::KeySnapshot;

/// Hold window, in seconds, after the last press/repeat of a key.
/// The OS key-repeat rate is ≥ 15 Hz, so this is always refreshed in time.
const HOLD_SECONDS: f64 = 0.133;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    hold_window: u64,
    /// The terminal sends `Release` events, so keys never expire on their own.
    reports_release: bool,
}

impl KeyTracker {
    pub fn new(hold_window: u64, reports_release: bool) -> Self {
        Self { key_frame: HashMap::new(), hold_window, reports_release }
    }

    /// Tracker whose hold window matches `fps` frames per second.
    pub fn for_fps(fps: u32, reports_release: bool) -> Self {
        let window = (f64::from(fps) * HOLD_SECONDS).ceil() as u64;
        Self::new(window.max(1), reports_release)
    }

    pub fn hold_window(&self) -> u64 {
        self.hold_window
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    /// Record one key event seen during `frame`.
    pub fn record(&mut self, code: KeyCode, kind: KeyEventKind, frame: u64) {
        let code = normalize(code);
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                // A release proves the terminal reports them, whatever setup said
                self.reports_release = true;
                self.key_frame.remove(&code);
            }
        }
    }

    /// Returns true if `key` is down: until its release when the terminal
    /// reports releases, otherwise while it was seen within the hold window.
    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&normalize(key))
            .map(|&last| self.reports_release || frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    pub fn snapshot(&self, frame: u64) -> KeySnapshot {
        KeySnapshot {
            left: self.is_held(KeyCode::Left, frame) || self.is_held(KeyCode::Char('a'), frame),
            right: self.is_held(KeyCode::Right, frame) || self.is_held(KeyCode::Char('d'), frame),
            fire: self.is_held(KeyCode::Char(' '), frame),
        }
    }

    pub fn clear(&mut self) {
        self.key_frame.clear();
    }
}

/// Folds letter case so `A` and `a` are the same key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ── Keys outside the game controls ────────────────────────────────────────────

pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// How the player answered the session-end notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ack {
    PlayAgain,
    Quit,
}

/// Block until the player acknowledges the session-end notice.
///
/// Resizes that arrive meanwhile are folded into `size`, so the caller can
/// rebuild its canvas at the terminal's current dimensions.
pub fn wait_for_ack(rx: &Receiver<Event>, size: &mut (u16, u16)) -> Ack {
    while let Ok(ev) = rx.recv() {
        match ev {
            Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                if is_quit(code, modifiers) {
                    return Ack::Quit;
                }
                if code == KeyCode::Enter {
                    return Ack::PlayAgain;
                }
            }
            Event::Resize(w, h) => *size = (w, h),
            _ => {}
        }
    }
    // Reader thread gone → nothing more can arrive
    Ack::Quit
}
