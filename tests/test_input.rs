use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use space_shooter::entities::KeySnapshot;
use space_shooter::input::{is_quit, wait_for_ack, Ack, KeyTracker};

#[test]
fn nothing_held_initially() {
    let keys = KeyTracker::new(4, false);
    assert_eq!(keys.snapshot(10), KeySnapshot::default());
}

#[test]
fn arrows_and_letters_map_to_the_same_controls() {
    let mut keys = KeyTracker::new(4, false);
    keys.record(KeyCode::Left, KeyEventKind::Press, 1);
    keys.record(KeyCode::Char('D'), KeyEventKind::Press, 1);
    keys.record(KeyCode::Char(' '), KeyEventKind::Press, 1);
    assert_eq!(keys.snapshot(1), KeySnapshot { left: true, right: true, fire: true });
}

#[test]
fn release_drops_key_immediately() {
    let mut keys = KeyTracker::new(4, false);
    keys.record(KeyCode::Char('a'), KeyEventKind::Press, 1);
    keys.record(KeyCode::Char('A'), KeyEventKind::Release, 2);
    assert!(!keys.snapshot(2).left);
}

#[test]
fn key_expires_after_hold_window() {
    let mut keys = KeyTracker::new(4, false);
    keys.record(KeyCode::Right, KeyEventKind::Press, 10);
    assert!(keys.snapshot(14).right);
    assert!(!keys.snapshot(15).right);
}

#[test]
fn repeat_refreshes_hold() {
    let mut keys = KeyTracker::new(4, false);
    keys.record(KeyCode::Char(' '), KeyEventKind::Press, 10);
    keys.record(KeyCode::Char(' '), KeyEventKind::Repeat, 13);
    assert!(keys.snapshot(17).fire);
}

#[test]
fn hold_window_scales_with_frame_rate() {
    assert_eq!(KeyTracker::for_fps(30, false).hold_window(), 4);
    assert_eq!(KeyTracker::for_fps(60, false).hold_window(), 8);
    assert_eq!(KeyTracker::for_fps(1, false).hold_window(), 1);
}

#[test]
fn clear_forgets_everything() {
    let mut keys = KeyTracker::new(4, false);
    keys.record(KeyCode::Left, KeyEventKind::Press, 1);
    keys.clear();
    assert!(!keys.snapshot(1).left);
}

#[test]
fn release_reporting_terminal_keeps_key_until_release() {
    // After the first press nothing arrives until the OS repeat delay
    let mut keys = KeyTracker::for_fps(60, true);
    keys.record(KeyCode::Char(' '), KeyEventKind::Press, 1);
    assert!((1..=40).all(|frame| keys.snapshot(frame).fire));

    keys.record(KeyCode::Char(' '), KeyEventKind::Release, 41);
    assert!(!keys.snapshot(41).fire);
}

#[test]
fn first_release_switches_to_release_tracking() {
    let mut keys = KeyTracker::new(4, false);
    keys.record(KeyCode::Left, KeyEventKind::Press, 1);
    keys.record(KeyCode::Left, KeyEventKind::Release, 2);
    assert!(keys.reports_release());

    keys.record(KeyCode::Right, KeyEventKind::Press, 3);
    assert!(keys.snapshot(30).right);
}

// ── session-end acknowledgement ───────────────────────────────────────────────

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn ack_keeps_latest_resize() {
    let (tx, rx) = mpsc::channel();
    tx.send(Event::Resize(120, 50)).unwrap();
    tx.send(press(KeyCode::Char(' '))).unwrap();
    tx.send(Event::Resize(100, 40)).unwrap();
    tx.send(press(KeyCode::Enter)).unwrap();

    let mut size = (80, 24);
    assert_eq!(wait_for_ack(&rx, &mut size), Ack::PlayAgain);
    assert_eq!(size, (100, 40));
}

#[test]
fn ack_quits_on_quit_key_or_closed_channel() {
    let (tx, rx) = mpsc::channel();
    tx.send(press(KeyCode::Esc)).unwrap();
    let mut size = (80, 24);
    assert_eq!(wait_for_ack(&rx, &mut size), Ack::Quit);

    drop(tx);
    assert_eq!(wait_for_ack(&rx, &mut size), Ack::Quit);
    assert_eq!(size, (80, 24));
}

#[test]
fn quit_keys() {
    assert!(is_quit(KeyCode::Char('q'), KeyModifiers::NONE));
    assert!(is_quit(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(!is_quit(KeyCode::Char('c'), KeyModifiers::NONE));
    assert!(!is_quit(KeyCode::Enter, KeyModifiers::NONE));
}
