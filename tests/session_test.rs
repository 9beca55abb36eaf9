//! Integration tests for the interactive session
//!
//! These exercise the full orchestration path: keypad input committing a
//! color, history bounding and persistence, the wheel drag contract,
//! favorite toggling through the database, and stale lookup handling.
//! Lookups point at an unreachable endpoint so every fetch degrades to
//! "no enrichment" quickly and deterministically.

use hexwheel::{
    FavoriteStore, HexColor, LookupClient, PreferenceStore, Session, SessionUpdate,
};
use tempfile::TempDir;

const WHEEL_DIAMETER: u32 = 255;

fn hex(s: &str) -> HexColor {
    HexColor::parse(s).unwrap()
}

fn prefs_store(dir: &TempDir) -> PreferenceStore {
    PreferenceStore::new(dir.path().join("prefs.json"))
}

async fn new_session(dir: &TempDir) -> Session {
    let favorites = FavoriteStore::open_in_memory().await.unwrap();
    let lookup = LookupClient::with_base_url("http://127.0.0.1:9").unwrap();
    Session::new(favorites, prefs_store(dir), lookup)
        .await
        .unwrap()
}

// ============================================================================
// Keypad commit flow
// ============================================================================

#[tokio::test]
async fn test_sixth_digit_commits_and_publishes() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;
    let mut states = session.subscribe();

    for digit in "ff8000".chars() {
        session.push_digit(digit);
    }

    let state = states.borrow_and_update().clone();
    assert_eq!(state.background, hex("FF8000"));
    assert_eq!(state.input, "FF8000");
    assert_eq!(state.history, vec![hex("FF8000")]);
}

#[tokio::test]
async fn test_backspace_uncommits_to_black() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    session.set_color(hex("FF8000"));
    session.backspace();

    let state = session.state();
    assert_eq!(state.input, "FF800");
    assert_eq!(state.background, HexColor::BLACK);
    assert!(state.details.is_none());
    // The committed color stays in history even while input is partial
    assert_eq!(state.history, vec![hex("FF8000")]);
}

// ============================================================================
// History bounding, dedup, persistence
// ============================================================================

#[tokio::test]
async fn test_history_is_bounded_and_deduplicated() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    for raw in ["111111", "222222", "333333", "444444", "555555", "666666"] {
        session.set_color(hex(raw));
    }

    let state = session.state();
    assert_eq!(state.history.len(), 5);
    assert_eq!(state.history[0], hex("666666"));
    assert!(!state.history.contains(&hex("111111")));

    // Re-selecting a present color changes nothing
    session.set_color(hex("333333"));
    assert_eq!(session.state().history, state.history);
}

#[tokio::test]
async fn test_history_survives_restart_via_preference_file() {
    let dir = TempDir::new().unwrap();

    let mut session = new_session(&dir).await;
    session.set_color(hex("AB12CD"));
    session.flush().await;

    // The preference document on disk holds the color as a set entry
    let stored = prefs_store(&dir).load().unwrap();
    assert!(stored.history.contains("AB12CD"));

    // A fresh session over the same file restores it
    let restarted = new_session(&dir).await;
    assert!(restarted.state().history.contains(&hex("AB12CD")));
}

// ============================================================================
// Wheel drag contract
// ============================================================================

#[tokio::test]
async fn test_drag_updates_only_on_valid_samples() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;
    let center = WHEEL_DIAMETER as f32 / 2.0;

    session.begin_picking();
    assert!(session.state().picking);

    // Pointer-down inside the disc selects immediately
    let picked = session.wheel_sample(WHEEL_DIAMETER, 200.0, center);
    let picked = picked.expect("sample inside the disc");
    assert_eq!(session.background(), picked);

    // Dragging off the disc and off the image returns no color and must
    // not reset the selection
    assert!(session
        .wheel_sample(WHEEL_DIAMETER, 1.0, 1.0)
        .is_none());
    assert!(session
        .wheel_sample(WHEEL_DIAMETER, 5000.0, center)
        .is_none());
    assert_eq!(session.background(), picked);

    session.end_picking();
    assert!(!session.state().picking);
}

#[tokio::test]
async fn test_drag_intermediates_stay_out_of_history() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;
    let center = WHEEL_DIAMETER as f32 / 2.0;

    session.begin_picking();
    session.wheel_sample(WHEEL_DIAMETER, 200.0, center);
    session.wheel_sample(WHEEL_DIAMETER, 180.0, 100.0);
    session.wheel_sample(WHEEL_DIAMETER, 60.0, center);
    assert!(session.state().history.is_empty());

    session.end_picking();

    // Only the final color of the gesture is recorded
    let state = session.state();
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0], state.background);
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_toggle_favorite_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    session.set_color(hex("3366CC"));
    session.toggle_favorite();
    session.flush().await;
    let favorites = session.state().favorites;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].hex, hex("3366CC"));

    // Toggling again unsaves
    session.toggle_favorite();
    session.flush().await;
    assert!(session.state().favorites.is_empty());
}

#[tokio::test]
async fn test_favorites_view_is_hue_sorted() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    for raw in ["0000FF", "FF0000", "00FF00"] {
        session.set_color(hex(raw));
        session.toggle_favorite();
        // Each refreshed list lands before the next toggle, so the last
        // applied update reflects all three rows
        session.flush().await;
    }

    let hexes: Vec<String> = session
        .state()
        .favorites
        .iter()
        .map(|f| f.hex.to_string())
        .collect();
    assert_eq!(hexes, ["FF0000", "00FF00", "0000FF"]);
}

#[tokio::test]
async fn test_remove_favorite() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    session.set_color(hex("3366CC"));
    session.toggle_favorite();
    session.flush().await;

    session.remove_favorite(hex("3366CC"));
    session.flush().await;
    assert!(session.state().favorites.is_empty());
}

// ============================================================================
// Lookup results
// ============================================================================

#[tokio::test]
async fn test_unreachable_lookup_leaves_base_state_intact() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    session.set_color(hex("FF8000"));
    session.flush().await;

    let state = session.state();
    assert_eq!(state.background, hex("FF8000"));
    assert!(state.details.is_none());
    assert_eq!(state.history, vec![hex("FF8000")]);
}

#[tokio::test]
async fn test_stale_lookup_result_is_dropped() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    session.set_color(hex("FF8000"));
    session.set_color(hex("112233"));

    // A late-arriving result for the superseded color must not attach to
    // the current one
    session.apply_update(SessionUpdate::Details {
        color: hex("FF8000"),
        details: Some(hexwheel::ColorDetails::default()),
    });
    assert!(session.state().details.is_none());

    // A result for the committed color does apply
    session.apply_update(SessionUpdate::Details {
        color: hex("112233"),
        details: Some(hexwheel::ColorDetails::default()),
    });
    assert!(session.state().details.is_some());
}

// ============================================================================
// Display toggles
// ============================================================================

#[tokio::test]
async fn test_display_toggles_persist_across_sessions() {
    let dir = TempDir::new().unwrap();

    let mut session = new_session(&dir).await;
    session.set_use_3d(true);
    session.set_all_surfaces_3d(true);
    session.set_surface_3d(hexwheel::Surface::Drawer, false);
    session.flush().await;

    let restarted = new_session(&dir).await;
    let display = restarted.state().display;
    assert!(display.use_3d);
    assert!(display.keypad_3d);
    assert!(!display.drawer_3d);
}
