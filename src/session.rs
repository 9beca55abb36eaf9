//! Interactive session state and async fan-out
//!
//! The [`Session`] owns the one mutable copy of the application state:
//! keypad input, the committed background color, enrichment details,
//! history, the favorites view, and the display toggles. All mutation
//! happens through its methods, either from user input or by applying a
//! completed [`SessionUpdate`]; observers receive immutable [`AppState`]
//! snapshots over a watch channel.
//!
//! Persistence writes and remote lookups are fire-and-forget tasks with no
//! ordering guarantee between them. Their results come back through an
//! unbounded update channel and are applied by the single writer, so no
//! lock protects the state.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::color::{HexColor, HexInput, WheelCache};
use crate::history::History;
use crate::lookup::{ColorDetails, LookupClient};
use crate::store::{
    sort_by_hue, DisplayToggles, FavoriteColor, FavoriteStore, PreferenceStore, Preferences,
};
use crate::Result;

/// Immutable snapshot of the session state, published to observers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Keypad digits, zero to six characters
    pub input: String,
    /// Committed background color; black while input is incomplete
    pub background: HexColor,
    /// Remote enrichment for the background color, when available
    pub details: Option<ColorDetails>,
    /// Recent colors, most recent first
    pub history: Vec<HexColor>,
    /// Saved colors, hue-sorted for display
    pub favorites: Vec<FavoriteColor>,
    pub display: DisplayToggles,
    /// Whether a wheel drag is in progress
    pub picking: bool,
}

/// Completed result of a background task, applied by the session
#[derive(Debug)]
pub enum SessionUpdate {
    /// A remote lookup finished; `details` is `None` when the lookup
    /// failed or returned nothing usable
    Details {
        color: HexColor,
        details: Option<ColorDetails>,
    },
    /// The favorites table changed; the refreshed, hue-sorted list
    Favorites(Vec<FavoriteColor>),
}

/// Display surfaces with an individual 3D toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Keypad,
    TopBar,
    Sheet,
    Drawer,
    Settings,
}

/// Interactive picker session
///
/// Construct with explicitly built dependencies; nothing here reaches for
/// process-wide singletons.
pub struct Session {
    input: HexInput,
    background: HexColor,
    details: Option<ColorDetails>,
    history: History,
    favorites_view: Vec<FavoriteColor>,
    display: DisplayToggles,
    picking: bool,
    wheel: WheelCache,

    favorites: Arc<FavoriteStore>,
    prefs: PreferenceStore,
    prefs_version: u64,
    lookup: Arc<LookupClient>,

    tasks: JoinSet<()>,
    updates_tx: mpsc::UnboundedSender<SessionUpdate>,
    updates_rx: mpsc::UnboundedReceiver<SessionUpdate>,
    state_tx: watch::Sender<AppState>,
}

impl Session {
    /// Start a session from its injected dependencies
    ///
    /// Loads preferences and the favorites list up front so the first
    /// published snapshot is complete.
    pub async fn new(
        favorites: FavoriteStore,
        prefs: PreferenceStore,
        lookup: LookupClient,
    ) -> Result<Self> {
        let preferences = prefs.load()?;
        let history = History::from_set(&preferences.history);

        let mut favorites_view = favorites.all().await?;
        sort_by_hue(&mut favorites_view);

        let initial = AppState {
            input: String::new(),
            background: HexColor::BLACK,
            details: None,
            history: history.entries().to_vec(),
            favorites: favorites_view.clone(),
            display: preferences.display,
            picking: false,
        };
        let (state_tx, _) = watch::channel(initial);
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();

        Ok(Self {
            input: HexInput::new(),
            background: HexColor::BLACK,
            details: None,
            history,
            favorites_view,
            display: preferences.display,
            picking: false,
            wheel: WheelCache::new(),
            favorites: Arc::new(favorites),
            prefs,
            prefs_version: 0,
            lookup: Arc::new(lookup),
            tasks: JoinSet::new(),
            updates_tx,
            updates_rx,
            state_tx,
        })
    }

    /// Subscribe to state snapshots; one is published after every change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state_tx.subscribe()
    }

    /// Current state snapshot
    pub fn state(&self) -> AppState {
        self.snapshot()
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    pub fn details(&self) -> Option<&ColorDetails> {
        self.details.as_ref()
    }

    pub fn is_picking(&self) -> bool {
        self.picking
    }

    /// Black or white, whichever reads against the current background
    pub fn contrast_color(&self) -> HexColor {
        self.background.readable_text_color()
    }

    // --- keypad -----------------------------------------------------------

    /// Append a hex digit; the sixth digit commits the color
    pub fn push_digit(&mut self, digit: char) {
        if self.input.push_digit(digit) {
            self.input_changed();
        }
    }

    /// Delete the most recent digit
    pub fn backspace(&mut self) {
        self.input.backspace();
        self.input_changed();
    }

    /// Clear the keypad input
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_changed();
    }

    /// Select a complete color, as from history, favorites, or a share
    pub fn set_color(&mut self, color: HexColor) {
        self.input.set_color(color);
        self.input_changed();
    }

    /// Select a uniformly random color
    pub fn random_color(&mut self) {
        let color = HexColor::random(&mut rand::thread_rng());
        self.set_color(color);
    }

    fn input_changed(&mut self) {
        match self.input.complete() {
            Some(color) => self.commit(color),
            None => {
                // Incomplete input renders as plain black, with no stale
                // enrichment attached
                if self.background != HexColor::BLACK {
                    self.background = HexColor::BLACK;
                    self.details = None;
                }
            }
        }
        self.publish();
    }

    fn commit(&mut self, color: HexColor) {
        if self.background != color {
            self.background = color;
            self.details = None;
        }

        // During a wheel drag, history and lookup wait for the gesture to
        // finish; intermediate colors are display-only
        if self.picking {
            return;
        }

        self.spawn_lookup(color);
        if self.history.record(color) {
            self.persist_preferences();
        }
    }

    // --- color wheel ------------------------------------------------------

    /// Begin a drag-to-pick gesture
    pub fn begin_picking(&mut self) {
        self.picking = true;
        self.publish();
    }

    /// Sample the wheel at a pointer position during a gesture
    ///
    /// A valid sample becomes the current color; an invalid one (outside
    /// the disc or the image) returns `None` and leaves the previous
    /// selection untouched, so a drag can cross the rim without the
    /// selection flickering.
    pub fn wheel_sample(&mut self, diameter: u32, x: f32, y: f32) -> Option<HexColor> {
        let sampled = self.wheel.wheel(diameter).color_for_position(x, y);
        if let Some(color) = sampled {
            self.set_color(color);
        }
        sampled
    }

    /// Finish the gesture: the final color joins history and is enriched
    pub fn end_picking(&mut self) {
        self.picking = false;
        if let Some(color) = self.input.complete() {
            self.spawn_lookup(color);
            if self.history.record(color) {
                self.persist_preferences();
            }
        }
        self.publish();
    }

    // --- favorites --------------------------------------------------------

    /// Save the current color, or unsave it if already saved
    ///
    /// No-op while the input is incomplete: only whole colors are ever
    /// persisted.
    pub fn toggle_favorite(&mut self) {
        let Some(color) = self.input.complete() else {
            debug!("ignoring favorite toggle for incomplete input");
            return;
        };

        let favorites = Arc::clone(&self.favorites);
        let tx = self.updates_tx.clone();
        self.tasks.spawn(async move {
            let result = async {
                if favorites.contains(color).await? {
                    favorites.remove(color).await?;
                } else {
                    favorites.insert(color).await?;
                }
                favorites.all().await
            }
            .await;

            match result {
                Ok(mut list) => {
                    sort_by_hue(&mut list);
                    let _ = tx.send(SessionUpdate::Favorites(list));
                }
                Err(error) => warn!(%color, %error, "favorite toggle failed"),
            }
        });
    }

    /// Delete a saved color
    pub fn remove_favorite(&mut self, color: HexColor) {
        let favorites = Arc::clone(&self.favorites);
        let tx = self.updates_tx.clone();
        self.tasks.spawn(async move {
            let result = async {
                favorites.remove(color).await?;
                favorites.all().await
            }
            .await;

            match result {
                Ok(mut list) => {
                    sort_by_hue(&mut list);
                    let _ = tx.send(SessionUpdate::Favorites(list));
                }
                Err(error) => warn!(%color, %error, "favorite removal failed"),
            }
        });
    }

    // --- display toggles --------------------------------------------------

    pub fn set_use_3d(&mut self, enabled: bool) {
        self.display.use_3d = enabled;
        self.persist_preferences();
        self.publish();
    }

    pub fn set_surface_3d(&mut self, surface: Surface, enabled: bool) {
        match surface {
            Surface::Keypad => self.display.keypad_3d = enabled,
            Surface::TopBar => self.display.topbar_3d = enabled,
            Surface::Sheet => self.display.sheet_3d = enabled,
            Surface::Drawer => self.display.drawer_3d = enabled,
            Surface::Settings => self.display.settings_3d = enabled,
        }
        self.persist_preferences();
        self.publish();
    }

    pub fn set_all_surfaces_3d(&mut self, enabled: bool) {
        self.display.set_all_surfaces(enabled);
        self.persist_preferences();
        self.publish();
    }

    // --- async results ----------------------------------------------------

    /// Apply one completed background result
    ///
    /// A lookup for a color that is no longer the background is dropped;
    /// the enrichment on display always matches the committed color.
    pub fn apply_update(&mut self, update: SessionUpdate) {
        match update {
            SessionUpdate::Details { color, details } => {
                if color == self.background {
                    self.details = details;
                } else {
                    debug!(%color, "dropping stale lookup result");
                }
            }
            SessionUpdate::Favorites(list) => self.favorites_view = list,
        }
        self.publish();
    }

    /// Apply every update that has already completed, without waiting
    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply_update(update);
        }
    }

    /// Wait for the next completed background result
    ///
    /// Blocks until a task finishes; event loops should race this against
    /// user input rather than awaiting it bare.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        self.updates_rx.recv().await
    }

    /// Wait for all in-flight background tasks and apply their results
    pub async fn flush(&mut self) {
        while self.tasks.join_next().await.is_some() {}
        self.drain_updates();
    }

    // --- internals --------------------------------------------------------

    fn spawn_lookup(&mut self, color: HexColor) {
        let lookup = Arc::clone(&self.lookup);
        let tx = self.updates_tx.clone();
        self.tasks.spawn(async move {
            let details = lookup.fetch(color).await;
            let _ = tx.send(SessionUpdate::Details { color, details });
        });
    }

    fn persist_preferences(&mut self) {
        // Writes race on the blocking pool; the store's version guard
        // keeps a slow older write from clobbering a newer document
        self.prefs_version += 1;
        let version = self.prefs_version;
        let prefs = self.prefs.clone();
        let document = Preferences {
            display: self.display,
            history: self.history.to_set(),
        };
        self.tasks.spawn(async move {
            match tokio::task::spawn_blocking(move || prefs.save_if_newer(version, &document)).await
            {
                Ok(Ok(_)) => {}
                Ok(Err(error)) => warn!(%error, "failed to persist preferences"),
                Err(error) => warn!(%error, "preference write task failed"),
            }
        });
    }

    fn snapshot(&self) -> AppState {
        AppState {
            input: self.input.as_str().to_string(),
            background: self.background,
            details: self.details.clone(),
            history: self.history.entries().to_vec(),
            favorites: self.favorites_view.clone(),
            display: self.display,
            picking: self.picking,
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.state_tx.send_replace(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn session(dir: &TempDir) -> Session {
        let favorites = FavoriteStore::open_in_memory().await.unwrap();
        let prefs = PreferenceStore::new(dir.path().join("prefs.json"));
        // Unreachable endpoint: lookups resolve quickly to None
        let lookup = LookupClient::with_base_url("http://127.0.0.1:9").unwrap();
        Session::new(favorites, prefs, lookup).await.unwrap()
    }

    #[tokio::test]
    async fn test_incomplete_input_renders_black() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;

        session.push_digit('F');
        session.push_digit('F');
        assert_eq!(session.background(), HexColor::BLACK);
        assert_eq!(session.state().input, "FF");
    }

    #[tokio::test]
    async fn test_favorite_toggle_requires_complete_input() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;

        session.push_digit('1');
        session.toggle_favorite();
        session.flush().await;

        assert!(session.state().favorites.is_empty());
    }

    #[tokio::test]
    async fn test_contrast_color_tracks_background() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir).await;

        assert_eq!(session.contrast_color(), HexColor::WHITE);
        session.set_color(HexColor::parse("FFFFFF").unwrap());
        assert_eq!(session.contrast_color(), HexColor::BLACK);
    }
}
