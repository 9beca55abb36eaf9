//! # hexwheel
//!
//! Core of an interactive hex color picker: a user enters or selects a
//! six-digit hex color, the session tracks it as the current background,
//! derived color-space representations arrive from a remote lookup, and
//! favorite/history colors persist locally.
//!
//! This crate provides:
//! - Validated [`HexColor`] values and the transient keypad input model
//! - A gradient [`ColorWheel`] with O(1) drag-to-pick hit-testing
//! - A bounded, deduplicated recent-color [`History`]
//! - SQLite favorites and a JSON preference file, injected as explicit
//!   dependencies
//! - A [`Session`] that owns all mutable state, publishes snapshots to
//!   observers, and fans persistence and lookups out to background tasks
//!
//! ## Example
//!
//! ```no_run
//! use hexwheel::{FavoriteStore, LookupClient, PreferenceStore, Session};
//!
//! # #[tokio::main]
//! # async fn main() -> hexwheel::Result<()> {
//! let favorites = FavoriteStore::open("colors.db").await?;
//! let prefs = PreferenceStore::new("prefs.json");
//! let lookup = LookupClient::new()?;
//!
//! let mut session = Session::new(favorites, prefs, lookup).await?;
//! let mut states = session.subscribe();
//!
//! for digit in "ff8000".chars() {
//!     session.push_digit(digit);
//! }
//! assert_eq!(states.borrow_and_update().background.to_string(), "FF8000");
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod constants;
pub mod error;
pub mod history;
pub mod lookup;
pub mod session;
pub mod store;

pub use color::{ColorWheel, HexColor, HexInput, WheelCache};
pub use error::{PickerError, Result};
pub use history::History;
pub use lookup::{ColorDetails, LookupClient};
pub use session::{AppState, Session, SessionUpdate, Surface};
pub use store::{sort_by_hue, DisplayToggles, FavoriteColor, FavoriteStore, PreferenceStore, Preferences};
