#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Folio Theme
//!
//! Pre-paint theme resolution and preference persistence for the folio
//! reader.
//!
//! The subsystem decides, before anything is painted, whether the root
//! surface renders light or dark, and keeps that decision consistent from
//! the synchronous bootstrap through the live session. It reconciles three
//! independent signals: the user's persisted explicit choice, the cached
//! last-resolved theme, and the host's live light/dark preference.
//!
//! - [`choice`]: the enumerated values and the single [`choice::resolve`]
//!   mapping used everywhere.
//! - [`store`]: durable key-value persistence; treated as optional.
//! - [`oracle`]: the host's light/dark signal, queryable and observable.
//! - [`surface`]: the single owned visual root with its narrow write path.
//! - [`bootstrap`]: the synchronous pre-paint routine.
//! - [`provider`]: the runtime owner of theme state after mount.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use folio_theme::prelude::*;
//!
//! let store: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
//! let oracle: Arc<dyn SystemPreferenceOracle> =
//!     Arc::new(ManualOracle::new(SystemPreference::Dark));
//! let surface = Arc::new(RootSurface::new());
//!
//! // Before first paint, synchronously:
//! folio_theme::bootstrap::run(store.as_ref(), Some(oracle.as_ref()), &surface);
//!
//! // Once the shell has mounted:
//! let mut provider = ThemeProvider::new(
//!     Arc::clone(&store),
//!     Some(Arc::clone(&oracle)),
//!     Arc::clone(&surface),
//! );
//! provider.mount();
//!
//! assert_eq!(provider.effective_theme(), EffectiveTheme::Dark);
//! assert_eq!(surface.background(), "#0f0f0f");
//! ```
//!
//! ## Failure posture
//!
//! A missing or failing store means no durability, never a crash; a missing
//! oracle means explicit choices only; the worst case is a light-themed
//! session that forgets its preferences. Only an invalid choice name is
//! surfaced to callers, as [`ThemeError::InvalidThemeChoice`].

pub mod bootstrap;
pub mod choice;
pub mod error;
pub mod oracle;
pub mod provider;
pub mod store;
pub mod surface;

pub use choice::{EffectiveTheme, SystemPreference, ThemeChoice, resolve};
pub use error::{StoreError, ThemeError};
pub use provider::{ProviderState, ThemeProvider};
pub use surface::RootSurface;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::choice::{EffectiveTheme, SystemPreference, ThemeChoice, resolve};
    pub use crate::error::{StoreError, ThemeError};
    pub use crate::oracle::{
        EnvOracle, ManualOracle, OracleSubscription, PreferenceChangeListener,
        SystemPreferenceOracle,
    };
    pub use crate::provider::{ProviderState, ThemeProvider};
    pub use crate::store::{
        FileStore, MemoryStore, PreferenceStore, RESOLVED_THEME_KEY, THEME_KEY,
    };
    pub use crate::surface::RootSurface;
}
