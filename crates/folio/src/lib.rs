#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Folio
//!
//! A terminal reading application, in progress.
//!
//! The feature components ([`library`], [`reader`], [`annotations`]) are
//! typed placeholders while the document pipeline is built out. The theme
//! subsystem in [`folio_theme`] is complete and drives the shell's visual
//! state: [`Shell::boot`] runs the pre-paint bootstrap, the host paints,
//! and [`Shell::mount`] hands the root surface over to the runtime
//! provider.
//!
//! ```rust
//! use folio::{Shell, ShellConfig};
//!
//! let mut shell = Shell::boot(&ShellConfig::new().persist(false));
//! // ... first paint happens here, already themed ...
//! shell.mount();
//! println!("{}", shell.status());
//! ```

pub mod annotations;
pub mod library;
pub mod reader;

use std::sync::Arc;

use folio_theme::oracle::{EnvOracle, SystemPreferenceOracle};
use folio_theme::store::{FileStore, MemoryStore, PreferenceStore};
use folio_theme::{RootSurface, ThemeProvider, bootstrap};
use tracing::{debug, warn};

/// Options for assembling a [`Shell`].
#[derive(Debug, Clone)]
pub struct ShellConfig {
    persist: bool,
}

impl ShellConfig {
    /// Default configuration: preferences persisted to the platform
    /// location.
    #[must_use]
    pub fn new() -> Self {
        Self { persist: true }
    }

    /// Enable or disable preference persistence for this session.
    #[must_use]
    pub fn persist(mut self, enabled: bool) -> Self {
        self.persist = enabled;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The application shell.
///
/// Owns the wiring between the preference store, the system preference
/// oracle, the root surface, and the theme provider. Two-phase startup:
/// [`boot`](Self::boot) leaves the surface correctly themed for the first
/// paint, [`mount`](Self::mount) attaches the runtime provider.
pub struct Shell {
    surface: Arc<RootSurface>,
    provider: ThemeProvider,
}

impl Shell {
    /// Run the pre-paint bootstrap and assemble an unmounted shell.
    ///
    /// A store or oracle that cannot be opened degrades: the session runs
    /// in memory only, or with explicit theme choices only.
    #[must_use]
    pub fn boot(config: &ShellConfig) -> Self {
        let store: Arc<dyn PreferenceStore> = if config.persist {
            match FileStore::open_default() {
                Ok(store) => {
                    debug!(store.path = %store.path().display(), "Preference store ready");
                    Arc::new(store)
                }
                Err(err) => {
                    warn!(error = %err, "Preference store unavailable; session is in-memory only");
                    Arc::new(MemoryStore::new())
                }
            }
        } else {
            Arc::new(MemoryStore::new())
        };

        let oracle =
            EnvOracle::detect().map(|oracle| Arc::new(oracle) as Arc<dyn SystemPreferenceOracle>);
        if oracle.is_none() {
            debug!("No system preference oracle detected");
        }

        let surface = Arc::new(RootSurface::new());
        bootstrap::run(store.as_ref(), oracle.as_deref(), &surface);

        let provider = ThemeProvider::new(store, oracle, Arc::clone(&surface));
        Self { surface, provider }
    }

    /// Mount the runtime provider. Idempotent.
    pub fn mount(&mut self) {
        self.provider.mount();
    }

    /// The theme provider, for reading or changing the theme.
    #[must_use]
    pub fn provider(&self) -> &ThemeProvider {
        &self.provider
    }

    /// The root surface the shell paints from.
    #[must_use]
    pub fn surface(&self) -> &RootSurface {
        &self.surface
    }

    /// One-line report for the non-interactive CLI output.
    #[must_use]
    pub fn status(&self) -> String {
        format!(
            "theme {} (effective {}, background {})",
            self.provider.theme_choice(),
            self.provider.effective_theme(),
            self.surface.background(),
        )
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::annotations::{Annotation, AnnotationList};
    pub use crate::library::Library;
    pub use crate::reader::OpenDocument;
    pub use crate::{Shell, ShellConfig};
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_theme::{EffectiveTheme, ProviderState, ThemeChoice};

    #[test]
    fn boot_then_mount_reaches_ready() {
        let mut shell = Shell::boot(&ShellConfig::new().persist(false));
        assert_eq!(shell.provider().state(), ProviderState::Initializing);

        shell.mount();
        assert_eq!(shell.provider().state(), ProviderState::Ready);
    }

    #[test]
    fn status_reports_the_applied_theme() {
        let mut shell = Shell::boot(&ShellConfig::new().persist(false));
        shell.mount();
        shell.provider().set_theme_choice(ThemeChoice::Dark);

        assert_eq!(shell.provider().effective_theme(), EffectiveTheme::Dark);
        let status = shell.status();
        assert!(status.contains("dark"), "status was: {status}");
        assert!(status.contains("#0f0f0f"), "status was: {status}");
    }

    #[test]
    fn invalid_theme_name_leaves_the_shell_unchanged() {
        let mut shell = Shell::boot(&ShellConfig::new().persist(false));
        shell.mount();
        let before = shell.provider().effective_theme();

        assert!(shell.provider().set_theme_choice_by_name("purple").is_err());
        assert_eq!(shell.provider().effective_theme(), before);
    }
}
