//! The pre-paint bootstrap.
//!
//! [`run`] executes synchronously before the shell mounts and leaves the
//! root surface in its correct theme so the very first paint is already
//! right. It works in two steps: the cached resolved theme goes on
//! immediately (fallback `Light`), then a live oracle query corrects it when
//! the persisted choice is `system`. The cache is a flash-avoidance
//! optimization, never authoritative over a live read.
//!
//! The routine never unwinds: collaborator calls are panic-guarded, and any
//! failure degrades to the fallback. It performs no asynchronous work and is
//! idempotent, so re-running it with unchanged inputs reproduces the same
//! surface state.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, warn};

use crate::choice::{EffectiveTheme, ThemeChoice, resolve};
use crate::oracle::SystemPreferenceOracle;
use crate::store::{self, PreferenceStore};
use crate::surface::RootSurface;

/// Put the surface into its correct theme before anything is painted.
pub fn run(
    store: &dyn PreferenceStore,
    oracle: Option<&dyn SystemPreferenceOracle>,
    surface: &RootSurface,
) {
    // Cached resolved value first; light when absent or unreadable.
    let candidate = guarded("preference store", || store::load_resolved(store))
        .flatten()
        .unwrap_or(EffectiveTheme::Light);
    surface.apply(candidate);

    // Persisted explicit choice; `system` when absent.
    let choice = guarded("preference store", || store::load_choice(store))
        .flatten()
        .unwrap_or_default();

    // A live oracle read wins over the cache when the choice is `system`.
    if choice == ThemeChoice::System {
        if let Some(oracle) = oracle {
            if let Some(pref) = guarded("preference oracle", || oracle.query_current()) {
                let resolved = resolve(choice, pref);
                if resolved != candidate {
                    debug!(
                        theme.cached = %candidate,
                        theme.resolved = %resolved,
                        "Cached theme corrected by live system preference"
                    );
                    surface.apply(resolved);
                }
            }
        }
    }
}

fn guarded<T>(label: &str, f: impl FnOnce() -> T) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(collaborator = label, "Collaborator panicked during pre-paint bootstrap");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::SystemPreference;
    use crate::oracle::ManualOracle;
    use crate::store::testing::{FailingStore, PanickingStore};
    use crate::store::{MemoryStore, RESOLVED_THEME_KEY, THEME_KEY};

    #[test]
    fn empty_store_falls_back_to_light() {
        let store = MemoryStore::new();
        let surface = RootSurface::new();

        run(&store, None, &surface);
        assert_eq!(surface.marker(), EffectiveTheme::Light);
    }

    #[test]
    fn cached_resolved_theme_is_applied_first() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "dark").unwrap();
        store.set(RESOLVED_THEME_KEY, "dark").unwrap();
        let surface = RootSurface::new();

        run(&store, None, &surface);
        assert_eq!(surface.marker(), EffectiveTheme::Dark);
    }

    #[test]
    fn live_oracle_corrects_stale_cache_for_system_choice() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "system").unwrap();
        store.set(RESOLVED_THEME_KEY, "light").unwrap();
        let oracle = ManualOracle::new(SystemPreference::Dark);
        let surface = RootSurface::new();

        run(&store, Some(&oracle as &dyn SystemPreferenceOracle), &surface);
        assert_eq!(surface.marker(), EffectiveTheme::Dark);
    }

    #[test]
    fn explicit_choice_ignores_the_oracle() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();
        store.set(RESOLVED_THEME_KEY, "light").unwrap();
        let oracle = ManualOracle::new(SystemPreference::Dark);
        let surface = RootSurface::new();

        run(&store, Some(&oracle as &dyn SystemPreferenceOracle), &surface);
        assert_eq!(surface.marker(), EffectiveTheme::Light);
    }

    #[test]
    fn run_is_idempotent() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "system").unwrap();
        store.set(RESOLVED_THEME_KEY, "dark").unwrap();
        let oracle = ManualOracle::new(SystemPreference::Dark);
        let surface = RootSurface::new();

        run(&store, Some(&oracle as &dyn SystemPreferenceOracle), &surface);
        let transitions = surface.transitions();
        run(&store, Some(&oracle as &dyn SystemPreferenceOracle), &surface);
        assert_eq!(surface.marker(), EffectiveTheme::Dark);
        assert_eq!(surface.transitions(), transitions);
    }

    #[test]
    fn failing_store_degrades_to_fallback() {
        let surface = RootSurface::new();
        run(&FailingStore, None, &surface);
        assert_eq!(surface.marker(), EffectiveTheme::Light);
    }

    #[test]
    fn panicking_store_never_unwinds_out() {
        let oracle = ManualOracle::new(SystemPreference::Dark);
        let surface = RootSurface::new();

        run(&PanickingStore, Some(&oracle as &dyn SystemPreferenceOracle), &surface);
        // Choice is unknown, so the routine treats it as `system` and still
        // reaches the live oracle.
        assert_eq!(surface.marker(), EffectiveTheme::Dark);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "blurple").unwrap();
        store.set(RESOLVED_THEME_KEY, "sepia").unwrap();
        let oracle = ManualOracle::new(SystemPreference::Dark);
        let surface = RootSurface::new();

        run(&store, Some(&oracle as &dyn SystemPreferenceOracle), &surface);
        // Malformed choice reads as `system`, so the oracle decides.
        assert_eq!(surface.marker(), EffectiveTheme::Dark);
    }
}
