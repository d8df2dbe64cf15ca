//! The theme runtime provider.
//!
//! After the pre-paint bootstrap has put the surface into its correct theme,
//! [`ThemeProvider`] takes over as the single source of truth. Construction
//! adopts whatever the bootstrap applied (never recomputing, so hydration
//! cannot flash); [`mount`](ThemeProvider::mount) attaches the oracle
//! subscription, reconciles once against a live query, and transitions the
//! provider to [`ProviderState::Ready`].
//!
//! Every mutation, whether the public
//! [`set_theme_choice`](ThemeProvider::set_theme_choice) or an incoming
//! oracle notification, recomputes through the one [`resolve`] definition
//! and applies the surface and store writes before returning. Store failures
//! cost durability, never visual correctness.

use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::choice::{EffectiveTheme, SystemPreference, ThemeChoice, resolve};
use crate::error::ThemeError;
use crate::oracle::{OracleSubscription, SystemPreferenceOracle};
use crate::store::{self, PreferenceStore, RESOLVED_THEME_KEY, THEME_KEY, persist};
use crate::surface::RootSurface;

/// Lifecycle state of the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    /// Mirroring the bootstrap's surface state; no subscription attached.
    Initializing,
    /// Mounted: subscribed to the oracle and reconciled against a live query.
    Ready,
}

struct ProviderInner {
    choice: ThemeChoice,
    effective: EffectiveTheme,
    last_system_pref: SystemPreference,
    state: ProviderState,
}

/// Owner of theme state for the lifetime of the mounted session.
pub struct ThemeProvider {
    inner: Arc<RwLock<ProviderInner>>,
    store: Arc<dyn PreferenceStore>,
    oracle: Option<Arc<dyn SystemPreferenceOracle>>,
    surface: Arc<RootSurface>,
    subscription: Option<OracleSubscription>,
}

impl ThemeProvider {
    /// Create a provider in [`ProviderState::Initializing`].
    ///
    /// The effective theme is adopted from the surface as the bootstrap left
    /// it; the persisted choice is loaded with a `system` fallback. Until
    /// the first live query at mount, the last known system preference is
    /// approximated from the adopted marker; for a `system` choice that is
    /// exactly what the bootstrap resolved it from.
    #[must_use]
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        oracle: Option<Arc<dyn SystemPreferenceOracle>>,
        surface: Arc<RootSurface>,
    ) -> Self {
        let effective = surface.marker();
        let choice = store::load_choice(store.as_ref()).unwrap_or_default();
        Self {
            inner: Arc::new(RwLock::new(ProviderInner {
                choice,
                effective,
                last_system_pref: SystemPreference::from(effective),
                state: ProviderState::Initializing,
            })),
            store,
            oracle,
            surface,
            subscription: None,
        }
    }

    /// Attach the oracle subscription and transition to `Ready`.
    ///
    /// The first live query reconciles the adopted state: when the persisted
    /// cache and the live system preference disagree, the live value wins
    /// and the corrected cache is written back. Without an oracle the
    /// provider stays usable, limited to explicit choices.
    pub fn mount(&mut self) {
        {
            let state = self.inner.read().expect("theme provider lock poisoned");
            if state.state == ProviderState::Ready {
                return;
            }
        }

        if let Some(oracle) = &self.oracle {
            let pref = oracle.query_current();
            self.inner
                .write()
                .expect("theme provider lock poisoned")
                .last_system_pref = pref;

            let inner = Arc::clone(&self.inner);
            let listener_store = Arc::clone(&self.store);
            let listener_surface = Arc::clone(&self.surface);
            self.subscription = Some(oracle.subscribe(Arc::new(
                move |pref: SystemPreference| {
                    Self::on_system_change(&inner, listener_store.as_ref(), &listener_surface, pref);
                },
            )));
        } else {
            debug!("No system preference oracle; explicit choices only");
        }

        let resolved = {
            let mut state = self.inner.write().expect("theme provider lock poisoned");
            let resolved = resolve(state.choice, state.last_system_pref);
            if resolved != state.effective {
                debug!(
                    theme.adopted = %state.effective,
                    theme.resolved = %resolved,
                    "Adopted theme corrected at mount"
                );
                state.effective = resolved;
            }
            state.state = ProviderState::Ready;
            resolved
        };
        self.surface.apply(resolved);
        persist(self.store.as_ref(), RESOLVED_THEME_KEY, resolved.as_str());
        info!(theme.effective = %resolved, "Theme provider ready");
    }

    /// The currently applied theme. Always defined.
    #[must_use]
    pub fn effective_theme(&self) -> EffectiveTheme {
        self.inner
            .read()
            .expect("theme provider lock poisoned")
            .effective
    }

    /// The current explicit preference.
    #[must_use]
    pub fn theme_choice(&self) -> ThemeChoice {
        self.inner
            .read()
            .expect("theme provider lock poisoned")
            .choice
    }

    /// The last system preference observed through the oracle.
    #[must_use]
    pub fn last_system_preference(&self) -> SystemPreference {
        self.inner
            .read()
            .expect("theme provider lock poisoned")
            .last_system_pref
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ProviderState {
        self.inner
            .read()
            .expect("theme provider lock poisoned")
            .state
    }

    /// Set the explicit theme choice.
    ///
    /// Persists the choice, re-resolves against the last known system
    /// preference, applies the result to the root surface, and persists the
    /// resolved cache, all before returning. This is the only entry point
    /// by which the choice changes.
    pub fn set_theme_choice(&self, choice: ThemeChoice) -> EffectiveTheme {
        let mut state = self.inner.write().expect("theme provider lock poisoned");
        let previous = state.choice;
        state.choice = choice;
        persist(self.store.as_ref(), THEME_KEY, choice.as_str());

        let resolved = resolve(choice, state.last_system_pref);
        state.effective = resolved;
        self.surface.apply(resolved);
        persist(self.store.as_ref(), RESOLVED_THEME_KEY, resolved.as_str());
        drop(state);

        info!(
            theme.from = %previous,
            theme.to = %choice,
            theme.effective = %resolved,
            "Theme choice set"
        );
        resolved
    }

    /// Validating boundary for string input (CLI, config files).
    ///
    /// # Errors
    /// Returns [`ThemeError::InvalidThemeChoice`] for anything outside
    /// `light`/`dark`/`system`, leaving choice, effective theme, and surface
    /// untouched.
    pub fn set_theme_choice_by_name(&self, name: &str) -> Result<EffectiveTheme, ThemeError> {
        let choice: ThemeChoice = name.parse()?;
        Ok(self.set_theme_choice(choice))
    }

    /// Oracle notification entry point.
    ///
    /// Always records the observed preference; only a `system` choice makes
    /// it visible. Surface and store writes complete inside the notification.
    fn on_system_change(
        inner: &RwLock<ProviderInner>,
        store: &dyn PreferenceStore,
        surface: &RootSurface,
        pref: SystemPreference,
    ) {
        let mut state = inner.write().expect("theme provider lock poisoned");
        state.last_system_pref = pref;
        if state.choice != ThemeChoice::System {
            debug!(
                theme.preference = %pref,
                theme.choice = %state.choice,
                "System preference observed; explicit choice unaffected"
            );
            return;
        }

        let resolved = resolve(state.choice, pref);
        state.effective = resolved;
        surface.apply(resolved);
        persist(store, RESOLVED_THEME_KEY, resolved.as_str());
    }
}

impl fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.read().expect("theme provider lock poisoned");
        f.debug_struct("ThemeProvider")
            .field("choice", &state.choice)
            .field("effective", &state.effective)
            .field("state", &state.state)
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}
