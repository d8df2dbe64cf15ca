//! The root surface: the one piece of session-wide visual state.
//!
//! Exactly one theme marker is active at any time, together with the base
//! background color belonging to that theme. The marker is a shared resource
//! with designated writers (the pre-paint bootstrap before mount, the
//! runtime provider after), and the write path is crate-private so no other
//! component can reach it.

use std::sync::RwLock;

use tracing::info;

use crate::choice::EffectiveTheme;

/// The single owned visual root.
///
/// Readers see a marker and its background; both always change together in
/// one [`apply`](Self::apply) call, so no intermediate state is observable.
/// Before the first apply the marker holds the `Light` fallback, the same
/// worst-case value every failure path degrades to.
#[derive(Debug)]
pub struct RootSurface {
    state: RwLock<SurfaceState>,
}

#[derive(Debug, Clone, Copy)]
struct SurfaceState {
    marker: EffectiveTheme,
    transitions: u64,
}

impl RootSurface {
    /// Create a surface with the `Light` fallback marker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SurfaceState {
                marker: EffectiveTheme::Light,
                transitions: 0,
            }),
        }
    }

    /// The currently applied theme marker.
    #[must_use]
    pub fn marker(&self) -> EffectiveTheme {
        self.state.read().expect("root surface lock poisoned").marker
    }

    /// Background color currently painted on the root, as a hex triplet.
    #[must_use]
    pub fn background(&self) -> &'static str {
        self.marker().base_background()
    }

    /// Number of times the marker changed value.
    ///
    /// Lets callers observe flashes: a session that bootstraps and mounts
    /// with agreeing storage and oracle transitions at most once.
    #[must_use]
    pub fn transitions(&self) -> u64 {
        self.state
            .read()
            .expect("root surface lock poisoned")
            .transitions
    }

    /// Apply `theme`: set the marker and its background together.
    ///
    /// Returns whether the marker changed value. Re-applying the current
    /// theme is a no-op, which makes every caller idempotent for free.
    pub(crate) fn apply(&self, theme: EffectiveTheme) -> bool {
        let mut state = self.state.write().expect("root surface lock poisoned");
        if state.marker == theme {
            return false;
        }
        info!(
            theme.from = %state.marker,
            theme.to = %theme,
            theme.background = theme.base_background(),
            "Root surface theme applied"
        );
        state.marker = theme;
        state.transitions += 1;
        true
    }
}

impl Default for RootSurface {
    fn default() -> Self {
        Self::new()
    }
}
