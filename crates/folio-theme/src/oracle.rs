//! The system preference oracle: a live, observable light/dark signal.
//!
//! The oracle is owned by the host environment; this subsystem only queries
//! it point-in-time and subscribes to its changes. Subscriptions are scoped:
//! dropping the returned [`OracleSubscription`] detaches the listener, so a
//! torn-down provider can never act on a dead surface.
//!
//! [`EnvOracle`] reads the `COLORFGBG` terminal convention; terminals do not
//! signal changes through the environment, so its subscriptions never fire.
//! [`ManualOracle`] is an in-process signal with an explicit
//! [`ManualOracle::emit`], used by tests and by hosts that feed their own
//! change events in.

use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use tracing::{debug, warn};

use crate::choice::SystemPreference;

/// Identifier for a registered preference change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback for system preference changes.
pub trait PreferenceChangeListener: Send + Sync {
    /// Called with the new preference after it changed.
    fn on_preference_change(&self, pref: SystemPreference);
}

impl<F> PreferenceChangeListener for F
where
    F: Fn(SystemPreference) + Send + Sync,
{
    fn on_preference_change(&self, pref: SystemPreference) {
        self(pref);
    }
}

/// A live, queryable and observable light/dark signal.
pub trait SystemPreferenceOracle: Send + Sync {
    /// Snapshot of the current preference.
    fn query_current(&self) -> SystemPreference;

    /// Register a listener for preference changes.
    ///
    /// The listener stays attached for the lifetime of the returned guard.
    fn subscribe(&self, listener: Arc<dyn PreferenceChangeListener>) -> OracleSubscription;
}

/// Guard for an oracle subscription; dropping it detaches the listener.
pub struct OracleSubscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl OracleSubscription {
    /// Build a guard around a detach action.
    #[must_use]
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A subscription with nothing to observe, for oracles without change
    /// events.
    #[must_use]
    pub fn inert() -> Self {
        Self { detach: None }
    }
}

impl fmt::Debug for OracleSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleSubscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

impl Drop for OracleSubscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

/// Oracle backed by the `COLORFGBG` terminal convention.
///
/// The variable carries `"<fg>;<bg>"` ANSI indices; a background index of 8
/// or below is treated as dark. The preference is sampled once at detection
/// time; the environment cannot push changes, so subscriptions from this
/// oracle never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvOracle {
    preference: SystemPreference,
}

impl EnvOracle {
    /// Probe the environment.
    ///
    /// Returns `None` when `COLORFGBG` is absent or malformed (the
    /// oracle-unavailable case); callers then degrade to explicit-choice
    /// behavior.
    #[must_use]
    pub fn detect() -> Option<Self> {
        Self::from_colorfgbg(&std::env::var("COLORFGBG").ok()?)
    }

    /// Parse a `COLORFGBG` value (format: `"fg;bg"`).
    #[must_use]
    pub fn from_colorfgbg(raw: &str) -> Option<Self> {
        let bg = raw.split(';').nth(1)?;
        let bg: u8 = bg.trim().parse().ok()?;
        let preference = if bg <= 8 {
            SystemPreference::Dark
        } else {
            SystemPreference::Light
        };
        Some(Self { preference })
    }
}

impl SystemPreferenceOracle for EnvOracle {
    fn query_current(&self) -> SystemPreference {
        self.preference
    }

    fn subscribe(&self, _listener: Arc<dyn PreferenceChangeListener>) -> OracleSubscription {
        debug!("Environment oracle has no change events; subscription is inert");
        OracleSubscription::inert()
    }
}

/// In-process oracle driven by explicit [`ManualOracle::emit`] calls.
///
/// Clones share one signal, so the host can keep a handle for emitting while
/// the provider holds another for querying and subscribing.
#[derive(Clone)]
pub struct ManualOracle {
    inner: Arc<ManualOracleInner>,
}

struct ManualOracleInner {
    current: RwLock<SystemPreference>,
    listeners: RwLock<HashMap<ListenerId, Arc<dyn PreferenceChangeListener>>>,
    next_listener_id: AtomicU64,
}

impl ManualOracle {
    /// Create an oracle reporting `initial` until the first emit.
    #[must_use]
    pub fn new(initial: SystemPreference) -> Self {
        Self {
            inner: Arc::new(ManualOracleInner {
                current: RwLock::new(initial),
                listeners: RwLock::new(HashMap::new()),
                next_listener_id: AtomicU64::new(1),
            }),
        }
    }

    /// Change the signal and notify listeners before returning.
    pub fn emit(&self, pref: SystemPreference) {
        {
            let mut current = self.inner.current.write().expect("oracle lock poisoned");
            *current = pref;
        }

        let listeners: Vec<(ListenerId, Arc<dyn PreferenceChangeListener>)> = {
            let listeners = self
                .inner
                .listeners
                .read()
                .expect("oracle listener lock poisoned");
            listeners
                .iter()
                .map(|(id, listener)| (*id, Arc::clone(listener)))
                .collect()
        };

        for (id, listener) in listeners {
            let result = catch_unwind(AssertUnwindSafe(|| listener.on_preference_change(pref)));
            if result.is_err() {
                warn!(
                    oracle.listener_id = id.0,
                    oracle.preference = %pref,
                    "Preference listener panicked"
                );
            }
        }
    }

    /// Number of currently attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .read()
            .expect("oracle listener lock poisoned")
            .len()
    }
}

impl fmt::Debug for ManualOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.query_current();
        f.debug_struct("ManualOracle")
            .field("current", &current)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl SystemPreferenceOracle for ManualOracle {
    fn query_current(&self) -> SystemPreference {
        *self.inner.current.read().expect("oracle lock poisoned")
    }

    fn subscribe(&self, listener: Arc<dyn PreferenceChangeListener>) -> OracleSubscription {
        let id = ListenerId(self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .write()
            .expect("oracle listener lock poisoned")
            .insert(id, listener);
        debug!(oracle.listener_id = id.0, "Preference listener registered");

        let inner: Weak<ManualOracleInner> = Arc::downgrade(&self.inner);
        OracleSubscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .listeners
                    .write()
                    .expect("oracle listener lock poisoned")
                    .remove(&id);
                debug!(oracle.listener_id = id.0, "Preference listener removed");
            }
        })
    }
}
