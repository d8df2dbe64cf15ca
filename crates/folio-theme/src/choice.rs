//! Theme values and the resolver.
//!
//! Three enumerated values drive the subsystem: the user's persisted
//! [`ThemeChoice`], the host's live [`SystemPreference`], and the derived
//! [`EffectiveTheme`] that is actually applied to the root surface.
//! [`resolve`] is the single definition of the mapping between them; the
//! pre-paint bootstrap and the runtime provider both call it.
//!
//! # Example
//!
//! ```rust
//! use folio_theme::choice::{resolve, EffectiveTheme, SystemPreference, ThemeChoice};
//!
//! assert_eq!(resolve(ThemeChoice::Dark, SystemPreference::Light), EffectiveTheme::Dark);
//! assert_eq!(resolve(ThemeChoice::System, SystemPreference::Light), EffectiveTheme::Light);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The user's explicit, persisted theme intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Always render light, regardless of the host preference.
    Light,
    /// Always render dark, regardless of the host preference.
    Dark,
    /// Follow the host environment's preference.
    #[default]
    System,
}

/// The host environment's current light/dark signal.
///
/// Owned by the environment and read-only to this subsystem; it may change
/// at any time while the session is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemPreference {
    Light,
    Dark,
}

/// The theme actually applied to the visual root.
///
/// Derived, never set directly: always the output of [`resolve`] at the
/// moment of computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    Light,
    Dark,
}

/// Map a theme choice and a system preference to the theme to apply.
///
/// Total and pure: explicit choices pass through, `System` resolves to the
/// given preference.
#[must_use]
pub const fn resolve(choice: ThemeChoice, system_pref: SystemPreference) -> EffectiveTheme {
    match choice {
        ThemeChoice::Light => EffectiveTheme::Light,
        ThemeChoice::Dark => EffectiveTheme::Dark,
        ThemeChoice::System => match system_pref {
            SystemPreference::Light => EffectiveTheme::Light,
            SystemPreference::Dark => EffectiveTheme::Dark,
        },
    }
}

impl ThemeChoice {
    /// Returns the string form used in persisted preferences.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse the persisted string form, `None` for anything outside it.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl EffectiveTheme {
    /// Returns the string form used in persisted preferences.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse the persisted string form, `None` for anything outside it.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Base background color for this theme, as a hex triplet.
    ///
    /// Applied to the root surface together with the marker so the first
    /// paint is correct independent of any later styling.
    #[must_use]
    pub const fn base_background(self) -> &'static str {
        match self {
            Self::Light => "#ffffff",
            Self::Dark => "#0f0f0f",
        }
    }

    /// Base background color as an RGB triple, for terminal paint.
    #[must_use]
    pub const fn base_background_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Light => (0xff, 0xff, 0xff),
            Self::Dark => (0x0f, 0x0f, 0x0f),
        }
    }
}

impl SystemPreference {
    /// Returns the string form of the preference.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl From<SystemPreference> for EffectiveTheme {
    fn from(pref: SystemPreference) -> Self {
        match pref {
            SystemPreference::Light => Self::Light,
            SystemPreference::Dark => Self::Dark,
        }
    }
}

impl From<EffectiveTheme> for SystemPreference {
    fn from(theme: EffectiveTheme) -> Self {
        match theme {
            EffectiveTheme::Light => Self::Light,
            EffectiveTheme::Dark => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EffectiveTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SystemPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeChoice {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| ThemeError::InvalidThemeChoice(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Resolver Tests
    // =========================================================================

    #[test]
    fn resolve_explicit_choices_pass_through() {
        for pref in [SystemPreference::Light, SystemPreference::Dark] {
            assert_eq!(resolve(ThemeChoice::Light, pref), EffectiveTheme::Light);
            assert_eq!(resolve(ThemeChoice::Dark, pref), EffectiveTheme::Dark);
        }
    }

    #[test]
    fn resolve_system_follows_preference() {
        assert_eq!(
            resolve(ThemeChoice::System, SystemPreference::Light),
            EffectiveTheme::Light
        );
        assert_eq!(
            resolve(ThemeChoice::System, SystemPreference::Dark),
            EffectiveTheme::Dark
        );
    }

    // =========================================================================
    // String Form Tests
    // =========================================================================

    #[test]
    fn choice_parses_known_names() {
        assert_eq!("light".parse::<ThemeChoice>().unwrap(), ThemeChoice::Light);
        assert_eq!("dark".parse::<ThemeChoice>().unwrap(), ThemeChoice::Dark);
        assert_eq!(
            "system".parse::<ThemeChoice>().unwrap(),
            ThemeChoice::System
        );
    }

    #[test]
    fn choice_parse_trims_whitespace() {
        assert_eq!(
            "  dark \n".parse::<ThemeChoice>().unwrap(),
            ThemeChoice::Dark
        );
    }

    #[test]
    fn choice_rejects_unknown_names() {
        let err = "purple".parse::<ThemeChoice>().unwrap_err();
        assert!(matches!(err, ThemeError::InvalidThemeChoice(v) if v == "purple"));
        assert!("".parse::<ThemeChoice>().is_err());
        assert!("DARK".parse::<ThemeChoice>().is_err());
    }

    #[test]
    fn display_matches_persisted_form() {
        assert_eq!(ThemeChoice::System.to_string(), "system");
        assert_eq!(EffectiveTheme::Dark.to_string(), "dark");
        assert_eq!(SystemPreference::Light.to_string(), "light");
    }

    #[test]
    fn effective_from_name_round_trips() {
        for theme in [EffectiveTheme::Light, EffectiveTheme::Dark] {
            assert_eq!(EffectiveTheme::from_name(theme.as_str()), Some(theme));
        }
        assert_eq!(EffectiveTheme::from_name("system"), None);
    }

    #[test]
    fn default_choice_is_system() {
        assert_eq!(ThemeChoice::default(), ThemeChoice::System);
    }

    // =========================================================================
    // Background Tests
    // =========================================================================

    #[test]
    fn backgrounds_differ_between_themes() {
        assert_ne!(
            EffectiveTheme::Light.base_background(),
            EffectiveTheme::Dark.base_background()
        );
    }

    #[test]
    fn background_rgb_matches_hex() {
        assert_eq!(EffectiveTheme::Light.base_background(), "#ffffff");
        assert_eq!(EffectiveTheme::Light.base_background_rgb(), (255, 255, 255));
        assert_eq!(EffectiveTheme::Dark.base_background(), "#0f0f0f");
        assert_eq!(EffectiveTheme::Dark.base_background_rgb(), (15, 15, 15));
    }

    #[test]
    fn preference_converts_to_effective_and_back() {
        assert_eq!(
            EffectiveTheme::from(SystemPreference::Dark),
            EffectiveTheme::Dark
        );
        assert_eq!(
            SystemPreference::from(EffectiveTheme::Light),
            SystemPreference::Light
        );
    }
}
