//! Theme tokens: utility-class strings keyed by semantic role.
//!
//! # Design
//! - Pure functions of the dark-mode flag (plus accent/active modifiers for
//!   buttons); no hidden state.
//! - Accents are a closed set so arbitrary caller text never reaches the
//!   rendered class list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ThemeError;

/// Light/dark appearance choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark surfaces with light text.
    #[default]
    Dark,
    /// Light surfaces with dark text.
    Light,
}

impl ThemeMode {
    /// Whether this is the dark appearance.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// The opposite mode.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Mode for a dark-mode flag.
    #[must_use]
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }
}

/// Semantic roles covered by a [`Theme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    /// Page background.
    Bg,
    /// Navigation sidebar.
    Sidebar,
    /// Content cards.
    Card,
    /// Primary text.
    TextMain,
    /// Secondary text.
    TextSub,
    /// Form inputs.
    Input,
    /// Top header bar.
    Header,
    /// Assistant answer box.
    AiBox,
    /// Brand gradient stops.
    Accent,
}

impl ThemeRole {
    /// Every role, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Bg,
        Self::Sidebar,
        Self::Card,
        Self::TextMain,
        Self::TextSub,
        Self::Input,
        Self::Header,
        Self::AiBox,
        Self::Accent,
    ];

    /// Role name as consumed by templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bg => "bg",
            Self::Sidebar => "sidebar",
            Self::Card => "card",
            Self::TextMain => "textMain",
            Self::TextSub => "textSub",
            Self::Input => "input",
            Self::Header => "header",
            Self::AiBox => "aiBox",
            Self::Accent => "accent",
        }
    }
}

/// Token set for one appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Page background.
    pub bg: &'static str,
    /// Navigation sidebar.
    pub sidebar: &'static str,
    /// Content cards.
    pub card: &'static str,
    /// Primary text.
    pub text_main: &'static str,
    /// Secondary text.
    pub text_sub: &'static str,
    /// Form inputs.
    pub input: &'static str,
    /// Top header bar.
    pub header: &'static str,
    /// Assistant answer box.
    pub ai_box: &'static str,
    /// Brand gradient stops (same in both modes).
    pub accent: &'static str,
}

impl Theme {
    /// Token for `role`.
    #[must_use]
    pub const fn get(&self, role: ThemeRole) -> &'static str {
        match role {
            ThemeRole::Bg => self.bg,
            ThemeRole::Sidebar => self.sidebar,
            ThemeRole::Card => self.card,
            ThemeRole::TextMain => self.text_main,
            ThemeRole::TextSub => self.text_sub,
            ThemeRole::Input => self.input,
            ThemeRole::Header => self.header,
            ThemeRole::AiBox => self.ai_box,
            ThemeRole::Accent => self.accent,
        }
    }

    /// `(role name, token)` pairs for every role.
    #[must_use]
    pub fn roles(&self) -> [(&'static str, &'static str); 9] {
        ThemeRole::ALL.map(|role| (role.as_str(), self.get(role)))
    }
}

/// Build the token set for the dark or light appearance.
#[must_use]
pub const fn create_theme(is_dark: bool) -> Theme {
    if is_dark {
        Theme {
            bg: "bg-slate-950",
            sidebar: "bg-slate-900/95 border-slate-800/50 backdrop-blur-sm",
            card: "bg-slate-900/60 border-slate-800/50 hover:bg-slate-800/60",
            text_main: "text-slate-100",
            text_sub: "text-slate-400",
            input: "bg-slate-900/80 border-slate-700 text-slate-100 placeholder:text-slate-500",
            header: "bg-slate-900/95 border-slate-800/50 backdrop-blur-md",
            ai_box: "bg-slate-950/80 border-slate-800/50",
            accent: BRAND_ACCENT,
        }
    } else {
        Theme {
            bg: "bg-slate-50",
            sidebar: "bg-white/95 border-slate-200 backdrop-blur-sm",
            card: "bg-white/90 border-slate-200 hover:bg-slate-50/90 shadow-sm",
            text_main: "text-slate-900",
            text_sub: "text-slate-600",
            input: "bg-white border-slate-300 text-slate-900 placeholder:text-slate-500",
            header: "bg-white/95 border-slate-200 backdrop-blur-md",
            ai_box: "bg-slate-50/80 border-slate-200",
            accent: BRAND_ACCENT,
        }
    }
}

const BRAND_ACCENT: &str = "from-osint-600 to-osint-500";

/// Accent palettes known to the stylesheet.
///
/// `Osint` is the brand palette; the rest are the stock utility palettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    /// Brand palette.
    #[default]
    Osint,
    /// Slate.
    Slate,
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Amber.
    Amber,
    /// Yellow.
    Yellow,
    /// Lime.
    Lime,
    /// Green.
    Green,
    /// Emerald.
    Emerald,
    /// Teal.
    Teal,
    /// Cyan.
    Cyan,
    /// Sky.
    Sky,
    /// Blue.
    Blue,
    /// Indigo.
    Indigo,
    /// Violet.
    Violet,
    /// Purple.
    Purple,
    /// Fuchsia.
    Fuchsia,
    /// Pink.
    Pink,
    /// Rose.
    Rose,
}

impl AccentColor {
    /// All supported accents.
    pub const ALL: [Self; 19] = [
        Self::Osint,
        Self::Slate,
        Self::Red,
        Self::Orange,
        Self::Amber,
        Self::Yellow,
        Self::Lime,
        Self::Green,
        Self::Emerald,
        Self::Teal,
        Self::Cyan,
        Self::Sky,
        Self::Blue,
        Self::Indigo,
        Self::Violet,
        Self::Purple,
        Self::Fuchsia,
        Self::Pink,
        Self::Rose,
    ];

    /// Palette name used inside class names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Osint => "osint",
            Self::Slate => "slate",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Green => "green",
            Self::Emerald => "emerald",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Sky => "sky",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
            Self::Purple => "purple",
            Self::Fuchsia => "fuchsia",
            Self::Pink => "pink",
            Self::Rose => "rose",
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AccentColor {
    type Err = ThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|accent| accent.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ThemeError::UnknownAccent {
                value: value.to_string(),
            })
    }
}

const NAV_BUTTON_BASE: &str = "w-full flex items-center gap-3 px-4 py-3 rounded-xl text-sm font-medium transition-all duration-200 mb-2 group";

/// Class strings for the shared button shapes.
#[derive(Clone, Copy, Debug)]
pub struct ButtonVariants;

impl ButtonVariants {
    /// Sidebar navigation button in the brand accent.
    #[must_use]
    pub fn primary(is_dark: bool, is_active: bool) -> String {
        let state = if is_active {
            active_gradient(AccentColor::Osint)
        } else if is_dark {
            "text-slate-400 hover:bg-slate-800/70 hover:text-slate-100".to_string()
        } else {
            "text-slate-600 hover:bg-slate-100/70 hover:text-slate-900".to_string()
        };
        format!("{state} {NAV_BUTTON_BASE}")
    }

    /// Square icon button (theme toggle, toolbar actions).
    #[must_use]
    pub fn icon(is_dark: bool) -> String {
        let surface = if is_dark {
            "bg-slate-800/70 hover:bg-slate-700"
        } else {
            "bg-slate-100 hover:bg-slate-200"
        };
        format!("p-2.5 rounded-xl transition-all hover:scale-105 {surface}")
    }

    /// Navigation button tinted with `accent`.
    #[must_use]
    pub fn themed(is_dark: bool, accent: AccentColor, is_active: bool) -> String {
        let color = accent.as_str();
        let state = if is_active {
            active_gradient(accent)
        } else if is_dark {
            format!(
                "text-slate-400 hover:bg-{color}-600/10 hover:text-{color}-300 border border-transparent hover:border-{color}-500/20"
            )
        } else {
            format!(
                "text-slate-600 hover:bg-{color}-50 hover:text-{color}-700 border border-transparent hover:border-{color}-200"
            )
        };
        format!("{state} {NAV_BUTTON_BASE}")
    }

    /// [`ButtonVariants::themed`] for an accent name supplied as text.
    ///
    /// # Errors
    /// Returns [`ThemeError::UnknownAccent`] when `accent` is not a supported
    /// palette.
    pub fn themed_named(
        is_dark: bool,
        accent: &str,
        is_active: bool,
    ) -> Result<String, ThemeError> {
        let accent = accent.parse::<AccentColor>()?;
        Ok(Self::themed(is_dark, accent, is_active))
    }
}

fn active_gradient(accent: AccentColor) -> String {
    let color = accent.as_str();
    format!(
        "bg-gradient-to-r from-{color}-600 to-{color}-500 text-white shadow-lg shadow-{color}-500/25 scale-[1.02]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_normalized(tokens: &str) -> bool {
        !tokens.is_empty()
            && tokens == tokens.trim()
            && !tokens.contains("  ")
            && !tokens.contains('\n')
    }

    #[test]
    fn dark_and_light_themes_cover_the_same_roles() {
        let dark = create_theme(true);
        let light = create_theme(false);
        let dark_roles: Vec<_> = dark.roles().iter().map(|(name, _)| *name).collect();
        let light_roles: Vec<_> = light.roles().iter().map(|(name, _)| *name).collect();

        assert_eq!(dark_roles, light_roles);
        assert!(dark.roles().iter().all(|(_, token)| !token.is_empty()));
        assert!(light.roles().iter().all(|(_, token)| !token.is_empty()));
        assert_ne!(dark.bg, light.bg);
        assert_ne!(dark.text_main, light.text_main);
        assert_eq!(dark.accent, light.accent);
    }

    #[test]
    fn theme_is_deterministic() {
        assert_eq!(create_theme(true), create_theme(true));
        assert_eq!(
            create_theme(false).get(ThemeRole::TextMain),
            "text-slate-900"
        );
    }

    #[test]
    fn themed_active_light_uses_accent_gradient() {
        let tokens = ButtonVariants::themed(false, AccentColor::Blue, true);
        assert!(tokens.contains("blue-600"));
        assert!(tokens.contains("blue-500"));
        assert!(tokens.starts_with("bg-gradient-to-r from-blue-600 to-blue-500"));
        assert!(is_normalized(&tokens));
    }

    #[test]
    fn themed_inactive_branches_on_mode() {
        let dark = ButtonVariants::themed(true, AccentColor::Emerald, false);
        let light = ButtonVariants::themed(false, AccentColor::Emerald, false);
        assert!(dark.contains("hover:text-emerald-300"));
        assert!(light.contains("hover:text-emerald-700"));
        assert!(dark.ends_with("mb-2 group"));
    }

    #[test]
    fn primary_active_matches_brand_themed_variant() {
        assert_eq!(
            ButtonVariants::primary(true, true),
            ButtonVariants::themed(true, AccentColor::Osint, true)
        );
        assert!(ButtonVariants::primary(false, false).contains("hover:text-slate-900"));
        assert!(is_normalized(&ButtonVariants::primary(true, false)));
    }

    #[test]
    fn icon_tokens_follow_mode() {
        assert!(ButtonVariants::icon(true).ends_with("bg-slate-800/70 hover:bg-slate-700"));
        assert!(ButtonVariants::icon(false).ends_with("bg-slate-100 hover:bg-slate-200"));
    }

    #[test]
    fn accent_names_are_validated() {
        assert_eq!(" Blue ".parse::<AccentColor>(), Ok(AccentColor::Blue));
        assert_eq!(
            ButtonVariants::themed_named(false, "osint", false),
            Ok(ButtonVariants::themed(false, AccentColor::Osint, false))
        );
        assert_eq!(
            ButtonVariants::themed_named(false, "blue-500 bg-[url(x)]", true),
            Err(ThemeError::UnknownAccent {
                value: "blue-500 bg-[url(x)]".to_string()
            })
        );
    }

    #[test]
    fn theme_mode_toggles_and_serializes_lowercase() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert!(ThemeMode::from_dark(true).is_dark());
        assert_eq!(
            serde_json::to_string(&ThemeMode::Light).expect("serialize"),
            "\"light\""
        );
    }
}
