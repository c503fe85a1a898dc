//! Theme state, persistence, and palette
//!
//! The active theme survives restarts through a `ThemeStore` port; the
//! production store writes the literal `light`/`dark` value to a file in the
//! XDG config directory (`~/.config/skycast/theme` on Linux). Rendering code
//! never consults the environment: it receives a `Palette` derived from the
//! current theme.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use ratatui::style::Color;

/// Color theme for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The persisted string form ("light" or "dark")
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses the persisted string form; anything else is `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Persistence port for the theme flag
pub trait ThemeStore {
    /// Reads the stored theme, if any valid value is present
    fn load(&self) -> Option<Theme>;
    /// Stores the theme
    fn save(&self, theme: Theme) -> std::io::Result<()>;
}

/// Theme store backed by a file in the XDG config directory
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    /// Creates a store at the default XDG location
    ///
    /// Returns `None` if the config directory cannot be determined (e.g. no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "skycast")?;
        Some(Self {
            path: project_dirs.config_dir().join("theme"),
        })
    }

    /// Creates a store at a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let content = fs::read_to_string(&self.path).ok()?;
        Theme::from_str(content.trim())
    }

    fn save(&self, theme: Theme) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, theme.as_str())
    }
}

/// In-memory store, used when no config directory is available
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    slot: Cell<Option<Theme>>,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.slot.get()
    }

    fn save(&self, theme: Theme) -> std::io::Result<()> {
        self.slot.set(Some(theme));
        Ok(())
    }
}

/// Owns the active theme and keeps the store in sync
pub struct ThemeController {
    theme: Theme,
    store: Box<dyn ThemeStore>,
}

impl ThemeController {
    /// Initializes from the store, falling back to the ambient preference
    /// when nothing valid is stored.
    pub fn init(store: Box<dyn ThemeStore>, ambient: Theme) -> Self {
        let theme = store.load().unwrap_or(ambient);
        Self { theme, store }
    }

    /// The active theme
    pub fn current(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and persists the new value
    pub fn toggle(&mut self) {
        self.set(self.theme.toggled());
    }

    /// Sets the theme and persists it
    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(err) = self.store.save(theme) {
            tracing::warn!(error = %err, "could not persist theme");
        }
    }

    /// The palette for the active theme
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }
}

/// Reads the terminal's ambient light/dark preference
///
/// Uses the `COLORFGBG` convention (a `fg;bg` color-index pair exported by
/// several terminal emulators). Terminals without the variable are assumed
/// dark.
pub fn ambient_preference() -> Theme {
    ambient_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn ambient_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok());

    match background {
        Some(7) | Some(15) => Theme::Light,
        _ => Theme::Dark,
    }
}

/// Resolved colors for one theme, passed into every render function
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Primary text
    pub fg: Color,
    /// Secondary text (labels, hints)
    pub dim: Color,
    /// Card borders
    pub border: Color,
    /// Card titles and the header
    pub title: Color,
    /// Interactive accents (search box, selection)
    pub accent: Color,
    /// Error banner
    pub error: Color,
    /// Alert card
    pub warning: Color,
    /// Max-temperature chart series
    pub chart_max: Color,
    /// Min-temperature chart series
    pub chart_min: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                dim: Color::Gray,
                border: Color::DarkGray,
                title: Color::LightBlue,
                accent: Color::LightBlue,
                error: Color::LightRed,
                warning: Color::Yellow,
                chart_max: Color::LightRed,
                chart_min: Color::LightBlue,
            },
            Theme::Light => Self {
                fg: Color::Black,
                dim: Color::DarkGray,
                border: Color::Gray,
                title: Color::Blue,
                accent: Color::Blue,
                error: Color::Red,
                warning: Color::Yellow,
                chart_max: Color::Red,
                chart_min: Color::Blue,
            },
        }
    }
}
