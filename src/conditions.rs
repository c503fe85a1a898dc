//! Condition classification for icon selection
//!
//! Maps the backend's free-text condition strings onto display glyphs and
//! colors, and classifies the observation time as day or night. The mapping
//! is an ordered table evaluated top-to-bottom, so precedence between
//! overlapping substrings ("drizzle" vs "rain") is explicit data rather than
//! branch order.

use ratatui::style::Color;

/// Returns true when the given time falls outside daylight.
///
/// Boundary equality counts as day: an observation exactly at sunrise or
/// sunset uses the day icon.
pub fn is_night(now_epoch: i64, sunrise_epoch: i64, sunset_epoch: i64) -> bool {
    now_epoch < sunrise_epoch || now_epoch > sunset_epoch
}

/// A display icon: glyph plus color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionIcon {
    /// Glyph rendered in the dashboard
    pub glyph: &'static str,
    /// Color the glyph is drawn in
    pub color: Color,
}

/// One row of the condition table
#[derive(Debug, Clone, Copy)]
pub struct ConditionRule {
    /// Substrings that select this row (any match)
    pub patterns: &'static [&'static str],
    /// Icon used during daylight
    pub day: ConditionIcon,
    /// Icon used at night
    pub night: ConditionIcon,
}

/// Default icon for unrecognized conditions
pub const DEFAULT_ICON: ConditionIcon = ConditionIcon {
    glyph: "\u{2601}", // ☁
    color: Color::DarkGray,
};

/// Ordered condition table; first matching row wins.
///
/// Drizzle is listed before rain so that mixed descriptions like
/// "light rain and drizzle" pick the drizzle icon.
pub const CONDITION_TABLE: &[ConditionRule] = &[
    ConditionRule {
        patterns: &["clear"],
        day: ConditionIcon {
            glyph: "\u{2600}", // ☀
            color: Color::Yellow,
        },
        night: ConditionIcon {
            glyph: "\u{1F319}", // 🌙
            color: Color::Gray,
        },
    },
    rule(
        &["thunderstorm"],
        ConditionIcon {
            glyph: "\u{26C8}", // ⛈
            color: Color::LightYellow,
        },
    ),
    rule(
        &["drizzle"],
        ConditionIcon {
            glyph: "\u{1F326}", // 🌦
            color: Color::LightCyan,
        },
    ),
    rule(
        &["rain", "shower"],
        ConditionIcon {
            glyph: "\u{1F327}", // 🌧
            color: Color::Blue,
        },
    ),
    rule(
        &["snow"],
        ConditionIcon {
            glyph: "\u{2744}", // ❄
            color: Color::LightBlue,
        },
    ),
    rule(
        &["wind"],
        ConditionIcon {
            glyph: "\u{1F4A8}", // 💨
            color: Color::Gray,
        },
    ),
    rule(
        &["cloudy", "overcast"],
        ConditionIcon {
            glyph: "\u{2601}", // ☁
            color: Color::DarkGray,
        },
    ),
];

/// Builds a row whose icon does not vary between day and night.
const fn rule(patterns: &'static [&'static str], icon: ConditionIcon) -> ConditionRule {
    ConditionRule {
        patterns,
        day: icon,
        night: icon,
    }
}

/// Selects the display icon for a condition string.
///
/// The text is lowercased and checked against `CONDITION_TABLE` in order;
/// unmatched conditions fall back to `DEFAULT_ICON`.
pub fn icon_for(conditions: &str, night: bool) -> ConditionIcon {
    let lower = conditions.to_lowercase();

    for rule in CONDITION_TABLE {
        if rule.patterns.iter().any(|p| lower.contains(p)) {
            return if night { rule.night } else { rule.day };
        }
    }

    DEFAULT_ICON
}
