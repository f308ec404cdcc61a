//! Terminal colours and glyphs for rendered results

use colored::{ColoredString, Colorize};
use ratatui::style::Color;
use rms_search::{BadgeColor, Leading, render::IMAGE_PLACEHOLDER};

/// Map a badge colour to a terminal colour for ratatui
pub fn badge_to_ratatui(color: BadgeColor) -> Color {
    match color {
        BadgeColor::Warning => Color::Yellow,
        BadgeColor::Info => Color::Cyan,
        BadgeColor::Primary => Color::Blue,
        BadgeColor::Success => Color::Green,
        BadgeColor::Danger => Color::Red,
        BadgeColor::Secondary => Color::Gray,
    }
}

pub fn badge_colored(text: &str, color: BadgeColor) -> ColoredString {
    match color {
        BadgeColor::Warning => text.yellow(),
        BadgeColor::Info => text.cyan(),
        BadgeColor::Primary => text.blue(),
        BadgeColor::Success => text.green(),
        BadgeColor::Danger => text.red(),
        BadgeColor::Secondary => text.dimmed(),
    }
}

/// Short text for the leading element of a row
pub fn leading_text(leading: &Leading) -> String {
    match leading {
        Leading::Avatar(initial) => format!("({})", initial.to_uppercase()),
        Leading::Image(_) => "[img]".to_string(),
        Leading::ImagePlaceholder => format!("[{IMAGE_PLACEHOLDER}]"),
        Leading::Badge { label, .. } => format!("[{label}]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_glyphs() {
        assert_eq!(leading_text(&Leading::Avatar('a')), "(A)");
        assert_eq!(leading_text(&Leading::Image("/m/p.png".into())), "[img]");
        assert_eq!(leading_text(&Leading::ImagePlaceholder), "[▣]");
        assert_eq!(
            leading_text(&Leading::Badge {
                label: "Ready".into(),
                color: BadgeColor::Success
            }),
            "[Ready]"
        );
    }

    #[test]
    fn badges_have_distinct_colors() {
        assert_eq!(badge_to_ratatui(BadgeColor::Danger), Color::Red);
        assert_eq!(badge_to_ratatui(BadgeColor::Success), Color::Green);
        assert_ne!(
            badge_to_ratatui(BadgeColor::Info),
            badge_to_ratatui(BadgeColor::Primary)
        );
    }
}
