use ratatui::style::Color;

/// Severity of a log line or toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// How a severity is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    /// Foreground for the log message. `Color::Reset` keeps the terminal default.
    pub text: Color,
    /// Glyph shown in front of a toast title.
    pub icon: &'static str,
    pub icon_color: Color,
}

// Indexed by `Severity as usize`; keep in declaration order.
const STYLES: [SeverityStyle; 4] = [
    SeverityStyle {
        text: Color::Reset,
        icon: "ℹ",
        icon_color: Color::Cyan,
    },
    SeverityStyle {
        text: Color::Green,
        icon: "✔",
        icon_color: Color::Green,
    },
    SeverityStyle {
        text: Color::Yellow,
        icon: "⚠",
        icon_color: Color::Yellow,
    },
    SeverityStyle {
        text: Color::Red,
        icon: "✖",
        icon_color: Color::Red,
    },
];

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
    ];

    pub fn style(self) -> &'static SeverityStyle {
        &STYLES[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lines_up_with_variants() {
        assert_eq!(Severity::Info.style().text, Color::Reset);
        assert_eq!(Severity::Success.style().text, Color::Green);
        assert_eq!(Severity::Warning.style().icon, "⚠");
        assert_eq!(Severity::Error.style().icon_color, Color::Red);
    }

    #[test]
    fn every_severity_has_a_distinct_icon() {
        let mut icons: Vec<_> = Severity::ALL.iter().map(|s| s.style().icon).collect();
        icons.dedup();
        assert_eq!(icons.len(), Severity::ALL.len());
    }
}
