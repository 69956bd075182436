use ratatui::style::Color;

/// Dark slate palette with a cyan accent.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Rgb(30, 41, 59),
            border_focused: Color::Rgb(6, 182, 212),
            text: Color::Rgb(241, 245, 249),
            text_muted: Color::Rgb(148, 163, 184),
            dim: Color::Rgb(100, 116, 139),
            accent: Color::Rgb(6, 182, 212),
            positive: Color::Rgb(74, 222, 128),
            negative: Color::Rgb(248, 113, 113),
            warning: Color::Rgb(234, 179, 8),
            error: Color::Rgb(239, 68, 68),
        }
    }
}
