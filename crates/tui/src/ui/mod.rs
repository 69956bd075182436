pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::WizardStep;

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    let content = layout[2];
    match state.section {
        Section::Overview => screens::overview::render(frame, content, state),
        Section::Send => screens::send::render(frame, content, state),
        Section::Ledger => screens::ledger::render(frame, content, state),
        Section::Settings => screens::settings::render(frame, content, state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);

    // The biometric gate overlays everything while open.
    screens::send::render_biometric_modal(frame, area, state);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let currency = state.store.preferences().currency;
    let rows = state.store.transactions().len();

    let line = Line::from(vec![
        Span::styled(
            "REMITRAX",
            Style::default()
                .fg(theme.accent)
                .add_modifier(ratatui::style::Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Currency", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {currency}  ")),
        Span::styled("Ledger", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {rows} rows  ")),
        Span::styled("SYSTEMS: OPTIMAL", Style::default().fg(theme.positive)),
        Span::raw("  "),
        Span::styled("NET: HYPERLINK", Style::default().fg(theme.accent)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Returns context-specific keyboard hints for the current section and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    if state.biometric.is_some() {
        return vec![
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" abort protocol"),
        ];
    }

    match state.section {
        Section::Overview => vec![
            Span::styled("s", Style::default().fg(theme.accent)),
            Span::raw(" send  "),
            Span::styled("l", Style::default().fg(theme.accent)),
            Span::raw(" ledger"),
        ],
        Section::Send => get_send_hints(state, theme),
        Section::Ledger => vec![
            Span::styled("c", Style::default().fg(theme.accent)),
            Span::raw(" filter  "),
            Span::styled("j", Style::default().fg(theme.accent)),
            Span::raw("/"),
            Span::styled("k", Style::default().fg(theme.accent)),
            Span::raw(" move"),
        ],
        Section::Settings => Vec::new(),
    }
}

fn get_send_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    match state.send.wizard.step() {
        WizardStep::Entry => vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" field  "),
            Span::styled("←/→", Style::default().fg(theme.accent)),
            Span::raw(" rail  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" review  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" leave"),
        ],
        WizardStep::Review => vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" authorize  "),
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" adjust"),
        ],
        WizardStep::Confirmed => vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" return"),
        ],
    }
}
