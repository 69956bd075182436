use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{components::card::Card, theme::Theme},
};

/// Read-only view of the static user records; nothing here is editable.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let prefs = state.store.preferences();
    let security = state.store.security_profile();

    let mfa = security
        .mfa_methods
        .iter()
        .map(|method| method.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let approvals = if security.approval_required_by.is_empty() {
        "none".to_string()
    } else {
        security.approval_required_by.join(", ")
    };

    let lines = vec![
        Line::from(Span::styled(
            "Settings are automatically synchronized with your neural profile.",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Currency               ", Style::default().fg(theme.dim)),
            Span::styled(prefs.currency.code(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("Default carbon offset  ", Style::default().fg(theme.dim)),
            Span::styled(
                format!("{:.2}", prefs.default_carbon_offset),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("Theme                  ", Style::default().fg(theme.dim)),
            Span::styled(prefs.theme.as_str(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("MFA methods            ", Style::default().fg(theme.dim)),
            Span::styled(mfa, Style::default().fg(theme.accent)),
        ]),
        Line::from(vec![
            Span::styled("Approvals required by  ", Style::default().fg(theme.dim)),
            Span::styled(approvals, Style::default().fg(theme.text)),
        ]),
    ];

    Card::new("Configuration Node", &theme).render_with(frame, area, Paragraph::new(lines));
}
