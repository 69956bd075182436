use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use engine::TransactionKind;

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_rows(frame, layout[1], state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rows = state.ledger.filtered(&state.store).len();

    let line = vec![
        Span::styled("Filter", Style::default().fg(theme.dim)),
        Span::styled(
            format!(": {}   ", state.ledger.filter.label()),
            Style::default().fg(theme.accent),
        ),
        Span::styled("Rows", Style::default().fg(theme.dim)),
        Span::raw(format!(": {rows}   ")),
        Span::styled(
            "Full immutable history of all platform activities.",
            Style::default().fg(theme.text_muted),
        ),
    ];

    let block = Block::default()
        .title(Span::styled(
            " Ledger Matrix ",
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let currency = state.store.preferences().currency;
    let transactions = state.ledger.filtered(&state.store);

    let items: Vec<ListItem> = transactions
        .iter()
        .map(|tx| {
            let date = tx.date.format("%Y-%m-%d").to_string();
            let fragment: String = tx.id.chars().skip(4).take(6).collect();
            let amount_color = match tx.kind {
                TransactionKind::Expense => theme.text,
                TransactionKind::Income => theme.positive,
                TransactionKind::ScheduledExpense => theme.accent,
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{date}  "), Style::default().fg(theme.text)),
                Span::styled(
                    format!("TX-{fragment:<8}"),
                    Style::default().fg(theme.dim),
                ),
                Span::styled(
                    format!("{:<36}", truncate(&tx.description, 34)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:<18}", tx.category.to_uppercase()),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(
                    format!("{:>12}", tx.amount.format(currency)),
                    Style::default().fg(amount_color),
                ),
                Span::styled(
                    format!("  {:>8.3}kg", tx.carbon_footprint_kg),
                    Style::default().fg(theme.positive),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.ledger.selected.min(items.len() - 1)));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
