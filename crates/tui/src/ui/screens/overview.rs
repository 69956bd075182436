use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use engine::TransactionKind;

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::render_bar_chart,
        },
        theme::Theme,
    },
};

/// Static weekly activity sample behind the chart; not derived from the
/// ledger.
const WEEKLY_ACTIVITY: [(&str, u64); 7] = [
    ("Mon", 400),
    ("Tue", 300),
    ("Wed", 600),
    ("Thu", 800),
    ("Fri", 500),
    ("Sat", 900),
    ("Sun", 1100),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stat cards
            Constraint::Min(8),    // Chart + recent transactions
        ])
        .split(area);

    render_stat_cards(frame, layout[0], state, &theme);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    render_bar_chart(frame, cols[0], "Activity Vectors", &WEEKLY_ACTIVITY, &theme);
    render_recent_transactions(frame, cols[1], state, &theme);
}

fn render_stat_cards(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let currency = state.store.preferences().currency;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    // Sample balance figure; there is no real account behind the dashboard.
    StatCard::new("Available Balance", "$245,670.00", theme)
        .value_style(Style::default().fg(theme.text))
        .subtitle("+12.5% this month")
        .render(frame, cols[0]);

    let spent = state.store.total_spent().format(currency);
    let transfers = state.store.transactions().len();
    StatCard::new("Total Spent", spent, theme)
        .value_style(Style::default().fg(theme.negative))
        .subtitle(format!("across {transfers} ledger rows"))
        .render(frame, cols[1]);

    let carbon = state.store.total_carbon_kg();
    StatCard::new("Carbon Impact", format!("{carbon:.2}kg CO2e"), theme)
        .value_style(Style::default().fg(theme.accent))
        .subtitle("15% below regional average")
        .render(frame, cols[2]);
}

fn render_recent_transactions(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let currency = state.store.preferences().currency;

    let card = Card::new("Recent Pulsations", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let items: Vec<ListItem> = state
        .store
        .transactions()
        .iter()
        .take(5)
        .map(|tx| {
            let (sign, amount_color) = match tx.kind {
                TransactionKind::Expense => ("-", theme.negative),
                TransactionKind::Income => ("+", theme.positive),
                TransactionKind::ScheduledExpense => ("-", theme.text_muted),
            };
            let amount = format!("{sign}{}", tx.amount.format(currency));

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", tx.date.format("%Y-%m-%d")),
                    Style::default().fg(theme.dim),
                ),
                Span::styled(
                    format!("{:<34}", truncate(&tx.description, 32)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(format!("{amount:>12}"), Style::default().fg(amount_color)),
                Span::raw("  "),
                Span::styled(tx.category.clone(), Style::default().fg(theme.text_muted)),
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No activity yet",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
    } else {
        frame.render_widget(List::new(items), inner);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
