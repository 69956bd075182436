use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use engine::{ScanState, WizardStep};

use crate::{
    app::{AppState, SendFocus},
    ui::{
        components::{card::Card, centered_rect, charts::percentage_bar},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_step_indicator(frame, layout[0], state, &theme);

    match state.send.wizard.step() {
        WizardStep::Entry => render_entry(frame, layout[1], state, &theme),
        WizardStep::Review => render_review(frame, layout[1], state, &theme),
        WizardStep::Confirmed => render_confirmed(frame, layout[1], state, &theme),
    }
}

fn render_step_indicator(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let current = state.send.wizard.step().number();

    let mut spans = vec![
        Span::styled("Dispatch Asset", Style::default().fg(theme.text)),
        Span::raw("  "),
    ];
    for step in 1..=3u8 {
        let style = if current >= step {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        };
        spans.push(Span::styled("━━", style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("step {current}/3"),
        Style::default().fg(theme.dim),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_entry(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_parameters(frame, cols[0], state, theme);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Audit panel
            Constraint::Length(5), // Rail stats
            Constraint::Min(4),    // Intelligence note
        ])
        .split(cols[1]);

    render_audit_panel(frame, side[0], state, theme);
    render_rail_stats(frame, side[1], theme);
    render_intelligence_note(frame, side[2], theme);
}

fn render_parameters(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Transmission Parameters", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Rail selector
            Constraint::Length(2), // Recipient search
            Constraint::Length(4), // Resolved recipient
            Constraint::Length(2), // Amount
            Constraint::Min(1),    // Submit
        ])
        .split(inner);

    render_rail_selector(frame, rows[0], state, theme);
    render_search_field(frame, rows[1], state, theme);
    render_resolved_recipient(frame, rows[2], state, theme);
    render_amount_field(frame, rows[3], state, theme);
    render_submit_hint(frame, rows[4], state, theme);
}

/// Field caption; the focused field carries the accent color.
fn field_label(name: &str, focused: bool, theme: &Theme) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    Span::styled(format!("{name:<20} "), style)
}

fn cursor(focused: bool, theme: &Theme) -> Span<'static> {
    if focused {
        Span::styled("▏", Style::default().fg(theme.accent))
    } else {
        Span::raw("")
    }
}

fn render_rail_selector(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.send.focus == SendFocus::Rail;
    let selected = state.send.wizard.rail();

    let mut spans = vec![field_label("Rail", focused, theme)];
    for (i, rail) in engine::PaymentRail::ALL.iter().enumerate() {
        if *rail == selected {
            spans.push(Span::styled(
                format!("[{} {}]", i + 1, rail.label()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} {} ", i + 1, rail.label()),
                Style::default().fg(theme.dim),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_field(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.send.focus == SendFocus::Search;
    let term = state.send.wizard.search_term();

    let line = Line::from(vec![
        field_label("Recipient Nexus ID", focused, theme),
        Span::styled(term.to_string(), Style::default().fg(theme.text)),
        cursor(focused, theme),
        Span::styled(
            if term.is_empty() {
                "  enter @quantum_tag or name…"
            } else {
                ""
            },
            Style::default().fg(theme.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_resolved_recipient(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(recipient) = state.send.wizard.selected() else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  no recipient resolved",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    };

    let address = recipient
        .quantum_tag
        .as_deref()
        .or(recipient.cashtag.as_deref())
        .or(recipient.neuro_link_address.as_deref())
        .unwrap_or(recipient.id.as_str());

    let lines = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                recipient.name.clone(),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ID: {}", recipient.id.to_uppercase()),
                Style::default().fg(theme.accent),
            ),
            Span::styled(
                format!("  {address}"),
                Style::default().fg(theme.text_muted),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Trust ", Style::default().fg(theme.dim)),
            Span::styled(
                percentage_bar(recipient.trust_score as u16, 10),
                Style::default().fg(theme.positive),
            ),
            Span::styled(
                format!("  KYC: {}", recipient.kyc_status.as_str().to_uppercase()),
                Style::default().fg(theme.warning),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_amount_field(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.send.focus == SendFocus::Amount;
    let currency = state.store.preferences().currency;
    let input = state.send.wizard.amount_input();

    let line = Line::from(vec![
        field_label("Asset Magnitude", focused, theme),
        Span::styled(currency.symbol(), Style::default().fg(theme.dim)),
        Span::styled(
            if input.is_empty() { "0.00" } else { input },
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        cursor(focused, theme),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_submit_hint(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = if state.send.wizard.can_submit() {
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::styled(
                " ▸ INITIATE REVIEW CYCLE",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        // Guard not met: the action is inert, not an error.
        Line::from(Span::styled(
            "INITIATE REVIEW CYCLE (needs amount + recipient)",
            Style::default().fg(theme.dim),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_audit_panel(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Security Audit Matrix", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let Some(audit) = state.send.wizard.audit() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Real-time heuristic scan in progress...",
                Style::default().fg(theme.warning),
            )))
            .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };

    let score_color = if audit.risk_score < 30 {
        theme.positive
    } else {
        theme.negative
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("RISK SCORE ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{}/100", audit.risk_score),
            Style::default().fg(score_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            percentage_bar(audit.risk_score as u16, 10),
            Style::default().fg(score_color),
        ),
    ])];
    lines.push(Line::from(Span::styled(
        format!(
            "fraud p={:.2}  AML: PASS  sanctions: PASS",
            audit.fraud_probability
        ),
        Style::default().fg(theme.text_muted),
    )));
    for recommendation in audit.recommendations.iter().take(2) {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(theme.accent)),
            Span::styled(recommendation.clone(), Style::default().fg(theme.text_muted)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_rail_stats(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Latency     ", Style::default().fg(theme.dim)),
            Span::styled("1.2ms", Style::default().fg(theme.positive)),
        ]),
        Line::from(vec![
            Span::styled("Throughput  ", Style::default().fg(theme.dim)),
            Span::styled("2.4m TPS", Style::default().fg(theme.accent)),
        ]),
        Line::from(vec![
            Span::styled("Security    ", Style::default().fg(theme.dim)),
            Span::styled("QUANTUM_LOCK", Style::default().fg(theme.warning)),
        ]),
    ];
    Card::new("Rail Stats", theme).render_with(frame, area, Paragraph::new(lines));
}

fn render_intelligence_note(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let note = Paragraph::new(Span::styled(
        "\"Select a recipient and specify an amount to receive real-time \
         predictive financial analytics and route optimization insights.\"",
        Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::ITALIC),
    ))
    .wrap(Wrap { trim: true });

    Card::new("Remitrax Intelligence", theme).render_with(frame, area, note);
}

fn render_review(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_review_summary(frame, cols[0], state, theme);
    render_insight_panel(frame, cols[1], state, theme);
}

fn render_review_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Transaction Integrity Review", theme).focused(true);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let wizard = &state.send.wizard;
    let currency = state.store.preferences().currency;
    let amount = wizard
        .parsed_amount()
        .map(|a| a.format(currency))
        .unwrap_or_else(|| "-".to_string());

    let recipient = wizard
        .selected()
        .map(|r| r.name.clone())
        .unwrap_or_else(|| wizard.search_term().to_string());
    let address = wizard
        .selected()
        .and_then(|r| r.quantum_tag.clone())
        .unwrap_or_else(|| {
            wizard
                .selected()
                .map(|r| r.id.clone())
                .unwrap_or_default()
        });

    let lines = vec![
        Line::from(vec![
            Span::styled("Magnitude  ", Style::default().fg(theme.dim)),
            Span::styled(
                amount,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} FIAT_RESERVE", currency.code()),
                Style::default().fg(theme.accent),
            ),
        ]),
        Line::from(vec![
            Span::styled("Recipient  ", Style::default().fg(theme.dim)),
            Span::styled(recipient, Style::default().fg(theme.text)),
            Span::styled(format!("  {address}"), Style::default().fg(theme.text_muted)),
        ]),
        Line::from(vec![
            Span::styled("Rail       ", Style::default().fg(theme.dim)),
            Span::styled(
                wizard.rail().as_str().to_uppercase(),
                Style::default().fg(theme.accent),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Fee Protocol     ", Style::default().fg(theme.dim)),
            Span::styled("$2.40", Style::default().fg(theme.text)),
            Span::styled("  DYNAMIC_OPT", Style::default().fg(theme.dim)),
        ]),
        Line::from(vec![
            Span::styled("Time to finality ", Style::default().fg(theme.dim)),
            Span::styled("~1.5 seconds", Style::default().fg(theme.text)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[a]", Style::default().fg(theme.accent)),
            Span::raw(" Adjust   "),
            Span::styled("[Enter]", Style::default().fg(theme.accent)),
            Span::styled(
                " Authorize Final Dispatch",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_insight_panel(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Intelligence Vector", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if state.send.wizard.loading_insights() {
        let shimmer = vec![
            Line::from(Span::styled("▒▒▒▒▒▒▒▒▒▒▒▒▒▒", Style::default().fg(theme.border))),
            Line::from(Span::styled(
                "▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒",
                Style::default().fg(theme.border),
            )),
            Line::from(Span::styled("▒▒▒▒▒▒▒▒▒▒", Style::default().fg(theme.border))),
        ];
        frame.render_widget(Paragraph::new(shimmer), inner);
        return;
    }

    let lines: Vec<Line> = state
        .send
        .wizard
        .insights()
        .iter()
        .map(|insight| {
            Line::from(vec![
                Span::styled("✦ ", Style::default().fg(theme.warning)),
                Span::styled(insight.clone(), Style::default().fg(theme.text_muted)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_confirmed(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let popup = centered_rect(60, 70, area);
    let card = Card::new("Transmission Verified", theme).focused(true);
    let inner = card.inner(popup);
    card.render_frame(frame, popup);

    let rail = state.send.wizard.rail().as_str().to_uppercase();
    let (tx_id, dlt_hash) = state
        .send
        .receipt
        .as_ref()
        .map(|r| (r.transaction_id.clone(), r.dlt_hash.clone()))
        .unwrap_or_else(|| ("-".to_string(), "-".to_string()));

    let lines = vec![
        Line::from(Span::styled(
            "✓",
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            format!("Assets successfully dispatched via {rail} rail."),
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(vec![
            Span::styled("DLT_HASH     ", Style::default().fg(theme.dim)),
            Span::styled(dlt_hash, Style::default().fg(theme.accent)),
        ]),
        Line::from(vec![
            Span::styled("TX_IDENTITY  ", Style::default().fg(theme.dim)),
            Span::styled(tx_id, Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("STABILITY    ", Style::default().fg(theme.dim)),
            Span::styled("NOMINAL_CONSENSUS", Style::default().fg(theme.positive)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(theme.accent)),
            Span::raw(" Return to Nexus"),
        ])
        .alignment(Alignment::Center),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Overlay shown while the biometric gate is open; renders above every
/// section.
pub fn render_biometric_modal(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let Some(gate) = &state.biometric else {
        return;
    };
    let theme = Theme::default();

    let popup = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " Identity Authentication ",
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Clearance line
            Constraint::Min(5),    // Preview box
            Constraint::Length(2), // Status + abort
        ])
        .split(inner);

    let rail = state.send.wizard.rail().as_str().to_uppercase();
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("Clearance required for {rail} transfer"),
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center),
        rows[0],
    );

    render_preview(frame, rows[1], gate.sequence.state(), gate.sequence.camera_active(), &theme);

    let status = Line::from(vec![
        Span::styled("● ", Style::default().fg(theme.accent)),
        Span::styled(
            format!("{}: ENCRYPTED_CHANNEL", gate.sequence.state().label()),
            Style::default().fg(theme.accent),
        ),
        Span::raw("   "),
        Span::styled("Esc", Style::default().fg(theme.dim)),
        Span::styled(" abort protocol", Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        rows[2],
    );
}

fn render_preview(
    frame: &mut Frame<'_>,
    area: Rect,
    state: ScanState,
    camera_active: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = match state {
        ScanState::Scanning => Line::from(Span::styled(
            if camera_active {
                "▒▒ scanning biometric vectors ▒▒"
            } else {
                "scanning (no preview feed)"
            },
            Style::default().fg(theme.accent),
        )),
        ScanState::Verifying => Line::from(Span::styled(
            "Syncing Quantum States...",
            Style::default().fg(theme.accent),
        )),
        ScanState::Success => Line::from(Span::styled(
            "✓ IDENTITY CONFIRMED",
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        )),
        ScanState::Error => Line::from(Span::styled(
            "CAMERA OFFLINE — NO SIGNAL",
            Style::default().fg(theme.error),
        )),
    };

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        inner,
    );
}
