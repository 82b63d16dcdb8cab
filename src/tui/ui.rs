use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph, Tabs, Wrap};

use crate::assessment::{SCORE_MAX, WEIGHT_SUM_TOLERANCE};
use crate::tui::app::{App, InputMode, Page};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App, colors: &ThemeColors) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app, colors);
    render_tabs(frame, chunks[1], app, colors);
    render_body(frame, chunks[2], app, colors);
    render_status_bar(frame, chunks[3], app, colors);

    match app.input_mode {
        InputMode::Editing => render_edit_popup(frame, app, colors),
        InputMode::Help => render_help_popup(frame, colors),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let left = "airval";
    let right = format!(
        "{} | {}, {}",
        app.profile.company, app.profile.analyst, app.profile.firm
    );
    let padding = (area.width as usize)
        .saturating_sub(left.len() + right.chars().count());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(colors.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let titles: Vec<String> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| format!("{} {}", i + 1, page.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.page.index())
        .style(Style::default().fg(colors.muted))
        .highlight_style(Style::default().fg(colors.title_color).bold().reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    match app.page {
        Page::Profile => render_profile_page(frame, area, app, colors),
        Page::Dimensions => render_dimensions_page(frame, area, app, colors),
        Page::Weights => render_weights_page(frame, area, app, colors),
        Page::Valuation => render_valuation_page(frame, area, app, colors),
        Page::Narrative => render_narrative_page(frame, area, app, colors),
    }
}

fn render_profile_page(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).split(area);

    let intro = format!(
        "As {}, a Portfolio Manager at {}, you are preparing the exit of {}. \
         Rate its AI capabilities, weight the dimensions, project the valuation uplift, \
         and generate the narrative report.",
        app.profile.analyst, app.profile.firm, app.profile.company
    );
    frame.render_widget(
        Paragraph::new(intro)
            .style(Style::default().fg(colors.muted))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    render_field_list(frame, chunks[1], app, colors);
}

fn render_dimensions_page(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .split(area);

    render_field_list(frame, chunks[0], app, colors);

    let rows = [
        ("Visible", app.scores.visible),
        ("Documented", app.scores.documented),
        ("Sustainable", app.scores.sustainable),
    ];
    let bar_lines: Vec<Line> = rows
        .iter()
        .map(|(label, value)| {
            let mut spans = vec![Span::raw(format!("{:<12} ", label))];
            spans.extend(score_bar(*value, SCORE_MAX, 30, colors).spans);
            spans.push(Span::styled(
                format!(" {:>3.0}", value),
                Style::default().fg(colors.score_color(*value)),
            ));
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(bar_lines), chunks[1]);

    let info = vec![
        Line::from("Visible: how clearly buyers perceive the AI in products and stack."),
        Line::from("Documented: auditable financial return on AI investments."),
        Line::from("Sustainable: integration depth, governance, talent, scalability."),
    ];
    frame.render_widget(
        Paragraph::new(info)
            .style(Style::default().fg(colors.muted))
            .wrap(Wrap { trim: true }),
        chunks[2],
    );
}

fn render_weights_page(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    render_field_list(frame, chunks[0], app, colors);

    let sum = app.weights.sum();
    let sum_style = if (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
        Style::default().fg(colors.muted)
    } else {
        Style::default().fg(colors.warning)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("Sum of weights: {:.2}", sum),
            sum_style,
        ))),
        chunks[1],
    );

    let result_lines: Vec<Line> = match app.score {
        Some(result) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Exit-AI-R Score: {:.2}", result.score),
                    Style::default().fg(colors.score_color(result.score)).bold(),
                )),
                Line::from(format!(
                    "Weights used: visible {:.2} | documented {:.2} | sustainable {:.2}",
                    result.weights_used.visible,
                    result.weights_used.documented,
                    result.weights_used.sustainable
                )),
            ];
            match result.notice {
                Some(crate::assessment::WeightNotice::Normalized { original_sum }) => {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "Weights summed to {:.2}; normalized to 1.00 for calculation.",
                            original_sum
                        ),
                        Style::default().fg(colors.warning),
                    )));
                }
                Some(crate::assessment::WeightNotice::ZeroSum) => {
                    lines.push(Line::from(Span::styled(
                        "Weights sum to zero and cannot be normalized; score reported as 0.00.",
                        Style::default().fg(colors.flash_error),
                    )));
                }
                None => {}
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "Press c to compute the Exit-AI-R score.",
            Style::default().fg(colors.muted),
        ))],
    };
    frame.render_widget(Paragraph::new(result_lines), chunks[2]);
}

fn render_valuation_page(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    if app.score.is_none() {
        render_gating_notice(
            frame,
            area,
            colors,
            "Compute the Exit-AI-R score on the Weights page to proceed with valuation projection.",
        );
        return;
    }

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).split(area);

    render_field_list(frame, chunks[0], app, colors);

    let body: Vec<Line> = match app.valuation {
        Some(result) => {
            let max = result.baseline.max(result.projected);
            let mut lines = vec![
                Line::from(format!("Baseline EBITDA multiple:  {:.2}x", result.baseline)),
                Line::from(Span::styled(
                    format!("Projected EBITDA multiple: {:.2}x", result.projected),
                    Style::default().bold(),
                )),
                Line::from(Span::styled(
                    format!("Implied uplift: {:+.2}x", result.uplift()),
                    Style::default().fg(colors.flash_success),
                )),
                Line::from(""),
            ];
            for (label, value) in [("Baseline", result.baseline), ("Projected", result.projected)] {
                let mut spans = vec![Span::raw(format!("{:<10} ", label))];
                spans.extend(score_bar(value, max, 30, colors).spans);
                spans.push(Span::raw(format!(" {:.2}x", value)));
                lines.push(Line::from(spans));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "Press p to project the valuation uplift.",
            Style::default().fg(colors.muted),
        ))],
    };
    frame.render_widget(Paragraph::new(body), chunks[1]);
}

fn render_narrative_page(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    if app.valuation.is_none() {
        render_gating_notice(
            frame,
            area,
            colors,
            "Complete the valuation projection to generate the narrative report.",
        );
        return;
    }

    match app.narrative {
        Some(ref narrative) => {
            let block = Block::bordered().title(" AI Exit Narrative Report ");
            let paragraph = Paragraph::new(narrative.as_str())
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((app.narrative_scroll, 0));
            frame.render_widget(paragraph, area);
        }
        None => {
            let msg = Paragraph::new(Span::styled(
                "Press g to generate the AI exit narrative.",
                Style::default().fg(colors.muted),
            ));
            frame.render_widget(msg, area);
        }
    }
}

fn render_gating_notice(frame: &mut Frame, area: Rect, colors: &ThemeColors, text: &str) {
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(colors.warning))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_field_list(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let editing = app.input_mode == InputMode::Editing;

    let lines: Vec<Line> = app
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let selected = idx == app.field_cursor;
            let value = app.field_value(*field);
            let text = format!(" {:<36} {}", field.label(), value);

            if selected && editing {
                Line::from(Span::styled(text, colors.field_editing))
            } else if selected {
                Line::from(Span::styled(text, colors.field_selected))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<36} ", field.label()),
                        Style::default().fg(colors.field_label),
                    ),
                    Span::raw(value),
                ])
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, colors: &ThemeColors) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed")
            || msg.starts_with("Error")
            || msg.starts_with("Invalid")
            || msg.contains("cannot be")
            || msg.contains("must be within")
        {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.page {
            Page::Profile => &[
                ("j/k", ":field "),
                ("Enter", ":edit "),
                ("Tab", ":next page "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Page::Dimensions => &[
                ("j/k", ":field "),
                ("h/l", ":adjust "),
                ("Enter", ":edit "),
                ("Tab", ":next page "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Page::Weights => &[
                ("j/k", ":field "),
                ("h/l", ":adjust "),
                ("c", ":compute "),
                ("Tab", ":next page "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Page::Valuation => &[
                ("j/k", ":field "),
                ("h/l", ":adjust "),
                ("p", ":project "),
                ("Tab", ":next page "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Page::Narrative => &[
                ("g", ":generate "),
                ("w", ":write file "),
                ("j/k", ":scroll "),
                ("R", ":reset "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(colors.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

fn score_bar(value: f64, max: f64, width: usize, colors: &ThemeColors) -> Line<'static> {
    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(colors.bar_filled),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(colors.bar_empty),
        ));
    }

    Line::from(spans)
}

/// Render the field edit popup
fn render_edit_popup(frame: &mut Frame, app: &App, colors: &ThemeColors) {
    let Some(field) = app.current_field() else {
        return;
    };

    let popup_area = centered_rect_fixed(44, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(format!(" {} ", field.label()))
        .border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let chunks =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    let input_text = format!("{}|", app.edit_buffer);
    frame.render_widget(Paragraph::new(input_text), chunks[0]);

    let help = match field.numeric_spec() {
        Some((min, max, _)) => format!("Enter: confirm | Esc: cancel | range {}-{}", min, max),
        None => "Enter: confirm | Esc: cancel".to_string(),
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(colors.muted)),
        chunks[1],
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 18, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("Tab / Shift-Tab ", key_style),
            Span::raw("Next / previous page"),
        ]),
        Line::from(vec![
            Span::styled("1-5             ", key_style),
            Span::raw("Jump to page"),
        ]),
        Line::from(vec![
            Span::styled("j / k           ", key_style),
            Span::raw("Select field (scroll on Narrative)"),
        ]),
        Line::from(vec![
            Span::styled("h / l           ", key_style),
            Span::raw("Adjust value by one step"),
        ]),
        Line::from(vec![
            Span::styled("Enter           ", key_style),
            Span::raw("Edit the selected field"),
        ]),
        Line::from(vec![
            Span::styled("c               ", key_style),
            Span::raw("Compute the Exit-AI-R score"),
        ]),
        Line::from(vec![
            Span::styled("p               ", key_style),
            Span::raw("Project the valuation uplift"),
        ]),
        Line::from(vec![
            Span::styled("g               ", key_style),
            Span::raw("Generate the narrative report"),
        ]),
        Line::from(vec![
            Span::styled("w               ", key_style),
            Span::raw("Write the report to a file"),
        ]),
        Line::from(vec![
            Span::styled("R               ", key_style),
            Span::raw("Reset the session to defaults"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c      ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(colors.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}
