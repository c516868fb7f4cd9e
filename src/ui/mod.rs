use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::app::state::{AppState, FocusPane, ListRow};
use crate::catalog::StaffRecord;
use crate::config::themes::Palette;
use crate::config::AppConfig;
use crate::highlight::build_highlight_regex;

const DETAIL_HEADER_HEIGHT: u16 = 8;

pub fn draw_app(frame: &mut Frame, state: &AppState, config: &AppConfig, list_state: &mut ListState) {
    let palette = Palette::for_theme(config.theme);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(frame.size());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(vertical[0]);

    draw_directory(frame, columns[0], state, config, &palette, list_state);
    draw_detail(frame, columns[1], state, config, &palette);

    let status = Paragraph::new(build_status_line(state, &palette))
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(palette.muted));
    frame.render_widget(status, vertical[1]);
}

fn border_style(active: bool, palette: &Palette) -> Style {
    if active {
        Style::default().fg(palette.accent)
    } else {
        Style::default()
    }
}

fn draw_directory(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    config: &AppConfig,
    palette: &Palette,
    list_state: &mut ListState,
) {
    let highlight_regex = build_highlight_regex(state.search_query());
    let highlight_style = Style::default()
        .fg(palette.highlight)
        .add_modifier(Modifier::BOLD);
    let selected_id = state.selected_record().map(|record| record.id);

    let rows = state.list_rows();
    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        match row {
            ListRow::Subject { name, count } => {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled(
                        name.to_string(),
                        Style::default()
                            .fg(palette.heading)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    ),
                    Span::styled(format!(" ({count})"), Style::default().fg(palette.muted)),
                ])));
            }
            ListRow::Staff(record) => {
                let mut spans = Vec::new();
                if selected_id == Some(record.id) {
                    spans.push(Span::styled("● ", Style::default().fg(palette.accent)));
                } else {
                    spans.push(Span::raw("  "));
                }
                spans.extend(highlight_line(
                    &config.display_name(&record.name),
                    highlight_regex.as_ref(),
                    highlight_style,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                if config.display.show_phonetic {
                    if let Some(phonetic) = record.phonetic_name.as_deref() {
                        spans.push(Span::raw(" "));
                        spans.extend(highlight_line(
                            &format!("({phonetic})"),
                            highlight_regex.as_ref(),
                            highlight_style,
                            Style::default().fg(palette.muted),
                        ));
                    }
                }
                items.push(ListItem::new(Line::from(spans)));
            }
        }
    }
    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            "No results.",
            Style::default().fg(palette.muted),
        )));
        list_state.select(None);
    } else {
        list_state.select(state.cursor_row());
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title("Staff")
                .borders(Borders::ALL)
                .border_style(border_style(matches!(state.focus, FocusPane::List), palette)),
        )
        .highlight_style(
            Style::default()
                .bg(palette.selection_bg)
                .fg(palette.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    frame.render_stateful_widget(list, area, list_state);
}

fn draw_detail(frame: &mut Frame, area: Rect, state: &AppState, config: &AppConfig, palette: &Palette) {
    let block_style = border_style(matches!(state.focus, FocusPane::Detail), palette);
    frame.render_widget(Clear, area);

    let Some(record) = state.selected_record() else {
        let hint = Paragraph::new(Text::from(vec![
            Line::from("Press Enter on a name to see today's schedule."),
            Line::from(""),
            Line::from(Span::styled(
                format!("Today is {}.", state.current_day()),
                Style::default().fg(palette.muted),
            )),
        ]))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(block_style),
        );
        frame.render_widget(hint, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(DETAIL_HEADER_HEIGHT), Constraint::Min(3)])
        .split(area);

    let profile = Paragraph::new(profile_lines(record, config, palette))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Profile")
                .borders(Borders::ALL)
                .border_style(block_style),
        );
    frame.render_widget(profile, sections[0]);

    let title = format!(
        "{} on {}",
        config.display_name(&record.name),
        state.current_day()
    );
    let schedule_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(block_style);

    let slots = state.todays_slots().unwrap_or_default();
    if slots.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No sessions today.",
            Style::default().fg(palette.muted),
        ))
        .block(schedule_block);
        frame.render_widget(empty, sections[1]);
        return;
    }

    let time_width = slots
        .iter()
        .map(|row| UnicodeWidthStr::width(row.slot.time.as_str()))
        .max()
        .unwrap_or(0)
        .max(4) as u16;
    let rows = slots.iter().map(|row| {
        let period_style = if row.period.is_recognized() {
            Style::default()
        } else {
            Style::default().fg(palette.warning)
        };
        Row::new(vec![
            Span::raw(row.slot.day.label()),
            Span::raw(row.slot.time.clone()),
            Span::raw(row.slot.location.clone()),
            Span::styled(row.period.as_str(), period_style),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(time_width + 1),
            Constraint::Min(8),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Day", "Time", "Room", "Period"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(schedule_block);
    frame.render_widget(table, sections[1]);
}

fn profile_lines(record: &StaffRecord, config: &AppConfig, palette: &Palette) -> Text<'static> {
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        config.display_name(&record.name),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if config.display.show_phonetic {
        if let Some(phonetic) = record.phonetic_name.as_deref() {
            lines.push(Line::from(Span::styled(
                phonetic.to_string(),
                Style::default().fg(palette.muted),
            )));
        }
    }
    lines.push(Line::from(vec![
        Span::styled("Subject: ", Style::default().fg(palette.muted)),
        Span::raw(record.subject.clone()),
    ]));
    lines.push(Line::from(record.profile.clone()));
    if config.display.show_image_ref {
        lines.push(Line::from(vec![
            Span::styled("Image: ", Style::default().fg(palette.muted)),
            Span::raw(record.image.clone()),
        ]));
    }
    Text::from(lines)
}

fn build_status_line(state: &AppState, palette: &Palette) -> Line<'static> {
    let visible = state.visible_len();
    let position = if visible == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", state.cursor + 1, visible)
    };
    let focus = match state.focus {
        FocusPane::List => "List",
        FocusPane::Detail => "Detail",
    };

    let mut spans = vec![
        Span::raw(format!("Showing {visible}/{} ", state.total())),
        Span::raw("| Cursor: "),
        Span::styled(position, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | Today: "),
        Span::styled(
            state.current_day().label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Focus: "),
        Span::styled(focus, Style::default().add_modifier(Modifier::BOLD)),
    ];

    if state.is_search_active() || !state.search_query().is_empty() {
        let label_style = if state.is_search_active() {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::raw(" | Search "));
        spans.push(Span::styled("/", label_style));
        if state.search_query().is_empty() {
            spans.push(Span::styled(
                "(type a name or reading)",
                Style::default().fg(palette.muted),
            ));
        } else {
            spans.push(Span::styled(
                state.search_query().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        if state.is_search_active() {
            spans.push(Span::styled(" ▌", Style::default().fg(palette.accent)));
        }
    }

    if let Some(message) = state.status_message() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(palette.warning),
        ));
    }

    Line::from(spans)
}

fn highlight_line(
    text: &str,
    regex: Option<&Regex>,
    highlight_style: Style,
    base_style: Style,
) -> Vec<Span<'static>> {
    if let Some(re) = regex {
        let mut spans = Vec::new();
        let mut last = 0;
        for mat in re.find_iter(text) {
            if mat.start() > last {
                spans.push(Span::styled(
                    text[last..mat.start()].to_string(),
                    base_style,
                ));
            }
            spans.push(Span::styled(mat.as_str().to_string(), highlight_style));
            last = mat.end();
        }
        if last < text.len() {
            spans.push(Span::styled(text[last..].to_string(), base_style));
        }
        if spans.is_empty() {
            spans.push(Span::styled(text.to_string(), base_style));
        }
        spans
    } else {
        vec![Span::styled(text.to_string(), base_style)]
    }
}
