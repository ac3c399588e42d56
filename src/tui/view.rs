// File: src/tui/view.rs
// Projects the typed view models from `render` onto ratatui widgets.
use crate::render;
use crate::store::Panel;
use crate::tui::state::{
    AppState, DetailsPanel, FilterField, Focus, MembersPanel, TaskField, TaskTable,
};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};

pub fn draw(f: &mut Frame, state: &AppState) {
    if let Some(message) = &state.dashboard_failed {
        draw_fatal(f, message);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_view_bar(f, state, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(24), Constraint::Percentage(76)])
        .split(chunks[1]);

    draw_sidebar(f, state, body[0]);
    draw_main(f, state, body[1]);
    draw_status(f, state, chunks[2]);

    if state.members.is_some() {
        draw_members(f, state);
    }
    if state.task_form.is_some() {
        draw_task_form(f, state);
    }
    if state.details.is_some() {
        draw_details(f, state);
    }
}

/// Whole-dashboard failure: the bootstrap fetch of reference data failed.
fn draw_fatal(f: &mut Frame, message: &str) {
    let area = centered_rect(70, 40, f.area());
    let text = vec![
        Line::from("Failed to load dashboard data."),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from("Check the server and restart. q: quit"),
    ];
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Taskdeck "));
    f.render_widget(p, area);
}

fn draw_view_bar(f: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in render::view_tabs(&state.view).into_iter().enumerate() {
        let style = if tab.active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}] {}", i + 1, tab.label), style));
        spans.push(Span::raw("  "));
    }
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Taskdeck "));
    f.render_widget(bar, area);
}

fn draw_sidebar(f: &mut Frame, state: &AppState, area: Rect) {
    let border_style = if state.focus == Focus::Sidebar {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let items: Vec<ListItem> = render::team_entries(&state.view)
        .into_iter()
        .map(|entry| {
            let style = if entry.active {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(entry.label, style))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Teams "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default().with_selected(Some(state.sidebar_selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_main(f: &mut Frame, state: &AppState, area: Rect) {
    let team_panel = render::team_panel(&state.view);
    let panel = state.view.active_panel();
    let panel_height = match panel {
        Some(Panel::Filter) => 4,
        Some(_) => 3,
        None => 0,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if team_panel.is_some() { 3 } else { 0 }),
            Constraint::Length(panel_height),
            Constraint::Min(3),
        ])
        .split(area);

    if let Some(team_panel) = team_panel {
        let p = Paragraph::new(" m: manage members   c: close team view").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(format!(" {} ", team_panel.title)),
        );
        f.render_widget(p, chunks[0]);
    }

    match panel {
        Some(Panel::Scope) => draw_scope_panel(f, state, chunks[1]),
        Some(Panel::Calendar) => draw_calendar_panel(f, state, chunks[1]),
        Some(Panel::Filter) => draw_filter_panel(f, state, chunks[1]),
        None => {}
    }

    draw_task_table(f, state, chunks[2]);
}

fn draw_scope_panel(f: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for button in render::scope_buttons(&state.view) {
        let style = if button.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {} ", button.scope), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        " (s: cycle)",
        Style::default().fg(Color::DarkGray),
    ));
    let p = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Task Scope "));
    f.render_widget(p, area);
}

fn draw_calendar_panel(f: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = vec![Span::styled("  < ", Style::default().fg(Color::DarkGray))];
    for day in render::calendar_days(&state.view) {
        let style = if day.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {} ", day.label), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        " >   (h/l: step, t: today)",
        Style::default().fg(Color::DarkGray),
    ));
    let p = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Calendar "));
    f.render_widget(p, area);
}

fn draw_filter_panel(f: &mut Frame, state: &AppState, area: Rect) {
    let draft = &state.filter_draft;
    let focused = state.focus == Focus::Main;
    let field_style = |field: FilterField| {
        if focused && draft.field == field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let option_label = |options: &[String], idx: usize| {
        if idx == 0 {
            render::ALL_OPTION.to_string()
        } else {
            options
                .get(idx - 1)
                .cloned()
                .unwrap_or_else(|| render::ALL_OPTION.to_string())
        }
    };
    let date_label = |input: &str| {
        if input.is_empty() {
            "____-__-__".to_string()
        } else {
            input.to_string()
        }
    };

    let fields = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!(
                "Priority: <{}>",
                option_label(&state.view.priorities, draft.priority_idx)
            ),
            field_style(FilterField::Priority),
        ),
        Span::raw("   "),
        Span::styled(
            format!(
                "Status: <{}>",
                option_label(&state.view.statuses, draft.status_idx)
            ),
            field_style(FilterField::Status),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Start: {}", date_label(&draft.start_input)),
            field_style(FilterField::StartDate),
        ),
        Span::raw("   "),
        Span::styled(
            format!("End: {}", date_label(&draft.end_input)),
            field_style(FilterField::EndDate),
        ),
    ]);
    let hint = Line::from(Span::styled(
        " Tab: next field   Left/Right: choose   Enter: apply   Esc: leave form",
        Style::default().fg(Color::DarkGray),
    ));
    let p = Paragraph::new(vec![fields, hint])
        .block(Block::default().borders(Borders::ALL).title(" Filter "));
    f.render_widget(p, area);
}

fn draw_task_table(f: &mut Frame, state: &AppState, area: Rect) {
    let border_style = if state.focus == Focus::Main {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", render::list_header(&state.view)));

    match &state.table {
        TaskTable::Loading => {
            let p = Paragraph::new("Loading tasks...")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(p, area);
        }
        TaskTable::Failed(message) => {
            let p = Paragraph::new(Span::styled(
                format!("Error loading tasks: {}", message),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(p, area);
        }
        TaskTable::Ready(tasks) if tasks.is_empty() => {
            let p = Paragraph::new("No tasks found.")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(p, area);
        }
        TaskTable::Ready(tasks) => {
            let rows: Vec<Row> = render::task_rows(tasks)
                .into_iter()
                .map(|r| {
                    Row::new(vec![
                        r.short_id,
                        r.title,
                        r.assignees,
                        r.priority,
                        r.status,
                        r.date,
                        r.hours,
                    ])
                })
                .collect();
            let widths = [
                Constraint::Length(11),
                Constraint::Percentage(28),
                Constraint::Percentage(22),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(13),
            ];
            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec![
                        "ID", "Title", "Assignees", "Priority", "Status", "Date", "Hours",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .block(block)
                .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut table_state = TableState::default().with_selected(Some(state.selected_row));
            f.render_stateful_widget(table, area, &mut table_state);
        }
    }
}

fn draw_details(f: &mut Frame, state: &AppState) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Task Details ");
    let lines: Vec<Line> = match &state.details {
        Some(DetailsPanel::Loading) => vec![Line::from("Loading...")],
        Some(DetailsPanel::Failed(message)) => vec![Line::from(Span::styled(
            format!("Could not load task details: {}", message),
            Style::default().fg(Color::Red),
        ))],
        Some(DetailsPanel::Ready(task)) => {
            let mut lines: Vec<Line> = render::task_details(task)
                .into_iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:<12}", label),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(value),
                    ])
                })
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Esc: close",
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
        None => Vec::new(),
    };
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
}

fn draw_task_form(f: &mut Frame, state: &AppState) {
    let Some(draft) = &state.task_form else {
        return;
    };
    let options = render::task_form_options(&state.view);
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);
    let title = if options.team_id.is_some() {
        format!(" New Task ({}) ", state.view.team_name())
    } else {
        " New Task ".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let field_style = |field: TaskField| {
        if draft.field == field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let select_label = |opts: &[String], idx: usize| {
        opts.get(idx).cloned().unwrap_or_else(|| "-".to_string())
    };
    let text_label = |input: &str, placeholder: &str| {
        if input.is_empty() {
            placeholder.to_string()
        } else {
            input.to_string()
        }
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Title:       {}", text_label(&draft.title, "_")),
            field_style(TaskField::Title),
        )),
        Line::from(Span::styled(
            format!("Description: {}", text_label(&draft.description, "_")),
            field_style(TaskField::Description),
        )),
        Line::from(Span::styled(
            format!(
                "Priority:    <{}>",
                select_label(&options.priority_options, draft.priority_idx)
            ),
            field_style(TaskField::Priority),
        )),
        Line::from(Span::styled(
            format!(
                "Status:      <{}>",
                select_label(&options.status_options, draft.status_idx)
            ),
            field_style(TaskField::Status),
        )),
        Line::from(Span::styled(
            format!(
                "Date:        {}",
                text_label(&draft.date_input, "____-__-__")
            ),
            field_style(TaskField::Date),
        )),
        Line::from(Span::styled(
            format!("Start:       {}", text_label(&draft.start_input, "__:__")),
            field_style(TaskField::StartTime),
        )),
        Line::from(Span::styled(
            format!("End:         {}", text_label(&draft.end_input, "__:__")),
            field_style(TaskField::EndTime),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Tab: next field   Left/Right: choose   Enter: create   Esc: close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
}

fn draw_members(f: &mut Frame, state: &AppState) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Members: {} ", state.view.team_name()));

    match &state.members {
        Some(MembersPanel::Loading) => {
            let p = Paragraph::new("Loading members...")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(p, area);
        }
        Some(MembersPanel::Failed(message)) => {
            let p = Paragraph::new(Span::styled(
                format!("Could not fetch team members: {}", message),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(p, area);
        }
        Some(MembersPanel::Ready {
            members,
            selected,
            invite_code,
        }) => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(3),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(inner);

            if members.is_empty() {
                let p = Paragraph::new("No members found.").alignment(Alignment::Center);
                f.render_widget(p, chunks[0]);
            } else {
                let rows: Vec<Row> = render::member_rows(members)
                    .into_iter()
                    .map(|r| Row::new(vec![r.name, r.email]))
                    .collect();
                let widths = [Constraint::Percentage(45), Constraint::Percentage(55)];
                let table = Table::new(rows, widths)
                    .header(
                        Row::new(vec!["Name", "Email"])
                            .style(Style::default().add_modifier(Modifier::BOLD)),
                    )
                    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
                let mut table_state = TableState::default().with_selected(Some(*selected));
                f.render_stateful_widget(table, chunks[0], &mut table_state);
            }

            let code_line = match invite_code {
                Some(code) => Line::from(vec![
                    Span::styled("Invite code: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(code.clone(), Style::default().fg(Color::Green)),
                ]),
                None => Line::from(""),
            };
            f.render_widget(Paragraph::new(code_line), chunks[1]);

            let hint = Paragraph::new(Span::styled(
                "j/k: select   x: remove   i: invite code   Esc: close",
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(hint, chunks[2]);
        }
        None => {}
    }
}

fn draw_status(f: &mut Frame, state: &AppState, area: Rect) {
    let p = Paragraph::new(Span::raw(format!(" {}", state.status)));
    f.render_widget(p, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
