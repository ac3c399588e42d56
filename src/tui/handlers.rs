// Key handling and application-event handling for the TUI. Key events map
// to dashboard commands; every accepted command re-renders and re-fetches
// the task list with the new state.
use crate::store::{Command, ViewMode};
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{
    AppState, DetailsPanel, FilterField, Focus, MembersPanel, TaskDraft, TaskField, TaskTable,
};
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if state.dashboard_failed.is_some() {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        };
    }

    // Overlays capture input first.
    if state.details.is_some() {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter
        ) {
            state.details = None;
        }
        return None;
    }
    if state.members.is_some() {
        return handle_members_key(key, state);
    }
    if state.task_form.is_some() {
        return handle_task_form_key(key, state);
    }

    // The filter form owns text input while focused, so digits do not
    // collide with the global view-switch keys.
    if state.focus == Focus::Main && state.view.mode == ViewMode::Filter {
        return handle_filter_key(key, state);
    }

    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('1') => return dispatch(state, Command::SelectView(ViewMode::All)),
        KeyCode::Char('2') => return dispatch(state, Command::SelectView(ViewMode::Calendar)),
        KeyCode::Char('3') => return dispatch(state, Command::SelectView(ViewMode::Filter)),
        KeyCode::Tab => {
            state.focus = match state.focus {
                Focus::Sidebar => Focus::Main,
                Focus::Main => Focus::Sidebar,
            };
            return None;
        }
        KeyCode::Char('r') => return Some(refetch(state)),
        KeyCode::Char('n') => {
            state.task_form = Some(TaskDraft::default());
            return None;
        }
        KeyCode::Char('s') => return cycle_scope(state),
        KeyCode::Char('m') => {
            if let Some(team) = &state.view.selected_team {
                let team_id = team.id.clone();
                state.members = Some(MembersPanel::Loading);
                return Some(Action::FetchTeamMembers(team_id));
            }
            return None;
        }
        KeyCode::Char('c') => {
            if state.view.selected_team.is_some() {
                return dispatch(state, Command::ClearTeam);
            }
            return None;
        }
        _ => {}
    }

    match state.focus {
        Focus::Sidebar => handle_sidebar_key(key, state),
        Focus::Main => match state.view.mode {
            ViewMode::Calendar => handle_calendar_key(key, state),
            _ => handle_table_key(key, state),
        },
    }
}

fn handle_sidebar_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.sidebar_next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.sidebar_previous();
            None
        }
        KeyCode::Enter => {
            // The entry after the last team is the "My Tasks" sentinel.
            let command = match state.view.teams.get(state.sidebar_selected) {
                Some(team) => Command::SelectTeam(team.clone()),
                None => Command::ClearTeam,
            };
            dispatch(state, command)
        }
        _ => None,
    }
}

fn handle_table_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.table_next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.table_previous();
            None
        }
        KeyCode::Enter => {
            if let TaskTable::Ready(tasks) = &state.table
                && let Some(task) = tasks.get(state.selected_row)
            {
                let task_id = task.id.clone();
                state.details = Some(DetailsPanel::Loading);
                return Some(Action::FetchTaskDetails(task_id));
            }
            None
        }
        _ => None,
    }
}

fn handle_calendar_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => dispatch(state, Command::CalendarStep(-1)),
        KeyCode::Right | KeyCode::Char('l') => dispatch(state, Command::CalendarStep(1)),
        KeyCode::Char('t') => dispatch(
            state,
            Command::CalendarJump(chrono::Local::now().date_naive()),
        ),
        _ => handle_table_key(key, state),
    }
}

fn handle_filter_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Esc => {
            state.focus = Focus::Sidebar;
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            state.filter_draft.field = state.filter_draft.field.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.filter_draft.field = state.filter_draft.field.previous();
            None
        }
        KeyCode::Left | KeyCode::Right => {
            let step: i64 = if key.code == KeyCode::Left { -1 } else { 1 };
            // Option count includes the "All" sentinel at index 0.
            match state.filter_draft.field {
                FilterField::Priority => {
                    let len = state.view.priorities.len() + 1;
                    state.filter_draft.priority_idx =
                        cycle(state.filter_draft.priority_idx, len, step);
                }
                FilterField::Status => {
                    let len = state.view.statuses.len() + 1;
                    state.filter_draft.status_idx =
                        cycle(state.filter_draft.status_idx, len, step);
                }
                _ => {}
            }
            None
        }
        KeyCode::Backspace => {
            match state.filter_draft.field {
                FilterField::StartDate => {
                    state.filter_draft.start_input.pop();
                }
                FilterField::EndDate => {
                    state.filter_draft.end_input.pop();
                }
                _ => {}
            }
            None
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            let input = match state.filter_draft.field {
                FilterField::StartDate => Some(&mut state.filter_draft.start_input),
                FilterField::EndDate => Some(&mut state.filter_draft.end_input),
                _ => None,
            };
            if let Some(input) = input
                && input.len() < 10
            {
                input.push(c);
            }
            None
        }
        KeyCode::Enter => {
            let filters = state
                .filter_draft
                .to_filters(&state.view.priorities, &state.view.statuses);
            dispatch(state, Command::ApplyFilters(filters))
        }
        _ => None,
    }
}

fn handle_task_form_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    let Some(draft) = &mut state.task_form else {
        return None;
    };
    match key.code {
        KeyCode::Esc => {
            state.task_form = None;
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            draft.field = draft.field.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            draft.field = draft.field.previous();
            None
        }
        KeyCode::Left | KeyCode::Right if matches!(draft.field, TaskField::Priority | TaskField::Status) => {
            let step: i64 = if key.code == KeyCode::Left { -1 } else { 1 };
            match draft.field {
                TaskField::Priority => {
                    draft.priority_idx = cycle(draft.priority_idx, state.view.priorities.len(), step);
                }
                TaskField::Status => {
                    draft.status_idx = cycle(draft.status_idx, state.view.statuses.len(), step);
                }
                _ => {}
            }
            None
        }
        KeyCode::Backspace => {
            match draft.field {
                TaskField::Title => {
                    draft.title.pop();
                }
                TaskField::Description => {
                    draft.description.pop();
                }
                TaskField::Date => {
                    draft.date_input.pop();
                }
                TaskField::StartTime => {
                    draft.start_input.pop();
                }
                TaskField::EndTime => {
                    draft.end_input.pop();
                }
                _ => {}
            }
            None
        }
        KeyCode::Char(c) => {
            match draft.field {
                TaskField::Title => draft.title.push(c),
                TaskField::Description => draft.description.push(c),
                TaskField::Date => {
                    if (c.is_ascii_digit() || c == '-') && draft.date_input.len() < 10 {
                        draft.date_input.push(c);
                    }
                }
                TaskField::StartTime => {
                    if (c.is_ascii_digit() || c == ':') && draft.start_input.len() < 5 {
                        draft.start_input.push(c);
                    }
                }
                TaskField::EndTime => {
                    if (c.is_ascii_digit() || c == ':') && draft.end_input.len() < 5 {
                        draft.end_input.push(c);
                    }
                }
                _ => {}
            }
            None
        }
        KeyCode::Enter => {
            match draft.to_new_task(&state.view.priorities, &state.view.statuses) {
                Some(task) => Some(Action::CreateTask {
                    task,
                    team_id: state.view.selected_team.as_ref().map(|t| t.id.clone()),
                }),
                None => {
                    state.status = "Task needs a title, priority and status.".to_string();
                    None
                }
            }
        }
        _ => None,
    }
}

fn handle_members_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    let team_id = state.view.selected_team.as_ref().map(|t| t.id.clone());
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.members = None;
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(MembersPanel::Ready {
                members, selected, ..
            }) = &mut state.members
                && !members.is_empty()
            {
                *selected = (*selected + 1) % members.len();
            }
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(MembersPanel::Ready {
                members, selected, ..
            }) = &mut state.members
                && !members.is_empty()
            {
                *selected = (*selected + members.len() - 1) % members.len();
            }
            None
        }
        KeyCode::Char('i') => team_id.map(Action::GenerateInviteCode),
        KeyCode::Char('x') => {
            if let (
                Some(team_id),
                Some(MembersPanel::Ready {
                    members, selected, ..
                }),
            ) = (team_id, &state.members)
            {
                return members.get(*selected).map(|member| Action::RemoveMember {
                    team_id,
                    user_id: member.id.clone(),
                });
            }
            None
        }
        _ => None,
    }
}

fn cycle(current: usize, len: usize, step: i64) -> usize {
    if len == 0 {
        return 0;
    }
    (current as i64 + step).rem_euclid(len as i64) as usize
}

/// Cycle to the next scope in the reference list; a no-op without a team.
fn cycle_scope(state: &mut AppState) -> Option<Action> {
    if state.view.selected_team.is_none() || state.view.scopes.is_empty() {
        return None;
    }
    let current = state
        .view
        .scopes
        .iter()
        .position(|s| *s == state.view.selected_scope);
    let next_idx = match current {
        Some(i) => (i + 1) % state.view.scopes.len(),
        None => 0,
    };
    let next = state.view.scopes[next_idx].clone();
    dispatch(state, Command::SelectScope(next))
}

/// Run a command through the reducer; accepted commands trigger a re-fetch
/// of the task list under the new state.
fn dispatch(state: &mut AppState, command: Command) -> Option<Action> {
    if !state.view.apply(command) {
        return None;
    }
    Some(refetch(state))
}

fn refetch(state: &mut AppState) -> Action {
    let generation = state.next_task_generation();
    state.table = TaskTable::Loading;
    Action::FetchTasks {
        generation,
        params: state.view.task_query(),
    }
}

/// Applies a network event to the state. A successful task creation answers
/// with the follow-up fetch that makes the new task visible.
pub fn handle_app_event(state: &mut AppState, event: AppEvent) -> Option<Action> {
    match event {
        AppEvent::ContextLoaded(ctx) => {
            state.view.load_context(ctx);
        }
        AppEvent::ContextFailed(message) => {
            state.dashboard_failed = Some(message);
        }
        AppEvent::TasksLoaded { generation, result } => {
            state.on_tasks_loaded(generation, result);
        }
        AppEvent::TaskDetailsLoaded(result) => {
            // Ignore if the popup was closed before the response arrived.
            if state.details.is_some() {
                state.details = Some(match result {
                    Ok(task) => DetailsPanel::Ready(task),
                    Err(message) => DetailsPanel::Failed(message),
                });
            }
        }
        AppEvent::TaskCreated(result) => match result {
            Ok(()) => {
                state.task_form = None;
                state.status = "Task created.".to_string();
                return Some(refetch(state));
            }
            Err(message) => {
                // The form stays open so the draft is not lost.
                state.status = format!("Could not create task: {}", message);
            }
        },
        AppEvent::MembersLoaded(result) => {
            if state.members.is_some() {
                state.members = Some(match result {
                    Ok(members) => MembersPanel::Ready {
                        members,
                        selected: 0,
                        invite_code: None,
                    },
                    Err(message) => MembersPanel::Failed(message),
                });
            }
        }
        AppEvent::InviteCode(result) => match result {
            Ok(code) => {
                if let Some(MembersPanel::Ready { invite_code, .. }) = &mut state.members {
                    *invite_code = Some(code);
                }
            }
            Err(message) => {
                state.status = format!("Invite code failed: {}", message);
            }
        },
        AppEvent::Status(message) => {
            state.status = message;
        }
    }
    None
}
