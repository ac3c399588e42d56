// Pure projections of view state + fetched data into typed view models.
// The TUI layer turns these into widgets; tests assert on them directly
// without a terminal.
use crate::model::{Task, TeamMember};
use crate::store::{MY_TASKS_LABEL, Panel, ViewMode, ViewState, calendar_strip};
use chrono::NaiveDate;
use strum::IntoEnumIterator;

/// Sentinel option mapping to "no filter" in the select inputs.
pub const ALL_OPTION: &str = "All";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTab {
    pub mode: ViewMode,
    pub label: &'static str,
    pub active: bool,
}

pub fn view_tabs(state: &ViewState) -> Vec<ViewTab> {
    ViewMode::iter()
        .map(|mode| ViewTab {
            mode,
            label: mode.label(),
            active: mode == state.mode,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamEntry {
    /// None marks the trailing "My Tasks" sentinel.
    pub team_id: Option<String>,
    pub label: String,
    pub active: bool,
}

/// The sidebar: one entry per team plus the "My Tasks" sentinel at the end.
pub fn team_entries(state: &ViewState) -> Vec<TeamEntry> {
    let selected = state.selected_team.as_ref().map(|t| t.id.as_str());
    let mut entries: Vec<TeamEntry> = state
        .teams
        .iter()
        .map(|team| TeamEntry {
            team_id: Some(team.id.clone()),
            label: team.name.clone(),
            active: selected == Some(team.id.as_str()),
        })
        .collect();
    entries.push(TeamEntry {
        team_id: None,
        label: format!("-- {} --", MY_TASKS_LABEL),
        active: selected.is_none(),
    });
    entries
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeButton {
    pub scope: String,
    pub active: bool,
}

/// Scope buttons, present only when the scope panel is active.
pub fn scope_buttons(state: &ViewState) -> Vec<ScopeButton> {
    if state.active_panel() != Some(Panel::Scope) {
        return Vec::new();
    }
    state
        .scopes
        .iter()
        .map(|scope| ScopeButton {
            scope: scope.clone(),
            active: *scope == state.selected_scope,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub label: String,
    pub selected: bool,
}

pub fn calendar_days(state: &ViewState) -> Vec<CalendarDay> {
    if state.active_panel() != Some(Panel::Calendar) {
        return Vec::new();
    }
    calendar_strip(state.center_date)
        .into_iter()
        .map(|date| CalendarDay {
            date,
            label: date.format("%d/%m").to_string(),
            selected: date == state.center_date,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterForm {
    /// Option lists with the "All" sentinel prepended.
    pub priority_options: Vec<String>,
    pub status_options: Vec<String>,
    pub priority_selected: usize,
    pub status_selected: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub fn filter_form(state: &ViewState) -> Option<FilterForm> {
    if state.active_panel() != Some(Panel::Filter) {
        return None;
    }
    let with_all = |options: &[String]| {
        let mut out = vec![ALL_OPTION.to_string()];
        out.extend(options.iter().cloned());
        out
    };
    let selected_index = |options: &[String], current: &Option<String>| match current {
        Some(value) => options.iter().position(|o| o == value).map_or(0, |i| i + 1),
        None => 0,
    };
    Some(FilterForm {
        priority_options: with_all(&state.priorities),
        status_options: with_all(&state.statuses),
        priority_selected: selected_index(&state.priorities, &state.filters.priority),
        status_selected: selected_index(&state.statuses, &state.filters.status),
        start_date: state.filters.start_date,
        end_date: state.filters.end_date,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskFormOptions {
    pub priority_options: Vec<String>,
    pub status_options: Vec<String>,
    /// Attached when a team is selected so the new task lands on that team.
    pub team_id: Option<String>,
}

/// Option lists for the task-creation form, straight from the reference
/// lists. No "All" sentinel here: a new task needs a concrete value.
pub fn task_form_options(state: &ViewState) -> TaskFormOptions {
    TaskFormOptions {
        priority_options: state.priorities.clone(),
        status_options: state.statuses.clone(),
        team_id: state.selected_team.as_ref().map(|t| t.id.clone()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamPanel {
    pub title: String,
}

/// Team-management panel header; absent when no team is selected.
pub fn team_panel(state: &ViewState) -> Option<TeamPanel> {
    state.selected_team.as_ref().map(|team| TeamPanel {
        title: format!("Team: {}", team.name),
    })
}

pub fn list_header(state: &ViewState) -> String {
    match &state.selected_team {
        Some(team) => format!("Tasks for: {}", team.name),
        None => "My personal tasks".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    /// Full id, carried for the details affordance.
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub assignees: String,
    pub priority: String,
    pub status: String,
    pub date: String,
    pub hours: String,
}

pub fn task_rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks
        .iter()
        .map(|task| TaskRow {
            id: task.id.clone(),
            short_id: task.short_id(),
            title: task.title.clone(),
            assignees: task.assignee_names(),
            priority: task.priority.clone(),
            status: task.status.clone(),
            date: task.date_label(),
            hours: task.time_range(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub member_id: String,
    pub name: String,
    pub email: String,
}

pub fn member_rows(members: &[TeamMember]) -> Vec<MemberRow> {
    members
        .iter()
        .map(|m| MemberRow {
            member_id: m.id.clone(),
            name: m.full_name(),
            email: m.email.clone(),
        })
        .collect()
}

/// Label/value pairs for the task-details popup. The team row is omitted
/// for personal tasks.
pub fn task_details(task: &Task) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("Title", task.title.clone()),
        (
            "Description",
            task.description.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Priority", task.priority.clone()),
        ("Status", task.status.clone()),
        ("Date", task.date_label()),
        ("Hours", task.time_range()),
    ];
    if let Some(team) = &task.team {
        fields.push(("Team", team.name.clone()));
    }
    let assignees = task.assignee_names();
    fields.push((
        "Assignees",
        if assignees == "N/A" {
            "-".to_string()
        } else {
            assignees
        },
    ));
    fields
}
