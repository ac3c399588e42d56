// File: src/store.rs
// Dashboard view state: a single record mutated only through `apply`, with
// the task-list query derived from it. No I/O and no terminal dependency.
use crate::model::{DashboardContext, Team};
use chrono::{Duration, NaiveDate};
use strum::EnumIter;

pub const MY_TASKS_LABEL: &str = "My Tasks";
pub const DEFAULT_SCOPE: &str = "USER_TASKS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ViewMode {
    All,
    Calendar,
    Filter,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::All => "All Tasks",
            ViewMode::Calendar => "Calendar",
            ViewMode::Filter => "Filter",
        }
    }
}

/// Auxiliary panel below the view bar. At most one is ever visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Scope,
    Calendar,
    Filter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub priority: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Every interactive affordance on the dashboard maps to one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectView(ViewMode),
    SelectTeam(Team),
    /// The "My Tasks" entry and the team-panel close control.
    ClearTeam,
    SelectScope(String),
    CalendarStep(i64),
    CalendarJump(NaiveDate),
    ApplyFilters(TaskFilters),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub selected_team: Option<Team>,
    pub selected_scope: String,
    pub center_date: NaiveDate,
    pub filters: TaskFilters,
    pub teams: Vec<Team>,
    pub scopes: Vec<String>,
    pub priorities: Vec<String>,
    pub statuses: Vec<String>,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: ViewMode::All,
            selected_team: None,
            selected_scope: DEFAULT_SCOPE.to_string(),
            center_date: today,
            filters: TaskFilters::default(),
            teams: Vec::new(),
            scopes: Vec::new(),
            priorities: Vec::new(),
            statuses: Vec::new(),
        }
    }

    /// Installs the server reference lists fetched at startup.
    pub fn load_context(&mut self, ctx: DashboardContext) {
        self.teams = ctx.teams;
        self.scopes = ctx.scopes;
        self.priorities = ctx.priorities;
        self.statuses = ctx.statuses;
    }

    /// Single reducer entry point. Returns false when the command's
    /// precondition does not hold; rejected commands leave the state intact.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SelectView(mode) => {
                self.mode = mode;
                true
            }
            Command::SelectTeam(team) => {
                // Scope is intentionally kept across team switches.
                self.selected_team = Some(team);
                true
            }
            Command::ClearTeam => {
                self.selected_team = None;
                true
            }
            Command::SelectScope(scope) => {
                if self.selected_team.is_none() {
                    return false;
                }
                self.selected_scope = scope;
                true
            }
            Command::CalendarStep(days) => {
                if self.mode != ViewMode::Calendar {
                    return false;
                }
                self.center_date = step_date(self.center_date, days);
                true
            }
            Command::CalendarJump(date) => {
                if self.mode != ViewMode::Calendar {
                    return false;
                }
                self.center_date = date;
                true
            }
            Command::ApplyFilters(filters) => {
                if self.mode != ViewMode::Filter {
                    return false;
                }
                self.filters = filters;
                true
            }
        }
    }

    pub fn team_name(&self) -> &str {
        self.selected_team
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or(MY_TASKS_LABEL)
    }

    /// Which auxiliary panel is visible. The scope selector additionally
    /// requires a selected team; no team means no panel in the All view.
    pub fn active_panel(&self) -> Option<Panel> {
        match self.mode {
            ViewMode::Calendar => Some(Panel::Calendar),
            ViewMode::Filter => Some(Panel::Filter),
            ViewMode::All => self.selected_team.as_ref().map(|_| Panel::Scope),
        }
    }

    /// Query parameters for `GET /task` derived from the current state:
    /// team + scope when a team is selected, the center date in calendar
    /// view, and the non-empty filter fields in filter view.
    pub fn task_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(team) = &self.selected_team {
            params.push(("teamId".to_string(), team.id.clone()));
            params.push(("scope".to_string(), self.selected_scope.clone()));
        }
        if self.mode == ViewMode::Calendar {
            params.push(("date".to_string(), format_date(self.center_date)));
        }
        if self.mode == ViewMode::Filter {
            if let Some(p) = &self.filters.priority {
                params.push(("priority".to_string(), p.clone()));
            }
            if let Some(s) = &self.filters.status {
                params.push(("status".to_string(), s.clone()));
            }
            if let Some(d) = self.filters.start_date {
                params.push(("startDate".to_string(), format_date(d)));
            }
            if let Some(d) = self.filters.end_date {
                params.push(("endDate".to_string(), format_date(d)));
            }
        }
        params
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Calendar-day arithmetic on naive dates; no timezone involved, so a step
/// across a DST boundary is still exactly one calendar day.
pub fn step_date(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// The five dates of the calendar strip: offsets -2..=2 around the center.
pub fn calendar_strip(center: NaiveDate) -> [NaiveDate; 5] {
    [-2i64, -1, 0, 1, 2].map(|off| step_date(center, off))
}
