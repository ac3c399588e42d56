// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::model::{NewTask, Task, TeamMember};
use crate::store::{TaskFilters, ViewState};
use chrono::{NaiveDate, NaiveTime};

#[derive(PartialEq, Clone, Copy)]
pub enum Focus {
    Sidebar,
    Main,
}

/// Task-table region: loading row, rows, or an error row. Failures stay
/// scoped to this region and never touch the rest of the state.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskTable {
    Loading,
    Ready(Vec<Task>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsPanel {
    Loading,
    Ready(Task),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MembersPanel {
    Loading,
    Ready {
        members: Vec<TeamMember>,
        selected: usize,
        invite_code: Option<String>,
    },
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Priority,
    Status,
    StartDate,
    EndDate,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            FilterField::Priority => FilterField::Status,
            FilterField::Status => FilterField::StartDate,
            FilterField::StartDate => FilterField::EndDate,
            FilterField::EndDate => FilterField::Priority,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FilterField::Priority => FilterField::EndDate,
            FilterField::Status => FilterField::Priority,
            FilterField::StartDate => FilterField::Status,
            FilterField::EndDate => FilterField::StartDate,
        }
    }
}

/// In-progress filter form input. Index 0 of a select is the "All" sentinel;
/// date fields hold raw text and only parse into the submitted filters when
/// they form a valid date, so empty fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    pub field: FilterField,
    pub priority_idx: usize,
    pub status_idx: usize,
    pub start_input: String,
    pub end_input: String,
}

impl Default for FilterDraft {
    fn default() -> Self {
        Self {
            field: FilterField::Priority,
            priority_idx: 0,
            status_idx: 0,
            start_input: String::new(),
            end_input: String::new(),
        }
    }
}

impl FilterDraft {
    pub fn to_filters(&self, priorities: &[String], statuses: &[String]) -> TaskFilters {
        let pick = |options: &[String], idx: usize| {
            if idx == 0 {
                None
            } else {
                options.get(idx - 1).cloned()
            }
        };
        TaskFilters {
            priority: pick(priorities, self.priority_idx),
            status: pick(statuses, self.status_idx),
            start_date: NaiveDate::parse_from_str(&self.start_input, "%Y-%m-%d").ok(),
            end_date: NaiveDate::parse_from_str(&self.end_input, "%Y-%m-%d").ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Priority,
    Status,
    Date,
    StartTime,
    EndTime,
}

impl TaskField {
    pub fn next(self) -> Self {
        match self {
            TaskField::Title => TaskField::Description,
            TaskField::Description => TaskField::Priority,
            TaskField::Priority => TaskField::Status,
            TaskField::Status => TaskField::Date,
            TaskField::Date => TaskField::StartTime,
            TaskField::StartTime => TaskField::EndTime,
            TaskField::EndTime => TaskField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            TaskField::Title => TaskField::EndTime,
            TaskField::Description => TaskField::Title,
            TaskField::Priority => TaskField::Description,
            TaskField::Status => TaskField::Priority,
            TaskField::Date => TaskField::Status,
            TaskField::StartTime => TaskField::Date,
            TaskField::EndTime => TaskField::StartTime,
        }
    }
}

/// In-progress task-creation form. The selects index straight into the
/// reference lists (no sentinel; a new task needs a concrete value) and the
/// date/time fields hold raw text, submitted only when they parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub field: TaskField,
    pub title: String,
    pub description: String,
    pub priority_idx: usize,
    pub status_idx: usize,
    pub date_input: String,
    pub start_input: String,
    pub end_input: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            field: TaskField::Title,
            title: String::new(),
            description: String::new(),
            priority_idx: 0,
            status_idx: 0,
            date_input: String::new(),
            start_input: String::new(),
            end_input: String::new(),
        }
    }
}

impl TaskDraft {
    /// Builds the request body, or `None` when the draft is not submittable
    /// (blank title, or the reference lists have not loaded). Blank date and
    /// time fields are omitted so the server fills its defaults.
    pub fn to_new_task(&self, priorities: &[String], statuses: &[String]) -> Option<NewTask> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let priority = priorities.get(self.priority_idx)?.clone();
        let status = statuses.get(self.status_idx)?.clone();
        let description = match self.description.trim() {
            "" => None,
            text => Some(text.to_string()),
        };
        Some(NewTask {
            title: title.to_string(),
            description,
            priority,
            status,
            task_date: NaiveDate::parse_from_str(&self.date_input, "%Y-%m-%d").ok(),
            start_time: NaiveTime::parse_from_str(&self.start_input, "%H:%M").ok(),
            end_time: NaiveTime::parse_from_str(&self.end_input, "%H:%M").ok(),
        })
    }
}

pub struct AppState {
    pub view: ViewState,
    pub table: TaskTable,
    pub selected_row: usize,
    pub sidebar_selected: usize,
    pub focus: Focus,
    pub status: String,
    /// Set when the reference-data bootstrap fails; replaces the whole
    /// dashboard with an error panel.
    pub dashboard_failed: Option<String>,
    /// Generation of the most recently issued task fetch.
    pub task_generation: u64,
    pub details: Option<DetailsPanel>,
    pub members: Option<MembersPanel>,
    pub filter_draft: FilterDraft,
    /// Present while the task-creation form is open.
    pub task_form: Option<TaskDraft>,
}

impl AppState {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            table: TaskTable::Loading,
            selected_row: 0,
            sidebar_selected: 0,
            focus: Focus::Main,
            status: "Connecting...".to_string(),
            dashboard_failed: None,
            task_generation: 0,
            details: None,
            members: None,
            filter_draft: FilterDraft::default(),
            task_form: None,
        }
    }

    /// Stamp for the next task fetch; everything older becomes stale.
    pub fn next_task_generation(&mut self) -> u64 {
        self.task_generation += 1;
        self.task_generation
    }

    /// Applies a task-list response unless it was superseded by a newer
    /// fetch, in which case it is dropped entirely.
    pub fn on_tasks_loaded(&mut self, generation: u64, result: Result<Vec<Task>, String>) {
        if generation != self.task_generation {
            return;
        }
        self.table = match result {
            Ok(tasks) => TaskTable::Ready(tasks),
            Err(message) => TaskTable::Failed(message),
        };
        self.selected_row = 0;
    }

    pub fn task_count(&self) -> usize {
        match &self.table {
            TaskTable::Ready(tasks) => tasks.len(),
            _ => 0,
        }
    }

    /// Teams plus the "My Tasks" sentinel.
    pub fn sidebar_len(&self) -> usize {
        self.view.teams.len() + 1
    }

    pub fn table_next(&mut self) {
        let len = self.task_count();
        if len > 0 {
            self.selected_row = (self.selected_row + 1) % len;
        }
    }

    pub fn table_previous(&mut self) {
        let len = self.task_count();
        if len > 0 {
            self.selected_row = (self.selected_row + len - 1) % len;
        }
    }

    pub fn sidebar_next(&mut self) {
        let len = self.sidebar_len();
        self.sidebar_selected = (self.sidebar_selected + 1) % len;
    }

    pub fn sidebar_previous(&mut self) {
        let len = self.sidebar_len();
        self.sidebar_selected = (self.sidebar_selected + len - 1) % len;
    }
}
