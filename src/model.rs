// Server-owned view models fetched from the REST backend. The client never
// mutates these locally; every change goes through the server and a refetch.
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Assignee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub task_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub team: Option<TeamRef>,
}

impl Task {
    /// Truncated id shown in the task table.
    pub fn short_id(&self) -> String {
        let head: String = self.id.chars().take(8).collect();
        if self.id.chars().count() > 8 {
            format!("{}...", head)
        } else {
            head
        }
    }

    /// Comma-separated assignee names, or "N/A" when nobody is assigned.
    pub fn assignee_names(&self) -> String {
        if self.assignees.is_empty() {
            return "N/A".to_string();
        }
        self.assignees
            .iter()
            .map(Assignee::full_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn date_label(&self) -> String {
        self.task_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// "HH:MM - HH:MM" with either side blank when unset.
    pub fn time_range(&self) -> String {
        let fmt = |t: Option<NaiveTime>| {
            t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
        };
        format!("{} - {}", fmt(self.start_time), fmt(self.end_time))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl TeamMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body for `POST /task/new`. Omitted date and time fields take the server's
/// defaults, so they are skipped instead of sent as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
}

/// Server-provided reference lists fetched once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardContext {
    pub teams: Vec<Team>,
    pub scopes: Vec<String>,
    pub priorities: Vec<String>,
    pub statuses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InviteCode {
    pub code: String,
}
