// Actions sent to the network actor and events flowing back to the UI.
use crate::model::{DashboardContext, NewTask, Task, TeamMember};

#[derive(Debug)]
pub enum Action {
    /// Task-list fetch stamped with the issuing generation; responses from a
    /// superseded generation are dropped by the UI.
    FetchTasks {
        generation: u64,
        params: Vec<(String, String)>,
    },
    FetchTaskDetails(String),
    CreateTask {
        task: NewTask,
        team_id: Option<String>,
    },
    FetchTeamMembers(String),
    GenerateInviteCode(String),
    RemoveMember { team_id: String, user_id: String },
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    ContextLoaded(DashboardContext),
    ContextFailed(String),
    TasksLoaded {
        generation: u64,
        result: Result<Vec<Task>, String>,
    },
    TaskDetailsLoaded(Result<Task, String>),
    TaskCreated(Result<(), String>),
    MembersLoaded(Result<Vec<TeamMember>, String>),
    InviteCode(Result<String, String>),
    Status(String),
}
