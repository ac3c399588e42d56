// View-model builder tests: the render layer is asserted on directly, no
// terminal involved.
use chrono::{NaiveDate, NaiveTime};
use taskdeck::model::{Assignee, DashboardContext, Task, Team, TeamMember, TeamRef};
use taskdeck::render;
use taskdeck::store::{Command, TaskFilters, ViewMode, ViewState};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn team(id: &str, name: &str) -> Team {
    Team {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn state_with_context() -> ViewState {
    let mut state = ViewState::new(day("2024-01-10"));
    state.load_context(DashboardContext {
        teams: vec![team("T1", "Engineering"), team("T2", "Design")],
        scopes: vec!["USER_TASKS".to_string(), "TEAM_TASKS".to_string()],
        priorities: vec!["LOW".to_string(), "HIGH".to_string()],
        statuses: vec!["PENDING".to_string(), "DONE".to_string()],
    });
    state
}

fn sample_task() -> Task {
    Task {
        id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
        title: "Ship release".to_string(),
        description: Some("Cut the release branch".to_string()),
        priority: "HIGH".to_string(),
        status: "PENDING".to_string(),
        task_date: Some(day("2024-01-12")),
        start_time: NaiveTime::from_hms_opt(9, 30, 0),
        end_time: NaiveTime::from_hms_opt(11, 0, 0),
        assignees: vec![
            Assignee {
                id: "u1".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
            Assignee {
                id: "u2".to_string(),
                first_name: "Alan".to_string(),
                last_name: "Turing".to_string(),
            },
        ],
        team: Some(TeamRef {
            id: "T1".to_string(),
            name: "Engineering".to_string(),
        }),
    }
}

#[test]
fn task_rows_format_all_columns() {
    let rows = render::task_rows(&[sample_task()]);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.short_id, "0f8fad5b...");
    assert_eq!(row.id, "0f8fad5b-d9cb-469f-a165-70867728950e");
    assert_eq!(row.title, "Ship release");
    assert_eq!(row.assignees, "Ada Lovelace, Alan Turing");
    assert_eq!(row.priority, "HIGH");
    assert_eq!(row.status, "PENDING");
    assert_eq!(row.date, "2024-01-12");
    assert_eq!(row.hours, "09:30 - 11:00");
}

#[test]
fn task_rows_use_placeholders_for_missing_data() {
    let task = Task {
        id: "short".to_string(),
        title: "Untitled".to_string(),
        priority: "LOW".to_string(),
        status: "PENDING".to_string(),
        ..Task::default()
    };
    let rows = render::task_rows(&[task]);
    let row = &rows[0];
    assert_eq!(row.short_id, "short");
    assert_eq!(row.assignees, "N/A");
    assert_eq!(row.date, "N/A");
    assert_eq!(row.hours, " - ");
}

#[test]
fn team_entries_end_with_the_my_tasks_sentinel() {
    let mut state = state_with_context();
    assert!(state.apply(Command::SelectTeam(team("T2", "Design"))));

    let entries = render::team_entries(&state);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].label, "Engineering");
    assert!(!entries[0].active);
    assert!(entries[1].active);
    let sentinel = entries.last().unwrap();
    assert_eq!(sentinel.team_id, None);
    assert!(!sentinel.active);

    assert!(state.apply(Command::ClearTeam));
    let entries = render::team_entries(&state);
    assert!(entries.last().unwrap().active);
}

#[test]
fn scope_buttons_only_render_with_a_team() {
    let mut state = state_with_context();
    assert!(render::scope_buttons(&state).is_empty());

    assert!(state.apply(Command::SelectTeam(team("T1", "Engineering"))));
    let buttons = render::scope_buttons(&state);
    assert_eq!(buttons.len(), 2);
    assert!(buttons[0].active); // USER_TASKS default
    assert!(!buttons[1].active);
}

#[test]
fn calendar_days_span_the_center_date() {
    let mut state = state_with_context();
    assert!(state.apply(Command::SelectView(ViewMode::Calendar)));

    let days = render::calendar_days(&state);
    assert_eq!(days.len(), 5);
    assert_eq!(days[0].date, day("2024-01-08"));
    assert_eq!(days[4].date, day("2024-01-12"));
    assert!(days[2].selected);
    assert_eq!(days.iter().filter(|d| d.selected).count(), 1);
    assert_eq!(days[2].label, "10/01");
}

#[test]
fn calendar_days_are_absent_outside_the_calendar_view() {
    let state = state_with_context();
    assert!(render::calendar_days(&state).is_empty());
}

#[test]
fn filter_form_prepends_the_all_sentinel() {
    let mut state = state_with_context();
    assert!(state.apply(Command::SelectView(ViewMode::Filter)));

    let form = render::filter_form(&state).unwrap();
    assert_eq!(form.priority_options[0], render::ALL_OPTION);
    assert_eq!(form.priority_options.len(), 3);
    assert_eq!(form.priority_selected, 0);

    assert!(state.apply(Command::ApplyFilters(TaskFilters {
        priority: Some("HIGH".to_string()),
        ..TaskFilters::default()
    })));
    let form = render::filter_form(&state).unwrap();
    assert_eq!(form.priority_selected, 2);
    assert_eq!(form.status_selected, 0);
}

#[test]
fn filter_form_is_absent_outside_the_filter_view() {
    let state = state_with_context();
    assert!(render::filter_form(&state).is_none());
}

#[test]
fn list_header_and_team_panel_follow_the_selection() {
    let mut state = state_with_context();
    assert_eq!(render::list_header(&state), "My personal tasks");
    assert!(render::team_panel(&state).is_none());

    assert!(state.apply(Command::SelectTeam(team("T1", "Engineering"))));
    assert_eq!(render::list_header(&state), "Tasks for: Engineering");
    assert_eq!(
        render::team_panel(&state).unwrap().title,
        "Team: Engineering"
    );
}

#[test]
fn member_rows_join_the_name() {
    let members = vec![TeamMember {
        id: "u1".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
    }];
    let rows = render::member_rows(&members);
    assert_eq!(rows[0].name, "Grace Hopper");
    assert_eq!(rows[0].email, "grace@example.com");
    assert_eq!(rows[0].member_id, "u1");
}

#[test]
fn task_details_omit_the_team_row_for_personal_tasks() {
    let mut task = sample_task();
    let fields = render::task_details(&task);
    assert!(fields.iter().any(|(label, value)| *label == "Team" && value == "Engineering"));

    task.team = None;
    task.assignees.clear();
    task.description = None;
    let fields = render::task_details(&task);
    assert!(!fields.iter().any(|(label, _)| *label == "Team"));
    assert!(fields.iter().any(|(label, value)| *label == "Assignees" && value == "-"));
    assert!(fields.iter().any(|(label, value)| *label == "Description" && value == "-"));
}

#[test]
fn task_form_options_come_from_the_reference_lists() {
    let mut state = state_with_context();
    let options = render::task_form_options(&state);
    assert_eq!(options.priority_options, vec!["LOW", "HIGH"]);
    assert_eq!(options.status_options, vec!["PENDING", "DONE"]);
    assert_eq!(options.team_id, None);

    assert!(state.apply(Command::SelectTeam(team("T1", "Engineering"))));
    assert_eq!(
        render::task_form_options(&state).team_id.as_deref(),
        Some("T1")
    );

    assert!(state.apply(Command::ClearTeam));
    assert_eq!(render::task_form_options(&state).team_id, None);
}

#[test]
fn view_tabs_mark_the_current_mode() {
    let mut state = state_with_context();
    assert!(state.apply(Command::SelectView(ViewMode::Calendar)));
    let tabs = render::view_tabs(&state);
    assert_eq!(tabs.len(), 3);
    assert_eq!(tabs.iter().filter(|t| t.active).count(), 1);
    assert!(tabs.iter().any(|t| t.mode == ViewMode::Calendar && t.active));
}
