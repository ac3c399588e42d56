// Stale-response handling: every task fetch carries a generation stamp and
// only the response matching the newest stamp may touch the table.
#![cfg(feature = "tui")]
use chrono::NaiveDate;
use taskdeck::model::Task;
use taskdeck::store::ViewState;
use taskdeck::tui::action::AppEvent;
use taskdeck::tui::handlers::handle_app_event;
use taskdeck::tui::state::{AppState, TaskTable};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        priority: "LOW".to_string(),
        status: "PENDING".to_string(),
        ..Task::default()
    }
}

fn fresh() -> AppState {
    AppState::new(ViewState::new(day("2024-01-10")))
}

#[test]
fn a_stale_response_is_dropped_entirely() {
    let mut state = fresh();
    let old = state.next_task_generation();
    let new = state.next_task_generation();
    state.table = TaskTable::Loading;

    // The newer fetch resolves first.
    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation: new,
            result: Ok(vec![task("t2", "Current")]),
        },
    );
    // The older one arrives late and must not overwrite it.
    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation: old,
            result: Ok(vec![task("t1", "Stale")]),
        },
    );

    match &state.table {
        TaskTable::Ready(tasks) => {
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].title, "Current");
        }
        other => panic!("unexpected table state: {:?}", other),
    }
}

#[test]
fn a_stale_error_cannot_clobber_current_rows() {
    let mut state = fresh();
    let old = state.next_task_generation();
    let new = state.next_task_generation();

    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation: new,
            result: Ok(vec![task("t1", "Current")]),
        },
    );
    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation: old,
            result: Err("connection reset".to_string()),
        },
    );

    assert!(matches!(state.table, TaskTable::Ready(_)));
}

#[test]
fn the_current_generation_still_applies_after_stale_drops() {
    let mut state = fresh();
    let old = state.next_task_generation();
    let new = state.next_task_generation();

    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation: old,
            result: Ok(vec![task("t1", "Stale")]),
        },
    );
    assert_eq!(state.table, TaskTable::Loading);

    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation: new,
            result: Ok(vec![task("t2", "Current")]),
        },
    );
    assert!(matches!(state.table, TaskTable::Ready(ref tasks) if tasks.len() == 1));
}

#[test]
fn a_failed_current_fetch_only_touches_the_table() {
    let mut state = fresh();
    let generation = state.next_task_generation();
    let view_before = state.view.clone();
    let status_before = state.status.clone();

    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation,
            result: Err("HTTP 500 for http://localhost/task".to_string()),
        },
    );

    assert_eq!(
        state.table,
        TaskTable::Failed("HTTP 500 for http://localhost/task".to_string())
    );
    assert_eq!(state.view, view_before);
    assert_eq!(state.status, status_before);
    assert!(state.dashboard_failed.is_none());
}

#[test]
fn a_fresh_response_resets_the_row_selection() {
    let mut state = fresh();
    let generation = state.next_task_generation();
    state.selected_row = 4;

    handle_app_event(
        &mut state,
        AppEvent::TasksLoaded {
            generation,
            result: Ok(vec![task("t1", "A"), task("t2", "B")]),
        },
    );

    assert_eq!(state.selected_row, 0);
}
