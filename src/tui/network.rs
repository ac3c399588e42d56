// Manages background network operations for the TUI. The actor owns the
// ApiClient; every request is spawned so a slow response never blocks later
// actions. There is no timeout on the gateway, so a hung details or members
// fetch awaited inline would wedge every task refresh queued behind it.
use crate::client::ApiClient;
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc::{Receiver, Sender};

pub async fn run_network_actor(
    client: ApiClient,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    // Bootstrap: reference lists first, then the initial unfiltered task
    // list. A context failure takes the whole dashboard down; a task failure
    // stays scoped to the table.
    match client.fetch_context().await {
        Ok(ctx) => {
            let _ = event_tx.send(AppEvent::ContextLoaded(ctx)).await;
        }
        Err(e) => {
            log::error!("dashboard bootstrap failed: {}", e);
            let _ = event_tx.send(AppEvent::ContextFailed(e.to_string())).await;
        }
    }

    let initial = client.fetch_tasks(&[]).await.map_err(|e| {
        log::error!("initial task fetch failed: {}", e);
        e.to_string()
    });
    let _ = event_tx
        .send(AppEvent::TasksLoaded {
            generation: 0,
            result: initial,
        })
        .await;
    let _ = event_tx.send(AppEvent::Status("Ready.".to_string())).await;

    while let Some(action) = action_rx.recv().await {
        if matches!(action, Action::Quit) {
            break;
        }
        let client = client.clone();
        let tx = event_tx.clone();
        tokio::spawn(handle_action(client, tx, action));
    }
}

async fn handle_action(client: ApiClient, tx: Sender<AppEvent>, action: Action) {
    match action {
        Action::Quit => {}

        Action::FetchTasks { generation, params } => {
            let result = client.fetch_tasks(&params).await.map_err(|e| {
                log::error!("task fetch failed: {}", e);
                e.to_string()
            });
            let _ = tx.send(AppEvent::TasksLoaded { generation, result }).await;
        }

        Action::FetchTaskDetails(task_id) => {
            let result = client.fetch_task(&task_id).await.map_err(|e| {
                log::error!("task details fetch failed: {}", e);
                e.to_string()
            });
            let _ = tx.send(AppEvent::TaskDetailsLoaded(result)).await;
        }

        Action::CreateTask { task, team_id } => {
            let result = client
                .create_task(&task, team_id.as_deref())
                .await
                .map(|_| ())
                .map_err(|e| {
                    log::error!("task creation failed: {}", e);
                    e.to_string()
                });
            let _ = tx.send(AppEvent::TaskCreated(result)).await;
        }

        Action::FetchTeamMembers(team_id) => {
            let result = client.fetch_team_members(&team_id).await.map_err(|e| {
                log::error!("team members fetch failed: {}", e);
                e.to_string()
            });
            let _ = tx.send(AppEvent::MembersLoaded(result)).await;
        }

        Action::GenerateInviteCode(team_id) => {
            let result = client
                .generate_invite_code(&team_id)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::InviteCode(result)).await;
        }

        Action::RemoveMember { team_id, user_id } => {
            match client.remove_member(&team_id, &user_id).await {
                Ok(()) => {
                    let _ = tx
                        .send(AppEvent::Status("Member removed.".to_string()))
                        .await;
                    // Refresh the list so the removal is visible.
                    let result = client
                        .fetch_team_members(&team_id)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(AppEvent::MembersLoaded(result)).await;
                }
                Err(e) => {
                    log::error!("member removal failed: {}", e);
                    let _ = tx
                        .send(AppEvent::Status(format!("Could not remove member: {}", e)))
                        .await;
                }
            }
        }
    }
}
