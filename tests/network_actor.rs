// Actor-level test: a hung modal request must not hold up task refreshes
// queued behind it, since the gateway carries no timeout.
#![cfg(feature = "tui")]
use std::io::Write;
use std::time::Duration;
use taskdeck::client::ApiClient;
use taskdeck::tui::action::{Action, AppEvent};
use taskdeck::tui::network::run_network_actor;
use tokio::sync::mpsc;

#[tokio::test]
async fn a_hung_details_fetch_does_not_block_task_refreshes() {
    let mut server = mockito::Server::new_async().await;
    // Bootstrap endpoints.
    let _teams = server
        .mock("GET", "/teams/all")
        .with_body("[]")
        .create_async()
        .await;
    let _scopes = server
        .mock("GET", "/task/scopes")
        .with_body("[]")
        .create_async()
        .await;
    let _priorities = server
        .mock("GET", "/task/priorities")
        .with_body("[]")
        .create_async()
        .await;
    let _statuses = server
        .mock("GET", "/task/statuses")
        .with_body("[]")
        .create_async()
        .await;
    let _tasks = server
        .mock("GET", "/task")
        .with_body("[]")
        .create_async()
        .await;
    // A details request that stalls for longer than the whole test budget.
    let _slow = server
        .mock("GET", "/task/slow")
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_secs(3));
            writer.write_all(b"{}")
        })
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);
    tokio::spawn(run_network_actor(client, action_rx, event_tx));

    action_tx
        .send(Action::FetchTaskDetails("slow".to_string()))
        .await
        .unwrap();
    action_tx
        .send(Action::FetchTasks {
            generation: 1,
            params: Vec::new(),
        })
        .await
        .unwrap();

    // The refresh queued behind the stalled details fetch must still land
    // well before the stall resolves.
    let refreshed = tokio::time::timeout(Duration::from_millis(1500), async {
        loop {
            match event_rx.recv().await {
                Some(AppEvent::TasksLoaded { generation: 1, .. }) => break,
                Some(_) => continue,
                None => panic!("actor hung up before the task refresh"),
            }
        }
    })
    .await;
    assert!(
        refreshed.is_ok(),
        "task refresh was blocked behind the hung details fetch"
    );
}
