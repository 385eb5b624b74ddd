//! Integration tests for the controller actor: commands in through the
//! handle, events out through per-player channels.

use std::time::Duration;

use gridspar_protocol::{
    ClientEvent, Direction, PlayerId, ServerEvent, SessionId,
};
use gridspar_registry::{spawn_controller, ControllerHandle, EventSender};
use tokio::sync::mpsc;

type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn sid(s: &str) -> SessionId {
    SessionId(s.into())
}

fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Give the actor a moment to drain its command queue.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

async fn connect(
    handle: &ControllerHandle,
    player: PlayerId,
) -> EventReceiver {
    let (tx, rx) = channel();
    handle.connect(player, tx).await.expect("controller alive");
    rx
}

fn drain(rx: &mut EventReceiver) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_connect_delivers_identity() {
    let handle = spawn_controller();
    let mut rx = connect(&handle, pid(1)).await;
    settle().await;

    assert_eq!(
        drain(&mut rx),
        vec![ServerEvent::Connected { player_id: pid(1) }]
    );
}

#[tokio::test]
async fn test_quick_match_delivers_start_to_both_players() {
    let handle = spawn_controller();
    let mut rx1 = connect(&handle, pid(1)).await;
    let mut rx2 = connect(&handle, pid(2)).await;

    handle
        .event(pid(1), ClientEvent::JoinQuickMatch)
        .await
        .unwrap();
    handle
        .event(pid(2), ClientEvent::JoinQuickMatch)
        .await
        .unwrap();
    settle().await;

    let events1 = drain(&mut rx1);
    assert!(matches!(events1[0], ServerEvent::Connected { .. }));
    assert_eq!(events1[1], ServerEvent::WaitingForOpponent);
    let session1 = match &events1[2] {
        ServerEvent::GameStart { session_id, view } => {
            assert_eq!(view.players, vec![pid(1), pid(2)]);
            session_id.clone()
        }
        other => panic!("expected GameStart, got {other:?}"),
    };

    let events2 = drain(&mut rx2);
    assert!(matches!(events2[0], ServerEvent::Connected { .. }));
    match &events2[1] {
        ServerEvent::GameStart { session_id, .. } => {
            assert_eq!(*session_id, session1);
        }
        other => panic!("expected GameStart, got {other:?}"),
    }
}

#[tokio::test]
async fn test_moves_flow_through_the_actor_in_order() {
    let handle = spawn_controller();
    let mut rx1 = connect(&handle, pid(1)).await;
    let mut rx2 = connect(&handle, pid(2)).await;

    handle
        .event(
            pid(1),
            ClientEvent::JoinSession {
                session_id: sid("duel01"),
            },
        )
        .await
        .unwrap();
    handle
        .event(
            pid(2),
            ClientEvent::JoinSession {
                session_id: sid("duel01"),
            },
        )
        .await
        .unwrap();
    settle().await;

    // Fish the runner on (0,0) out of player 1's start snapshot.
    let events1 = drain(&mut rx1);
    let runner = events1
        .iter()
        .find_map(|e| match e {
            ServerEvent::GameStart { view, .. } => {
                view.grid[0][0].map(|c| c.piece_id)
            }
            _ => None,
        })
        .expect("game started with a piece on (0,0)");
    drain(&mut rx2);

    handle
        .event(
            pid(1),
            ClientEvent::Move {
                session_id: sid("duel01"),
                piece_id: runner,
                direction: Direction::Back,
            },
        )
        .await
        .unwrap();
    settle().await;

    // Both players see the same post-move snapshot.
    for rx in [&mut rx1, &mut rx2] {
        let events = drain(rx);
        match &events[..] {
            [ServerEvent::StateUpdate { view }] => {
                assert!(view.grid[0][0].is_none());
                assert_eq!(
                    view.grid[1][0].map(|c| c.piece_id),
                    Some(runner)
                );
                assert_eq!(view.active_player, Some(pid(2)));
            }
            other => panic!("expected one StateUpdate, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_disconnect_notifies_peer_and_kills_the_session() {
    let handle = spawn_controller();
    let mut rx1 = connect(&handle, pid(1)).await;
    let mut rx2 = connect(&handle, pid(2)).await;

    handle
        .event(pid(1), ClientEvent::JoinQuickMatch)
        .await
        .unwrap();
    handle
        .event(pid(2), ClientEvent::JoinQuickMatch)
        .await
        .unwrap();
    settle().await;
    let events1 = drain(&mut rx1);
    let session_id = events1
        .iter()
        .find_map(|e| match e {
            ServerEvent::GameStart { session_id, .. } => {
                Some(session_id.clone())
            }
            _ => None,
        })
        .expect("paired");
    drain(&mut rx2);

    handle.disconnect(pid(1)).await.unwrap();
    settle().await;

    assert_eq!(
        drain(&mut rx2),
        vec![ServerEvent::PlayerDisconnected { player_id: pid(1) }]
    );

    // Moving against the dead session draws no response at all.
    handle
        .event(
            pid(2),
            ClientEvent::Move {
                session_id,
                piece_id: gridspar_protocol::PieceId(6),
                direction: Direction::Forward,
            },
        )
        .await
        .unwrap();
    settle().await;
    assert!(drain(&mut rx2).is_empty());
}

#[tokio::test]
async fn test_dropped_receiver_does_not_stall_the_actor() {
    let handle = spawn_controller();
    let rx1 = connect(&handle, pid(1)).await;
    let mut rx2 = connect(&handle, pid(2)).await;
    drop(rx1); // player 1's connection task is gone

    handle
        .event(pid(1), ClientEvent::JoinQuickMatch)
        .await
        .unwrap();
    handle
        .event(pid(2), ClientEvent::JoinQuickMatch)
        .await
        .unwrap();
    settle().await;

    // Delivery to the dead channel is dropped; player 2 still pairs.
    let events2 = drain(&mut rx2);
    assert!(events2
        .iter()
        .any(|e| matches!(e, ServerEvent::GameStart { .. })));
}
