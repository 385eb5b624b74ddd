//! The lifecycle controller: inbound event → registry/engine mutation →
//! outbound events.
//!
//! [`Controller`] is the pure state machine: synchronous, channel-free,
//! and tested directly. [`spawn_controller`] wraps one in an actor task
//! that owns the per-player outbound senders and processes each command
//! to completion before the next, so every session's events are strictly
//! serialized without any locking.

use std::collections::HashMap;

use gridspar_engine::attempt_move;
use gridspar_protocol::{
    ClientEvent, Direction, LobbyId, PieceId, PlayerId, ServerEvent,
    SessionId,
};
use tokio::sync::mpsc;

use crate::{
    AdmissionError, ControllerError, LobbyJoin, QuickMatch, SessionRegistry,
};

/// One event addressed to one player. The controller resolves session and
/// lobby membership itself, so recipients are always concrete.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: PlayerId,
    pub event: ServerEvent,
}

impl Outbound {
    fn new(to: PlayerId, event: ServerEvent) -> Self {
        Self { to, event }
    }
}

/// The lifecycle state machine. Owns the registry; nothing else does.
#[derive(Debug, Default)]
pub struct Controller {
    registry: SessionRegistry,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for diagnostics and tests.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// A participant's connection was accepted: tell them who they are.
    pub fn connect(&mut self, player: PlayerId) -> Vec<Outbound> {
        tracing::info!(%player, "player connected");
        vec![Outbound::new(
            player,
            ServerEvent::Connected { player_id: player },
        )]
    }

    /// Routes one inbound event. Unknown session or lobby references
    /// inside the event fail silently; a stale client must not be able
    /// to perturb anything.
    pub fn handle(
        &mut self,
        player: PlayerId,
        event: ClientEvent,
    ) -> Vec<Outbound> {
        match event {
            ClientEvent::JoinQuickMatch => self.join_quick_match(player),
            ClientEvent::CreateLobby => self.create_lobby(player),
            ClientEvent::JoinLobby { lobby_id } => {
                self.join_lobby(player, lobby_id)
            }
            ClientEvent::JoinSession { session_id } => {
                self.join_session(player, session_id)
            }
            ClientEvent::Move {
                session_id,
                piece_id,
                direction,
            } => self.apply_move(player, session_id, piece_id, direction),
            ClientEvent::PlayAgain { session_id } => {
                self.play_again(player, session_id)
            }
        }
    }

    /// A participant dropped: sweep them out of the pool, lobbies, and
    /// sessions, and tell everyone who shared one with them.
    pub fn disconnect(&mut self, player: PlayerId) -> Vec<Outbound> {
        tracing::info!(%player, "player disconnected");
        let departure = self.registry.remove_player_everywhere(player);

        let mut out = Vec::new();
        let gone = ServerEvent::PlayerDisconnected { player_id: player };
        for (_, others) in departure.sessions {
            out.extend(
                others.into_iter().map(|o| Outbound::new(o, gone.clone())),
            );
        }
        for (_, remaining) in departure.lobbies {
            out.extend(
                remaining
                    .into_iter()
                    .map(|o| Outbound::new(o, gone.clone())),
            );
        }
        out
    }

    fn join_quick_match(&mut self, player: PlayerId) -> Vec<Outbound> {
        match self.registry.quick_match(player) {
            QuickMatch::Waiting => vec![Outbound::new(
                player,
                ServerEvent::WaitingForOpponent,
            )],
            QuickMatch::Paired {
                session_id,
                players,
            } => self.game_start_events(&session_id, &players),
        }
    }

    fn create_lobby(&mut self, player: PlayerId) -> Vec<Outbound> {
        let lobby_id = self.registry.create_lobby(player);
        vec![Outbound::new(
            player,
            ServerEvent::LobbyCreated { lobby_id },
        )]
    }

    fn join_lobby(
        &mut self,
        player: PlayerId,
        lobby_id: LobbyId,
    ) -> Vec<Outbound> {
        match self.registry.join_lobby(&lobby_id, player) {
            Err(err) => vec![Outbound::new(player, admission_event(&err))],
            Ok(LobbyJoin::Joined) => vec![Outbound::new(
                player,
                ServerEvent::LobbyJoined { lobby_id },
            )],
            Ok(LobbyJoin::Promoted {
                session_id,
                players,
            }) => {
                let mut out = vec![Outbound::new(
                    player,
                    ServerEvent::LobbyJoined { lobby_id },
                )];
                out.extend(self.game_start_events(&session_id, &players));
                out
            }
        }
    }

    fn join_session(
        &mut self,
        player: PlayerId,
        session_id: SessionId,
    ) -> Vec<Outbound> {
        let join = match self.registry.join_session(&session_id, player) {
            Err(err) => {
                return vec![Outbound::new(player, admission_event(&err))];
            }
            Ok(join) => join,
        };
        let Some(state) = self.registry.session(&session_id) else {
            return Vec::new();
        };
        let view = state.public_view();
        let members = state.players().to_vec();

        // Snapshot to everyone after the admission, then the start
        // notification once the second seat fills.
        let mut out: Vec<Outbound> = members
            .iter()
            .map(|m| {
                Outbound::new(
                    *m,
                    ServerEvent::StateUpdate { view: view.clone() },
                )
            })
            .collect();
        if join.started {
            out.extend(members.iter().map(|m| {
                Outbound::new(
                    *m,
                    ServerEvent::GameStart {
                        session_id: session_id.clone(),
                        view: view.clone(),
                    },
                )
            }));
        }
        out
    }

    fn apply_move(
        &mut self,
        player: PlayerId,
        session_id: SessionId,
        piece_id: PieceId,
        direction: Direction,
    ) -> Vec<Outbound> {
        let Some(state) = self.registry.session_mut(&session_id) else {
            tracing::debug!(
                %session_id, %player, "move against unknown session ignored"
            );
            return Vec::new();
        };

        // Coarse gate: an off-turn sender gets nothing at all. The
        // validator repeats this check with a typed error; this gate only
        // exists so stale clients cannot draw a response.
        if state.active_player() != Some(player) {
            tracing::debug!(%session_id, %player, "off-turn move ignored");
            return Vec::new();
        }

        match attempt_move(state, piece_id, direction) {
            Err(err) => {
                tracing::debug!(
                    %session_id, %player, error = %err, "move rejected"
                );
                vec![Outbound::new(
                    player,
                    ServerEvent::InvalidMove {
                        reason: err.reason(),
                        message: err.to_string(),
                    },
                )]
            }
            Ok(report) => {
                tracing::debug!(
                    %session_id,
                    %player,
                    piece = %report.piece,
                    captured = report.captured.is_some(),
                    "move applied"
                );
                let view = state.public_view();
                let members = state.players().to_vec();
                let finished = state.is_terminal();
                let winner = state.winner();

                let mut out: Vec<Outbound> = members
                    .iter()
                    .map(|m| {
                        Outbound::new(
                            *m,
                            ServerEvent::StateUpdate { view: view.clone() },
                        )
                    })
                    .collect();
                if finished {
                    if let Some(winner) = winner {
                        tracing::info!(
                            %session_id, %winner, "game over"
                        );
                        out.extend(members.iter().map(|m| {
                            Outbound::new(
                                *m,
                                ServerEvent::GameOver { winner },
                            )
                        }));
                    }
                    self.registry.delete_session(&session_id);
                }
                out
            }
        }
    }

    fn play_again(
        &mut self,
        player: PlayerId,
        session_id: SessionId,
    ) -> Vec<Outbound> {
        let Some(state) = self.registry.session_mut(&session_id) else {
            tracing::debug!(
                %session_id, %player,
                "play-again against unknown session ignored"
            );
            return Vec::new();
        };

        // Same id, fresh board: clear everything, reseat the same pair in
        // the same order, lay the roster out again.
        let members = state.players().to_vec();
        state.reset();
        for member in &members {
            state.add_player(*member);
        }
        state.initialize_roster();
        let view = state.public_view();
        tracing::info!(%session_id, "board rebuilt for a fresh round");

        members
            .into_iter()
            .map(|m| {
                Outbound::new(
                    m,
                    ServerEvent::GameRestart { view: view.clone() },
                )
            })
            .collect()
    }

    fn game_start_events(
        &self,
        session_id: &SessionId,
        players: &[PlayerId],
    ) -> Vec<Outbound> {
        let Some(state) = self.registry.session(session_id) else {
            return Vec::new();
        };
        let view = state.public_view();
        players
            .iter()
            .map(|p| {
                Outbound::new(
                    *p,
                    ServerEvent::GameStart {
                        session_id: session_id.clone(),
                        view: view.clone(),
                    },
                )
            })
            .collect()
    }
}

/// The private notification for a refused admission.
fn admission_event(err: &AdmissionError) -> ServerEvent {
    match err {
        AdmissionError::LobbyNotFound(_) => ServerEvent::LobbyNotFound,
        AdmissionError::LobbyFull(_) => ServerEvent::LobbyFull,
        AdmissionError::SessionFull(_) => ServerEvent::SessionFull,
    }
}

// ---------------------------------------------------------------------------
// Actor shell
// ---------------------------------------------------------------------------

/// Channel for delivering outbound events to one player's connection task.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Command channel depth. Senders briefly back-pressure when the
/// controller falls this far behind.
const COMMAND_CHANNEL_SIZE: usize = 64;

/// Commands the outside world can send the controller actor.
enum ControllerCommand {
    Connect {
        player_id: PlayerId,
        sender: EventSender,
    },
    Event {
        player_id: PlayerId,
        event: ClientEvent,
    },
    Disconnect {
        player_id: PlayerId,
    },
}

/// Handle to the running controller actor. Cheap to clone; every
/// connection task holds one.
#[derive(Clone)]
pub struct ControllerHandle {
    sender: mpsc::Sender<ControllerCommand>,
}

impl ControllerHandle {
    /// Registers a player's outbound channel. The player receives
    /// `Connected` with their assigned id.
    pub async fn connect(
        &self,
        player_id: PlayerId,
        sender: EventSender,
    ) -> Result<(), ControllerError> {
        self.sender
            .send(ControllerCommand::Connect { player_id, sender })
            .await
            .map_err(|_| ControllerError::Unavailable)
    }

    /// Forwards a decoded client event.
    pub async fn event(
        &self,
        player_id: PlayerId,
        event: ClientEvent,
    ) -> Result<(), ControllerError> {
        self.sender
            .send(ControllerCommand::Event { player_id, event })
            .await
            .map_err(|_| ControllerError::Unavailable)
    }

    /// Reports that the player's connection is gone.
    pub async fn disconnect(
        &self,
        player_id: PlayerId,
    ) -> Result<(), ControllerError> {
        self.sender
            .send(ControllerCommand::Disconnect { player_id })
            .await
            .map_err(|_| ControllerError::Unavailable)
    }
}

struct ControllerActor {
    controller: Controller,
    /// Per-player outbound channels, registered at connect time.
    senders: HashMap<PlayerId, EventSender>,
    receiver: mpsc::Receiver<ControllerCommand>,
}

impl ControllerActor {
    async fn run(mut self) {
        tracing::info!("lifecycle controller started");
        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                ControllerCommand::Connect { player_id, sender } => {
                    self.senders.insert(player_id, sender);
                    let out = self.controller.connect(player_id);
                    self.dispatch(out);
                }
                ControllerCommand::Event { player_id, event } => {
                    let out = self.controller.handle(player_id, event);
                    self.dispatch(out);
                }
                ControllerCommand::Disconnect { player_id } => {
                    let out = self.controller.disconnect(player_id);
                    self.senders.remove(&player_id);
                    self.dispatch(out);
                }
            }
        }
        tracing::info!("lifecycle controller stopped");
    }

    /// Fire-and-forget delivery; a closed receiver just means the player
    /// is already gone.
    fn dispatch(&self, out: Vec<Outbound>) {
        for Outbound { to, event } in out {
            if let Some(sender) = self.senders.get(&to) {
                let _ = sender.send(event);
            }
        }
    }
}

/// Spawns the controller actor task and returns a handle to it.
pub fn spawn_controller() -> ControllerHandle {
    let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
    let actor = ControllerActor {
        controller: Controller::new(),
        senders: HashMap::new(),
        receiver: rx,
    };
    tokio::spawn(actor.run());
    ControllerHandle { sender: tx }
}

#[cfg(test)]
mod tests {
    //! Pure state-machine tests: events in, outbound lists out, no
    //! channels or tasks anywhere.

    use super::*;
    use gridspar_protocol::{MoveReason, PublicView};

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    fn sid(s: &str) -> SessionId {
        SessionId(s.into())
    }

    /// Events addressed to one player, in order.
    fn events_for(out: &[Outbound], player: PlayerId) -> Vec<&ServerEvent> {
        out.iter()
            .filter(|o| o.to == player)
            .map(|o| &o.event)
            .collect()
    }

    /// Seats players 1 and 2 in the session `duel01` via JoinSession and
    /// returns the start view.
    fn start_duel(controller: &mut Controller) -> PublicView {
        let out = controller.handle(
            pid(1),
            ClientEvent::JoinSession {
                session_id: sid("duel01"),
            },
        );
        assert_eq!(out.len(), 1); // just the solo snapshot

        let out = controller.handle(
            pid(2),
            ClientEvent::JoinSession {
                session_id: sid("duel01"),
            },
        );
        match events_for(&out, pid(2)).last() {
            Some(ServerEvent::GameStart { view, .. }) => view.clone(),
            other => panic!("expected GameStart, got {other:?}"),
        }
    }

    /// The piece id standing on a cell of a view.
    fn piece_at(view: &PublicView, row: usize, col: usize) -> PieceId {
        view.grid[row][col]
            .unwrap_or_else(|| panic!("({row},{col}) is empty"))
            .piece_id
    }

    fn mv(piece_id: PieceId, direction: Direction) -> ClientEvent {
        ClientEvent::Move {
            session_id: sid("duel01"),
            piece_id,
            direction,
        }
    }

    #[test]
    fn test_connect_reports_identity() {
        let mut controller = Controller::new();
        let out = controller.connect(pid(7));
        assert_eq!(
            out,
            vec![Outbound::new(
                pid(7),
                ServerEvent::Connected { player_id: pid(7) }
            )]
        );
    }

    #[test]
    fn test_quick_match_pairs_and_starts() {
        let mut controller = Controller::new();

        let out = controller.handle(pid(1), ClientEvent::JoinQuickMatch);
        assert_eq!(
            out,
            vec![Outbound::new(pid(1), ServerEvent::WaitingForOpponent)]
        );

        let out = controller.handle(pid(2), ClientEvent::JoinQuickMatch);
        // Both players get GameStart for the same fresh session.
        let starts: Vec<_> = out
            .iter()
            .filter_map(|o| match &o.event {
                ServerEvent::GameStart { session_id, view } => {
                    Some((o.to, session_id.clone(), view))
                }
                _ => None,
            })
            .collect();
        assert_eq!(starts.len(), 2);
        assert_eq!(starts[0].1, starts[1].1);
        let view = starts[0].2;
        assert_eq!(view.players, vec![pid(1), pid(2)]);
        assert_eq!(view.active_player, Some(pid(1)));
        let filled = view
            .grid
            .iter()
            .flatten()
            .filter(|c| c.is_some())
            .count();
        assert_eq!(filled, 10);
    }

    #[test]
    fn test_lobby_flow_creates_joins_and_promotes() {
        let mut controller = Controller::new();

        let out = controller.handle(pid(1), ClientEvent::CreateLobby);
        let lobby_id = match &out[0].event {
            ServerEvent::LobbyCreated { lobby_id } => lobby_id.clone(),
            other => panic!("expected LobbyCreated, got {other:?}"),
        };

        let out = controller.handle(
            pid(2),
            ClientEvent::JoinLobby {
                lobby_id: lobby_id.clone(),
            },
        );
        // Joiner hears LobbyJoined, then both hear GameStart.
        assert!(matches!(
            events_for(&out, pid(2)).first(),
            Some(ServerEvent::LobbyJoined { .. })
        ));
        assert!(matches!(
            events_for(&out, pid(1)).first(),
            Some(ServerEvent::GameStart { .. })
        ));
        assert!(matches!(
            events_for(&out, pid(2)).last(),
            Some(ServerEvent::GameStart { .. })
        ));

        // The lobby is discarded on promotion.
        let out = controller.handle(
            pid(3),
            ClientEvent::JoinLobby { lobby_id },
        );
        assert_eq!(
            out,
            vec![Outbound::new(pid(3), ServerEvent::LobbyNotFound)]
        );
    }

    #[test]
    fn test_join_unknown_lobby_is_reported_privately() {
        let mut controller = Controller::new();
        let out = controller.handle(
            pid(1),
            ClientEvent::JoinLobby {
                lobby_id: LobbyId("nope00".into()),
            },
        );
        assert_eq!(
            out,
            vec![Outbound::new(pid(1), ServerEvent::LobbyNotFound)]
        );
    }

    #[test]
    fn test_join_session_snapshots_then_starts() {
        let mut controller = Controller::new();

        let out = controller.handle(
            pid(1),
            ClientEvent::JoinSession {
                session_id: sid("duel01"),
            },
        );
        // Solo member: one snapshot of a pieceless board.
        match &out[..] {
            [Outbound {
                to,
                event: ServerEvent::StateUpdate { view },
            }] => {
                assert_eq!(*to, pid(1));
                assert!(view.grid.iter().flatten().all(|c| c.is_none()));
            }
            other => panic!("expected one StateUpdate, got {other:?}"),
        }

        let out = controller.handle(
            pid(2),
            ClientEvent::JoinSession {
                session_id: sid("duel01"),
            },
        );
        // Snapshot to both, then GameStart to both.
        assert_eq!(out.len(), 4);
        for player in [pid(1), pid(2)] {
            let events = events_for(&out, player);
            assert!(matches!(events[0], ServerEvent::StateUpdate { .. }));
            assert!(matches!(events[1], ServerEvent::GameStart { .. }));
        }
    }

    #[test]
    fn test_join_full_session_is_turned_away() {
        let mut controller = Controller::new();
        start_duel(&mut controller);

        let out = controller.handle(
            pid(3),
            ClientEvent::JoinSession {
                session_id: sid("duel01"),
            },
        );
        assert_eq!(
            out,
            vec![Outbound::new(pid(3), ServerEvent::SessionFull)]
        );
    }

    #[test]
    fn test_accepted_move_snapshots_both_players() {
        let mut controller = Controller::new();
        let view = start_duel(&mut controller);
        let runner = piece_at(&view, 0, 0);

        let out = controller.handle(pid(1), mv(runner, Direction::Back));
        assert_eq!(out.len(), 2);
        for o in &out {
            match &o.event {
                ServerEvent::StateUpdate { view } => {
                    assert!(view.grid[0][0].is_none());
                    assert_eq!(
                        view.grid[1][0].map(|c| c.piece_id),
                        Some(runner)
                    );
                    assert_eq!(view.active_player, Some(pid(2)));
                }
                other => panic!("expected StateUpdate, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejected_move_is_reported_only_to_the_mover() {
        let mut controller = Controller::new();
        let view = start_duel(&mut controller);
        let runner = piece_at(&view, 0, 0);

        // Forward from row 0 leaves the board.
        let out = controller.handle(pid(1), mv(runner, Direction::Forward));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to, pid(1));
        match &out[0].event {
            ServerEvent::InvalidMove { reason, message } => {
                assert_eq!(*reason, MoveReason::OutOfBounds);
                assert!(!message.is_empty());
            }
            other => panic!("expected InvalidMove, got {other:?}"),
        }
    }

    #[test]
    fn test_off_turn_move_is_silently_ignored() {
        let mut controller = Controller::new();
        let view = start_duel(&mut controller);
        let b_runner = piece_at(&view, 4, 0);

        // Player 2 moving while player 1 holds the turn: nothing back,
        // nothing changed.
        let out =
            controller.handle(pid(2), mv(b_runner, Direction::Forward));
        assert!(out.is_empty());
        let state = controller
            .registry()
            .session(&sid("duel01"))
            .expect("session lives");
        assert_eq!(state.active_player(), Some(pid(1)));
    }

    #[test]
    fn test_move_against_unknown_session_is_silent() {
        let mut controller = Controller::new();
        let out = controller.handle(
            pid(1),
            ClientEvent::Move {
                session_id: sid("ghost0"),
                piece_id: PieceId(1),
                direction: Direction::Forward,
            },
        );
        assert!(out.is_empty());
    }

    /// Plays a complete scripted game in `duel01` to player 1's win.
    /// Player 1 hunts with the leapers while player 2 walks runners into
    /// reach; every move is legal and turns alternate throughout.
    fn play_to_win(controller: &mut Controller) -> Vec<Outbound> {
        let view = start_duel(controller);
        let p = |r, c| piece_at(&view, r, c);
        let (a_r2, a_lo, a_ld, a_r5) = (p(0, 1), p(0, 2), p(0, 3), p(0, 4));
        let (b_r2, b_r5) = (p(4, 1), p(4, 4));

        use Direction::*;
        let script = [
            (pid(1), a_lo, Back),         // LO → (2,2)
            (pid(2), b_r2, Forward),      // B runner → (3,1)
            (pid(1), a_lo, Back),         // LO × leaper at (4,2)
            (pid(2), b_r2, Forward),      // B runner → (2,1)
            (pid(1), a_lo, Left),         // LO × runner at (4,0)
            (pid(2), b_r2, Forward),      // B runner → (1,1)
            (pid(1), a_r2, Back),         // A runner × runner at (1,1)
            (pid(2), b_r5, Forward),      // B runner → (3,4)
            (pid(1), a_ld, BackLeft),     // LD → (2,1)
            (pid(2), b_r5, Forward),      // B runner → (2,4)
            (pid(1), a_ld, BackRight),    // LD × leaper at (4,3)
            (pid(2), b_r5, Forward),      // B runner → (1,4)
            (pid(1), a_r5, Back),         // A runner × last piece at (1,4)
        ];

        let mut last = Vec::new();
        for (player, piece, direction) in script {
            last = controller.handle(player, mv(piece, direction));
            assert!(
                last.iter().all(|o| !matches!(
                    o.event,
                    ServerEvent::InvalidMove { .. }
                )),
                "scripted move {piece} {direction} was rejected"
            );
        }
        last
    }

    #[test]
    fn test_winning_move_ends_and_deletes_the_session() {
        let mut controller = Controller::new();
        let out = play_to_win(&mut controller);

        // Final move: snapshot + game over, to both players.
        for player in [pid(1), pid(2)] {
            let events = events_for(&out, player);
            assert!(matches!(events[0], ServerEvent::StateUpdate { .. }));
            assert_eq!(
                events[1],
                &ServerEvent::GameOver { winner: pid(1) }
            );
        }
        assert_eq!(controller.registry().session_count(), 0);

        // The id is dead: further moves and restarts are silent no-ops.
        let out = controller.handle(
            pid(2),
            ClientEvent::Move {
                session_id: sid("duel01"),
                piece_id: PieceId(6),
                direction: Direction::Forward,
            },
        );
        assert!(out.is_empty());
        let out = controller.handle(
            pid(1),
            ClientEvent::PlayAgain {
                session_id: sid("duel01"),
            },
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_play_again_rebuilds_a_live_session() {
        let mut controller = Controller::new();
        let view = start_duel(&mut controller);
        let runner = piece_at(&view, 0, 0);
        controller.handle(pid(1), mv(runner, Direction::Back));

        let out = controller.handle(
            pid(1),
            ClientEvent::PlayAgain {
                session_id: sid("duel01"),
            },
        );
        assert_eq!(out.len(), 2);
        for o in &out {
            match &o.event {
                ServerEvent::GameRestart { view } => {
                    // Fresh layout, player A to move again.
                    let filled = view
                        .grid
                        .iter()
                        .flatten()
                        .filter(|c| c.is_some())
                        .count();
                    assert_eq!(filled, 10);
                    assert!(view.grid[0][0].is_some());
                    assert!(view.grid[1][0].is_none());
                    assert_eq!(view.active_player, Some(pid(1)));
                    // Rebuilt pieces carry ids the first board never used.
                    assert!(view.grid[0][0]
                        .map(|c| c.piece_id != runner)
                        .unwrap_or(false));
                }
                other => panic!("expected GameRestart, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_disconnect_notifies_peer_and_deletes_session() {
        let mut controller = Controller::new();
        start_duel(&mut controller);

        let out = controller.disconnect(pid(1));
        assert_eq!(
            out,
            vec![Outbound::new(
                pid(2),
                ServerEvent::PlayerDisconnected { player_id: pid(1) }
            )]
        );
        assert_eq!(controller.registry().session_count(), 0);

        // The survivor's follow-up move is a silent no-op.
        let out = controller.handle(
            pid(2),
            ClientEvent::Move {
                session_id: sid("duel01"),
                piece_id: PieceId(6),
                direction: Direction::Forward,
            },
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_disconnect_while_waiting_clears_the_pool() {
        let mut controller = Controller::new();
        controller.handle(pid(1), ClientEvent::JoinQuickMatch);

        let out = controller.disconnect(pid(1));
        assert!(out.is_empty()); // nobody shared anything with them

        // The next quick-match request finds an empty pool.
        let out = controller.handle(pid(2), ClientEvent::JoinQuickMatch);
        assert_eq!(
            out,
            vec![Outbound::new(pid(2), ServerEvent::WaitingForOpponent)]
        );
    }
}
