//! The session registry: who is playing whom, who is waiting, and which
//! lobbies are still forming.
//!
//! A single owned value with plain synchronous operations. Each session's
//! `GameState` lives in exactly one map entry and is never shared; the
//! registry is the only owner for the session's whole lifetime.

use std::collections::{HashMap, VecDeque};

use gridspar_engine::GameState;
use gridspar_protocol::{LobbyId, PlayerId, SessionId};
use rand::Rng;

use crate::AdmissionError;

/// Outcome of a quick-match request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickMatch {
    /// Nobody else is waiting; the player was parked in the pool.
    Waiting,
    /// Paired with the oldest waiter. The session exists, both players
    /// are admitted in waiter-first order, and the roster is laid out.
    Paired {
        session_id: SessionId,
        players: [PlayerId; 2],
    },
}

/// Outcome of joining a lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyJoin {
    /// Admitted; the lobby still has one seat open.
    Joined,
    /// This admission filled the lobby: it was discarded and a fresh,
    /// fully initialized session created from its members in join order.
    Promoted {
        session_id: SessionId,
        players: [PlayerId; 2],
    },
}

/// Outcome of a successful session join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionJoin {
    /// Whether this admission seated the second player and laid out the
    /// roster.
    pub started: bool,
}

/// Everything a departing player left behind: per torn-down session and
/// per touched lobby, the *other* members who need to hear about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Departure {
    pub sessions: Vec<(SessionId, Vec<PlayerId>)>,
    pub lobbies: Vec<(LobbyId, Vec<PlayerId>)>,
    pub was_waiting: bool,
}

/// Where a participant currently stands, as observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    /// Connected but not yet matched, queued, or seated.
    Unpaired,
    /// Parked in the quick-match pool.
    Waiting,
    /// Member of a forming lobby.
    InLobby,
    /// Seated in a session.
    InSession,
}

/// All matchmaking and session state for one server process.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Every live game, keyed by session id. Deleted, never merely
    /// marked, once terminal or once any member leaves.
    sessions: HashMap<SessionId, GameState>,
    /// Quick-match pool, oldest waiter first.
    waiting: VecDeque<PlayerId>,
    /// Forming lobbies, members in join order.
    lobbies: HashMap<LobbyId, Vec<PlayerId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs the player with the oldest waiter, or parks them if the pool
    /// is empty. Re-requesting while already parked is a no-op that still
    /// reports `Waiting`.
    pub fn quick_match(&mut self, player: PlayerId) -> QuickMatch {
        if self.waiting.contains(&player) {
            return QuickMatch::Waiting;
        }
        match self.waiting.pop_front() {
            Some(opponent) => {
                let session_id = self.fresh_session_id();
                let mut state = GameState::new();
                state.add_player(opponent);
                state.add_player(player);
                state.initialize_roster();
                self.sessions.insert(session_id.clone(), state);
                tracing::info!(
                    %session_id, %opponent, %player, "quick match paired"
                );
                QuickMatch::Paired {
                    session_id,
                    players: [opponent, player],
                }
            }
            None => {
                self.waiting.push_back(player);
                tracing::debug!(%player, "parked in quick-match pool");
                QuickMatch::Waiting
            }
        }
    }

    /// Opens a new lobby seeded with its creator.
    pub fn create_lobby(&mut self, creator: PlayerId) -> LobbyId {
        let lobby_id = self.fresh_lobby_id();
        self.lobbies.insert(lobby_id.clone(), vec![creator]);
        tracing::info!(%lobby_id, %creator, "lobby created");
        lobby_id
    }

    /// Admits a player to a lobby; the second admission promotes the
    /// lobby into a session and discards it.
    pub fn join_lobby(
        &mut self,
        lobby_id: &LobbyId,
        player: PlayerId,
    ) -> Result<LobbyJoin, AdmissionError> {
        let members = self
            .lobbies
            .get_mut(lobby_id)
            .ok_or_else(|| AdmissionError::LobbyNotFound(lobby_id.clone()))?;
        if members.contains(&player) {
            return Ok(LobbyJoin::Joined);
        }
        if members.len() >= 2 {
            return Err(AdmissionError::LobbyFull(lobby_id.clone()));
        }
        members.push(player);
        if members.len() < 2 {
            tracing::info!(%lobby_id, %player, "joined lobby");
            return Ok(LobbyJoin::Joined);
        }

        let players = [members[0], members[1]];
        self.lobbies.remove(lobby_id);

        let session_id = self.fresh_session_id();
        let mut state = GameState::new();
        state.add_player(players[0]);
        state.add_player(players[1]);
        state.initialize_roster();
        self.sessions.insert(session_id.clone(), state);
        tracing::info!(%lobby_id, %session_id, "lobby promoted to session");
        Ok(LobbyJoin::Promoted {
            session_id,
            players,
        })
    }

    /// Admits a player to a session, creating the session if the id is
    /// unknown. The second admission lays out the roster.
    pub fn join_session(
        &mut self,
        session_id: &SessionId,
        player: PlayerId,
    ) -> Result<SessionJoin, AdmissionError> {
        let state = self
            .sessions
            .entry(session_id.clone())
            .or_insert_with(GameState::new);
        if !state.add_player(player) {
            return Err(AdmissionError::SessionFull(session_id.clone()));
        }
        let started = state.is_ready() && state.initialize_roster();
        tracing::info!(%session_id, %player, started, "joined session");
        Ok(SessionJoin { started })
    }

    /// Removes a player from the pool, from every lobby (discarding
    /// emptied lobbies), and tears down every session they were seated
    /// in; the remaining opponent cannot continue a two-player game alone.
    pub fn remove_player_everywhere(
        &mut self,
        player: PlayerId,
    ) -> Departure {
        let mut departure = Departure::default();

        if let Some(pos) = self.waiting.iter().position(|p| *p == player) {
            self.waiting.remove(pos);
            departure.was_waiting = true;
        }

        let doomed: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|(_, state)| state.players().contains(&player))
            .map(|(id, _)| id.clone())
            .collect();
        for session_id in doomed {
            if let Some(state) = self.sessions.remove(&session_id) {
                let others: Vec<PlayerId> = state
                    .players()
                    .iter()
                    .copied()
                    .filter(|p| *p != player)
                    .collect();
                tracing::info!(
                    %session_id, %player, "session torn down on departure"
                );
                departure.sessions.push((session_id, others));
            }
        }

        let touched: Vec<LobbyId> = self
            .lobbies
            .iter()
            .filter(|(_, members)| members.contains(&player))
            .map(|(id, _)| id.clone())
            .collect();
        for lobby_id in touched {
            if let Some(members) = self.lobbies.get_mut(&lobby_id) {
                members.retain(|p| *p != player);
                let remaining = members.clone();
                if remaining.is_empty() {
                    self.lobbies.remove(&lobby_id);
                    tracing::debug!(%lobby_id, "empty lobby discarded");
                }
                departure.lobbies.push((lobby_id, remaining));
            }
        }

        departure
    }

    pub fn session(&self, session_id: &SessionId) -> Option<&GameState> {
        self.sessions.get(session_id)
    }

    pub fn session_mut(
        &mut self,
        session_id: &SessionId,
    ) -> Option<&mut GameState> {
        self.sessions.get_mut(session_id)
    }

    /// Deletes a session outright. Returns whether it existed.
    pub fn delete_session(&mut self, session_id: &SessionId) -> bool {
        let existed = self.sessions.remove(session_id).is_some();
        if existed {
            tracing::info!(%session_id, "session deleted");
        }
        existed
    }

    /// The observable lifecycle phase of a participant.
    pub fn phase_of(&self, player: PlayerId) -> PlayerPhase {
        if self.waiting.contains(&player) {
            return PlayerPhase::Waiting;
        }
        if self.lobbies.values().any(|m| m.contains(&player)) {
            return PlayerPhase::InLobby;
        }
        if self
            .sessions
            .values()
            .any(|s| s.players().contains(&player))
        {
            return PlayerPhase::InSession;
        }
        PlayerPhase::Unpaired
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn lobby_count(&self) -> usize {
        self.lobbies.len()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    fn fresh_session_id(&self) -> SessionId {
        loop {
            let id = SessionId(random_key());
            if !self.sessions.contains_key(&id) {
                return id;
            }
        }
    }

    fn fresh_lobby_id(&self) -> LobbyId {
        loop {
            let id = LobbyId(random_key());
            if !self.lobbies.contains_key(&id) {
                return id;
            }
        }
    }
}

/// Six lowercase hex characters. Short enough to read out to a friend;
/// collisions are retried away against the live key set.
fn random_key() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 3] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
