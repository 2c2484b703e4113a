//! 服务器主逻辑

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use abalone_protocol::{
    ClientMessage, ErrorCode, Move, MoveError, MoveOutcome, PlayerId, RoomId, ServerMessage,
    MAX_GAME_ID_LEN,
};

use crate::config::ServerConfig;
use crate::room::{RoomManager, RoomState};

/// 服务器状态
pub struct ServerState {
    pub config: ServerConfig,
    pub rooms: RoomManager,
    /// 玩家 ID -> 消息发送通道
    pub connections: HashMap<PlayerId, mpsc::Sender<ServerMessage>>,
    /// ID 生成器
    next_player_id: AtomicU64,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            rooms: RoomManager::new(),
            connections: HashMap::new(),
            next_player_id: AtomicU64::new(1),
        }
    }

    /// 登记新连接，返回玩家 ID 和该玩家的消息接收端
    pub fn connect(&mut self) -> (PlayerId, mpsc::Receiver<ServerMessage>) {
        let player_id = self.next_player_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        self.connections.insert(player_id, tx);
        debug!(player_id, "玩家连接");
        (player_id, rx)
    }

    /// 发送消息给玩家
    ///
    /// 不等待：通道已满（对方不读取）或已关闭时丢弃该消息，返回 false。
    pub fn send_to_player(&self, player_id: PlayerId, msg: ServerMessage) -> bool {
        let Some(tx) = self.connections.get(&player_id) else {
            return false;
        };
        match tx.try_send(msg) {
            Ok(()) => true,
            Err(TrySendError::Full(msg)) => {
                warn!(player_id, ?msg, "消息通道已满，丢弃消息");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(player_id, "消息通道已关闭");
                false
            }
        }
    }

    /// 广播消息给房间内所有玩家
    pub fn broadcast_to_room(&self, room_id: RoomId, msg: ServerMessage) {
        if let Some(room) = self.rooms.get(room_id) {
            for player_id in room.players() {
                self.send_to_player(player_id, msg.clone());
            }
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// 待发送的消息
///
/// 处理过程中只修改状态，结束后统一发送。
struct PendingMessages {
    messages: Vec<(PlayerId, ServerMessage)>,
    broadcasts: Vec<(RoomId, ServerMessage)>,
}

impl PendingMessages {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            broadcasts: Vec::new(),
        }
    }

    fn send(&mut self, player_id: PlayerId, msg: ServerMessage) {
        self.messages.push((player_id, msg));
    }

    fn broadcast(&mut self, room_id: RoomId, msg: ServerMessage) {
        self.broadcasts.push((room_id, msg));
    }

    fn flush(self, state: &ServerState) {
        for (player_id, msg) in self.messages {
            state.send_to_player(player_id, msg);
        }
        for (room_id, msg) in self.broadcasts {
            state.broadcast_to_room(room_id, msg);
        }
    }
}

fn error(code: ErrorCode, message: &str) -> Option<ServerMessage> {
    Some(ServerMessage::Error {
        code,
        message: message.to_string(),
    })
}

/// 消息处理器
pub struct MessageHandler;

impl MessageHandler {
    /// 处理客户端消息，返回值为给发送者的直接回复
    pub async fn handle(
        state: &mut ServerState,
        player_id: PlayerId,
        msg: ClientMessage,
    ) -> Option<ServerMessage> {
        let mut pending = PendingMessages::new();

        let result = match msg {
            ClientMessage::JoinGame { game_id } => {
                Self::handle_join_game(state, &mut pending, player_id, game_id)
            }
            ClientMessage::LeaveGame => Self::handle_leave_game(state, &mut pending, player_id),
            ClientMessage::RequestMove { mv } => {
                Self::handle_request_move(state, &mut pending, player_id, mv)
            }
            ClientMessage::Ping => Some(ServerMessage::Pong),
        };

        // 发送待发送的消息
        pending.flush(state);

        result
    }

    /// 处理加入对局
    fn handle_join_game(
        state: &mut ServerState,
        pending: &mut PendingMessages,
        player_id: PlayerId,
        game_id: String,
    ) -> Option<ServerMessage> {
        let game_id = game_id.trim().to_string();
        if game_id.is_empty() || game_id.chars().count() > MAX_GAME_ID_LEN {
            return error(ErrorCode::InvalidGameId, "对局 ID 无效");
        }

        if state.rooms.find_player_room(player_id).is_some() {
            return error(ErrorCode::AlreadyInRoom, "已在房间中");
        }

        let room_id = match state.rooms.find_waiting(&game_id) {
            Some(room_id) => room_id,
            None if state.rooms.count() >= state.config.max_rooms => {
                warn!(player_id, %game_id, "房间数已达上限");
                return error(ErrorCode::ServerFull, "房间数已达上限");
            }
            None => state.rooms.create(game_id.clone()),
        };

        let room = state.rooms.get_mut(room_id)?;
        let color = room.add_player(player_id)?;
        info!(player_id, room_id, %game_id, %color, "玩家加入对局");

        pending.send(player_id, ServerMessage::Joined { game_id, color });

        // 双方到齐，推送初始棋盘
        if room.is_full() {
            pending.broadcast(
                room_id,
                ServerMessage::BoardUpdated {
                    board: room.session.current_board(),
                    next_turn: room.session.current_turn(),
                },
            );
        }

        None
    }

    /// 处理离开对局：对局对双方都结束
    fn handle_leave_game(
        state: &mut ServerState,
        pending: &mut PendingMessages,
        player_id: PlayerId,
    ) -> Option<ServerMessage> {
        let Some(room_id) = state.rooms.find_player_room(player_id) else {
            return error(ErrorCode::NotInRoom, "不在房间中");
        };

        Self::close_room(state, pending, room_id);
        info!(player_id, room_id, "玩家离开对局");
        None
    }

    /// 关闭房间并通知房间内所有玩家
    fn close_room(state: &mut ServerState, pending: &mut PendingMessages, room_id: RoomId) {
        if let Some(room) = state.rooms.remove(room_id) {
            debug!(room_id, elapsed = ?room.created_at.elapsed(), "房间关闭");
            for player_id in room.players() {
                pending.send(player_id, ServerMessage::LeftGame);
            }
        }
    }

    /// 处理走棋
    fn handle_request_move(
        state: &mut ServerState,
        pending: &mut PendingMessages,
        player_id: PlayerId,
        mv: Move,
    ) -> Option<ServerMessage> {
        let Some(room_id) = state.rooms.find_player_room(player_id) else {
            return error(ErrorCode::NotInRoom, "不在房间中");
        };
        let room = state.rooms.get_mut(room_id)?;

        match room.state {
            RoomState::Waiting => return error(ErrorCode::GameNotStarted, "游戏未开始"),
            RoomState::Finished => return error(ErrorCode::GameAlreadyOver, "游戏已结束"),
            RoomState::Playing => {}
        }

        if !room.is_players_turn(player_id) {
            debug!(player_id, room_id, %mv, "不是该玩家的回合");
            pending.send(
                player_id,
                ServerMessage::MoveRejected {
                    reason: MoveError::WrongTurn,
                },
            );
            return None;
        }

        match room.submit_move(player_id, &mv) {
            MoveOutcome::Accepted {
                board,
                next_turn,
                winner,
            } => {
                pending.broadcast(room_id, ServerMessage::BoardUpdated { board, next_turn });
                if let Some(winner) = winner {
                    info!(room_id, %winner, "对局结束");
                    pending.broadcast(room_id, ServerMessage::GameOver { winner });
                }
                None
            }
            MoveOutcome::Rejected(reason) => {
                debug!(player_id, room_id, %mv, %reason, "走法被拒绝");
                pending.send(player_id, ServerMessage::MoveRejected { reason });
                None
            }
            MoveOutcome::GameAlreadyOver => error(ErrorCode::GameAlreadyOver, "游戏已结束"),
        }
    }

    /// 处理玩家断线：按离开对局处理并移除连接
    pub async fn handle_disconnect(state: &mut ServerState, player_id: PlayerId) {
        let mut pending = PendingMessages::new();

        if let Some(room_id) = state.rooms.find_player_room(player_id) {
            info!(player_id, room_id, "玩家断线，结束对局");
            Self::close_room(state, &mut pending, room_id);
        }

        // 移除连接
        state.connections.remove(&player_id);

        // 发送待发送的消息
        pending.flush(state);
    }
}
