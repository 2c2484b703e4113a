//! 房间系统

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use abalone_protocol::{Color, GameSession, Move, MoveError, MoveOutcome, PlayerId, RoomId};

/// 房间状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    /// 等待第二名玩家
    Waiting,
    /// 游戏进行中
    Playing,
    /// 游戏结束
    Finished,
}

/// 房间
pub struct Room {
    pub id: RoomId,
    /// 玩家加入时使用的对局名
    pub game_id: String,
    pub state: RoomState,
    /// 黑方玩家 ID（先加入者）
    pub black_player: Option<PlayerId>,
    /// 白方玩家 ID
    pub white_player: Option<PlayerId>,
    /// 对局
    pub session: GameSession,
    /// 创建时间
    pub created_at: Instant,
}

impl Room {
    /// 创建新房间
    pub fn new(id: RoomId, game_id: String) -> Self {
        Self {
            id,
            game_id,
            state: RoomState::Waiting,
            black_player: None,
            white_player: None,
            session: GameSession::new(),
            created_at: Instant::now(),
        }
    }

    /// 检查房间是否已满
    pub fn is_full(&self) -> bool {
        self.black_player.is_some() && self.white_player.is_some()
    }

    /// 检查玩家是否在房间中
    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.black_player == Some(player_id) || self.white_player == Some(player_id)
    }

    /// 获取玩家的颜色
    pub fn player_color(&self, player_id: PlayerId) -> Option<Color> {
        if self.black_player == Some(player_id) {
            Some(Color::Black)
        } else if self.white_player == Some(player_id) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// 是否轮到该玩家走棋
    pub fn is_players_turn(&self, player_id: PlayerId) -> bool {
        self.state == RoomState::Playing
            && self.player_color(player_id).is_some()
            && self.player_color(player_id) == self.session.current_turn()
    }

    /// 房间内所有玩家
    pub fn players(&self) -> Vec<PlayerId> {
        self.black_player.into_iter().chain(self.white_player).collect()
    }

    /// 添加玩家：先到者执黑，后到者执白；满员后开始对局
    pub fn add_player(&mut self, player_id: PlayerId) -> Option<Color> {
        let color = if self.black_player.is_none() {
            self.black_player = Some(player_id);
            Color::Black
        } else if self.white_player.is_none() {
            self.white_player = Some(player_id);
            Color::White
        } else {
            return None; // 房间已满
        };

        if self.is_full() {
            self.state = RoomState::Playing;
        }
        Some(color)
    }

    /// 移除玩家
    pub fn remove_player(&mut self, player_id: PlayerId) -> Option<Color> {
        let color = self.player_color(player_id)?;
        match color {
            Color::Black => self.black_player = None,
            Color::White => self.white_player = None,
        }
        Some(color)
    }

    /// 执行走棋
    ///
    /// 玩家只能移动自己颜色的弹珠，冒用对方颜色按“不是你的回合”拒绝。
    pub fn submit_move(&mut self, player_id: PlayerId, mv: &Move) -> MoveOutcome {
        if self.player_color(player_id) != Some(mv.color()) {
            return MoveOutcome::Rejected(MoveError::WrongTurn);
        }

        let outcome = self.session.accept(mv);
        if self.session.is_over() {
            self.state = RoomState::Finished;
        }
        outcome
    }
}

/// 房间管理器
pub struct RoomManager {
    rooms: HashMap<RoomId, Room>,
    next_id: AtomicU64,
}

impl RoomManager {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// 生成新的房间 ID
    fn generate_id(&self) -> RoomId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 创建房间
    pub fn create(&mut self, game_id: String) -> RoomId {
        let id = self.generate_id();
        self.rooms.insert(id, Room::new(id, game_id));
        id
    }

    /// 查找指定对局名下等待中的房间
    pub fn find_waiting(&self, game_id: &str) -> Option<RoomId> {
        self.rooms
            .values()
            .filter(|r| r.state == RoomState::Waiting && r.game_id == game_id)
            .min_by_key(|r| r.id)
            .map(|r| r.id)
    }

    /// 获取房间
    pub fn get(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    /// 获取房间（可变）
    pub fn get_mut(&mut self, room_id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&room_id)
    }

    /// 移除房间
    pub fn remove(&mut self, room_id: RoomId) -> Option<Room> {
        self.rooms.remove(&room_id)
    }

    /// 查找玩家所在的房间
    pub fn find_player_room(&self, player_id: PlayerId) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|r| r.has_player(player_id))
            .map(|r| r.id)
    }

    /// 获取房间数量
    pub fn count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
