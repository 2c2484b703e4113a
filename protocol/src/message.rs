//! 消息类型定义
//!
//! 只定义边界上的数据结构，编码与传输由外部传输层负责。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::MoveError;
use crate::marble::Color;
use crate::moves::Move;

/// 玩家 ID
pub type PlayerId = u64;

/// 房间 ID
pub type RoomId = u64;

/// 客户端发送给服务端的消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientMessage {
    /// 加入对局，同一 game_id 的前两名玩家配对
    JoinGame { game_id: String },
    /// 离开对局
    LeaveGame,
    /// 走棋
    RequestMove { mv: Move },
    /// 心跳请求
    Ping,
}

/// 服务端发送给客户端的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// 加入成功，分配颜色
    Joined { game_id: String, color: Color },
    /// 棋盘更新（对局开始时和每步走棋后）
    BoardUpdated { board: Board, next_turn: Option<Color> },
    /// 走法被拒绝（只发给提交者）
    MoveRejected { reason: MoveError },
    /// 对局结束
    GameOver { winner: Color },
    /// 对局已被某一方结束
    LeftGame,
    /// 心跳响应
    Pong,
    /// 错误消息
    Error { code: ErrorCode, message: String },
}

/// 错误码定义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    // === 房间相关 (1xx) ===
    /// 不在房间中
    NotInRoom = 103,
    /// 已在房间中
    AlreadyInRoom = 104,
    /// 房间数已达上限
    ServerFull = 105,

    // === 游戏相关 (2xx) ===
    /// 游戏未开始
    GameNotStarted = 202,
    /// 游戏已结束
    GameAlreadyOver = 203,

    // === 玩家相关 (3xx) ===
    /// 无效的对局 ID
    InvalidGameId = 300,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{Coord, Direction};

    #[test]
    fn test_client_message_serialize() {
        let mv = Move::new(Color::Black, Direction::NW, vec![Coord::new(2, 2), Coord::new(2, 3)]);
        let msg = ClientMessage::RequestMove { mv: mv.clone() };
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: ClientMessage = bincode::deserialize(&bytes).unwrap();

        match decoded {
            ClientMessage::RequestMove { mv: decoded_mv } => assert_eq!(decoded_mv, mv),
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_server_message_serialize() {
        let msg = ServerMessage::BoardUpdated {
            board: Board::initial(),
            next_turn: Some(Color::White),
        };
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: ServerMessage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, msg);

        let msg = ServerMessage::MoveRejected {
            reason: MoveError::InvalidSource { at: Coord::new(0, 0) },
        };
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: ServerMessage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, msg);
    }
}
