//! Abalone 共享协议库
//!
//! 包含:
//! - 弹珠、坐标、方向、棋盘等核心数据结构
//! - 走法校验与执行（规则引擎）
//! - 对局状态与胜负判定
//! - 消息类型定义 (ClientMessage, ServerMessage)
//! - 坐标记法与棋盘布局字符串

mod board;
mod constants;
mod error;
mod hex;
mod layout;
mod marble;
mod message;
mod moves;
mod notation;
mod session;

pub use board::Board;
pub use constants::*;
pub use error::{MoveError, ParseError};
pub use hex::{Coord, Direction};
pub use layout::{Layout, INITIAL_LAYOUT};
pub use marble::{Color, Occupant};
pub use message::{ClientMessage, ErrorCode, PlayerId, RoomId, ServerMessage};
pub use moves::{Engine, Move, MoveKind};
pub use notation::Notation;
pub use session::{GameSession, GameStatus, MoveOutcome};
