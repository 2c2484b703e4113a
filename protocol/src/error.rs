//! 错误类型定义

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex::Coord;

/// 走法被拒绝的原因
///
/// 这些都是校验不可信输入的正常结果，调用方可以用修正后的走法重试。
///
/// 在八种基本原因之外只扩展了 [`MoveError::DestinationOffBoard`]：
/// 己方队列会离开棋盘、或侧移目标格在棋盘外。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    /// 不是该颜色的回合
    #[error("Not your turn")]
    WrongTurn,

    /// 弹珠数量不在 1..=3 之内
    #[error("Bad marble count: {count}")]
    BadMarbleCount { count: usize },

    /// 起点不在棋盘上、不是己方弹珠或重复
    #[error("Invalid source marble at {at}")]
    InvalidSource { at: Coord },

    /// 既不是直线推进也不是侧移
    #[error("Marbles do not form a valid line")]
    NotAValidFormation,

    /// 找不到队首或队尾
    #[error("No head marble found")]
    NoHeadFound,

    /// 推进路线被己方弹珠挡住
    #[error("Blocked by own marble")]
    BlockedByOwnColor,

    /// 对方弹珠太多，推不动
    #[error("Too many opposing marbles to push")]
    PushOverloaded,

    /// 目标格已被占用
    #[error("Destination occupied")]
    DestinationOccupied,

    /// 己方弹珠会被移出棋盘
    #[error("Destination off board: {at}")]
    DestinationOffBoard { at: Coord },
}

/// 文本解析错误（坐标、方向、走法、棋盘布局）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 无效的坐标
    #[error("Invalid coordinate: {text}")]
    InvalidCoord { text: String },

    /// 坐标不在棋盘上
    #[error("Coordinate off board: {text}")]
    OffBoard { text: String },

    /// 无效的方向
    #[error("Invalid direction: {text}")]
    InvalidDirection { text: String },

    /// 走法缺少弹珠或方向
    #[error("Incomplete move: {text}")]
    IncompleteMove { text: String },

    /// 无效的布局字符串
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },
}
