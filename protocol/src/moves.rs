//! 走法校验与执行

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::Board;
use crate::constants::MAX_MARBLES;
use crate::error::MoveError;
use crate::hex::{Coord, Direction};
use crate::marble::{Color, Occupant};
use crate::notation::Notation;

/// 走法
///
/// 构造时不做任何校验，合法性全部由 [`Engine::apply`] 判断。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    color: Color,
    direction: Direction,
    marbles: Vec<Coord>,
}

impl Move {
    /// 创建新走法
    pub fn new(color: Color, direction: Direction, marbles: impl Into<Vec<Coord>>) -> Self {
        Self {
            color,
            direction,
            marbles: marbles.into(),
        }
    }

    /// 行棋方
    pub fn color(&self) -> Color {
        self.color
    }

    /// 移动方向
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 被移动的弹珠
    pub fn marbles(&self) -> &[Coord] {
        &self.marbles
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, Notation::format_move(self))
    }
}

/// 走法类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// 沿队列方向推进，可以推动对方弹珠
    Inline,
    /// 整列侧移，目标格必须全空
    Broadside,
}

/// 规则引擎
///
/// 无状态：每次调用接收一个棋盘，返回一个新棋盘。
pub struct Engine;

impl Engine {
    /// 校验并执行走法
    ///
    /// 不修改输入棋盘；所有改动都在副本上进行，任何拒绝都直接丢弃副本。
    pub fn apply(board: &Board, turn: Color, mv: &Move) -> Result<Board, MoveError> {
        if mv.color() != turn {
            return Err(MoveError::WrongTurn);
        }

        let marbles = mv.marbles();
        if marbles.is_empty() || marbles.len() > MAX_MARBLES {
            return Err(MoveError::BadMarbleCount {
                count: marbles.len(),
            });
        }

        for (i, &at) in marbles.iter().enumerate() {
            if marbles[..i].contains(&at) || board.get(at) != Some(Occupant::Marble(mv.color())) {
                return Err(MoveError::InvalidSource { at });
            }
        }

        let kind = Self::classify(mv)?;
        trace!(%mv, ?kind, "走法分类");

        let mut next = board.snapshot();
        match kind {
            MoveKind::Inline => Self::push_inline(&mut next, mv)?,
            MoveKind::Broadside => Self::slide_broadside(&mut next, mv)?,
        }
        Ok(next)
    }

    /// 判断走法是直线推进还是侧移
    pub fn classify(mv: &Move) -> Result<MoveKind, MoveError> {
        let marbles = mv.marbles();
        let dir = mv.direction();

        if marbles.len() == 1 || Self::are_inline(marbles, dir) {
            return Ok(MoveKind::Inline);
        }

        let (axis_a, axis_b) = dir.broadside_axes();
        if Self::are_inline(marbles, axis_a) || Self::are_inline(marbles, axis_b) {
            Ok(MoveKind::Broadside)
        } else {
            Err(MoveError::NotAValidFormation)
        }
    }

    /// 每颗弹珠沿 `dir` 的前方或后方邻居都在集合中
    ///
    /// 对 `dir` 与其反方向结果相同。
    pub fn are_inline(marbles: &[Coord], dir: Direction) -> bool {
        marbles.iter().all(|m| {
            marbles.contains(&m.neighbor(dir)) || marbles.contains(&m.neighbor(dir.opposite()))
        })
    }

    /// 找出队首和队尾
    ///
    /// 队首：前方邻居不在集合中的唯一弹珠；队尾：后方邻居不在集合中的唯一弹珠。
    pub(crate) fn train_ends(marbles: &[Coord], dir: Direction) -> Option<(Coord, Coord)> {
        let unique = |step: Direction| {
            let mut ends = marbles.iter().filter(|m| !marbles.contains(&m.neighbor(step)));
            match (ends.next(), ends.next()) {
                (Some(&end), None) => Some(end),
                _ => None,
            }
        };
        Some((unique(dir)?, unique(dir.opposite())?))
    }

    /// 直线推进
    fn push_inline(board: &mut Board, mv: &Move) -> Result<(), MoveError> {
        let dir = mv.direction();
        let own = mv.color();
        let opponent = own.opponent();
        let (head, tail) = Self::train_ends(mv.marbles(), dir).ok_or(MoveError::NoHeadFound)?;

        // 只能推动比己方队列短的对方队列
        let budget = mv.marbles().len() - 1;
        let mut pushed = 0;
        let mut cursor = head.neighbor(dir);
        while pushed < budget {
            match board.get(cursor) {
                None | Some(Occupant::Empty) => break,
                Some(Occupant::Marble(color)) if color == opponent => {
                    pushed += 1;
                    cursor = cursor.neighbor(dir);
                }
                Some(Occupant::Marble(_)) => return Err(MoveError::BlockedByOwnColor),
            }
        }

        match board.get(cursor) {
            None if pushed == 0 => {
                return Err(MoveError::DestinationOffBoard { at: cursor });
            }
            None => {
                trace!(%cursor, %opponent, "弹珠被推出棋盘");
            }
            Some(Occupant::Empty) => {
                if pushed > 0 {
                    board.set(cursor, Occupant::Marble(opponent));
                }
            }
            // 推动次数用完后前方仍是对方弹珠
            Some(Occupant::Marble(color)) if pushed > 0 && color == opponent => {
                return Err(MoveError::PushOverloaded);
            }
            Some(Occupant::Marble(color)) => {
                trace!(%cursor, %color, "目标格已被占用");
                return Err(MoveError::DestinationOccupied);
            }
        }

        board.set(tail, Occupant::Empty);
        board.set(head.neighbor(dir), Occupant::Marble(own));
        Ok(())
    }

    /// 侧移：先检查全部目标格，再统一写入
    fn slide_broadside(board: &mut Board, mv: &Move) -> Result<(), MoveError> {
        let dir = mv.direction();

        for marble in mv.marbles() {
            let dest = marble.neighbor(dir);
            match board.get(dest) {
                Some(Occupant::Empty) => {}
                Some(Occupant::Marble(_)) => return Err(MoveError::DestinationOccupied),
                None => return Err(MoveError::DestinationOffBoard { at: dest }),
            }
        }

        for &marble in mv.marbles() {
            board.set(marble, Occupant::Empty);
        }
        for marble in mv.marbles() {
            board.set(marble.neighbor(dir), Occupant::Marble(mv.color()));
        }
        Ok(())
    }
}
