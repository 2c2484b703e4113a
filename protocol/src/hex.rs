//! 六边形棋盘几何
//!
//! 坐标采用 Abalone 标准记法：行 A-I 自下而上（row 0-8），
//! 斜线 1-9（col 0-8）。当且仅当 `|row - col| <= 4` 时格子在棋盘上。
//!
//! ```text
//!         I5 . . . I9
//!        H4 . . . . H9
//!       ...
//!   E1 . . . E5 . . . E9
//!       ...
//!        B1 . . . . B6
//!         A1 . . . A5
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_RADIUS, BOARD_ROWS};

/// 棋盘坐标
///
/// 分量为有符号数，边缘格子的邻居（棋盘外）也可以表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// 行（A=0 ... I=8）
    pub row: i8,
    /// 斜线（1=0 ... 9=8）
    pub col: i8,
}

impl Coord {
    /// 创建坐标（不检查是否在棋盘上）
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// 检查坐标是否在六边形棋盘内
    pub fn is_on_board(&self) -> bool {
        let size = BOARD_ROWS as i8;
        (0..size).contains(&self.row)
            && (0..size).contains(&self.col)
            && (self.row - self.col).abs() <= BOARD_RADIUS
    }

    /// 获取指定方向上的相邻坐标（可能在棋盘外）
    pub fn neighbor(&self, dir: Direction) -> Coord {
        let (dr, dc) = dir.offset();
        Coord::new(self.row + dr, self.col + dc)
    }

    /// 转换为数组索引（棋盘外返回 None）
    pub fn to_index(&self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.row as usize * BOARD_ROWS + self.col as usize)
        } else {
            None
        }
    }

    /// 某一行在棋盘上的斜线范围
    pub fn cols_in_row(row: i8) -> std::ops::RangeInclusive<i8> {
        let last = BOARD_ROWS as i8 - 1;
        (row - BOARD_RADIUS).max(0)..=(row + BOARD_RADIUS).min(last)
    }

    /// 按行遍历棋盘上的全部 61 个格子（A1, A2, ..., I9）
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_ROWS as i8)
            .flat_map(|row| Self::cols_in_row(row).map(move |col| Coord::new(row, col)))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_on_board() {
            let letter = (b'A' + self.row as u8) as char;
            write!(f, "{}{}", letter, self.col + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// 移动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NE,
    E,
    SE,
    SW,
    W,
    NW,
}

impl Direction {
    /// 全部六个方向（顺时针）
    pub const ALL: [Direction; 6] = [
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// 坐标偏移 (行, 斜线)
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::NE => (1, 1),
            Direction::E => (0, 1),
            Direction::SE => (-1, 0),
            Direction::SW => (-1, -1),
            Direction::W => (0, -1),
            Direction::NW => (1, 0),
        }
    }

    /// 反方向
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    /// 侧移时弹珠队列可以排列的两条轴（即另外两条轴线）
    pub fn broadside_axes(&self) -> (Direction, Direction) {
        match self {
            Direction::NW | Direction::SE => (Direction::NE, Direction::W),
            Direction::NE | Direction::SW => (Direction::NW, Direction::W),
            Direction::E | Direction::W => (Direction::NE, Direction::NW),
        }
    }

    /// 方向名称
    pub fn name(&self) -> &'static str {
        match self {
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
