//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_ROWS;
use crate::error::ParseError;
use crate::hex::{Coord, Direction};
use crate::marble::{Color, Occupant};

/// 棋盘
///
/// 9x9 存储，索引为 row * 9 + col；六边形之外的格子永远不会被访问。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardCells")]
pub struct Board {
    cells: Vec<Occupant>,
}

/// 反序列化的原始格子数据，校验长度后才转换为 [`Board`]
#[derive(Deserialize)]
struct BoardCells {
    cells: Vec<Occupant>,
}

impl TryFrom<BoardCells> for Board {
    type Error = ParseError;

    fn try_from(raw: BoardCells) -> Result<Self, Self::Error> {
        let expected = BOARD_ROWS * BOARD_ROWS;
        if raw.cells.len() != expected {
            return Err(ParseError::InvalidLayout {
                reason: format!("expected {} cells, got {}", expected, raw.cells.len()),
            });
        }
        Ok(Self { cells: raw.cells })
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: vec![Occupant::Empty; BOARD_ROWS * BOARD_ROWS],
        }
    }

    /// 创建标准开局棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        // 黑方：A、B 两行全满，C3-C5
        for row in 0..2 {
            for col in Coord::cols_in_row(row) {
                board.set(Coord::new(row, col), Occupant::Marble(Color::Black));
            }
        }
        for col in 2..=4 {
            board.set(Coord::new(2, col), Occupant::Marble(Color::Black));
        }

        // 白方：H、I 两行全满，G5-G7
        for row in 7..9 {
            for col in Coord::cols_in_row(row) {
                board.set(Coord::new(row, col), Occupant::Marble(Color::White));
            }
        }
        for col in 4..=6 {
            board.set(Coord::new(6, col), Occupant::Marble(Color::White));
        }

        board
    }

    /// 检查坐标是否在棋盘上
    pub fn on_board(&self, c: Coord) -> bool {
        c.is_on_board()
    }

    /// 获取格子状态，棋盘外返回 None
    pub fn get(&self, c: Coord) -> Option<Occupant> {
        c.to_index().map(|i| self.cells[i])
    }

    /// 设置格子状态（棋盘外的坐标被忽略）
    pub fn set(&mut self, c: Coord, occupant: Occupant) {
        if let Some(i) = c.to_index() {
            self.cells[i] = occupant;
        }
    }

    /// 相邻坐标，可能在棋盘外
    pub fn neighbor(&self, c: Coord, dir: Direction) -> Coord {
        c.neighbor(dir)
    }

    /// 统计指定颜色的弹珠数
    pub fn count(&self, color: Color) -> usize {
        Coord::all()
            .filter(|&c| self.get(c) == Some(Occupant::Marble(color)))
            .count()
    }

    /// 完整独立的副本
    pub fn snapshot(&self) -> Board {
        self.clone()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    /// 以六边形图示输出，I 行在上
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..BOARD_ROWS as i8).rev() {
            let indent = (row - 4).unsigned_abs() as usize;
            write!(f, "{}{} ", " ".repeat(indent), (b'A' + row as u8) as char)?;
            for col in Coord::cols_in_row(row) {
                let c = match self.get(Coord::new(row, col)) {
                    Some(Occupant::Marble(color)) => color.to_layout_char(),
                    _ => '.',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
