//! 棋盘布局字符串
//!
//! 类似 FEN：自上而下列出 I 到 A 共 9 行，以 `/` 分隔；每行按斜线编号从小到大，
//! `b` 为黑方，`w` 为白方，数字表示连续空格数。
//!
//! 标准开局：
//! `wwwww/wwwwww/2www2/8/9/8/2bbb2/bbbbbb/bbbbb`

use crate::board::Board;
use crate::constants::BOARD_ROWS;
use crate::error::ParseError;
use crate::hex::Coord;
use crate::marble::{Color, Occupant};

/// 标准开局布局
pub const INITIAL_LAYOUT: &str = "wwwww/wwwwww/2www2/8/9/8/2bbb2/bbbbbb/bbbbb";

/// 布局字符串处理
pub struct Layout;

impl Layout {
    /// 解析布局字符串
    pub fn parse(text: &str) -> Result<Board, ParseError> {
        let rows: Vec<&str> = text.trim().split('/').collect();
        if rows.len() != BOARD_ROWS {
            return Err(ParseError::InvalidLayout {
                reason: format!("Expected {} rows, got {}", BOARD_ROWS, rows.len()),
            });
        }

        let mut board = Board::empty();
        for (idx, row_text) in rows.iter().enumerate() {
            let row = (BOARD_ROWS - 1 - idx) as i8;
            let cols = Coord::cols_in_row(row);
            let width = cols.clone().count();
            let mut cells = cols.map(|col| Coord::new(row, col));
            let mut filled = 0;

            for c in row_text.chars() {
                if let Some(run) = c.to_digit(10) {
                    for _ in 0..run {
                        cells.next();
                    }
                    filled += run as usize;
                } else if let Some(color) = Color::from_layout_char(c) {
                    if let Some(cell) = cells.next() {
                        board.set(cell, Occupant::Marble(color));
                    }
                    filled += 1;
                } else {
                    return Err(ParseError::InvalidLayout {
                        reason: format!("Invalid character: {}", c),
                    });
                }
            }

            if filled != width {
                return Err(ParseError::InvalidLayout {
                    reason: format!("Row {} has {} cells, expected {}", row_text, filled, width),
                });
            }
        }

        Ok(board)
    }

    /// 生成布局字符串
    pub fn to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_ROWS);

        for row in (0..BOARD_ROWS as i8).rev() {
            let mut text = String::new();
            let mut empty = 0;

            for col in Coord::cols_in_row(row) {
                match board.get(Coord::new(row, col)) {
                    Some(Occupant::Marble(color)) => {
                        if empty > 0 {
                            text.push_str(&empty.to_string());
                            empty = 0;
                        }
                        text.push(color.to_layout_char());
                    }
                    _ => empty += 1,
                }
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            rows.push(text);
        }

        rows.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Layout::parse(INITIAL_LAYOUT).unwrap();
        assert_eq!(board, Board::initial());
        assert_eq!(Layout::to_string(&Board::initial()), INITIAL_LAYOUT);
    }

    #[test]
    fn test_empty_layout() {
        let board = Layout::parse("5/6/7/8/9/8/7/6/5").unwrap();
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_sparse_layout() {
        // E 行：E3 黑，E4 白
        let board = Layout::parse("5/6/7/8/2bw5/8/7/6/5").unwrap();
        assert_eq!(board.get(Coord::new(4, 2)), Some(Occupant::Marble(Color::Black)));
        assert_eq!(board.get(Coord::new(4, 3)), Some(Occupant::Marble(Color::White)));
        assert_eq!(board.count(Color::Black), 1);
        assert_eq!(Layout::to_string(&board), "5/6/7/8/2bw5/8/7/6/5");
    }

    #[test]
    fn test_invalid_layout() {
        assert!(Layout::parse("").is_err());
        assert!(Layout::parse("5/6/7/8/9/8/7/6").is_err());
        assert!(Layout::parse("5/6/7/8/9/8/7/6/6").is_err());
        assert!(Layout::parse("5/6/7/8/9/8/7/6/4").is_err());
        assert!(Layout::parse("5/6/7/8/9/8/7/6/x4").is_err());
    }
}
