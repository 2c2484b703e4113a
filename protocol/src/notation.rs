//! 坐标与走法记法
//!
//! 坐标：行字母 + 斜线编号，如 `E5`、`a1`（不区分大小写）
//! 方向：`NE`、`E`、`SE`、`SW`、`W`、`NW`
//!
//! 走法：`<坐标> [<坐标> ...] <方向>`，如 `C3 C4 C5 NW`

use std::str::FromStr;

use crate::error::ParseError;
use crate::hex::{Coord, Direction};
use crate::marble::Color;
use crate::moves::Move;

impl FromStr for Coord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidCoord {
            text: s.to_string(),
        };

        let mut chars = s.trim().chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let digit = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() || !letter.is_ascii_uppercase() {
            return Err(invalid());
        }
        let number = digit.to_digit(10).filter(|&n| n >= 1).ok_or_else(invalid)?;

        let coord = Coord::new((letter as u8 - b'A') as i8, number as i8 - 1);
        if coord.is_on_board() {
            Ok(coord)
        } else {
            Err(ParseError::OffBoard {
                text: s.to_string(),
            })
        }
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Direction::ALL
            .into_iter()
            .find(|dir| dir.name() == upper)
            .ok_or_else(|| ParseError::InvalidDirection {
                text: s.to_string(),
            })
    }
}

/// 走法记法
pub struct Notation;

impl Notation {
    /// 解析走法文本，最后一个词为方向
    pub fn parse_move(color: Color, text: &str) -> Result<Move, ParseError> {
        let tokens: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        let (dir_token, coord_tokens) = match tokens.split_last() {
            Some((last, rest)) if !rest.is_empty() => (*last, rest),
            _ => {
                return Err(ParseError::IncompleteMove {
                    text: text.to_string(),
                })
            }
        };

        let direction = dir_token.parse()?;
        let marbles = coord_tokens
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<Coord>, _>>()?;

        Ok(Move::new(color, direction, marbles))
    }

    /// 生成走法文本（不含颜色），可被 [`Notation::parse_move`] 解析
    pub fn format_move(mv: &Move) -> String {
        let mut parts: Vec<String> = mv.marbles().iter().map(|c| c.to_string()).collect();
        parts.push(mv.direction().to_string());
        parts.join(" ")
    }
}
