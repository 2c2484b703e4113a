//! 弹珠颜色与格子占用

use serde::{Deserialize, Serialize};

/// 阵营颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 黑方（先手，在下方 A-C 行）
    Black,
    /// 白方（后手，在上方 G-I 行）
    White,
}

impl Color {
    /// 获取对方颜色
    pub fn opponent(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// 获取布局字符
    pub fn to_layout_char(&self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }

    /// 从布局字符解析
    pub fn from_layout_char(c: char) -> Option<Color> {
        match c {
            'b' | 'B' => Some(Color::Black),
            'w' | 'W' => Some(Color::White),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// 格子占用状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Occupant {
    /// 空格
    #[default]
    Empty,
    /// 某一方的弹珠
    Marble(Color),
}

impl Occupant {
    /// 获取弹珠颜色（空格返回 None）
    pub fn color(&self) -> Option<Color> {
        match self {
            Occupant::Empty => None,
            Occupant::Marble(color) => Some(*color),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// 是否为指定颜色的弹珠
    pub fn is(&self, color: Color) -> bool {
        self.color() == Some(color)
    }
}

impl From<Color> for Occupant {
    fn from(color: Color) -> Self {
        Occupant::Marble(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
    }

    #[test]
    fn test_layout_char() {
        assert_eq!(Color::Black.to_layout_char(), 'b');
        assert_eq!(Color::from_layout_char('W'), Some(Color::White));
        assert_eq!(Color::from_layout_char('x'), None);
    }

    #[test]
    fn test_occupant() {
        assert!(Occupant::Empty.is_empty());
        assert_eq!(Occupant::Empty.color(), None);

        let black = Occupant::from(Color::Black);
        assert!(black.is(Color::Black));
        assert!(!black.is(Color::White));
        assert!(!black.is_empty());
    }
}
