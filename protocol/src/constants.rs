//! 规则常量定义

/// 棋盘行数（A-I）
pub const BOARD_ROWS: usize = 9;

/// 六边形棋盘半径（中心到边缘的步数）
pub const BOARD_RADIUS: i8 = 4;

/// 棋盘格子总数
pub const CELL_COUNT: usize = 61;

/// 每回合最多移动的弹珠数
pub const MAX_MARBLES: usize = 3;

/// 每方初始弹珠数（标准开局）
pub const STARTING_MARBLES: usize = 14;

/// 被推出多少颗即判负
pub const MARBLES_TO_LOSE: usize = 6;

/// 淘汰阈值：剩余弹珠数降到该值即判负
pub const ELIMINATION_THRESHOLD: usize = STARTING_MARBLES - MARBLES_TO_LOSE;

/// 对局 ID 最大长度
pub const MAX_GAME_ID_LEN: usize = 32;
