//! 对局状态：权威棋盘、走子方与胜负
//!
//! 本地对战和联网对战都通过 [`GameSession::accept`] 走棋，规则只在 [`Engine`] 中实现一次。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::constants::ELIMINATION_THRESHOLD;
use crate::error::MoveError;
use crate::marble::Color;
use crate::moves::{Engine, Move};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    InProgress,
    /// 已分胜负（终态）
    Won(Color),
}

/// 提交走法的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// 走法已生效
    Accepted {
        board: Board,
        /// 下一步的走子方，分出胜负后为 None
        next_turn: Option<Color>,
        winner: Option<Color>,
    },
    /// 走法被拒绝，状态不变
    Rejected(MoveError),
    /// 对局已结束
    GameAlreadyOver,
}

/// 对局
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    turn: Color,
    status: GameStatus,
    moves_played: u32,
}

impl GameSession {
    /// 标准开局，黑方先走
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::Black)
    }

    /// 从指定局面开始
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut session = Self {
            board,
            turn,
            status: GameStatus::InProgress,
            moves_played: 0,
        };
        session.status = session.evaluate_status();
        session
    }

    /// 提交走法
    pub fn accept(&mut self, mv: &Move) -> MoveOutcome {
        if self.is_over() {
            return MoveOutcome::GameAlreadyOver;
        }

        let board = match Engine::apply(&self.board, self.turn, mv) {
            Ok(board) => board,
            Err(reason) => {
                debug!(%mv, %reason, "走法被拒绝");
                return MoveOutcome::Rejected(reason);
            }
        };

        self.board = board;
        self.turn = self.turn.opponent();
        self.moves_played += 1;
        self.status = self.evaluate_status();
        debug!(%mv, moves = self.moves_played, "走法已生效");

        if let GameStatus::Won(winner) = self.status {
            info!(%winner, moves = self.moves_played, "对局结束");
        }

        MoveOutcome::Accepted {
            board: self.board.snapshot(),
            next_turn: self.current_turn(),
            winner: self.winner(),
        }
    }

    /// 任一方剩余弹珠降到阈值即判对方胜
    fn evaluate_status(&self) -> GameStatus {
        if self.board.count(Color::Black) <= ELIMINATION_THRESHOLD {
            GameStatus::Won(Color::White)
        } else if self.board.count(Color::White) <= ELIMINATION_THRESHOLD {
            GameStatus::Won(Color::Black)
        } else {
            GameStatus::InProgress
        }
    }

    /// 当前棋盘快照
    pub fn current_board(&self) -> Board {
        self.board.snapshot()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方，对局结束后为 None
    pub fn current_turn(&self) -> Option<Color> {
        match self.status {
            GameStatus::InProgress => Some(self.turn),
            GameStatus::Won(_) => None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Won(color) => Some(color),
            GameStatus::InProgress => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Won(_))
    }

    /// 已生效的走法数
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{Coord, Direction};
    use crate::layout::Layout;
    use crate::marble::Occupant;

    fn at(text: &str) -> Coord {
        text.parse().unwrap()
    }

    fn mv(color: Color, dir: Direction, marbles: &[&str]) -> Move {
        Move::new(color, dir, marbles.iter().map(|t| at(t)).collect::<Vec<_>>())
    }

    /// 黑方 13 颗（I、H 两行 + E7、E8），白方 9 颗（E9 + A 行 + B1-B3）
    fn black_about_to_win() -> Board {
        let mut board = Board::empty();
        for c in ["I5", "I6", "I7", "I8", "I9", "H4", "H5", "H6", "H7", "H8", "H9", "E7", "E8"] {
            board.set(at(c), Occupant::Marble(Color::Black));
        }
        for c in ["E9", "A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3"] {
            board.set(at(c), Occupant::Marble(Color::White));
        }
        board
    }

    /// 交换颜色
    fn swap_colors(board: &Board) -> Board {
        let mut swapped = Board::empty();
        for c in Coord::all() {
            if let Some(Occupant::Marble(color)) = board.get(c) {
                swapped.set(c, Occupant::Marble(color.opponent()));
            }
        }
        swapped
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new();

        assert_eq!(session.current_turn(), Some(Color::Black));
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_board(), Board::initial());
        assert_eq!(session.moves_played(), 0);
    }

    #[test]
    fn test_accept_flips_turn() {
        let mut session = GameSession::new();

        let outcome = session.accept(&mv(Color::Black, Direction::NW, &["C3"]));
        match outcome {
            MoveOutcome::Accepted { board, next_turn, winner } => {
                assert_eq!(board.get(at("D3")), Some(Occupant::Marble(Color::Black)));
                assert_eq!(next_turn, Some(Color::White));
                assert_eq!(winner, None);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(session.current_turn(), Some(Color::White));
        assert_eq!(session.moves_played(), 1);

        let outcome = session.accept(&mv(Color::White, Direction::SE, &["G5"]));
        assert!(matches!(outcome, MoveOutcome::Accepted { next_turn: Some(Color::Black), .. }));
    }

    #[test]
    fn test_rejection_leaves_state() {
        let mut session = GameSession::new();
        let before = session.current_board();

        let outcome = session.accept(&mv(Color::White, Direction::SE, &["G5"]));
        assert_eq!(outcome, MoveOutcome::Rejected(MoveError::WrongTurn));

        let outcome = session.accept(&mv(Color::Black, Direction::SE, &["A1"]));
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected(MoveError::DestinationOffBoard { .. })
        ));

        assert_eq!(session.current_board(), before);
        assert_eq!(session.current_turn(), Some(Color::Black));
        assert_eq!(session.moves_played(), 0);
    }

    #[test]
    fn test_black_wins() {
        let mut session = GameSession::from_board(black_about_to_win(), Color::Black);
        assert_eq!(session.status(), GameStatus::InProgress);

        let outcome = session.accept(&mv(Color::Black, Direction::E, &["E7", "E8"]));
        assert!(matches!(
            outcome,
            MoveOutcome::Accepted { next_turn: None, winner: Some(Color::Black), .. }
        ));
        assert_eq!(session.board().count(Color::White), ELIMINATION_THRESHOLD);
        assert_eq!(session.status(), GameStatus::Won(Color::Black));
        assert_eq!(session.current_turn(), None);
    }

    #[test]
    fn test_white_wins() {
        let board = swap_colors(&black_about_to_win());
        let mut session = GameSession::from_board(board, Color::White);

        let outcome = session.accept(&mv(Color::White, Direction::E, &["E7", "E8"]));
        assert!(matches!(
            outcome,
            MoveOutcome::Accepted { winner: Some(Color::White), .. }
        ));
        assert_eq!(session.board().count(Color::Black), ELIMINATION_THRESHOLD);
        assert_eq!(session.winner(), Some(Color::White));
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut session = GameSession::from_board(black_about_to_win(), Color::Black);
        session.accept(&mv(Color::Black, Direction::E, &["E7", "E8"]));
        assert!(session.is_over());

        let board = session.current_board();
        for color in [Color::White, Color::Black] {
            let outcome = session.accept(&mv(color, Direction::NE, &["A1"]));
            assert_eq!(outcome, MoveOutcome::GameAlreadyOver);
        }
        assert_eq!(session.current_board(), board);
        assert_eq!(session.moves_played(), 1);
    }

    #[test]
    fn test_push_without_win() {
        // 白方 14 颗，推出一颗后仍有 13 颗
        let mut board = Layout::parse("wwwww/wwwwww/2www2/8/9/8/2bbb2/bbbbbb/bbbbb").unwrap();
        board.set(at("G7"), Occupant::Empty);
        board.set(at("E9"), Occupant::Marble(Color::White));
        board.set(at("E7"), Occupant::Marble(Color::Black));
        board.set(at("E8"), Occupant::Marble(Color::Black));

        let mut session = GameSession::from_board(board, Color::Black);
        let outcome = session.accept(&mv(Color::Black, Direction::E, &["E7", "E8"]));

        assert!(matches!(
            outcome,
            MoveOutcome::Accepted { next_turn: Some(Color::White), winner: None, .. }
        ));
        assert_eq!(session.board().count(Color::White), 13);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_example_scenario() {
        // 黑方三颗直线推进白方两颗，白方后面是空格
        let mut board = Board::initial();
        for c in ["E2", "E3", "E4"] {
            board.set(at(c), Occupant::Marble(Color::Black));
        }
        for c in ["E5", "E6"] {
            board.set(at(c), Occupant::Marble(Color::White));
        }

        let mut session = GameSession::from_board(board, Color::Black);
        let outcome = session.accept(&mv(Color::Black, Direction::E, &["E2", "E3", "E4"]));
        assert!(matches!(outcome, MoveOutcome::Accepted { .. }));

        let board = session.board();
        assert_eq!(board.get(at("E2")), Some(Occupant::Empty));
        assert_eq!(board.get(at("E5")), Some(Occupant::Marble(Color::Black)));
        assert_eq!(board.get(at("E6")), Some(Occupant::Marble(Color::White)));
        assert_eq!(board.get(at("E7")), Some(Occupant::Marble(Color::White)));
        assert_eq!(session.current_turn(), Some(Color::White));
    }
}
