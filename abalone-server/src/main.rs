//! 本地双人对战（热座模式）
//!
//! 双方在同一终端轮流输入走法，如 `C3 C4 C5 NW`；输入 `quit` 退出。
//! 配置中的 `start_layout` 可指定起始布局。

use abalone_protocol::{Color, GameSession, Layout, MoveOutcome, Notation};
use abalone_server::ServerConfig;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;

    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .init();

    info!("Abalone 本地对战启动");

    let mut session = GameSession::from_board(config.start_board()?, Color::Black);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", session.board());
    while let Some(turn) = session.current_turn() {
        println!("{} 走棋:", turn);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            break;
        }

        let mv = match Notation::parse_move(turn, line) {
            Ok(mv) => mv,
            Err(e) => {
                println!("无法解析: {}", e);
                continue;
            }
        };

        match session.accept(&mv) {
            MoveOutcome::Accepted { board, winner, .. } => {
                info!(%mv, "走法已生效");
                print!("{}", board);
                println!("布局: {}", Layout::to_string(&board));
                if let Some(winner) = winner {
                    println!("{} 获胜", winner);
                }
            }
            MoveOutcome::Rejected(reason) => println!("走法无效: {}", reason),
            MoveOutcome::GameAlreadyOver => break,
        }
    }

    info!(moves = session.moves_played(), "对局结束");
    Ok(())
}
