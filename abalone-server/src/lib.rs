//! Abalone 服务端
//!
//! 包含:
//! - 房间系统（按对局名配对，先到者执黑）
//! - 消息处理与通知分发
//! - 配置加载

pub mod config;
pub mod room;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use room::{Room, RoomManager, RoomState};
pub use server::{MessageHandler, ServerState};
