//! Runtime pieces shared by every command: clock, context, clone engine,
//! history, and the session that ties them together.

pub mod clock;
pub mod clone_engine;
pub mod context;
pub mod display;
pub mod history;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use clone_engine::CloneEngine;
pub use context::CommandContext;
pub use display::TransactionDisplay;
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use session::Session;
