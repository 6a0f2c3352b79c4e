//! Platform abstraction layer
//!
//! The simulation never touches real time, timers or keyboards directly:
//! - Time: monotonic millisecond clocks
//! - Scheduling: "call me on the next frame" requests
//! - Input: raw key codes mapped to logical keys

pub mod input;
pub mod scheduler;
pub mod time;

pub use input::{KeyCode, KeyEvent, update_key_state};
pub use scheduler::{FrameQueue, Scheduler};
pub use time::{Clock, ManualClock, SystemClock};
