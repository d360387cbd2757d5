mod engine;
mod mode;
mod ticker;

pub use engine::{secs_to_minutes, CountdownEngine, TimerState};
pub use mode::WorkMode;
pub use ticker::{TickFlow, Ticker};
