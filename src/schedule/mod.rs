//! Cooperative scheduling primitives driven by caller-supplied time.
//!
//! Nothing here spawns timers. The host event loop polls each primitive
//! with the current [`Instant`](web_time::Instant) and runs whatever is due,
//! which keeps the behaviour deterministic under test.

mod debounce;
mod frame;
mod task;
mod throttle;

pub use debounce::{Debounce, Debounced};
pub use frame::FrameScheduler;
pub use task::{ScheduledTask, TaskSlot, Timer};
pub use throttle::{Throttle, Throttled};
