//! Pacing - 调用节奏控制（冷却等待与请求限速）

mod fixed_delay_pacer;
mod request_throttle;

pub use fixed_delay_pacer::FixedDelayPacer;
pub use request_throttle::{RequestThrottle, ThrottledImageModel, ThrottledTextModel};
