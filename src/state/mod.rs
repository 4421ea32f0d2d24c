pub mod mapper;
pub mod session;

pub use session::{Effect, MeasureSession, Transition, handle_click};
