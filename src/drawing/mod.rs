mod session;
mod shape;

pub use session::{DrawingMode, DrawingSession, DrawingTool};
pub use shape::Shape;
