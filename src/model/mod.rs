//! ONNX Runtime session management.

mod loader;
mod session;

pub use loader::{init_runtime, load_session};
pub use session::{element_count, InferenceOutput, InferenceSession, ModelInfo};
