mod error;
mod frame;
mod handler;
mod heap;
mod kernel;

pub use error::TrapError;
pub use handler::{execute, HandleResult, Handler};
pub use heap::Heap;
