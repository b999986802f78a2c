//! Draft persistence: key/value storage backends and the autosave bridge.

mod autosave;
mod storage;

pub use autosave::*;
pub use storage::*;
