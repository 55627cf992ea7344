#![doc = include_str!("../README.md")]
pub mod memoized;
pub mod operation;
pub mod store;

pub use self::memoized::{Memoizable, Memoized};
pub use self::operation::Operation;
pub use self::store::memory::MemoryStore;
pub use self::store::Store;
