// Adapters layer: concrete implementations for external systems (order sources, storage).

pub mod file;
pub mod http;
pub mod memory;
pub mod storage;

pub use file::JsonFileOrderSource;
pub use http::HttpOrderSource;
pub use memory::MemoryOrderSource;
pub use storage::LocalStorage;
