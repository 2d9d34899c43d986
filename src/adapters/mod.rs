// Adapters layer: concrete implementations for external systems.

pub mod export;
pub mod http;
pub mod storage;
