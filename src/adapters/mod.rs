// Adapters layer: concrete implementations of the domain ports.

pub mod export;
pub mod growth;
pub mod source;
pub mod storage;
