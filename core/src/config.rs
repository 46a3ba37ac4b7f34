pub mod block_paths;
pub mod serde;
