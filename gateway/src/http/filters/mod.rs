pub mod block_paths;
pub mod client_addrs;
