pub mod cluster;
pub mod extract;
pub mod sample;
