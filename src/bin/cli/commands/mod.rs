pub mod config;
pub mod import;
pub mod lookup;
pub mod read;
pub mod review;
pub mod save;
pub mod saved;
pub mod stats;
