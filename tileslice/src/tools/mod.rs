pub mod check_config;
pub mod extract;
pub mod inspect;
pub mod regions;
pub mod sources;
pub mod stats;
