pub mod cli;
pub mod run;
pub mod run_harvest;
pub mod run_sector;
pub mod show_stats;
