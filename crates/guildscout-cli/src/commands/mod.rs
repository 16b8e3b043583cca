pub mod blacklist;
pub mod config;
pub mod run;
pub mod send;
pub mod snapshot;
