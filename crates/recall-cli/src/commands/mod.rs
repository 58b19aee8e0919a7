pub mod config;
pub mod edit;
pub mod files;
pub mod report;
pub mod reset;
pub mod review;
