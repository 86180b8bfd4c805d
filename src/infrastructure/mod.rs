pub mod candidates;
pub mod config;
pub mod git;
pub mod remote;
