pub mod config;
pub mod credentials;
pub mod github;
pub mod notify;
pub mod output;
pub mod slack;
pub mod stall;
