pub mod client;
pub mod sink;

pub use client::post_message;
pub use sink::{ReportSink, SlackSink, StdoutSink};
