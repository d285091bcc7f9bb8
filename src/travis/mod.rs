mod client;
mod job;
mod links;
mod types;

pub use job::{BuildJob, JobOutcome};
