pub mod handler;
pub mod worker;

pub use handler::{JobHandler, LoggingJobHandler};
pub use worker::JobWorker;
