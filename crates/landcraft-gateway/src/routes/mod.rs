pub mod db;
pub mod job;
pub mod status;
