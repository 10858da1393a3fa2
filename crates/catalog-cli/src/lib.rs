//! Library side of the `catalog` binary: logging setup and job files.

pub mod job;
pub mod logging;
