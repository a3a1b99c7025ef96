// pixzip/src/processors/mod.rs
mod archiver;
mod batch;
mod resizer;
mod sweeper;

pub use archiver::Archiver;
pub use batch::BatchResizer;
pub use resizer::Resizer;
pub use sweeper::RetentionSweeper;
