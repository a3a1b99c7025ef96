mod cli;
mod core;
mod processors;
pub mod server;
mod utils;

pub use cli::{Cli, Commands};
pub use crate::core::pipeline::{PipelineOutput, UploadPipeline};
pub use crate::core::{BatchOutcome, PixzipError, Result, ServiceConfig, SweepStats};
pub use processors::{Archiver, BatchResizer, Resizer, RetentionSweeper};
pub use utils::{allowed_file, get_file_extension, is_image_file, sanitize_filename};

pub mod prelude {
    pub use crate::{
        Archiver, BatchResizer, Resizer, RetentionSweeper,
        ServiceConfig, UploadPipeline
    };
}
