use std::fs::{self, File};
use std::io;
use std::path::Path;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Routes `log` records to `path`; the terminal itself is busy drawing the game.
///
/// Creates parent directories as needed. A second call fails because the
/// global logger is already set.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, File::create(path)?)
        .map_err(|error| io::Error::new(io::ErrorKind::AlreadyExists, error))
}
