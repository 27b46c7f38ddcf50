// Filesystem adapter - Opens mapping files for the parser

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::ports::TextSourcePort;

/// Reads mapping files from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTextSource;

impl FsTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSourcePort for FsTextSource {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        let file = File::open(path)?;

        // Opening a directory succeeds on some platforms; reading it does not.
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        debug!("Opened mapping file {} ({} bytes)", path.display(), metadata.len());
        Ok(Box::new(BufReader::new(file)))
    }
}
