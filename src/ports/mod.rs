// Ports - Interface definitions (contracts)

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;

use crate::domain::model::ClipInfo;

/// Port for line-sequenced access to mapping files
pub trait TextSourcePort: Send + Sync {
    /// Open the file at `path` for line-by-line reading
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;
}

/// Handle to a clip owned by the hosting runtime.
///
/// Filters hold their clips for their whole lifetime and release them by
/// dropping them.
pub trait Clip {
    /// Properties of the clip
    fn info(&self) -> &ClipInfo;
}

impl Clip for ClipInfo {
    fn info(&self) -> &ClipInfo {
        self
    }
}

impl<C: Clip + ?Sized> Clip for Arc<C> {
    fn info(&self) -> &ClipInfo {
        (**self).info()
    }
}

impl<C: Clip + ?Sized> Clip for Box<C> {
    fn info(&self) -> &ClipInfo {
        (**self).info()
    }
}
