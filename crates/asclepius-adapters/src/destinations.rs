//! Cache-directory destinations for cropped images.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use asclepius_core::{DestinationAllocator, ImageRef};
use tracing::warn;

use crate::fs::path_to_ref;

/// Allocates `cropped_img_<millis>.jpg` files inside a cache directory.
///
/// Stamps come from the wall clock but never repeat: a call in the same
/// millisecond as the previous one gets the next value up.
pub struct CacheDestinations {
    cache_dir: PathBuf,
    last_stamp: AtomicU64,
}

impl CacheDestinations {
    /// Creates an allocator writing into `cache_dir`.
    ///
    /// A relative `cache_dir` is resolved against the current directory, so
    /// minted references stay valid after the working directory changes.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: absolute(cache_dir.into()),
            last_stamp: AtomicU64::new(0),
        }
    }

    /// Directory the destinations live in.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn next_stamp(&self) -> u64 {
        let now = now_millis();
        let next = |prev: u64| now.max(prev.saturating_add(1));
        match self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(next(prev)))
        {
            Ok(prev) | Err(prev) => next(prev),
        }
    }
}

impl DestinationAllocator for CacheDestinations {
    fn allocate(&self) -> ImageRef {
        let name = format!("cropped_img_{}.jpg", self.next_stamp());
        path_to_ref(&self.cache_dir.join(name))
    }
}

fn absolute(dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        return dir;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(e) => {
            warn!("Cannot resolve {} against the working directory: {e}", dir.display());
            dir
        }
    }
}

fn now_millis() -> u64 {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    u64::try_from(millis).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_destination_naming() {
        let dest = CacheDestinations::new("/tmp/asclepius-cache");
        let image = dest.allocate();
        let s = image.as_str();
        assert!(s.starts_with("file:///tmp/asclepius-cache/cropped_img_"));
        assert!(s.ends_with(".jpg"));
    }

    #[test]
    fn test_relative_cache_dir_is_made_absolute() {
        let dest = CacheDestinations::new("cache");
        assert!(dest.cache_dir().is_absolute());
        assert!(dest.cache_dir().ends_with("cache"));

        let path = crate::fs::ref_to_path(&dest.allocate()).unwrap();
        assert!(path.is_absolute());
    }

    #[test]
    fn test_rapid_allocations_are_unique() {
        let dest = CacheDestinations::new("/tmp/asclepius-cache");
        let all: HashSet<_> = (0..1000).map(|_| dest.allocate()).collect();
        assert_eq!(all.len(), 1000);
    }
}
