//! Bounded, multi-name file resolution across an ordered path list.
//!
//! Responsibilities:
//! - Yield at most one match per directory, scanning directories in
//!   priority order.
//! - Within a directory, honor basename priority: the first candidate name
//!   that exists wins and later names are not considered there.
//! - Stop early once an optional total match bound is reached.
//!
//! Does NOT handle:
//! - Turning "no match" into an error; absence is an empty iterator and
//!   higher-level lookup decides what that means.
//!
//! Invariants:
//! - Matches are yielded lazily, in directory order.
//! - `Some(0)` as the bound yields nothing without touching the filesystem.

use std::path::{Path, PathBuf};

/// Find files named by any of `names` across `paths`, in priority order.
///
/// `names` is a priority list of candidate basenames; `paths` is consulted
/// in order with at most one match yielded per directory. `matches` bounds
/// the total number of yields; `None` scans every directory.
///
/// Yielded paths are absolute as long as the directories are (the
/// bootstrap's search paths always are); relative directories yield paths
/// resolved against the working directory.
pub fn find_files<'p, I, N>(names: I, paths: &'p [PathBuf], matches: Option<usize>) -> FindFiles<'p>
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    FindFiles {
        names: names.into_iter().map(Into::into).collect(),
        dirs: paths.iter(),
        remaining: matches,
    }
}

/// Lazy iterator returned by [`find_files`].
#[derive(Debug)]
pub struct FindFiles<'p> {
    names: Vec<String>,
    dirs: std::slice::Iter<'p, PathBuf>,
    remaining: Option<usize>,
}

impl Iterator for FindFiles<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.remaining == Some(0) {
            return None;
        }
        for dir in self.dirs.by_ref() {
            if let Some(found) = first_match(dir, &self.names) {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Some(found);
            }
        }
        None
    }
}

/// The highest-priority name present in `dir`, if any.
fn first_match(dir: &Path, names: &[String]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|candidate| candidate.is_file())
}
