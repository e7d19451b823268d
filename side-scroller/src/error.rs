use crate::animation::{Orientation, PlayerState};
use crate::sprites::Frame;
use std::path::PathBuf;
use thiserror::Error;

/// All the ways in which building the world can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// An asset file could not be read.
    #[error("Unable to read asset `{}`", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An asset file is not a PCX image this crate understands.
    #[error("Unable to decode asset `{}`", path.display())]
    Decode {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A frame was requested that was never loaded.
    #[error("Frame `{0:?}` is not loaded")]
    MissingFrame(Frame),
    /// A frame table entry has no frames.
    #[error("Frame sequence for {state:?} facing {orientation:?} is empty")]
    EmptySequence {
        state: PlayerState,
        orientation: Orientation,
    },
    /// A frame table without the `(Idle, Right)` entry cannot resolve every lookup.
    #[error("Frame table has no idle sequence facing right")]
    MissingFallback,
}
