//! Sprite animation driven by the player state machine.
//!
//! Every `(PlayerState, Orientation)` pair maps to an ordered sequence of frames in a
//! [`FrameTable`]. An [`Animator`] tracks the active pair and steps through its sequence as time
//! passes. The frame index always refers to the sequence of the *active* pair: changing state
//! restarts the animation, and changing orientation keeps the index but re-bounds it to the new
//! sequence.

use crate::error::Error;
use crate::sprites::Frame;
use core::time::Duration;
use log::debug;
use std::collections::BTreeMap;

/// The direction the player is facing.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Orientation {
    Left,
    Right,
    /// Facing the camera.
    Center,
}

/// What the player is currently doing.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum PlayerState {
    Idle,
    Walking,
    Kicking,
    Jumping,
}

/// Per-(state, orientation) ordered lists of frames.
#[derive(Debug)]
pub struct FrameTable {
    sequences: BTreeMap<(PlayerState, Orientation), Vec<Frame>>,
    fallback: Vec<Frame>,
}

/// How long each frame is shown, per state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Intervals {
    pub idle: Duration,
    pub walking: Duration,
    pub kicking: Duration,
    pub jumping: Duration,
}

/// Frame index and stopwatch for the active sequence.
#[derive(Debug)]
pub struct Animation {
    index: usize,
    dt: Duration,
    intervals: Intervals,
}

/// The player state machine.
///
/// Owns the frame table and the animation, so the current frame can always be resolved.
#[derive(Debug)]
pub struct Animator {
    table: FrameTable,
    state: PlayerState,
    orientation: Orientation,
    animation: Animation,
}

impl FrameTable {
    /// Build a frame table.
    ///
    /// # Errors
    ///
    /// Every sequence must contain at least one frame, and the table must contain
    /// `(Idle, Right)`, which is the last resort for lookups.
    pub fn new<I>(entries: I) -> Result<FrameTable, Error>
    where
        I: IntoIterator<Item = ((PlayerState, Orientation), Vec<Frame>)>,
    {
        let sequences = entries.into_iter().collect::<BTreeMap<_, _>>();

        if let Some(((state, orientation), _)) = sequences.iter().find(|(_, seq)| seq.is_empty()) {
            return Err(Error::EmptySequence {
                state: *state,
                orientation: *orientation,
            });
        }

        let fallback = sequences
            .get(&(PlayerState::Idle, Orientation::Right))
            .cloned()
            .ok_or(Error::MissingFallback)?;

        Ok(FrameTable {
            sequences,
            fallback,
        })
    }

    /// The stock frames for the old man.
    pub fn old_man() -> Result<FrameTable, Error> {
        use Frame::*;
        use Orientation::*;
        use PlayerState::*;

        FrameTable::new([
            ((Idle, Left), vec![OldManIdleLeft]),
            ((Idle, Right), vec![OldManIdleRight]),
            ((Idle, Center), vec![OldManFront]),
            (
                (Walking, Left),
                vec![OldManStride1Left, OldManIdleLeft, OldManStride2Left, OldManIdleLeft],
            ),
            (
                (Walking, Right),
                vec![OldManStride1Right, OldManIdleRight, OldManStride2Right, OldManIdleRight],
            ),
            ((Kicking, Left), vec![OldManKick1Left, OldManKick2Left]),
            ((Kicking, Right), vec![OldManKick1Right, OldManKick2Right]),
            ((Jumping, Left), vec![OldManJumpLeft]),
            ((Jumping, Right), vec![OldManJumpRight]),
            ((Jumping, Center), vec![OldManFrontJump]),
        ])
    }

    /// Look up the frames for a state and orientation.
    ///
    /// Missing pairs resolve in this order: `Center` borrows the `Right` sequence, then the idle
    /// sequence for the same orientation, then the idle sequence facing right.
    pub fn sequence(&self, state: PlayerState, orientation: Orientation) -> &[Frame] {
        use Orientation::Right;
        use PlayerState::Idle;

        let borrowed = (orientation == Orientation::Center).then_some((state, Right));

        [Some((state, orientation)), borrowed, Some((Idle, orientation))]
            .into_iter()
            .flatten()
            .find_map(|key| self.sequences.get(&key))
            .unwrap_or(&self.fallback)
    }
}

impl Intervals {
    /// The frame-advance interval for `state`.
    pub fn get(&self, state: PlayerState) -> Duration {
        match state {
            PlayerState::Idle => self.idle,
            PlayerState::Walking => self.walking,
            PlayerState::Kicking => self.kicking,
            PlayerState::Jumping => self.jumping,
        }
    }
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            idle: Duration::from_millis(500),
            walking: Duration::from_millis(150),
            kicking: Duration::from_millis(100),
            jumping: Duration::from_millis(100),
        }
    }
}

impl Animation {
    pub fn new(intervals: Intervals) -> Self {
        Self {
            index: 0,
            dt: Duration::default(),
            intervals,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Go back to the first frame with a fresh stopwatch.
    pub fn restart(&mut self) {
        self.index = 0;
        self.dt = Duration::default();
    }

    /// Keep the frame index inside a sequence of `len` frames.
    pub fn rebound(&mut self, len: usize) {
        self.index = if len == 0 { 0 } else { self.index % len };
    }

    /// Accumulate `dt` and step through a sequence of `len` frames shown for `state`.
    ///
    /// A zero interval steps exactly once per call.
    ///
    /// # Returns
    ///
    /// `true` when the sequence wrapped back to its first frame.
    pub fn advance(&mut self, state: PlayerState, dt: Duration, len: usize) -> bool {
        let interval = self.intervals.get(state);
        let mut wrapped = false;

        if interval.is_zero() {
            wrapped |= self.step(len);
        } else {
            self.dt += dt;

            while self.dt >= interval {
                self.dt -= interval;
                wrapped |= self.step(len);
            }
        }

        wrapped
    }

    fn step(&mut self, len: usize) -> bool {
        self.index += 1;
        if self.index >= len {
            self.index = 0;
            true
        } else {
            false
        }
    }
}

impl Animator {
    /// Create a state machine starting idle, facing `orientation`.
    pub fn new(table: FrameTable, orientation: Orientation, intervals: Intervals) -> Self {
        Self {
            table,
            state: PlayerState::Idle,
            orientation,
            animation: Animation::new(intervals),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn index(&self) -> usize {
        self.animation.index()
    }

    /// Switch to another state. The new state's sequence always starts from its first frame.
    pub fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            debug!("Player state {:?} -> {:?}", self.state, state);
            self.state = state;
            self.animation.restart();
        }
    }

    /// Face another direction, keeping the walk cycle going.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            debug!("Player orientation {:?} -> {:?}", self.orientation, orientation);
            self.orientation = orientation;
            let len = self.sequence().len();
            self.animation.rebound(len);
        }
    }

    /// Advance the active sequence by `dt`.
    ///
    /// # Returns
    ///
    /// `true` when the sequence wrapped back to its first frame.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let len = self.sequence().len();
        self.animation.advance(self.state, dt, len)
    }

    /// The frame to draw right now.
    pub fn frame(&self) -> Frame {
        self.sequence()[self.animation.index()]
    }

    /// The frames for the active state and orientation.
    pub fn sequence(&self) -> &[Frame] {
        self.table.sequence(self.state, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Frame::*;
    use Orientation::*;
    use PlayerState::*;

    fn animator() -> Animator {
        Animator::new(FrameTable::old_man().unwrap(), Left, Intervals::default())
    }

    #[test]
    fn test_old_man_table_is_valid() {
        let table = FrameTable::old_man().unwrap();

        for state in [Idle, Walking, Kicking, Jumping] {
            for orientation in [Left, Right, Center] {
                assert!(
                    !table.sequence(state, orientation).is_empty(),
                    "No frames for {state:?} {orientation:?}"
                );
            }
        }
    }

    #[test]
    fn test_sequence_fallbacks() {
        let table = FrameTable::old_man().unwrap();

        // Exact matches
        assert_eq!(table.sequence(Idle, Center), [OldManFront]);
        assert_eq!(table.sequence(Jumping, Center), [OldManFrontJump]);
        // Center borrows from Right
        assert_eq!(table.sequence(Kicking, Center), [OldManKick1Right, OldManKick2Right]);

        let table = FrameTable::new([
            ((Idle, Right), vec![OldManIdleRight]),
            ((Idle, Left), vec![OldManIdleLeft]),
        ])
        .unwrap();

        // Idle in the same orientation, then idle facing right
        assert_eq!(table.sequence(Walking, Left), [OldManIdleLeft]);
        assert_eq!(table.sequence(Walking, Center), [OldManIdleRight]);
    }

    #[test]
    fn test_table_validation() {
        let err = FrameTable::new([((Idle, Left), vec![OldManIdleLeft])]).unwrap_err();
        assert!(matches!(err, Error::MissingFallback));

        let err = FrameTable::new([
            ((Idle, Right), vec![OldManIdleRight]),
            ((Kicking, Left), vec![]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::EmptySequence {
                state: Kicking,
                orientation: Left
            }
        ));
    }

    #[test]
    fn test_advance_on_interval() {
        let mut animation = Animation::new(Intervals::default());

        // Walking frames last 150ms
        assert!(!animation.advance(Walking, Duration::from_millis(100), 4));
        assert_eq!(animation.index(), 0);
        assert!(!animation.advance(Walking, Duration::from_millis(100), 4));
        assert_eq!(animation.index(), 1);

        // A long hitch steps more than once
        assert!(!animation.advance(Walking, Duration::from_millis(300), 4));
        assert_eq!(animation.index(), 3);

        assert!(animation.advance(Walking, Duration::from_millis(150), 4));
        assert_eq!(animation.index(), 0);
    }

    #[test]
    fn test_zero_interval_steps_every_call() {
        let intervals = Intervals {
            kicking: Duration::ZERO,
            ..Intervals::default()
        };
        let mut animation = Animation::new(intervals);

        assert!(!animation.advance(Kicking, Duration::ZERO, 2));
        assert_eq!(animation.index(), 1);
        assert!(animation.advance(Kicking, Duration::ZERO, 2));
        assert_eq!(animation.index(), 0);
    }

    #[test]
    fn test_state_change_restarts_sequence() {
        let mut animator = animator();
        animator.set_state(Walking);
        animator.advance(Duration::from_millis(450));
        assert_eq!(animator.index(), 3);
        assert_eq!(animator.frame(), OldManIdleLeft);

        // Kicking has only two frames, index 3 would be out of bounds
        animator.set_state(Kicking);
        assert_eq!(animator.index(), 0);
        assert_eq!(animator.frame(), OldManKick1Left);

        // Half of a kick frame must not carry over into the walk cycle
        animator.advance(Duration::from_millis(50));
        assert_eq!(animator.index(), 0);
        animator.set_state(Walking);
        animator.advance(Duration::from_millis(110));
        assert_eq!(animator.index(), 0);
        assert_eq!(animator.frame(), OldManStride1Left);

        animator.advance(Duration::from_millis(40));
        assert_eq!(animator.index(), 1);
    }

    #[test]
    fn test_orientation_change_keeps_walk_cycle() {
        let mut animator = animator();
        animator.set_state(Walking);
        animator.advance(Duration::from_millis(300));
        assert_eq!(animator.frame(), OldManStride2Left);

        animator.set_orientation(Right);
        assert_eq!(animator.index(), 2);
        assert_eq!(animator.frame(), OldManStride2Right);
    }

    #[test]
    fn test_orientation_change_rebounds_index() {
        let table = FrameTable::new([
            ((Idle, Right), vec![OldManIdleRight]),
            ((Walking, Left), vec![OldManStride1Left, OldManStride2Left]),
            ((Walking, Right), vec![OldManStride1Right]),
        ])
        .unwrap();
        let mut animator = Animator::new(table, Left, Intervals::default());
        animator.set_state(Walking);
        animator.advance(Duration::from_millis(150));
        assert_eq!(animator.index(), 1);

        animator.set_orientation(Right);
        assert_eq!(animator.index(), 0);
        assert_eq!(animator.frame(), OldManStride1Right);
    }

    #[test]
    fn test_every_pair_resolves_a_frame() {
        let mut animator = animator();

        for state in [Idle, Walking, Kicking, Jumping, Walking, Idle] {
            for orientation in [Right, Center, Left] {
                animator.set_state(state);
                animator.set_orientation(orientation);
                for _ in 0..10 {
                    animator.advance(Duration::from_millis(70));
                    assert!(animator.index() < animator.sequence().len());
                    let _ = animator.frame();
                }
            }
        }
    }
}
