use crate::animation::{Animator, FrameTable, Intervals, Orientation, PlayerState};
use crate::controls::{Controls, Direction};
use crate::error::Error;
use crate::geo::Vec2;
use crate::loader::Assets;
use crate::sprites::SpriteRef;
use crate::TIME_STEP;
use core::time::Duration;

// Player positioning; the starting height is also the ground line
pub(crate) const PLAYER_START: Vec2 = Vec2::new(100.0, 100.0);

// The player walks freely between these screen columns, past them the camera scrolls
pub(crate) const LEFT_EDGE: f32 = 20.0;
pub(crate) const RIGHT_EDGE: f32 = 275.0;

// Movement, in pixels per 60 Hz frame
const SPEED: f32 = 4.0;
const JUMP_VELOCITY: f32 = -6.0;
const GRAVITY: f32 = 0.4;

/// The player entity.
#[derive(Debug)]
pub(crate) struct Player {
    pub sprite: SpriteRef,
    pub pos: Vec2,
    pub animator: Animator,
    /// Vertical velocity while airborne.
    pub velocity: f32,
    pub speed: f32,
    pub dt: Duration,
}

impl Player {
    pub fn new(assets: &Assets) -> Result<Self, Error> {
        let animator = Animator::new(
            FrameTable::old_man()?,
            Orientation::Left,
            Intervals::default(),
        );
        let sprite = SpriteRef::new(assets, animator.frame())?;

        Ok(Player {
            sprite,
            pos: PLAYER_START,
            animator,
            velocity: 0.0,
            speed: SPEED,
            dt: Duration::default(),
        })
    }

    pub fn state(&self) -> PlayerState {
        self.animator.state()
    }

    pub fn orientation(&self) -> Orientation {
        self.animator.orientation()
    }

    /// Run one fixed update.
    ///
    /// `frames` is the number of 60 Hz movement frames that elapsed during this update.
    ///
    /// # Returns
    ///
    /// The horizontal camera scroll caused by walking into the screen edges. Positive values
    /// move the scenery to the right.
    pub fn step(
        &mut self,
        controls: &Controls,
        frames: usize,
        assets: &Assets,
    ) -> Result<f32, Error> {
        use PlayerState::*;

        // New actions only start on the ground
        let state = self.state();
        if state != Kicking && state != Jumping {
            if controls.kick {
                if self.orientation() == Orientation::Center {
                    self.animator.set_orientation(Orientation::Right);
                }
                self.animator.set_state(Kicking);
            } else if controls.jump {
                self.velocity = JUMP_VELOCITY;
                if controls.direction == Direction::Still {
                    self.animator.set_orientation(Orientation::Center);
                }
                self.animator.set_state(Jumping);
            }
        }

        // Kicks are performed standing still
        let distance = self.speed * frames as f32;
        let scroll = match controls.direction {
            _ if self.state() == Kicking => 0.0,
            Direction::Still => {
                if self.state() == Walking {
                    self.animator.set_state(Idle);
                }
                0.0
            }
            Direction::Left => self.walk(Orientation::Left, -distance),
            Direction::Right => self.walk(Orientation::Right, distance),
        };

        if self.state() == Jumping {
            self.fall(frames, controls.direction);
        }

        let wrapped = self.animator.advance(TIME_STEP);
        if wrapped && self.state() == Kicking {
            // Kicks play once
            self.animator.set_state(Idle);
        }

        self.sprite.set_frame(assets, self.animator.frame())?;

        Ok(scroll)
    }

    /// Put the player back where it started.
    pub fn reset(&mut self, assets: &Assets) -> Result<(), Error> {
        self.pos = PLAYER_START;
        self.velocity = 0.0;
        self.dt = Duration::default();
        self.animator.set_state(PlayerState::Idle);
        self.animator.set_orientation(Orientation::Left);
        self.sprite.set_frame(assets, self.animator.frame())
    }

    fn walk(&mut self, orientation: Orientation, dx: f32) -> f32 {
        self.animator.set_orientation(orientation);
        if self.state() == PlayerState::Idle {
            self.animator.set_state(PlayerState::Walking);
        }

        let x = self.pos.x + dx;
        self.pos.x = x.clamp(LEFT_EDGE, RIGHT_EDGE);

        self.pos.x - x
    }

    fn fall(&mut self, frames: usize, direction: Direction) {
        for _ in 0..frames {
            self.velocity += GRAVITY;
            self.pos.y += self.velocity;

            if self.pos.y >= PLAYER_START.y {
                self.pos.y = PLAYER_START.y;
                self.velocity = 0.0;

                let landed = if direction == Direction::Still {
                    PlayerState::Idle
                } else {
                    PlayerState::Walking
                };
                self.animator.set_state(landed);
                break;
            }
        }
    }
}
