//! An old man walking, jumping and kicking through a side-scrolling scene.
//!
//! The crate owns the game state and draws it into an RGBA frame buffer of `WIDTH` × `HEIGHT`
//! pixels. Windowing, input polling and presenting the frame buffer are left to the host.

#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub use crate::animation::{Animation, Animator, FrameTable, Intervals, Orientation, PlayerState};
use crate::background::{Background, Floor};
pub use crate::bindings::{Action, Binding, Commands, KeyBindings, Trigger};
pub use crate::controls::{Controls, Direction};
pub use crate::error::Error;
pub use crate::geo::Vec2;
use crate::loader::{load_assets, Assets};
use crate::player::Player;
use crate::sprites::blit;
pub use crate::sprites::Frame;
use core::time::Duration;
use std::path::Path;

mod animation;
mod background;
mod bindings;
mod controls;
mod debug;
mod error;
mod geo;
mod loader;
mod player;
mod sprites;

/// The screen width is constant (units are in pixels)
pub const WIDTH: usize = 320;
/// The screen height is constant (units are in pixels)
pub const HEIGHT: usize = 240;

// Fixed time step (120 fps)
pub const FPS: usize = 120;
pub const TIME_STEP: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);
// Movement advances at 60 fps
const ONE_FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Sprites are drawn at twice their size.
pub(crate) const SCALE: usize = 2;

const SKY: [u8; 4] = [0x8c, 0xc8, 0xf0, 0xff];

#[derive(Debug)]
pub struct World {
    player: Player,
    background: Background,
    floor: Floor,
    assets: Assets,
    debug: bool,
}

trait DeltaTime {
    fn update(&mut self) -> usize;

    fn update_dt(dest_dt: &mut Duration, step: Duration) -> usize {
        *dest_dt += TIME_STEP;
        let frames = dest_dt.as_nanos() / step.as_nanos();
        *dest_dt -= Duration::from_nanos((frames * step.as_nanos()) as u64);

        frames as usize
    }
}

impl DeltaTime for Player {
    fn update(&mut self) -> usize {
        Self::update_dt(&mut self.dt, ONE_FRAME)
    }
}

impl World {
    /// Create a new `World`, loading its assets from `assets_dir`.
    ///
    /// # Arguments
    ///
    /// * `assets_dir` - Directory containing the PCX sprites.
    /// * `debug` - Enable debug visualizations.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use side_scroller::World;
    /// use std::path::Path;
    ///
    /// let world = World::new(Path::new("assets"), false)?;
    /// # Ok::<(), side_scroller::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when any sprite cannot be read or decoded.
    pub fn new(assets_dir: &Path, debug: bool) -> Result<World, Error> {
        let assets = load_assets(assets_dir)?;

        World::with_assets(assets, debug)
    }

    fn with_assets(assets: Assets, debug: bool) -> Result<World, Error> {
        let player = Player::new(&assets)?;
        let background = Background::new(&assets)?;
        let floor = Floor::new(&assets)?;

        Ok(World {
            player,
            background,
            floor,
            assets,
            debug,
        })
    }

    /// Advance the world by one `TIME_STEP`.
    ///
    /// # Arguments
    ///
    /// * `controls`: The player inputs.
    pub fn update(&mut self, controls: &Controls) -> Result<(), Error> {
        let frames = self.player.update();
        let scroll = self.player.step(controls, frames, &self.assets)?;

        if scroll != 0.0 {
            self.background.scroll(Vec2::new(scroll, 0.0));
        }

        Ok(())
    }

    /// Draw the internal state to the screen.
    pub fn draw(&self, screen: &mut [u8]) {
        clear(screen);

        self.floor.draw(screen, self.background.offset);
        self.background.draw(screen);
        blit(screen, self.player.pos, &self.player.sprite, SCALE);

        if self.debug {
            debug::draw_horizon(screen);
            debug::draw_background(screen, &self.background);
            debug::draw_player(screen, &self.player);
        }
    }

    /// Put the player and the camera back where they started.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.player.reset(&self.assets)?;
        self.background.offset = Vec2::default();

        Ok(())
    }
}

/// Clear the screen to the sky color.
fn clear(screen: &mut [u8]) {
    for pixel in screen.chunks_exact_mut(4) {
        pixel.copy_from_slice(&SKY);
    }
}
