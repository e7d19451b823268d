use crate::error::Error;
use crate::geo::Vec2;
use crate::loader::Assets;
use crate::sprites::{blit, Drawable, Frame, SpriteRef};
use crate::{HEIGHT, SCALE, WIDTH};
use log::trace;

/// The top of the floor, where everybody's feet touch the ground.
pub(crate) const HORIZON: f32 = 148.0;

/// A static piece of scenery.
#[derive(Debug)]
pub(crate) struct BackgroundObject {
    pub sprite: SpriteRef,
    pub pos: Vec2,
    pub scale: usize,
}

/// Scenery behind the player, moved as a whole by the camera.
#[derive(Debug)]
pub(crate) struct Background {
    pub objects: Vec<BackgroundObject>,
    pub offset: Vec2,
}

/// An endless strip of floor tiles below the horizon.
#[derive(Debug)]
pub(crate) struct Floor {
    sprite: SpriteRef,
    top: f32,
    scale: usize,
}

impl BackgroundObject {
    pub fn new(assets: &Assets, frame: Frame, pos: Vec2, scale: usize) -> Result<Self, Error> {
        let sprite = SpriteRef::new(assets, frame)?;

        Ok(BackgroundObject { sprite, pos, scale })
    }
}

impl Background {
    /// The stock scene: a tree and a trailer standing on the horizon.
    pub fn new(assets: &Assets) -> Result<Self, Error> {
        let objects = vec![
            BackgroundObject::new(assets, Frame::Tree, Vec2::new(30.0, 52.0), SCALE)?,
            BackgroundObject::new(assets, Frame::Trailer, Vec2::new(130.0, 84.0), SCALE)?,
        ];

        Ok(Background {
            objects,
            offset: Vec2::default(),
        })
    }

    /// Move the camera. Only the offset changes, objects keep their own positions.
    pub fn scroll(&mut self, delta: Vec2) {
        self.offset += delta;
        trace!("Background offset: {:?}", self.offset);
    }

    /// Where `object` ends up on the screen.
    pub fn screen_pos(&self, object: &BackgroundObject) -> Vec2 {
        object.pos + self.offset
    }

    pub fn draw(&self, screen: &mut [u8]) {
        for object in &self.objects {
            blit(screen, self.screen_pos(object), &object.sprite, object.scale);
        }
    }
}

impl Floor {
    pub fn new(assets: &Assets) -> Result<Self, Error> {
        let sprite = SpriteRef::new(assets, Frame::FloorTile)?;

        Ok(Floor {
            sprite,
            top: HORIZON,
            scale: SCALE,
        })
    }

    /// Tile the floor from the horizon to the bottom of the screen.
    ///
    /// Only the horizontal part of `offset` applies, the floor never leaves the ground.
    pub fn draw(&self, screen: &mut [u8], offset: Vec2) {
        let tile_width = (self.sprite.width() * self.scale) as f32;
        let tile_height = (self.sprite.height() * self.scale) as f32;
        if tile_width == 0.0 || tile_height == 0.0 {
            return;
        }

        let mut y = self.top;
        while y < HEIGHT as f32 {
            // Snap once so every tile lands on the same pixel grid
            let mut x = offset.x.round().rem_euclid(tile_width) - tile_width;
            while x < WIDTH as f32 {
                blit(screen, Vec2::new(x, y), &self.sprite, self.scale);
                x += tile_width;
            }
            y += tile_height;
        }
    }
}
