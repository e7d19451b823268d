use crate::error::Error;
use crate::geo::{Rect, Vec2};
use crate::loader::Assets;
use crate::{HEIGHT, WIDTH};
use line_drawing::Bresenham;
use std::rc::Rc;

// This is the type stored in the `Assets` map
pub(crate) type CachedSprite = (usize, usize, Rc<[u8]>);

/// Frame identifier for managing animations.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Frame {
    OldManIdleLeft,
    OldManIdleRight,
    OldManFront,

    OldManStride1Left,
    OldManStride2Left,
    OldManStride1Right,
    OldManStride2Right,

    OldManKick1Left,
    OldManKick2Left,
    OldManKick1Right,
    OldManKick2Right,

    OldManJumpLeft,
    OldManJumpRight,
    OldManFrontJump,

    Tree,
    Trailer,
    FloorTile,
}

/// SpriteRefs can be drawn and animated.
///
/// They reference their pixel data (instead of owning it).
#[derive(Debug)]
pub(crate) struct SpriteRef {
    width: usize,
    height: usize,
    pixels: Rc<[u8]>,
    frame: Frame,
}

/// Drawables can be blitted to the pixel buffer.
pub(crate) trait Drawable {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pixels(&self) -> &[u8];
}

impl SpriteRef {
    pub(crate) fn new(assets: &Assets, frame: Frame) -> Result<SpriteRef, Error> {
        let (width, height, pixels) = assets.sprite(frame)?;

        Ok(SpriteRef {
            width: *width,
            height: *height,
            pixels: Rc::clone(pixels),
            frame,
        })
    }

    pub(crate) fn frame(&self) -> Frame {
        self.frame
    }

    /// Point this sprite at the pixels of another frame.
    pub(crate) fn set_frame(&mut self, assets: &Assets, frame: Frame) -> Result<(), Error> {
        if self.frame != frame {
            *self = SpriteRef::new(assets, frame)?;
        }

        Ok(())
    }
}

impl Drawable for SpriteRef {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Mirror a sprite left-to-right.
pub(crate) fn flip_horizontal(sprite: &CachedSprite) -> CachedSprite {
    let (width, height, pixels) = sprite;
    let pixels = pixels
        .chunks_exact(width * 4)
        .flat_map(|row| row.chunks_exact(4).rev().flatten())
        .copied()
        .collect::<Vec<u8>>();

    (*width, *height, Rc::from(pixels))
}

/// Blit a drawable to the pixel buffer.
///
/// Each sprite pixel is drawn as a `scale`×`scale` block. Anything outside of the screen is
/// clipped, and fully transparent pixels are skipped.
pub(crate) fn blit<S>(screen: &mut [u8], dest: Vec2, sprite: &S, scale: usize)
where
    S: Drawable,
{
    let (x0, y0) = dest.to_pixel();
    let pixels = sprite.pixels();
    let width = sprite.width();

    for sy in 0..sprite.height() * scale {
        let y = y0 + sy as isize;
        if y < 0 {
            continue;
        } else if y >= HEIGHT as isize {
            break;
        }

        let row = (sy / scale) * width;
        for sx in 0..width * scale {
            let x = x0 + sx as isize;
            if x < 0 {
                continue;
            } else if x >= WIDTH as isize {
                break;
            }

            let s = (row + sx / scale) * 4;
            let color = &pixels[s..s + 4];
            if color[3] == 0 {
                continue;
            }

            let i = (x as usize + y as usize * WIDTH) * 4;
            screen[i..i + 4].copy_from_slice(color);
        }
    }
}

/// Draw a line to the pixel buffer using Bresenham's algorithm.
pub(crate) fn line(screen: &mut [u8], p1: Vec2, p2: Vec2, color: [u8; 4]) {
    for (x, y) in Bresenham::new(p1.to_pixel(), p2.to_pixel()) {
        if x < 0 || y < 0 || x >= WIDTH as isize || y >= HEIGHT as isize {
            continue;
        }

        let i = (x as usize + y as usize * WIDTH) * 4;
        screen[i..i + 4].copy_from_slice(&color);
    }
}

/// Draw the outline of a rectangle to the pixel buffer.
pub(crate) fn rect(screen: &mut [u8], rect: &Rect, color: [u8; 4]) {
    let p1 = rect.p1;
    let p2 = rect.p2 - Vec2::new(1.0, 1.0);
    let p3 = Vec2::new(p1.x, p2.y);
    let p4 = Vec2::new(p2.x, p1.y);

    line(screen, p1, p3, color);
    line(screen, p3, p2, color);
    line(screen, p2, p4, color);
    line(screen, p4, p1, color);
}
