//! Debug overlays, enabled with the `debug` flag on `World`.

use crate::background::{Background, HORIZON};
use crate::geo::{Rect, Vec2};
use crate::player::{Player, LEFT_EDGE, RIGHT_EDGE};
use crate::sprites::{line, rect};
use crate::{HEIGHT, SCALE, WIDTH};

// Colors
const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];

/// Outline every background object.
pub(crate) fn draw_background(screen: &mut [u8], background: &Background) {
    for object in &background.objects {
        let pos = background.screen_pos(object);
        rect(screen, &Rect::from_drawable(pos, &object.sprite, object.scale), YELLOW);
    }
}

/// Outline the player and draw the walking bounds.
pub(crate) fn draw_player(screen: &mut [u8], player: &Player) {
    rect(screen, &Rect::from_drawable(player.pos, &player.sprite, SCALE), GREEN);

    for x in [LEFT_EDGE, RIGHT_EDGE] {
        line(screen, Vec2::new(x, 0.0), Vec2::new(x, HEIGHT as f32 - 1.0), BLUE);
    }
}

/// Mark the ground line.
pub(crate) fn draw_horizon(screen: &mut [u8]) {
    line(
        screen,
        Vec2::new(0.0, HORIZON),
        Vec2::new(WIDTH as f32 - 1.0, HORIZON),
        RED,
    );
}
