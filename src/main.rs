#![deny(clippy::all)]
#![forbid(unsafe_code)]

use crate::config::Config;
use crate::keymap::default_bindings;
use error_iter::ErrorIter as _;
use game_loop::{game_loop, Time, TimeTrait as _};
use gilrs::{Button, GamepadId, Gilrs};
use log::{debug, error, info, warn};
use pixels::{Error, Pixels, SurfaceTexture};
use side_scroller::{Commands, Controls, KeyBindings, World, FPS, HEIGHT, TIME_STEP, WIDTH};
use std::sync::Arc;
use std::time::Duration;
use winit::{dpi::LogicalSize, event_loop::EventLoop, keyboard::KeyCode, window::WindowBuilder};
use winit_input_helper::WinitInputHelper;

mod config;
mod keymap;

/// Uber-struct representing the entire game.
struct Game {
    /// Software renderer.
    pixels: Pixels<'static>,
    /// The scene and the old man.
    world: World,
    /// Player controls for world updates.
    controls: Controls,
    /// Event manager.
    input: WinitInputHelper,
    /// Keyboard layout.
    bindings: KeyBindings<KeyCode>,
    /// GamePad manager, if the platform has one.
    gilrs: Option<Gilrs>,
    /// GamePad ID for the player.
    gamepad: Option<GamepadId>,
    /// Game pause state.
    paused: bool,
}

impl Game {
    fn new(pixels: Pixels<'static>, world: World) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(err) => {
                warn!("Gamepads are unavailable: {err}");
                None
            }
        };

        Self {
            pixels,
            world,
            controls: Controls::default(),
            input: WinitInputHelper::new(),
            bindings: default_bindings(),
            gilrs,
            gamepad: None,
            paused: false,
        }
    }

    fn update_controls(&mut self) -> Commands {
        // Keyboard controls
        let input = &self.input;
        let mut commands = self
            .bindings
            .poll(|&key| input.key_held(key), |&key| input.key_pressed(key));

        // GamePad controls
        if let Some(gilrs) = &mut self.gilrs {
            // Pump the gilrs event loop and find an active gamepad
            while let Some(gilrs::Event { id, event, .. }) = gilrs.next_event() {
                let pad = gilrs.gamepad(id);
                if self.gamepad.is_none() {
                    debug!("Gamepad with id {} is connected: {}", id, pad.name());
                    self.gamepad = Some(id);
                } else if event == gilrs::ev::EventType::Disconnected {
                    debug!("Gamepad with id {} is disconnected: {}", id, pad.name());
                    self.gamepad = None;
                }
            }

            if let Some(id) = self.gamepad {
                let gamepad = gilrs.gamepad(id);
                let just_pressed = |button| {
                    gamepad.button_data(button).is_some_and(|data| {
                        data.is_pressed() && data.counter() == gilrs.counter()
                    })
                };

                commands.left |= gamepad.is_pressed(Button::DPadLeft);
                commands.right |= gamepad.is_pressed(Button::DPadRight);
                commands.jump |= just_pressed(Button::South);
                commands.kick |= just_pressed(Button::West);
                commands.pause |= just_pressed(Button::Start);
            }
            gilrs.inc();
        }

        if commands.pause {
            self.paused = !self.paused;
            info!("Paused: {}", self.paused);
        }
        self.controls = commands.controls();

        commands
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let config = Config::from_env();
    debug!("{config:?}");

    let world = World::new(&config.assets, config.debug)
        .map_err(|e| Error::UserDefined(Box::new(e)))?;

    let event_loop = EventLoop::new().map_err(|e| Error::UserDefined(Box::new(e)))?;
    let window = {
        let size = LogicalSize::new(WIDTH as f64, HEIGHT as f64);
        let scaled_size =
            LogicalSize::new(WIDTH as f64 * config.scale, HEIGHT as f64 * config.scale);
        let window = WindowBuilder::new()
            .with_title("Kicking Animation Example")
            .with_inner_size(scaled_size)
            .with_min_inner_size(size)
            .build(&event_loop)
            .map_err(|e| Error::UserDefined(Box::new(e)))?;
        Arc::new(window)
    };

    let pixels = {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, Arc::clone(&window));
        Pixels::new(WIDTH as u32, HEIGHT as u32, surface_texture)?
    };

    let game = Game::new(pixels, world);

    let res = game_loop(
        event_loop,
        window,
        game,
        FPS as u32,
        0.1,
        move |g| {
            // Update the world
            if !g.game.paused {
                if let Err(err) = g.game.world.update(&g.game.controls) {
                    log_error("world.update", err);
                    g.exit();
                }
            }
        },
        move |g| {
            // Drawing
            g.game.world.draw(g.game.pixels.frame_mut());
            if let Err(err) = g.game.pixels.render() {
                log_error("pixels.render", err);
                g.exit();
            }

            // Sleep the main thread to limit drawing to the fixed time step.
            // See: https://github.com/parasyte/pixels/issues/174
            let dt = TIME_STEP.as_secs_f64() - Time::now().sub(&g.current_instant());
            if dt > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(dt));
            }
        },
        |g, event| {
            // Let winit_input_helper collect events to build its state.
            if g.game.input.update(event) {
                let commands = g.game.update_controls();

                // Close events
                if commands.quit || g.game.input.close_requested() {
                    g.exit();
                    return;
                }

                // Reset game
                if commands.reset {
                    if let Err(err) = g.game.world.reset() {
                        log_error("world.reset", err);
                        g.exit();
                        return;
                    }
                }

                // Resize the window
                if let Some(size) = g.game.input.window_resized() {
                    if let Err(err) = g.game.pixels.resize_surface(size.width, size.height) {
                        log_error("pixels.resize_surface", err);
                        g.exit();
                    }
                }
            }
        },
    );
    res.map_err(|e| Error::UserDefined(Box::new(e)))
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
