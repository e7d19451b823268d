use side_scroller::{Action, KeyBindings, Trigger};
use winit::keyboard::KeyCode;

/// The stock keyboard layout: WASD or the arrow keys, plus a couple of alternatives.
pub(crate) fn default_bindings() -> KeyBindings<KeyCode> {
    use Action::*;
    use Trigger::*;

    KeyBindings::new()
        .bind(KeyCode::KeyA, Held, WalkLeft)
        .bind(KeyCode::ArrowLeft, Held, WalkLeft)
        .bind(KeyCode::KeyD, Held, WalkRight)
        .bind(KeyCode::ArrowRight, Held, WalkRight)
        .bind(KeyCode::KeyW, Pressed, Jump)
        .bind(KeyCode::ArrowUp, Pressed, Jump)
        .bind(KeyCode::KeyZ, Pressed, Jump)
        .bind(KeyCode::Space, Pressed, Kick)
        .bind(KeyCode::KeyX, Pressed, Kick)
        .bind(KeyCode::KeyP, Pressed, Pause)
        .bind(KeyCode::Pause, Pressed, Pause)
        .bind(KeyCode::KeyR, Pressed, Reset)
        .bind(KeyCode::Escape, Pressed, Quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use side_scroller::Direction;

    #[test]
    fn test_wasd() {
        let bindings = default_bindings();

        let commands = bindings.poll(|k| *k == KeyCode::KeyD, |k| *k == KeyCode::KeyW);
        let controls = commands.controls();
        assert_eq!(controls.direction, Direction::Right);
        assert!(controls.jump);
        assert!(!controls.kick);

        let commands = bindings.poll(|k| *k == KeyCode::ArrowLeft, |k| *k == KeyCode::Space);
        let controls = commands.controls();
        assert_eq!(controls.direction, Direction::Left);
        assert!(controls.kick);
    }

    #[test]
    fn test_held_keys_do_not_repeat_one_shots() {
        let bindings = default_bindings();

        let held = |k: &KeyCode| matches!(k, KeyCode::Escape | KeyCode::Space);
        let commands = bindings.poll(held, |_| false);

        assert!(!commands.quit);
        assert!(!commands.kick);
    }

    #[test]
    fn test_system_keys() {
        let bindings = default_bindings();

        let commands = bindings.poll(|_| false, |k| {
            matches!(k, KeyCode::Escape | KeyCode::KeyR | KeyCode::Pause)
        });

        assert!(commands.quit);
        assert!(commands.reset);
        assert!(commands.pause);
    }
}
