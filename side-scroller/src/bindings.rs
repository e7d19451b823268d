//! Mapping host input keys to player actions.
//!
//! The key type is generic so the binding table does not depend on any windowing library. The
//! host supplies predicates that answer "is this key held?" and "was this key just pressed?".

use crate::controls::{Controls, Direction};

/// Something the player can ask for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    WalkLeft,
    WalkRight,
    Jump,
    Kick,
    Pause,
    Reset,
    Quit,
}

/// When a binding fires.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// Every update while the key is down.
    Held,
    /// Only on the update the key went down.
    Pressed,
}

/// The result of polling every binding once.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Commands {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub kick: bool,
    pub pause: bool,
    pub reset: bool,
    pub quit: bool,
}

/// A single key binding.
#[derive(Debug)]
pub struct Binding<K> {
    pub key: K,
    pub trigger: Trigger,
    pub action: Action,
}

/// An ordered list of key bindings.
#[derive(Debug)]
pub struct KeyBindings<K> {
    bindings: Vec<Binding<K>>,
}

impl Action {
    /// Apply this action to the commands for the current update.
    pub fn apply(self, commands: &mut Commands) {
        match self {
            Action::WalkLeft => commands.left = true,
            Action::WalkRight => commands.right = true,
            Action::Jump => commands.jump = true,
            Action::Kick => commands.kick = true,
            Action::Pause => commands.pause = true,
            Action::Reset => commands.reset = true,
            Action::Quit => commands.quit = true,
        }
    }
}

impl Commands {
    /// Resolve the player controls. Walking both ways at once cancels out.
    pub fn controls(&self) -> Controls {
        let direction = match (self.left, self.right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::Still,
        };

        Controls {
            direction,
            jump: self.jump,
            kick: self.kick,
        }
    }
}

impl<K> KeyBindings<K> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a binding.
    pub fn bind(mut self, key: K, trigger: Trigger, action: Action) -> Self {
        self.bindings.push(Binding {
            key,
            trigger,
            action,
        });
        self
    }

    /// Evaluate every binding against the host's key state.
    pub fn poll<H, P>(&self, held: H, pressed: P) -> Commands
    where
        H: Fn(&K) -> bool,
        P: Fn(&K) -> bool,
    {
        let mut commands = Commands::default();

        for binding in &self.bindings {
            let active = match binding.trigger {
                Trigger::Held => held(&binding.key),
                Trigger::Pressed => pressed(&binding.key),
            };
            if active {
                binding.action.apply(&mut commands);
            }
        }

        commands
    }
}

impl<K> Default for KeyBindings<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> KeyBindings<char> {
        KeyBindings::new()
            .bind('a', Trigger::Held, Action::WalkLeft)
            .bind('<', Trigger::Held, Action::WalkLeft)
            .bind('d', Trigger::Held, Action::WalkRight)
            .bind('w', Trigger::Pressed, Action::Jump)
            .bind(' ', Trigger::Pressed, Action::Kick)
            .bind('p', Trigger::Pressed, Action::Pause)
    }

    #[test]
    fn test_nothing_pressed() {
        let commands = bindings().poll(|_| false, |_| false);

        assert_eq!(commands, Commands::default());
        assert_eq!(commands.controls().direction, Direction::Still);
    }

    #[test]
    fn test_held_and_pressed_triggers() {
        // `w` is held but not freshly pressed, so no jump
        let commands = bindings().poll(|k| matches!(k, 'a' | 'w'), |k| *k == ' ');
        let controls = commands.controls();

        assert_eq!(controls.direction, Direction::Left);
        assert!(!controls.jump);
        assert!(controls.kick);
        assert!(!commands.pause);
    }

    #[test]
    fn test_any_bound_key_works() {
        let commands = bindings().poll(|k| *k == '<', |_| false);

        assert_eq!(commands.controls().direction, Direction::Left);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let commands = bindings().poll(|k| matches!(k, 'a' | 'd'), |_| false);

        assert_eq!(commands.controls().direction, Direction::Still);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let commands = bindings().poll(|k| *k == 'z', |k| *k == 'z');

        assert_eq!(commands, Commands::default());
    }

    #[test]
    fn test_actions_mutate_commands() {
        let mut commands = Commands::default();
        for action in [Action::Reset, Action::Quit, Action::WalkRight] {
            action.apply(&mut commands);
        }

        assert!(commands.reset);
        assert!(commands.quit);
        assert_eq!(commands.controls().direction, Direction::Right);
    }
}
