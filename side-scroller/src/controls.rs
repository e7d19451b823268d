/// Player control inputs.
#[derive(Debug, Default)]
pub struct Controls {
    /// Walk the player.
    pub direction: Direction,
    /// Start a jump.
    pub jump: bool,
    /// Start a kick.
    pub kick: bool,
}

/// The player can only walk left or right, but can also be stationary.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    /// Do not move the player.
    #[default]
    Still,
    /// Move to the left.
    Left,
    /// Move to the right.
    Right,
}
