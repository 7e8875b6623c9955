//! Player input: buttons and already-decoded serial characters.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Left,
    Right,
    Fire,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    TogglePause,
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::Left => Command::MoveLeft,
            Button::Right => Command::MoveRight,
            Button::Fire => Command::Fire,
            Button::Pause => Command::TogglePause,
        }
    }
}

impl Command {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' | 'l' => Some(Command::MoveLeft),
            'R' | 'r' => Some(Command::MoveRight),
            ' ' => Some(Command::Fire),
            'P' | 'p' => Some(Command::TogglePause),
            _ => None,
        }
    }
}

pub trait InputSource {
    /// Next pending button push, if any.
    fn poll_button(&mut self) -> Option<Button>;
    /// Next decoded serial character, if any.
    fn poll_serial_char(&mut self) -> Option<char>;
}

/// Consumes at most one input. Buttons win; serial is only read when no
/// button push is pending.
pub fn next_command<I: InputSource + ?Sized>(input: &mut I) -> Option<Command> {
    match input.poll_button() {
        Some(button) => Some(button.into()),
        None => input.poll_serial_char().and_then(Command::from_char),
    }
}
