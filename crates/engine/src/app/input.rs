/// Normalised per-frame input token handed to the game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    Restart,
}

const COMMAND_COUNT: usize = 6;

impl Command {
    const fn index(self) -> usize {
        match self {
            Command::MoveLeft => 0,
            Command::MoveRight => 1,
            Command::MoveUp => 2,
            Command::MoveDown => 3,
            Command::Fire => 4,
            Command::Restart => 5,
        }
    }
}

/// Turns key up/down transitions into at most one command per frame: the
/// most recent press edge wins. Held keys do not repeat.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CommandLatch {
    down: [bool; COMMAND_COUNT],
    pending: Option<Command>,
}

impl CommandLatch {
    pub(crate) fn set(&mut self, command: Command, is_down: bool) {
        let was_down = self.down[command.index()];
        self.down[command.index()] = is_down;
        if is_down && !was_down {
            self.pending = Some(command);
        }
    }

    pub(crate) fn take(&mut self) -> Option<Command> {
        self.pending.take()
    }
}
