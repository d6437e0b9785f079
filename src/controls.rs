use winit::keyboard::KeyCode;

use crate::algorithms::Algorithm;
use crate::engine::Order;

/// What a key press asks the engine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Regenerate,
    Start,
    SetOrder(Order),
    Select(Algorithm),
}

impl Command {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let command = match key {
            KeyCode::KeyR => Command::Regenerate,
            KeyCode::Space => Command::Start,
            KeyCode::KeyA => Command::SetOrder(Order::Ascending),
            KeyCode::KeyD => Command::SetOrder(Order::Descending),
            KeyCode::KeyB => Command::Select(Algorithm::Bubble),
            KeyCode::KeyI => Command::Select(Algorithm::Insertion),
            KeyCode::KeyS => Command::Select(Algorithm::Selection),
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_control_key() {
        assert_eq!(Command::from_key(KeyCode::KeyR), Some(Command::Regenerate));
        assert_eq!(Command::from_key(KeyCode::Space), Some(Command::Start));
        assert_eq!(Command::from_key(KeyCode::KeyD), Some(Command::SetOrder(Order::Descending)));
        assert_eq!(Command::from_key(KeyCode::KeyI), Some(Command::Select(Algorithm::Insertion)));
    }

    #[test]
    fn algorithm_hotkeys_match_bindings() {
        let keys = [KeyCode::KeyB, KeyCode::KeyI, KeyCode::KeyS];
        for (key, algorithm) in keys.into_iter().zip(Algorithm::ALL) {
            assert_eq!(Command::from_key(key), Some(Command::Select(algorithm)));
        }
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(Command::from_key(KeyCode::KeyX), None);
        assert_eq!(Command::from_key(KeyCode::Escape), None);
    }
}
