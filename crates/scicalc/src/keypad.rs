//! Scientific calculator keypad
//!
//! The button grid a host renders, and the lookups it needs to turn a click,
//! a label or a keyboard key back into an [`InputEvent`].

use crate::core::{Function, Operation};
use crate::input::{InputEvent, Paren};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The event this button produces
    pub event: InputEvent,
    /// Stable element ID (`btn-7`, `btn-sqrt`, ...)
    pub id: String,
    /// Text printed on the button
    pub label: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a new button definition
    #[must_use]
    pub fn new(event: InputEvent, row: usize, col: usize) -> Self {
        Self {
            id: format!("btn-{}", id_suffix(event)),
            label: event.label(),
            event,
            row,
            col,
        }
    }
}

fn id_suffix(event: InputEvent) -> String {
    let name = match event {
        InputEvent::Digit(d) => return d.to_string(),
        InputEvent::Decimal => "decimal",
        InputEvent::Operator(op) => match op {
            Operation::Add => "plus",
            Operation::Subtract => "minus",
            Operation::Multiply => "times",
            Operation::Divide => "divide",
            Operation::Power => "power",
        },
        InputEvent::Function(func) => func.name(),
        InputEvent::Parenthesis(Paren::Open) => "open-paren",
        InputEvent::Parenthesis(Paren::Close) => "close-paren",
        InputEvent::Evaluate => "equals",
        InputEvent::Clear => "clear",
        InputEvent::Percentage => "percent",
        InputEvent::ToggleSign => "sign",
    };
    name.to_string()
}

/// Keypad layout
///
/// ```text
/// [ C   ] [ (   ] [ )   ] [ %  ]
/// [ sin ] [ cos ] [ tan ] [ √  ]
/// [ 7   ] [ 8   ] [ 9   ] [ ÷  ]
/// [ 4   ] [ 5   ] [ 6   ] [ ×  ]
/// [ 1   ] [ 2   ] [ 3   ] [ -  ]
/// [ 0   ] [ .   ] [ ±   ] [ +  ]
/// [ xʸ  ] [ =   ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard scientific keypad
    #[must_use]
    pub fn new() -> Self {
        use InputEvent::{Clear, Decimal, Digit, Evaluate, Percentage, ToggleSign};

        let grid: [&[InputEvent]; 7] = [
            &[
                Clear,
                InputEvent::Parenthesis(Paren::Open),
                InputEvent::Parenthesis(Paren::Close),
                Percentage,
            ],
            &[
                InputEvent::Function(Function::Sin),
                InputEvent::Function(Function::Cos),
                InputEvent::Function(Function::Tan),
                InputEvent::Function(Function::Sqrt),
            ],
            &[
                Digit(7),
                Digit(8),
                Digit(9),
                InputEvent::Operator(Operation::Divide),
            ],
            &[
                Digit(4),
                Digit(5),
                Digit(6),
                InputEvent::Operator(Operation::Multiply),
            ],
            &[
                Digit(1),
                Digit(2),
                Digit(3),
                InputEvent::Operator(Operation::Subtract),
            ],
            &[
                Digit(0),
                Decimal,
                ToggleSign,
                InputEvent::Operator(Operation::Add),
            ],
            &[InputEvent::Operator(Operation::Power), Evaluate],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, events)| {
                events
                    .iter()
                    .enumerate()
                    .map(move |(col, &event)| KeypadButton::new(event, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: grid.len(),
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets a button by row and column; the last row is not full
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by any accepted spelling of its label
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&KeypadButton> {
        let event = InputEvent::from_label(label)?;
        self.buttons.iter().find(|b| b.event == event)
    }

    /// Resolves a click on an element ID to its event
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<InputEvent> {
        self.find_by_id(element_id).map(|btn| btn.event)
    }

    /// Maps a keyboard key to an event
    #[must_use]
    pub fn key_to_event(key: &str) -> Option<InputEvent> {
        match key {
            "Enter" | "=" => Some(InputEvent::Evaluate),
            "Escape" | "c" | "C" => Some(InputEvent::Clear),
            "s" => Some(InputEvent::Function(Function::Sin)),
            "o" => Some(InputEvent::Function(Function::Cos)),
            "t" => Some(InputEvent::Function(Function::Tan)),
            "r" => Some(InputEvent::Function(Function::Sqrt)),
            "n" => Some(InputEvent::ToggleSign),
            _ => InputEvent::from_label(key).filter(|_| key.chars().count() == 1),
        }
    }

    /// Renders the grid as text, one row per line
    #[must_use]
    pub fn render(&self) -> String {
        (0..self.rows)
            .map(|row| {
                self.buttons
                    .iter()
                    .filter(|b| b.row == row)
                    .map(|b| format!("[{:^5}]", b.label))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keypad_covers_every_event() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 26);
        let events: HashSet<_> = keypad.buttons().iter().map(|b| b.event).collect();
        assert_eq!(events.len(), 26);
        for d in 0..=9 {
            assert!(events.contains(&InputEvent::Digit(d)));
        }
        for op in Operation::ALL {
            assert!(events.contains(&InputEvent::Operator(op)));
        }
        for func in Function::ALL {
            assert!(events.contains(&InputEvent::Function(func)));
        }
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(Keypad::new().dimensions(), (7, 4));
    }

    #[test]
    fn test_button_at() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_at(0, 0).unwrap().event, InputEvent::Clear);
        assert_eq!(keypad.button_at(2, 0).unwrap().event, InputEvent::Digit(7));
        assert_eq!(keypad.button_at(6, 1).unwrap().event, InputEvent::Evaluate);
        assert!(keypad.button_at(6, 2).is_none());
        assert!(keypad.button_at(7, 0).is_none());
    }

    #[test]
    fn test_button_ids() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.handle_click("btn-sqrt"),
            Some(InputEvent::Function(Function::Sqrt))
        );
        assert_eq!(
            keypad.handle_click("btn-power"),
            Some(InputEvent::Operator(Operation::Power))
        );
        assert_eq!(keypad.handle_click("btn-5"), Some(InputEvent::Digit(5)));
        assert_eq!(keypad.handle_click("btn-missing"), None);
    }

    #[test]
    fn test_button_labels() {
        let keypad = Keypad::new();
        assert_eq!(keypad.find_by_id("btn-times").unwrap().label, "×");
        assert_eq!(keypad.find_by_id("btn-power").unwrap().label, "xʸ");
        assert_eq!(keypad.find_by_id("btn-sign").unwrap().label, "±");
    }

    #[test]
    fn test_find_by_label_accepts_aliases() {
        let keypad = Keypad::new();
        assert_eq!(keypad.find_by_label("*").unwrap().id, "btn-times");
        assert_eq!(keypad.find_by_label("sqrt").unwrap().id, "btn-sqrt");
        assert!(keypad.find_by_label("log").is_none());
    }

    #[test]
    fn test_key_to_event() {
        assert_eq!(Keypad::key_to_event("Enter"), Some(InputEvent::Evaluate));
        assert_eq!(Keypad::key_to_event("Escape"), Some(InputEvent::Clear));
        assert_eq!(
            Keypad::key_to_event("*"),
            Some(InputEvent::Operator(Operation::Multiply))
        );
        assert_eq!(
            Keypad::key_to_event("r"),
            Some(InputEvent::Function(Function::Sqrt))
        );
        assert_eq!(Keypad::key_to_event("%"), Some(InputEvent::Percentage));
        assert_eq!(Keypad::key_to_event("sin"), None);
        assert_eq!(Keypad::key_to_event("F1"), None);
    }

    #[test]
    fn test_render() {
        let rendered = Keypad::new().render();
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.lines().next().unwrap().contains("[  C  ]"));
    }
}
