use std::fmt::{self, Display, Formatter};

/// The palette. `Transparent` is the blank canvas color and makes the brush
/// paint nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Black,
    White,
    Transparent,
}

impl Color {
    /// Color names are matched case-insensitively, like keywords.
    pub fn from_name(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "red" => Color::Red,
            "blue" => Color::Blue,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "orange" => Color::Orange,
            "purple" => Color::Purple,
            "black" => Color::Black,
            "white" => Color::White,
            "transparent" => Color::Transparent,
            _ => return None,
        };
        Some(color)
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Orange => "Orange",
            Color::Purple => "Purple",
            Color::Black => "Black",
            Color::White => "White",
            Color::Transparent => "Transparent",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn names_match_case_insensitively() {
        assert_eq!(Some(Color::Red), Color::from_name("Red"));
        assert_eq!(Some(Color::Red), Color::from_name("RED"));
        assert_eq!(Some(Color::Transparent), Color::from_name("transparent"));
        assert_eq!(None, Color::from_name("crimson"));
    }

    #[test]
    fn display_uses_the_canonical_name() {
        assert_eq!("Yellow", Color::Yellow.to_string());
    }
}
