//! Contains the ANSI escape codes used to decorate console output.

use std::fmt::Display;

/// Represents a style that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Underline,
    Dim,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Underline => "\x1B[4m",
            Self::Dim => "\x1B[2m",
        }
    }

    /// Applies the style to the given displayable object.
    pub fn with<T>(self, display: T) -> Decorated<T> { Decorated::new(self.code(), display) }
}

/// Represents a foreground color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Self::Red => "\x1B[31m",
            Self::Green => "\x1B[32m",
            Self::Yellow => "\x1B[33m",
            Self::Blue => "\x1B[34m",
            Self::Cyan => "\x1B[36m",
        }
    }

    /// Applies the color to the given displayable object.
    pub fn with<T>(self, display: T) -> Decorated<T> { Decorated::new(self.code(), display) }
}

/// Is a displayable object wrapped in an escape code and a trailing reset.
///
/// Decorations nest: `Style::Bold.with(Color::Red.with("x"))` renders bold red text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decorated<T> {
    code: &'static str,
    display: T,
}

impl<T> Decorated<T> {
    fn new(code: &'static str, display: T) -> Self { Self { code, display } }
}

impl<T: Display> Display for Decorated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\x1B[0m", self.code, self.display)
    }
}
