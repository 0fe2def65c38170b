use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rgb(u8, u8, u8),
}

impl Color {
    pub const NAMED: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color as Ct;
        match self {
            Color::Black => Ct::Black,
            Color::Red => Ct::DarkRed,
            Color::Green => Ct::DarkGreen,
            Color::Yellow => Ct::DarkYellow,
            Color::Blue => Ct::DarkBlue,
            Color::Magenta => Ct::DarkMagenta,
            Color::Cyan => Ct::DarkCyan,
            Color::White => Ct::Grey,
            Color::Rgb(r, g, b) => Ct::Rgb { r, g, b },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::Red => f.write_str("red"),
            Color::Green => f.write_str("green"),
            Color::Yellow => f.write_str("yellow"),
            Color::Blue => f.write_str("blue"),
            Color::Magenta => f.write_str("magenta"),
            Color::Cyan => f.write_str("cyan"),
            Color::White => f.write_str("white"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown color '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if let Some(hex) = name.strip_prefix('#') {
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                    return Ok(Color::Rgb(r, g, b));
                }
            }
            return Err(ParseColorError(s.to_string()));
        }
        Color::NAMED
            .into_iter()
            .find(|c| c.to_string() == name)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Visual attributes of an element.
///
/// Every field is optional: `None` leaves the terminal default in place,
/// `Some` forces the value. Styles stack with [`Style::compose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: Option<bool>,
    pub underline: Option<bool>,
    pub blink: Option<bool>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: None,
            underline: None,
            blink: None,
        }
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    pub fn blink(mut self) -> Self {
        self.blink = Some(true);
        self
    }

    /// Overlay `over` on `base`: set fields of `over` win, unset fields fall
    /// through to `base`. A field can never be reset to `None` this way.
    pub fn compose(base: Style, over: Style) -> Style {
        Style {
            fg: over.fg.or(base.fg),
            bg: over.bg.or(base.bg),
            bold: over.bold.or(base.bold),
            underline: over.underline.or(base.underline),
            blink: over.blink.or(base.blink),
        }
    }

    pub fn patch(self, over: Style) -> Style {
        Style::compose(self, over)
    }

    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }

    pub fn to_crossterm(&self) -> crossterm::style::ContentStyle {
        use crossterm::style::{Attribute, ContentStyle};

        let mut style = ContentStyle::new();
        style.foreground_color = self.fg.map(Color::to_crossterm);
        style.background_color = self.bg.map(Color::to_crossterm);
        if self.bold == Some(true) {
            style.attributes.set(Attribute::Bold);
        }
        if self.underline == Some(true) {
            style.attributes.set(Attribute::Underlined);
        }
        if self.blink == Some(true) {
            style.attributes.set(Attribute::SlowBlink);
        }
        style
    }
}
