//! Syntax highlighting for interactive output.
//!
//! A [`Theme`] maps JSON token classes to terminal colors. Themes come
//! from a fixed registry of known names; an unrecognized name falls back
//! silently to the default so a typo in `--style` never blocks a query.
//!
//! The highlighter runs over the encoder's output text, so it only ever
//! sees well-formed JSON. Color emission itself is delegated to `colored`,
//! which honors `NO_COLOR` and non-TTY output.

use colored::{Color, Colorize};

/// Theme names accepted by `--style`.
pub const KNOWN_STYLES: &[&str] = &["monokai", "dracula", "github", "solarized", "mono"];

/// A named color theme for JSON and query text.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Registry name of this theme.
    pub name: &'static str,
    key: Color,
    string: Color,
    number: Color,
    keyword: Color,
    punctuation: Color,
    query: Color,
}

impl Theme {
    /// Look up a theme by name, falling back to the default when the name
    /// is not in the registry.
    #[must_use]
    pub fn named(name: &str) -> Self {
        match name {
            "monokai" => Self::monokai(),
            "dracula" => Self::dracula(),
            "github" => Self::github(),
            "solarized" => Self::solarized(),
            "mono" => Self::mono(),
            other => {
                tracing::debug!(style = other, "unknown style, falling back to monokai");
                Self::monokai()
            },
        }
    }

    const fn monokai() -> Self {
        Self {
            name: "monokai",
            key: Color::BrightCyan,
            string: Color::Yellow,
            number: Color::Magenta,
            keyword: Color::BrightMagenta,
            punctuation: Color::White,
            query: Color::Green,
        }
    }

    const fn dracula() -> Self {
        Self {
            name: "dracula",
            key: Color::BrightGreen,
            string: Color::BrightYellow,
            number: Color::BrightMagenta,
            keyword: Color::Cyan,
            punctuation: Color::BrightWhite,
            query: Color::BrightCyan,
        }
    }

    const fn github() -> Self {
        Self {
            name: "github",
            key: Color::Blue,
            string: Color::Red,
            number: Color::Cyan,
            keyword: Color::Blue,
            punctuation: Color::Black,
            query: Color::Magenta,
        }
    }

    const fn solarized() -> Self {
        Self {
            name: "solarized",
            key: Color::Blue,
            string: Color::Cyan,
            number: Color::Red,
            keyword: Color::Green,
            punctuation: Color::BrightBlack,
            query: Color::Yellow,
        }
    }

    const fn mono() -> Self {
        Self {
            name: "mono",
            key: Color::White,
            string: Color::White,
            number: Color::White,
            keyword: Color::White,
            punctuation: Color::White,
            query: Color::White,
        }
    }

    /// Colorize encoder-produced JSON text.
    ///
    /// Strings followed by a colon are keys; bare words are the JSON
    /// keywords. Everything else passes through untouched, so the output
    /// is byte-identical to the input when colors are disabled.
    #[must_use]
    pub fn highlight_json(&self, src: &str) -> String {
        let bytes = src.as_bytes();
        let mut out = String::with_capacity(src.len() * 2);
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'"' => {
                    let end = string_end(bytes, i);
                    let is_key = bytes[end..]
                        .iter()
                        .find(|b| !b.is_ascii_whitespace())
                        .is_some_and(|b| *b == b':');
                    let color = if is_key { self.key } else { self.string };
                    out.push_str(&src[i..end].color(color).to_string());
                    i = end;
                },
                b'-' | b'0'..=b'9' => {
                    let mut end = i + 1;
                    while end < bytes.len()
                        && matches!(bytes[end], b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
                    {
                        end += 1;
                    }
                    out.push_str(&src[i..end].color(self.number).to_string());
                    i = end;
                },
                b'a'..=b'z' => {
                    let mut end = i + 1;
                    while end < bytes.len() && bytes[end].is_ascii_lowercase() {
                        end += 1;
                    }
                    out.push_str(&src[i..end].color(self.keyword).to_string());
                    i = end;
                },
                b'{' | b'}' | b'[' | b']' | b',' | b':' => {
                    out.push_str(&src[i..=i].color(self.punctuation).to_string());
                    i += 1;
                },
                _ => {
                    let c_end = i + utf8_len(bytes[i]);
                    out.push_str(&src[i..c_end]);
                    i = c_end;
                },
            }
        }
        out
    }

    /// Colorize the displayable form of the query that was run.
    #[must_use]
    pub fn highlight_query(&self, query: &str) -> String {
        query.color(self.query).to_string()
    }
}

/// Index one past the closing quote of the string starting at `start`.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut escaped = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if !escaped => escaped = true,
            b'"' if !escaped => return i + 1,
            _ => escaped = false,
        }
        i += 1;
    }
    bytes.len()
}

const fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        b if b >= 0xF0 => 4,
        b if b >= 0xE0 => 3,
        b if b >= 0xC0 => 2,
        _ => 1,
    }
}
