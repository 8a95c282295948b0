//! Deterministic color assignment.
//!
//! A [`Palette`] is a fixed, ordered list of distinct styles. The body at
//! position `i` of the tracked list always gets `palette[i % K]`. With more
//! bodies than styles the colors repeat, so bodies `i` and `i + K` are drawn
//! alike and can only be told apart by their labels.

use indexmap::IndexMap;
use log::warn;

use crate::error::{PlaybackError, Result};
use crate::simulation::types::BodyId;

// rgba, 0..1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

// CSS/X11 names, the same values matplotlib uses
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("blue", 0x0000ff),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkorange", 0xff8c00),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("gold", 0xffd700),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("limegreen", 0x32cd32),
    ("magenta", 0xff00ff),
    ("midnightblue", 0x191970),
    ("orange", 0xffa500),
    ("orchid", 0xda70d6),
    ("purple", 0x800080),
    ("red", 0xff0000),
    ("slategray", 0x708090),
    ("teal", 0x008080),
    ("white", 0xffffff),
    ("yellow", 0xffff00),
];

fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, hex)| Color::from_rgb_hex(hex))
}

fn hex_color(digits: &str) -> Option<Color> {
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(Color::from_rgb_hex)
}

// Splits an unknown entry into two known names, if it is one
fn run_together(entry: &str) -> Option<(&str, &str)> {
    (1..entry.len())
        .filter(|&i| entry.is_char_boundary(i))
        .map(|i| entry.split_at(i))
        .find(|(head, tail)| named_color(head).is_some() && named_color(tail).is_some())
}

/// The look of one body for a whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualStyle {
    pub name: String,
    pub color: Color,
}

impl VisualStyle {
    /// Accepts a known color name or `#rrggbb`, case-insensitive.
    pub fn parse(entry: &str) -> Result<Self> {
        let normalized = entry.trim().to_ascii_lowercase();
        let color = match normalized.strip_prefix('#') {
            Some(digits) => hex_color(digits),
            None => named_color(&normalized),
        };
        if let Some(color) = color {
            return Ok(Self {
                name: normalized,
                color,
            });
        }

        let reason = match run_together(&normalized) {
            Some((head, tail)) => {
                format!("looks like {head:?} and {tail:?} run together; is a comma missing?")
            }
            None if normalized.starts_with('#') => "expected #rrggbb".to_string(),
            None => "unknown color name".to_string(),
        };
        Err(PlaybackError::MalformedPaletteEntry {
            entry: entry.to_string(),
            reason,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    styles: Vec<VisualStyle>,
}

impl Palette {
    pub const DEFAULT_NAMES: [&'static str; 8] = [
        "firebrick",
        "limegreen",
        "dodgerblue",
        "gold",
        "darkorange",
        "midnightblue",
        "darkviolet",
        "deeppink",
    ];

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.is_empty() {
            return Err(PlaybackError::EmptyPalette);
        }

        let mut styles: Vec<VisualStyle> = Vec::with_capacity(names.len());
        for name in names {
            let style = VisualStyle::parse(name.as_ref())?;
            if let Some(first_index) = styles.iter().position(|s| s.color == style.color) {
                return Err(PlaybackError::DuplicatePaletteEntry {
                    entry: name.as_ref().to_string(),
                    first_index,
                });
            }
            styles.push(style);
        }
        Ok(Self { styles })
    }

    /// K, the number of distinct styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn styles(&self) -> &[VisualStyle] {
        &self.styles
    }

    pub fn style_for(&self, ordinal: usize) -> &VisualStyle {
        &self.styles[ordinal % self.styles.len()]
    }

    /// Styles for each body, keyed and ordered like `bodies`.
    pub fn assign<'a>(
        &self,
        bodies: impl IntoIterator<Item = &'a BodyId>,
    ) -> IndexMap<BodyId, VisualStyle> {
        let assigned: IndexMap<BodyId, VisualStyle> = bodies
            .into_iter()
            .enumerate()
            .map(|(ordinal, body)| (body.clone(), self.style_for(ordinal).clone()))
            .collect();
        if assigned.len() > self.len() {
            warn!(
                "{} bodies share a palette of {} colors; colors repeat every {} bodies",
                assigned.len(),
                self.len(),
                self.len()
            );
        }
        assigned
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: Self::DEFAULT_NAMES
                .iter()
                .filter_map(|name| {
                    named_color(name).map(|color| VisualStyle {
                        name: name.to_string(),
                        color,
                    })
                })
                .collect(),
        }
    }
}
