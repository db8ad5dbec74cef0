//! Host commands — the line-oriented protocol an inspector host speaks.
//!
//! A host that has no widgets of its own (a terminal, a test harness, a
//! scripted pipeline) drives a component through one command per line.
//! This module parses those lines and the literal values they carry; the
//! host decides what each command does.
//!
//! # Supported commands
//!
//! | Command               | Action                                    |
//! |-----------------------|-------------------------------------------|
//! | `list`                | Show visible property descriptors         |
//! | `get <name>`          | Read a property                           |
//! | `set <name>=<value>`  | Write a property                          |
//! | `press <name>`        | Invoke a button property                  |
//! | `colors`              | Show the generated colors                 |
//! | `sample <offset>`     | Sample the palette at an offset in [0, 1] |
//! | `index <i>`           | Color at a (clamped) index                |
//! | `randomize [seed]`    | New random palette, or one from `seed`    |
//! | `back` / `forward`    | Walk the seed history                     |
//! | `count <n>`           | Set the number of colors                  |
//! | `help`                | Show this table                           |
//! | `quit`                | Leave the host                            |
//!
//! Short aliases: `ls`, `g`, `s`, `p`, `r`, `b`, `f`, `?`, `q`.
//!
//! # Value literals
//!
//! [`parse_value`] reads literal text for a known target type:
//!
//! | Type            | Accepted                                  |
//! |-----------------|-------------------------------------------|
//! | bool            | `true` `false` `on` `off` `yes` `no` `1` `0` |
//! | int / float     | `12`, `-3`, `0.5`, `1e-3`                 |
//! | string          | bare text, or `"quoted text"`             |
//! | vectors         | `(0.1, 0.2, 0.3)` or `0.1, 0.2, 0.3`      |
//! | color           | `#ff8800`, `ff8800cc`, or `(r, g, b[, a])`|

use std::sync::LazyLock;

use cf_variant::{Color, Gradient, Value, VariantType, Vector2, Vector2i, Vector3, Vector3i, Vector4};
use regex::Regex;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed host command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `list` — show visible descriptors.
    List,
    /// `get <name>` — read a property.
    Get(String),
    /// `set <name>=<value>` — write a property. The value stays raw text
    /// until the host knows the target type.
    Set { name: String, value: String },
    /// `press <name>` — invoke a button.
    Press(String),
    /// `colors` — show the whole palette.
    Colors,
    /// `sample <offset>` — interpolated color at an offset.
    Sample(f32),
    /// `index <i>` — color at a clamped index.
    Index(i64),
    /// `randomize [seed]` — `None` draws a fresh seed.
    Randomize(Option<i64>),
    /// `back` — previous seed.
    Back,
    /// `forward` — next seed.
    Forward,
    /// `count <n>` — set the number of colors.
    Count(i64),
    /// `help` — list commands.
    Help,
    /// `quit` — leave the host.
    Quit,
    /// Blank line.
    Empty,
    /// Unknown command or malformed arguments. Holds the trimmed input for
    /// error reporting.
    Unknown(String),
}

/// Command synopses and descriptions, in the order `help` shows them.
pub const COMMANDS: &[(&str, &str)] = &[
    ("list", "show visible properties"),
    ("get <name>", "read a property"),
    ("set <name>=<value>", "write a property"),
    ("press <name>", "invoke a button property"),
    ("colors", "show the generated colors"),
    ("sample <offset>", "interpolated color at an offset in [0, 1]"),
    ("index <i>", "color at a clamped index"),
    ("randomize [seed]", "new palette from a fresh or given seed"),
    ("back", "previous seed"),
    ("forward", "next seed"),
    ("count <n>", "set the number of colors"),
    ("help", "show this list"),
    ("quit", "leave"),
];

/// Parse one input line into a [`Command`].
#[must_use]
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (cmd, arg) = trimmed
        .find(char::is_whitespace)
        .map_or((trimmed, ""), |pos| (&trimmed[..pos], trimmed[pos..].trim_start()));

    let unknown = || Command::Unknown(trimmed.to_string());

    match (cmd, arg.is_empty()) {
        ("list" | "ls", true) => Command::List,
        ("colors", true) => Command::Colors,
        ("back" | "b", true) => Command::Back,
        ("forward" | "f", true) => Command::Forward,
        ("help" | "?", true) => Command::Help,
        ("quit" | "q" | "exit", true) => Command::Quit,
        ("randomize" | "r", true) => Command::Randomize(None),
        ("randomize" | "r", false) => arg.parse().map_or_else(|_| unknown(), |s| Command::Randomize(Some(s))),
        ("get" | "g", false) => Command::Get(arg.to_string()),
        ("press" | "p", false) => Command::Press(arg.to_string()),
        ("set" | "s", false) => parse_assignment(arg).unwrap_or_else(unknown),
        ("sample", false) => arg
            .parse::<f32>()
            .ok()
            .filter(|offset| offset.is_finite())
            .map_or_else(unknown, Command::Sample),
        ("index", false) => arg.parse().map_or_else(|_| unknown(), Command::Index),
        ("count", false) => arg.parse().map_or_else(|_| unknown(), Command::Count),
        _ => unknown(),
    }
}

/// `name=value`, with optional spaces around `=`.
fn parse_assignment(arg: &str) -> Option<Command> {
    let (name, value) = arg.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Command::Set {
        name: name.to_string(),
        value: value.trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Value literals
// ---------------------------------------------------------------------------

/// A parenthesized or bare comma-separated list of numbers.
static NUMBER_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?\s*([-+0-9.eE]+(?:\s*,\s*[-+0-9.eE]+)*)\s*,?\s*\)?$").expect("NUMBER_LIST pattern is valid")
});

/// Parse literal `text` as a value of type `target`.
///
/// Returns `None` when the text does not read as that type, or when the
/// type has no literal form (objects, callables, packed arrays).
#[must_use]
pub fn parse_value(text: &str, target: VariantType) -> Option<Value> {
    let text = text.trim();
    match target {
        VariantType::Bool => parse_bool(text).map(Value::Bool),
        VariantType::Int => text.parse().ok().map(Value::Int),
        VariantType::Float => text.parse().ok().map(Value::Float),
        VariantType::String => Some(Value::String(unquote(text).to_string())),
        VariantType::Vector2 => match numbers(text)?.as_slice() {
            &[x, y] => Some(Value::Vector2(Vector2::new(x, y))),
            _ => None,
        },
        VariantType::Vector3 => match numbers(text)?.as_slice() {
            &[x, y, z] => Some(Value::Vector3(Vector3::new(x, y, z))),
            _ => None,
        },
        VariantType::Vector4 => match numbers(text)?.as_slice() {
            &[x, y, z, w] => Some(Value::Vector4(Vector4::new(x, y, z, w))),
            _ => None,
        },
        VariantType::Vector2i => match integers(text)?.as_slice() {
            &[x, y] => Some(Value::Vector2i(Vector2i::new(x, y))),
            _ => None,
        },
        VariantType::Vector3i => match integers(text)?.as_slice() {
            &[x, y, z] => Some(Value::Vector3i(Vector3i::new(x, y, z))),
            _ => None,
        },
        VariantType::Color => parse_color(text).map(Value::Color),
        _ => None,
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

fn numbers(text: &str) -> Option<Vec<f32>> {
    let caps = NUMBER_LIST.captures(text)?;
    caps[1].split(',').map(|n| n.trim().parse().ok()).collect()
}

fn integers(text: &str) -> Option<Vec<i32>> {
    let caps = NUMBER_LIST.captures(text)?;
    caps[1].split(',').map(|n| n.trim().parse().ok()).collect()
}

fn parse_color(text: &str) -> Option<Color> {
    if let Some(c) = Color::hex(text) {
        return Some(c);
    }
    match numbers(text)?.as_slice() {
        &[r, g, b] => Some(Color::rgb(r, g, b)),
        &[r, g, b, a] => Some(Color::rgba(r, g, b, a)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Human-readable rendering of a value for a host's output.
///
/// Floats and vector components are shown to four decimals; gradients are
/// summarized rather than dumped.
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Float(x) => format!("{x:.4}"),
        Value::Vector2(v) => format!("({:.4}, {:.4})", v.x, v.y),
        Value::Vector3(v) => format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z),
        Value::Vector4(v) => format!("({:.4}, {:.4}, {:.4}, {:.4})", v.x, v.y, v.z, v.w),
        Value::Color(c) => c.to_hex(),
        Value::Object(o) => o.downcast_ref::<Gradient>().map_or_else(
            || format!("<{}>", o.class()),
            |g| format!("<Gradient: {} stops>", g.len()),
        ),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
