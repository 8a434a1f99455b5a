//! Script language for headless runs.
//!
//! A script is a list of `kind:value` events separated by commas or newlines;
//! `#` starts a comment line. Kinds: `key`, `type`, `cmd`, `wait`, `resize`,
//! `snapshot`, `assert`.

use super::HeadlessState;
use crate::error::{Result, SkirmishError};
use crate::tui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

/// Key names accepted by `key:` besides single characters and `f1`..`f12`.
/// The first name of a code is the one printed back.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("tab", KeyCode::Tab),
    ("backspace", KeyCode::Backspace),
    ("bs", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("space", KeyCode::Char(' ')),
    ("backtick", KeyCode::Char('`')),
];

const MODIFIERS: &[(&str, KeyModifiers)] = &[
    ("ctrl", KeyModifiers::CONTROL),
    ("alt", KeyModifiers::ALT),
    ("shift", KeyModifiers::SHIFT),
];

fn config_error(msg: String) -> SkirmishError {
    SkirmishError::config(msg)
}

/// Comparison used by `assert:state:` with an ordering operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Ge,
    Le,
    Gt,
    Lt,
}

impl CompareOp {
    /// Longest operators first so `>=` is not read as `>`.
    const ALL: [(&'static str, CompareOp); 4] = [
        (">=", CompareOp::Ge),
        ("<=", CompareOp::Le),
        (">", CompareOp::Gt),
        ("<", CompareOp::Lt),
    ];

    fn symbol(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, op)| *op == self)
            .map_or("?", |(symbol, _)| symbol)
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Ge => ordering != Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Assertion {
    /// Screen contains text, ignoring case.
    Contains(String),
    /// Screen contains text exactly.
    ContainsExact(String),
    NotContains(String),
    /// Screen matches a regex.
    Matches(String),
    /// A state field has this value.
    StateEquals { field: String, value: String },
    /// A numeric state field compares to a number.
    StateCompare {
        field: String,
        op: CompareOp,
        value: i64,
    },
}

impl Assertion {
    pub fn check(&self, screen: &str, app: &App) -> bool {
        match self {
            Self::Contains(text) => screen.to_lowercase().contains(&text.to_lowercase()),
            Self::ContainsExact(text) => screen.contains(text.as_str()),
            Self::NotContains(text) => !screen.to_lowercase().contains(&text.to_lowercase()),
            Self::Matches(pattern) => {
                regex::Regex::new(pattern).is_ok_and(|re| re.is_match(screen))
            }
            Self::StateEquals { field, value } => {
                HeadlessState::from_app(app).field(field).as_deref() == Some(value.as_str())
            }
            Self::StateCompare { field, op, value } => HeadlessState::from_app(app)
                .field(field)
                .and_then(|actual| actual.parse::<i64>().ok())
                .is_some_and(|actual| op.holds(actual.cmp(value))),
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains(t) => write!(f, "contains:{t}"),
            Self::ContainsExact(t) => write!(f, "contains-exact:{t}"),
            Self::NotContains(t) => write!(f, "not-contains:{t}"),
            Self::Matches(p) => write!(f, "matches:{p}"),
            Self::StateEquals { field, value } => write!(f, "state:{field}={value}"),
            Self::StateCompare { field, op, value } => {
                write!(f, "state:{field}{}{value}", op.symbol())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    /// Text inserted into the console input as-is.
    Type(String),
    /// A console line, submitted with the console opened.
    Command(String),
    Wait(Duration),
    Resize(u16, u16),
    /// Named marker; the frame after it is captured like any other.
    Snapshot(String),
    Assert(Assertion),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => {
                f.write_str("key:")?;
                for (name, modifier) in MODIFIERS {
                    if key.modifiers.contains(*modifier) {
                        write!(f, "{name}+")?;
                    }
                }
                f.write_str(&key_name(key.code))
            }
            Self::Type(text) => write!(f, "type:{text}"),
            Self::Command(line) => write!(f, "cmd:{line}"),
            Self::Wait(d) => write!(f, "wait:{}ms", d.as_millis()),
            Self::Resize(w, h) => write!(f, "resize:{w}x{h}"),
            Self::Snapshot(name) => write!(f, "snapshot:{name}"),
            Self::Assert(a) => write!(f, "assert:{a}"),
        }
    }
}

fn key_name(code: KeyCode) -> String {
    if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, c)| *c == code) {
        return (*name).to_string();
    }
    match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => "unknown".to_string(),
    }
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    let lower = s.to_lowercase();

    if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| *name == lower) {
        return Ok(*code);
    }
    if let Some(n) = lower
        .strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=12).contains(n))
    {
        return Ok(KeyCode::F(n));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(KeyCode::Char(c)),
        _ => Err(config_error(format!(
            "Unknown key: '{s}'. Use a single character, f1-f12 or a named key like enter, esc, tab"
        ))),
    }
}

fn parse_duration(value: &str) -> Result<Duration> {
    let value = value.to_lowercase();
    let invalid = || config_error(format!("Invalid duration: '{value}'"));

    let (number, scale) = if let Some(ms) = value.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(secs) = value.strip_suffix('s') {
        (secs, 1000)
    } else {
        (value.as_str(), 1)
    };
    let millis: u64 = number.trim().parse().map_err(|_| invalid())?;
    Ok(Duration::from_millis(millis * scale))
}

fn parse_size(value: &str) -> Result<(u16, u16)> {
    let (w, h) = value.split_once('x').ok_or_else(|| {
        config_error(format!("Invalid resize format: '{value}'. Expected WIDTHxHEIGHT"))
    })?;
    let w = w
        .parse()
        .map_err(|_| config_error(format!("Invalid width: '{w}'")))?;
    let h = h
        .parse()
        .map_err(|_| config_error(format!("Invalid height: '{h}'")))?;
    Ok((w, h))
}

fn parse_state_assertion(value: &str) -> Result<Assertion> {
    let invalid = || {
        config_error(format!(
            "Invalid state assertion: '{value}'. Expected field=value or field>=number"
        ))
    };
    let split = value.find(['<', '>', '=']).ok_or_else(invalid)?;
    let field = value[..split].trim().to_string();
    let rest = &value[split..];

    if let Some(expected) = rest.strip_prefix("==").or_else(|| rest.strip_prefix('=')) {
        return Ok(Assertion::StateEquals {
            field,
            value: expected.trim().to_string(),
        });
    }

    let (symbol, op) = CompareOp::ALL
        .into_iter()
        .find(|(symbol, _)| rest.starts_with(symbol))
        .ok_or_else(invalid)?;
    let expected = rest[symbol.len()..].trim();
    let number = expected.parse().map_err(|_| {
        config_error(format!("State comparison needs a number, got '{expected}'"))
    })?;
    Ok(Assertion::StateCompare {
        field,
        op,
        value: number,
    })
}

#[derive(Debug, Default)]
pub struct EventParser;

impl EventParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a whole script.
    pub fn parse_all(&self, input: &str) -> Result<Vec<Event>> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| self.parse_one(part))
            .collect()
    }

    pub fn parse_one(&self, input: &str) -> Result<Event> {
        let input = input.trim();
        let (kind, value) = input.split_once(':').ok_or_else(|| {
            config_error(format!(
                "Invalid event syntax: '{input}'. Expected format: kind:value"
            ))
        })?;
        let value = value.trim();

        match kind.trim().to_lowercase().as_str() {
            "key" => self.parse_key(value),
            "type" => Ok(Event::Type(value.to_string())),
            "cmd" => Ok(Event::Command(value.to_string())),
            "wait" => parse_duration(value).map(Event::Wait),
            "resize" => parse_size(value).map(|(w, h)| Event::Resize(w, h)),
            "snapshot" => Ok(Event::Snapshot(value.to_string())),
            "assert" => self.parse_assert(value).map(Event::Assert),
            other => Err(config_error(format!(
                "Unknown event type: '{other}'. Valid types: key, type, cmd, wait, resize, snapshot, assert"
            ))),
        }
    }

    /// `enter`, `ctrl+c`, `shift+tab`.
    fn parse_key(&self, value: &str) -> Result<Event> {
        let (prefix, key) = match value.rsplit_once('+') {
            Some((prefix, key)) if !key.is_empty() => (Some(prefix), key),
            _ => (None, value),
        };

        let mut modifiers = KeyModifiers::empty();
        for name in prefix.into_iter().flat_map(|p| p.split('+')) {
            let lower = name.to_lowercase();
            let lower = if lower == "control" { "ctrl".to_string() } else { lower };
            let (_, modifier) = MODIFIERS
                .iter()
                .find(|(n, _)| *n == lower)
                .ok_or_else(|| {
                    config_error(format!(
                        "Unknown modifier: '{name}'. Valid modifiers: ctrl, alt, shift"
                    ))
                })?;
            modifiers |= *modifier;
        }

        Ok(Event::Key(KeyEvent::new(parse_key_code(key)?, modifiers)))
    }

    fn parse_assert(&self, value: &str) -> Result<Assertion> {
        let (kind, rest) = value.split_once(':').ok_or_else(|| {
            config_error(format!(
                "Invalid assertion syntax: '{value}'. Expected assert:kind:value"
            ))
        })?;
        let rest = rest.trim().to_string();

        match kind.trim().to_lowercase().as_str() {
            "contains" => Ok(Assertion::Contains(rest)),
            "contains-exact" => Ok(Assertion::ContainsExact(rest)),
            "not-contains" => Ok(Assertion::NotContains(rest)),
            "matches" => Ok(Assertion::Matches(rest)),
            "state" => parse_state_assertion(&rest),
            other => Err(config_error(format!(
                "Unknown assertion type: '{other}'. Valid types: contains, contains-exact, not-contains, matches, state"
            ))),
        }
    }
}
