use std::time::Duration;

use super::ProtocolError;
use crate::board::search::DEFAULT_DEPTH;
use crate::board::{GameConfig, SearchLimits};

/// Settings the driver applies to new games and searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverOptions {
    pub depth: u32,
    pub movetime: Option<Duration>,
    pub game: GameConfig,
}

impl Default for DriverOptions {
    fn default() -> Self {
        DriverOptions {
            depth: DEFAULT_DEPTH,
            movetime: None,
            game: GameConfig::default(),
        }
    }
}

impl DriverOptions {
    /// Limits for `go`, with per-command overrides such as `depth 4 movetime 200`.
    pub fn search_limits(&self, parts: &[&str]) -> Result<SearchLimits, ProtocolError> {
        let mut limits = SearchLimits {
            depth: self.depth,
            movetime: self.movetime,
        };
        let mut i = 1;
        while i < parts.len() {
            match parts[i] {
                "depth" => {
                    limits.depth = parse_value("depth", parts.get(i + 1).copied())?;
                    i += 2;
                }
                "movetime" => {
                    let ms: u64 = parse_value("movetime", parts.get(i + 1).copied())?;
                    limits.movetime = Some(Duration::from_millis(ms));
                    i += 2;
                }
                _ => i += 1,
            }
        }
        Ok(limits)
    }

    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Result<(), ProtocolError> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "depth" => {
                self.depth = parse_value::<u32>(name, value)?.max(1);
            }
            "movetime" => {
                let ms: u64 = parse_value(name, value)?;
                self.movetime = (ms > 0).then(|| Duration::from_millis(ms));
            }
            "drawplies" => {
                let plies: u32 = parse_value(name, value)?;
                self.game.draw_after_plies = (plies > 0).then_some(plies);
            }
            "repetitionlimit" => {
                let limit: u32 = parse_value(name, value)?;
                self.game.repetition_limit = (limit > 0).then_some(limit);
            }
            _ => {
                return Err(ProtocolError::UnknownOption {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, ProtocolError> {
    let value = value.ok_or(ProtocolError::MissingParts)?;
    value.trim().parse().map_err(|_| ProtocolError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.is_empty() || parts[0] != "setoption" {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some((name, value))
}
