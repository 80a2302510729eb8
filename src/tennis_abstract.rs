//! Historical player rosters from Tennis Abstract CSV dumps.
//!
//! Expected columns: id, first name, last name, hand, birthdate, country
//! code. Extra trailing columns are ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hand {
    Right,
    Left,
    Unknown,
}

impl Hand {
    /// "R", "L" or anything else for unknown.
    pub fn from_code(code: &str) -> Self {
        match code {
            "R" => Self::Right,
            "L" => Self::Left,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    pub hand: Hand,
    pub birthdate: Option<NaiveDate>,
    pub country_code: String,
}

impl Player {
    pub fn fullname(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fullname(), self.country_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tour {
    Atp,
    Wta,
}

impl Tour {
    pub fn code(self) -> &'static str {
        match self {
            Self::Atp => "atp",
            Self::Wta => "wta",
        }
    }

    /// `{dir}/atp/atp_players.csv` or the WTA equivalent.
    pub fn players_file(self, dir: &Path) -> PathBuf {
        dir.join(self.code()).join(format!("{}_players.csv", self.code()))
    }
}

/// Birthdates are full dates, except where only the year or month is known.
/// Unknown parts show up as zeros ("19850000") or are cut off ("198504").
pub fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() == 10 {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.len() == 8 {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y%m%d") {
            return Some(date);
        }
    }

    let number = |s: &str| s.parse::<u32>().ok();
    match raw.len() {
        8 => number(&raw[..4]).and_then(|y| NaiveDate::from_ymd_opt(y as i32, 1, 1)),
        6 => {
            let (y, m) = (number(&raw[..4])?, number(&raw[4..])?);
            NaiveDate::from_ymd_opt(y as i32, m, 1)
        }
        _ => None,
    }
}

pub fn parse_player_line(line: &str) -> Result<Player> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 6 {
        return Err(Error::InsufficientData(format!(
            "expected at least 6 CSV columns, got {}",
            fields.len()
        )));
    }

    let id = fields[0]
        .parse()
        .map_err(|_| Error::InvalidData(format!("invalid player id: {:?}", fields[0])))?;

    Ok(Player {
        id,
        firstname: fields[1].to_string(),
        lastname: fields[2].to_string(),
        hand: Hand::from_code(fields[3]),
        birthdate: parse_birthdate(fields[4]),
        country_code: fields[5].to_string(),
    })
}

/// Load every player from a roster file, skipping a header row and
/// malformed lines.
pub fn load_players(path: &Path) -> Result<Vec<Player>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let mut players = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_player_line(line) {
            Ok(player) => players.push(player),
            Err(_) if i == 0 => {
                tracing::debug!(path = %path.display(), "Skipping header line");
            }
            Err(e) => {
                tracing::warn!(line = i + 1, error = %e, "Skipping malformed CSV line");
            }
        }
    }

    tracing::info!(path = %path.display(), count = players.len(), "Players loaded");
    Ok(players)
}

pub fn players(dir: &Path, tour: Tour) -> Result<Vec<Player>> {
    load_players(&tour.players_file(dir))
}

pub fn atp_players(dir: &Path) -> Result<Vec<Player>> {
    players(dir, Tour::Atp)
}

pub fn wta_players(dir: &Path) -> Result<Vec<Player>> {
    players(dir, Tour::Wta)
}
