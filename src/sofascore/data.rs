//! SofaScore tennis enums and value types.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ground {
    Clay,
    Grass,
    HardcourtOutdoor,
    HardcourtIndoor,
    SyntheticGrass,
}

impl Ground {
    pub const ALL: [Ground; 5] = [
        Ground::Clay,
        Ground::Grass,
        Ground::HardcourtOutdoor,
        Ground::HardcourtIndoor,
        Ground::SyntheticGrass,
    ];

    /// SofaScore's `groundType` text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clay => "Clay",
            Self::Grass => "Grass",
            Self::HardcourtOutdoor => "Hardcourt outdoor",
            Self::HardcourtIndoor => "Hardcourt indoor",
            Self::SyntheticGrass => "Synthetic grass",
        }
    }

    pub fn from_ground_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Wta,
    Atp,
    Challenger,
    Exhibition,
    ItfMen,
    ItfWomen,
    DavisCup,
    Juniors,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Wta,
        Category::Atp,
        Category::Challenger,
        Category::Exhibition,
        Category::ItfMen,
        Category::ItfWomen,
        Category::DavisCup,
        Category::Juniors,
    ];

    /// SofaScore's category slug.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Wta => "wta",
            Self::Atp => "atp",
            Self::Challenger => "challenger",
            Self::Exhibition => "exhibition",
            Self::ItfMen => "itf-men",
            Self::ItfWomen => "itf-women",
            Self::DavisCup => "davis-cup",
            Self::Juniors => "juniors",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// `None` for absent or empty data, error for anything but "M"/"F".
    pub fn from_code(code: Option<&str>) -> Result<Option<Self>> {
        match code {
            None | Some("") => Ok(None),
            Some("M") => Ok(Some(Self::Male)),
            Some("F") => Ok(Some(Self::Female)),
            Some(other) => Err(Error::InvalidData(format!("invalid gender code {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }

    /// SofaScore encodes sides as 1 (home) and 2 (away).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Home),
            2 => Some(Self::Away),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "HOME"),
            Self::Away => write!(f, "AWAY"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    MixedDoubles,
    Singles,
    Doubles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Retired,
    Ended,
    Canceled,
    CoverageCanceled,
    Walkover,
    Warning,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Retired,
        Status::Ended,
        Status::Canceled,
        Status::CoverageCanceled,
        Status::Walkover,
        Status::Warning,
    ];

    /// SofaScore's `status.description` text.
    pub fn description(self) -> &'static str {
        match self {
            Self::Retired => "Retired",
            Self::Ended => "Ended",
            Self::Canceled => "Canceled",
            Self::CoverageCanceled => "Coverage canceled",
            Self::Walkover => "Walkover",
            Self::Warning => "Warning",
        }
    }

    pub fn from_description(description: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.description() == description)
    }

    /// Statuses whose events carry no usable result.
    pub fn is_canceled(self) -> bool {
        matches!(self, Self::Canceled | Self::CoverageCanceled | Self::Warning)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tournament {
    pub name: String,
    pub altname: String,
    pub category: Category,
    /// `userCount`, probably the number of followers on SofaScore.
    pub popularity: u64,
    pub ssid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contender {
    pub name: String,
    /// `userCount`, probably the number of followers on SofaScore.
    pub popularity: u64,
    pub slug: String,
    pub ssid: u64,
    pub is_winner: bool,
    pub side: Side,
    pub gender: Option<Gender>,
    pub ranking: Option<u32>,
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Games won by each side in a single set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetScore {
    pub home: u32,
    pub away: u32,
    pub home_tiebreak: Option<u32>,
    pub away_tiebreak: Option<u32>,
}

impl SetScore {
    /// Build a set score from possibly-missing fields.
    ///
    /// Returns `Ok(None)` for a set that was never played. Tiebreak points
    /// are only valid next to a main score of 6 or 7.
    pub fn new(
        home: Option<u32>,
        away: Option<u32>,
        home_tiebreak: Option<u32>,
        away_tiebreak: Option<u32>,
    ) -> Result<Option<Self>> {
        let (Some(home), Some(away)) = (home, away) else {
            if home_tiebreak.is_some() || away_tiebreak.is_some() {
                return Err(Error::InvalidData(
                    "main scores missing while tiebreaks are present".to_string(),
                ));
            }
            return Ok(None);
        };

        let tiebreak_ok = |tiebreak: Option<u32>, score: u32| tiebreak.is_none() || matches!(score, 6 | 7);
        if !tiebreak_ok(home_tiebreak, home) || !tiebreak_ok(away_tiebreak, away) {
            return Err(Error::InvalidData(format!(
                "home tiebreak: {home_tiebreak:?}, home score: {home}, away tiebreak: {away_tiebreak:?}, away score: {away}"
            )));
        }

        Ok(Some(Self {
            home,
            away,
            home_tiebreak,
            away_tiebreak,
        }))
    }

    /// `None` on a level set, which happens in retired matches.
    pub fn winner(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<Side> {
        self.winner().map(Side::opposite)
    }
}

pub const MAX_SETS: usize = 5;

/// Set-by-set score of a match, one to five sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    sets: Vec<SetScore>,
}

impl Score {
    pub fn new(sets: Vec<SetScore>) -> Result<Self> {
        if sets.is_empty() {
            return Err(Error::InsufficientData("no set scores".to_string()));
        }
        if sets.len() > MAX_SETS {
            return Err(Error::InvalidData(format!("{} sets in one match", sets.len())));
        }
        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[SetScore] {
        &self.sets
    }

    /// Set number `n`, counting from 1.
    pub fn set(&self, n: usize) -> Option<&SetScore> {
        n.checked_sub(1).and_then(|i| self.sets.get(i))
    }

    /// Side that won more sets. In retired matches this may differ from the
    /// match winner, and may be `None`.
    pub fn winner(&self) -> Option<Side> {
        let home = self.sets.iter().filter(|s| s.winner() == Some(Side::Home)).count();
        let away = self.sets.iter().filter(|s| s.winner() == Some(Side::Away)).count();
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<Side> {
        self.winner().map(Side::opposite)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets: Vec<String> = self
            .sets
            .iter()
            .map(|s| match (s.home_tiebreak, s.away_tiebreak) {
                (Some(h), Some(a)) => format!("{}-{}({h}-{a})", s.home, s.away),
                _ => format!("{}-{}", s.home, s.away),
            })
            .collect();
        f.write_str(&sets.join(" "))
    }
}

/// Start time and per-set durations.
///
/// Set durations are often missing from SofaScore data. Missing or zero
/// durations are dropped and the rest keep their order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Time {
    pub timestamp: DateTime<Utc>,
    sets: Vec<Duration>,
}

impl Time {
    pub fn new(start_timestamp: i64, set_seconds: &[Option<u64>]) -> Result<Self> {
        let timestamp = DateTime::from_timestamp(start_timestamp, 0)
            .ok_or_else(|| Error::InvalidData(format!("start timestamp out of range: {start_timestamp}")))?;
        let sets = set_seconds
            .iter()
            .flatten()
            .filter(|secs| **secs > 0)
            .map(|secs| Duration::from_secs(*secs))
            .collect();
        Ok(Self { timestamp, sets })
    }

    pub fn set_times(&self) -> &[Duration] {
        &self.sets
    }

    /// Duration of the `n`th recorded set, counting from 1.
    pub fn set(&self, n: usize) -> Option<Duration> {
        n.checked_sub(1).and_then(|i| self.sets.get(i)).copied()
    }

    pub fn total(&self) -> Duration {
        self.sets.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(home: u32, away: u32) -> SetScore {
        SetScore::new(Some(home), Some(away), None, None).unwrap().unwrap()
    }

    #[test]
    fn test_enum_lookups() {
        assert_eq!(Ground::from_ground_type("Hardcourt indoor"), Some(Ground::HardcourtIndoor));
        assert_eq!(Ground::from_ground_type("Carpet"), None);
        assert_eq!(Category::from_slug("itf-women"), Some(Category::ItfWomen));
        assert_eq!(Category::from_slug("nba"), None);
        assert_eq!(Status::from_description("Coverage canceled"), Some(Status::CoverageCanceled));
        assert!(Status::Warning.is_canceled());
        assert!(!Status::Walkover.is_canceled());
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code(Some("F")).unwrap(), Some(Gender::Female));
        assert_eq!(Gender::from_code(Some("")).unwrap(), None);
        assert_eq!(Gender::from_code(None).unwrap(), None);
        assert!(Gender::from_code(Some("X")).is_err());
    }

    #[test]
    fn test_set_score_unplayed() {
        assert_eq!(SetScore::new(None, None, None, None).unwrap(), None);
        assert!(SetScore::new(None, Some(3), Some(7), None).is_err());
    }

    #[test]
    fn test_set_score_tiebreak_needs_six_or_seven() {
        assert!(SetScore::new(Some(7), Some(6), Some(7), Some(5)).unwrap().is_some());
        assert!(SetScore::new(Some(6), Some(7), Some(3), Some(7)).unwrap().is_some());
        assert!(SetScore::new(Some(5), Some(7), Some(3), None).is_err());
        assert!(SetScore::new(Some(7), Some(4), None, Some(2)).is_err());
    }

    #[test]
    fn test_set_winner_and_loser() {
        assert_eq!(set(6, 3).winner(), Some(Side::Home));
        assert_eq!(set(6, 3).loser(), Some(Side::Away));
        assert_eq!(set(2, 2).winner(), None);
        assert_eq!(set(2, 2).loser(), None);
    }

    #[test]
    fn test_score_bounds() {
        assert!(matches!(Score::new(vec![]), Err(Error::InsufficientData(_))));
        assert!(Score::new(vec![set(6, 0); 6]).is_err());
        assert!(Score::new(vec![set(6, 0); 5]).is_ok());
    }

    #[test]
    fn test_score_winner_counts_sets() {
        let score = Score::new(vec![set(4, 6), set(6, 3), set(7, 5)]).unwrap();
        assert_eq!(score.winner(), Some(Side::Home));
        assert_eq!(score.loser(), Some(Side::Away));
        assert_eq!(score.set(1), Some(&set(4, 6)));
        assert_eq!(score.set(0), None);
        assert_eq!(score.set(4), None);

        // retired in the second set
        let retired = Score::new(vec![set(6, 4), set(1, 3)]).unwrap();
        assert_eq!(retired.winner(), None);
    }

    #[test]
    fn test_score_display() {
        let tb = SetScore::new(Some(7), Some(6), Some(7), Some(4)).unwrap().unwrap();
        let score = Score::new(vec![set(6, 2), tb]).unwrap();
        assert_eq!(score.to_string(), "6-2 7-6(7-4)");
    }

    #[test]
    fn test_time_compacts_missing_sets() {
        let time = Time::new(1_631_880_000, &[Some(2400), None, Some(0), Some(1800), None]).unwrap();
        assert_eq!(time.timestamp.to_rfc3339(), "2021-09-17T12:00:00+00:00");
        assert_eq!(time.set(1), Some(Duration::from_secs(2400)));
        assert_eq!(time.set(2), Some(Duration::from_secs(1800)));
        assert_eq!(time.set(3), None);
        assert_eq!(time.total(), Duration::from_secs(4200));
    }
}
