//! Tennis match parsing from SofaScore event JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::sofascore::data::{
    Category, Contender, Gender, Ground, MatchType, Score, SetScore, Side, Status, Time, Tournament,
};

/// A finished tennis match as reported by SofaScore.
///
/// Only "Ended" and "Retired" events parse; prune canceled ones first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub status: Status,
    /// SofaScore's `customId`.
    pub ssid: String,
    pub tournament: Tournament,
    pub round: Option<String>,
    pub first_to_serve: Option<Side>,
    pub score: Score,
    pub winner: Side,
    /// Second contender is the doubles partner.
    pub home_contenders: (Contender, Option<Contender>),
    pub away_contenders: (Contender, Option<Contender>),
    pub time: Time,
    pub ground: Option<Ground>,
}

impl Match {
    pub fn from_json(value: &Value) -> Result<Self> {
        let event = RawEvent::deserialize(value)?;
        Self::from_event(&event)
    }

    fn from_event(event: &RawEvent) -> Result<Self> {
        let status = match Status::from_description(&event.status.description) {
            Some(status @ (Status::Ended | Status::Retired)) => status,
            _ => {
                return Err(Error::InvalidData(format!(
                    "event {} has status {:?}",
                    event.custom_id, event.status.description
                )))
            }
        };

        let winner = event
            .winner_code
            .and_then(Side::from_code)
            .ok_or_else(|| {
                Error::InvalidData(format!(
                    "event {} has winner code {:?}",
                    event.custom_id, event.winner_code
                ))
            })?;

        Ok(Self {
            status,
            ssid: event.custom_id.clone(),
            tournament: convert_tournament(&event.tournament)?,
            round: event.round_info.as_ref().and_then(|r| r.name.clone()),
            first_to_serve: event.first_to_serve.and_then(Side::from_code),
            score: convert_score(&event.home_score, &event.away_score)?,
            winner,
            home_contenders: convert_contenders(&event.home_team, Side::Home, winner)?,
            away_contenders: convert_contenders(&event.away_team, Side::Away, winner)?,
            time: Time::new(event.start_timestamp, &event.time.periods())?,
            ground: event.ground_type.as_deref().and_then(Ground::from_ground_type),
        })
    }

    pub fn home_contender(&self) -> &Contender {
        &self.home_contenders.0
    }

    pub fn away_contender(&self) -> &Contender {
        &self.away_contenders.0
    }

    pub fn contenders(&self) -> impl Iterator<Item = &Contender> {
        [
            Some(&self.home_contenders.0),
            self.home_contenders.1.as_ref(),
            Some(&self.away_contenders.0),
            self.away_contenders.1.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn match_type(&self) -> MatchType {
        let (first, second) = &self.home_contenders;
        match second {
            Some(partner) => match (first.gender, partner.gender) {
                (Some(a), Some(b)) if a != b => MatchType::MixedDoubles,
                _ => MatchType::Doubles,
            },
            None => MatchType::Singles,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |contenders: &(Contender, Option<Contender>)| match &contenders.1 {
            Some(partner) => format!("{}/{}", contenders.0, partner),
            None => contenders.0.to_string(),
        };
        write!(
            f,
            "{} [{}] {} vs {}: {}",
            self.tournament.name,
            self.round.as_deref().unwrap_or("-"),
            side(&self.home_contenders),
            side(&self.away_contenders),
            self.score
        )?;
        if self.status == Status::Retired {
            write!(f, " ret.")?;
        }
        Ok(())
    }
}

/// Parse every event, skipping the ones that don't make a valid match.
pub fn parse_matches(events: &[Value]) -> Vec<Match> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match Match::from_json(event) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(index = i, error = %e, "Skipping unparseable event");
                None
            }
        })
        .collect()
}

fn convert_tournament(raw: &RawTournament) -> Result<Tournament> {
    let category = Category::from_slug(&raw.category.slug).ok_or_else(|| {
        Error::InvalidData(format!("unknown tournament category {:?}", raw.category.slug))
    })?;

    Ok(Tournament {
        name: raw.name.clone(),
        altname: raw.unique_tournament.name.clone(),
        category,
        popularity: raw.unique_tournament.user_count,
        ssid: raw.category.id,
    })
}

fn convert_score(home: &RawScore, away: &RawScore) -> Result<Score> {
    let home_games = home.periods();
    let home_tiebreaks = home.tiebreaks();
    let away_games = away.periods();
    let away_tiebreaks = away.tiebreaks();

    let mut sets = Vec::new();
    for i in 0..home_games.len() {
        if let Some(set) = SetScore::new(home_games[i], away_games[i], home_tiebreaks[i], away_tiebreaks[i])? {
            sets.push(set);
        }
    }
    Score::new(sets)
}

fn convert_contenders(team: &RawTeam, side: Side, winner: Side) -> Result<(Contender, Option<Contender>)> {
    match team.sub_teams.as_slice() {
        [] => Ok((convert_contender(&team.player()?, side, winner)?, None)),
        [first, second] => Ok((
            convert_contender(first, side, winner)?,
            Some(convert_contender(second, side, winner)?),
        )),
        other => Err(Error::InvalidData(format!(
            "team {} has {} sub-teams",
            team.name.as_deref().unwrap_or("<unnamed>"),
            other.len()
        ))),
    }
}

fn convert_contender(player: &RawPlayer, side: Side, winner: Side) -> Result<Contender> {
    Ok(Contender {
        name: player.name.clone(),
        popularity: player.user_count,
        slug: player.slug.clone(),
        ssid: player.id,
        is_winner: side == winner,
        side,
        gender: Gender::from_code(player.gender.as_deref())?,
        ranking: player.ranking,
    })
}

// --- SofaScore event JSON ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    status: RawStatus,
    custom_id: String,
    tournament: RawTournament,
    round_info: Option<RawRoundInfo>,
    first_to_serve: Option<i64>,
    home_score: RawScore,
    away_score: RawScore,
    winner_code: Option<i64>,
    home_team: RawTeam,
    away_team: RawTeam,
    time: RawTime,
    start_timestamp: i64,
    ground_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTournament {
    name: String,
    unique_tournament: RawUniqueTournament,
    category: RawCategory,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUniqueTournament {
    name: String,
    user_count: u64,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    slug: String,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RawRoundInfo {
    name: Option<String>,
}

/// `period{n}` games and `period{n}TieBreak` points, n = 1..=5.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScore {
    period1: Option<u32>,
    period2: Option<u32>,
    period3: Option<u32>,
    period4: Option<u32>,
    period5: Option<u32>,
    period1_tie_break: Option<u32>,
    period2_tie_break: Option<u32>,
    period3_tie_break: Option<u32>,
    period4_tie_break: Option<u32>,
    period5_tie_break: Option<u32>,
}

impl RawScore {
    fn periods(&self) -> [Option<u32>; 5] {
        [self.period1, self.period2, self.period3, self.period4, self.period5]
    }

    fn tiebreaks(&self) -> [Option<u32>; 5] {
        [
            self.period1_tie_break,
            self.period2_tie_break,
            self.period3_tie_break,
            self.period4_tie_break,
            self.period5_tie_break,
        ]
    }
}

/// A home or away team. Doubles pairs only carry their players in
/// `subTeams`, so the player fields are optional here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTeam {
    name: Option<String>,
    slug: Option<String>,
    id: Option<u64>,
    user_count: Option<u64>,
    gender: Option<String>,
    ranking: Option<u32>,
    #[serde(default)]
    sub_teams: Vec<RawPlayer>,
}

impl RawTeam {
    /// The team as a single player, for singles events.
    fn player(&self) -> Result<RawPlayer> {
        let missing = |field: &str| Error::InvalidData(format!("singles team is missing {field:?}"));
        Ok(RawPlayer {
            name: self.name.clone().ok_or_else(|| missing("name"))?,
            slug: self.slug.clone().ok_or_else(|| missing("slug"))?,
            id: self.id.ok_or_else(|| missing("id"))?,
            user_count: self.user_count.ok_or_else(|| missing("userCount"))?,
            gender: self.gender.clone(),
            ranking: self.ranking,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayer {
    name: String,
    slug: String,
    id: u64,
    user_count: u64,
    gender: Option<String>,
    ranking: Option<u32>,
}

/// Set durations in seconds.
#[derive(Debug, Deserialize)]
struct RawTime {
    period1: Option<u64>,
    period2: Option<u64>,
    period3: Option<u64>,
    period4: Option<u64>,
    period5: Option<u64>,
}

impl RawTime {
    fn periods(&self) -> [Option<u64>; 5] {
        [self.period1, self.period2, self.period3, self.period4, self.period5]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(name: &str, slug: &str, id: u64, gender: &str) -> Value {
        json!({
            "name": name,
            "slug": slug,
            "id": id,
            "userCount": 1200,
            "gender": gender,
            "ranking": 4,
            "subTeams": []
        })
    }

    fn singles_event() -> Value {
        json!({
            "status": {"code": 100, "description": "Ended", "type": "finished"},
            "customId": "ZdEsYVc",
            "tournament": {
                "name": "US Open, New York, USA",
                "category": {"name": "WTA", "slug": "wta", "id": 6},
                "uniqueTournament": {"name": "US Open", "userCount": 51234}
            },
            "roundInfo": {"round": 27, "name": "Round of 16"},
            "firstToServe": 2,
            "homeScore": {"current": 1, "period1": 6, "period2": 3, "period3": 4,
                          "period1TieBreak": null},
            "awayScore": {"current": 2, "period1": 3, "period2": 6, "period3": 6},
            "winnerCode": 2,
            "homeTeam": player("Świątek I.", "swiatek-iga", 228272, "F"),
            "awayTeam": player("Belinda Bencic", "bencic-belinda", 44519, "F"),
            "time": {"period1": 2460, "period2": 2100, "period3": 2880, "currentPeriodStartTimestamp": 1631040000},
            "startTimestamp": 1631030000,
            "groundType": "Hardcourt outdoor"
        })
    }

    #[test]
    fn test_parse_singles_match() {
        let m = Match::from_json(&singles_event()).unwrap();
        assert_eq!(m.status, Status::Ended);
        assert_eq!(m.ssid, "ZdEsYVc");
        assert_eq!(m.tournament.category, Category::Wta);
        assert_eq!(m.tournament.altname, "US Open");
        assert_eq!(m.tournament.popularity, 51234);
        assert_eq!(m.tournament.ssid, 6);
        assert_eq!(m.round.as_deref(), Some("Round of 16"));
        assert_eq!(m.first_to_serve, Some(Side::Away));
        assert_eq!(m.winner, Side::Away);
        assert_eq!(m.score.sets().len(), 3);
        assert_eq!(m.score.winner(), Some(Side::Away));
        assert_eq!(m.ground, Some(Ground::HardcourtOutdoor));
        assert_eq!(m.match_type(), MatchType::Singles);
        assert_eq!(m.time.set_times().len(), 3);

        let home = m.home_contender();
        assert_eq!(home.slug, "swiatek-iga");
        assert_eq!(home.side, Side::Home);
        assert!(!home.is_winner);
        assert!(m.away_contender().is_winner);
        assert_eq!(m.contenders().count(), 2);
    }

    #[test]
    fn test_parse_tiebreak_and_missing_optionals() {
        let mut event = singles_event();
        event["homeScore"] = json!({"period1": 7, "period2": 6, "period2TieBreak": 5});
        event["awayScore"] = json!({"period1": 5, "period2": 7, "period2TieBreak": 7});
        event["winnerCode"] = json!(1);
        event["status"]["description"] = json!("Retired");
        event["time"] = json!({});
        let obj = event.as_object_mut().unwrap();
        obj.remove("roundInfo");
        obj.remove("firstToServe");
        obj.remove("groundType");

        let m = Match::from_json(&event).unwrap();
        assert_eq!(m.status, Status::Retired);
        assert_eq!(m.round, None);
        assert_eq!(m.first_to_serve, None);
        assert_eq!(m.ground, None);
        assert_eq!(m.score.set(2).unwrap().away_tiebreak, Some(7));
        // retired after a set apiece: no winner by sets, yet home won
        assert_eq!(m.score.winner(), None);
        assert_eq!(m.winner, Side::Home);
        assert!(m.time.set_times().is_empty());
        assert!(m.to_string().ends_with("ret."));
    }

    #[test]
    fn test_parse_doubles() {
        let mut event = singles_event();
        event["homeTeam"] = json!({
            "name": "Świątek I. / Kubka M.", "slug": "swiatek-kubka", "id": 1, "userCount": 10,
            "subTeams": [
                player("Iga Świątek", "swiatek-iga", 228272, "F"),
                player("Martyna Kubka", "kubka-martyna", 294815, "F")
            ]
        });
        let m = Match::from_json(&event).unwrap();
        assert_eq!(m.match_type(), MatchType::Doubles);
        assert_eq!(m.home_contenders.1.as_ref().unwrap().slug, "kubka-martyna");
        assert_eq!(m.contenders().count(), 3);

        event["homeTeam"]["subTeams"][1]["gender"] = json!("M");
        let m = Match::from_json(&event).unwrap();
        assert_eq!(m.match_type(), MatchType::MixedDoubles);

        // unknown partner gender is plain doubles
        event["homeTeam"]["subTeams"][1]["gender"] = json!(null);
        let m = Match::from_json(&event).unwrap();
        assert_eq!(m.match_type(), MatchType::Doubles);
    }

    #[test]
    fn test_parse_doubles_pair_without_own_fields() {
        let mut event = singles_event();
        event["awayTeam"] = json!({
            "name": "Kenin S. / Mattek-Sands B.",
            "subTeams": [
                player("Sofia Kenin", "kenin-sofia", 111, "F"),
                player("Bethanie Mattek-Sands", "mattek-sands-bethanie", 222, "F")
            ]
        });
        let m = Match::from_json(&event).unwrap();
        assert_eq!(m.away_contender().slug, "kenin-sofia");
        assert_eq!(m.away_contenders.1.as_ref().unwrap().ssid, 222);
        assert_eq!(m.contenders().count(), 3);
    }

    #[test]
    fn test_rejects_singles_team_without_player_fields() {
        let mut event = singles_event();
        event["awayTeam"] = json!({"name": "Nobody", "subTeams": []});
        assert!(matches!(Match::from_json(&event), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_rejects_bad_sub_teams() {
        let mut event = singles_event();
        event["awayTeam"]["subTeams"] = json!([player("Solo", "solo", 5, "F")]);
        assert!(matches!(Match::from_json(&event), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let mut canceled = singles_event();
        canceled["status"]["description"] = json!("Canceled");
        assert!(Match::from_json(&canceled).is_err());

        let mut no_winner = singles_event();
        no_winner["winnerCode"] = json!(3);
        assert!(Match::from_json(&no_winner).is_err());

        let mut category = singles_event();
        category["tournament"]["category"]["slug"] = json!("utr");
        assert!(Match::from_json(&category).is_err());

        let mut gender = singles_event();
        gender["homeTeam"]["gender"] = json!("X");
        assert!(Match::from_json(&gender).is_err());

        let mut tiebreak = singles_event();
        tiebreak["awayScore"]["period1TieBreak"] = json!(7);
        assert!(Match::from_json(&tiebreak).is_err());

        let mut missing = singles_event();
        missing.as_object_mut().unwrap().remove("customId");
        assert!(matches!(Match::from_json(&missing), Err(Error::Json(_))));
    }

    #[test]
    fn test_rejects_scoreless_match() {
        let mut event = singles_event();
        event["homeScore"] = json!({});
        event["awayScore"] = json!({});
        assert!(matches!(Match::from_json(&event), Err(Error::InsufficientData(_))));
    }

    #[test]
    fn test_parse_matches_skips_bad_events() {
        let mut walkover = singles_event();
        walkover["status"]["description"] = json!("Walkover");
        let parsed = parse_matches(&[singles_event(), walkover, json!({"foo": 1})]);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_display() {
        let m = Match::from_json(&singles_event()).unwrap();
        assert_eq!(
            m.to_string(),
            "US Open, New York, USA [Round of 16] Świątek I. vs Belinda Bencic: 6-3 3-6 4-6"
        );
    }
}
