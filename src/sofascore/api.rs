//! Match history pulls for tracked players.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::client::{write_json, ApiClient};
use crate::error::{Error, Result};
use crate::providers::Api;
use crate::sofascore::data::Status;
use crate::sofascore::{player_name, LAST_MATCHES};

/// Drop events that were canceled or carry a data warning.
pub fn prune_canceled(events: Vec<Value>) -> Vec<Value> {
    events
        .into_iter()
        .filter(|event| {
            let description = event["status"]["description"].as_str().unwrap_or_default();
            !Status::from_description(description).is_some_and(Status::is_canceled)
        })
        .collect()
}

/// One page of a tracked player's past matches, most recent first.
#[instrument(skip(client))]
pub async fn pull_matches(client: &ApiClient, team_id: u64, page_index: u32) -> Result<Value> {
    if player_name(team_id).is_none() {
        return Err(Error::UnknownTeamId(team_id));
    }

    let endpoint = Api::Sofascore.endpoint(LAST_MATCHES, Some("teams"))?;
    let team_id = team_id.to_string();
    let page_index = page_index.to_string();
    client
        .retrieve(&endpoint, &[team_id.as_str(), page_index.as_str()], &[], None)
        .await
}

/// Every past match of a tracked player, following `hasNextPage`.
///
/// A page without events ends the pull early with what was gathered.
pub async fn pull_all_matches(client: &ApiClient, team_id: u64) -> Result<Vec<Value>> {
    let name = player_name(team_id).ok_or(Error::UnknownTeamId(team_id))?;
    info!(player = name, "Pulling matches");

    let mut matches = Vec::new();
    let mut page_index = 0u32;
    loop {
        let page = pull_matches(client, team_id, page_index).await?;
        let batch = match page.get("events").and_then(Value::as_array) {
            Some(events) if !events.is_empty() => events.clone(),
            _ => {
                warn!(page_index, "Pulling finished unexpectedly: no events on page");
                return Ok(matches);
            }
        };

        matches.extend(batch);
        info!(page_index, total = matches.len(), "Pulled results page");

        if !page.get("hasNextPage").and_then(Value::as_bool).unwrap_or(false) {
            break;
        }
        page_index += 1;
    }

    info!(player = name, total = matches.len(), "Finished pulling");
    Ok(matches)
}

/// Write pulled events to `{data_dir}/{YYYYMMDD}/{first_last}.json`.
pub fn dump_matches(events: &[Value], player_name: &str, data_dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let filename = player_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    let dest = data_dir
        .join(date.format("%Y%m%d").to_string())
        .join(format!("{filename}.json"));

    write_json(&dest, events)?;
    info!(count = events.len(), path = %dest.display(), "Matches dumped");
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prune_canceled() {
        let events = vec![
            json!({"status": {"description": "Ended"}, "id": 1}),
            json!({"status": {"description": "Canceled"}, "id": 2}),
            json!({"status": {"description": "Coverage canceled"}, "id": 3}),
            json!({"status": {"description": "Warning"}, "id": 4}),
            json!({"status": {"description": "Walkover"}, "id": 5}),
            json!({"id": 6}),
        ];
        let ids: Vec<i64> = prune_canceled(events)
            .iter()
            .map(|e| e["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 5, 6]);
    }

    #[test]
    fn test_dump_matches_layout() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2021, 9, 17).unwrap();
        let events = vec![json!({"id": 1}), json!({"id": 2})];

        let dest = dump_matches(&events, "Kacper Żuk", dir.path(), date).unwrap();
        assert_eq!(dest, dir.path().join("20210917").join("kacper_żuk.json"));

        let written: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
        assert_eq!(written, events);
    }
}
