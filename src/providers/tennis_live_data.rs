//! Tennis Live Data endpoints. All values travel in the URL path.

use crate::endpoint::{Endpoint, Provider};

pub static TENNIS_LIVE_DATA: Provider =
    Provider::new("tennis-live-data.p.rapidapi.com", "Tennis Live Data");

pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::path(&TENNIS_LIVE_DATA, "matches-results-by-player")
            .with_params(&["tourn_id", "player_id"]),
        Endpoint::path(&TENNIS_LIVE_DATA, "players").with_params(&["tour"]),
        // today when no date is supplied
        Endpoint::path(&TENNIS_LIVE_DATA, "matches-by-date").with_optparams(&["date"]),
        Endpoint::path(&TENNIS_LIVE_DATA, "player").with_params(&["player_id"]),
        Endpoint::path(&TENNIS_LIVE_DATA, "race")
            .in_folder("rankings")
            .with_params(&["tour_code"]),
        Endpoint::path(&TENNIS_LIVE_DATA, "rankings").with_params(&["tour_code"]),
        // subset of what matches-results returns
        Endpoint::path(&TENNIS_LIVE_DATA, "match").with_params(&["match_id"]),
        Endpoint::path(&TENNIS_LIVE_DATA, "matches-results")
            .with_params(&["tournament_id"])
            .with_optparams(&["date"]),
        Endpoint::path(&TENNIS_LIVE_DATA, "matches")
            .with_params(&["tournament_id"])
            .with_optparams(&["date"]),
        // season_id is a year
        Endpoint::path(&TENNIS_LIVE_DATA, "tournaments").with_params(&["tour_code", "season_id"]),
        Endpoint::path(&TENNIS_LIVE_DATA, "tours"),
    ]
}
