//! Tennis Data (tennis-data1) endpoints.

use crate::endpoint::{Endpoint, Provider};

pub static TENNIS_DATA: Provider = Provider::new("tennis-data1.p.rapidapi.com", "Tennis Data");

pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::query(&TENNIS_DATA, "players")
            .in_folder("tennis")
            .with_optparams(&["page", "id"]),
        Endpoint::query(&TENNIS_DATA, "tournaments")
            .in_folder("tennis")
            .with_optparams(&["minPrize", "year", "page", "type"]),
        Endpoint::path(&TENNIS_DATA, "tournament")
            .in_folder("tennis")
            .with_params(&["id"]),
        Endpoint::query(&TENNIS_DATA, "matches")
            .in_folder("tennis")
            .with_optparams(&["player_id", "tournament", "surface", "page"]),
    ]
}
