//! LiveScore (livescore6) endpoints. Everything is passed as query parameters.

use crate::endpoint::{Endpoint, Provider};

pub static LIVESCORE: Provider = Provider::new("livescore6.p.rapidapi.com", "LiveScore");

/// Endpoints worth pulling; the rest of the upstream API is left out.
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::query(&LIVESCORE, "list")
            .in_folder("leagues/v2")
            .with_params(&["Category"]),
        Endpoint::query(&LIVESCORE, "list-live")
            .in_folder("matches/v2")
            .with_params(&["Category"]),
        Endpoint::query(&LIVESCORE, "list-by-date")
            .in_folder("matches/v2")
            .with_params(&["Category", "Date"]),
        // Ccd: competition, e.g. "wimbledon". Scd: stage, e.g. "group-b".
        Endpoint::query(&LIVESCORE, "list-by-league")
            .in_folder("matches/v2")
            .with_params(&["Category", "Ccd"])
            .with_optparams(&["Scd"]),
        // LiveTable: "true" | "false"
        Endpoint::query(&LIVESCORE, "detail")
            .in_folder("matches/v2")
            .with_params(&["Eid", "Category"])
            .with_optparams(&["LiveTable"]),
    ]
}
