//! SportScore (sportscore1) endpoints.

use crate::endpoint::{Endpoint, Provider};

pub static SPORTSCORE: Provider = Provider::new("sportscore1.p.rapidapi.com", "SportScore");

pub fn endpoints() -> Vec<Endpoint> {
    // SportScore takes `page` as a query parameter, not a path segment.
    vec![
        Endpoint::path(&SPORTSCORE, "sports"),
        Endpoint::main_param(&SPORTSCORE, "seasons", false)
            .in_folder("sports")
            .with_params(&["id"])
            .with_optparams(&["page"]),
        Endpoint::main_param(&SPORTSCORE, "leagues", false)
            .in_folder("sports")
            .with_params(&["id"])
            .with_optparams(&["page"]),
        Endpoint::path(&SPORTSCORE, "sports").with_params(&["id"]),
        // sports/{id}/events/date/{date}
        Endpoint::main_param(&SPORTSCORE, "events", false)
            .in_folder("sports")
            .with_params(&["id", "date"])
            .with_optparams(&["page"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::get_endpoint;

    #[test]
    fn test_events_by_date_url() {
        let endpoints = endpoints();
        let events = get_endpoint(&endpoints, "events", Some("sports")).unwrap();
        let req = events
            .request(&SPORTSCORE.base_url(), &["1", "2020-06-07"], &[])
            .unwrap();
        assert_eq!(
            req.url,
            "https://sportscore1.p.rapidapi.com/sports/1/events/date/2020-06-07"
        );
    }

    #[test]
    fn test_sport_by_id_and_all_sports() {
        let endpoints = endpoints();
        let all = get_endpoint(&endpoints, "sports", None).unwrap();
        assert!(all.params().is_empty());
        let req = endpoints[3].request("http://x", &["2"], &[]).unwrap();
        assert_eq!(req.url, "http://x/sports/2");
    }

    #[test]
    fn test_seasons_page_goes_to_query() {
        let endpoints = endpoints();
        let seasons = get_endpoint(&endpoints, "seasons", Some("sports")).unwrap();
        let req = seasons.request("http://x", &["1"], &[("page", "2")]).unwrap();
        assert_eq!(req.url, "http://x/sports/1/seasons");
        assert_eq!(req.query, vec![("page".to_string(), "2".to_string())]);
    }
}
