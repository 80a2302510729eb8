pub mod livescore;
pub mod sportscore;
pub mod tennis_data;
pub mod tennis_live_data;

use std::fmt;

use clap::ValueEnum;

use crate::endpoint::{get_endpoint, Endpoint, Provider};
use crate::error::{Error, Result};
use crate::sofascore;

/// Every API this crate knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Api {
    Livescore,
    Sofascore,
    Sportscore,
    TennisData,
    TennisLiveData,
}

impl Api {
    pub const ALL: [Api; 5] = [
        Api::Livescore,
        Api::Sofascore,
        Api::Sportscore,
        Api::TennisData,
        Api::TennisLiveData,
    ];

    pub fn provider(self) -> &'static Provider {
        match self {
            Self::Livescore => &livescore::LIVESCORE,
            Self::Sofascore => &sofascore::SOFASCORE,
            Self::Sportscore => &sportscore::SPORTSCORE,
            Self::TennisData => &tennis_data::TENNIS_DATA,
            Self::TennisLiveData => &tennis_live_data::TENNIS_LIVE_DATA,
        }
    }

    pub fn endpoints(self) -> Vec<Endpoint> {
        match self {
            Self::Livescore => livescore::endpoints(),
            Self::Sofascore => sofascore::endpoints(),
            Self::Sportscore => sportscore::endpoints(),
            Self::TennisData => tennis_data::endpoints(),
            Self::TennisLiveData => tennis_live_data::endpoints(),
        }
    }

    /// Look up one of this API's endpoints by name (and folder).
    pub fn endpoint(self, name: &str, folder: Option<&str>) -> Result<Endpoint> {
        get_endpoint(&self.endpoints(), name, folder)
            .cloned()
            .ok_or_else(|| match folder {
                Some(folder) => Error::UnknownEndpoint(format!("{}/{folder}/{name}", self.provider().label())),
                None => Error::UnknownEndpoint(format!("{}/{name}", self.provider().label())),
            })
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.provider().label())
    }
}
