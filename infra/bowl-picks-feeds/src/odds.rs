//! Wire types and client for The Odds API (college football spreads and totals).
use bowl_picks_app::ports::feeds::{FeedError, GameOdds, OddsFeed};
use reqwest::Client;
use serde::Deserialize;

use crate::{get_json, http_client};

pub const ODDS_API: &str = "https://api.the-odds-api.com/v4";
const SPORT: &str = "americanfootball_ncaaf";

#[derive(Deserialize, Default, Debug)]
pub struct OddsEvent {
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Deserialize, Default, Debug)]
pub struct Bookmaker {
    #[serde(default)]
    pub markets: Vec<Market>,
}

#[derive(Deserialize, Default, Debug)]
pub struct Market {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

#[derive(Deserialize, Default, Debug)]
pub struct Outcome {
    #[serde(default)]
    pub name: String,
    pub point: Option<f64>,
}

fn market_point(market: &Market, name: &str) -> Option<f64> {
    market
        .outcomes
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| o.point)
}

/// Home spread and over/under from the first bookmaker that quotes either.
pub fn map_event(event: &OddsEvent) -> GameOdds {
    let mut spread = None;
    let mut over_under = None;
    for bookmaker in &event.bookmakers {
        for market in &bookmaker.markets {
            match market.key.as_str() {
                "spreads" => spread = spread.or(market_point(market, &event.home_team)),
                "totals" => over_under = over_under.or(market_point(market, "Over")),
                _ => {}
            }
        }
        if spread.is_some() || over_under.is_some() {
            break;
        }
    }
    GameOdds {
        home_team: event.home_team.clone(),
        away_team: event.away_team.clone(),
        spread,
        over_under,
    }
}

#[derive(Debug, Clone)]
pub struct OddsApiFeed {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OddsApiFeed {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(ODDS_API, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait::async_trait]
impl OddsFeed for OddsApiFeed {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_odds(&self) -> Result<Vec<GameOdds>, FeedError> {
        let Some(api_key) = &self.api_key else {
            log::warn!("No odds API key configured, skipping odds fetch");
            return Ok(Vec::new());
        };

        let url = format!("{}/sports/{}/odds", self.base_url, SPORT);
        let request = self.client.get(&url).query(&[
            ("apiKey", api_key.as_str()),
            ("regions", "us"),
            ("markets", "spreads,totals"),
            ("oddsFormat", "american"),
        ]);
        let events: Vec<OddsEvent> = get_json(request, "odds feed").await?;
        Ok(events.iter().map(map_event).collect())
    }

    async fn remaining_requests(&self) -> Option<u32> {
        let api_key = self.api_key.as_ref()?;
        let url = format!("{}/sports", self.base_url);
        let response = match self
            .client
            .get(&url)
            .query(&[("apiKey", api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Failed to query odds quota: {}", e.without_url());
                return None;
            }
        };
        response
            .headers()
            .get("x-requests-remaining")?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }
}
