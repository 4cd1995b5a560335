//! Shared test fixtures: a scripted oracle and request builders

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use sweetspot::oracle::{GenerationRequest, Oracle, OracleError};
use sweetspot::trip::{GroupProfile, RawDeparture, RawTripRequest};

/// Mock oracle scripted per pipeline stage
///
/// The shortlist call is recognized by its forced-JSON mode; plan calls are
/// matched by the candidate city embedded in the prompt, so replies stay
/// deterministic regardless of completion order.
pub struct ScriptedOracle {
    shortlist_reply: String,
    plan_replies: HashMap<String, String>,
    latency: Duration,
    call_count: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(shortlist_reply: String, plan_replies: Vec<(&str, String)>) -> Self {
        Self {
            shortlist_reply,
            plan_replies: plan_replies
                .into_iter()
                .map(|(city, reply)| (city.to_string(), reply))
                .collect(),
            latency: Duration::ZERO,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn generate(&self, request: GenerationRequest) -> Result<String, OracleError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if request.json_only {
            return Ok(self.shortlist_reply.clone());
        }
        for (city, reply) in &self.plan_replies {
            if request.input.contains(city.as_str()) {
                return Ok(reply.clone());
            }
        }
        Err(OracleError::InvalidResponse("no scripted reply for this prompt".to_string()))
    }
}

/// A shortlist reply holding the given cities, ranked as given
pub fn shortlist_reply(cities: &[&str]) -> String {
    let candidates: Vec<_> = cities
        .iter()
        .enumerate()
        .map(|(i, city)| {
            serde_json::json!({
                "city": city,
                "iata": "XXX",
                "score": (cities.len() - i) as f64,
                "matched": ["beach"],
                "justification": format!("{city} fits the group")
            })
        })
        .collect();
    serde_json::json!({ "candidates": candidates }).to_string()
}

/// A well-formed plan reply for one city
pub fn plan_reply(city: &str) -> String {
    serde_json::json!({
        "destination": {
            "city": city,
            "country": "Somewhere",
            "summary": "A lovely place",
            "top_highlights": ["h1", "h2", "h3"]
        },
        "flights": [{
            "departure_airport": "LGW",
            "airline": "TestAir",
            "flight_no": "TA123",
            "outbound": { "date": "2025-07-01", "time": "08:00", "price": 120, "booking_link": "https://example.com" },
            "return": { "date": "2025-07-10", "time": "20:00", "price": 130, "booking_link": "https://example.com" }
        }],
        "totals": { "total_flight_cost": 250 }
    })
    .to_string()
}

/// The LGW beach-trip request from the end-to-end scenario
pub fn lgw_request() -> RawTripRequest {
    RawTripRequest {
        departures: Some(vec![RawDeparture {
            airport: Some("LGW".to_string()),
            budget: Some(800.0),
        }]),
        group_profiles: Some(vec![GroupProfile {
            interests: vec!["beach".to_string()],
        }]),
        start_date: Some("2025-07-01".to_string()),
        end_date: Some("2025-07-10".to_string()),
    }
}
