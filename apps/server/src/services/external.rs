//! Third-party health data lookups (openFDA, RxNav, Google Maps, WHO GHO).
//!
//! Lookups are best-effort: a provider failure is logged, counted, and turned
//! into an empty result so callers can render "no data available".

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::time::{Duration, Instant};

use crate::{config::IntegrationsConfig, metrics, Error, Result};

const PLACE_DETAIL_FIELDS: &str =
    "name,formatted_address,formatted_phone_number,website,rating,reviews,opening_hours,geometry";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedAddress {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
}

#[async_trait]
pub trait ThirdPartyGateway: Send + Sync {
    /// openFDA drug labels whose brand name matches `query`.
    async fn search_fda_drugs(&self, query: &str, limit: u32) -> Vec<JsonValue>;

    /// RxNav concept groups for a drug name.
    async fn search_rxnorm_drugs(&self, query: &str) -> Vec<JsonValue>;

    /// RxNav interaction list for the drugs that resolve to an RxCUI.
    async fn drug_interactions(&self, drugs: &[String]) -> JsonValue;

    async fn search_places(&self, query: &str, location: &str, place_type: &str)
        -> Vec<JsonValue>;

    async fn place_details(&self, place_id: &str) -> JsonValue;

    async fn geocode(&self, address: &str) -> Option<GeocodedAddress>;

    async fn who_health_data(&self, indicator: &str, country: &str) -> JsonValue;
}

pub fn empty_interactions() -> JsonValue {
    json!({ "interactionTypeGroup": [] })
}

/// reqwest-backed gateway.
pub struct HttpGateway {
    client: reqwest::Client,
    config: IntegrationsConfig,
}

impl HttpGateway {
    pub fn new(config: IntegrationsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .user_agent(concat!("aarogya-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// GET `url` and decode JSON. Any failure is logged and yields `None`.
    async fn get_json(&self, provider: &str, url: &str) -> Option<JsonValue> {
        let started = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(provider, error = %e, "Upstream request failed");
                metrics::record_upstream(provider, "transport_error", started.elapsed());
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(provider, status = status.as_u16(), "Upstream returned error status");
            metrics::record_upstream(provider, "http_error", started.elapsed());
            return None;
        }

        match response.json::<JsonValue>().await {
            Ok(body) => {
                metrics::record_upstream(provider, "ok", started.elapsed());
                Some(body)
            }
            Err(e) => {
                tracing::error!(provider, error = %e, "Upstream response was not JSON");
                metrics::record_upstream(provider, "decode_error", started.elapsed());
                None
            }
        }
    }

    fn google_key(&self, provider: &str) -> Option<&str> {
        let key = self.config.google_maps_api_key.as_deref();
        if key.is_none() {
            tracing::warn!(provider, "Google Maps API key not configured");
            metrics::record_upstream(provider, "skipped", Duration::ZERO);
        }
        key
    }

    async fn rxcui(&self, drug: &str) -> Option<String> {
        let url = format!(
            "{}/rxcui.json?name={}&search=2",
            self.config.rxnorm_base_url,
            urlencoding::encode(drug)
        );
        let body = self.get_json("rxnorm", &url).await?;
        body.pointer("/idGroup/rxnormId/0")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

fn array_at(body: Option<JsonValue>, pointer: &str) -> Vec<JsonValue> {
    body.and_then(|b| b.pointer(pointer).and_then(|v| v.as_array()).cloned())
        .unwrap_or_default()
}

#[async_trait]
impl ThirdPartyGateway for HttpGateway {
    async fn search_fda_drugs(&self, query: &str, limit: u32) -> Vec<JsonValue> {
        let search = format!("openfda.brand_name:{query}");
        let url = format!(
            "{}/drug/label.json?search={}&limit={}",
            self.config.openfda_base_url,
            urlencoding::encode(&search),
            limit
        );
        array_at(self.get_json("openfda", &url).await, "/results")
    }

    async fn search_rxnorm_drugs(&self, query: &str) -> Vec<JsonValue> {
        let url = format!(
            "{}/drugs.json?name={}",
            self.config.rxnorm_base_url,
            urlencoding::encode(query)
        );
        array_at(
            self.get_json("rxnorm", &url).await,
            "/drugGroup/conceptGroup",
        )
    }

    async fn drug_interactions(&self, drugs: &[String]) -> JsonValue {
        let mut rxcuis = Vec::with_capacity(drugs.len());
        for drug in drugs {
            if let Some(id) = self.rxcui(drug).await {
                rxcuis.push(id);
            }
        }

        if rxcuis.len() < 2 {
            return empty_interactions();
        }

        let url = format!(
            "{}/interaction/list.json?rxcuis={}",
            self.config.rxnorm_base_url,
            rxcuis.join("+")
        );
        self.get_json("rxnorm", &url)
            .await
            .unwrap_or_else(empty_interactions)
    }

    async fn search_places(
        &self,
        query: &str,
        location: &str,
        place_type: &str,
    ) -> Vec<JsonValue> {
        let Some(key) = self.google_key("google_places") else {
            return Vec::new();
        };
        let text = format!("{query} {place_type} {location}");
        let url = format!(
            "{}/place/textsearch/json?query={}&type={}&key={}",
            self.config.google_maps_base_url,
            urlencoding::encode(text.trim()),
            urlencoding::encode(place_type),
            urlencoding::encode(key)
        );
        array_at(self.get_json("google_places", &url).await, "/results")
    }

    async fn place_details(&self, place_id: &str) -> JsonValue {
        let Some(key) = self.google_key("google_places") else {
            return json!({});
        };
        let url = format!(
            "{}/place/details/json?place_id={}&fields={}&key={}",
            self.config.google_maps_base_url,
            urlencoding::encode(place_id),
            PLACE_DETAIL_FIELDS,
            urlencoding::encode(key)
        );
        self.get_json("google_places", &url)
            .await
            .and_then(|b| b.get("result").cloned())
            .unwrap_or_else(|| json!({}))
    }

    async fn geocode(&self, address: &str) -> Option<GeocodedAddress> {
        let key = self.google_key("google_geocode")?;
        let url = format!(
            "{}/geocode/json?address={}&key={}",
            self.config.google_maps_base_url,
            urlencoding::encode(address),
            urlencoding::encode(key)
        );
        let body = self.get_json("google_geocode", &url).await?;
        let first = body.pointer("/results/0")?;
        Some(GeocodedAddress {
            latitude: first.pointer("/geometry/location/lat")?.as_f64()?,
            longitude: first.pointer("/geometry/location/lng")?.as_f64()?,
            formatted_address: first.get("formatted_address")?.as_str()?.to_string(),
        })
    }

    async fn who_health_data(&self, indicator: &str, country: &str) -> JsonValue {
        let filter = format!("COUNTRY:{country}");
        let url = format!(
            "{}/GHO/{}.json?filter={}&format=json",
            self.config.who_base_url,
            urlencoding::encode(indicator),
            urlencoding::encode(&filter)
        );
        self.get_json("who_gho", &url)
            .await
            .unwrap_or_else(|| json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn google_lookups_without_key_are_empty() {
        let gateway = HttpGateway::new(IntegrationsConfig::default()).unwrap();
        assert!(gateway
            .search_places("apollo", "bangalore", "hospital")
            .await
            .is_empty());
        assert_eq!(gateway.place_details("abc").await, json!({}));
        assert!(gateway.geocode("MG Road").await.is_none());
    }

    #[tokio::test]
    async fn unreachable_provider_yields_empty_result() {
        let config = IntegrationsConfig {
            openfda_base_url: "http://127.0.0.1:9".to_string(),
            http_timeout_seconds: 2,
            ..IntegrationsConfig::default()
        };
        let gateway = HttpGateway::new(config).unwrap();
        assert!(gateway.search_fda_drugs("tylenol", 5).await.is_empty());
    }
}
