//! Shared application state.

use anyhow::Context;
use std::sync::Arc;

use crate::{
    auth::{AuthManager, IdentityVerifier},
    catalog::{CatalogStore, InMemoryCatalog, RegionFilter},
    config::{CatalogConfig, Config},
    metrics,
    services::{
        ConsultationGateway, ConsultationService, HospitalService, HttpGateway,
        JanAushadhiService, LocationService, MedicineService, TavusClient, ThirdPartyGateway,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: AuthManager,
    pub medicines: Arc<MedicineService>,
    pub hospital: Arc<HospitalService>,
    pub locations: Arc<LocationService>,
    pub jan_aushadhi: Arc<JanAushadhiService>,
    pub consultations: Arc<ConsultationService>,
    pub external: Arc<dyn ThirdPartyGateway>,
}

/// Replacements for the collaborators `AppState::new` would build from config.
#[derive(Default)]
pub struct AppStateOptions {
    pub catalog: Option<Arc<dyn CatalogStore>>,
    pub identity_verifier: Option<Arc<dyn IdentityVerifier>>,
    pub third_party: Option<Arc<dyn ThirdPartyGateway>>,
    pub consultation: Option<Arc<dyn ConsultationGateway>>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_options(config, AppStateOptions::default()).await
    }

    pub async fn with_options(config: Config, options: AppStateOptions) -> anyhow::Result<Self> {
        let catalog = match options.catalog {
            Some(catalog) => catalog,
            None => load_catalog(&config.catalog).await?,
        };
        publish_catalog_sizes(catalog.as_ref()).await?;

        let auth = match options.identity_verifier {
            Some(verifier) => AuthManager::with_verifier(config.auth.enabled, verifier),
            None => AuthManager::new(&config.auth).context("Failed to initialize authentication")?,
        };

        let external: Arc<dyn ThirdPartyGateway> = match options.third_party {
            Some(gateway) => gateway,
            None => Arc::new(HttpGateway::new(config.integrations.clone())?),
        };

        let consultation: Arc<dyn ConsultationGateway> = match options.consultation {
            Some(gateway) => gateway,
            None => Arc::new(TavusClient::new(&config.integrations.tavus)?),
        };

        if config.integrations.google_maps_api_key.is_none() {
            tracing::warn!("GOOGLE_MAPS_API_KEY not set; place and geocoding lookups return empty results");
        }
        if config.integrations.tavus.api_key.is_none() {
            tracing::warn!("TAVUS_API_KEY not set; consultation endpoints will return 502");
        }

        let search = config.search.clone();
        Ok(Self {
            auth,
            medicines: Arc::new(MedicineService::new(catalog.clone(), search.clone())),
            hospital: Arc::new(HospitalService::new(catalog.clone(), search.clone())),
            locations: Arc::new(LocationService::new(catalog.clone(), search.clone())),
            jan_aushadhi: Arc::new(JanAushadhiService::new(catalog, search)),
            consultations: Arc::new(ConsultationService::new(consultation)),
            external,
            config: Arc::new(config),
        })
    }
}

async fn load_catalog(config: &CatalogConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    let catalog = match &config.snapshot_path {
        Some(path) => InMemoryCatalog::from_snapshot_file(path).await?,
        None => {
            tracing::info!("No catalog snapshot configured, using built-in seed data");
            InMemoryCatalog::seeded()
        }
    };
    Ok(Arc::new(catalog))
}

async fn publish_catalog_sizes(catalog: &dyn CatalogStore) -> anyhow::Result<()> {
    let all = RegionFilter::default();
    metrics::set_catalog_records("medicines", catalog.medicines().await?.len());
    metrics::set_catalog_records("hospital", catalog.hospital_tools().await?.len());
    metrics::set_catalog_records("locations", catalog.locations(&all).await?.len());
    metrics::set_catalog_records(
        "jan-aushadhi",
        catalog.jan_aushadhi_stores(&all).await?.len(),
    );
    metrics::set_catalog_records(
        "jan-aushadhi-medicines",
        catalog.jan_aushadhi_medicines().await?.len(),
    );
    Ok(())
}
