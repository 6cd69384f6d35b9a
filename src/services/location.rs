//! Station and location service.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::station::{CreateLocation, CreateStation, Location, ServiceResponse, Station};

/// Creates and lists stations and the locations they belong to.
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn create_location(&self, request: CreateLocation) -> Result<ServiceResponse>;
    async fn create_station(&self, request: CreateStation) -> Result<ServiceResponse>;
    async fn list_locations(&self) -> Result<Vec<Location>>;
    async fn list_stations(&self) -> Result<Vec<Station>>;
}

/// JSON-over-HTTP station service client.
pub struct HttpLocationService {
    client: Client,
    base_url: String,
}

impl HttpLocationService {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Service root (e.g., "http://localhost:8080/api")
    /// * `timeout_secs` - Per-request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a body and read the service verdict.
    ///
    /// Non-2xx replies are turned into a rejected response, keeping the
    /// server's message when the body carries one.
    async fn post<T: serde::Serialize + Sync>(&self, path: &str, body: &T) -> Result<ServiceResponse> {
        let url = format!("{base}/{path}", base = self.base_url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<ServiceResponse>(&text) {
            Ok(parsed) if status.is_success() => Ok(parsed),
            Ok(parsed) => Ok(ServiceResponse {
                success: false,
                message: parsed.message,
            }),
            Err(_) if status.is_success() => Ok(ServiceResponse::ok()),
            Err(_) => Ok(ServiceResponse::rejected(format!("Service returned {status}"))),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{base}/{path}", base = self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::service(format!("GET {path} returned {}", response.status())));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl LocationService for HttpLocationService {
    async fn create_location(&self, request: CreateLocation) -> Result<ServiceResponse> {
        self.post("locations", &request).await
    }

    async fn create_station(&self, request: CreateStation) -> Result<ServiceResponse> {
        self.post("stations", &request).await
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        self.get("locations").await
    }

    async fn list_stations(&self) -> Result<Vec<Station>> {
        self.get("stations").await
    }
}

#[derive(Default)]
struct Registry {
    locations: Vec<Location>,
    stations: Vec<Station>,
}

/// In-memory station service.
#[derive(Default)]
pub struct MockLocationService {
    registry: Mutex<Registry>,
}

impl MockLocationService {
    /// Empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Service pre-loaded with the three Ghana stations.
    pub fn seeded() -> Self {
        let location = |id: &str, name: &str, region: &str| Location {
            id: id.to_string(),
            name: name.to_string(),
            country: "Ghana".to_string(),
            region: region.to_string(),
        };
        let station = |id: &str, name: &str, code: &str, address: &str, location_id: &str| Station {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
            address: address.to_string(),
            location_id: location_id.to_string(),
            manager_id: None,
        };

        let registry = Registry {
            locations: vec![
                location("LOC-001", "Accra", "Greater Accra"),
                location("LOC-002", "Kumasi", "Ashanti"),
                location("LOC-003", "Tema", "Greater Accra"),
            ],
            stations: vec![
                station("STATION-001", "Accra Central", "ACC-001", "Independence Ave, Accra", "LOC-001"),
                station("STATION-002", "Kumasi Hub", "KUM-001", "Market Circle, Kumasi", "LOC-002"),
                station("STATION-003", "Tema Port", "TEM-001", "Harbour Road, Tema", "LOC-003"),
            ],
        };

        Self {
            registry: Mutex::new(registry),
        }
    }
}

/// `<first 3 letters upper>-<n>`.
fn station_code(name: &str, n: usize) -> String {
    let prefix: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    format!("{prefix}-{n}")
}

#[async_trait]
impl LocationService for MockLocationService {
    async fn create_location(&self, request: CreateLocation) -> Result<ServiceResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Ok(ServiceResponse::rejected("Location name is required"));
        }

        let mut registry = self.registry.lock().await;
        if registry.locations.iter().any(|l| l.name.eq_ignore_ascii_case(name)) {
            return Ok(ServiceResponse::rejected(format!("Location '{name}' already exists")));
        }

        let id = format!("LOC-{:03}", registry.locations.len() + 1);
        registry.locations.push(Location {
            id,
            name: name.to_string(),
            country: request.country.trim().to_string(),
            region: request.region.trim().to_string(),
        });
        Ok(ServiceResponse::ok())
    }

    async fn create_station(&self, request: CreateStation) -> Result<ServiceResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Ok(ServiceResponse::rejected("Station name is required"));
        }

        let mut registry = self.registry.lock().await;
        if !registry.locations.iter().any(|l| l.id == request.location_id) {
            return Ok(ServiceResponse::rejected(format!(
                "Unknown location '{}'",
                request.location_id
            )));
        }
        if registry.stations.iter().any(|s| s.name.eq_ignore_ascii_case(name)) {
            return Ok(ServiceResponse::rejected(format!("Station '{name}' already exists")));
        }

        let n = registry.stations.len() + 1;
        registry.stations.push(Station {
            id: format!("STATION-{n:03}"),
            name: name.to_string(),
            code: station_code(name, n),
            address: request.address.trim().to_string(),
            location_id: request.location_id,
            manager_id: request.manager_id,
        });
        Ok(ServiceResponse::ok())
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        Ok(self.registry.lock().await.locations.clone())
    }

    async fn list_stations(&self) -> Result<Vec<Station>> {
        Ok(self.registry.lock().await.stations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_station(name: &str, location_id: &str) -> CreateStation {
        CreateStation {
            name: name.to_string(),
            address: "1 Station Rd".to_string(),
            location_id: location_id.to_string(),
            manager_id: None,
        }
    }

    #[test]
    fn test_station_code() {
        assert_eq!(station_code("Ho Depot", 4), "HOD-4");
        assert_eq!(station_code("Takoradi West", 5), "TAK-5");
    }

    #[tokio::test]
    async fn test_seeded_lists() {
        let service = MockLocationService::seeded();
        assert_eq!(service.list_locations().await.unwrap().len(), 3);
        assert_eq!(service.list_stations().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_station_generates_code() {
        let service = MockLocationService::seeded();
        let resp = service.create_station(new_station("Takoradi West", "LOC-001")).await.unwrap();
        assert!(resp.success);

        let stations = service.list_stations().await.unwrap();
        let created = stations.iter().find(|s| s.name == "Takoradi West").unwrap();
        assert_eq!(created.code, "TAK-4");
        assert_eq!(created.id, "STATION-004");
    }

    #[tokio::test]
    async fn test_create_station_rejects_unknown_location() {
        let service = MockLocationService::seeded();
        let resp = service.create_station(new_station("Ho Depot", "LOC-999")).await.unwrap();
        assert!(!resp.success);
        assert!(resp.message.unwrap().contains("LOC-999"));
        assert_eq!(service.list_stations().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_station_rejects_duplicate() {
        let service = MockLocationService::seeded();
        let resp = service.create_station(new_station("kumasi hub", "LOC-002")).await.unwrap();
        assert!(!resp.success);
    }

    #[tokio::test]
    async fn test_create_location_then_station() {
        let service = MockLocationService::new();
        let resp = service
            .create_location(CreateLocation {
                name: "Ho".to_string(),
                country: "Ghana".to_string(),
                region: "Volta".to_string(),
            })
            .await
            .unwrap();
        assert!(resp.success);

        let locations = service.list_locations().await.unwrap();
        assert_eq!(locations[0].id, "LOC-001");

        let resp = service.create_station(new_station("Ho Depot", "LOC-001")).await.unwrap();
        assert!(resp.success);
    }

    #[tokio::test]
    async fn test_create_location_rejects_blank_and_duplicate() {
        let service = MockLocationService::seeded();
        let blank = CreateLocation {
            name: "  ".to_string(),
            country: "Ghana".to_string(),
            region: String::new(),
        };
        assert!(!service.create_location(blank).await.unwrap().success);

        let dup = CreateLocation {
            name: "Accra".to_string(),
            country: "Ghana".to_string(),
            region: "Greater Accra".to_string(),
        };
        assert!(!service.create_location(dup).await.unwrap().success);
    }

    #[test]
    fn test_http_service_trims_base_url() {
        let service = HttpLocationService::new("http://localhost:8080/api/", 5).unwrap();
        assert_eq!(service.base_url, "http://localhost:8080/api");
    }
}
