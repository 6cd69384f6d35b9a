//! Station and location DTOs exchanged with the station service.

use serde::{Deserialize, Serialize};

/// A geographic location stations are grouped under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub country: String,
    pub region: String,
}

/// A delivery station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub code: String,
    pub address: String,
    pub location_id: String,
    pub manager_id: Option<String>,
}

/// Request body for creating a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocation {
    pub name: String,
    pub country: String,
    pub region: String,
}

/// Request body for creating a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStation {
    pub name: String,
    pub address: String,
    pub location_id: String,
    pub manager_id: Option<String>,
}

/// Outcome reported by the station service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_station_wire_format() {
        let req = CreateStation {
            name: "Ho Depot".to_string(),
            address: "1 Main Rd".to_string(),
            location_id: "LOC-001".to_string(),
            manager_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["locationId"], "LOC-001");
        assert!(json["managerId"].is_null());
    }

    #[test]
    fn test_response_message_optional() {
        let resp: ServiceResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(resp, ServiceResponse::ok());
    }
}
