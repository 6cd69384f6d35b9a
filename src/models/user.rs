//! Console users and roles.

use serde::{Deserialize, Serialize};

/// Role of a console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    StationManager,
    FrontDesk,
    CallCenter,
    Rider,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::StationManager,
        UserRole::FrontDesk,
        UserRole::CallCenter,
        UserRole::Rider,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::StationManager => "Station Manager",
            UserRole::FrontDesk => "Front Desk",
            UserRole::CallCenter => "Call Center",
            UserRole::Rider => "Rider",
        }
    }

    /// Roles allowed to create and remove shelves.
    pub fn can_manage_shelves(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::StationManager)
    }
}

/// Whether a user account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Disabled,
}

impl UserStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Disabled => "Disabled",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Disabled,
            UserStatus::Disabled => UserStatus::Active,
        }
    }
}

/// A console user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub station_id: String,
    pub station: String,
    pub status: UserStatus,
    pub last_login: Option<String>,
}

/// DTO for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub station_id: String,
    pub station: String,
}
