//! Signed-in operator and current station context.
//!
//! Created once at startup from [`OperatorConfig`] and owned by the UI app.
//! Panels read it through a shared reference; only [`AppSession::login`],
//! [`AppSession::switch_station`] and [`AppSession::switch_operator`] mutate it.

use crate::config::OperatorConfig;
use crate::error::{AppError, Result};
use crate::models::user::{User, UserRole};

/// Station the operator is working at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationContext {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Signed-in console user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub station_id: String,
}

/// Application-wide session.
#[derive(Debug, Clone)]
pub struct AppSession {
    current_station: Option<StationContext>,
    current_user: Option<Operator>,
}

impl AppSession {
    pub fn from_config(config: &OperatorConfig) -> Self {
        Self {
            current_station: Some(StationContext {
                id: config.station_id.clone(),
                name: config.station_name.clone(),
                location: config.station_location.clone(),
            }),
            current_user: Some(Operator {
                id: config.user_id.clone(),
                name: config.name.clone(),
                email: config.email.clone(),
                role: config.role,
                station_id: config.station_id.clone(),
            }),
        }
    }

    pub fn current_station(&self) -> Option<&StationContext> {
        self.current_station.as_ref()
    }

    pub fn current_user(&self) -> Option<&Operator> {
        self.current_user.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.current_user.as_ref().map(|u| u.role)
    }

    /// Display name of the signed-in user, or an empty string.
    pub fn user_name(&self) -> &str {
        self.current_user.as_ref().map(|u| u.name.as_str()).unwrap_or("")
    }

    /// Admins may access every station; others only their own.
    pub fn can_access_station(&self, station_id: &str) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| grants_access(user.role, &user.station_id, station_id))
    }

    pub fn can_manage_shelves(&self) -> bool {
        self.role().is_some_and(|r| r.can_manage_shelves())
    }

    /// Sign in as another user.
    pub fn login(&mut self, user: &User) {
        tracing::info!("Operator signed in: {} ({})", user.name, user.role.label());
        self.current_user = Some(Operator {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            station_id: user.station_id.clone(),
        });
    }

    /// Move the session to another station.
    pub fn switch_station(&mut self, station: StationContext) {
        tracing::info!("Switched station: {} ({})", station.name, station.id);
        self.current_station = Some(station);
    }

    /// Sign in as `user` and move to `station` together.
    ///
    /// The session is left untouched when `user` may not work at `station`.
    pub fn switch_operator(&mut self, user: &User, station: StationContext) -> Result<()> {
        if !grants_access(user.role, &user.station_id, &station.id) {
            return Err(AppError::validation(format!("{} cannot access {}", user.name, station.name)));
        }
        self.login(user);
        self.switch_station(station);
        Ok(())
    }
}

fn grants_access(role: UserRole, home_station: &str, station_id: &str) -> bool {
    role == UserRole::Admin || home_station == station_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserStatus;

    fn user(role: UserRole, station_id: &str) -> User {
        User {
            id: "USER-900".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            phone: String::new(),
            role,
            station_id: station_id.to_string(),
            station: "Somewhere".to_string(),
            status: UserStatus::Active,
            last_login: None,
        }
    }

    #[test]
    fn test_default_operator_is_front_desk() {
        let session = AppSession::from_config(&OperatorConfig::default());
        assert_eq!(session.role(), Some(UserRole::FrontDesk));
        assert!(!session.can_manage_shelves());
        assert!(session.can_access_station("STATION-001"));
        assert!(!session.can_access_station("STATION-002"));
    }

    #[test]
    fn test_admin_accesses_every_station() {
        let mut session = AppSession::from_config(&OperatorConfig::default());
        session.login(&user(UserRole::Admin, "STATION-003"));
        assert!(session.can_access_station("STATION-001"));
        assert!(session.can_access_station("STATION-999"));
        assert!(session.can_manage_shelves());
    }

    #[test]
    fn test_switch_station() {
        let mut session = AppSession::from_config(&OperatorConfig::default());
        session.switch_station(StationContext {
            id: "STATION-002".to_string(),
            name: "Kumasi Hub".to_string(),
            location: "Kumasi".to_string(),
        });
        assert_eq!(session.current_station().map(|s| s.name.as_str()), Some("Kumasi Hub"));
        // Access follows the user, not the viewed station.
        assert!(!session.can_access_station("STATION-002"));
    }

    fn kumasi() -> StationContext {
        StationContext {
            id: "STATION-002".to_string(),
            name: "Kumasi Hub".to_string(),
            location: "Kumasi".to_string(),
        }
    }

    #[test]
    fn test_switch_operator_rejects_foreign_station() {
        let mut session = AppSession::from_config(&OperatorConfig::default());
        let err = session
            .switch_operator(&user(UserRole::StationManager, "STATION-003"), kumasi())
            .unwrap_err();
        assert_eq!(err.user_message(), "Test User cannot access Kumasi Hub");

        assert_eq!(session.current_user().map(|u| u.id.as_str()), Some("USER-001"));
        assert_eq!(session.current_station().map(|s| s.id.as_str()), Some("STATION-001"));
        assert!(!session.can_manage_shelves());
    }

    #[test]
    fn test_switch_operator_applies_both() {
        let mut session = AppSession::from_config(&OperatorConfig::default());
        session
            .switch_operator(&user(UserRole::StationManager, "STATION-002"), kumasi())
            .unwrap();
        assert_eq!(session.current_user().map(|u| u.id.as_str()), Some("USER-900"));
        assert_eq!(session.current_station().map(|s| s.id.as_str()), Some("STATION-002"));

        // Admins may switch anywhere.
        session
            .switch_operator(&user(UserRole::Admin, "STATION-001"), kumasi())
            .unwrap();
        assert_eq!(session.role(), Some(UserRole::Admin));
    }
}
