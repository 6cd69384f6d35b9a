//! User repository.

use crate::error::{AppError, Result};
use crate::models::user::{CreateUser, User, UserRole, UserStatus};

/// Exact-match filters on the user table. `None` matches all.
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub station: Option<String>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|r| user.role == r)
            && self.station.as_ref().is_none_or(|s| &user.station == s)
            && self.status.is_none_or(|s| user.status == s)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Flip a user between active and disabled.
pub fn toggle_status(users: &mut [User], id: &str) -> Result<UserStatus> {
    let user = users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

    user.status = user.status.toggled();
    tracing::info!("User {} is now {}", user.name, user.status.label());
    Ok(user.status)
}

/// Add a new active user.
pub fn create(users: &mut Vec<User>, data: CreateUser) -> Result<User> {
    let name = data.name.trim();
    let email = data.email.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    if data.station_id.trim().is_empty() {
        return Err(AppError::validation("Station is required"));
    }
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
        return Err(AppError::validation(format!("A user with email {email} already exists")));
    }

    let next = users
        .iter()
        .filter_map(|u| u.id.strip_prefix("USER-").and_then(|n| n.parse::<u32>().ok()))
        .max()
        .unwrap_or(0)
        + 1;

    let user = User {
        id: format!("USER-{next:03}"),
        name: name.to_string(),
        email: email.to_string(),
        phone: data.phone.trim().to_string(),
        role: data.role,
        station_id: data.station_id,
        station: data.station,
        status: UserStatus::Active,
        last_login: None,
    };
    tracing::info!("User {} created as {}", user.name, user.role.label());
    users.push(user.clone());
    Ok(user)
}

/// Distinct station names in first-seen order.
pub fn stations(users: &[User]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for user in users {
        if !names.contains(&user.station) {
            names.push(user.station.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Esi Owusu".to_string(),
            email: email.to_string(),
            phone: "+233 555 100 009".to_string(),
            role: UserRole::Rider,
            station_id: "STATION-003".to_string(),
            station: "Tema Port".to_string(),
        }
    }

    #[test]
    fn test_filter_exact() {
        let users = seed::users();
        let filter = UserFilter {
            station: Some("Accra Central".to_string()),
            role: Some(UserRole::CallCenter),
            ..Default::default()
        };
        let shown = filter.apply(&users);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "Ama Mensah");

        let none = UserFilter {
            station: Some("Accra".to_string()),
            ..Default::default()
        };
        assert!(none.apply(&users).is_empty());
    }

    #[test]
    fn test_toggle_status() {
        let mut users = seed::users();
        assert_eq!(toggle_status(&mut users, "USER-002").unwrap(), UserStatus::Disabled);
        let filter = UserFilter {
            status: Some(UserStatus::Disabled),
            ..Default::default()
        };
        assert_eq!(filter.apply(&users).len(), 1);
        assert_eq!(toggle_status(&mut users, "USER-002").unwrap(), UserStatus::Active);
        assert!(toggle_status(&mut users, "USER-999").is_err());
    }

    #[test]
    fn test_create_user() {
        let mut users = seed::users();
        let user = create(&mut users, new_user("esi@example.com")).unwrap();
        assert_eq!(user.id, "USER-005");
        assert_eq!(user.status, UserStatus::Active);
        assert!(create(&mut users, new_user("ESI@example.com")).is_err());
        assert!(create(&mut users, new_user("not-an-email")).is_err());
    }

    #[test]
    fn test_stations_distinct() {
        assert_eq!(stations(&seed::users()), ["Accra Central", "Kumasi Hub"]);
    }
}
