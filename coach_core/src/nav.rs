//! Navigation model: named views, routes and the two role presentations.
//!
//! Switching role only changes which navigation items and which home view
//! are presented. It never changes what data can be read or mutated.

use crate::ExerciseId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which presentation the user is looking at
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Client,
    Trainer,
}

impl Role {
    pub fn toggle(self) -> Self {
        match self {
            Role::Client => Role::Trainer,
            Role::Trainer => Role::Client,
        }
    }

    /// Top-level view shown for this role
    pub fn home(self) -> View {
        match self {
            Role::Client => View::Overview,
            Role::Trainer => View::TrainerDashboard,
        }
    }

    pub fn nav_items(self) -> &'static [NavItem] {
        nav_items(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Trainer => write!(f, "trainer"),
        }
    }
}

impl FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "trainer" => Ok(Role::Trainer),
            other => Err(crate::Error::Validation(format!("unknown role: {}", other))),
        }
    }
}

/// A named screen of the application
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Overview,
    ExerciseDetail(ExerciseId),
    History,
    TrainerDashboard,
    Profile,
}

impl View {
    pub fn route(&self) -> String {
        match self {
            View::Overview => "/".into(),
            View::ExerciseDetail(id) => format!("/exercise/{}", id),
            View::History => "/history".into(),
            View::TrainerDashboard => "/trainer".into(),
            View::Profile => "/profile".into(),
        }
    }

    /// Parse a route such as `/exercise/3`; unknown routes yield `None`
    pub fn from_route(route: &str) -> Option<Self> {
        let path = route.trim().trim_end_matches('/');
        match path {
            "" => Some(View::Overview),
            "/history" => Some(View::History),
            "/trainer" => Some(View::TrainerDashboard),
            "/profile" => Some(View::Profile),
            _ => path
                .strip_prefix("/exercise/")
                .and_then(|id| id.parse::<u64>().ok())
                .map(|id| View::ExerciseDetail(ExerciseId(id))),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route())
    }
}

/// One entry of the bottom navigation bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
}

const CLIENT_NAV: [NavItem; 3] = [
    NavItem { label: "Today", route: "/" },
    NavItem { label: "History", route: "/history" },
    NavItem { label: "Profile", route: "/profile" },
];

const TRAINER_NAV: [NavItem; 3] = [
    NavItem { label: "Clients", route: "/trainer" },
    NavItem { label: "Analytics", route: "/history" },
    NavItem { label: "Settings", route: "/profile" },
];

/// Navigation items presented for `role`
pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Client => &CLIENT_NAV,
        Role::Trainer => &TRAINER_NAV,
    }
}
