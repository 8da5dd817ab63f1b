use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub username: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path_with_namespace: String,
}

impl Project {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let name = name.into();
        Project {
            id,
            path_with_namespace: name.clone(),
            name,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub authored_date: Option<DateTime<FixedOffset>>,
}
