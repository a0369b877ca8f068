use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a GitHub user profile from the `/users/{username}` API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

impl GitHubUser {
    /// Name shown on the card, falling back to the login.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }
}

/// A single repository from the `/users/{username}/repos` API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubRepo {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl GitHubRepo {
    /// The primary language, if the API reported a non-empty one.
    pub fn language_tag(&self) -> Option<&str> {
        self.language.as_deref().filter(|lang| !lang.is_empty())
    }
}

/// A user profile together with its repositories, as fetched in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileBundle {
    pub user: GitHubUser,
    pub repos: Vec<GitHubRepo>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response from the randomuser.me API.
#[derive(Debug, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<UserRecord>,
}

/// One synthetic profile from randomuser.me.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: PersonName,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub location: Location,
    pub registered: Registered,
    pub picture: Picture,
    pub login: Login,
}

impl UserRecord {
    /// Title, first and last name run together, as matched by the finder.
    pub fn full_name_key(&self) -> String {
        format!("{}{}{}", self.name.title, self.name.first, self.name.last)
    }

    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.name.title, self.name.first, self.name.last)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonName {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registered {
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_with_null_counts_deserializes_as_zero() {
        let json = r#"{
            "name": "x",
            "stargazers_count": null,
            "language": null,
            "updated_at": "2024-01-02T03:04:05Z"
        }"#;
        let repo: GitHubRepo = serde_json::from_str(json).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.language_tag(), None);
    }

    #[test]
    fn empty_language_is_not_a_tag() {
        let repo: GitHubRepo = serde_json::from_str(
            r#"{"language":"","updated_at":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(repo.language_tag(), None);
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let user: GitHubUser = serde_json::from_str(
            r#"{"login":"octocat","name":"  ","created_at":"2011-01-25T18:44:36Z"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "octocat");
        assert_eq!(user.followers, 0);
    }

    #[test]
    fn random_user_record_parses() {
        let json = r#"{
            "gender": "female",
            "name": {"title": "Ms", "first": "Ava", "last": "Stone"},
            "location": {"city": "Perth", "country": "Australia"},
            "email": "ava.stone@example.com",
            "login": {"uuid": "abc", "username": "bluecat42"},
            "registered": {"date": "2015-06-01T10:00:00.000Z", "age": 9},
            "phone": "02-1234-5678",
            "picture": {"large": "l.jpg", "medium": "m.jpg", "thumbnail": "t.jpg"}
        }"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_name_key(), "MsAvaStone");
        assert_eq!(record.location.country, "Australia");
        assert_eq!(record.login.username, "bluecat42");
    }
}
