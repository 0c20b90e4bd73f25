// Wire types for the players REST API.
//
// The backend stores the display name in a column called `player`, so the
// JSON field is `player` on the way in and out. `name` is accepted as an
// alias when reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player row as returned by every players endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: i64,
    #[serde(rename = "player", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub points: i64,
}

/// Body of `POST /api/players`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlayer<'a> {
    #[serde(rename = "player")]
    pub name: &'a str,
    pub points: i64,
}

/// Body of `PUT /api/players/{id}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointsUpdate {
    pub points: i64,
}

/// Response of the `GET /health` liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    /// Whether the backend reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_reads_player_column() {
        let rec: PlayerRecord =
            serde_json::from_value(json!({"id": 3, "player": "Ann", "points": 12})).unwrap();
        assert_eq!(rec.name, "Ann");
        assert_eq!(rec.points, 12);
    }

    #[test]
    fn record_accepts_name_alias_and_missing_points() {
        let rec: PlayerRecord = serde_json::from_value(json!({"id": 4, "name": "Bo"})).unwrap();
        assert_eq!(rec.name, "Bo");
        assert_eq!(rec.points, 0);
    }

    #[test]
    fn new_player_serializes_as_player_column() {
        let body = serde_json::to_value(NewPlayer {
            name: "Cy",
            points: 0,
        })
        .unwrap();
        assert_eq!(body, json!({"player": "Cy", "points": 0}));
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let health: HealthStatus = serde_json::from_value(
            json!({"status": "OK", "timestamp": "2024-06-15T10:30:00.000Z"}),
        )
        .unwrap();
        assert!(health.is_ok());
    }
}
