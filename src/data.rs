// Data model for the batted-ball backend
//
// The records endpoint returns JSON objects with fixed upper-case field
// names (EXIT_SPEED, LAUNCH_ANGLE, ...). serde renames map them onto
// idiomatic Rust names here. The backend substitutes empty strings for
// missing values, so secondary numeric fields deserialize through a
// tolerant helper that treats "" and null as absent.

use serde::{Deserialize, Deserializer, Serialize};

/// One batted-ball event as returned by `GET /api/data`
///
/// Records carry no persistent id; identity is positional within the
/// result set, which is why the chart and the detail view must always
/// derive from the same snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattedBall {
    #[serde(rename = "BATTER")]
    pub batter: String,

    #[serde(rename = "PITCHER")]
    pub pitcher: String,

    /// Exit speed in mph - one of the two plot coordinates
    #[serde(rename = "EXIT_SPEED")]
    pub exit_speed: f64,

    /// Launch angle in degrees - the other plot coordinate
    #[serde(rename = "LAUNCH_ANGLE")]
    pub launch_angle: f64,

    /// Exit direction in degrees
    #[serde(rename = "EXIT_DIRECTION", default, deserialize_with = "empty_as_none")]
    pub exit_direction: Option<f64>,

    /// Hit distance in feet
    #[serde(rename = "HIT_DISTANCE", default, deserialize_with = "empty_as_none")]
    pub hit_distance: Option<f64>,

    /// Hang time in seconds
    #[serde(rename = "HANG_TIME", default, deserialize_with = "empty_as_none")]
    pub hang_time: Option<f64>,

    /// Hit spin rate in rpm
    #[serde(rename = "HIT_SPIN_RATE", default, deserialize_with = "empty_as_none")]
    pub hit_spin_rate: Option<f64>,

    /// Categorical outcome string ("HomeRun", "Out", ...)
    #[serde(rename = "PLAY_OUTCOME")]
    pub play_outcome: String,

    #[serde(rename = "GAME_DATE")]
    pub game_date: String,

    /// Present only for some records; the backend sends "" when absent
    #[serde(rename = "VIDEO_LINK", default)]
    pub video_link: Option<String>,
}

impl BattedBall {
    /// Video link, if present and non-empty
    pub fn video(&self) -> Option<&str> {
        self.video_link.as_deref().filter(|v| !v.is_empty())
    }
}

/// Deserialize a float that the backend may have replaced with "" or null
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrEmpty {
        Num(f64),
        Text(String),
        Null,
    }

    match NumOrEmpty::deserialize(deserializer)? {
        NumOrEmpty::Num(n) => Ok(Some(n)),
        // A non-empty string that parses as a number still counts
        NumOrEmpty::Text(s) if !s.trim().is_empty() => Ok(s.trim().parse().ok()),
        _ => Ok(None),
    }
}

/// Dataset-wide aggregates from `GET /api/summary`
///
/// Deliberately not filter-scoped: the backend computes these over the
/// entire dataset, and the card keeps showing them regardless of the
/// active filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub avg_exit_speed: f64,
    pub avg_launch_angle: f64,
    pub total_batted_balls: u64,
    pub unique_batters: u64,
    pub unique_pitchers: u64,
}

impl Summary {
    /// Average exit speed for display, one decimal plus unit: "87.7 mph"
    pub fn avg_exit_speed_display(&self) -> String {
        format!("{:.1} mph", self.avg_exit_speed)
    }

    /// Average launch angle for display, one decimal plus unit: "12.3°"
    pub fn avg_launch_angle_display(&self) -> String {
        format!("{:.1}°", self.avg_launch_angle)
    }
}

/// Format an optional float with a unit suffix, "-" when absent
pub fn opt_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_upper_case_fields() {
        let json = r#"{
            "BATTER": "Smith, John",
            "PITCHER": "Jones, Bob",
            "EXIT_SPEED": 101.2,
            "LAUNCH_ANGLE": 27.5,
            "EXIT_DIRECTION": -12.0,
            "HIT_DISTANCE": 410.0,
            "HANG_TIME": 5.6,
            "HIT_SPIN_RATE": 2250.0,
            "PLAY_OUTCOME": "HomeRun",
            "GAME_DATE": "2018-05-22",
            "VIDEO_LINK": "https://example.com/clip.mp4"
        }"#;

        let record: BattedBall = serde_json::from_str(json).unwrap();
        assert_eq!(record.batter, "Smith, John");
        assert_eq!(record.exit_speed, 101.2);
        assert_eq!(record.launch_angle, 27.5);
        assert_eq!(record.hit_distance, Some(410.0));
        assert_eq!(record.video(), Some("https://example.com/clip.mp4"));
    }

    #[test]
    fn test_parse_record_missing_optionals() {
        // The backend fills missing values with "" - must not be an error
        let json = r#"{
            "BATTER": "Doe, Jane",
            "PITCHER": "Roe, Rick",
            "EXIT_SPEED": 88.0,
            "LAUNCH_ANGLE": -5.0,
            "EXIT_DIRECTION": "",
            "HIT_DISTANCE": "",
            "HANG_TIME": "",
            "HIT_SPIN_RATE": "",
            "PLAY_OUTCOME": "Out",
            "GAME_DATE": "2018-06-01",
            "VIDEO_LINK": ""
        }"#;

        let record: BattedBall = serde_json::from_str(json).unwrap();
        assert_eq!(record.hit_distance, None);
        assert_eq!(record.hang_time, None);
        assert_eq!(record.video(), None);
    }

    #[test]
    fn test_parse_record_omitted_fields() {
        let json = r#"{
            "BATTER": "Doe, Jane",
            "PITCHER": "Roe, Rick",
            "EXIT_SPEED": 88.0,
            "LAUNCH_ANGLE": -5.0,
            "PLAY_OUTCOME": "Out",
            "GAME_DATE": "2018-06-01"
        }"#;

        let record: BattedBall = serde_json::from_str(json).unwrap();
        assert_eq!(record.exit_direction, None);
        assert_eq!(record.video_link, None);
    }

    #[test]
    fn test_parse_summary() {
        let json = r#"{
            "avg_exit_speed": 87.654,
            "avg_launch_angle": 12.345,
            "total_batted_balls": 490,
            "unique_batters": 198,
            "unique_pitchers": 210
        }"#;

        let summary: Summary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_batted_balls, 490);
    }

    #[test]
    fn test_summary_display_rounds_to_one_decimal() {
        let summary = Summary {
            avg_exit_speed: 87.654,
            avg_launch_angle: 12.345,
            total_batted_balls: 490,
            unique_batters: 198,
            unique_pitchers: 210,
        };

        assert_eq!(summary.avg_exit_speed_display(), "87.7 mph");
        assert_eq!(summary.avg_launch_angle_display(), "12.3°");
    }

    #[test]
    fn test_opt_unit() {
        assert_eq!(opt_unit(Some(410.0), "ft"), "410 ft");
        assert_eq!(opt_unit(None, "ft"), "-");
    }
}
