// Demo mode: a built-in mock dataset served through the fetch pipeline
//
// Run with --demo (or DUGOUT_DEMO=1) to explore the full UI without a
// backend. Filtering mirrors the backend's observed semantics:
// case-insensitive substring match on names, inclusive numeric bounds,
// and unparseable numeric criteria ignored.

use crate::data::{BattedBall, Summary};
use crate::filters::Filters;
use std::collections::HashSet;

/// Shorthand for building one mock record
#[allow(clippy::too_many_arguments)]
fn ball(
    batter: &str,
    pitcher: &str,
    exit_speed: f64,
    launch_angle: f64,
    distance: f64,
    outcome: &str,
    date: &str,
    video: Option<&str>,
) -> BattedBall {
    BattedBall {
        batter: batter.to_string(),
        pitcher: pitcher.to_string(),
        exit_speed,
        launch_angle,
        exit_direction: Some(launch_angle * 0.6 - 8.0),
        hit_distance: Some(distance),
        hang_time: Some((distance / 90.0).max(0.4)),
        hit_spin_rate: Some(1500.0 + exit_speed * 8.0),
        play_outcome: outcome.to_string(),
        game_date: date.to_string(),
        video_link: video.map(str::to_string),
    }
}

/// Build the mock dataset (fixed contents, stable order)
pub fn dataset() -> Vec<BattedBall> {
    vec![
        ball("Acuna, Ronald", "Scherzer, Max", 105.3, 24.0, 421.0, "HomeRun", "2018-04-06", Some("https://example.com/v/acuna-hr.mp4")),
        ball("Freeman, Freddie", "deGrom, Jacob", 98.7, 13.5, 310.0, "Single", "2018-04-07", None),
        ball("Albies, Ozzie", "Syndergaard, Noah", 91.2, 35.0, 355.0, "FlyOut", "2018-04-08", None),
        ball("Markakis, Nick", "Nola, Aaron", 87.4, 8.0, 190.0, "Single", "2018-04-10", None),
        ball("Acuna, Ronald", "Nola, Aaron", 112.1, 28.5, 448.0, "HomeRun", "2018-04-12", Some("https://example.com/v/acuna-448.mp4")),
        ball("Swanson, Dansby", "Strasburg, Stephen", 79.8, -12.0, 12.0, "GroundOut", "2018-04-13", None),
        ball("Camargo, Johan", "Scherzer, Max", 95.0, 19.0, 338.0, "Double", "2018-04-15", None),
        ball("Freeman, Freddie", "Corbin, Patrick", 103.6, 31.0, 402.0, "HomeRun", "2018-04-18", Some("https://example.com/v/freeman-hr.mp4")),
        ball("Inciarte, Ender", "Wheeler, Zack", 84.2, 4.5, 145.0, "GroundOut", "2018-04-19", None),
        ball("Albies, Ozzie", "deGrom, Jacob", 99.9, 22.0, 371.0, "Double", "2018-04-21", None),
        ball("Flowers, Tyler", "Gray, Sonny", 89.5, 41.0, 298.0, "FlyOut", "2018-04-23", None),
        ball("Acuna, Ronald", "Corbin, Patrick", 108.4, 17.0, 389.0, "Double", "2018-04-25", None),
        ball("Swanson, Dansby", "Nola, Aaron", 93.3, 26.5, 344.0, "FlyOut", "2018-04-27", None),
        ball("Markakis, Nick", "Scherzer, Max", 101.0, 11.0, 288.0, "Single", "2018-04-29", None),
        ball("Freeman, Freddie", "Wheeler, Zack", 96.8, 0.0, 120.0, "GroundOut", "2018-05-01", None),
        ball("Camargo, Johan", "Strasburg, Stephen", 82.6, 52.0, 210.0, "PopOut", "2018-05-03", None),
        ball("Inciarte, Ender", "Gray, Sonny", 90.1, 15.5, 265.0, "Single", "2018-05-05", None),
        ball("Albies, Ozzie", "Corbin, Patrick", 106.7, 25.0, 415.0, "HomeRun", "2018-05-07", Some("https://example.com/v/albies-hr.mp4")),
        ball("Flowers, Tyler", "deGrom, Jacob", 76.3, -8.5, 35.0, "GroundOut", "2018-05-09", None),
        ball("Swanson, Dansby", "Wheeler, Zack", 100.5, 33.0, 397.0, "FlyOut", "2018-05-11", None),
    ]
}

/// Parse a numeric bound, ignoring text that is not a number
/// (the real backend coerces with `type=float` and drops failures)
fn bound(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Apply filter criteria to the dataset the way the backend does
pub fn apply_filters(records: &[BattedBall], filters: &Filters) -> Vec<BattedBall> {
    let batter = filters.batter.to_lowercase();
    let pitcher = filters.pitcher.to_lowercase();
    let min_speed = bound(&filters.min_exit_speed);
    let max_speed = bound(&filters.max_exit_speed);
    let min_angle = bound(&filters.min_launch_angle);
    let max_angle = bound(&filters.max_launch_angle);

    records
        .iter()
        .filter(|r| batter.is_empty() || r.batter.to_lowercase().contains(&batter))
        .filter(|r| pitcher.is_empty() || r.pitcher.to_lowercase().contains(&pitcher))
        .filter(|r| min_speed.is_none_or(|b| r.exit_speed >= b))
        .filter(|r| max_speed.is_none_or(|b| r.exit_speed <= b))
        .filter(|r| min_angle.is_none_or(|b| r.launch_angle >= b))
        .filter(|r| max_angle.is_none_or(|b| r.launch_angle <= b))
        .cloned()
        .collect()
}

/// Compute dataset-wide aggregates over the full (unfiltered) dataset
pub fn summarize(records: &[BattedBall]) -> Summary {
    let n = records.len();
    let batters: HashSet<&str> = records.iter().map(|r| r.batter.as_str()).collect();
    let pitchers: HashSet<&str> = records.iter().map(|r| r.pitcher.as_str()).collect();

    let avg = |f: fn(&BattedBall) -> f64| {
        if n == 0 {
            0.0
        } else {
            records.iter().map(f).sum::<f64>() / n as f64
        }
    };

    Summary {
        avg_exit_speed: avg(|r| r.exit_speed),
        avg_launch_angle: avg(|r| r.launch_angle),
        total_batted_balls: n as u64,
        unique_batters: batters.len() as u64,
        unique_pitchers: pitchers.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterField;

    #[test]
    fn test_no_filters_returns_everything() {
        let data = dataset();
        let result = apply_filters(&data, &Filters::default());
        assert_eq!(result.len(), data.len());
        // Order preserved
        assert_eq!(result[0], data[0]);
    }

    #[test]
    fn test_batter_substring_match_case_insensitive() {
        let data = dataset();
        let mut filters = Filters::default();
        filters.set(FilterField::Batter, "acuna".to_string());

        let result = apply_filters(&data, &filters);
        assert!(!result.is_empty());
        assert!(result.iter().all(|r| r.batter.contains("Acuna")));
    }

    #[test]
    fn test_numeric_bounds_are_inclusive() {
        let data = dataset();
        let mut filters = Filters::default();
        filters.set(FilterField::MinExitSpeed, "105.3".to_string());

        let result = apply_filters(&data, &filters);
        // The 105.3 record itself passes a min bound of 105.3
        assert!(result.iter().any(|r| r.exit_speed == 105.3));
        assert!(result.iter().all(|r| r.exit_speed >= 105.3));
    }

    #[test]
    fn test_zero_bound_is_a_real_constraint() {
        let data = dataset();
        let mut filters = Filters::default();
        filters.set(FilterField::MinLaunchAngle, "0".to_string());

        let result = apply_filters(&data, &filters);
        assert!(result.iter().all(|r| r.launch_angle >= 0.0));
        assert!(result.len() < data.len());
    }

    #[test]
    fn test_unparseable_bound_is_ignored() {
        let data = dataset();
        let mut filters = Filters::default();
        filters.set(FilterField::MinExitSpeed, "fast".to_string());

        let result = apply_filters(&data, &filters);
        assert_eq!(result.len(), data.len());
    }

    #[test]
    fn test_summarize_counts() {
        let data = dataset();
        let summary = summarize(&data);
        assert_eq!(summary.total_batted_balls, data.len() as u64);
        assert_eq!(summary.unique_batters, 8);
        assert_eq!(summary.unique_pitchers, 8);
        assert!(summary.avg_exit_speed > 70.0 && summary.avg_exit_speed < 115.0);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_batted_balls, 0);
        assert_eq!(summary.avg_exit_speed, 0.0);
    }
}
