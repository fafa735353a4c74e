// Filter criteria and query encoding
//
// Filters hold the six criteria exactly as the user typed them. The empty
// string is the sentinel for "no constraint" - it is never transmitted,
// which keeps "unset" distinct from "zero". Encoding is pure and emits
// fields in fixed declaration order so output is deterministic.

/// The six filter criteria, stored as raw text
///
/// `set()` is the only mutator: it replaces one field and preserves the
/// rest, so an edit can never clobber another field's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub batter: String,
    pub pitcher: String,
    pub min_exit_speed: String,
    pub max_exit_speed: String,
    pub min_launch_angle: String,
    pub max_launch_angle: String,
}

/// Names the individual criteria for field-level edits and form focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Batter,
    Pitcher,
    MinExitSpeed,
    MaxExitSpeed,
    MinLaunchAngle,
    MaxLaunchAngle,
}

impl FilterField {
    /// All fields in declaration (= encoding) order
    pub const ALL: [FilterField; 6] = [
        FilterField::Batter,
        FilterField::Pitcher,
        FilterField::MinExitSpeed,
        FilterField::MaxExitSpeed,
        FilterField::MinLaunchAngle,
        FilterField::MaxLaunchAngle,
    ];

    /// Query parameter name on the wire
    pub fn key(self) -> &'static str {
        match self {
            FilterField::Batter => "batter",
            FilterField::Pitcher => "pitcher",
            FilterField::MinExitSpeed => "minExitSpeed",
            FilterField::MaxExitSpeed => "maxExitSpeed",
            FilterField::MinLaunchAngle => "minLaunchAngle",
            FilterField::MaxLaunchAngle => "maxLaunchAngle",
        }
    }

    /// Human label for the filter form
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Batter => "Batter",
            FilterField::Pitcher => "Pitcher",
            FilterField::MinExitSpeed => "Min Exit Speed",
            FilterField::MaxExitSpeed => "Max Exit Speed",
            FilterField::MinLaunchAngle => "Min Launch Angle",
            FilterField::MaxLaunchAngle => "Max Launch Angle",
        }
    }
}

impl Filters {
    /// Current value of one field
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Batter => &self.batter,
            FilterField::Pitcher => &self.pitcher,
            FilterField::MinExitSpeed => &self.min_exit_speed,
            FilterField::MaxExitSpeed => &self.max_exit_speed,
            FilterField::MinLaunchAngle => &self.min_launch_angle,
            FilterField::MaxLaunchAngle => &self.max_launch_angle,
        }
    }

    /// Replace exactly one field, preserving all others
    pub fn set(&mut self, field: FilterField, value: String) {
        let slot = match field {
            FilterField::Batter => &mut self.batter,
            FilterField::Pitcher => &mut self.pitcher,
            FilterField::MinExitSpeed => &mut self.min_exit_speed,
            FilterField::MaxExitSpeed => &mut self.max_exit_speed,
            FilterField::MinLaunchAngle => &mut self.min_launch_angle,
            FilterField::MaxLaunchAngle => &mut self.max_launch_angle,
        };
        *slot = value;
    }

    /// Append one typed character to a field
    pub fn push_char(&mut self, field: FilterField, ch: char) {
        let mut value = self.get(field).to_string();
        value.push(ch);
        self.set(field, value);
    }

    /// Delete the last character of a field (backspace)
    pub fn pop_char(&mut self, field: FilterField) {
        let mut value = self.get(field).to_string();
        value.pop();
        self.set(field, value);
    }

    /// True when every criterion is unset
    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Query parameters to send: non-empty fields only, declaration order
    ///
    /// Values pass through literally ("0" is valid and included);
    /// percent-escaping is the HTTP layer's concern.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        FilterField::ALL
            .iter()
            .filter(|f| !self.get(**f).is_empty())
            .map(|f| (f.key(), self.get(*f)))
            .collect()
    }

    /// Deterministic query string for logging and tests: "k=v&k=v"
    pub fn encode(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_all_empty_yields_empty_query() {
        let filters = Filters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.encode(), "");
        assert!(filters.pairs().is_empty());
    }

    #[test]
    fn test_encode_includes_only_set_fields() {
        // Scenario: batter + minExitSpeed set, everything else omitted
        let mut filters = Filters::default();
        filters.set(FilterField::Batter, "Smith".to_string());
        filters.set(FilterField::MinExitSpeed, "95".to_string());

        assert_eq!(filters.encode(), "batter=Smith&minExitSpeed=95");
    }

    #[test]
    fn test_encode_zero_is_a_valid_value() {
        // "0" is a real constraint, distinct from unset
        let mut filters = Filters::default();
        filters.set(FilterField::MinLaunchAngle, "0".to_string());

        assert_eq!(filters.encode(), "minLaunchAngle=0");
    }

    #[test]
    fn test_encode_order_is_declaration_order() {
        let mut filters = Filters::default();
        filters.set(FilterField::MaxLaunchAngle, "45".to_string());
        filters.set(FilterField::Pitcher, "Jones".to_string());

        // Pitcher declared before maxLaunchAngle, regardless of set() order
        assert_eq!(filters.encode(), "pitcher=Jones&maxLaunchAngle=45");
    }

    #[test]
    fn test_set_preserves_other_fields() {
        let mut filters = Filters::default();
        filters.set(FilterField::Batter, "Smith".to_string());
        filters.set(FilterField::Pitcher, "Jones".to_string());

        assert_eq!(filters.get(FilterField::Batter), "Smith");
        assert_eq!(filters.get(FilterField::Pitcher), "Jones");
    }

    #[test]
    fn test_push_and_pop_char() {
        let mut filters = Filters::default();
        filters.push_char(FilterField::Batter, 'S');
        filters.push_char(FilterField::Batter, 'm');
        assert_eq!(filters.get(FilterField::Batter), "Sm");

        filters.pop_char(FilterField::Batter);
        assert_eq!(filters.get(FilterField::Batter), "S");

        // Backspace on an empty field is a no-op
        filters.pop_char(FilterField::Pitcher);
        assert_eq!(filters.get(FilterField::Pitcher), "");
    }
}
