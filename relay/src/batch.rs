use crate::config::RelayConfig;

/// Buffers the serialized metric lines for one sampling instant.
///
/// Every point appended here carries the timestamp fixed at construction, so
/// the proxy sees all readings from one snapshot at the same instant. A new
/// agent is created per polling cycle, flushed once, then discarded.
pub struct BatchAgent {
    timestamp: i64,
    default_source: String,
    lines: Vec<String>,
}

impl BatchAgent {
    /// `timestamp` is seconds since the epoch; it applies to the whole batch.
    pub fn new(timestamp: i64, config: &RelayConfig) -> Self {
        Self {
            timestamp,
            default_source: config.default_source.clone(),
            lines: Vec::new(),
        }
    }

    /// Serialize one metric point and buffer it.
    ///
    /// `None` means the sensor had no reading this cycle; the point is skipped
    /// without error. A value of 0.0 is a real reading and is emitted.
    /// `tags`, when present, must already carry its leading space and is
    /// appended verbatim.
    pub fn append(
        &mut self,
        name: &str,
        value: Option<f64>,
        source: Option<&str>,
        tags: Option<&str>,
    ) {
        let Some(value) = value else { return };
        let source = source.unwrap_or(&self.default_source);
        let mut line = format!("{} {:.6} {} source={}", name, value, self.timestamp, source);
        if let Some(tags) = tags {
            line.push_str(tags);
        }
        self.lines.push(line);
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Buffered lines in append order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(timestamp: i64) -> BatchAgent {
        BatchAgent::new(timestamp, &RelayConfig::default())
    }

    #[test]
    fn test_append_formats_line() {
        let mut batch = agent(1_700_000_000);
        batch.append("robot.batteryvolts", Some(3.7), Some("robot-1"), None);

        assert_eq!(
            batch.lines(),
            &["robot.batteryvolts 3.700000 1700000000 source=robot-1"]
        );
    }

    #[test]
    fn test_append_six_decimal_places() {
        let mut batch = agent(42);
        batch.append("x.metric", Some(3.14159265), Some("dev1"), None);

        assert_eq!(batch.lines(), &["x.metric 3.141593 42 source=dev1"]);
    }

    #[test]
    fn test_absent_value_emits_nothing() {
        let mut batch = agent(42);
        batch.append("robot.distance", None, None, None);

        assert!(batch.is_empty());
    }

    #[test]
    fn test_zero_is_a_real_reading() {
        let mut batch = agent(42);
        batch.append("robot.lspeed", Some(0.0), None, None);

        assert_eq!(batch.len(), 1);
        assert!(batch.lines()[0].starts_with("robot.lspeed 0.000000"));
    }

    #[test]
    fn test_default_source() {
        let mut batch = agent(42);
        batch.append("robot.batterylevel", Some(2.0), None, None);

        assert_eq!(batch.lines(), &["robot.batterylevel 2.000000 42 source=my_vector"]);
    }

    #[test]
    fn test_tags_appended_verbatim() {
        let mut batch = agent(42);
        batch.append(
            "robot.currentstate",
            Some(1.0),
            None,
            Some(" IS_CHARGING=1 IS_ON_CHARGER=1"),
        );

        assert_eq!(
            batch.lines(),
            &["robot.currentstate 1.000000 42 source=my_vector IS_CHARGING=1 IS_ON_CHARGER=1"]
        );
    }

    #[test]
    fn test_append_order_preserved() {
        let mut batch = agent(42);
        batch.append("b", Some(2.0), None, None);
        batch.append("a", Some(1.0), None, None);
        batch.append("c", None, None, None);
        batch.append("c", Some(3.0), None, None);

        let names: Vec<&str> = batch
            .lines()
            .iter()
            .map(|l| l.split(' ').next().unwrap())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
