// vespa-logfmt - core/filter.rs
//
// Record selection. All active filters are AND-combined and evaluated in a
// fixed order; the first failing filter decides the rejection.
// Core layer: pure logic, no I/O or output.

use crate::core::component;
use crate::core::model::LogRecord;
use crate::core::toggle::ToggleState;
use crate::util::error::FilterError;
use regex::Regex;

/// Whether a record passed the filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// The record passed every filter.
    Accept,

    /// The record was dropped by the named filter.
    Reject(RejectReason),
}

/// Result of [`RecordFilter::check`].
///
/// A level can be learned whatever the decision: the level gate runs before
/// the selectors, so a record may teach a new level and still be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub decision: FilterDecision,

    /// Level added to the level set by this record. The caller warns once.
    pub learned_level: Option<String>,
}

impl FilterOutcome {
    pub fn is_accepted(&self) -> bool {
        self.decision == FilterDecision::Accept
    }
}

/// Which filter dropped a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Level,
    Host,
    Pid,
    Service,
    External,
}

/// Record selectors. Empty selectors match everything.
///
/// `component_regex` and `message_regex` are accepted and validated but do
/// not take part in selection.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Only records from this host (exact match).
    pub host: Option<String>,

    /// Only records from this pid, including any `/tid` suffix (exact match).
    pub pid: Option<String>,

    /// Only records from this service (exact match).
    pub service: Option<String>,

    /// Only records whose component is classified as internal.
    pub internal_only: bool,

    /// Component selector. Inert.
    pub component_regex: Option<Regex>,

    /// Message selector. Inert.
    pub message_regex: Option<Regex>,
}

impl RecordFilter {
    /// Returns true if no selector would reject a record on its own
    /// (the level gate always applies).
    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.pid.is_none() && self.service.is_none() && !self.internal_only
    }

    /// Set the component regex, compiling it. An empty pattern clears it.
    pub fn set_component_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        self.component_regex = compile("component", pattern)?;
        Ok(())
    }

    /// Set the message regex, compiling it. An empty pattern clears it.
    pub fn set_message_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        self.message_regex = compile("message", pattern)?;
        Ok(())
    }

    /// Runs `record` through the level gate and every configured selector.
    ///
    /// A level missing from `levels` is inserted as shown, which is why the
    /// level set is borrowed mutably. Later records with the same level are
    /// then handled like any known level.
    pub fn check(&self, record: &LogRecord, levels: &mut ToggleState) -> FilterOutcome {
        let learned_level = match levels.get(&record.level) {
            Some(true) => None,
            Some(false) => {
                return FilterOutcome {
                    decision: FilterDecision::Reject(RejectReason::Level),
                    learned_level: None,
                }
            }
            None => {
                levels.insert(&record.level, true);
                Some(record.level.clone())
            }
        };

        FilterOutcome {
            decision: self.select(record),
            learned_level,
        }
    }

    fn select(&self, record: &LogRecord) -> FilterDecision {
        if !selected(self.host.as_deref(), &record.host) {
            return FilterDecision::Reject(RejectReason::Host);
        }
        if !selected(self.pid.as_deref(), &record.pid) {
            return FilterDecision::Reject(RejectReason::Pid);
        }
        if !selected(self.service.as_deref(), &record.service) {
            return FilterDecision::Reject(RejectReason::Service);
        }
        if self.internal_only && !component::is_internal(&record.component) {
            return FilterDecision::Reject(RejectReason::External);
        }
        FilterDecision::Accept
    }
}

/// An unset or empty selector matches every value.
fn selected(selector: Option<&str>, value: &str) -> bool {
    match selector {
        None | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

fn compile(option: &'static str, pattern: &str) -> Result<Option<Regex>, FilterError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|e| FilterError::InvalidRegex {
            option,
            pattern: pattern.to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(level: &str, component: &str) -> LogRecord {
        LogRecord {
            timestamp: "1000.0".to_string(),
            host: "hostA".to_string(),
            pid: "42/7".to_string(),
            service: "container".to_string(),
            component: component.to_string(),
            level: level.to_string(),
            message_parts: vec!["hello".to_string()],
        }
    }

    #[test]
    fn test_default_levels() {
        let filter = RecordFilter::default();
        let mut levels = ToggleState::levels();
        assert_eq!(
            filter.check(&make_record("info", "x"), &mut levels).decision,
            FilterDecision::Accept
        );
        assert_eq!(
            filter.check(&make_record("debug", "x"), &mut levels).decision,
            FilterDecision::Reject(RejectReason::Level)
        );
    }

    #[test]
    fn test_unknown_level_is_learned_once() {
        let filter = RecordFilter::default();
        let mut levels = ToggleState::levels();
        let record = make_record("trace", "x");

        let first = filter.check(&record, &mut levels);
        assert_eq!(first.decision, FilterDecision::Accept);
        assert_eq!(first.learned_level.as_deref(), Some("trace"));
        assert_eq!(levels.get("trace"), Some(true));

        let second = filter.check(&record, &mut levels);
        assert_eq!(second.decision, FilterDecision::Accept);
        assert_eq!(second.learned_level, None);
    }

    #[test]
    fn test_unknown_level_is_learned_even_if_later_filter_rejects() {
        let filter = RecordFilter {
            host: Some("other".to_string()),
            ..Default::default()
        };
        let mut levels = ToggleState::levels();
        let outcome = filter.check(&make_record("trace", "x"), &mut levels);
        assert_eq!(outcome.decision, FilterDecision::Reject(RejectReason::Host));
        assert_eq!(outcome.learned_level.as_deref(), Some("trace"));
        assert_eq!(levels.get("trace"), Some(true));
    }

    #[test]
    fn test_exact_match_selectors() {
        let mut levels = ToggleState::levels();
        let record = make_record("info", "x");

        let by_host = RecordFilter {
            host: Some("hostA".to_string()),
            ..Default::default()
        };
        assert!(by_host.check(&record, &mut levels).is_accepted());

        let by_pid = RecordFilter {
            pid: Some("42".to_string()),
            ..Default::default()
        };
        assert_eq!(
            by_pid.check(&record, &mut levels).decision,
            FilterDecision::Reject(RejectReason::Pid)
        );

        let by_full_pid = RecordFilter {
            pid: Some("42/7".to_string()),
            ..Default::default()
        };
        assert!(by_full_pid.check(&record, &mut levels).is_accepted());

        let by_service = RecordFilter {
            service: Some("searchnode".to_string()),
            ..Default::default()
        };
        assert_eq!(
            by_service.check(&record, &mut levels).decision,
            FilterDecision::Reject(RejectReason::Service)
        );
    }

    #[test]
    fn test_empty_selector_matches_everything() {
        let filter = RecordFilter {
            host: Some(String::new()),
            ..Default::default()
        };
        let mut levels = ToggleState::levels();
        assert!(filter.check(&make_record("info", "x"), &mut levels).is_accepted());
    }

    #[test]
    fn test_internal_only() {
        let filter = RecordFilter {
            internal_only: true,
            ..Default::default()
        };
        let mut levels = ToggleState::levels();
        assert!(filter
            .check(&make_record("info", "Container.ai.vespa.Foo"), &mut levels)
            .is_accepted());
        assert_eq!(
            filter
                .check(&make_record("info", "Container.com.other.Foo"), &mut levels)
                .decision,
            FilterDecision::Reject(RejectReason::External)
        );
    }

    #[test]
    fn test_level_gate_runs_first() {
        let filter = RecordFilter {
            host: Some("other".to_string()),
            ..Default::default()
        };
        let mut levels = ToggleState::levels();
        assert_eq!(
            filter.check(&make_record("debug", "x"), &mut levels).decision,
            FilterDecision::Reject(RejectReason::Level)
        );
    }

    #[test]
    fn test_regex_selectors_are_inert() {
        let mut filter = RecordFilter::default();
        filter.set_component_regex("^NoSuchComponent$").unwrap();
        filter.set_message_regex("^nothing matches this$").unwrap();
        assert!(filter.component_regex.is_some());
        let mut levels = ToggleState::levels();
        assert_eq!(
            filter.check(&make_record("info", "x"), &mut levels).decision,
            FilterDecision::Accept
        );
    }

    #[test]
    fn test_invalid_regex() {
        let mut filter = RecordFilter::default();
        let err = filter.set_message_regex("[invalid").unwrap_err();
        assert!(err.to_string().contains("message"));
        filter.set_component_regex("").unwrap();
        assert!(filter.component_regex.is_none());
    }
}
