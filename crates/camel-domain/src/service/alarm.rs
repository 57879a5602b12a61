//! Out-of-range net weight alarm

use tracing::debug;

use crate::provider::Notifier;

/// Lowest plausible net weight (kg)
pub const MIN_NET_WEIGHT_KG: f64 = 0.0;

/// Highest plausible net weight (kg)
pub const MAX_NET_WEIGHT_KG: f64 = 40_000.0;

pub const ALARM_MESSAGE: &str = "Weight out of expected range. Please verify measurements.";

/// True when a net weight is implausible for a single camel load
pub fn is_out_of_range(net_weight: f64) -> bool {
    net_weight < MIN_NET_WEIGHT_KG || net_weight > MAX_NET_WEIGHT_KG
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlarmSignal {
    #[default]
    Quiet,
    Raised,
}

impl AlarmSignal {
    pub fn is_raised(self) -> bool {
        self == AlarmSignal::Raised
    }

    /// Warning text to show next to the form, if any
    pub fn message(self) -> Option<&'static str> {
        match self {
            AlarmSignal::Quiet => None,
            AlarmSignal::Raised => Some(ALARM_MESSAGE),
        }
    }
}

/// Evaluates the alarm rule and fires the injected notifier
///
/// Never blocks a submit; it only signals.
pub struct AlarmEvaluator {
    enabled: bool,
    signal: AlarmSignal,
    notifier: Box<dyn Notifier>,
}

impl AlarmEvaluator {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            enabled: true,
            signal: AlarmSignal::Quiet,
            notifier,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Signal from the most recent evaluation
    pub fn signal(&self) -> AlarmSignal {
        self.signal
    }

    /// Switch alarms on or off and re-evaluate the current net weight
    pub fn set_enabled(&mut self, enabled: bool, net_weight: f64) -> AlarmSignal {
        self.enabled = enabled;
        self.evaluate(net_weight)
    }

    pub fn evaluate(&mut self, net_weight: f64) -> AlarmSignal {
        self.signal = if self.enabled && is_out_of_range(net_weight) {
            if let Err(e) = self.notifier.notify() {
                debug!("alarm notification failed: {}", e);
            }
            AlarmSignal::Raised
        } else {
            AlarmSignal::Quiet
        };
        self.signal
    }
}

impl std::fmt::Debug for AlarmEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmEvaluator")
            .field("enabled", &self.enabled)
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camel_types::NotifyError;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingNotifier {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    impl Notifier for CountingNotifier {
        fn notify(&self) -> Result<(), NotifyError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(NotifyError::Disabled)
            } else {
                Ok(())
            }
        }
    }

    fn evaluator(fail: bool) -> (AlarmEvaluator, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let notifier = CountingNotifier {
            calls: Rc::clone(&calls),
            fail,
        };
        (AlarmEvaluator::new(Box::new(notifier)), calls)
    }

    #[test]
    fn test_range_boundaries() {
        assert!(!is_out_of_range(0.0));
        assert!(!is_out_of_range(30000.0));
        assert!(!is_out_of_range(40000.0));
        assert!(is_out_of_range(-0.1));
        assert!(is_out_of_range(-30000.0));
        assert!(is_out_of_range(40000.5));
    }

    #[test]
    fn test_raises_and_notifies_when_enabled() {
        let (mut alarm, calls) = evaluator(false);
        assert_eq!(alarm.evaluate(-30000.0), AlarmSignal::Raised);
        assert_eq!(calls.get(), 1);
        assert_eq!(alarm.signal().message(), Some(ALARM_MESSAGE));
        assert_eq!(alarm.evaluate(30000.0), AlarmSignal::Quiet);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_disabled_alarm_is_silent() {
        let (alarm, calls) = evaluator(false);
        let mut alarm = alarm.with_enabled(false);
        assert_eq!(alarm.evaluate(50000.0), AlarmSignal::Quiet);
        assert_eq!(calls.get(), 0);
        assert_eq!(alarm.signal().message(), None);
    }

    #[test]
    fn test_notifier_failure_is_swallowed() {
        let (mut alarm, calls) = evaluator(true);
        assert_eq!(alarm.evaluate(50000.0), AlarmSignal::Raised);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_enabling_reevaluates() {
        let (alarm, calls) = evaluator(false);
        let mut alarm = alarm.with_enabled(false);
        assert_eq!(alarm.evaluate(-1.0), AlarmSignal::Quiet);
        assert_eq!(alarm.set_enabled(true, -1.0), AlarmSignal::Raised);
        assert_eq!(calls.get(), 1);
        assert_eq!(alarm.set_enabled(false, -1.0), AlarmSignal::Quiet);
    }
}
