// Turns raw `sc` output into a service status.

use super::model::{RawQueryResult, ServiceName, ServiceStatus};

const FAILED_MARKER: &str = "FAILED";
const MISSING_MARKER: &str = "does not exist";
const RUNNING_MARKER: &str = "RUNNING";
const DISABLED_MARKER: &str = "DISABLED";

/// Which classification rule matched. First match wins, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NotFound,
    RunningEnabled,
    StoppedDisabled,
    Unclear,
}

impl Verdict {
    pub fn status(self) -> ServiceStatus {
        match self {
            Verdict::RunningEnabled => ServiceStatus::Enabled,
            Verdict::StoppedDisabled => ServiceStatus::Disabled,
            Verdict::NotFound | Verdict::Unclear => ServiceStatus::Unknown,
        }
    }

    /// The activity log line reported alongside this verdict.
    pub fn describe(self, name: &ServiceName) -> String {
        match self {
            Verdict::NotFound => format!("Service '{name}' not found."),
            Verdict::RunningEnabled => format!("Service {name} is RUNNING and ENABLED."),
            Verdict::StoppedDisabled => format!("Service {name} is STOPPED and DISABLED."),
            Verdict::Unclear => format!("Service {name} state unclear."),
        }
    }
}

pub fn assess(raw: &RawQueryResult) -> Verdict {
    if raw.query.contains(FAILED_MARKER) || raw.query.contains(MISSING_MARKER) {
        return Verdict::NotFound;
    }

    let running = raw.query.contains(RUNNING_MARKER);
    let disabled = raw.config.contains(DISABLED_MARKER);

    match (running, disabled) {
        (true, false) => Verdict::RunningEnabled,
        (false, true) => Verdict::StoppedDisabled,
        _ => Verdict::Unclear,
    }
}

pub fn classify(raw: &RawQueryResult) -> ServiceStatus {
    assess(raw).status()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(query: &str, config: &str) -> RawQueryResult {
        RawQueryResult {
            query: query.to_string(),
            config: config.to_string(),
        }
    }

    const QUERY_RUNNING: &str = "SERVICE_NAME: AristotleK12FilterService\n        TYPE               : 10  WIN32_OWN_PROCESS\n        STATE              : 4  RUNNING\n";
    const QUERY_STOPPED: &str = "SERVICE_NAME: AristotleK12FilterService\n        TYPE               : 10  WIN32_OWN_PROCESS\n        STATE              : 1  STOPPED\n";
    const QC_AUTO: &str = "[SC] QueryServiceConfig SUCCESS\n\nSERVICE_NAME: AristotleK12FilterService\n        START_TYPE         : 2   AUTO_START\n";
    const QC_DISABLED: &str = "[SC] QueryServiceConfig SUCCESS\n\nSERVICE_NAME: AristotleK12FilterService\n        START_TYPE         : 4   DISABLED\n";

    #[test]
    fn test_running_and_disabled_flag_truth_table() {
        assert_eq!(classify(&raw("RUNNING", "")), ServiceStatus::Enabled);
        assert_eq!(classify(&raw("STOPPED", "DISABLED")), ServiceStatus::Disabled);
        assert_eq!(classify(&raw("RUNNING", "DISABLED")), ServiceStatus::Unknown);
        assert_eq!(classify(&raw("STOPPED", "")), ServiceStatus::Unknown);
    }

    #[test]
    fn test_running_service_with_auto_start_is_enabled() {
        assert_eq!(assess(&raw(QUERY_RUNNING, QC_AUTO)), Verdict::RunningEnabled);
        assert_eq!(
            classify(&raw(QUERY_RUNNING, "DELAYED : False")),
            ServiceStatus::Enabled
        );
    }

    #[test]
    fn test_stopped_service_with_disabled_start_type_is_disabled() {
        assert_eq!(assess(&raw(QUERY_STOPPED, QC_DISABLED)), Verdict::StoppedDisabled);
        assert_eq!(
            classify(&raw("STATE : 1 STOPPED", "START_TYPE : DISABLED")),
            ServiceStatus::Disabled
        );
    }

    #[test]
    fn test_missing_service_is_unknown_whatever_the_config_says() {
        let missing = "[SC] EnumQueryServicesStatus:OpenService FAILED 1060:\n\nThe specified service does not exist as an installed service.\n";
        for config in ["", QC_DISABLED, QC_AUTO] {
            assert_eq!(assess(&raw(missing, config)), Verdict::NotFound);
        }
        assert_eq!(
            classify(&raw("The specified service does not exist as an installed service.", "")),
            ServiceStatus::Unknown
        );
    }

    #[test]
    fn test_failed_marker_wins_over_running() {
        assert_eq!(
            assess(&raw("OpenService FAILED 5: RUNNING", QC_AUTO)),
            Verdict::NotFound
        );
    }

    #[test]
    fn test_classify_is_repeatable() {
        let input = raw(QUERY_STOPPED, QC_DISABLED);
        assert_eq!(classify(&input), classify(&input));
    }

    #[test]
    fn test_describe_lines() {
        let name = ServiceName::new("Svc");
        assert_eq!(Verdict::NotFound.describe(&name), "Service 'Svc' not found.");
        assert_eq!(
            Verdict::RunningEnabled.describe(&name),
            "Service Svc is RUNNING and ENABLED."
        );
        assert_eq!(
            Verdict::StoppedDisabled.describe(&name),
            "Service Svc is STOPPED and DISABLED."
        );
        assert_eq!(Verdict::Unclear.describe(&name), "Service Svc state unclear.");
    }
}
