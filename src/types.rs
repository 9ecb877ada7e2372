use serde::{Deserialize, Serialize};

/// Outcome of a single probe attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "message")]
pub enum ProbeOutcome {
    /// The device answered.
    Success,
    /// The probe completed but the device did not answer.
    Failure,
    /// No response arrived within the probe's timeout window.
    Timeout,
    /// The probe itself faulted (socket error, name resolution, spawn failure).
    Error(String),
    /// The probe never ran because the reachability gate already failed.
    Skipped,
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }

    pub fn was_attempted(&self) -> bool {
        !matches!(self, ProbeOutcome::Skipped)
    }
}

/// Diagnostic echo of whatever the device sent back to the datagram probe.
/// The content is never validated; any reply counts as success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatagramReply {
    pub payload: String,
    pub from: String,
}

/// Overall device state derived from the probe outcomes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    /// The device did not answer ICMP echo; no further probes were run.
    Unreachable,
    /// The device answers ping but the UDP service port is silent.
    ReachableNoService,
    /// The UDP service replied; the device firmware is up.
    ServiceUp,
}

impl DeviceStatus {
    /// Derive the overall status from the reachability and datagram outcomes.
    /// The stream probe is diagnostic only and does not affect the status.
    pub fn derive(reachability: &ProbeOutcome, datagram: &ProbeOutcome) -> Self {
        if !reachability.is_success() {
            DeviceStatus::Unreachable
        } else if datagram.is_success() {
            DeviceStatus::ServiceUp
        } else {
            DeviceStatus::ReachableNoService
        }
    }
}

/// Aggregate result of one full check run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProbeReport {
    pub target: String,
    pub checked_at: String,
    pub udp_port: u16,
    pub http_port: u16,
    pub reachability: ProbeOutcome,
    pub datagram: ProbeOutcome,
    pub stream: ProbeOutcome,
    /// Echoed reply from the UDP service when the datagram probe succeeded.
    pub datagram_reply: Option<DatagramReply>,
    /// Captured output of the external ping facility, kept on failure only.
    pub ping_transcript: Option<String>,
    pub status: DeviceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_unreachable_when_ping_fails() {
        let s = DeviceStatus::derive(&ProbeOutcome::Failure, &ProbeOutcome::Skipped);
        assert_eq!(s, DeviceStatus::Unreachable);
    }

    #[test]
    fn status_unreachable_when_ping_faults() {
        let s = DeviceStatus::derive(
            &ProbeOutcome::Error("spawn failed".into()),
            &ProbeOutcome::Skipped,
        );
        assert_eq!(s, DeviceStatus::Unreachable);
    }

    #[test]
    fn status_service_up_when_udp_replies() {
        let s = DeviceStatus::derive(&ProbeOutcome::Success, &ProbeOutcome::Success);
        assert_eq!(s, DeviceStatus::ServiceUp);
    }

    #[test]
    fn status_no_service_when_udp_times_out_or_faults() {
        for udp in [
            ProbeOutcome::Timeout,
            ProbeOutcome::Failure,
            ProbeOutcome::Error("network unreachable".into()),
        ] {
            let s = DeviceStatus::derive(&ProbeOutcome::Success, &udp);
            assert_eq!(s, DeviceStatus::ReachableNoService);
        }
    }

    #[test]
    fn skipped_is_not_attempted() {
        assert!(!ProbeOutcome::Skipped.was_attempted());
        assert!(ProbeOutcome::Timeout.was_attempted());
        assert!(!ProbeOutcome::Timeout.is_success());
    }
}
