use crate::config::CheckConfig;
use crate::types::ProbeOutcome;
use async_trait::async_trait;
use tokio::process::Command;
use tokio::time;

/// Result of one reachability check. The transcript is the captured output
/// of the external facility, kept only when the host did not answer so the
/// reporter can relay it.
#[derive(Debug, Clone)]
pub struct ReachabilityReport {
    pub outcome: ProbeOutcome,
    pub transcript: Option<String>,
}

/// Capability interface for the network-layer reachability check, so tests
/// can substitute a fake instead of spawning a real subprocess.
#[async_trait]
pub trait ReachabilityChecker: Send + Sync {
    async fn check(&self, target: &str, cfg: &CheckConfig) -> ReachabilityReport;
}

/// Reachability via the system `ping` binary: `cfg.ping_attempts` echo
/// requests with a `cfg.ping_reply_wait` per-reply wait, the whole
/// invocation bounded by `cfg.ping_deadline`.
pub struct SystemPing;

#[async_trait]
impl ReachabilityChecker for SystemPing {
    async fn check(&self, target: &str, cfg: &CheckConfig) -> ReachabilityReport {
        let reply_wait_secs = cfg.ping_reply_wait.as_secs().max(1);
        let mut command = Command::new("ping");
        command
            .arg("-c")
            .arg(cfg.ping_attempts.to_string())
            .arg("-W")
            .arg(reply_wait_secs.to_string())
            .arg(target)
            .kill_on_drop(true);

        match time::timeout(cfg.ping_deadline, command.output()).await {
            Ok(Ok(output)) => {
                if output.status.success() {
                    ReachabilityReport {
                        outcome: ProbeOutcome::Success,
                        transcript: None,
                    }
                } else {
                    let mut transcript = String::from_utf8_lossy(&output.stdout).to_string();
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    if !stderr.trim().is_empty() {
                        if !transcript.is_empty() {
                            transcript.push('\n');
                        }
                        transcript.push_str(stderr.trim_end());
                    }
                    ReachabilityReport {
                        outcome: ProbeOutcome::Failure,
                        transcript: Some(transcript),
                    }
                }
            }
            Ok(Err(e)) => ReachabilityReport {
                outcome: ProbeOutcome::Error(format!("failed to invoke ping: {e}")),
                transcript: None,
            },
            // kill_on_drop reaps the abandoned child when the future is dropped.
            Err(_) => ReachabilityReport {
                outcome: ProbeOutcome::Error(format!(
                    "ping did not complete within {:?}",
                    cfg.ping_deadline
                )),
                transcript: None,
            },
        }
    }
}
