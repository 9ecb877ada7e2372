use crate::config::CheckConfig;
use crate::ping::ReachabilityChecker;
use crate::probe::{datagram_probe, stream_probe};
use crate::types::{DeviceStatus, ProbeOutcome, ProbeReport};
use time::{format_description::well_known, OffsetDateTime};

/// Run the full probe sequence against `cfg.target`.
///
/// The reachability check gates everything: if the host does not answer
/// (failure and fault alike), the datagram and stream probes are never
/// attempted and the report carries `Skipped` for both. When the host is
/// reachable, both remaining probes run regardless of each other's outcome.
///
/// Never fails: every probe fault is folded into its outcome.
pub async fn run_check(cfg: &CheckConfig, checker: &dyn ReachabilityChecker) -> ProbeReport {
    let checked_at = now_rfc3339();
    let reach = checker.check(&cfg.target, cfg).await;

    if !reach.outcome.is_success() {
        let status = DeviceStatus::derive(&reach.outcome, &ProbeOutcome::Skipped);
        return ProbeReport {
            target: cfg.target.clone(),
            checked_at,
            udp_port: cfg.udp_port,
            http_port: cfg.http_port,
            reachability: reach.outcome,
            datagram: ProbeOutcome::Skipped,
            stream: ProbeOutcome::Skipped,
            datagram_reply: None,
            ping_transcript: reach.transcript,
            status,
        };
    }

    let dgram = datagram_probe(&cfg.target, cfg.udp_port, cfg.probe_timeout).await;
    let stream = stream_probe(&cfg.target, cfg.http_port, cfg.probe_timeout).await;

    let status = DeviceStatus::derive(&reach.outcome, &dgram.outcome);
    ProbeReport {
        target: cfg.target.clone(),
        checked_at,
        udp_port: cfg.udp_port,
        http_port: cfg.http_port,
        reachability: reach.outcome,
        datagram: dgram.outcome,
        stream,
        datagram_reply: dgram.reply,
        ping_transcript: reach.transcript,
        status,
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
