use crate::types::{DeviceStatus, ProbeOutcome, ProbeReport};
use std::fmt::Write;

/// Checklist printed when the device does not answer ping at all.
const UNREACHABLE_CHECKLIST: &[&str] = &[
    "Device WiFi credentials",
    "Static IP configuration",
    "Host and device on the same WiFi network",
    "Device power and WiFi connection",
];

/// Render the full human-readable report: header, per-test status lines,
/// then either the unreachable checklist (truncated summary) or the
/// three-row summary table plus guidance.
pub fn render_report(report: &ProbeReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "ESP32 connection test");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out, "Target     : {}", report.target);
    let _ = writeln!(out, "Checked at : {}", report.checked_at);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Test 1: network reachability ... {}",
        outcome_label(&report.reachability)
    );

    if report.status == DeviceStatus::Unreachable {
        if let Some(transcript) = &report.ping_transcript {
            for line in transcript.lines().filter(|l| !l.trim().is_empty()) {
                let _ = writeln!(out, "    {line}");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Device not reachable on the network.");
        let _ = writeln!(out, "Check:");
        for (i, item) in UNREACHABLE_CHECKLIST.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, item);
        }
        return out;
    }

    let _ = writeln!(
        out,
        "Test 2: UDP service probe (port {}) ... {}{}",
        report.udp_port,
        outcome_label(&report.datagram),
        report
            .datagram_reply
            .as_ref()
            .map(|r| format!(" — reply {:?} from {}", r.payload, r.from))
            .unwrap_or_default()
    );
    let _ = writeln!(
        out,
        "Test 3: HTTP connect probe (port {}) ... {}",
        report.http_port,
        outcome_label(&report.stream)
    );
    let _ = writeln!(out);

    render_summary_table(&mut out, report);
    let _ = writeln!(out);

    match report.status {
        DeviceStatus::ServiceUp => {
            let _ = writeln!(
                out,
                "Device service is responding on UDP port {}.",
                report.udp_port
            );
            let _ = writeln!(out, "Next: run the demo workload.");
        }
        DeviceStatus::ReachableNoService => {
            let _ = writeln!(out, "Device is online but the service is not responding.");
            let _ = writeln!(out, "Next: flash the firmware.");
        }
        // Handled above; the early return makes this branch impossible.
        DeviceStatus::Unreachable => unreachable!("unreachable status returns early"),
    }

    out
}

fn render_summary_table(out: &mut String, report: &ProbeReport) {
    let rows: [(&str, &ProbeOutcome, String); 3] = [
        ("Network", &report.reachability, "icmp echo".to_string()),
        ("UDP", &report.datagram, format!("port {}", report.udp_port)),
        ("HTTP", &report.stream, format!("port {}", report.http_port)),
    ];

    let mut probe_w = "probe".len();
    let mut result_w = "result".len();
    for (name, outcome, _) in &rows {
        probe_w = probe_w.max(name.len());
        result_w = result_w.max(outcome_label(outcome).len());
    }

    let _ = writeln!(out, "Summary");
    let _ = writeln!(
        out,
        "{:<probe_w$}  {:<result_w$}  {}",
        "probe",
        "result",
        "detail",
        probe_w = probe_w,
        result_w = result_w
    );
    let _ = writeln!(
        out,
        "{:-<probe_w$}  {:-<result_w$}  {:-<6}",
        "",
        "",
        "",
        probe_w = probe_w,
        result_w = result_w
    );
    for (name, outcome, detail) in &rows {
        let _ = writeln!(
            out,
            "{:<probe_w$}  {:<result_w$}  {}",
            name,
            outcome_label(outcome),
            detail,
            probe_w = probe_w,
            result_w = result_w
        );
    }
}

fn outcome_label(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Success => "ok".to_string(),
        ProbeOutcome::Failure => "FAIL".to_string(),
        ProbeOutcome::Timeout => "timeout".to_string(),
        ProbeOutcome::Error(msg) => format!("error: {msg}"),
        ProbeOutcome::Skipped => "skipped".to_string(),
    }
}
