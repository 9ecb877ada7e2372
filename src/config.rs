use std::time::Duration;

/// Fallback device address when the caller supplies none.
/// Matches the static IP baked into the firmware's network config.
pub const DEFAULT_TARGET: &str = "192.168.1.100";

/// UDP port the device firmware listens on.
pub const DEFAULT_UDP_PORT: u16 = 4040;

/// HTTP port probed for a web server (common firmware default).
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Marker payload sent by the datagram probe. The device may reply with
/// anything; the payload is a hello, not a protocol.
pub const UDP_PROBE_PAYLOAD: &[u8] = b"HELLO_ESP32";

/// All knobs for one check run, with documented defaults.
///
/// Every timeout and port lives here rather than inside the probes so that
/// tests can run against loopback listeners with short timeouts.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Device address under test (IP or hostname).
    pub target: String,
    /// Destination port for the datagram probe.
    pub udp_port: u16,
    /// Destination port for the stream probe.
    pub http_port: u16,
    /// Per-probe bound on the UDP reply wait and the TCP connect attempt.
    pub probe_timeout: Duration,
    /// Per-echo reply wait handed to the external ping facility.
    pub ping_reply_wait: Duration,
    /// Overall bound on the external ping invocation.
    pub ping_deadline: Duration,
    /// Echo attempts the ping facility makes on its own; no retries beyond.
    pub ping_attempts: u32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            udp_port: DEFAULT_UDP_PORT,
            http_port: DEFAULT_HTTP_PORT,
            probe_timeout: Duration::from_secs(5),
            ping_reply_wait: Duration::from_secs(2),
            ping_deadline: Duration::from_secs(10),
            ping_attempts: 3,
        }
    }
}

impl CheckConfig {
    /// Build a config for the given target, falling back to [`DEFAULT_TARGET`]
    /// when none is supplied. Omitting the target and passing the literal
    /// default resolve to the same config.
    pub fn for_target(target: Option<String>) -> Self {
        Self {
            target: target.unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_target_equals_explicit_default() {
        let implicit = CheckConfig::for_target(None);
        let explicit = CheckConfig::for_target(Some(DEFAULT_TARGET.to_string()));
        assert_eq!(implicit.target, explicit.target);
        assert_eq!(implicit.target, "192.168.1.100");
    }

    #[test]
    fn defaults_match_firmware_contract() {
        let cfg = CheckConfig::default();
        assert_eq!(cfg.udp_port, 4040);
        assert_eq!(cfg.http_port, 80);
        assert_eq!(cfg.probe_timeout, Duration::from_secs(5));
        assert_eq!(cfg.ping_reply_wait, Duration::from_secs(2));
        assert_eq!(cfg.ping_deadline, Duration::from_secs(10));
        assert_eq!(cfg.ping_attempts, 3);
        assert_eq!(UDP_PROBE_PAYLOAD, b"HELLO_ESP32");
    }
}
