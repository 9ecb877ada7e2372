use crate::config::UDP_PROBE_PAYLOAD;
use crate::types::{DatagramReply, ProbeOutcome};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream, UdpSocket};
use tokio::time;

/// Outcome of the datagram probe plus the echoed reply on success.
#[derive(Debug, Clone)]
pub struct DatagramProbe {
    pub outcome: ProbeOutcome,
    pub reply: Option<DatagramReply>,
}

impl DatagramProbe {
    fn from_outcome(outcome: ProbeOutcome) -> Self {
        Self {
            outcome,
            reply: None,
        }
    }
}

/// Send the fixed marker payload to `(target, port)` over UDP and wait up to
/// `timeout` for any inbound datagram. Any reply counts as success; the
/// content is echoed for diagnostics only. No reply is a `Timeout`, not an
/// error. The socket is scoped to this call and dropped on every exit path.
pub async fn datagram_probe(target: &str, port: u16, timeout: Duration) -> DatagramProbe {
    let dest = match resolve(target, port).await {
        Ok(addr) => addr,
        Err(outcome) => return DatagramProbe::from_outcome(outcome),
    };

    let socket = match UdpSocket::bind("0.0.0.0:0").await {
        Ok(s) => s,
        Err(e) => {
            return DatagramProbe::from_outcome(ProbeOutcome::Error(format!(
                "failed to open UDP socket: {e}"
            )))
        }
    };

    if let Err(e) = socket.send_to(UDP_PROBE_PAYLOAD, dest).await {
        return DatagramProbe::from_outcome(ProbeOutcome::Error(format!(
            "failed to send to {dest}: {e}"
        )));
    }

    // Any inbound datagram counts, even an empty one; only an elapsed
    // window is a timeout.
    let mut buf = vec![0u8; 1024];
    match time::timeout(timeout, socket.recv_from(&mut buf)).await {
        Ok(Ok((n, from))) => {
            buf.truncate(n);
            DatagramProbe {
                outcome: ProbeOutcome::Success,
                reply: Some(DatagramReply {
                    payload: String::from_utf8_lossy(&buf).to_string(),
                    from: from.to_string(),
                }),
            }
        }
        Ok(Err(e)) => {
            DatagramProbe::from_outcome(ProbeOutcome::Error(format!("receive failed: {e}")))
        }
        Err(_) => DatagramProbe::from_outcome(ProbeOutcome::Timeout),
    }
}

/// Attempt a TCP connection to `(target, port)` bounded by `timeout`. Tests
/// connection establishment only; no data is exchanged and the stream is
/// dropped immediately. Refusal and timeout are both `Failure` (the remote
/// simply has no listener); only name resolution faults are errors.
pub async fn stream_probe(target: &str, port: u16, timeout: Duration) -> ProbeOutcome {
    let dest = match resolve(target, port).await {
        Ok(addr) => addr,
        Err(outcome) => return outcome,
    };

    match time::timeout(timeout, TcpStream::connect(dest)).await {
        Ok(Ok(_stream)) => ProbeOutcome::Success,
        Ok(Err(_)) => ProbeOutcome::Failure,
        Err(_) => ProbeOutcome::Failure,
    }
}

async fn resolve(target: &str, port: u16) -> Result<SocketAddr, ProbeOutcome> {
    match lookup_host((target, port)).await {
        Ok(mut addrs) => addrs
            .next()
            .ok_or_else(|| ProbeOutcome::Error(format!("no addresses for {target}"))),
        Err(e) => Err(ProbeOutcome::Error(format!(
            "cannot resolve {target}: {e}"
        ))),
    }
}
