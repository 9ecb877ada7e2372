use std::time::Duration;

use esp_check_rs::probe::{datagram_probe, stream_probe};
use esp_check_rs::types::ProbeOutcome;
use tokio::net::{TcpListener, UdpSocket};

#[tokio::test]
async fn datagram_probe_succeeds_on_any_reply() {
    let device = UdpSocket::bind("127.0.0.1:0").await.expect("bind");
    let port = device.local_addr().unwrap().port();

    tokio::spawn(async move {
        let mut buf = [0u8; 64];
        let (n, from) = device.recv_from(&mut buf).await.expect("recv");
        assert_eq!(&buf[..n], b"HELLO_ESP32");
        device.send_to(b"ESP32_READY", from).await.expect("send");
    });

    let result = datagram_probe("127.0.0.1", port, Duration::from_secs(2)).await;
    assert_eq!(result.outcome, ProbeOutcome::Success);
    let reply = result.reply.expect("reply echoed");
    assert_eq!(reply.payload, "ESP32_READY");
    assert!(reply.from.ends_with(&format!(":{port}")));
}

#[tokio::test]
async fn silent_listener_is_a_timeout_not_an_error() {
    // Bound but never replies: the probe must report Timeout, not Error.
    let silent = UdpSocket::bind("127.0.0.1:0").await.expect("bind");
    let port = silent.local_addr().unwrap().port();

    let result = datagram_probe("127.0.0.1", port, Duration::from_millis(200)).await;
    assert_eq!(result.outcome, ProbeOutcome::Timeout);
    assert!(result.reply.is_none());
}

#[tokio::test]
async fn unresolvable_target_is_an_error() {
    // .invalid is reserved; resolution must fail.
    let result = datagram_probe("esp-check.invalid", 4040, Duration::from_millis(200)).await;
    match result.outcome {
        ProbeOutcome::Error(msg) => assert!(msg.contains("esp-check.invalid")),
        other => panic!("expected Error, got {other:?}"),
    }

    let outcome = stream_probe("esp-check.invalid", 80, Duration::from_millis(200)).await;
    assert!(matches!(outcome, ProbeOutcome::Error(_)));
}

#[tokio::test]
async fn stream_probe_connects_to_live_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().unwrap().port();

    let outcome = stream_probe("127.0.0.1", port, Duration::from_secs(2)).await;
    assert_eq!(outcome, ProbeOutcome::Success);
}

#[tokio::test]
async fn stream_probe_reports_failure_when_refused() {
    // Grab a free port, then drop the listener so connects are refused.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let outcome = stream_probe("127.0.0.1", port, Duration::from_secs(2)).await;
    assert_eq!(outcome, ProbeOutcome::Failure);
}

#[tokio::test]
async fn repeated_probes_do_not_leak_endpoints() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().unwrap().port();

    for _ in 0..16 {
        let outcome = stream_probe("127.0.0.1", port, Duration::from_secs(2)).await;
        assert_eq!(outcome, ProbeOutcome::Success);
    }
}
