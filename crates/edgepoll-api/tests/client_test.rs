// Behavior tests for the switch and port clients using wiremock.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use edgepoll_api::{
    ConnectionConfig, Entity, PortStatusClient, SwitchState, SwitchStatusClient, TlsMode,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> ConnectionConfig {
    let base = Url::parse(&format!("{}/api/edge/", server.uri())).expect("mock base url");
    ConnectionConfig::with_base_url(
        base,
        "admin",
        SecretString::from("ubnt"),
        Duration::from_secs(5),
        TlsMode::System,
    )
}

async fn setup() -> (MockServer, SwitchStatusClient) {
    // Exclusive (non-pooled) server: dropping it closes the listener,
    // which the transport-failure tests rely on to simulate an
    // unreachable device. Pooled servers keep the port bound after drop.
    let server = MockServer::builder().start().await;
    let client = SwitchStatusClient::new(config_for(&server)).expect("client");
    (server, client)
}

fn port_body(state: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "eth0",
        "state": state,
        "speed": "1000",
    }))
}

// ── Switch entity ───────────────────────────────────────────────────

#[tokio::test]
async fn switch_200_means_on() {
    let (server, mut device) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/edge/switch/get"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert_eq!(device.state(), SwitchState::Unknown);
    device.update().await;
    assert_eq!(device.state(), SwitchState::On);
}

#[tokio::test]
async fn switch_non_200_means_off() {
    for status in [401, 404, 500, 503] {
        let (server, mut device) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/edge/switch/get"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        device.update().await;
        assert_eq!(device.state(), SwitchState::Off, "status {status}");
    }
}

#[tokio::test]
async fn switch_sends_basic_auth() {
    let (server, mut device) = setup().await;

    // base64("admin:ubnt")
    Mock::given(method("GET"))
        .and(path("/api/edge/switch/get"))
        .and(header("authorization", "Basic YWRtaW46dWJudA=="))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    device.update().await;
    assert_eq!(device.state(), SwitchState::On);
}

#[tokio::test]
async fn switch_transport_failure_keeps_prior_state() {
    let (server, mut device) = setup().await;

    // Never polled successfully: stays Unknown through a refused connection.
    drop(server);
    device.update().await;
    assert_eq!(device.state(), SwitchState::Unknown);
}

#[tokio::test]
async fn switch_transport_failure_keeps_last_good_state() {
    let (server, mut device) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/edge/switch/get"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    device.update().await;
    assert_eq!(device.state(), SwitchState::On);

    drop(server);
    device.update().await;
    assert_eq!(device.state(), SwitchState::On);
}

#[tokio::test]
async fn switch_update_is_idempotent() {
    let (server, mut device) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/edge/switch/get"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    device.update().await;
    let first = device.state();
    device.update().await;
    assert_eq!(device.state(), first);
}

#[tokio::test]
async fn switch_is_always_polled() {
    let (_server, device) = setup().await;
    assert!(device.should_poll());
    assert_eq!(device.name(), "EdgeSwitch");
}

// ── Port entity ─────────────────────────────────────────────────────

#[tokio::test]
async fn port_state_extracted_from_json() {
    let (server, device) = setup().await;
    let mut port = PortStatusClient::new(&device, "eth0");

    Mock::given(method("GET"))
        .and(path("/api/edge/port/eth0/get"))
        .respond_with(port_body("up"))
        .mount(&server)
        .await;

    assert_eq!(port.state(), "unknown");
    port.update().await;
    assert_eq!(port.state(), "up");
}

#[tokio::test]
async fn port_non_200_leaves_state_unchanged() {
    let (server, device) = setup().await;
    let mut port = PortStatusClient::new(&device, "eth3");

    let good = Mock::given(method("GET"))
        .and(path("/api/edge/port/eth3/get"))
        .respond_with(port_body("up"))
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    port.update().await;
    assert_eq!(port.state(), "up");
    drop(good);

    Mock::given(method("GET"))
        .and(path("/api/edge/port/eth3/get"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    port.update().await;
    assert_eq!(port.state(), "up");
}

#[tokio::test]
async fn port_missing_state_field_is_fail_soft() {
    let (server, device) = setup().await;
    let mut port = PortStatusClient::new(&device, "eth1");

    Mock::given(method("GET"))
        .and(path("/api/edge/port/eth1/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "eth1" })))
        .mount(&server)
        .await;

    port.update().await;
    assert_eq!(port.state(), "unknown");
}

#[tokio::test]
async fn port_malformed_body_is_fail_soft() {
    let (server, device) = setup().await;
    let mut port = PortStatusClient::new(&device, "eth1");

    Mock::given(method("GET"))
        .and(path("/api/edge/port/eth1/get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    port.update().await;
    assert_eq!(port.state(), "unknown");
}

#[tokio::test]
async fn port_transport_failure_leaves_state_unchanged() {
    let (server, device) = setup().await;
    let mut port = PortStatusClient::new(&device, "eth2");

    drop(server);
    port.update().await;
    assert_eq!(port.state(), "unknown");
}

#[tokio::test]
async fn port_name_includes_device_and_interface() {
    let (_server, device) = setup().await;
    let port = PortStatusClient::new(&device, "eth0");
    assert_eq!(port.name(), "EdgeSwitch eth0");
    assert_eq!(port.interface(), "eth0");
    assert!(port.should_poll());
}

// ── Combined scenario ───────────────────────────────────────────────

#[tokio::test]
async fn device_on_with_port_down() {
    let (server, mut device) = setup().await;
    let mut port = PortStatusClient::new(&device, "eth0");

    Mock::given(method("GET"))
        .and(path("/api/edge/switch/get"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/edge/port/eth0/get"))
        .respond_with(port_body("down"))
        .mount(&server)
        .await;

    device.update().await;
    port.update().await;

    assert_eq!(device.state(), SwitchState::On);
    assert_eq!(port.state(), "down");
}
