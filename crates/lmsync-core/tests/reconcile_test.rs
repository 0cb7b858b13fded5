// End-to-end reconciliation against a wiremock server.
//
// Each test wires up the lookup endpoints a scenario needs and asserts
// both the reported outcome and the mutations that actually hit the
// wire (or, for dry-run and converged states, that none did).

use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lmsync_api::models::Property;
use lmsync_api::{Credentials, LmClient, TransportConfig};
use lmsync_core::{CoreError, DeviceGroupSpec, DeviceSpec, Intent, PropertySet, Reconciler, TuningSpec};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LmClient) {
    let server = MockServer::start().await;
    let credentials = Credentials {
        company: "acme".into(),
        access_id: "test-id".into(),
        access_key: SecretString::from("test-key"),
    };
    let client = LmClient::with_base_url(&server.uri(), &credentials, &TransportConfig::default())
        .expect("client builds");
    (server, client)
}

/// Versionless endpoints wrap their payload in the status envelope.
fn envelope(items: Value) -> Value {
    let total = items.as_array().map_or(0, Vec::len);
    json!({ "status": 200, "data": { "total": total, "items": items } })
}

async fn mount_collector_groups(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/setting/collector/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "items": [
                { "id": 1, "name": "default" },
                { "id": 3, "name": "test_Collector_group" }
            ]
        })))
        .mount(server)
        .await;
}

fn device_spec() -> DeviceSpec {
    DeviceSpec {
        name: "device-1".into(),
        display_name: "device-1".into(),
        description: "managed".into(),
        host_group: Some("prod".into()),
        collector_group: "test_Collector_group".into(),
        properties: PropertySet::new(vec![Property::new("owner", "netops")]),
        alert_disable: false,
        netflow_collector: None,
    }
}

fn group_spec() -> DeviceGroupSpec {
    DeviceGroupSpec {
        name: "test-1".into(),
        description: "managed".into(),
        parent_group: None,
        collector_group: "test_Collector_group".into(),
        properties: PropertySet::default(),
        alert_disable: false,
    }
}

fn remote_device() -> Value {
    json!({
        "id": 42,
        "name": "device-1",
        "displayName": "device-1",
        "description": "managed",
        "hostGroupIds": "2",
        "disableAlerting": false,
        "preferredCollectorGroupId": 3,
        "customProperties": [{ "name": "owner", "value": "netops" }]
    })
}

async fn mount_device_lookup(server: &MockServer, items: Value) {
    Mock::given(method("GET"))
        .and(path("/device/devices"))
        .and(query_param("filter", "name:device-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(items)))
        .mount(server)
        .await;
}

async fn mount_group_ref(server: &MockServer, name: &str, id: i64) {
    Mock::given(method("GET"))
        .and(path("/device/groups"))
        .and(query_param("filter", format!("name:{name}")))
        .and(query_param("fields", "id,name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "id": id, "name": name }
        ]))))
        .mount(server)
        .await;
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_device_is_created_with_resolved_ids() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    Mock::given(method("POST"))
        .and(path("/device/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99, "name": "device-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device(&device_spec(), Intent::Present)
        .await
        .unwrap();
    assert!(outcome.changed);
    assert!(outcome.success);

    // The create body carries ids, not names.
    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("create request");
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["hostGroupIds"], json!(2));
    assert_eq!(body["autoBalancedCollectorGroupId"], json!(3));
    assert_eq!(body["preferredCollectorId"], json!(0));
    assert_eq!(body["enableNetflow"], json!(false));
}

#[tokio::test]
async fn netflow_collector_is_resolved_by_description() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    // The collector listing filters on the description field.
    Mock::given(method("GET"))
        .and(path("/setting/collectors"))
        .and(query_param("filter", "description:netflow-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "id": 12, "description": "netflow-1" }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/device/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99, "name": "device-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut spec = device_spec();
    spec.netflow_collector = Some("netflow-1".into());

    let outcome = Reconciler::new(&client)
        .device(&spec, Intent::Present)
        .await
        .unwrap();
    assert!(outcome.changed);

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("create request");
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["enableNetflow"], json!(true));
    assert_eq!(body["netflowCollectorId"], json!(12));
}

#[tokio::test]
async fn converged_device_is_left_alone() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([remote_device()])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    Mock::given(method("PUT"))
        .and(path("/device/devices/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device(&device_spec(), Intent::Present)
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
}

#[tokio::test]
async fn drifted_device_is_updated_in_place() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([remote_device()])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    Mock::given(method("PUT"))
        .and(path("/device/devices/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "name": "device-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut spec = device_spec();
    spec.description = "edited".into();

    let outcome = Reconciler::new(&client)
        .device(&spec, Intent::Present)
        .await
        .unwrap();
    assert!(outcome.changed);

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("update request");
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body["description"], json!("edited"));
}

#[tokio::test]
async fn duplicate_create_rejection_is_unchanged_success() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    Mock::given(method("POST"))
        .and(path("/device/devices"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "errorCode": 1409,
            "errorMessage": "The device already exists"
        })))
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device(&device_spec(), Intent::Present)
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("The device already exists"));
}

#[tokio::test]
async fn unrecognized_create_rejection_is_fatal() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    Mock::given(method("POST"))
        .and(path("/device/devices"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorCode": 1999,
            "errorMessage": "no thanks"
        })))
        .mount(&server)
        .await;

    let err = Reconciler::new(&client)
        .device(&device_spec(), Intent::Present)
        .await
        .unwrap_err();
    match err {
        CoreError::MutationRejected { action, entity, .. } => {
            assert_eq!(action, "create");
            assert_eq!(entity, "device");
        }
        other => panic!("expected MutationRejected, got: {other}"),
    }
}

#[tokio::test]
async fn absent_device_is_deleted_then_noop() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([remote_device()])).await;

    Mock::given(method("DELETE"))
        .and(path("/device/devices/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device(&device_spec(), Intent::Absent)
        .await
        .unwrap();
    assert!(outcome.changed);

    // Second run against a server where it is already gone.
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([])).await;

    let outcome = Reconciler::new(&client)
        .device(&device_spec(), Intent::Absent)
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
}

// ── Dry-run ─────────────────────────────────────────────────────────

#[tokio::test]
async fn dry_run_suppresses_create() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    Mock::given(method("POST"))
        .and(path("/device/devices"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .dry_run(true)
        .device(&device_spec(), Intent::Present)
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
}

#[tokio::test]
async fn dry_run_suppresses_update() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([remote_device()])).await;
    mount_group_ref(&server, "prod", 2).await;
    mount_collector_groups(&server).await;

    Mock::given(method("PUT"))
        .and(path("/device/devices/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut spec = device_spec();
    spec.description = "edited".into();

    let outcome = Reconciler::new(&client)
        .dry_run(true)
        .device(&spec, Intent::Present)
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
}

#[tokio::test]
async fn dry_run_suppresses_delete() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([remote_device()])).await;

    Mock::given(method("DELETE"))
        .and(path("/device/devices/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .dry_run(true)
        .device(&device_spec(), Intent::Absent)
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
}

#[tokio::test]
async fn dry_run_still_fails_on_unresolvable_references() {
    let (server, client) = setup().await;
    mount_device_lookup(&server, json!([])).await;
    mount_group_ref(&server, "prod", 2).await;

    // Collector group listing that lacks the requested group.
    Mock::given(method("GET"))
        .and(path("/setting/collector/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "items": [{ "id": 1, "name": "default" }]
        })))
        .mount(&server)
        .await;

    let err = Reconciler::new(&client)
        .dry_run(true)
        .device(&device_spec(), Intent::Present)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "no collector group match found for test_Collector_group"
    );
}

// ── Device groups ───────────────────────────────────────────────────

#[tokio::test]
async fn group_update_preserves_manual_alerting_disable() {
    let (server, client) = setup().await;

    // Remote group: operator disabled alerting, description drifted.
    Mock::given(method("GET"))
        .and(path("/device/groups"))
        .and(query_param("filter", "name:test-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 42,
            "name": "test-1",
            "description": "stale",
            "parentId": 1,
            "disableAlerting": true,
            "defaultCollectorGroupId": 3,
            "customProperties": []
        }]))))
        .mount(&server)
        .await;
    mount_collector_groups(&server).await;

    Mock::given(method("PUT"))
        .and(path("/device/groups/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "name": "test-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device_group(&group_spec(), Intent::Present)
        .await
        .unwrap();
    assert!(outcome.changed);

    // The spec said alert_disable: false, but the override wins.
    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("update request");
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body["disableAlerting"], json!(true));
    assert_eq!(body["description"], json!("managed"));
    assert_eq!(body["defaultCollectorGroupId"], json!(3));
    assert_eq!(body["defaultAutoBalancedCollectorGroupId"], json!(3));
}

#[tokio::test]
async fn missing_group_is_created_with_resolved_collector_group() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/groups"))
        .and(query_param("filter", "name:test-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;
    mount_collector_groups(&server).await;

    Mock::given(method("POST"))
        .and(path("/device/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "name": "test-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device_group(&group_spec(), Intent::Present)
        .await
        .unwrap();
    assert!(outcome.changed);

    // The resolved collector group fills both assignment fields; the
    // plain collector id is the zero placeholder.
    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("create request");
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["parentId"], json!(1));
    assert_eq!(body["defaultCollectorGroupId"], json!(3));
    assert_eq!(body["defaultAutoBalancedCollectorGroupId"], json!(3));
    assert_eq!(body["defaultCollectorId"], json!(0));
}

#[tokio::test]
async fn manual_alerting_disable_alone_is_not_drift() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/groups"))
        .and(query_param("filter", "name:test-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 42,
            "name": "test-1",
            "description": "managed",
            "parentId": 1,
            "disableAlerting": true,
            "defaultCollectorGroupId": 3,
            "customProperties": []
        }]))))
        .mount(&server)
        .await;
    mount_collector_groups(&server).await;

    Mock::given(method("PUT"))
        .and(path("/device/groups/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device_group(&group_spec(), Intent::Present)
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
}

#[tokio::test]
async fn absent_group_is_deleted() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/groups"))
        .and(query_param("filter", "name:test-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 42, "name": "test-1"
        }]))))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/device/groups/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .device_group(&group_spec(), Intent::Absent)
        .await
        .unwrap();
    assert!(outcome.changed);
    assert!(outcome.success);
}

// ── Tuning ──────────────────────────────────────────────────────────

async fn mount_tuning_chain(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/device/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 5, "name": "10.0.0.1", "displayName": "core-switch"
        }]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/device/devices/5/devicedatasources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 6, "dataSourceDisplayName": "Ping"
        }]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/device/devices/5/devicedatasources/6/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 7, "displayName": "Ping", "wildValue": "ping.0"
        }]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/device/devices/5/devicedatasources/6/instances/7/alertsettings",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": 8, "dataPointName": "PingLossPercent", "disableAlerting": false
        }]))))
        .mount(server)
        .await;
}

fn tuning_spec() -> TuningSpec {
    TuningSpec {
        device_display_name: "core-switch".into(),
        datasource: "Ping".into(),
        instance: "Ping".into(),
        datapoint: Some("PingLossPercent".into()),
        threshold: Some("> 50 80".into()),
        alert_disable: false,
    }
}

#[tokio::test]
async fn threshold_update_is_applied_unconditionally() {
    let (server, client) = setup().await;
    mount_tuning_chain(&server).await;

    Mock::given(method("PUT"))
        .and(path(
            "/device/devices/5/devicedatasources/6/instances/7/alertsettings/8",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 8 })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client).tuning(&tuning_spec()).await.unwrap();
    assert!(outcome.changed);

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("threshold update");
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body, json!({ "alertExpr": "> 50 80" }));
}

#[tokio::test]
async fn instance_toggle_echoes_resolved_instance_fields() {
    let (server, client) = setup().await;
    mount_tuning_chain(&server).await;

    Mock::given(method("PUT"))
        .and(path("/device/devices/5/devicedatasources/6/instances/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut spec = tuning_spec();
    spec.datapoint = None;
    spec.threshold = None;
    spec.alert_disable = true;

    let outcome = Reconciler::new(&client).tuning(&spec).await.unwrap();
    assert!(outcome.changed);

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("instance update");
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(
        body,
        json!({
            "disableAlerting": true,
            "displayName": "Ping",
            "wildValue": "ping.0"
        })
    );
}

#[tokio::test]
async fn tuning_chain_miss_is_fatal() {
    let (server, client) = setup().await;
    mount_tuning_chain(&server).await;

    let mut spec = tuning_spec();
    spec.datasource = "CPU".into();

    let err = Reconciler::new(&client).tuning(&spec).await.unwrap_err();
    assert_eq!(err.to_string(), "no datasource match found for CPU");
}

#[tokio::test]
async fn tuning_dry_run_resolves_but_does_not_put() {
    let (server, client) = setup().await;
    mount_tuning_chain(&server).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .dry_run(true)
        .tuning(&tuning_spec())
        .await
        .unwrap();
    assert!(!outcome.changed);
    assert!(outcome.success);
}
