use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::timeout;

use crate::service::{MockThermalService, StatusSink};
use crate::thermal::constants::{
    PLATFORM_STATE_UNKNOWN, PLATFORM_STATE_UNSUPPORTED, THERMAL_STATUS_CRITICAL, THERMAL_STATUS_EMERGENCY,
    THERMAL_STATUS_LIGHT, THERMAL_STATUS_MODERATE, THERMAL_STATUS_NONE, THERMAL_STATUS_SEVERE,
    THERMAL_STATUS_SHUTDOWN,
};
use crate::thermal::types::{ThermalEvent, ThermalState, ThermalStatus};
use crate::thermal::Thermal;

/// Shared slot the mock drops the registered sink into, standing in for the
/// platform's callback registration.
type SinkSlot = Arc<Mutex<Option<StatusSink>>>;

fn supported_service_with_sink() -> (MockThermalService, SinkSlot) {
    let slot: SinkSlot = Arc::new(Mutex::new(None));
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    let captured = Arc::clone(&slot);
    mock.expect_register_observer().returning(move |sink| {
        *captured.lock() = Some(sink);
        Ok(())
    });
    let cleared = Arc::clone(&slot);
    mock.expect_unregister_observer().returning(move || {
        *cleared.lock() = None;
    });
    (mock, slot)
}

#[test]
fn normalize_maps_every_defined_status() {
    let table = [
        (THERMAL_STATUS_NONE, ThermalState::Nominal, "THERMAL_STATUS_NONE"),
        (THERMAL_STATUS_LIGHT, ThermalState::Fair, "THERMAL_STATUS_LIGHT"),
        (THERMAL_STATUS_MODERATE, ThermalState::Fair, "THERMAL_STATUS_MODERATE"),
        (THERMAL_STATUS_SEVERE, ThermalState::Serious, "THERMAL_STATUS_SEVERE"),
        (THERMAL_STATUS_CRITICAL, ThermalState::Critical, "THERMAL_STATUS_CRITICAL"),
        (THERMAL_STATUS_EMERGENCY, ThermalState::Critical, "THERMAL_STATUS_EMERGENCY"),
        (THERMAL_STATUS_SHUTDOWN, ThermalState::Critical, "THERMAL_STATUS_SHUTDOWN"),
    ];

    for (raw, state, label) in table {
        let event = ThermalEvent::from_raw(raw);
        assert_eq!(event.state, state, "state for raw code {raw}");
        assert_eq!(event.platform_state, label, "label for raw code {raw}");
        assert_eq!(event.temperature, None, "temperature for raw code {raw}");
    }
}

#[test]
fn normalize_is_total_over_unrecognized_codes() {
    for raw in [-1, 7, 42, i32::MAX, i32::MIN] {
        let event = ThermalEvent::from_raw(raw);
        assert_eq!(event.state, ThermalState::Unknown);
        assert_eq!(event.platform_state, PLATFORM_STATE_UNKNOWN);
        assert_eq!(ThermalStatus::from_raw(raw).raw(), raw);
    }
}

#[test]
fn states_order_by_escalation() {
    assert!(ThermalState::Nominal < ThermalState::Fair);
    assert!(ThermalState::Fair < ThermalState::Serious);
    assert!(ThermalState::Serious < ThermalState::Critical);
    assert_eq!(ThermalState::Serious.to_string(), "serious");
}

#[test]
fn event_serializes_with_wire_field_names() {
    let event = ThermalEvent::from_raw(THERMAL_STATUS_SEVERE);
    let value = serde_json::to_value(&event).expect("event serializes");
    assert_eq!(value["state"], "serious");
    assert_eq!(value["platformState"], "THERMAL_STATUS_SEVERE");
    assert!(value["temperature"].is_null());

    let back: ThermalEvent = serde_json::from_value(value).expect("event deserializes");
    assert_eq!(back, event);
}

#[tokio::test]
async fn queries_degrade_on_unsupported_device() {
    // No current_status/register_observer expectations: the mock panics if
    // the bridge touches the platform beyond the capability probe.
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(false);
    let thermal = Thermal::with_service(Box::new(mock));

    assert!(!thermal.is_available().await);
    assert_eq!(thermal.thermal_state().await, ThermalState::Unknown);

    let info = thermal.thermal_info().await;
    assert_eq!(info.state, ThermalState::Unknown);
    assert_eq!(info.platform_state, PLATFORM_STATE_UNSUPPORTED);
    assert_eq!(info.temperature, None);
}

#[tokio::test]
async fn queries_reflect_live_status() {
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    mock.expect_current_status().returning(|| Some(THERMAL_STATUS_SEVERE));
    let thermal = Thermal::with_service(Box::new(mock));

    assert!(thermal.is_available().await);
    assert_eq!(thermal.thermal_state().await, ThermalState::Serious);

    let info = thermal.thermal_info().await;
    assert_eq!(info.state, ThermalState::Serious);
    assert_eq!(info.platform_state, "THERMAL_STATUS_SEVERE");
}

#[tokio::test]
async fn missing_service_handle_reads_as_no_throttling() {
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    mock.expect_current_status().returning(|| None);
    let thermal = Thermal::with_service(Box::new(mock));

    assert_eq!(thermal.thermal_state().await, ThermalState::Nominal);
    assert_eq!(thermal.thermal_info().await.platform_state, "THERMAL_STATUS_NONE");
}

#[tokio::test]
async fn listener_count_gates_the_single_native_observer() {
    let (mock, _slot) = supported_service_with_sink();
    let thermal = Thermal::with_service(Box::new(mock));

    let _rx1 = thermal.add_listener("thermalDidChange");
    let _rx2 = thermal.add_listener("thermalDidChange");
    let _rx3 = thermal.add_listener("thermalDidChange");
    assert_eq!(thermal.subscriber_count(), 3);
    assert!(thermal.has_native_observer());

    thermal.remove_listeners(2);
    assert_eq!(thermal.subscriber_count(), 1);
    assert!(thermal.has_native_observer(), "observer survives partial removal");

    thermal.remove_listeners(1);
    assert_eq!(thermal.subscriber_count(), 0);
    assert!(!thermal.has_native_observer(), "observer goes with the last listener");
}

#[tokio::test]
async fn over_removal_and_repeated_shutdown_are_harmless() {
    let slot: SinkSlot = Arc::new(Mutex::new(None));
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    let captured = Arc::clone(&slot);
    mock.expect_register_observer().times(1).returning(move |sink| {
        *captured.lock() = Some(sink);
        Ok(())
    });
    // The whole test must deregister exactly once.
    mock.expect_unregister_observer().times(1).return_const(());
    let thermal = Thermal::with_service(Box::new(mock));

    let _rx = thermal.add_listener("thermalDidChange");
    thermal.remove_listeners(5);
    assert_eq!(thermal.subscriber_count(), 0);
    assert!(!thermal.has_native_observer());

    thermal.remove_listeners(1);
    thermal.shutdown();
    thermal.shutdown();
    assert_eq!(thermal.subscriber_count(), 0);
}

#[tokio::test]
async fn shutdown_deregisters_regardless_of_count() {
    let (mock, _slot) = supported_service_with_sink();
    let thermal = Thermal::with_service(Box::new(mock));

    let _rx1 = thermal.add_listener("thermalDidChange");
    let _rx2 = thermal.add_listener("thermalDidChange");
    assert!(thermal.has_native_observer());

    thermal.shutdown();
    assert_eq!(thermal.subscriber_count(), 0);
    assert!(!thermal.has_native_observer());
}

#[tokio::test]
async fn severe_status_delivers_exactly_one_serious_event() {
    let (mock, slot) = supported_service_with_sink();
    let thermal = Thermal::with_service(Box::new(mock));

    let mut rx = thermal.add_listener("thermalDidChange");
    let sink = slot.lock().clone().expect("observer registered");
    sink.send(THERMAL_STATUS_SEVERE).unwrap();

    let event = rx.recv().await.expect("event relayed to listener");
    assert_eq!(event.state, ThermalState::Serious);
    assert_eq!(event.platform_state, "THERMAL_STATUS_SEVERE");
    assert_eq!(event.temperature, None);

    // One native notification, one relayed event.
    tokio::task::yield_now().await;
    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn unsupported_device_never_registers_an_observer() {
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(false);
    // register_observer has no expectation: a call would fail the test.
    let thermal = Thermal::with_service(Box::new(mock));

    let _rx = thermal.add_listener("thermalDidChange");
    assert_eq!(thermal.subscriber_count(), 1);
    assert!(!thermal.has_native_observer());
}

#[tokio::test]
async fn no_delivery_after_unsubscription() {
    let (mock, slot) = supported_service_with_sink();
    let thermal = Thermal::with_service(Box::new(mock));

    let mut rx = thermal.add_listener("thermalDidChange");
    let sink = slot.lock().clone().expect("observer registered");
    thermal.remove_listeners(1);
    assert!(!thermal.has_native_observer());

    // A late native notification (e.g. already in flight during
    // deregistration) must not reach the former listener.
    let _ = sink.send(THERMAL_STATUS_SEVERE);
    let outcome = timeout(Duration::from_millis(50), rx.recv()).await;
    assert!(
        !matches!(outcome, Ok(Ok(_))),
        "event delivered after unsubscription"
    );
}

#[tokio::test]
async fn bridge_reactivates_after_full_unsubscription() {
    let slot: SinkSlot = Arc::new(Mutex::new(None));
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    let captured = Arc::clone(&slot);
    mock.expect_register_observer().times(2).returning(move |sink| {
        *captured.lock() = Some(sink);
        Ok(())
    });
    mock.expect_unregister_observer().times(2).return_const(());
    let thermal = Thermal::with_service(Box::new(mock));

    let _rx = thermal.add_listener("thermalDidChange");
    thermal.remove_listeners(1);

    let mut rx = thermal.add_listener("thermalDidChange");
    assert!(thermal.has_native_observer());

    let sink = slot.lock().clone().expect("observer re-registered");
    sink.send(THERMAL_STATUS_LIGHT).unwrap();
    assert_eq!(rx.recv().await.unwrap().state, ThermalState::Fair);

    thermal.shutdown();
}

// Deliberately not a tokio test: add_listener must stay panic-free with no
// runtime available.
#[test]
fn listener_outside_runtime_attaches_without_observer() {
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    // register_observer has no expectation: without a runtime to relay on,
    // the bridge must not touch the platform.
    let thermal = Thermal::with_service(Box::new(mock));

    let _rx = thermal.add_listener("thermalDidChange");
    assert_eq!(thermal.subscriber_count(), 1);
    assert!(!thermal.has_native_observer());

    thermal.shutdown();
}

#[tokio::test]
async fn initial_status_from_registration_reaches_first_listener() {
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    mock.expect_register_observer().returning(|sink| {
        // The platform invokes a freshly added observer right away with the
        // current status, before registration even returns.
        sink.send(THERMAL_STATUS_SEVERE).unwrap();
        Ok(())
    });
    mock.expect_unregister_observer().return_const(());
    let thermal = Thermal::with_service(Box::new(mock));

    let mut rx = thermal.add_listener("thermalDidChange");
    let event = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("initial event must not be lost")
        .expect("stream stays open");
    assert_eq!(event.state, ThermalState::Serious);
    assert_eq!(event.platform_state, "THERMAL_STATUS_SEVERE");
}

#[tokio::test]
async fn failed_registration_keeps_listener_without_observer() {
    let mut mock = MockThermalService::new();
    mock.expect_is_supported().return_const(true);
    mock.expect_register_observer()
        .times(1)
        .returning(|_| Err(crate::error::Error::system("power manager gone")));
    let thermal = Thermal::with_service(Box::new(mock));

    let _rx = thermal.add_listener("thermalDidChange");
    assert_eq!(thermal.subscriber_count(), 1);
    assert!(!thermal.has_native_observer());

    // Nothing to deregister on the way out.
    thermal.shutdown();
}
