//! Android backend over `android.os.PowerManager`.
//!
//! Status queries go straight through JNI: resolve the `PowerManager`
//! system service from the application context and read
//! `getCurrentThermalStatus`. Thermal monitoring exists from API level 29
//! (Android 10) onward; older devices report unsupported.
//!
//! Status-change callbacks cannot be produced from Rust alone because
//! `OnThermalStatusChangedListener` is a Java interface. Registration goes
//! through the bundled `dev.devicethermal.ThermalBridge` Java shim, which
//! attaches the listener on the main-thread executor and forwards each raw
//! status code into [`Java_dev_devicethermal_ThermalBridge_nativeOnThermalStatusChanged`].

use jni::objects::{JClass, JObject, JValue};
use jni::sys::jint;
use jni::{JNIEnv, JavaVM};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::service::{StatusSink, ThermalService};
use crate::thermal::constants::MIN_ANDROID_API;

const BRIDGE_CLASS: &str = "dev/devicethermal/ThermalBridge";

/// Sink the JNI callback forwards into while an observer is registered.
static STATUS_SINK: Lazy<Mutex<Option<StatusSink>>> = Lazy::new(|| Mutex::new(None));

/// Thermal service backend backed by Android's `PowerManager`.
#[derive(Debug, Default)]
pub struct PowerManagerService;

impl PowerManagerService {
    pub fn new() -> Self {
        Self
    }

    fn vm() -> Result<JavaVM> {
        let ctx = ndk_context::android_context();
        unsafe { JavaVM::from_raw(ctx.vm().cast()) }.map_err(|e| Error::jni(e.to_string()))
    }

    fn sdk_int(env: &mut JNIEnv) -> Result<i32> {
        env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .and_then(|v| v.i())
            .map_err(|e| Error::jni(e.to_string()))
    }

    /// Resolves the `PowerManager` handle from the application context, or
    /// `None` when the system did not hand one out.
    fn power_manager<'local>(env: &mut JNIEnv<'local>) -> Result<Option<JObject<'local>>> {
        let context = unsafe { JObject::from_raw(ndk_context::android_context().context().cast()) };
        let name = JObject::from(env.new_string("power").map_err(|e| Error::jni(e.to_string()))?);
        let manager = env
            .call_method(
                &context,
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&name)],
            )
            .and_then(|v| v.l())
            .map_err(|e| Error::jni(e.to_string()))?;
        if manager.is_null() {
            Ok(None)
        } else {
            Ok(Some(manager))
        }
    }

    fn read_current_status() -> Result<Option<i32>> {
        let vm = Self::vm()?;
        let mut env = vm.attach_current_thread().map_err(|e| Error::jni(e.to_string()))?;
        if Self::sdk_int(&mut env)? < MIN_ANDROID_API {
            return Ok(None);
        }
        let Some(manager) = Self::power_manager(&mut env)? else {
            return Ok(None);
        };
        let status = env
            .call_method(&manager, "getCurrentThermalStatus", "()I", &[])
            .and_then(|v| v.i())
            .map_err(|e| Error::jni(e.to_string()))?;
        Ok(Some(status))
    }

    fn call_bridge(method: &str) -> Result<()> {
        let vm = Self::vm()?;
        let mut env = vm.attach_current_thread().map_err(|e| Error::jni(e.to_string()))?;
        env.call_static_method(BRIDGE_CLASS, method, "()V", &[])
            .map_err(|e| Error::jni(e.to_string()))?;
        Ok(())
    }
}

impl ThermalService for PowerManagerService {
    fn is_supported(&self) -> bool {
        let probe = Self::vm().and_then(|vm| {
            let mut env = vm.attach_current_thread().map_err(|e| Error::jni(e.to_string()))?;
            Self::sdk_int(&mut env)
        });
        match probe {
            Ok(sdk) => sdk >= MIN_ANDROID_API,
            Err(e) => {
                warn!("failed to probe SDK version: {e}");
                false
            }
        }
    }

    fn current_status(&self) -> Option<i32> {
        match Self::read_current_status() {
            Ok(status) => status,
            Err(e) => {
                // A failed platform call means "no thermal data", not an error
                // the caller has to handle.
                warn!("failed to read thermal status: {e}");
                None
            }
        }
    }

    fn register_observer(&self, sink: StatusSink) -> Result<()> {
        *STATUS_SINK.lock() = Some(sink);
        if let Err(e) = Self::call_bridge("register") {
            *STATUS_SINK.lock() = None;
            return Err(e);
        }
        debug!("registered PowerManager thermal status listener");
        Ok(())
    }

    fn unregister_observer(&self) {
        if STATUS_SINK.lock().take().is_none() {
            return;
        }
        if let Err(e) = Self::call_bridge("unregister") {
            warn!("failed to deregister thermal status listener: {e}");
        } else {
            debug!("deregistered PowerManager thermal status listener");
        }
    }
}

/// Entry point for the Java shim's `OnThermalStatusChangedListener`.
///
/// Runs on whatever executor the shim registered with; the send below is the
/// hand-off out of that thread.
#[no_mangle]
pub extern "system" fn Java_dev_devicethermal_ThermalBridge_nativeOnThermalStatusChanged(
    _env: JNIEnv,
    _class: JClass,
    status: jint,
) {
    if let Some(sink) = STATUS_SINK.lock().as_ref() {
        // Send only fails when the relay is gone, i.e. mid-deregistration.
        let _ = sink.send(status);
    }
}
