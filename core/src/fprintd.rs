//! Async helpers for the fprintd D-Bus interface.
//!
//! Only the calls needed to probe for a reader and verify the current user
//! are wrapped here.

use std::fmt;

use futures_util::StreamExt;
use log::{debug, info};
use serde::{de::DeserializeOwned, Serialize};
use zbus::{Connection, Proxy};
use zvariant::{OwnedObjectPath, Type};

// VALID_VERIFY_STATUS = [
//     'verify-no-match',
//     'verify-match',
//     'verify-retry-scan',
//     'verify-too-fast',
//     'verify-swipe-too-short',
//     'verify-finger-not-centered',
//     'verify-remove-and-retry',
//     'verify-disconnected',
//     'verify-unknown-error'
// ]

/// D-Bus service name for fprintd.
pub const SERVICE: &str = "net.reactivated.Fprint";

/// Manager object path.
pub const MANAGER_PATH: &str = "/net/reactivated/Fprint/Manager";

/// Manager interface name.
pub const IFACE_MANAGER: &str = "net.reactivated.Fprint.Manager";

/// Device interface name.
pub const IFACE_DEVICE: &str = "net.reactivated.Fprint.Device";

/// How a single `VerifyStatus` result should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The finger matched an enrolled print.
    Match,
    /// A finger was read but did not match.
    NoMatch,
    /// Transient read problem; the device keeps scanning.
    Retry,
    /// The device or daemon gave up.
    Fatal,
}

impl VerifyOutcome {
    /// Whether verification is over after this status.
    pub fn is_final(self) -> bool {
        !matches!(self, VerifyOutcome::Retry)
    }
}

/// Map a fprintd verify status string to an outcome.
pub fn classify_verify_status(result: &str) -> VerifyOutcome {
    match result {
        "verify-match" => VerifyOutcome::Match,
        "verify-no-match" => VerifyOutcome::NoMatch,
        "verify-retry-scan"
        | "verify-too-fast"
        | "verify-swipe-too-short"
        | "verify-finger-not-centered"
        | "verify-remove-and-retry" => VerifyOutcome::Retry,
        _ => VerifyOutcome::Fatal,
    }
}

/// Async client with system bus connection.
#[derive(Clone)]
pub struct Client {
    conn: Connection,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Connect to system bus.
    pub async fn system() -> zbus::Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self { conn })
    }

    /// Create Manager helper.
    pub fn manager(&self) -> Manager {
        Manager {
            conn: self.conn.clone(),
        }
    }

    /// Create Device helper for specific path.
    pub fn device(&self, object_path: OwnedObjectPath) -> Device {
        Device {
            conn: self.conn.clone(),
            object_path,
        }
    }
}

/// Manager interface helper.
#[derive(Clone)]
pub struct Manager {
    conn: Connection,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager").finish_non_exhaustive()
    }
}

impl Manager {
    async fn proxy(&self) -> zbus::Result<Proxy<'_>> {
        Proxy::new(&self.conn, SERVICE, MANAGER_PATH, IFACE_MANAGER).await
    }

    /// Generic method call.
    async fn call<R>(
        &self,
        method: &str,
        args: &(impl Serialize + Type + fmt::Debug),
    ) -> zbus::Result<R>
    where
        R: DeserializeOwned + Type,
    {
        let proxy = self.proxy().await?;

        proxy.call(method, args).await
    }

    /// Get device object paths.
    pub async fn get_devices(&self) -> zbus::Result<Vec<OwnedObjectPath>> {
        let (paths,): (Vec<OwnedObjectPath>,) = self.call("GetDevices", &()).await?;
        Ok(paths)
    }

    /// Get default device path.
    pub async fn get_default_device(&self) -> zbus::Result<OwnedObjectPath> {
        let (path,): (OwnedObjectPath,) = self.call("GetDefaultDevice", &()).await?;
        Ok(path)
    }
}

/// Device interface helper.
#[derive(Clone)]
pub struct Device {
    conn: Connection,
    object_path: OwnedObjectPath,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("object_path", &self.object_path)
            .finish()
    }
}

impl Device {
    async fn proxy(&self) -> zbus::Result<Proxy<'_>> {
        Proxy::new(&self.conn, SERVICE, self.object_path.as_str(), IFACE_DEVICE).await
    }

    /// Get device object path.
    pub fn object_path(&self) -> &str {
        self.object_path.as_str()
    }

    /// Generic method call.
    async fn call<R>(
        &self,
        method: &str,
        args: &(impl Serialize + Type + fmt::Debug),
    ) -> zbus::Result<R>
    where
        R: DeserializeOwned + Type,
    {
        let proxy = self.proxy().await?;

        proxy.call(method, args).await
    }

    /// List enrolled fingers for user ("" for current user).
    pub async fn list_enrolled_fingers(&self, username: &str) -> zbus::Result<Vec<String>> {
        let (fingers,): (Vec<String>,) = self.call("ListEnrolledFingers", &(username,)).await?;
        Ok(fingers)
    }

    /// Claim device for user ("" for current user).
    pub async fn claim(&self, username: &str) -> zbus::Result<()> {
        let _: () = self.call("Claim", &(username,)).await?;
        Ok(())
    }

    /// Release device.
    pub async fn release(&self) -> zbus::Result<()> {
        let _: () = self.call("Release", &()).await?;
        Ok(())
    }

    /// Start verification for finger.
    pub async fn verify_start(&self, finger: &str) -> zbus::Result<()> {
        let _: () = self.call("VerifyStart", &(finger,)).await?;
        Ok(())
    }

    /// Stop verification.
    pub async fn verify_stop(&self) -> zbus::Result<()> {
        let _: () = self.call("VerifyStop", &()).await?;
        Ok(())
    }

    /// Get device name.
    pub async fn name(&self) -> zbus::Result<String> {
        let proxy = self.proxy().await?;
        proxy.get_property::<String>("name").await
    }

    /// Start a verification and wait for its final `VerifyStatus`.
    ///
    /// The signal subscription is set up before `VerifyStart` so a fast
    /// reader cannot report before we listen. Retry statuses are logged and
    /// skipped. The device must already be claimed.
    pub async fn verify(&self, finger: &str) -> zbus::Result<VerifyStatusEvent> {
        let proxy = self.proxy().await?;
        let mut stream = proxy.receive_signal("VerifyStatus").await?;

        self.verify_start(finger).await?;
        info!("Verification started, waiting for finger scan...");

        while let Some(msg) = stream.next().await {
            let (result, done): (String, bool) = msg.body().deserialize()?;
            let event = VerifyStatusEvent { result, done };
            debug!(
                "Verify status update: result='{}', done={}",
                event.result, event.done
            );

            if event.done || event.outcome().is_final() {
                return Ok(event);
            }
            info!("Scan not accepted ({}), waiting for another", event.result);
        }

        Err(zbus::Error::Failure(
            "VerifyStatus signal stream closed".to_string(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyStatusEvent {
    pub result: String,
    pub done: bool,
}

impl VerifyStatusEvent {
    pub fn outcome(&self) -> VerifyOutcome {
        classify_verify_status(&self.result)
    }
}

/// Find first available device.
pub async fn first_device(client: &Client) -> zbus::Result<Option<Device>> {
    let mgr = client.manager();

    // Try default device first
    if let Ok(path) = mgr.get_default_device().await {
        return Ok(Some(client.device(path)));
    }

    // Fall back to first enumerated device
    let paths = mgr.get_devices().await?;
    Ok(paths.first().map(|path| client.device(path.clone())))
}
