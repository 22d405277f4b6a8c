// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The IR light accessory handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::DeviceConfig;
use crate::error::{Error, Result};
use crate::event::{AccessoryEvent, EventBus};
use crate::protocol::Transport;
use crate::state::{AccessoryContext, AccessoryState};
use crate::types::{Brightness, Trigger, TriggerOutput};

use super::host::{AccessoryHost, Category};
use super::worker::{Request, Worker, push_state};

/// State shared between the handle and its task.
pub(super) struct Shared {
    pub(super) config: DeviceConfig,
    /// Last value set by the framework. Read by the getters and when the
    /// debounce timer fires.
    pub(super) requested: RwLock<AccessoryState>,
    /// Last value accepted by the API.
    pub(super) committed: RwLock<AccessoryState>,
    pub(super) dispatching: watch::Sender<bool>,
    /// Bumped on every brightness change.
    pub(super) raised: AtomicU64,
    pub(super) events: EventBus,
}

/// An infrared light exposed as a dimmable lightbulb or as two triggers.
///
/// The handle is cheap to clone. Setters update the requested state and
/// return immediately; a background task sends the resulting commands one
/// at a time, in order, and commits state only when the API accepts them.
///
/// Brightness changes are debounced: only the last value set within the
/// configured window (one second by default) is sent.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use switchbot_ir_light::accessory::{
///     AccessoryHost, CharacteristicValue, LightAccessory, ServiceKind,
/// };
/// use switchbot_ir_light::config::{Credentials, DeviceConfig};
/// use switchbot_ir_light::error::ProtocolError;
/// use switchbot_ir_light::state::AccessoryContext;
///
/// struct Host;
///
/// impl AccessoryHost for Host {
///     fn update(&self, _: ServiceKind, _: CharacteristicValue) {}
///     fn mark_failed(&self, _: ServiceKind, _: &ProtocolError) {}
///     fn persist(&self, _: &AccessoryContext) {}
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Credentials::new("token", "secret")
///     .into_cloud_config()?
///     .into_client()?;
/// let light = LightAccessory::spawn(
///     DeviceConfig::new("02-202301011200-12345678"),
///     client,
///     Arc::new(Host),
///     None,
/// )?;
///
/// light.set_brightness(75)?;
/// assert_eq!(light.on(), Some(true));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LightAccessory {
    shared: Arc<Shared>,
    requests: mpsc::UnboundedSender<Request>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl LightAccessory {
    /// Creates the accessory and starts its task.
    ///
    /// The initial state is restored from `restored` when given and pushed
    /// to the host right away.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn spawn<T: Transport>(
        config: DeviceConfig,
        transport: T,
        host: Arc<dyn AccessoryHost>,
        restored: Option<AccessoryContext>,
    ) -> Result<Self> {
        config.validate()?;

        let state = AccessoryState::restore(config.stateless, restored.as_ref());
        push_state(host.as_ref(), &state);

        tracing::debug!(
            device_id = %config.device_id,
            name = %config.display_name(),
            stateless = config.stateless,
            connection = %config.connection,
            "Creating light accessory"
        );

        let (dispatching, _) = watch::channel(false);
        let commands = config.command_set();
        let debounce = config.debounce();
        let shared = Arc::new(Shared {
            config,
            requested: RwLock::new(state),
            committed: RwLock::new(state),
            dispatching,
            raised: AtomicU64::new(0),
            events: EventBus::new(),
        });

        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Worker {
            shared: Arc::clone(&shared),
            transport,
            host,
            commands,
            debounce,
        };
        let task = tokio::spawn(worker.run(rx));

        Ok(Self {
            shared,
            requests: tx,
            task: Arc::new(Mutex::new(Some(task))),
        })
    }

    /// Returns the device configuration.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.shared.config
    }

    /// Returns the cloud id of the device.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.shared.config.device_id
    }

    /// Returns the category the accessory is displayed under.
    #[must_use]
    pub fn category(&self) -> Category {
        Category::for_mode(self.shared.config.stateless)
    }

    /// Sets the on-state and queues the matching on/off command.
    ///
    /// Ignored for stateless accessories.
    ///
    /// # Errors
    ///
    /// Returns `Error::ShutDown` if the accessory task has stopped.
    pub fn set_on(&self, on: bool) -> Result<()> {
        self.ensure_running()?;

        let mut requested = self.shared.requested.write();
        let previous = *requested;
        let Some(light) = requested.light_mut() else {
            tracing::debug!(device_id = %self.device_id(), "Ignoring on-state for stateless accessory");
            return Ok(());
        };
        tracing::debug!(device_id = %self.device_id(), on, "On-state set");
        light.set_on(on);

        self.send(Request::Power(on)).inspect_err(|_| *requested = previous)
    }

    /// Sets the brightness and (re)starts the debounce timer.
    ///
    /// A brightness of 0 also sets the light off; anything else sets it on.
    /// Ignored for stateless accessories.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `value` is above 100, or
    /// `Error::ShutDown` if the accessory task has stopped.
    pub fn set_brightness(&self, value: u8) -> Result<()> {
        let brightness = Brightness::new(value)?;
        self.ensure_running()?;

        let mut requested = self.shared.requested.write();
        let previous = *requested;
        let Some(light) = requested.light_mut() else {
            tracing::debug!(device_id = %self.device_id(), "Ignoring brightness for stateless accessory");
            return Ok(());
        };
        tracing::debug!(device_id = %self.device_id(), %brightness, "Brightness set");
        light.set_brightness(brightness);

        self.shared.raised.fetch_add(1, Ordering::AcqRel);
        self.shared.dispatching.send_replace(true);
        self.send(Request::BrightnessChanged).inspect_err(|_| {
            *requested = previous;
            self.shared.dispatching.send_replace(false);
        })
    }

    /// Writes the output state of a trigger.
    ///
    /// Writing 1 fires the trigger's command. Any other value does nothing.
    /// Ignored for light accessories.
    ///
    /// # Errors
    ///
    /// Returns `Error::ShutDown` if the accessory task has stopped.
    pub fn write_trigger(&self, trigger: Trigger, value: u8) -> Result<()> {
        self.ensure_running()?;
        if value != TriggerOutput::Active.value() {
            tracing::debug!(device_id = %self.device_id(), %trigger, value, "Trigger write ignored");
            return Ok(());
        }

        let mut requested = self.shared.requested.write();
        let previous = *requested;
        let Some(triggers) = requested.stateless_mut() else {
            tracing::debug!(device_id = %self.device_id(), "Ignoring trigger for light accessory");
            return Ok(());
        };
        tracing::debug!(device_id = %self.device_id(), %trigger, "Trigger fired");
        triggers.set_output(trigger, TriggerOutput::Active);

        self.send(Request::Trigger(trigger)).inspect_err(|_| *requested = previous)
    }

    /// Returns the requested on-state, or `None` for a stateless accessory.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.shared.requested.read().light().map(|light| light.on())
    }

    /// Returns the requested brightness, or `None` for a stateless accessory.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.shared
            .requested
            .read()
            .light()
            .map(|light| light.brightness())
    }

    /// Returns the output state of a trigger, or `None` for a light.
    #[must_use]
    pub fn trigger_output(&self, trigger: Trigger) -> Option<TriggerOutput> {
        self.shared
            .requested
            .read()
            .stateless()
            .map(|triggers| triggers.trigger(trigger).output)
    }

    /// Returns the requested state.
    #[must_use]
    pub fn state(&self) -> AccessoryState {
        *self.shared.requested.read()
    }

    /// Returns the last state accepted by the API.
    #[must_use]
    pub fn committed(&self) -> AccessoryState {
        *self.shared.committed.read()
    }

    /// Returns `true` while a brightness change is waiting or being sent.
    #[must_use]
    pub fn is_dispatching(&self) -> bool {
        *self.shared.dispatching.borrow()
    }

    /// Watches the in-progress flag.
    #[must_use]
    pub fn watch_dispatching(&self) -> watch::Receiver<bool> {
        self.shared.dispatching.subscribe()
    }

    /// Subscribes to dispatch events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AccessoryEvent> {
        self.shared.events.subscribe()
    }

    /// Stops the task and waits for it to finish.
    ///
    /// A command already being sent completes first. A brightness change
    /// still waiting for its debounce window is discarded.
    pub async fn shutdown(&self) {
        // The task may already have stopped.
        let _ = self.requests.send(Request::Shutdown);

        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(device_id = %self.device_id(), error = %e, "Accessory task failed");
            }
        }
        // A change queued behind the shutdown request is never flushed.
        self.shared.dispatching.send_replace(false);
    }

    /// Fails once the task has stopped, before any state is touched.
    fn ensure_running(&self) -> Result<()> {
        if self.requests.is_closed() {
            return Err(Error::ShutDown);
        }
        Ok(())
    }

    fn send(&self, request: Request) -> Result<()> {
        self.requests.send(request).map_err(|_| Error::ShutDown)
    }
}

impl std::fmt::Debug for LightAccessory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightAccessory")
            .field("device_id", &self.shared.config.device_id)
            .field("requested", &self.state())
            .field("committed", &self.committed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::accessory::{CharacteristicValue, ServiceKind};
    use crate::command::{CommandBody, CommandType};
    use crate::config::ConnectionMode;
    use crate::error::{ProtocolError, ValueError};
    use crate::event::SkipReason;
    use crate::protocol::ApiResponse;
    use crate::response::ApiStatus;
    use crate::types::SwitchEvent;

    #[derive(Debug, Clone, Copy)]
    enum Outcome {
        Accept,
        Reject(u16),
        Fail,
    }

    #[derive(Clone)]
    struct MockTransport {
        calls: Arc<Mutex<Vec<(String, CommandBody, bool)>>>,
        outcome: Arc<Mutex<Outcome>>,
    }

    impl MockTransport {
        fn new(outcome: Outcome) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                outcome: Arc::new(Mutex::new(outcome)),
            }
        }

        fn commands(&self) -> Vec<String> {
            self.calls
                .lock()
                .iter()
                .map(|(_, body, _)| body.command.clone())
                .collect()
        }
    }

    impl Transport for MockTransport {
        async fn push_changes(
            &self,
            device_id: &str,
            body: &CommandBody,
            target_on: bool,
        ) -> std::result::Result<ApiResponse, ProtocolError> {
            self.calls
                .lock()
                .push((device_id.to_string(), body.clone(), target_on));
            let outcome = *self.outcome.lock();
            match outcome {
                Outcome::Accept => Ok(ApiResponse::success()),
                Outcome::Reject(code) => Ok(ApiResponse::new(200, Some(code), "rejected")),
                Outcome::Fail => Err(ProtocolError::ConnectionFailed("refused".into())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        updates: Mutex<Vec<(ServiceKind, CharacteristicValue)>>,
        failures: Mutex<Vec<ServiceKind>>,
        persisted: Mutex<Vec<AccessoryContext>>,
        rejected: Mutex<Vec<Option<u16>>>,
    }

    impl AccessoryHost for RecordingHost {
        fn update(&self, service: ServiceKind, value: CharacteristicValue) {
            self.updates.lock().push((service, value));
        }

        fn mark_failed(&self, service: ServiceKind, _error: &ProtocolError) {
            self.failures.lock().push(service);
        }

        fn persist(&self, context: &AccessoryContext) {
            self.persisted.lock().push(context.clone());
        }

        fn status_rejected(&self, response: &ApiResponse) {
            self.rejected.lock().push(response.status_code());
        }
    }

    fn setup(
        config: DeviceConfig,
        outcome: Outcome,
    ) -> (LightAccessory, MockTransport, Arc<RecordingHost>) {
        let transport = MockTransport::new(outcome);
        let host = Arc::new(RecordingHost::default());
        let light = LightAccessory::spawn(
            config,
            transport.clone(),
            Arc::clone(&host) as Arc<dyn AccessoryHost>,
            None,
        )
        .unwrap();
        (light, transport, host)
    }

    fn light_config() -> DeviceConfig {
        DeviceConfig::new("02-LIGHT")
    }

    async fn next_outcome(rx: &mut broadcast::Receiver<AccessoryEvent>) -> AccessoryEvent {
        loop {
            let event = rx.recv().await.unwrap();
            if event.is_outcome() {
                return event;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_brightness_changes_send_only_the_last() {
        let (light, transport, _host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_brightness(10).unwrap();
        light.set_brightness(60).unwrap();
        light.set_brightness(0).unwrap();

        let event = next_outcome(&mut rx).await;
        assert!(matches!(event, AccessoryEvent::Committed { .. }));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(transport.commands(), vec!["turnOff"]);

        let committed = *light.committed().light().unwrap();
        assert!(!committed.on());
        assert_eq!(committed.brightness().value(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn brightness_selects_preset() {
        let (light, transport, host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_brightness(75).unwrap();
        next_outcome(&mut rx).await;

        let calls = transport.calls.lock().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "02-LIGHT");
        assert_eq!(calls[0].1.command, "Dim");
        assert_eq!(calls[0].1.command_type, CommandType::Customize);
        assert!(calls[0].2);

        let committed = *light.committed().light().unwrap();
        assert!(committed.on());
        assert_eq!(committed.brightness().value(), 75);

        let persisted = host.persisted.lock().last().cloned().unwrap();
        assert_eq!(persisted.on, Some(true));
        assert_eq!(persisted.brightness, Some(Brightness::new(75).unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_restarts_on_each_change() {
        let (light, transport, _host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_brightness(30).unwrap();
        tokio::time::sleep(Duration::from_millis(900)).await;
        light.set_brightness(99).unwrap();
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(transport.commands().is_empty());

        next_outcome(&mut rx).await;
        assert_eq!(transport.commands(), vec!["Full"]);
    }

    #[tokio::test(start_paused = true)]
    async fn low_brightness_selects_night_light() {
        let (light, transport, _host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_brightness(49).unwrap();
        next_outcome(&mut rx).await;
        light.set_brightness(50).unwrap();
        next_outcome(&mut rx).await;
        light.set_brightness(98).unwrap();
        next_outcome(&mut rx).await;

        assert_eq!(transport.commands(), vec!["Night Light", "Dim", "Dim"]);
    }

    #[tokio::test(start_paused = true)]
    async fn dispatching_flag_tracks_brightness_dispatch() {
        let (light, _transport, _host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();
        assert!(!light.is_dispatching());

        light.set_brightness(40).unwrap();
        assert!(light.is_dispatching());

        next_outcome(&mut rx).await;
        let mut flag = light.watch_dispatching();
        flag.wait_for(|dispatching| !dispatching).await.unwrap();
        assert!(!light.is_dispatching());
    }

    #[tokio::test(start_paused = true)]
    async fn set_on_dispatches_immediately() {
        let (light, transport, host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_on(true).unwrap();
        assert_eq!(light.on(), Some(true));
        assert!(!light.is_dispatching());

        let event = next_outcome(&mut rx).await;
        assert!(matches!(event, AccessoryEvent::Committed { .. }));
        assert_eq!(transport.commands(), vec!["turnOn"]);
        assert!(light.committed().light().unwrap().on());
        assert!(
            host.updates
                .lock()
                .contains(&(ServiceKind::Lightbulb, CharacteristicValue::On(true)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn power_commit_leaves_pending_brightness_alone() {
        let (light, transport, host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();
        host.updates.lock().clear();

        light.set_brightness(60).unwrap();
        light.set_on(true).unwrap();

        next_outcome(&mut rx).await;
        assert_eq!(transport.commands(), vec!["turnOn"]);
        assert_eq!(
            *host.updates.lock(),
            vec![(ServiceKind::Lightbulb, CharacteristicValue::On(true))]
        );

        next_outcome(&mut rx).await;
        assert_eq!(transport.commands(), vec!["turnOn", "Dim"]);
        let updates = host.updates.lock().clone();
        assert!(updates.contains(&(
            ServiceKind::Lightbulb,
            CharacteristicValue::Brightness(Brightness::new(60).unwrap())
        )));
        assert!(!updates.contains(&(
            ServiceKind::Lightbulb,
            CharacteristicValue::Brightness(Brightness::MIN)
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn commands_are_sent_in_order() {
        let (light, transport, _host) = setup(light_config(), Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_on(true).unwrap();
        light.set_on(false).unwrap();
        next_outcome(&mut rx).await;
        next_outcome(&mut rx).await;

        assert_eq!(transport.commands(), vec!["turnOn", "turnOff"]);
        assert!(!light.committed().light().unwrap().on());
    }

    #[tokio::test(start_paused = true)]
    async fn push_on_disabled_sends_nothing() {
        let config = light_config().with_push_on_disabled(true);
        let (light, transport, host) = setup(config, Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_on(true).unwrap();
        let event = next_outcome(&mut rx).await;

        assert!(matches!(
            event,
            AccessoryEvent::Skipped {
                reason: SkipReason::PushDisabled,
                ..
            }
        ));
        assert!(transport.commands().is_empty());
        assert_eq!(light.on(), Some(true));
        assert!(!light.committed().light().unwrap().on());
        assert!(host.persisted.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn push_off_disabled_blocks_zero_brightness() {
        let config = light_config().with_push_off_disabled(true);
        let (light, transport, _host) = setup(config, Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_brightness(0).unwrap();
        let event = next_outcome(&mut rx).await;

        assert!(matches!(event, AccessoryEvent::Skipped { .. }));
        assert!(transport.commands().is_empty());
        assert_eq!(light.on(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn non_cloud_connection_is_skipped() {
        let config = light_config().with_connection(ConnectionMode::Ble);
        let (light, transport, _host) = setup(config, Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_on(true).unwrap();
        let event = next_outcome(&mut rx).await;

        assert!(matches!(
            event,
            AccessoryEvent::Skipped {
                reason: SkipReason::UnsupportedConnection,
                ..
            }
        ));
        assert!(transport.commands().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_keeps_committed_state() {
        let (light, transport, host) = setup(light_config(), Outcome::Fail);
        let mut rx = light.subscribe();
        let before = light.committed();

        light.set_on(true).unwrap();
        let event = next_outcome(&mut rx).await;

        assert!(matches!(event, AccessoryEvent::TransportFailed { .. }));
        assert_eq!(transport.commands().len(), 1);
        assert_eq!(light.committed(), before);
        assert_eq!(*host.failures.lock(), vec![ServiceKind::Lightbulb]);
        assert!(host.rejected.lock().is_empty());
        assert!(host.persisted.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_status_is_reported_once() {
        let (light, _transport, host) = setup(light_config(), Outcome::Reject(161));
        let mut rx = light.subscribe();
        let before = light.committed();

        light.set_brightness(80).unwrap();
        let event = next_outcome(&mut rx).await;

        match event {
            AccessoryEvent::Rejected { status, .. } => {
                assert_eq!(status, ApiStatus::DeviceOffline);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(*host.rejected.lock(), vec![Some(161)]);
        assert!(host.failures.lock().is_empty());
        assert_eq!(light.committed(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_on_off_commands() {
        let config = light_config().with_custom_commands(Some("Power On".into()), None);
        let (light, transport, _host) = setup(config, Outcome::Accept);
        let mut rx = light.subscribe();

        light.set_on(true).unwrap();
        next_outcome(&mut rx).await;
        light.set_on(false).unwrap();
        next_outcome(&mut rx).await;

        let calls = transport.calls.lock().clone();
        assert_eq!(calls[0].1.command, "Power On");
        assert_eq!(calls[1].1.command, "turnOff");
        assert!(
            calls
                .iter()
                .all(|(_, body, _)| body.command_type == CommandType::Customize)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_zero_is_a_no_op() {
        let config = light_config().with_stateless(true);
        let (light, transport, _host) = setup(config, Outcome::Accept);

        light.write_trigger(Trigger::On, 0).unwrap();
        light.write_trigger(Trigger::Off, 0).unwrap();
        light.write_trigger(Trigger::Off, 2).unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(transport.commands().is_empty());
        assert_eq!(light.trigger_output(Trigger::On), Some(TriggerOutput::Idle));
        assert_eq!(light.trigger_output(Trigger::Off), Some(TriggerOutput::Idle));
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_one_dispatches_once() {
        let config = light_config().with_stateless(true);
        let (light, transport, host) = setup(config, Outcome::Accept);
        let mut rx = light.subscribe();

        light.write_trigger(Trigger::Off, 1).unwrap();
        assert_eq!(light.trigger_output(Trigger::Off), Some(TriggerOutput::Active));

        let event = next_outcome(&mut rx).await;
        assert!(matches!(event, AccessoryEvent::Committed { .. }));
        tokio::time::sleep(Duration::from_secs(2)).await;

        let calls = transport.calls.lock().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.command, "turnOff");
        assert!(!calls[0].2);
        assert_eq!(light.trigger_output(Trigger::Off), Some(TriggerOutput::Idle));
        assert!(host.updates.lock().contains(&(
            ServiceKind::OffTrigger,
            CharacteristicValue::SwitchEvent(SwitchEvent::SinglePress)
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_failure_marks_both_triggers() {
        let config = light_config().with_stateless(true);
        let (light, _transport, host) = setup(config, Outcome::Fail);
        let mut rx = light.subscribe();
        host.updates.lock().clear();

        light.write_trigger(Trigger::On, 1).unwrap();
        next_outcome(&mut rx).await;

        assert_eq!(
            *host.failures.lock(),
            vec![ServiceKind::OnTrigger, ServiceKind::OffTrigger]
        );
        assert_eq!(light.trigger_output(Trigger::On), Some(TriggerOutput::Idle));
        assert_eq!(
            *host.updates.lock(),
            vec![(
                ServiceKind::OnTrigger,
                CharacteristicValue::OutputState(TriggerOutput::Idle)
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn skipped_trigger_resets_host_output() {
        let config = light_config()
            .with_stateless(true)
            .with_push_off_disabled(true);
        let (light, transport, host) = setup(config, Outcome::Accept);
        let mut rx = light.subscribe();
        host.updates.lock().clear();

        light.write_trigger(Trigger::Off, 1).unwrap();
        let event = next_outcome(&mut rx).await;

        assert!(matches!(event, AccessoryEvent::Skipped { .. }));
        assert!(transport.commands().is_empty());
        assert_eq!(light.trigger_output(Trigger::Off), Some(TriggerOutput::Idle));
        assert_eq!(
            *host.updates.lock(),
            vec![(
                ServiceKind::OffTrigger,
                CharacteristicValue::OutputState(TriggerOutput::Idle)
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_mode_operations_are_ignored() {
        let (light, transport, _host) = setup(light_config(), Outcome::Accept);
        light.write_trigger(Trigger::On, 1).unwrap();
        assert_eq!(light.trigger_output(Trigger::On), None);

        let config = light_config().with_stateless(true);
        let (switch, _, _) = setup(config, Outcome::Accept);
        switch.set_on(true).unwrap();
        switch.set_brightness(50).unwrap();
        assert_eq!(switch.on(), None);
        assert_eq!(switch.brightness(), None);
        assert!(!switch.is_dispatching());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(transport.commands().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn brightness_out_of_range() {
        let (light, _transport, _host) = setup(light_config(), Outcome::Accept);
        let err = light.set_brightness(101).unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::OutOfRange { actual: 101, .. })
        ));
        assert!(!light.is_dispatching());
    }

    #[tokio::test(start_paused = true)]
    async fn restored_state_is_pushed_on_spawn() {
        let host = Arc::new(RecordingHost::default());
        let context = AccessoryContext {
            on: Some(true),
            brightness: Some(Brightness::new(42).unwrap()),
            ..AccessoryContext::default()
        };
        let light = LightAccessory::spawn(
            light_config(),
            MockTransport::new(Outcome::Accept),
            Arc::clone(&host) as Arc<dyn AccessoryHost>,
            Some(context),
        )
        .unwrap();

        assert_eq!(light.brightness(), Some(Brightness::new(42).unwrap()));
        assert_eq!(light.committed(), light.state());
        let updates = host.updates.lock().clone();
        assert_eq!(
            updates,
            vec![
                (ServiceKind::Lightbulb, CharacteristicValue::On(true)),
                (
                    ServiceKind::Lightbulb,
                    CharacteristicValue::Brightness(Brightness::new(42).unwrap())
                ),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn category_follows_mode() {
        let (light, _, _) = setup(light_config(), Outcome::Accept);
        assert_eq!(light.category(), Category::Lightbulb);

        let (switch, _, _) = setup(light_config().with_stateless(true), Outcome::Accept);
        assert_eq!(switch.category(), Category::ProgrammableSwitch);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_discards_pending_brightness() {
        let (light, transport, _host) = setup(light_config(), Outcome::Accept);

        light.set_brightness(70).unwrap();
        light.shutdown().await;

        assert!(!light.is_dispatching());
        assert!(transport.commands().is_empty());
        assert!(matches!(light.set_on(true), Err(Error::ShutDown)));
    }

    #[tokio::test(start_paused = true)]
    async fn setters_after_shutdown_change_nothing() {
        let (light, transport, _host) = setup(light_config(), Outcome::Accept);
        light.shutdown().await;
        let before = light.state();

        assert!(matches!(light.set_brightness(50), Err(Error::ShutDown)));
        assert!(matches!(light.set_on(true), Err(Error::ShutDown)));
        assert!(!light.is_dispatching());
        assert_eq!(light.state(), before);

        let (switch, _, _) = setup(light_config().with_stateless(true), Outcome::Accept);
        switch.shutdown().await;
        assert!(matches!(
            switch.write_trigger(Trigger::On, 1),
            Err(Error::ShutDown)
        ));
        assert_eq!(switch.trigger_output(Trigger::On), Some(TriggerOutput::Idle));

        assert!(transport.commands().is_empty());
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let result = LightAccessory::spawn(
            DeviceConfig::new(""),
            MockTransport::new(Outcome::Accept),
            Arc::new(RecordingHost::default()),
            None,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
