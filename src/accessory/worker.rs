// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The task that serializes dispatches for one accessory.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::command::{CommandSet, LightCommand};
use crate::error::ProtocolError;
use crate::event::{AccessoryEvent, SkipReason};
use crate::protocol::{ApiResponse, Transport};
use crate::state::{AccessoryContext, AccessoryState, StateChange};
use crate::types::{SwitchEvent, Trigger, TriggerOutput};

use super::host::{AccessoryHost, CharacteristicValue, ServiceKind};
use super::light::Shared;

/// Work queued by the handle.
#[derive(Debug)]
pub(super) enum Request {
    /// The on-state was set.
    Power(bool),
    /// The brightness was set; (re)arms the debounce timer.
    BrightnessChanged,
    /// A trigger was fired.
    Trigger(Trigger),
    /// Stop the task.
    Shutdown,
}

pub(super) struct Worker<T: Transport> {
    pub(super) shared: Arc<Shared>,
    pub(super) transport: T,
    pub(super) host: Arc<dyn AccessoryHost>,
    pub(super) commands: CommandSet,
    pub(super) debounce: Duration,
}

impl<T: Transport> Worker<T> {
    pub(super) async fn run(self, mut requests: mpsc::UnboundedReceiver<Request>) {
        let device_id = self.shared.config.device_id.clone();
        let mut deadline: Option<(Instant, u64)> = None;

        tracing::debug!(%device_id, "Accessory task started");

        loop {
            let timer = async move {
                match deadline {
                    Some((at, _)) => sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                request = requests.recv() => match request {
                    Some(Request::Power(on)) => self.dispatch_power(on).await,
                    Some(Request::BrightnessChanged) => {
                        let raised = self.shared.raised.load(Ordering::Acquire);
                        deadline = Some((Instant::now() + self.debounce, raised));
                        self.shared.dispatching.send_replace(true);
                    }
                    Some(Request::Trigger(trigger)) => self.dispatch_trigger(trigger).await,
                    Some(Request::Shutdown) | None => break,
                },
                () = timer => {
                    let seen = deadline.take().map_or(0, |(_, raised)| raised);
                    self.flush_brightness().await;
                    self.clear_dispatching(seen);
                }
            }
        }

        if deadline.is_some() {
            tracing::debug!(%device_id, "Discarding pending brightness change");
            self.shared.dispatching.send_replace(false);
        }
        tracing::debug!(%device_id, "Accessory task stopped");
    }

    /// Clears the in-progress flag unless another brightness change was
    /// raised after the flushed one.
    fn clear_dispatching(&self, seen: u64) {
        let raised = &self.shared.raised;
        self.shared.dispatching.send_if_modified(|dispatching| {
            if raised.load(Ordering::Acquire) == seen && *dispatching {
                *dispatching = false;
                true
            } else {
                false
            }
        });
    }

    async fn dispatch_power(&self, on: bool) {
        let command = if on {
            LightCommand::TurnOn
        } else {
            LightCommand::TurnOff
        };
        self.dispatch(command, StateChange::On(on)).await;
    }

    /// Sends the preset for the current requested brightness, or turns the
    /// light off when the requested state is off.
    async fn flush_brightness(&self) {
        let light = self.shared.requested.read().light().copied();
        let Some(light) = light else {
            return;
        };
        let command = if light.on() {
            LightCommand::for_brightness(light.brightness())
        } else {
            LightCommand::TurnOff
        };
        let change = StateChange::Light {
            on: light.on(),
            brightness: light.brightness(),
        };
        self.dispatch(command, change).await;
    }

    async fn dispatch_trigger(&self, trigger: Trigger) {
        let command = if trigger.target_on() {
            LightCommand::TurnOn
        } else {
            LightCommand::TurnOff
        };
        let change = StateChange::Trigger {
            trigger,
            output: TriggerOutput::Idle,
        };
        let committed = self.dispatch(command, change).await;

        // Triggers are momentary whatever the outcome.
        {
            let mut requested = self.shared.requested.write();
            if let Some(triggers) = requested.stateless_mut() {
                triggers.set_output(trigger, TriggerOutput::Idle);
            }
        }

        let service = ServiceKind::for_trigger(trigger);
        if committed {
            self.host
                .update(service, CharacteristicValue::SwitchEvent(SwitchEvent::SinglePress));
        } else {
            // The host still shows the 1 it wrote.
            self.host
                .update(service, CharacteristicValue::OutputState(TriggerOutput::Idle));
        }
    }

    /// Runs one dispatch to completion and returns whether it was committed.
    async fn dispatch(&self, command: LightCommand, change: StateChange) -> bool {
        let config = &self.shared.config;
        let device_id = config.device_id.as_str();

        let push_disabled = match command {
            LightCommand::TurnOn => config.disable_push_on,
            LightCommand::TurnOff => config.disable_push_off,
            LightCommand::Preset(_) => false,
        };
        if push_disabled {
            tracing::debug!(%device_id, ?command, "Push disabled, not sending");
            self.skip(SkipReason::PushDisabled);
            return false;
        }
        if !config.is_cloud() {
            tracing::warn!(
                %device_id,
                connection = %config.connection,
                "Connection type does not support sending commands"
            );
            self.skip(SkipReason::UnsupportedConnection);
            return false;
        }

        let body = self.commands.body(command);
        let target_on = command.target_on();
        tracing::debug!(
            %device_id,
            command = %body.command,
            command_type = %body.command_type,
            "Sending command"
        );
        self.shared.events.publish(AccessoryEvent::Dispatched {
            device_id: device_id.to_string(),
            command: body.clone(),
            target_on,
        });

        match self.transport.push_changes(device_id, &body, target_on).await {
            Ok(response) if response.is_success() => {
                self.commit(change);
                true
            }
            Ok(response) => {
                self.report_status(&response);
                false
            }
            Err(e) => {
                self.report_api_error(&e);
                false
            }
        }
    }

    fn skip(&self, reason: SkipReason) {
        self.shared.events.publish(AccessoryEvent::Skipped {
            device_id: self.shared.config.device_id.clone(),
            reason,
        });
    }

    /// Applies a change the API accepted and pushes the result outward.
    fn commit(&self, change: StateChange) {
        let state = {
            let mut committed = self.shared.committed.write();
            committed.apply(&change);
            *committed
        };

        tracing::info!(
            device_id = %self.shared.config.device_id,
            name = %self.shared.config.display_name(),
            ?change,
            "Command accepted"
        );

        push_change(self.host.as_ref(), &change);
        self.host.persist(&AccessoryContext::from_state(&state));
        self.shared.events.publish(AccessoryEvent::Committed {
            device_id: self.shared.config.device_id.clone(),
            change,
            state,
        });
    }

    fn report_status(&self, response: &ApiResponse) {
        let status = response.status();
        tracing::warn!(
            device_id = %self.shared.config.device_id,
            http_status = response.http_status(),
            status_code = ?response.status_code(),
            %status,
            message = %response.message(),
            "Command rejected"
        );

        self.host.status_rejected(response);
        self.shared.events.publish(AccessoryEvent::Rejected {
            device_id: self.shared.config.device_id.clone(),
            status,
            message: response.message().to_string(),
        });
    }

    fn report_api_error(&self, error: &ProtocolError) {
        tracing::error!(
            device_id = %self.shared.config.device_id,
            error = %error,
            "Failed to send command"
        );

        for &service in ServiceKind::owned(self.shared.config.stateless) {
            self.host.mark_failed(service, error);
        }
        self.shared.events.publish(AccessoryEvent::TransportFailed {
            device_id: self.shared.config.device_id.clone(),
            message: error.to_string(),
        });
    }
}

/// Pushes only the characteristics a committed change touched.
///
/// A power commit leaves the brightness alone, since a newer brightness may
/// still be waiting out its quiet period.
fn push_change(host: &dyn AccessoryHost, change: &StateChange) {
    match *change {
        StateChange::On(on) => {
            host.update(ServiceKind::Lightbulb, CharacteristicValue::On(on));
        }
        StateChange::Light { on, brightness } => {
            host.update(ServiceKind::Lightbulb, CharacteristicValue::On(on));
            host.update(ServiceKind::Lightbulb, CharacteristicValue::Brightness(brightness));
        }
        StateChange::Trigger { trigger, output } => {
            host.update(
                ServiceKind::for_trigger(trigger),
                CharacteristicValue::OutputState(output),
            );
        }
    }
}

/// Pushes every characteristic of a state to the host.
pub(super) fn push_state(host: &dyn AccessoryHost, state: &AccessoryState) {
    match state {
        AccessoryState::Light(light) => {
            host.update(ServiceKind::Lightbulb, CharacteristicValue::On(light.on()));
            host.update(
                ServiceKind::Lightbulb,
                CharacteristicValue::Brightness(light.brightness()),
            );
        }
        AccessoryState::Stateless(triggers) => {
            for trigger in [Trigger::On, Trigger::Off] {
                host.update(
                    ServiceKind::for_trigger(trigger),
                    CharacteristicValue::OutputState(triggers.trigger(trigger).output),
                );
            }
        }
    }
}
