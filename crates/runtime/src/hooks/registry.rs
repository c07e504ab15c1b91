//! Hook registry mapping event names to ordered listener lists.

use std::collections::HashMap;

use tracing::{debug, error};

use super::{DispatchPolicy, HookArg, HookError, Listener};

/// Registry of listeners keyed by event name.
///
/// Insertion order is invocation order. The same listener may be registered
/// several times and then runs once per registration.
#[derive(Debug, Default)]
pub struct HookRegistry {
    table: HashMap<String, Vec<Listener>>,
    policy: DispatchPolicy,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            table: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
    }

    /// Appends `listener` to the listeners of `event`.
    pub fn add_listener(&mut self, event: impl Into<String>, listener: Listener) {
        let event = event.into();
        debug!(
            target: "runtime::hooks",
            event = %event,
            listener = listener.label(),
            "listener added"
        );
        self.table.entry(event).or_default().push(listener);
    }

    /// Removes the first registration of `listener` on `event`.
    ///
    /// Returns false when it was not registered.
    pub fn remove_listener(&mut self, event: &str, listener: &Listener) -> bool {
        let Some(listeners) = self.table.get_mut(event) else {
            return false;
        };
        let Some(index) = listeners.iter().position(|l| l == listener) else {
            return false;
        };
        listeners.remove(index);
        if listeners.is_empty() {
            self.table.remove(event);
        }
        true
    }

    /// Invokes every listener of `event` in registration order with `args`.
    ///
    /// Listeners receive the same argument slice and may mutate it; later
    /// listeners observe earlier mutations. Triggering an event without
    /// listeners succeeds.
    ///
    /// # Error Handling
    ///
    /// - `FailFast`: the first failure is returned and later listeners are skipped
    /// - `Isolate`: failures are logged and every listener runs
    pub fn trigger_hook(&self, event: &str, args: &mut [HookArg]) -> Result<(), HookError> {
        let Some(listeners) = self.table.get(event) else {
            return Ok(());
        };

        for listener in listeners {
            if let Err(e) = listener.invoke(event, args) {
                match self.policy {
                    DispatchPolicy::FailFast => return Err(e),
                    DispatchPolicy::Isolate => error!(
                        target: "runtime::hooks",
                        event,
                        listener = listener.label(),
                        error = %e,
                        "listener failed, continuing"
                    ),
                }
            }
        }

        Ok(())
    }

    /// Listeners registered for `event`, in invocation order.
    pub fn listeners(&self, event: &str) -> &[Listener] {
        self.table.get(event).map_or(&[], Vec::as_slice)
    }

    /// Names of all events with at least one listener.
    pub fn events(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
