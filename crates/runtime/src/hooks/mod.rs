//! Named-event hook dispatch.
//!
//! Listeners are registered per event name and invoked synchronously, in
//! registration order, whenever the event is triggered. The database fires
//! `on_<kind>_created` after every record it builds, `on_load_database` once
//! collections are installed and `player_loaded` after finalization; mods may
//! register and trigger events of their own.

mod registry;

pub use registry::HookRegistry;

use std::fmt;
use std::sync::Arc;

use database_core::{AnyRecord, ErrorSeverity, ModError};

/// Result returned by listener callbacks.
pub type ListenerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

type Callback = Arc<dyn Fn(&mut [HookArg]) -> ListenerResult + Send + Sync>;

/// An argument passed to listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum HookArg {
    Int(i64),
    Bool(bool),
    Str(String),
    Record(AnyRecord),
}

impl HookArg {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut AnyRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<i64> for HookArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for HookArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for HookArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for HookArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<AnyRecord> for HookArg {
    fn from(value: AnyRecord) -> Self {
        Self::Record(value)
    }
}

/// Number of arguments a listener accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Accepts any number of arguments.
    Any,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => n == count,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// A registered callback.
///
/// Listeners compare by identity: clones of one listener are equal, two
/// listeners built from identical closures are not.
#[derive(Clone)]
pub struct Listener {
    label: String,
    arity: Arity,
    callback: Callback,
}

impl Listener {
    pub fn new(
        label: impl Into<String>,
        arity: Arity,
        callback: impl Fn(&mut [HookArg]) -> ListenerResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            arity,
            callback: Arc::new(callback),
        }
    }

    /// A listener that accepts any number of arguments.
    pub fn variadic(
        label: impl Into<String>,
        callback: impl Fn(&mut [HookArg]) -> ListenerResult + Send + Sync + 'static,
    ) -> Self {
        Self::new(label, Arity::Any, callback)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    fn invoke(&self, event: &str, args: &mut [HookArg]) -> Result<(), HookError> {
        if !self.arity.accepts(args.len()) {
            return Err(HookError::Arity {
                event: event.to_owned(),
                listener: self.label.clone(),
                expected: self.arity,
                got: args.len(),
            });
        }
        (self.callback)(args).map_err(|e| HookError::Listener {
            event: event.to_owned(),
            listener: self.label.clone(),
            message: e.to_string(),
        })
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("label", &self.label)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// How a trigger reacts to a failing listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// The first failure aborts the trigger; later listeners are skipped.
    #[default]
    FailFast,

    /// Failures are logged and the remaining listeners still run.
    Isolate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("listener `{listener}` on `{event}` expects {expected} arguments, got {got}")]
    Arity {
        event: String,
        listener: String,
        expected: Arity,
        got: usize,
    },

    #[error("listener `{listener}` on `{event}` failed: {message}")]
    Listener {
        event: String,
        listener: String,
        message: String,
    },
}

impl ModError for HookError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Arity { .. } => ErrorSeverity::Validation,
            Self::Listener { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Arity { .. } => "HOOK_ARITY",
            Self::Listener { .. } => "HOOK_LISTENER_FAILED",
        }
    }
}
