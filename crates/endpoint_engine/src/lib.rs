//! Endpoint engine: availability probing, refresh timers, and effect
//! execution for the endpoint core state machine.
mod checker;
mod config;
mod controller;
mod notify;
mod probe;
mod timer;

pub use checker::AvailabilityChecker;
pub use config::{
    ConfigError, EngineConfig, ProbeSettings, RefreshSettings, DEFAULT_PROBE_TIMEOUT, TEXT_PLAIN,
};
pub use controller::{ControllerError, FieldController, FieldHooks};
pub use notify::{rejection_notice, Notification, ERROR_TITLES};
pub use probe::{ProbeError, ProbeResponse, Prober, ReqwestProber};
