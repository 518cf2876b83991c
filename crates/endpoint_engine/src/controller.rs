use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use endpoint_core::{
    update, CycleId, Effect, FieldState, FieldViewModel, Msg, TimerCommand, TimerGeneration,
};
use endpoint_logging::{endpoint_debug, endpoint_error, endpoint_info, endpoint_warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::notify::{rejection_notice, Notification};
use crate::timer::RefreshTimer;
use crate::{AvailabilityChecker, EngineConfig, ProbeError, Prober};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("field controller must be created inside a tokio runtime")]
    NoRuntime,
    #[error("could not build probe transport: {0}")]
    Transport(#[from] ProbeError),
    #[error(transparent)]
    Config(#[from] crate::ConfigError),
}

/// Host callbacks. Called outside of any controller lock, so a hook may call
/// back into the controller.
pub trait FieldHooks: Send + Sync {
    /// Receives each accepted URL exactly once.
    fn on_submit(&self, url: &str);

    fn on_notify(&self, _notification: &Notification) {}

    fn on_view(&self, _view: &FieldViewModel) {}
}

/// Runs the field state machine against real timers and probes.
#[derive(Clone)]
pub struct FieldController {
    inner: Arc<Inner>,
}

struct Inner {
    runtime: Handle,
    checker: AvailabilityChecker,
    hooks: Arc<dyn FieldHooks>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    shared: Mutex<Shared>,
}

struct Shared {
    state: FieldState,
    timer: Option<RefreshTimer>,
    checks: CancellationToken,
}

enum Outbound {
    Submit(String),
    Notify(Notification),
    View(FieldViewModel),
}

impl FieldController {
    /// Controller probing over HTTP with an entropy-seeded title picker.
    pub fn new(
        config: &EngineConfig,
        hooks: Arc<dyn FieldHooks>,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let checker = AvailabilityChecker::with_reqwest(config.probe.clone())?;
        Self::build(config, checker, hooks, Box::new(StdRng::from_entropy()))
    }

    pub fn with_parts(
        config: &EngineConfig,
        prober: Arc<dyn Prober>,
        hooks: Arc<dyn FieldHooks>,
        rng: Box<dyn RngCore + Send>,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let checker = AvailabilityChecker::new(prober, config.probe.clone());
        Self::build(config, checker, hooks, rng)
    }

    fn build(
        config: &EngineConfig,
        checker: AvailabilityChecker,
        hooks: Arc<dyn FieldHooks>,
        rng: Box<dyn RngCore + Send>,
    ) -> Result<Self, ControllerError> {
        let runtime = Handle::try_current().map_err(|_| ControllerError::NoRuntime)?;
        let state = FieldState::new().with_refresh_period(config.refresh.period);
        let inner = Inner {
            runtime,
            checker,
            hooks,
            rng: Mutex::new(rng),
            shared: Mutex::new(Shared {
                state,
                timer: None,
                checks: CancellationToken::new(),
            }),
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn input_changed(&self, value: impl Into<String>) -> FieldViewModel {
        self.dispatch(Msg::InputChanged(value.into()))
    }

    pub fn accept_suggestion(&self, index: usize) -> FieldViewModel {
        self.dispatch(Msg::SuggestionAccepted(index))
    }

    pub fn accept_top_suggestion(&self) -> FieldViewModel {
        self.dispatch(Msg::AcceptTopSuggestion)
    }

    pub fn dismiss_suggestions(&self) -> FieldViewModel {
        self.dispatch(Msg::SuggestionsDismissed)
    }

    /// Manual submit; a no-op while another check is running.
    pub fn submit(&self) -> FieldViewModel {
        self.dispatch(Msg::SubmitClicked)
    }

    /// Reports the current value of the host-owned auto-refresh toggle.
    pub fn set_auto_refresh(&self, enabled: bool) -> FieldViewModel {
        self.dispatch(Msg::AutoRefreshChanged(enabled))
    }

    /// Cancels the timer and any running check. Irreversible.
    pub fn tear_down(&self) -> FieldViewModel {
        self.dispatch(Msg::TornDown)
    }

    pub fn view(&self) -> FieldViewModel {
        lock(&self.inner.shared).state.view()
    }

    /// Generation of the live refresh timer, if one exists.
    pub fn active_timer(&self) -> Option<TimerGeneration> {
        lock(&self.inner.shared)
            .timer
            .as_ref()
            .map(RefreshTimer::generation)
    }

    pub fn dispatch(&self, msg: Msg) -> FieldViewModel {
        self.inner.dispatch(msg)
    }
}

impl Inner {
    fn dispatch(self: &Arc<Self>, msg: Msg) -> FieldViewModel {
        let (view, outbound) = {
            let mut shared = lock(&self.shared);
            let tick = match msg {
                Msg::RefreshTick { generation } => Some(generation),
                _ => None,
            };
            let state = std::mem::take(&mut shared.state);
            let (mut state, effects) = update(state, msg);
            if let Some(reason) = dropped_tick_reason(tick, &effects, state.is_busy()) {
                if let Some(generation) = tick {
                    endpoint_debug!("Dropping refresh tick generation={}: {}", generation, reason);
                }
            }
            let view = state.view();
            let dirty = state.consume_dirty();
            shared.state = state;

            let mut outbound = Vec::new();
            for effect in effects {
                self.apply(&mut shared, effect, &mut outbound);
            }
            if dirty {
                outbound.push(Outbound::View(view.clone()));
            }
            (view, outbound)
        };

        for item in outbound {
            match item {
                Outbound::Submit(url) => self.hooks.on_submit(&url),
                Outbound::Notify(notification) => self.hooks.on_notify(&notification),
                Outbound::View(view) => self.hooks.on_view(&view),
            }
        }
        view
    }

    fn apply(
        self: &Arc<Self>,
        shared: &mut Shared,
        effect: Effect,
        outbound: &mut Vec<Outbound>,
    ) {
        match effect {
            Effect::CheckAvailability { cycle, url, origin } => {
                endpoint_info!(
                    "CheckAvailability cycle={} origin={:?} url={}",
                    cycle,
                    origin,
                    url
                );
                self.spawn_check(cycle, url, shared.checks.clone());
            }
            Effect::Submit { url } => {
                endpoint_info!("Submitting url={}", url);
                outbound.push(Outbound::Submit(url));
            }
            Effect::NotifyRejection { url, reason } => {
                endpoint_warn!("Rejected url={} reason={}", url, reason);
                let mut rng = lock(&self.rng);
                outbound.push(Outbound::Notify(rejection_notice(reason, &mut **rng)));
            }
            Effect::Timer(TimerCommand::Arm { generation, period }) => {
                if let Some(stale) = shared.timer.take() {
                    endpoint_error!(
                        "Timer generation={} still live while arming generation={}",
                        stale.generation(),
                        generation
                    );
                    stale.cancel();
                }
                endpoint_debug!(
                    "Arming refresh timer generation={} period={:?}",
                    generation,
                    period
                );
                let weak = Arc::downgrade(self);
                shared.timer = Some(RefreshTimer::spawn(
                    &self.runtime,
                    generation,
                    period,
                    move |generation| tick(&weak, generation),
                ));
            }
            Effect::Timer(TimerCommand::Cancel { generation }) => {
                match shared.timer.take() {
                    Some(timer) if timer.generation() == generation => {
                        endpoint_debug!("Cancelling refresh timer generation={}", generation);
                        timer.cancel();
                    }
                    other => shared.timer = other,
                }
            }
            Effect::CancelChecks => {
                endpoint_debug!("Cancelling running checks");
                shared.checks.cancel();
                shared.checks = CancellationToken::new();
            }
        }
    }

    fn spawn_check(self: &Arc<Self>, cycle: CycleId, url: String, cancel: CancellationToken) {
        let checker = self.checker.clone();
        let weak = Arc::downgrade(self);
        self.runtime.spawn(async move {
            let outcome = checker.check_with_cancel(&url, &cancel).await;
            match weak.upgrade() {
                Some(inner) => {
                    inner.dispatch(Msg::CheckCompleted { cycle, outcome });
                }
                None => endpoint_debug!("Controller gone; dropping result of cycle={}", cycle),
            }
        });
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let mut shared = lock(&self.shared);
        if let Some(timer) = shared.timer.take() {
            timer.cancel();
        }
        shared.checks.cancel();
    }
}

/// Delivers a timer tick; `false` stops the timer once the controller is gone.
fn tick(weak: &Weak<Inner>, generation: TimerGeneration) -> bool {
    let Some(inner) = weak.upgrade() else {
        return false;
    };
    inner.dispatch(Msg::RefreshTick { generation });
    true
}

/// Why a refresh tick produced no effects, judged against the state `update`
/// left behind. `None` when the tick started a cycle or was not a tick.
fn dropped_tick_reason(
    tick: Option<TimerGeneration>,
    effects: &[Effect],
    busy: bool,
) -> Option<&'static str> {
    tick?;
    if !effects.is_empty() {
        return None;
    }
    Some(if busy {
        "check in flight"
    } else {
        "timer no longer current"
    })
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
