//! An in-memory [`Backend`] with scripted adapters.
//!
//! It answers the way a real implementation would, without a GPU, and counts
//! the calls it receives so tests can check how they were driven.

use crate::{AdapterReleaser, Backend, RequestAdapterCallback};
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard,
    },
    thread,
};
use webgpu_boot_core::{
    fill, AdapterId, AdapterInfo, AdapterType, BackendType, FeatureName, HandleAllocator,
    InstanceDescriptor, InstanceId, Limits, PowerPreference, RequestAdapterOptions,
    RequestAdapterStatus, SurfaceId, TextureFormat,
};

/// When adapter request callbacks run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Before `instance_request_adapter` returns, like native implementations.
    #[default]
    Immediate,
    /// On a separate thread, after `instance_request_adapter` returned.
    Threaded,
    /// When [`ScriptedBackend::resolve_pending`] is called.
    Deferred,
    /// Never. The callback is dropped.
    Dropped,
}

/// One adapter the backend can hand out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedAdapter {
    pub info: AdapterInfo,
    pub limits: Limits,
    pub features: Vec<FeatureName>,
    /// Formats it can present to surfaces with. Empty means it cannot present.
    pub surface_formats: Vec<TextureFormat>,
}

impl ScriptedAdapter {
    pub fn new(name: &str, adapter_type: AdapterType) -> Self {
        Self {
            info: AdapterInfo {
                name: name.to_owned(),
                adapter_type,
                backend_type: BackendType::Vulkan,
                ..AdapterInfo::default()
            },
            limits: Limits::webgpu_defaults(),
            features: Vec::new(),
            surface_formats: vec![TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm],
        }
    }

    pub fn with_features(mut self, features: &[FeatureName]) -> Self {
        self.features = features.to_vec();
        self
    }

    pub fn with_surface_formats(mut self, formats: &[TextureFormat]) -> Self {
        self.surface_formats = formats.to_vec();
        self
    }
}

type Outcome = (RequestAdapterStatus, Option<AdapterId>, Option<String>);

#[derive(Default)]
struct State {
    handles: HandleAllocator,
    instances: HashSet<InstanceId>,
    adapters: HashMap<AdapterId, usize>,
    surfaces: HashMap<SurfaceId, InstanceId>,
    pending: Vec<(RequestAdapterCallback, Outcome)>,
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct ScriptedBackend {
    adapters: Vec<ScriptedAdapter>,
    resolution: Resolution,
    fail_instance_creation: bool,
    handle_on_failure: bool,
    state: Arc<Mutex<State>>,
    requests: AtomicUsize,
    callbacks: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(adapters: Vec<ScriptedAdapter>) -> Self {
        Self {
            adapters,
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Makes every [`Backend::create_instance`] call fail.
    pub fn failing_instance_creation(mut self) -> Self {
        self.fail_instance_creation = true;
        self
    }

    /// Makes failed adapter requests still deliver an adapter handle, as a
    /// misbehaving implementation might.
    pub fn with_handle_on_failure(mut self) -> Self {
        self.handle_on_failure = true;
        self
    }

    /// The windowing side: binds a new surface to `instance`.
    pub fn create_surface(&self, instance: InstanceId) -> Option<SurfaceId> {
        let mut state = self.state();
        if !state.instances.contains(&instance) {
            return None;
        }

        let surface = SurfaceId::from_raw(state.handles.next_raw());
        state.surfaces.insert(surface, instance);

        Some(surface)
    }

    /// Runs the callbacks held back by [`Resolution::Deferred`].
    pub fn resolve_pending(&self) -> usize {
        let pending = std::mem::take(&mut self.state().pending);
        let count = pending.len();

        for (callback, outcome) in pending {
            self.fire(callback, outcome);
        }

        count
    }

    pub fn requests_issued(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn callbacks_fired(&self) -> usize {
        self.callbacks.load(Ordering::SeqCst)
    }

    /// Adapters handed out and not released yet.
    pub fn live_adapters(&self) -> usize {
        self.state().adapters.len()
    }

    pub fn live_instances(&self) -> usize {
        self.state().instances.len()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }

    fn adapter(&self, adapter: AdapterId) -> Option<&ScriptedAdapter> {
        let index = *self.state().adapters.get(&adapter)?;
        self.adapters.get(index)
    }

    fn fire(&self, callback: RequestAdapterCallback, outcome: Outcome) {
        self.callbacks.fetch_add(1, Ordering::SeqCst);
        let (status, adapter, message) = outcome;
        callback(status, adapter, message);
    }

    fn select(
        &self,
        state: &mut State,
        instance: InstanceId,
        options: &RequestAdapterOptions,
    ) -> Outcome {
        if !state.instances.contains(&instance) {
            return (
                RequestAdapterStatus::Error,
                None,
                Some(format!("{:?} is not a valid instance", instance)),
            );
        }

        if let Some(surface) = options.compatible_surface {
            if state.surfaces.get(&surface) != Some(&instance) {
                return (
                    RequestAdapterStatus::Error,
                    None,
                    Some(format!("{:?} does not belong to {:?}", surface, instance)),
                );
            }
        }

        let candidates: Vec<(usize, &ScriptedAdapter)> = self
            .adapters
            .iter()
            .enumerate()
            .filter(|(_, adapter)| {
                (options.compatible_surface.is_none() || !adapter.surface_formats.is_empty())
                    && (!options.force_fallback_adapter
                        || adapter.info.adapter_type == AdapterType::Cpu)
            })
            .collect();

        let preferred = match options.power_preference {
            PowerPreference::HighPerformance => Some(AdapterType::DiscreteGpu),
            PowerPreference::LowPower => Some(AdapterType::IntegratedGpu),
            PowerPreference::Undefined => None,
        };

        let chosen = candidates
            .iter()
            .find(|(_, adapter)| Some(adapter.info.adapter_type) == preferred)
            .or_else(|| candidates.first())
            .map(|(index, _)| *index);

        match chosen {
            Some(index) => {
                let adapter = AdapterId::from_raw(state.handles.next_raw());
                state.adapters.insert(adapter, index);
                (RequestAdapterStatus::Success, Some(adapter), None)
            }
            None => (
                RequestAdapterStatus::Unavailable,
                None,
                Some("No adapter matches the requested options".to_owned()),
            ),
        }
    }
}

impl Backend for ScriptedBackend {
    fn adapter_enumerate_features(
        &self,
        adapter: AdapterId,
        out: Option<&mut [FeatureName]>,
    ) -> usize {
        match self.adapter(adapter) {
            Some(scripted) => fill(&scripted.features, out),
            None => 0,
        }
    }

    fn adapter_info(&self, adapter: AdapterId) -> Option<AdapterInfo> {
        self.adapter(adapter).map(|scripted| scripted.info.clone())
    }

    fn adapter_limits(&self, adapter: AdapterId) -> Option<Limits> {
        self.adapter(adapter).map(|scripted| scripted.limits)
    }

    fn adapter_release(&self, adapter: AdapterId) {
        if self.state().adapters.remove(&adapter).is_none() {
            log::warn!("releasing unknown {:?}", adapter);
        }
    }

    fn adapter_releaser(&self) -> AdapterReleaser {
        let state = Arc::clone(&self.state);

        Box::new(move |adapter| {
            if lock(&state).adapters.remove(&adapter).is_none() {
                log::warn!("releasing unknown {:?}", adapter);
            }
        })
    }

    fn create_instance(&self, _descriptor: &InstanceDescriptor) -> Option<InstanceId> {
        if self.fail_instance_creation {
            return None;
        }

        let mut state = self.state();
        let instance = InstanceId::from_raw(state.handles.next_raw());
        state.instances.insert(instance);

        Some(instance)
    }

    fn instance_enumerate_adapters(
        &self,
        instance: InstanceId,
        out: Option<&mut [AdapterId]>,
    ) -> usize {
        let mut state = self.state();
        if !state.instances.contains(&instance) {
            return 0;
        }

        match out {
            None => self.adapters.len(),
            Some(out) => {
                let written = self.adapters.len().min(out.len());
                for (index, slot) in out.iter_mut().take(written).enumerate() {
                    let adapter = AdapterId::from_raw(state.handles.next_raw());
                    state.adapters.insert(adapter, index);
                    *slot = adapter;
                }
                written
            }
        }
    }

    fn instance_release(&self, instance: InstanceId) {
        let mut state = self.state();
        if !state.instances.remove(&instance) {
            log::warn!("releasing unknown {:?}", instance);
        }
        state.surfaces.retain(|_, owner| *owner != instance);
    }

    fn instance_request_adapter(
        &self,
        instance: InstanceId,
        options: &RequestAdapterOptions,
        callback: RequestAdapterCallback,
    ) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut outcome = self.select(&mut self.state(), instance, options);

        if self.handle_on_failure && outcome.1.is_none() {
            let mut state = self.state();
            let adapter = AdapterId::from_raw(state.handles.next_raw());
            state.adapters.insert(adapter, usize::MAX);
            outcome.1 = Some(adapter);
        }

        match self.resolution {
            Resolution::Immediate => self.fire(callback, outcome),
            Resolution::Threaded => {
                let callbacks = Arc::clone(&self.callbacks);
                thread::spawn(move || {
                    callbacks.fetch_add(1, Ordering::SeqCst);
                    let (status, adapter, message) = outcome;
                    callback(status, adapter, message);
                });
            }
            Resolution::Deferred => self.state().pending.push((callback, outcome)),
            Resolution::Dropped => drop(callback),
        }
    }

    fn surface_formats(
        &self,
        surface: SurfaceId,
        adapter: AdapterId,
        out: Option<&mut [TextureFormat]>,
    ) -> usize {
        if !self.state().surfaces.contains_key(&surface) {
            return 0;
        }

        match self.adapter(adapter) {
            Some(scripted) => fill(&scripted.surface_formats, out),
            None => 0,
        }
    }

    fn surface_release(&self, surface: SurfaceId) {
        if self.state().surfaces.remove(&surface).is_none() {
            log::warn!("releasing unknown {:?}", surface);
        }
    }
}
