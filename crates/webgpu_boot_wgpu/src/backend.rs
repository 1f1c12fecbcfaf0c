use crate::convert;
#[cfg(not(target_arch = "wasm32"))]
use futures::FutureExt;
#[cfg(not(target_arch = "wasm32"))]
use std::thread;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use webgpu_boot_base::{AdapterReleaser, Backend, Error, RequestAdapterCallback};
use webgpu_boot_core::{
    fill, AdapterId, AdapterInfo, FeatureName, HandleAllocator, InstanceDescriptor, InstanceId,
    Limits, RequestAdapterOptions, RequestAdapterStatus, SurfaceId, TextureFormat,
};

const NO_ADAPTER: &str = "No adapters are found that suffice all the 'hard' options.";

#[derive(Default)]
struct Registry {
    handles: HandleAllocator,
    instances: HashMap<InstanceId, Arc<wgpu::Instance>>,
    adapters: HashMap<AdapterId, wgpu::Adapter>,
    surfaces: HashMap<SurfaceId, (InstanceId, Arc<wgpu::Surface<'static>>)>,
}

impl Registry {
    fn insert_adapter(&mut self, adapter: wgpu::Adapter) -> AdapterId {
        let id = AdapterId::from_raw(self.handles.next_raw());
        self.adapters.insert(id, adapter);
        id
    }
}

/// A [`Backend`] that hands out handles to `wgpu` objects.
///
/// Cloning is cheap and every clone sees the same objects.
#[derive(Clone, Default)]
pub struct WgpuBackend {
    registry: Arc<Mutex<Registry>>,
}

impl WgpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface for `target`, usually a window, bound to `instance`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use webgpu_boot_base::create_instance;
    /// use webgpu_boot_core::InstanceDescriptor;
    /// use webgpu_boot_wgpu::WgpuBackend;
    /// use winit::{event_loop::ActiveEventLoop, window::Window};
    ///
    /// fn resumed(event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
    ///     let window = Arc::new(event_loop.create_window(Window::default_attributes())?);
    ///
    ///     let backend = WgpuBackend::new();
    ///     let instance = create_instance(&backend, &InstanceDescriptor::from_env())?;
    ///     let surface = backend.create_surface(instance, window.clone())?;
    ///
    ///     // Request an adapter compatible with `surface`.
    ///     Ok(())
    /// }
    /// ```
    pub fn create_surface(
        &self,
        instance: InstanceId,
        target: impl Into<wgpu::SurfaceTarget<'static>>,
    ) -> Result<SurfaceId, Error> {
        let wgpu_instance = self
            .registry()
            .instances
            .get(&instance)
            .cloned()
            .ok_or_else(|| Error::InvalidHandle(format!("{:?}", instance)))?;

        let surface = wgpu_instance
            .create_surface(target)
            .map_err(|err| Error::SurfaceCreation(err.to_string()))?;

        let mut registry = self.registry();
        let id = SurfaceId::from_raw(registry.handles.next_raw());
        registry.surfaces.insert(id, (instance, Arc::new(surface)));

        Ok(id)
    }

    /// Runs `f` with the `wgpu` adapter behind `adapter`.
    pub fn with_adapter<R>(
        &self,
        adapter: AdapterId,
        f: impl FnOnce(&wgpu::Adapter) -> R,
    ) -> Option<R> {
        self.registry().adapters.get(&adapter).map(f)
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Finds the objects an adapter request on `instance` needs.
    fn lookup_request(
        &self,
        instance: InstanceId,
        options: &RequestAdapterOptions,
    ) -> Result<(Arc<wgpu::Instance>, Option<Arc<wgpu::Surface<'static>>>), String> {
        let registry = self.registry();

        let wgpu_instance = registry
            .instances
            .get(&instance)
            .cloned()
            .ok_or_else(|| format!("{:?} is not a valid instance", instance))?;

        let surface = match options.compatible_surface {
            None => None,
            Some(surface) => {
                let wgpu_surface = registry
                    .surfaces
                    .get(&surface)
                    .filter(|(owner, _)| *owner == instance)
                    .map(|(_, wgpu_surface)| Arc::clone(wgpu_surface))
                    .ok_or_else(|| format!("{:?} does not belong to {:?}", surface, instance))?;

                Some(wgpu_surface)
            }
        };

        Ok((wgpu_instance, surface))
    }

    fn complete(&self, adapter: Option<wgpu::Adapter>, callback: RequestAdapterCallback) {
        match adapter {
            Some(adapter) => {
                let id = self.registry().insert_adapter(adapter);
                callback(RequestAdapterStatus::Success, Some(id), None);
            }
            None => callback(
                RequestAdapterStatus::Unavailable,
                None,
                Some(NO_ADAPTER.to_owned()),
            ),
        }
    }
}

impl Backend for WgpuBackend {
    fn adapter_enumerate_features(
        &self,
        adapter: AdapterId,
        out: Option<&mut [FeatureName]>,
    ) -> usize {
        match self.with_adapter(adapter, |adapter| convert::features(adapter.features())) {
            Some(features) => fill(&features, out),
            None => 0,
        }
    }

    fn adapter_has_feature(&self, adapter: AdapterId, feature: FeatureName) -> bool {
        self.with_adapter(adapter, |adapter| {
            convert::features(adapter.features()).contains(&feature)
        })
        .unwrap_or(false)
    }

    fn adapter_info(&self, adapter: AdapterId) -> Option<AdapterInfo> {
        self.with_adapter(adapter, |adapter| convert::adapter_info(adapter.get_info()))
    }

    fn adapter_limits(&self, adapter: AdapterId) -> Option<Limits> {
        self.with_adapter(adapter, |adapter| convert::limits(&adapter.limits()))
    }

    fn adapter_release(&self, adapter: AdapterId) {
        if self.registry().adapters.remove(&adapter).is_none() {
            log::warn!("releasing unknown {:?}", adapter);
        }
    }

    fn adapter_releaser(&self) -> AdapterReleaser {
        let backend = self.clone();

        Box::new(move |adapter| backend.adapter_release(adapter))
    }

    fn create_instance(&self, descriptor: &InstanceDescriptor) -> Option<InstanceId> {
        let backends = convert::backends(&descriptor.backends);

        if backends.is_empty() {
            log::error!("{:?} selects no usable backend", descriptor.backends);
            return None;
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let mut registry = self.registry();
        let id = InstanceId::from_raw(registry.handles.next_raw());
        registry.instances.insert(id, Arc::new(instance));

        log::debug!(
            "created {:?} ({}) on {:?}",
            id,
            descriptor.label.as_deref().unwrap_or("unlabeled"),
            backends
        );

        Some(id)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn instance_enumerate_adapters(
        &self,
        instance: InstanceId,
        out: Option<&mut [AdapterId]>,
    ) -> usize {
        let Some(wgpu_instance) = self.registry().instances.get(&instance).cloned() else {
            log::warn!("enumerating adapters of unknown {:?}", instance);
            return 0;
        };

        let adapters = wgpu_instance.enumerate_adapters(wgpu::Backends::all());

        match out {
            None => adapters.len(),
            Some(out) => {
                let mut registry = self.registry();
                let written = adapters.len().min(out.len());

                for (slot, adapter) in out.iter_mut().zip(adapters) {
                    *slot = registry.insert_adapter(adapter);
                }

                written
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn instance_enumerate_adapters(
        &self,
        instance: InstanceId,
        _out: Option<&mut [AdapterId]>,
    ) -> usize {
        log::warn!("{:?}: the browser does not list adapters", instance);
        0
    }

    fn instance_release(&self, instance: InstanceId) {
        let mut registry = self.registry();
        if registry.instances.remove(&instance).is_none() {
            log::warn!("releasing unknown {:?}", instance);
        }
        registry.surfaces.retain(|_, (owner, _)| *owner != instance);
    }

    fn instance_request_adapter(
        &self,
        instance: InstanceId,
        options: &RequestAdapterOptions,
        callback: RequestAdapterCallback,
    ) {
        let (wgpu_instance, surface) = match self.lookup_request(instance, options) {
            Ok(found) => found,
            Err(message) => {
                callback(RequestAdapterStatus::Error, None, Some(message));
                return;
            }
        };

        let power_preference = convert::power_preference(options.power_preference);
        let force_fallback_adapter = options.force_fallback_adapter;

        // Callers may already run inside an executor, so this never blocks.
        #[cfg(not(target_arch = "wasm32"))]
        {
            let wgpu_options = wgpu::RequestAdapterOptions {
                power_preference,
                force_fallback_adapter,
                compatible_surface: surface.as_deref(),
            };

            let resolved = wgpu_instance.request_adapter(&wgpu_options).now_or_never();

            match resolved {
                Some(adapter) => self.complete(adapter, callback),
                None => {
                    log::debug!("adapter request on {:?} is pending", instance);

                    let backend = self.clone();

                    thread::spawn(move || {
                        let adapter = futures::executor::block_on(wgpu_instance.request_adapter(
                            &wgpu::RequestAdapterOptions {
                                power_preference,
                                force_fallback_adapter,
                                compatible_surface: surface.as_deref(),
                            },
                        ));

                        backend.complete(adapter, callback);
                    });
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let backend = self.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let adapter = wgpu_instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference,
                        force_fallback_adapter,
                        compatible_surface: surface.as_deref(),
                    })
                    .await;

                backend.complete(adapter, callback);
            });
        }
    }

    fn surface_formats(
        &self,
        surface: SurfaceId,
        adapter: AdapterId,
        out: Option<&mut [TextureFormat]>,
    ) -> usize {
        let formats = {
            let registry = self.registry();

            match (registry.surfaces.get(&surface), registry.adapters.get(&adapter)) {
                (Some((_, wgpu_surface)), Some(wgpu_adapter)) => wgpu_surface
                    .get_capabilities(wgpu_adapter)
                    .formats
                    .into_iter()
                    .map(convert::texture_format)
                    .collect::<Vec<_>>(),
                _ => return 0,
            }
        };

        fill(&formats, out)
    }

    fn surface_release(&self, surface: SurfaceId) {
        if self.registry().surfaces.remove(&surface).is_none() {
            log::warn!("releasing unknown {:?}", surface);
        }
    }
}
