use crate::WgpuBackend;
use anyhow::{bail, Result};
use webgpu_boot_base::{
    create_instance, inspect_adapter, request_adapter, surface_preferred_format, AdapterReport,
    Backend,
};
use webgpu_boot_core::{
    AdapterId, InstanceDescriptor, InstanceId, RequestAdapterOptions, SurfaceId, TextureFormat,
};

/// An instance, an optional surface and an adapter able to present to it.
///
/// Every handle is released when the bootstrap is dropped.
pub struct Bootstrap {
    adapter: AdapterId,
    backend: WgpuBackend,
    instance: InstanceId,
    surface: Option<SurfaceId>,
}

impl Bootstrap {
    #[cfg(target_arch = "wasm32")]
    pub async fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Self> {
        Self::with_target(
            Some(wgpu::SurfaceTarget::Canvas(canvas)),
            RequestAdapterOptions::default(),
        )
        .await
    }

    /// Bootstraps everything needed to render into `target`.
    ///
    /// Backends and adapter options are read from the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use webgpu_boot_wgpu::Bootstrap;
    /// use winit::{event_loop::ActiveEventLoop, window::Window};
    ///
    /// fn resumed(event_loop: &ActiveEventLoop) {
    ///     let window = Arc::new(event_loop.create_window(Window::default_attributes()).unwrap());
    ///
    ///     let bootstrap = futures::executor::block_on(Bootstrap::new(window.clone())).unwrap();
    ///
    ///     println!("{}", bootstrap.report().unwrap());
    /// }
    /// ```
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn new(target: impl Into<wgpu::SurfaceTarget<'static>>) -> Result<Self> {
        Self::with_target(Some(target.into()), RequestAdapterOptions::from_env()).await
    }

    /// Bootstraps an instance and adapter without any surface.
    pub async fn headless() -> Result<Self> {
        Self::with_target(None, RequestAdapterOptions::from_env()).await
    }

    /// Bootstraps with explicit adapter options.
    ///
    /// `options.compatible_surface` is replaced by the surface created for
    /// `target`, if any.
    pub async fn with_target(
        target: Option<wgpu::SurfaceTarget<'static>>,
        options: RequestAdapterOptions,
    ) -> Result<Self> {
        let backend = WgpuBackend::new();

        let instance = create_instance(&backend, &InstanceDescriptor::from_env())?;

        let mut bootstrap = Self {
            adapter: AdapterId::NULL,
            backend,
            instance,
            surface: None,
        };

        if let Some(target) = target {
            bootstrap.surface = Some(bootstrap.backend.create_surface(instance, target)?);
        }

        let options = RequestAdapterOptions {
            compatible_surface: bootstrap.surface,
            ..options
        };

        bootstrap.adapter = request_adapter(&bootstrap.backend, instance, &options).await?;

        Ok(bootstrap)
    }

    pub fn adapter(&self) -> AdapterId {
        self.adapter
    }

    /// Returns the [`WgpuBackend`] owning the handles.
    pub fn backend_ref(&self) -> &WgpuBackend {
        &self.backend
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Properties, limits and features of the adapter.
    pub fn report(&self) -> Result<AdapterReport> {
        Ok(inspect_adapter(&self.backend, self.adapter)?)
    }

    /// The format the surface prefers with this adapter.
    ///
    /// # Errors
    ///
    /// - Will return an error if bootstrapped headless.
    /// - Will return an error if the adapter reports no format for the surface.
    pub fn surface_format(&self) -> Result<TextureFormat> {
        let Some(surface) = self.surface else {
            bail!("No surface to present to.")
        };

        match surface_preferred_format(&self.backend, surface, self.adapter) {
            Some(format) => Ok(format),
            None => bail!("The adapter reports no format for {:?}.", surface),
        }
    }
}

impl Drop for Bootstrap {
    fn drop(&mut self) {
        if !self.adapter.is_null() {
            self.backend.adapter_release(self.adapter);
        }

        if let Some(surface) = self.surface.take() {
            self.backend.surface_release(surface);
        }

        self.backend.instance_release(self.instance);
    }
}
