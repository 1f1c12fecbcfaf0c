use webgpu_boot_core::{
    enumerate, AdapterId, AdapterInfo, FeatureName, InstanceDescriptor, InstanceId, Limits,
    RequestAdapterOptions, RequestAdapterStatus, SurfaceId, TextureFormat,
};

/// Receives the outcome of [`Backend::instance_request_adapter`].
///
/// On success the adapter is set and the message is usually empty. On failure
/// the adapter is absent and the message explains why.
pub type RequestAdapterCallback =
    Box<dyn FnOnce(RequestAdapterStatus, Option<AdapterId>, Option<String>) + Send>;

/// Releases one adapter from whichever thread a request callback runs on.
pub type AdapterReleaser = Box<dyn FnOnce(AdapterId) + Send>;

/// The entry points of a WebGPU implementation.
///
/// Objects are addressed by handles. Handles are released explicitly, and an
/// unknown handle behaves as an object with nothing to report.
///
/// Methods taking `out: Option<&mut [T]>` follow the count-then-fill
/// contract: with `None` they return the element count, with a buffer they
/// write at most `buffer.len()` elements and return how many they wrote. See
/// [`webgpu_boot_core::enumerate`].
pub trait Backend {
    fn adapter_enumerate_features(&self, adapter: AdapterId, out: Option<&mut [FeatureName]>)
        -> usize;

    fn adapter_has_feature(&self, adapter: AdapterId, feature: FeatureName) -> bool {
        enumerate(|out| self.adapter_enumerate_features(adapter, out)).contains(&feature)
    }

    fn adapter_info(&self, adapter: AdapterId) -> Option<AdapterInfo>;

    fn adapter_limits(&self, adapter: AdapterId) -> Option<Limits>;

    fn adapter_release(&self, adapter: AdapterId);

    /// Returns a function releasing adapters that reach a request callback
    /// after nobody waits for them anymore.
    fn adapter_releaser(&self) -> AdapterReleaser;

    /// Returns `None` when the instance could not be created.
    fn create_instance(&self, descriptor: &InstanceDescriptor) -> Option<InstanceId>;

    fn instance_enumerate_adapters(&self, instance: InstanceId, out: Option<&mut [AdapterId]>)
        -> usize;

    fn instance_release(&self, instance: InstanceId);

    /// Starts an adapter request.
    ///
    /// `callback` runs exactly once, either before this returns or later,
    /// depending on the implementation.
    fn instance_request_adapter(
        &self,
        instance: InstanceId,
        options: &RequestAdapterOptions,
        callback: RequestAdapterCallback,
    );

    /// Formats `surface` can be configured with when presented by `adapter`,
    /// preferred format first.
    fn surface_formats(
        &self,
        surface: SurfaceId,
        adapter: AdapterId,
        out: Option<&mut [TextureFormat]>,
    ) -> usize;

    fn surface_release(&self, surface: SurfaceId);
}
