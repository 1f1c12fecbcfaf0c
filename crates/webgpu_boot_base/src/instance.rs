use crate::{Backend, Error, Result};
use webgpu_boot_core::{enumerate, AdapterId, InstanceDescriptor, InstanceId};

/// Creates an instance, turning an empty handle into [`Error::InstanceCreation`].
pub fn create_instance<B>(backend: &B, descriptor: &InstanceDescriptor) -> Result<InstanceId>
where
    B: Backend + ?Sized,
{
    match backend.create_instance(descriptor) {
        Some(instance) if !instance.is_null() => {
            log::debug!("created {:?} from {:?}", instance, descriptor);
            Ok(instance)
        }
        _ => Err(Error::InstanceCreation),
    }
}

/// Lists every adapter the instance can see, in backend order.
pub fn enumerate_adapters<B>(backend: &B, instance: InstanceId) -> Vec<AdapterId>
where
    B: Backend + ?Sized,
{
    enumerate(|out| backend.instance_enumerate_adapters(instance, out))
}
