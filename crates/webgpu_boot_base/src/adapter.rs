use crate::{Backend, Error, Result};
use futures::channel::oneshot;
use std::future::Future;
use webgpu_boot_core::{AdapterId, InstanceId, RequestAdapterOptions, RequestAdapterStatus};

/// Requests an adapter and resolves once the backend answers.
///
/// The request is issued before this returns; the future only waits for the
/// callback. Works with backends that answer later, such as the browser.
pub fn request_adapter<B>(
    backend: &B,
    instance: InstanceId,
    options: &RequestAdapterOptions,
) -> impl Future<Output = Result<AdapterId>> + 'static
where
    B: Backend + ?Sized,
{
    wait_for(issue_request(backend, instance, options))
}

async fn wait_for(receiver: oneshot::Receiver<Result<AdapterId>>) -> Result<AdapterId> {
    receiver.await.unwrap_or(Err(Error::CallbackDropped))
}

/// Requests an adapter, blocking the current thread until the backend answers.
///
/// # Errors
///
/// - The backend reported a failure. The message is never empty.
/// - The backend dropped the callback without calling it.
pub fn request_adapter_sync<B>(
    backend: &B,
    instance: InstanceId,
    options: &RequestAdapterOptions,
) -> Result<AdapterId>
where
    B: Backend + ?Sized,
{
    futures::executor::block_on(request_adapter(backend, instance, options))
}

/// Requests an adapter from a backend that answers before returning.
///
/// Native implementations call the callback on the calling thread before
/// [`Backend::instance_request_adapter`] returns. This function relies on
/// that and never waits.
///
/// # Errors
///
/// - [`Error::Unresolved`] if the callback had not run when the request call
///   returned.
/// - Otherwise as [`request_adapter_sync`].
pub fn request_adapter_immediate<B>(
    backend: &B,
    instance: InstanceId,
    options: &RequestAdapterOptions,
) -> Result<AdapterId>
where
    B: Backend + ?Sized,
{
    let mut receiver = issue_request(backend, instance, options);

    match receiver.try_recv() {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            log::error!("adapter request on {:?} is still pending", instance);
            Err(Error::Unresolved)
        }
        Err(oneshot::Canceled) => Err(Error::CallbackDropped),
    }
}

fn issue_request<B>(
    backend: &B,
    instance: InstanceId,
    options: &RequestAdapterOptions,
) -> oneshot::Receiver<Result<AdapterId>>
where
    B: Backend + ?Sized,
{
    let (sender, receiver) = oneshot::channel();

    let release = backend.adapter_releaser();

    log::debug!("requesting adapter on {:?} with {:?}", instance, options);

    backend.instance_request_adapter(
        instance,
        options,
        Box::new(move |status, adapter, message| {
            let (outcome, stray) = resolve(status, adapter, message);

            let stray = match sender.send(outcome) {
                Err(Ok(adapter)) => {
                    log::warn!("{:?} arrived after its request was abandoned", adapter);
                    Some(adapter)
                }
                _ => stray,
            };

            if let Some(adapter) = stray {
                release(adapter);
            }
        }),
    );

    receiver
}

/// Turns a callback invocation into exactly one adapter or one error message.
///
/// An adapter delivered together with a failure is returned separately so it
/// can be released.
fn resolve(
    status: RequestAdapterStatus,
    adapter: Option<AdapterId>,
    message: Option<String>,
) -> (Result<AdapterId>, Option<AdapterId>) {
    let adapter = adapter.filter(|adapter| !adapter.is_null());

    match (status, adapter) {
        (RequestAdapterStatus::Success, Some(adapter)) => {
            log::info!("got adapter {:?}", adapter);
            (Ok(adapter), None)
        }
        (RequestAdapterStatus::Success, None) => (
            Err(Error::RequestAdapter {
                status: RequestAdapterStatus::Error,
                message: "backend reported success without an adapter".to_owned(),
            }),
            None,
        ),
        (status, stray) => {
            if let Some(adapter) = stray {
                log::warn!("releasing {:?} delivered with status {}", adapter, status);
            }

            let message = message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| status.default_message().to_owned());

            (Err(Error::RequestAdapter { status, message }), stray)
        }
    }
}
