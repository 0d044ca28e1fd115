use super::ContainerRequest;
use crate::service::DefaultServiceResponse;

/// The resource container seam.
///
/// Event adapters translate their event into a [`ContainerRequest`] and hand it
/// to a `RequestHandler`; the returned response is translated back into the
/// event source's response shape. Closures taking a `&dyn ContainerRequest`
/// implement this trait directly.
pub trait RequestHandler {
    fn handle(&self, request: &dyn ContainerRequest) -> anyhow::Result<DefaultServiceResponse>;
}

impl<F> RequestHandler for F
where
    F: Fn(&dyn ContainerRequest) -> anyhow::Result<DefaultServiceResponse>,
{
    fn handle(&self, request: &dyn ContainerRequest) -> anyhow::Result<DefaultServiceResponse> {
        self(request)
    }
}
