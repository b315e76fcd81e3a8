use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::repository_dispatch::{DispatchRequest, DispatchResponse};

/// Outbound seam to the automation platform's dispatch endpoint.
///
/// `Err` is reserved for transport failures where no HTTP response was
/// obtained; any response, successful or not, comes back as `Ok`.
#[automock]
#[async_trait]
pub trait RepositoryDispatchClient {
    async fn send_dispatch(&self, request: DispatchRequest) -> Result<DispatchResponse>;
}
