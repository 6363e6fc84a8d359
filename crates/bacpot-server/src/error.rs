use bacpot_datalink::DataLinkError;
use thiserror::Error;

/// Failure that ends [`BacnetServer::run`](crate::BacnetServer::run).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("datalink error: {0}")]
    DataLink(#[from] DataLinkError),
}
