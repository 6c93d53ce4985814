//! Ranking service seam.
//!
//! The core only needs "query in, ranked documents out". The HTTP client
//! lives in the engine crate; tests plug in scripted implementations.

use serde::{Deserialize, Serialize};

use crate::errors::ExError;
use crate::model::DocumentResult;

/// Response body of one ranking request
///
/// `top_ranked_docs` is in the service's own order, which is not
/// guaranteed to be sorted by score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    pub top_ranked_docs: Vec<DocumentResult>,
}

/// Something that can rank documents for a query
#[allow(clippy::result_large_err)]
pub trait RankingClient {
    /// Run one ranking request.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Upstream` when the service is unreachable,
    /// answers with a non-success status, or sends an undecodable body.
    fn rank(&self, query: &str) -> Result<RankingResponse, ExError>;
}
