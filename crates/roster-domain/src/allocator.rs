//! Unique identifier assignment for new companies.
//!
//! The allocator never talks to storage directly: it asks a [`PresenceOracle`]
//! whether a candidate is taken. A unique constraint in the store remains the
//! real guarantee; the checks here only keep the insert from failing in the
//! common case.

#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::id::CompanyId;

/// Number of generated candidates tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Answers "does a record with this key already exist?".
pub trait PresenceOracle {
    type Error;

    async fn exists(&self, id: &str) -> Result<bool, Self::Error>;
}

/// Errors returned by [`allocate_company_id`].
#[derive(Debug, thiserror::Error)]
pub enum AllocationError<E> {
    #[error("no unused identifier found after {attempts} attempts")]
    Exhausted { attempts: usize },
    #[error("presence check failed")]
    Oracle(#[source] E),
}

/// Assign an identifier for a company about to be created.
///
/// A non-empty `candidate` that the oracle reports as unused is returned
/// unchanged. Otherwise random v4 UUIDs are generated until one is unused, up
/// to [`MAX_ALLOCATION_ATTEMPTS`].
pub async fn allocate_company_id<O>(
    candidate: &str,
    oracle: &O,
) -> Result<CompanyId, AllocationError<O::Error>>
where
    O: PresenceOracle,
{
    allocate_company_id_with(candidate, oracle, || Uuid::new_v4().to_string()).await
}

/// Same as [`allocate_company_id`] with an injected candidate generator.
pub async fn allocate_company_id_with<O, G>(
    candidate: &str,
    oracle: &O,
    mut generate: G,
) -> Result<CompanyId, AllocationError<O::Error>>
where
    O: PresenceOracle,
    G: FnMut() -> String,
{
    if !candidate.is_empty() && !oracle.exists(candidate).await.map_err(AllocationError::Oracle)? {
        return Ok(CompanyId::new(candidate));
    }

    for _ in 0..MAX_ALLOCATION_ATTEMPTS {
        let id = generate();
        if id.is_empty() {
            continue;
        }
        if !oracle.exists(&id).await.map_err(AllocationError::Oracle)? {
            return Ok(CompanyId::new(id));
        }
    }

    Err(AllocationError::Exhausted {
        attempts: MAX_ALLOCATION_ATTEMPTS,
    })
}
