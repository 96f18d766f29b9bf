//! Guild-join outcome models.
//!
//! Transient values produced while adding users to the target guild: the
//! per-call result of the membership API, the per-user failure detail, and the
//! aggregate summary returned by a bulk join run. None of these are persisted.

/// Result of a single guild-members PUT call.
///
/// Discord reports 201 when the user was added and 204 when they were already
/// a member; both reach the desired end state and count as success. Any other
/// status is a failure carrying the response verbatim for diagnostics; the
/// client does not classify the reason further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipResult {
    /// The user was added to the guild.
    Added,
    /// The user was already a member of the guild.
    AlreadyMember,
    /// Discord rejected the join call.
    Failed {
        /// HTTP status returned by the membership endpoint.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },
}

impl MembershipResult {
    /// Whether the desired end state (user is a guild member) was reached.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Added | Self::AlreadyMember)
    }
}

/// Failure detail for one user within a bulk join run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinFailure {
    /// Discord id of the user whose join failed.
    pub user_id: String,
    /// HTTP status from the membership endpoint, absent for transport errors.
    pub status: Option<u16>,
    /// Response body or transport error text, verbatim.
    pub detail: String,
}

/// Aggregate outcome of one bulk join run.
///
/// Every stored user is attempted exactly once; a failure for one user never
/// stops the rest of the batch. Returned to the caller and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of users attempted.
    pub attempted: usize,
    /// Number of users now members of the target guild.
    pub succeeded: usize,
    /// Number of users whose join call failed.
    pub failed: usize,
    /// Failure details for the failed subset.
    pub failures: Vec<JoinFailure>,
}
