use crate::deploy::keys::CommitKey;
use crate::types::Commit;

use super::Store;

/// Snapshot held by the commit store for one [`CommitKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitState {
    pub commit: Option<Commit>,
}

/// Store of commit records, keyed by owner/repo/sha.
pub type CommitStore = Store<CommitKey, CommitState>;
