use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure returned `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    CommitOnOk,
    /// Discard successful work; lets tests share a long-lived database.
    RollbackOnOk,
}

impl TxnPolicy {
    /// Parses `commit` / `rollback` (any case). Used for `JOLI_TXN_POLICY`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "commit" => Some(Self::CommitOnOk),
            "rollback" => Some(Self::RollbackOnOk),
            _ => None,
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Process-wide policy; `CommitOnOk` until something sets it.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// First call wins; later calls are ignored.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
