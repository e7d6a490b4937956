use crate::model::TreeKind;

/// Why a command was refused. A rejected command never touches state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("unknown upgrade: {0}")]
    UnknownUpgrade(String),

    #[error("upgrade {0} is not unlocked yet")]
    UpgradeLocked(String),

    #[error("amount must be positive and finite")]
    InvalidAmount,

    #[error("upgrade {0} is already at its maximum level")]
    MaxLevelReached(String),

    #[error("insufficient energy: need {required}, have {available}")]
    InsufficientEnergy { required: f64, available: f64 },

    #[error("upgrade {0} has no tier threshold to clear")]
    NoTierAvailable(String),

    #[error("core is not fully charged")]
    CoreNotReady,

    #[error("ascension needs {required} upgrades owned, have {owned}")]
    AscensionUnavailable { owned: u64, required: u64 },

    #[error("unknown {tree:?} node: {id}")]
    UnknownNode { tree: TreeKind, id: String },

    #[error("node {0} is already purchased")]
    AlreadyPurchased(String),

    #[error("node {node} requires {missing}")]
    PrerequisiteNotMet { node: String, missing: String },

    #[error("insufficient currency: need {required}, have {available}")]
    InsufficientCurrency { required: u64, available: u64 },

    #[error("bank is locked")]
    BankLocked,

    #[error("bank is already unlocked")]
    BankAlreadyUnlocked,

    #[error("insufficient savings: requested {requested}, have {available}")]
    InsufficientSavings { requested: f64, available: f64 },

    #[error("loan would exceed the limit of {limit}")]
    LoanLimitExceeded { limit: f64 },

    #[error("no outstanding loan")]
    NoOutstandingLoan,
}
