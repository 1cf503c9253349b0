// Store paths
pub const EXPENSES_PATH: &str = "budget";
pub const ROSTER_PATH: &str = "squad";

// Action log names
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_REMOVED: &str = "EXPENSE_REMOVED";
pub const PARTICIPANT_ADDED: &str = "PARTICIPANT_ADDED";
pub const PARTICIPANT_RENAMED: &str = "PARTICIPANT_RENAMED";
pub const PARTICIPANT_REMOVED: &str = "PARTICIPANT_REMOVED";
pub const DEFAULT_ROSTER_LOADED: &str = "DEFAULT_ROSTER_LOADED";
pub const SETTLEMENT_COMPUTED: &str = "SETTLEMENT_COMPUTED";

// Validation limits
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EXPENSE_AMOUNT: f64 = 1_000_000.0;
