//! Oracle access errors.

use crate::error::{EconomyError, ErrorSeverity};
use crate::state::Rarity;

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal: the economy cannot price or reward anything
/// without its catalogs. Empty tables are content bugs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("CreatureOracle not available")]
    CreaturesNotAvailable,

    #[error("QuestOracle not available")]
    QuestsNotAvailable,

    #[error("TablesOracle not available")]
    TablesNotAvailable,

    #[error("no creatures defined for rarity {0}")]
    EmptyRarity(Rarity),

    #[error("table '{0}' is empty")]
    EmptyTable(&'static str),
}

impl EconomyError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            CreaturesNotAvailable | QuestsNotAvailable | TablesNotAvailable => ErrorSeverity::Fatal,
            EmptyRarity(_) | EmptyTable(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CreaturesNotAvailable => "ORACLE_CREATURES_NOT_AVAILABLE",
            QuestsNotAvailable => "ORACLE_QUESTS_NOT_AVAILABLE",
            TablesNotAvailable => "ORACLE_TABLES_NOT_AVAILABLE",
            EmptyRarity(_) => "ORACLE_EMPTY_RARITY",
            EmptyTable(_) => "ORACLE_EMPTY_TABLE",
        }
    }
}
