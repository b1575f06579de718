//! Utility accounts and the linked-utility expansion.

use std::{
    fmt::{Display, Formatter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Utility account class. C&I and SME invoices carry distinct schemas, hence
/// the split per fuel.
#[derive(
    Debug, Hash, Deserialize, Serialize, clap::ValueEnum, enumset::EnumSetType, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum UtilityCategory {
    /// Commercial & Industrial electricity.
    #[display("electricity-ci")]
    ElectricityCi,

    /// Small/Medium Enterprise electricity.
    #[display("electricity-sme")]
    ElectricitySme,

    /// Commercial & Industrial gas.
    #[display("gas-ci")]
    GasCi,

    /// Small/Medium Enterprise gas.
    #[display("gas-sme")]
    GasSme,

    #[display("oil")]
    Oil,

    #[display("waste")]
    Waste,

    #[display("cleaning")]
    Cleaning,
}

impl UtilityCategory {
    /// The label shown next to the delivery-point identifier (NMI for
    /// electricity, MRIN for gas).
    #[must_use]
    pub const fn identifier_label(self) -> &'static str {
        match self {
            Self::ElectricityCi | Self::ElectricitySme => "NMI",
            Self::GasCi | Self::GasSme => "MRIN",
            Self::Oil | Self::Waste | Self::Cleaning => "Site",
        }
    }
}

/// One utility delivery point. Identity is `(category, identifier)`;
/// immutable once created.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct UtilityAccount {
    pub category: UtilityCategory,
    pub identifier: String,
    pub identifier_label: String,
}

impl UtilityAccount {
    #[must_use]
    pub fn new(category: UtilityCategory, identifier: impl Into<String>) -> Self {
        Self {
            category,
            identifier: identifier.into(),
            identifier_label: category.identifier_label().to_string(),
        }
    }
}

impl Display for UtilityAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.category, self.identifier_label, self.identifier)
    }
}

/// A client's linked utility as stored upstream: one category with any number
/// of delivery-point identifiers.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LinkedUtility {
    pub category: UtilityCategory,
    pub identifiers: Vec<String>,
}

/// The client's linked utilities as read from the accounts file.
#[derive(Debug, Deserialize, Serialize)]
pub struct AccountsFile {
    pub utilities: Vec<LinkedUtility>,
}

impl AccountsFile {
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read the accounts file `{}`", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse the accounts file `{}`", path.display()))
    }
}

/// Expands linked utilities into one account per identifier, preserving
/// order. Blank identifiers are dropped.
#[must_use]
pub fn expand_accounts(linked: &[LinkedUtility]) -> Vec<UtilityAccount> {
    linked
        .iter()
        .flat_map(|utility| {
            utility
                .identifiers
                .iter()
                .filter(|identifier| !identifier.trim().is_empty())
                .map(|identifier| UtilityAccount::new(utility.category, identifier.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_accounts_one_per_identifier() {
        let linked = vec![
            LinkedUtility {
                category: UtilityCategory::ElectricityCi,
                identifiers: vec!["6001".to_string(), "6002".to_string()],
            },
            LinkedUtility {
                category: UtilityCategory::GasSme,
                identifiers: vec!["5300".to_string()],
            },
        ];
        let accounts = expand_accounts(&linked);
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[0].identifier, "6001");
        assert_eq!(accounts[0].identifier_label, "NMI");
        assert_eq!(accounts[2].identifier_label, "MRIN");
    }

    #[test]
    fn test_accounts_file_toml() {
        let file: AccountsFile = toml::from_str(
            r#"
            [[utilities]]
            category = "electricity_ci"
            identifiers = ["6001", "6002"]

            [[utilities]]
            category = "cleaning"
            identifiers = ["C-9"]
            "#,
        )
        .unwrap();
        assert_eq!(expand_accounts(&file.utilities).len(), 3);
    }

    #[test]
    fn test_expand_accounts_drops_blanks() {
        let linked = vec![LinkedUtility {
            category: UtilityCategory::Waste,
            identifiers: vec![String::new(), "W-17".to_string()],
        }];
        assert_eq!(expand_accounts(&linked).len(), 1);
    }
}
