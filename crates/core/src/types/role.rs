//! Account roles and reseller tiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of a storefront account.
///
/// Customers and resellers register themselves; admins are provisioned
/// out-of-band and are the only role allowed into the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Retail customer, approved on registration.
    Customer,
    /// Wholesale reseller, must be approved by an admin before signing in.
    Reseller,
    /// Store administrator.
    Admin,
}

impl UserRole {
    /// String form used in forms, query strings and storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Reseller => "reseller",
            Self::Admin => "admin",
        }
    }

    /// Whether accounts with this role may be created from the public sign-up form.
    #[must_use]
    pub const fn is_self_service(&self) -> bool {
        matches!(self, Self::Customer | Self::Reseller)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "reseller" => Ok(Self::Reseller),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Reseller discount tier.
///
/// Tiers are assigned manually by an admin in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResellerStage {
    /// Entry tier assigned to every new reseller.
    #[default]
    Brown,
    Silver,
    Gold,
}

impl ResellerStage {
    /// All tiers in display order.
    pub const ALL: [Self; 3] = [Self::Brown, Self::Silver, Self::Gold];

    /// String form used in forms and storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Brown => "brown",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }

    /// Capitalized label for badges.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Brown => "Brown",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }
}

impl fmt::Display for ResellerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResellerStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brown" => Ok(Self::Brown),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            _ => Err(format!("invalid reseller stage: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip_through_str() {
        for role in [UserRole::Customer, UserRole::Reseller, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_only_customer_and_reseller_self_register() {
        assert!(UserRole::Customer.is_self_service());
        assert!(UserRole::Reseller.is_self_service());
        assert!(!UserRole::Admin.is_self_service());
    }

    #[test]
    fn test_stage_serde_uses_lowercase() {
        let json = serde_json::to_string(&ResellerStage::Gold).unwrap();
        assert_eq!(json, "\"gold\"");
        let stage: ResellerStage = serde_json::from_str("\"silver\"").unwrap();
        assert_eq!(stage, ResellerStage::Silver);
    }

    #[test]
    fn test_stage_labels() {
        let labels: Vec<_> = ResellerStage::ALL.iter().map(ResellerStage::label).collect();
        assert_eq!(labels, ["Brown", "Silver", "Gold"]);
        assert_eq!(ResellerStage::default(), ResellerStage::Brown);
    }
}
