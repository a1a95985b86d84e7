//! User domain types.
//!
//! A [`User`] is the validated account record without credentials. The
//! password hash only exists inside the repository layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ila_beauty_core::{Email, ResellerStage, UserId, UserRole};

/// A storefront account.
///
/// Invariants maintained by the constructors and the reseller workflow:
/// - customers and admins are always approved and never carry a stage
/// - resellers always carry a stage and start unapproved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique across the store.
    pub email: Email,
    /// Account role.
    pub role: UserRole,
    /// Whether the account may sign in.
    pub approved: bool,
    /// Discount tier, present only for resellers.
    pub reseller_stage: Option<ResellerStage>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered account for `role`.
    #[must_use]
    pub fn new(email: Email, role: UserRole) -> Self {
        let reseller = role == UserRole::Reseller;
        Self {
            id: UserId::generate(),
            email,
            role,
            approved: !reseller,
            reseller_stage: reseller.then(ResellerStage::default),
            created_at: Utc::now(),
        }
    }

    /// Whether this account is a reseller.
    #[must_use]
    pub fn is_reseller(&self) -> bool {
        self.role == UserRole::Reseller
    }

    /// Whether this account may use the admin console.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether the approval gate lets this account sign in.
    #[must_use]
    pub const fn can_sign_in(&self) -> bool {
        self.approved
    }

    /// Approval state for display.
    #[must_use]
    pub fn approval_state(&self) -> ApprovalState {
        match (self.role, self.approved) {
            (UserRole::Reseller, false) => ApprovalState::Pending,
            (UserRole::Reseller, true) => ApprovalState::Approved,
            _ => ApprovalState::AutoApproved,
        }
    }

    /// Tier badge label, if the account has one.
    #[must_use]
    pub fn stage_label(&self) -> Option<&'static str> {
        self.reseller_stage.as_ref().map(ResellerStage::label)
    }
}

/// Display state derived from role and approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalState {
    /// Customer or admin; approval does not apply.
    AutoApproved,
    /// Reseller waiting for an admin.
    Pending,
    /// Reseller approved by an admin.
    Approved,
}

impl ApprovalState {
    /// Badge label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AutoApproved => "Active",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::parse("jane@example.com").unwrap()
    }

    #[test]
    fn test_new_customer_is_approved_without_stage() {
        let user = User::new(email(), UserRole::Customer);
        assert!(user.approved);
        assert_eq!(user.reseller_stage, None);
        assert_eq!(user.approval_state(), ApprovalState::AutoApproved);
    }

    #[test]
    fn test_new_reseller_is_pending_at_brown() {
        let user = User::new(email(), UserRole::Reseller);
        assert!(!user.approved);
        assert!(!user.can_sign_in());
        assert_eq!(user.reseller_stage, Some(ResellerStage::Brown));
        assert_eq!(user.approval_state(), ApprovalState::Pending);
        assert_eq!(user.stage_label(), Some("Brown"));
    }

    #[test]
    fn test_new_admin_is_approved_without_stage() {
        let user = User::new(email(), UserRole::Admin);
        assert!(user.approved);
        assert!(user.is_admin());
        assert_eq!(user.reseller_stage, None);
    }

    #[test]
    fn test_serialized_field_names() {
        let user = User::new(email(), UserRole::Reseller);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "reseller");
        assert_eq!(json["resellerStage"], "brown");
        assert_eq!(json["approved"], false);
        assert!(json.get("createdAt").is_some());
    }
}
