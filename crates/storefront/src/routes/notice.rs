//! User-facing notices carried across redirects as `?error=` / `?success=` codes.

use serde::Deserialize;

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl MessageQuery {
    /// The notice to render, if any. Errors win over successes.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        if let Some(code) = self.error.as_deref() {
            return Some(Notice::error(code));
        }
        self.success.as_deref().map(Notice::success)
    }
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// A rendered notice banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    /// CSS modifier class.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Error => "notice notice-error",
            NoticeKind::Success => "notice notice-success",
        }
    }

    /// Shown when a page renders without data it failed to load.
    #[must_use]
    pub const fn load_failed() -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Something went wrong",
            message: "Failed to load. Please try again later.",
        }
    }

    fn error(code: &str) -> Self {
        let (title, message) = match code {
            "user_not_found" => (
                "Authentication Error",
                "User not found. Please check your email or sign up.",
            ),
            "credentials" => ("Authentication Error", "Invalid email or password."),
            "admin_credentials" => ("Authentication Error", "Invalid admin credentials."),
            "pending_approval" => (
                "Account Pending Approval",
                "Your reseller account is pending approval. Please check back later.",
            ),
            "email_taken" => (
                "Registration Error",
                "This email is already registered. Please log in instead.",
            ),
            "invalid_email" => ("Invalid email", "Please enter a valid email address."),
            "password_too_short" => (
                "Registration Error",
                "Password must be at least 8 characters.",
            ),
            "password_mismatch" => ("Registration Error", "Passwords don't match."),
            "role" => ("Registration Error", "Please choose a customer or reseller account."),
            "not_reseller" => ("Update Failed", "Only reseller accounts can be changed."),
            "product_not_found" => ("Update Failed", "That product no longer exists."),
            "category_not_found" => ("Update Failed", "That category does not exist."),
            "invalid_price" => ("Invalid input", "Price must be a number of zero or more."),
            "invalid" => ("Invalid input", "Please check the form and try again."),
            _ => ("Something went wrong", "Failed to save. Please try again later."),
        };
        Self {
            kind: NoticeKind::Error,
            title,
            message,
        }
    }

    fn success(code: &str) -> Self {
        let (title, message) = match code {
            "registered" => (
                "Registration Successful",
                "Your account has been created and you are now logged in.",
            ),
            "pending_approval" => (
                "Registration Successful",
                "Your reseller account has been created and is pending approval.",
            ),
            "signed_in" => ("Login Successful", "Welcome back!"),
            "signed_out" => ("Logout Successful", "You have been logged out successfully."),
            "welcome" => ("Login Successful", "Welcome to Admin Dashboard."),
            "approved" => ("Reseller Approved", "The reseller has been approved."),
            "revoked" => ("Reseller Disapproved", "The reseller has been disapproved."),
            "stage_updated" => ("Reseller Stage Updated", "The reseller's level has been updated."),
            "product_created" => ("Product Created", "The product is now listed."),
            "product_updated" => ("Product Updated", "Your changes have been saved."),
            "product_deleted" => ("Product Deleted", "The product has been removed."),
            "category_created" => ("Category Created", "The category has been added."),
            "category_updated" => ("Category Updated", "Your changes have been saved."),
            "category_deleted" => (
                "Category Deleted",
                "Products in this category are now shown as Uncategorized.",
            ),
            "subscribed" => (
                "Thank you for subscribing!",
                "You'll receive our newsletter at the address you entered.",
            ),
            _ => ("Done", "Your request was completed."),
        };
        Self {
            kind: NoticeKind::Success,
            title,
            message,
        }
    }
}

/// Append a notice code to a path.
#[must_use]
pub fn with_error(path: &str, code: &str) -> String {
    with_param(path, "error", code)
}

/// Append a success code to a path.
#[must_use]
pub fn with_success(path: &str, code: &str) -> String {
    with_param(path, "success", code)
}

fn with_param(path: &str, key: &str, code: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{key}={code}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_wins() {
        let query = MessageQuery {
            error: Some("email_taken".to_owned()),
            success: Some("registered".to_owned()),
        };
        let notice = query.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("already registered"));
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        let query = MessageQuery {
            error: Some("<script>".to_owned()),
            success: None,
        };
        assert_eq!(query.notice().unwrap().title, "Something went wrong");
        assert!(MessageQuery::default().notice().is_none());
    }

    #[test]
    fn test_with_param() {
        assert_eq!(with_error("/auth", "credentials"), "/auth?error=credentials");
        assert_eq!(
            with_success("/admin/users?role=reseller", "approved"),
            "/admin/users?role=reseller&success=approved"
        );
    }
}
