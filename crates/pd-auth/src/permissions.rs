//! Role-gated section access
//!
//! The portal's navigation guards expressed as data: which sections each
//! role may enter. Payouts, user management and the audit trail are
//! reserved for administrators; everything else is open to both roles.

use std::fmt;

use pd_models::user::UserRole;

/// Portal sections behind the authenticated shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Payments,
    Payouts,
    Transactions,
    Contracts,
    Quotes,
    Invoices,
    Receipts,
    Users,
    Audit,
    Profile,
}

impl Section {
    pub const ALL: [Section; 11] = [
        Section::Dashboard,
        Section::Payments,
        Section::Payouts,
        Section::Transactions,
        Section::Contracts,
        Section::Quotes,
        Section::Invoices,
        Section::Receipts,
        Section::Users,
        Section::Audit,
        Section::Profile,
    ];

    /// Whether a role may enter this section
    pub fn accessible_to(self, role: UserRole) -> bool {
        match self {
            Section::Payouts | Section::Users | Section::Audit => role.is_admin(),
            _ => true,
        }
    }

    /// All sections a role may enter, in navigation order
    pub fn accessible(role: UserRole) -> Vec<Section> {
        Self::ALL
            .iter()
            .copied()
            .filter(|section| section.accessible_to(role))
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Payments => "payments",
            Section::Payouts => "payouts",
            Section::Transactions => "transactions",
            Section::Contracts => "contracts",
            Section::Quotes => "quotes",
            Section::Invoices => "invoices",
            Section::Receipts => "receipts",
            Section::Users => "users",
            Section::Audit => "audit",
            Section::Profile => "profile",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(Section::accessible(UserRole::Admin).len(), Section::ALL.len());
    }

    #[test]
    fn test_staff_is_gated_from_admin_sections() {
        let sections = Section::accessible(UserRole::Staff);
        assert!(!sections.contains(&Section::Payouts));
        assert!(!sections.contains(&Section::Users));
        assert!(!sections.contains(&Section::Audit));
        assert!(sections.contains(&Section::Payments));
        assert!(sections.contains(&Section::Contracts));
    }

    #[test]
    fn test_individual_checks() {
        assert!(Section::Payouts.accessible_to(UserRole::Admin));
        assert!(!Section::Payouts.accessible_to(UserRole::Staff));
        assert!(Section::Dashboard.accessible_to(UserRole::Staff));
    }
}
