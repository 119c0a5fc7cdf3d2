//! Remote accounts and the report rows derived from them.

/// An account as returned by a site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteAccount {
    pub email: Option<String>,
    pub roles: Vec<String>,
}

impl RemoteAccount {
    pub fn new(email: impl Into<String>, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            email: Some(email.into()),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// One line of the consolidated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub site_url: String,
    pub email: String,
    /// Roles joined with `,`.
    pub roles: String,
}

impl ReportRow {
    /// Normalise an account of `site_url`. Accounts without an email yield nothing.
    pub fn from_account(site_url: &str, account: RemoteAccount) -> Option<Self> {
        let email = account.email.filter(|e| !e.is_empty())?;
        Some(Self {
            site_url: site_url.to_owned(),
            email,
            roles: account.roles.join(","),
        })
    }

    pub fn record(&self) -> [&str; 3] {
        [&self.site_url, &self.email, &self.roles]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_account() {
        let row = ReportRow::from_account(
            "http://a.example",
            RemoteAccount::new("a@x.com", ["administrator", "editor"]),
        )
        .unwrap();
        assert_eq!(row.record(), ["http://a.example", "a@x.com", "administrator,editor"]);
    }

    #[test]
    fn test_accounts_without_email_are_dropped() {
        assert!(ReportRow::from_account("s", RemoteAccount::new("", ["editor"])).is_none());
        assert!(ReportRow::from_account("s", RemoteAccount::default()).is_none());
    }

    #[test]
    fn test_no_roles() {
        let row = ReportRow::from_account("s", RemoteAccount::new("b@x.com", Vec::<String>::new()))
            .unwrap();
        assert_eq!(row.roles, "");
    }
}
