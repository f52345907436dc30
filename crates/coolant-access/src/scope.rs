//! Record-level visibility: which client and reading records a user sees.
//!
//! Client users are tied to their company by GST number; the API stores it
//! in the user's `companyName`. Everyone else sees every client.

use coolant_protocol::{Role, User, UserId};

/// Which client records a user may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientScope {
    All,
    /// Only records whose GST number equals this one. `None` matches nothing.
    Company(Option<String>),
}

impl ClientScope {
    pub fn for_user(user: &User) -> Self {
        match user.role {
            Role::Client => Self::Company(user.company_name.clone()),
            _ => Self::All,
        }
    }

    pub fn includes(&self, gst_number: &str) -> bool {
        match self {
            Self::All => true,
            Self::Company(own) => own.as_deref() == Some(gst_number),
        }
    }

    /// Keeps the records this scope includes, in order.
    pub fn filter<'a, T>(
        &self,
        records: impl IntoIterator<Item = &'a T>,
        gst_number: impl Fn(&T) -> &str,
    ) -> Vec<&'a T>
    where
        T: 'a,
    {
        records
            .into_iter()
            .filter(|record| self.includes(gst_number(record)))
            .collect()
    }
}

/// Whether `user` may edit the client record with `gst_number`. Clients may
/// edit only their own company.
pub fn can_edit_client(user: &User, gst_number: &str) -> bool {
    ClientScope::for_user(user).includes(gst_number)
}

/// Which coolant readings a user may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingScope {
    /// Only readings the user raised.
    Own,
    All,
}

impl ReadingScope {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Client | Role::Employee => Self::Own,
            Role::Admin | Role::Manufacturer | Role::Manager | Role::Distributor => Self::All,
        }
    }

    /// Whether `viewer` may see a reading raised by `raised_by`.
    pub fn admits(self, viewer: &User, raised_by: UserId) -> bool {
        match self {
            Self::All => true,
            Self::Own => viewer.id == raised_by,
        }
    }
}
