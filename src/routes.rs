//! Screen selection. Login and Register are the only public screens; every
//! other screen needs a session. The guard is a pure function of the
//! requested page and the session state, re-checked on every render.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Page {
    Login,
    Register,
    Dashboard,
    Transactions,
    AddIncome,
    AddExpense,
    Categories,
}

impl Page {
    pub fn requires_session(self) -> bool {
        !matches!(self, Page::Login | Page::Register)
    }
}

pub fn resolve(requested: Page, authenticated: bool) -> Page {
    if requested.requires_session() && !authenticated {
        Page::Login
    } else if !requested.requires_session() && authenticated {
        Page::Dashboard
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_users_land_on_login() {
        for page in [
            Page::Dashboard,
            Page::Transactions,
            Page::AddIncome,
            Page::AddExpense,
            Page::Categories,
        ] {
            assert_eq!(resolve(page, false), Page::Login);
        }
    }

    #[test]
    fn public_pages_stay_public_when_logged_out() {
        assert_eq!(resolve(Page::Login, false), Page::Login);
        assert_eq!(resolve(Page::Register, false), Page::Register);
    }

    #[test]
    fn logged_in_users_skip_the_auth_screens() {
        assert_eq!(resolve(Page::Login, true), Page::Dashboard);
        assert_eq!(resolve(Page::Register, true), Page::Dashboard);
    }

    #[test]
    fn private_pages_pass_through_with_a_session() {
        assert_eq!(resolve(Page::Transactions, true), Page::Transactions);
        assert_eq!(resolve(Page::Categories, true), Page::Categories);
    }
}
