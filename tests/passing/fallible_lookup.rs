use memoproxy::{memoized, wrap, Memoized};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown user {0}")]
    Unknown(String),
}

pub trait Directory {
    fn user_id(&self, name: &str) -> Result<u32, LookupError>;
    fn initials(&self, names: &[String]) -> String;
}

#[derive(Default)]
pub struct Users {
    ids: HashMap<String, u32>,
}

#[memoized]
impl Directory for Users {
    #[memoize]
    fn user_id(&self, name: &str) -> Result<u32, LookupError> {
        self.ids.get(name).copied().ok_or_else(|| LookupError::Unknown(name.to_string()))
    }

    #[memoize]
    fn initials(&self, names: &[String]) -> String {
        names.iter().filter_map(|n| n.chars().next()).collect()
    }
}

fn main() {
    let mut users = Users::default();
    users.ids.insert("ada".to_string(), 1);
    let users = wrap(users).unwrap();
    assert_eq!(users.user_id("ada"), Ok(1));
    assert_eq!(users.user_id("bob"), Err(LookupError::Unknown("bob".to_string())));
    assert_eq!(Memoized::cached(&users, "user_id"), 1);
    let names = vec!["ada".to_string(), "bob".to_string()];
    assert_eq!(users.initials(&names), "ab");
    assert_eq!(Memoized::cached(&users, "initials"), 1);
}
