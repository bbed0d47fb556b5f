/// Source of the signed-in user's id.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}
