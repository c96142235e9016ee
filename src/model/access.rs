use crate::{
    model::error::{DatabaseError, DatabaseResult},
    web::AuthenticatedUser,
};

/// Rows written by a single user, such as lesson comments.
pub trait HasOwner {
    fn owner_id(&self) -> i32;
}

/// Lets the author of `resource` through. Admins may touch anything.
pub fn check_access<T: HasOwner>(actor: &AuthenticatedUser, resource: &T) -> DatabaseResult<()> {
    if actor.is_admin() || resource.owner_id() == actor.user_id() {
        Ok(())
    } else {
        Err(DatabaseError::Forbidden)
    }
}
