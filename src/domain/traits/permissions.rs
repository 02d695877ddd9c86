use crate::domain::entities::{Channel, Permission, User};

/// Permission-check capability provided by the platform adapter
pub trait PermissionResolver: Send + Sync {
    /// Whether `user` holds `permission` in `channel`.
    ///
    /// `None` means the adapter has no permission data for this pair; the
    /// dispatcher treats that the same as `Some(false)`.
    fn has_permission(
        &self,
        user: &User,
        channel: &Channel,
        permission: Permission,
    ) -> Option<bool>;
}
