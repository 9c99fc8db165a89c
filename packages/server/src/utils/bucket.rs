/// Per-user directory within the storage bucket.
pub fn user_dir(bucket: &str, user_id: &str) -> String {
    format!("{bucket}/{user_id}")
}

/// Filename bounds covering exactly one user's objects.
///
/// '0' is the ASCII successor of '/', so the strict range
/// `("/{bucket}/{id}/", "/{bucket}/{id}0/")` spans every path under the
/// user's directory and nothing else, even when one user id is a prefix of
/// another.
pub fn list_bounds(bucket: &str, user_id: &str) -> (String, String) {
    (
        format!("/{bucket}/{user_id}/"),
        format!("/{bucket}/{user_id}0/"),
    )
}
