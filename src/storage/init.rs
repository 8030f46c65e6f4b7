//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::OpsPaths;
use crate::error::OpsError;
use crate::models::{Role, User};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and a default admin user so the
/// collections workflow is operable immediately after install.
pub fn initialize_storage(paths: &OpsPaths) -> Result<(), OpsError> {
    // Ensure all directories exist
    paths.ensure_directories()?;

    if !paths.users_file().exists() {
        create_default_admin(paths)?;
    }

    Ok(())
}

/// Create the default admin account
fn create_default_admin(paths: &OpsPaths) -> Result<(), OpsError> {
    #[derive(serde::Serialize)]
    struct UserData {
        users: Vec<User>,
    }

    let admin = User::new("Administrator", "admin@opsdesk.local", Role::Admin);
    let data = UserData { users: vec![admin] };
    write_json_atomic(paths.users_file(), &data)?;

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &OpsPaths) -> bool {
    !paths.users_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::UserRepository;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_default_admin() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OpsPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();
        assert!(!needs_initialization(&paths));

        let repo = UserRepository::new(paths.users_file());
        repo.load().unwrap();
        let admin = repo.get_by_email("admin@opsdesk.local").unwrap().unwrap();
        assert!(admin.role.can_manage_collections());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OpsPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        initialize_storage(&paths).unwrap();

        let repo = UserRepository::new(paths.users_file());
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }
}
