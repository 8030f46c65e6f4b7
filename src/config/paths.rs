//! Path management for opsdesk
//!
//! Provides XDG-compliant path resolution for configuration, data, and
//! export output.
//!
//! ## Path Resolution Order
//!
//! 1. `OPSDESK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/opsdesk` or `~/.config/opsdesk`
//! 3. Windows: `%APPDATA%\opsdesk`

use std::path::PathBuf;

use crate::error::OpsError;

/// Manages all paths used by opsdesk
#[derive(Debug, Clone)]
pub struct OpsPaths {
    /// Base directory for all opsdesk data
    base_dir: PathBuf,
}

impl OpsPaths {
    /// Create a new OpsPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, OpsError> {
        let base_dir = if let Ok(custom) = std::env::var("OPSDESK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create OpsPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/opsdesk/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/opsdesk/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default export output directory (~/.config/opsdesk/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to orders.json
    pub fn orders_file(&self) -> PathBuf {
        self.data_dir().join("orders.json")
    }

    /// Get the path to customers.json
    pub fn customers_file(&self) -> PathBuf {
        self.data_dir().join("customers.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to products.json
    pub fn products_file(&self) -> PathBuf {
        self.data_dir().join("products.json")
    }

    /// Get the path to suppliers.json
    pub fn suppliers_file(&self) -> PathBuf {
        self.data_dir().join("suppliers.json")
    }

    /// Get the path to allocations.json (driver allocations and sales)
    pub fn allocations_file(&self) -> PathBuf {
        self.data_dir().join("allocations.json")
    }

    /// Get the path to collections.json (the completion ledger)
    pub fn completion_ledger_file(&self) -> PathBuf {
        self.data_dir().join("collections.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), OpsError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| OpsError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| OpsError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| OpsError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if opsdesk has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, OpsError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("opsdesk"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, OpsError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| OpsError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("opsdesk"))
}
