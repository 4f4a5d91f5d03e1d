// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Loading and reloading of the application settings
use crate::cli::Args;
use actix_web::web::Data;
use arc_swap::ArcSwap;
use config::ConfigError;
use std::path::Path;
use std::sync::Arc;

pub use shared::settings::*;

/// Settings as stored inside the actix app data
pub type SharedSettingsActix = Data<ArcSwap<Settings>>;

/// Reload the settings from the `config_path` & the environment
///
/// Only the owner header and the rsvp section are taken over, everything else
/// is bound when the server starts.
pub(crate) fn reload_settings(
    shared_settings: SharedSettings,
    config_path: &Path,
) -> Result<(), ConfigError> {
    let new_settings = Settings::load(config_path)?;
    let mut current_settings = (*shared_settings.load_full()).clone();

    current_settings.http.owner_header = new_settings.http.owner_header;
    current_settings.rsvp = new_settings.rsvp;

    // replace the shared settings with the modified ones
    shared_settings.store(Arc::new(current_settings));

    Ok(())
}

/// Loads settings from program arguments and config file
pub fn load_settings(args: &Args) -> Result<Settings, ConfigError> {
    Settings::load(&args.config)
}
