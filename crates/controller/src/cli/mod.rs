// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::settings::Settings;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(name = "guestlist")]
pub struct Args {
    #[clap(
        short,
        long,
        default_value = "config.toml",
        help = "Specify path to configuration file"
    )]
    pub config: PathBuf,

    #[clap(subcommand)]
    cmd: Option<SubCommand>,
}

#[derive(Subcommand, Debug, Clone)]
#[clap(rename_all = "kebab_case")]
enum SubCommand {
    /// Migrate the db. This is done automatically during startup,
    /// but can be done without starting the server using this command.
    MigrateDb,
}

impl Args {
    /// Returns true if we want to startup the server after we finished the cli part
    pub fn controller_should_start(&self) -> bool {
        self.cmd.is_none()
    }
}

/// Parses the CLI-Arguments into [`Args`]
///
/// Also runs (optional) cli commands if necessary
pub async fn parse_args() -> Result<Args> {
    let args = Args::parse();

    if let Some(sub_command) = args.cmd.clone() {
        let settings = Settings::load(&args.config)?;
        match sub_command {
            SubCommand::MigrateDb => {
                db_storage::migrations::migrate_from_url(&settings.database.url)
                    .await
                    .context("Failed to migrate database")?;

                println!("Database migrated");
            }
        }
    }

    Ok(args)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_config_toml() {
        let args = Args::try_parse_from(["guestlist"]).unwrap();

        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(args.controller_should_start());
    }

    #[test]
    fn migrate_db_does_not_start_the_server() {
        let args =
            Args::try_parse_from(["guestlist", "--config", "other.toml", "migrate-db"]).unwrap();

        assert_eq!(args.config, PathBuf::from("other.toml"));
        assert!(!args.controller_should_start());
    }
}
