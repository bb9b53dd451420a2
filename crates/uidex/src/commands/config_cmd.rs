//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Settings};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = config::config_path();
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let settings = Settings::resolve(global, &cfg)?;
            let text = toml::to_string_pretty(&cfg)?;
            let out = output::render_single(
                settings.output,
                &cfg,
                |_| text.trim_end().to_owned(),
                |_| config::config_path().display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists { path });
            }
            config::save_config_to(&Config::default(), &path)?;
            output::print_status(&format!("Wrote {}", path.display()), global.quiet);
            Ok(())
        }
    }
}
