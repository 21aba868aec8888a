use crate::args;
use crate::error::Result;

/// Build the site into the output directory
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct BuildArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl BuildArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        log::info!(
            "Building from {} into {}",
            config.content_dir().display(),
            config.output_dir().display()
        );
        plume::build(&config)?;
        log::info!("Build successful");

        Ok(())
    }
}
