use std::io::Write as _;
use std::path;

use crate::args;
use crate::error::Result;

/// Write a default `config.yaml`
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub(crate) directory: path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        plume::create_new_project(&self.directory)?;
        log::info!("Created new project at {}", self.directory.display());

        Ok(())
    }
}

/// Create a new blog post from the `content.md` template
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct NewArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl NewArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let engine = plume::Liquid::load(&config.templates_dir())?;

        let mut stdin = std::io::stdin().lock();
        let mut stdout = anstream::stdout().lock();
        let post = plume::NewPost::prompt(&mut stdin, &mut stdout)?;
        writeln!(stdout)?;

        let path = plume::create_post(&engine, &config, &post)?;
        log::info!("Created new post {}", path.display());

        Ok(())
    }
}
