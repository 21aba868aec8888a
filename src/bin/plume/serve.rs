use anyhow::Context as _;

use crate::args;
use crate::error::Result;

/// Serve the output directory over HTTP
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ServeArgs {
    /// Host to serve from
    #[arg(long, value_name = "HOSTNAME_OR_IP", default_value = plume_serve::DEFAULT_HOSTNAME)]
    pub(crate) addr: String,

    /// Port to serve from
    #[arg(short = 'P', long, value_name = "NUM", default_value_t = plume_serve::DEFAULT_PORT)]
    pub(crate) port: u16,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl ServeArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let output = config.output_dir();
        let output = dunce::canonicalize(&output).with_context(|| {
            format!(
                "Output directory `{}` not found, run `plume build` first",
                output.display()
            )
        })?;

        let server = plume_serve::ServerBuilder::new(output)
            .hostname(&self.addr)
            .port(self.port)
            .build();

        log::info!(
            "Serving {} through static file server",
            server.source().display()
        );
        log::info!("Server Listening on http://{}", server.addr());
        log::info!("Ctrl-c to stop the server");

        server.serve()?;
        Ok(())
    }
}
