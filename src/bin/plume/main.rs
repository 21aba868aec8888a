use clap::Parser as _;

mod args;
mod build;
mod error;
mod new;
#[cfg(feature = "serve")]
mod serve;

/// Static site generator for markdown blogs
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "plume", version, about)]
#[command(styles = clap_cargo_styles())]
struct Cli {
    #[command(flatten)]
    logging: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Build(build::BuildArgs),
    New(new::NewArgs),
    #[cfg(feature = "serve")]
    Server(serve::ServeArgs),
    Init(new::InitArgs),
}

impl Command {
    fn run(&self) -> error::Result<()> {
        match self {
            Self::Build(cmd) => cmd.run(),
            Self::New(cmd) => cmd.run(),
            #[cfg(feature = "serve")]
            Self::Server(cmd) => cmd.run(),
            Self::Init(cmd) => cmd.run(),
        }
    }
}

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    cli.color.write_global();
    args::init_logging(cli.logging.log_level_filter());

    cli.command
        .run()
        .map_err(|e| proc_exit::Exit::new(proc_exit::Code::FAILURE).with_message(format!("{e:#}")))?;

    Ok(())
}

const fn clap_cargo_styles() -> clap::builder::Styles {
    use clap::builder::styling::AnsiColor;
    use clap::builder::styling::Effects;

    clap::builder::Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .invalid(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
}

#[test]
fn verify_app() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
