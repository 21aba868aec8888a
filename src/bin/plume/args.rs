use std::io::Write as _;
use std::path;

use plume::Config;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use
    #[arg(short, long, value_name = "FILE", default_value = plume_config::CONFIG_FILE)]
    pub(crate) config: path::PathBuf,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<Config> {
        let config = Config::load(&self.config)?;
        log::debug!("Using config rooted at {}", config.root.display());
        Ok(config)
    }
}

pub(crate) fn init_logging(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.write_style(write_style(colorchoice::ColorChoice::global()));
    builder.filter(None, level);

    if level == log::LevelFilter::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(|f, record| {
            let style = level_style(record.level());
            let level = format!("[{}]", record.level()).to_lowercase();
            writeln!(f, "{style}{level:<7}{style:#} {}", record.args())
        });
    }

    builder.init();
}

fn write_style(choice: colorchoice::ColorChoice) -> env_logger::WriteStyle {
    match choice {
        colorchoice::ColorChoice::Auto => env_logger::WriteStyle::Auto,
        colorchoice::ColorChoice::AlwaysAnsi | colorchoice::ColorChoice::Always => {
            env_logger::WriteStyle::Always
        }
        colorchoice::ColorChoice::Never => env_logger::WriteStyle::Never,
    }
}

fn level_style(level: log::Level) -> anstyle::Style {
    let color = match level {
        log::Level::Error => anstyle::AnsiColor::Red,
        log::Level::Warn => anstyle::AnsiColor::Yellow,
        log::Level::Info => anstyle::AnsiColor::Green,
        log::Level::Debug => anstyle::AnsiColor::Blue,
        log::Level::Trace => anstyle::AnsiColor::Cyan,
    };
    anstyle::Style::new().fg_color(Some(color.into())).bold()
}
