use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "overlord-setup",
    about = "Validate and normalize overlord worker behavior configs",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a worker behavior config and print its normalized form.
    ///
    /// Files ending in .toml are read as TOML, anything else as JSON.
    /// The legacy autoScaler field is folded into autoScalers.
    Validate {
        /// Path to the config file
        #[arg(short, long)]
        path: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Task type to route through the category spec
        #[arg(long, requires = "datasource")]
        task_type: Option<String>,
        /// Datasource of the routed task
        #[arg(long, requires = "task_type")]
        datasource: Option<String>,
    },
    /// Print the built-in default config
    Defaults {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("overlord_setup=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path, format, task_type, datasource } => {
            let route = task_type.as_deref().zip(datasource.as_deref()).map(
                |(task_type, datasource)| commands::validate::RouteQuery { task_type, datasource },
            );
            commands::validate::validate(&path, &format, route)
        }
        Commands::Defaults { format } => {
            commands::validate::defaults(&format)
        }
    }
}
