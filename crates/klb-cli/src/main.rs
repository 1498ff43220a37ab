use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "klb",
    about = "klb — multi-cluster DNS record synthesis",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the record set for a gateway described in klb.toml
    Generate {
        /// Path to the synthesis request
        #[arg(short, long, default_value = "klb.toml")]
        config: String,
        /// JSON array of previously published records
        #[arg(short, long)]
        previous: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Check the routing policy in klb.toml without synthesizing
    Validate {
        #[arg(short, long, default_value = "klb.toml")]
        config: String,
    },
    /// Synthesize, then follow aliases from a name down to its addresses
    Resolve {
        #[arg(short, long, default_value = "klb.toml")]
        config: String,
        #[arg(short, long)]
        previous: Option<String>,
        /// Name to start from (default: the configured hostname)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Write a klb.toml scaffold
    Init {
        #[arg(long)]
        hostname: String,
        #[arg(long)]
        cluster_id: String,
        #[arg(long, default_value = "default")]
        geo_code: String,
        #[arg(short, long, default_value = "klb.toml")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("klb=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, previous, format } => {
            commands::generate::generate(&config, previous.as_deref(), &format)
        }
        Commands::Validate { config } => commands::validate::validate(&config),
        Commands::Resolve { config, previous, name } => {
            commands::resolve::resolve(&config, previous.as_deref(), name.as_deref())
        }
        Commands::Init { hostname, cluster_id, geo_code, output } => {
            commands::init::init(&hostname, &cluster_id, &geo_code, &output)
        }
    }
}
