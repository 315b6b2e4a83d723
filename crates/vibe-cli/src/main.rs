use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;

use context::AppContext;

#[derive(Parser)]
#[command(name = "vibe")]
#[command(about = "Vibe Studio CLI - generate, refine and publish classroom applets", long_about = None)]
struct Cli {
    /// Email of the acting teacher
    #[arg(long, global = true)]
    email: Option<String>,

    /// Language of generated metadata (`en` or `he`)
    #[arg(long, global = true)]
    language: Option<String>,

    /// Directory holding config.toml, secret.json and local data
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available personas and activity templates
    Catalog,
    /// Generate a brand-new applet and save it as a session
    Generate {
        #[arg(long)]
        persona: String,
        #[arg(long)]
        template: String,
        /// What the applet should teach; defaults to the template's starter text
        content: Option<String>,
        /// Session name; defaults to the generated app name
        #[arg(long)]
        name: Option<String>,
        /// Write the generated HTML to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Apply a change request to a saved session
    Refine {
        #[arg(long)]
        session: String,
        change: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Start a session from an existing HTML file
    Import {
        file: PathBuf,
        #[arg(long)]
        name: String,
    },
    /// Publish a saved session to the gallery
    Publish {
        #[arg(long)]
        session: String,
    },
    /// List your saved sessions
    Sessions,
    /// Browse the gallery
    Gallery {
        /// Only your own entries
        #[arg(long)]
        mine: bool,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the links of your most recent publication
    LastLink,
    /// Edit the metadata of one of your gallery entries
    EditApp {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        target_level: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        sub_domain: Option<String>,
        #[arg(long)]
        explanation: Option<String>,
    },
    /// Remove one of your gallery entries
    DeleteApp { id: String },
    /// Add a teacher to the local roster
    Register {
        teacher_email: String,
        #[arg(long)]
        school_code: Option<String>,
    },
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (paths, config) = AppContext::resolve_config(cli.config_dir)?;
    init_tracing(&config.log_level);
    let ctx = AppContext::build(paths, config, cli.email, cli.language).await?;

    match cli.command {
        Commands::Catalog => commands::catalog::list(&ctx).await?,
        Commands::Generate {
            persona,
            template,
            content,
            name,
            out,
        } => {
            commands::session::generate(&ctx, persona, template, content, name, out.as_deref())
                .await?
        }
        Commands::Refine {
            session,
            change,
            out,
        } => commands::session::refine(&ctx, &session, &change, out.as_deref()).await?,
        Commands::Import { file, name } => commands::session::import(&ctx, &file, &name).await?,
        Commands::Publish { session } => commands::session::publish(&ctx, &session).await?,
        Commands::Sessions => commands::session::list(&ctx).await?,
        Commands::Gallery {
            mine,
            school,
            domain,
            limit,
        } => commands::gallery::list(&ctx, mine, school, domain, limit).await?,
        Commands::LastLink => commands::gallery::last_link(&ctx).await?,
        Commands::EditApp {
            id,
            name,
            target_level,
            domain,
            sub_domain,
            explanation,
        } => {
            let update = vibe_core::gallery::GalleryMetadataUpdate {
                name,
                target_level,
                domain,
                sub_domain,
                pedagogical_explanation: explanation,
            };
            commands::gallery::edit(&ctx, &id, update).await?
        }
        Commands::DeleteApp { id } => commands::gallery::delete(&ctx, &id).await?,
        Commands::Register {
            teacher_email,
            school_code,
        } => commands::roster::register(&ctx, &teacher_email, school_code)?,
    }

    Ok(())
}
