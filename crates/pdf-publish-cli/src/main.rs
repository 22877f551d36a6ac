mod logger;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use logger::StderrLogger;
use pdf_publish::pdf_compose::{self, Category, ComposeOptions, Composer, Metadata};
use pdf_publish::{
    Ledger, PublicationNumber, PublishUpdate, Publisher, ServiceConfig, WebAppLedger,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfpub", about = "Working paper publication tools", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the cover and abstract pages and merge them with a manuscript
    Compose {
        #[command(flatten)]
        document: DocumentArgs,

        /// Manuscript PDF file
        #[arg(short, long)]
        manuscript: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compose the cover and abstract pages only
    Cover {
        #[command(flatten)]
        document: DocumentArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Reserve a number, compose, merge and upload a submission
    Submit {
        #[command(flatten)]
        service: ServiceArgs,

        /// Submission metadata (JSON)
        #[arg(long)]
        metadata: PathBuf,

        /// Manuscript PDF file
        #[arg(short, long)]
        manuscript: PathBuf,

        /// Layout options (JSON)
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Reserve the next publication number in a category
    Reserve {
        #[command(flatten)]
        service: ServiceArgs,

        #[arg(long, value_enum)]
        category: CategoryArg,
    },

    /// Lock an uploaded submission
    Finalize {
        #[command(flatten)]
        service: ServiceArgs,

        /// Publication number, e.g. WP-2024-003
        number: String,
    },

    /// Remove a submission that has not been finalized
    Delete {
        #[command(flatten)]
        service: ServiceArgs,

        /// Publication number, e.g. WP-2024-003
        number: String,
    },
}

#[derive(clap::Args)]
struct DocumentArgs {
    /// Submission metadata (JSON)
    #[arg(long)]
    metadata: PathBuf,

    /// Publication number printed on the cover [default: CAT-YEAR-000]
    #[arg(long)]
    number: Option<String>,

    /// Override the category from the metadata file
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// Cover date (YYYY-MM-DD) [default: today]
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Layout options (JSON)
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ServiceArgs {
    /// Service configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ledger web app URL, overrides the configuration
    #[arg(long)]
    url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Pp,
    Wp,
    Mn,
    Br,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Pp => Self::PP,
            CategoryArg::Wp => Self::WP,
            CategoryArg::Mn => Self::MN,
            CategoryArg::Br => Self::BR,
        }
    }
}

async fn load_metadata(path: &Path) -> Result<Metadata> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse metadata in {}", path.display()))
}

async fn load_composer(options: Option<&Path>) -> Result<Composer> {
    let options = match options {
        Some(path) => ComposeOptions::load(path).await?,
        None => ComposeOptions::default(),
    };
    Ok(Composer::new(options)?)
}

async fn load_service(args: &ServiceArgs) -> Result<ServiceConfig> {
    let config = match &args.config {
        Some(path) => ServiceConfig::load(path).await?,
        None => ServiceConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(url) = &args.url {
        config.web_app_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Metadata, number and date for an offline composition
struct Draft {
    composer: Composer,
    metadata: Metadata,
    number: String,
    date: NaiveDate,
}

impl DocumentArgs {
    async fn load(&self) -> Result<Draft> {
        let mut metadata = load_metadata(&self.metadata).await?;
        if let Some(category) = self.category {
            metadata.category = category.into();
        }
        metadata.validate()?;

        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let number = self.number.clone().unwrap_or_else(|| {
            PublicationNumber::new(metadata.category, date.year(), 0).to_string()
        });

        Ok(Draft {
            composer: load_composer(self.options.as_deref()).await?,
            metadata,
            number,
            date,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::new(StderrLogger::level_for(cli.verbose)).init()?;

    match cli.command {
        Commands::Compose {
            document,
            manuscript,
            output,
        } => {
            let draft = document.load().await?;
            let manuscript =
                pdf_publish::load_manuscript(&manuscript, pdf_publish::DEFAULT_MAX_MANUSCRIPT_BYTES)
                    .await?;

            let merged = pdf_publish::assemble(
                &draft.composer,
                &draft.number,
                &draft.metadata,
                draft.date,
                manuscript,
            )
            .await?;
            tokio::fs::write(&output, &merged.bytes).await?;

            println!(
                "{}: {} generated + {} manuscript pages → {}",
                draft.number,
                merged.generated_pages,
                merged.manuscript_pages,
                output.display()
            );
        }

        Commands::Cover { document, output } => {
            let draft = document.load().await?;
            let pages = pdf_compose::generate_pdf(
                &draft.composer,
                &draft.number,
                &draft.metadata,
                draft.date,
                &output,
            )
            .await?;
            println!("{}: {} pages → {}", draft.number, pages, output.display());
        }

        Commands::Submit {
            service,
            metadata,
            manuscript,
            options,
        } => {
            let config = load_service(&service).await?;
            let metadata = load_metadata(&metadata).await?;
            let manuscript =
                pdf_publish::load_manuscript(&manuscript, config.max_manuscript_bytes).await?;
            let composer = load_composer(options.as_deref()).await?;

            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
            let progress = tokio::spawn(async move {
                while let Some(update) = rx.recv().await {
                    match update {
                        PublishUpdate::Stage(stage) => eprintln!("→ {}", stage),
                        PublishUpdate::Complete(receipt) => eprintln!("✓ {}", receipt.number),
                        PublishUpdate::Failed { stage, message } => {
                            eprintln!("✗ {} failed: {}", stage, message)
                        }
                    }
                }
            });

            let publisher = Publisher::new(WebAppLedger::new(&config)?, composer)
                .with_max_manuscript_bytes(config.max_manuscript_bytes)
                .with_updates(tx);
            let result = publisher.submit(&metadata, manuscript).await;

            // Close the channel so the progress task drains and exits
            drop(publisher);
            progress.await?;

            let receipt = result?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }

        Commands::Reserve { service, category } => {
            let ledger = WebAppLedger::new(&load_service(&service).await?)?;
            let number = ledger.reserve(category.into()).await?;
            println!("{}", number);
        }

        Commands::Finalize { service, number } => {
            let ledger = WebAppLedger::new(&load_service(&service).await?)?;
            Publisher::new(ledger, Composer::default())
                .finalize(&number)
                .await?;
            println!("Finalized {}", number);
        }

        Commands::Delete { service, number } => {
            let ledger = WebAppLedger::new(&load_service(&service).await?)?;
            Publisher::new(ledger, Composer::default())
                .delete(&number)
                .await?;
            println!("Deleted {}", number);
        }
    }

    Ok(())
}
