use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use garimpo_core::SearchPipeline;
use garimpo_core::catalog::{self, CourseFilters};
use garimpo_db::{Database, DatabaseConfig, JobFilter};
use garimpo_sources::{GroqClient, JobBoard};

#[derive(Parser)]
#[command(name = "garimpo", version, about = "Multi-source job aggregator for the Brazilian market")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one aggregation pass and persist the results
    Search {
        /// Keywords override (defaults to the stored configuration)
        #[arg(short, long)]
        keywords: Option<String>,

        /// Location override
        #[arg(short, long)]
        location: Option<String>,

        /// Comma-separated source tags, e.g. "remotive,linkedin"
        #[arg(short, long)]
        sources: Option<String>,
    },

    /// List stored jobs
    Jobs {
        /// "all", "favorite" or "submitted"
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Search the course catalog (offline, no database needed)
    Courses {
        /// Free-text terms, AND semantics
        #[arg(short, long, default_value = "")]
        query: String,

        /// "all", "presencial", "ead" or "hibrido"
        #[arg(short, long, default_value = "all")]
        modality: String,

        /// "all", "pos-graduacao", "mestrado" or "doutorado"
        #[arg(short, long, default_value = "all")]
        level: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("garimpo=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            keywords,
            location,
            sources,
        } => cmd_search(keywords, location, sources).await?,
        Commands::Jobs { filter } => cmd_jobs(&filter).await?,
        Commands::Courses {
            query,
            modality,
            level,
        } => cmd_courses(&query, &modality, &level),
    }

    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL and run pending migrations.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(db)
}

async fn cmd_search(
    keywords: Option<String>,
    location: Option<String>,
    sources: Option<String>,
) -> Result<()> {
    let db = connect_db().await?;

    let mut config = db
        .config_repo()
        .get_or_create()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    if let Some(keywords) = keywords {
        config.keywords = keywords;
    }
    if let Some(location) = location {
        config.location = location;
    }
    if let Some(sources) = sources {
        config.enabled_sources = sources;
    }

    tracing::info!(keywords = %config.keywords, location = %config.location, "Starting search run");

    let registry = JobBoard::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let llm = GroqClient::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let pipeline = SearchPipeline::new(registry, db.job_repo(), llm.clone(), llm);

    let report = pipeline.run(&config).await.map_err(|e| anyhow::anyhow!(e))?;
    db.config_repo()
        .touch_last_search()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    println!("Query: {}{}", report.query, if report.query_rewritten { " (rewritten)" } else { "" });
    println!(
        "Found {} candidates, saved {}, summarized {}",
        report.found, report.saved, report.summarized
    );

    Ok(())
}

async fn cmd_jobs(filter: &str) -> Result<()> {
    let filter: JobFilter = filter.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let db = connect_db().await?;
    let jobs = db.job_repo().list(filter).await.map_err(|e| anyhow::anyhow!(e))?;

    if jobs.is_empty() {
        println!("No jobs stored.");
        return Ok(());
    }

    for job in &jobs {
        let mut flags = String::new();
        if job.is_favorite {
            flags.push('★');
        }
        if job.is_submitted {
            flags.push('✓');
        }
        println!(
            "[{}] {} — {} ({}) {}\n    {}",
            job.source, job.title, job.company, job.location, flags, job.url
        );
    }
    println!("\nTotal: {} jobs", jobs.len());

    Ok(())
}

fn cmd_courses(query: &str, modality: &str, level: &str) {
    let filters = CourseFilters {
        query: query.to_string(),
        modality: modality.parse().ok(),
        level: level.parse().ok(),
    };

    let courses = catalog::search_courses(&filters);
    if courses.is_empty() {
        println!("No courses match.");
        return;
    }

    for course in &courses {
        let grade = course
            .mec_grade
            .map(|g| format!("MEC {g}"))
            .unwrap_or_else(|| "MEC n/a".to_string());
        println!(
            "{} — {}\n    {} | {} | {} | {}\n    {}",
            course.institution,
            course.program,
            course.level.as_str(),
            course.modality.as_str(),
            grade,
            course.city,
            course.url
        );
    }

    let stats = catalog::course_stats();
    println!(
        "\n{} shown of {} cataloged ({} in Recife, {} with scholarships)",
        courses.len(),
        stats.total,
        stats.recife,
        stats.com_bolsa
    );
}
