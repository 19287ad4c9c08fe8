use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use uuid::Uuid;

use talenthunt::api::candidates::CandidateFilter;
use talenthunt::api::types::{CandidateUpdate, Match, NewCandidate, NewInteraction, NewJob};
use talenthunt::api::{self, ApiClient, ApiError};
use talenthunt::briefing;
use talenthunt::config::{ClientConfig, DEFAULT_BASE_URL};
use talenthunt::session::token_store::FileTokenStore;
use talenthunt::session::{SessionError, SessionStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `talenthunt login` first")]
    NotAuthenticated,
    #[error("unsupported file type for {0} (expected pdf, docx, txt, csv, or xlsx)")]
    UnsupportedFile(String),
    #[error("failed to read {path}: {source}")]
    FileRead { path: String, source: std::io::Error },
    #[error("no match for candidate {0} on that job; run `talenthunt match compute` first")]
    MatchNotFound(Uuid),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "talenthunt", about = "TalentHunt recruiting API CLI")]
struct Cli {
    #[arg(long, env = "TALENTHUNT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where the session token is stored between runs.
    #[arg(long, env = "TALENTHUNT_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a company and log in as its first user.
    Register {
        #[arg(long)]
        company: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and persist the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the persisted session.
    Logout,
    /// Show the currently logged-in user.
    Whoami,
    /// Job description management.
    Job(JobCommand),
    /// Candidate pool management.
    Candidate(CandidateCommand),
    /// Match computation and results.
    Match(MatchCommand),
    /// Recruiter action history.
    Action(ActionCommand),
    /// Natural-language candidate search.
    Search { query: String },
    /// Pool analytics.
    Analytics(AnalyticsCommand),
    /// Interview briefing for a matched candidate.
    Brief { job_id: Uuid, candidate_id: Uuid },
}

#[derive(Args, Debug)]
struct JobCommand {
    #[command(subcommand)]
    command: JobSubcommand,
}

#[derive(Subcommand, Debug)]
enum JobSubcommand {
    List,
    Read {
        job_id: Uuid,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
    },
    Upload {
        #[arg(long)]
        title: String,
        file: PathBuf,
    },
    Parse {
        job_id: Uuid,
    },
    Delete {
        job_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct CandidateCommand {
    #[command(subcommand)]
    command: CandidateSubcommand,
}

#[derive(Subcommand, Debug)]
enum CandidateSubcommand {
    List {
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        per_page: Option<i64>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        skill: Option<String>,
    },
    Read {
        candidate_id: Uuid,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Import {
        file: PathBuf,
    },
    Update {
        candidate_id: Uuid,
        #[arg(long)]
        data: String,
    },
    Delete {
        candidate_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct MatchCommand {
    #[command(subcommand)]
    command: MatchSubcommand,
}

#[derive(Subcommand, Debug)]
enum MatchSubcommand {
    Compute { job_id: Uuid },
    Results { job_id: Uuid },
}

#[derive(Args, Debug)]
struct ActionCommand {
    #[command(subcommand)]
    command: ActionSubcommand,
}

#[derive(Subcommand, Debug)]
enum ActionSubcommand {
    Record {
        #[arg(long)]
        candidate: Uuid,
        #[arg(long)]
        job: Option<Uuid>,
        #[arg(long)]
        action: String,
        #[arg(long)]
        notes: Option<String>,
    },
    History {
        candidate_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct AnalyticsCommand {
    #[command(subcommand)]
    command: AnalyticsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AnalyticsSubcommand {
    Overview,
    Rediscovery,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ClientConfig::resolve(Some(cli.base_url), cli.token_file);
    let store = Arc::new(FileTokenStore::new(config.token_path.clone()));
    let client = ApiClient::new(&config, store);

    match cli.command {
        Command::Register { company, name, email, password } => {
            run_register(client, &company, &name, &email, &password).await
        }
        Command::Login { email, password } => run_login(client, &email, &password).await,
        Command::Logout => run_logout(client),
        Command::Whoami => run_whoami(client).await,
        Command::Job(job) => run_job(&client, job).await,
        Command::Candidate(candidate) => run_candidate(&client, candidate).await,
        Command::Match(matches) => run_match(&client, matches).await,
        Command::Action(action) => run_action(&client, action).await,
        Command::Search { query } => run_search(&client, &query).await,
        Command::Analytics(analytics) => run_analytics(&client, analytics).await,
        Command::Brief { job_id, candidate_id } => run_brief(&client, job_id, candidate_id).await,
    }
}

async fn run_register(
    client: ApiClient,
    company: &str,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    let mut session = SessionStore::new(client);
    let user = session.register(company, name, email, password).await?;
    print_json(&serde_json::to_value(&user)?)
}

async fn run_login(client: ApiClient, email: &str, password: &str) -> Result<(), CliError> {
    let mut session = SessionStore::new(client);
    let user = session.login(email, password).await?;
    print_json(&serde_json::to_value(&user)?)
}

fn run_logout(client: ApiClient) -> Result<(), CliError> {
    let mut session = SessionStore::new(client);
    session.logout();
    eprintln!("logged out");
    Ok(())
}

async fn run_whoami(client: ApiClient) -> Result<(), CliError> {
    let mut session = SessionStore::new(client);
    session.hydrate().await;
    match session.user() {
        Some(user) => print_json(&serde_json::to_value(user)?),
        None => Err(CliError::NotAuthenticated),
    }
}

async fn run_job(client: &ApiClient, job: JobCommand) -> Result<(), CliError> {
    match job.command {
        JobSubcommand::List => {
            let jobs = api::jobs::list(client, None).await?;
            print_json(&serde_json::to_value(&jobs)?)
        }
        JobSubcommand::Read { job_id } => {
            let job = api::jobs::get(client, job_id, None).await?;
            print_json(&serde_json::to_value(&job)?)
        }
        JobSubcommand::Create { title, text } => {
            let job = api::jobs::create(client, &NewJob { title, raw_text: text }, None).await?;
            print_json(&serde_json::to_value(&job)?)
        }
        JobSubcommand::Upload { title, file } => {
            let media_type = media_type_for_path(&file)?;
            let contents = read_file(&file)?;
            let file_name = display_file_name(&file);
            let job = api::jobs::upload(client, &title, &file_name, media_type, contents, None).await?;
            print_json(&serde_json::to_value(&job)?)
        }
        JobSubcommand::Parse { job_id } => {
            let parsed = api::jobs::parse(client, job_id, None).await?;
            print_json(&serde_json::to_value(&parsed)?)
        }
        JobSubcommand::Delete { job_id } => {
            api::jobs::delete(client, job_id, None).await?;
            eprintln!("deleted job {job_id}");
            Ok(())
        }
    }
}

async fn run_candidate(client: &ApiClient, candidate: CandidateCommand) -> Result<(), CliError> {
    match candidate.command {
        CandidateSubcommand::List { page, per_page, search, status, skill } => {
            let filter = CandidateFilter { page, per_page, search, status, skill };
            let listing = api::candidates::list(client, &filter, None).await?;
            print_json(&serde_json::to_value(&listing)?)
        }
        CandidateSubcommand::Read { candidate_id } => {
            let found = api::candidates::get(client, candidate_id, None).await?;
            print_json(&serde_json::to_value(&found)?)
        }
        CandidateSubcommand::Create { data } => {
            let payload: NewCandidate = serde_json::from_str(&data)?;
            let created = api::candidates::create(client, &payload, None).await?;
            print_json(&serde_json::to_value(&created)?)
        }
        CandidateSubcommand::Import { file } => {
            let media_type = media_type_for_path(&file)?;
            let contents = read_file(&file)?;
            let file_name = display_file_name(&file);
            let outcome = api::candidates::import(client, &file_name, media_type, contents, None).await?;
            print_json(&serde_json::to_value(&outcome)?)
        }
        CandidateSubcommand::Update { candidate_id, data } => {
            let payload: CandidateUpdate = serde_json::from_str(&data)?;
            let updated = api::candidates::update(client, candidate_id, &payload, None).await?;
            print_json(&serde_json::to_value(&updated)?)
        }
        CandidateSubcommand::Delete { candidate_id } => {
            api::candidates::delete(client, candidate_id, None).await?;
            eprintln!("deleted candidate {candidate_id}");
            Ok(())
        }
    }
}

async fn run_match(client: &ApiClient, matches: MatchCommand) -> Result<(), CliError> {
    match matches.command {
        MatchSubcommand::Compute { job_id } => {
            let summary = api::matches::compute(client, job_id, None).await?;
            print_json(&serde_json::to_value(&summary)?)
        }
        MatchSubcommand::Results { job_id } => {
            let results = api::matches::results(client, job_id, None).await?;
            print_json(&serde_json::to_value(&results)?)
        }
    }
}

async fn run_action(client: &ApiClient, action: ActionCommand) -> Result<(), CliError> {
    match action.command {
        ActionSubcommand::Record { candidate, job, action, notes } => {
            let interaction = NewInteraction { candidate_id: candidate, job_id: job, action, notes };
            let recorded = api::actions::record(client, &interaction, None).await?;
            print_json(&serde_json::to_value(&recorded)?)
        }
        ActionSubcommand::History { candidate_id } => {
            let interactions = api::actions::history(client, candidate_id, None).await?;
            print_json(&serde_json::to_value(&interactions)?)
        }
    }
}

async fn run_search(client: &ApiClient, query: &str) -> Result<(), CliError> {
    let outcome = api::search::agent(client, query, None).await?;
    print_json(&serde_json::to_value(&outcome)?)
}

async fn run_analytics(client: &ApiClient, analytics: AnalyticsCommand) -> Result<(), CliError> {
    match analytics.command {
        AnalyticsSubcommand::Overview => {
            let overview = api::analytics::overview(client, None).await?;
            print_json(&serde_json::to_value(&overview)?)
        }
        AnalyticsSubcommand::Rediscovery => {
            let stats = api::analytics::rediscovery(client, None).await?;
            print_json(&serde_json::to_value(&stats)?)
        }
    }
}

async fn run_brief(client: &ApiClient, job_id: Uuid, candidate_id: Uuid) -> Result<(), CliError> {
    let results = api::matches::results(client, job_id, None).await?;
    let Some(candidate_match) = results.matches.iter().find(|entry| entry.candidate_id == candidate_id)
    else {
        return Err(CliError::MatchNotFound(candidate_id));
    };

    let as_of = chrono::Utc::now().naive_utc();
    let points = briefing::talking_points(candidate_match);
    let risks = briefing::risk_indicators(candidate_match, as_of);
    print_briefing(&results.job_title, candidate_match, &points, &risks);
    Ok(())
}

fn print_briefing(job_title: &str, candidate_match: &Match, points: &[String], risks: &[String]) {
    let name = candidate_match
        .candidate
        .as_ref()
        .map_or("(candidate not embedded)", |candidate| candidate.name.as_str());
    println!("Briefing: {name} for {job_title}");
    println!(
        "Overall score {:.0} of 100, confidence {:.0}",
        candidate_match.overall_score, candidate_match.confidence
    );

    println!("\nTalking points:");
    if points.is_empty() {
        println!("  (none)");
    }
    for point in points {
        println!("  - {point}");
    }

    println!("\nRisks to check:");
    if risks.is_empty() {
        println!("  (none)");
    }
    for risk in risks {
        println!("  - {risk}");
    }
}

fn media_type_for_path(path: &Path) -> Result<&'static str, CliError> {
    api::media_type_for(&display_file_name(path))
        .ok_or_else(|| CliError::UnsupportedFile(path.display().to_string()))
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::FileRead { path: path.display().to_string(), source })
}

fn display_file_name(path: &Path) -> String {
    path.file_name().and_then(OsStr::to_str).unwrap_or("upload").to_owned()
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
