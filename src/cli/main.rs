//! synadmin: command line front end for the Synapse admin API.
//!
//! Configuration is layered: defaults, then the TOML config file, then
//! `SYNAPSE_URL` / `SYNAPSE_ACCESS_TOKEN` (a `.env` file is honoured), then
//! the `--server` / `--token` flags.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use synadmin::console::{views, Config, DataContext, Operation, StatsPoller};
use synadmin::shared::{AdminError, AppConfig, Page};

/// Administration console for Synapse homeservers
#[derive(Parser, Debug)]
#[command(name = "synadmin", version)]
#[command(about = "Manage users, rooms, media and federation on a Synapse homeserver")]
struct Cli {
    /// Homeserver base URL (overrides config and SYNAPSE_URL)
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Admin access token (overrides config and SYNAPSE_ACCESS_TOKEN)
    #[arg(short, long, global = true)]
    token: Option<String>,

    /// Config file (defaults to <config dir>/synadmin/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List user accounts
    Users {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one account
    User { user_id: String },
    /// Create an account; bare names are qualified with the server name
    CreateUser {
        name: String,
        password: String,
        #[arg(long)]
        admin: bool,
    },
    /// Deactivate an account
    Deactivate {
        user_id: String,
        /// Also erase the account's data
        #[arg(long)]
        erase: bool,
    },
    /// List rooms
    Rooms {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one room
    Room { room_id: String },
    /// Delete a room
    DeleteRoom { room_id: String },
    /// Show server statistics
    Stats {
        /// Keep refreshing until interrupted
        #[arg(short, long)]
        watch: bool,
    },
    /// List uploaded media
    Media {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Quarantine a media item
    Quarantine { media_id: String },
    /// List federation peers (the peer list is not paginated)
    Peers {
        #[command(flatten)]
        filter: SearchArgs,
    },
    /// Block federation with a server
    Block { server_name: String },
    /// Unblock federation with a server
    Unblock { server_name: String },
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Only show entries containing this text
    #[arg(long)]
    search: Option<String>,
}

impl SearchArgs {
    fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Only show entries containing this text
    #[arg(long)]
    search: Option<String>,
    /// Page size
    #[arg(long)]
    limit: Option<u32>,
    /// Offset of the first entry
    #[arg(long, default_value_t = 0)]
    from: u64,
}

impl ListArgs {
    fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    fn page(&self, ctx: &DataContext) -> Page {
        Page::new(self.limit.unwrap_or(ctx.page().limit), self.from)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("synadmin=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, AdminError> {
    let mut builder = AppConfig::builder();

    let path = cli.config.clone().or_else(|| AppConfig::default_path().filter(|p| p.exists()));
    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "loading config file");
        builder = builder.file(path)?;
    }
    builder = builder.env();

    if let Some(server) = &cli.server {
        builder = builder.server_url(server.clone());
    }
    if let Some(token) = &cli.token {
        builder = builder.access_token(token.clone());
    }

    Ok(Config::with_builder(builder)?)
}

async fn run(cli: Cli) -> Result<(), AdminError> {
    let config = load_config(&cli)?;
    tracing::debug!(admin_base = %config.admin_base(), "configured");
    let ctx = DataContext::from_config(config)?;

    match &cli.command {
        Command::Users { list } => {
            ctx.with_page(list.page(&ctx)).fetch_accounts().await?;
            print_accounts(&ctx, list.term());
        }
        Command::User { user_id } => {
            ctx.fetch_account(user_id).await?;
            if let Some(account) = ctx.current_account() {
                print_pairs(&[
                    ("User ID", account.name.clone()),
                    ("Display Name", account.displayname.clone().unwrap_or_else(|| "-".into())),
                    ("Admin", yes_no(account.is_admin)),
                    ("Deactivated", yes_no(account.deactivated)),
                    ("Type", account.user_type.clone().unwrap_or_else(|| "-".into())),
                    ("Created", views::format_date(account.creation_ts)),
                ]);
            }
        }
        Command::CreateUser { name, password, admin } => {
            let mutation = ctx.create_account(name, password, *admin).await?;
            println!("Created {}", mutation.value.name);
            settle(mutation.refresh).await;
            print_accounts(&ctx, "");
        }
        Command::Deactivate { user_id, erase } => {
            let mutation = ctx.deactivate_account(user_id, *erase).await?;
            println!("Deactivated {user_id}");
            settle(mutation.refresh).await;
            print_accounts(&ctx, "");
        }
        Command::Rooms { list } => {
            ctx.with_page(list.page(&ctx)).fetch_rooms().await?;
            print_rooms(&ctx, list.term());
        }
        Command::Room { room_id } => {
            ctx.fetch_room(room_id).await?;
            if let Some(room) = ctx.current_room() {
                print_pairs(&[
                    ("Room ID", room.room_id.clone()),
                    ("Name", room.name.clone().unwrap_or_else(|| "-".into())),
                    ("Alias", room.canonical_alias.clone().unwrap_or_else(|| "-".into())),
                    (
                        "Members",
                        format!("{} ({} local)", room.joined_members, room.joined_local_members),
                    ),
                    ("Version", room.version.clone()),
                    ("Creator", room.creator.clone().unwrap_or_else(|| "-".into())),
                    ("Encryption", room.encryption.clone().unwrap_or_else(|| "none".into())),
                    ("Public", yes_no(room.public)),
                    ("Federatable", yes_no(room.federatable)),
                    ("State Events", views::format_number(room.state_events)),
                ]);
            }
        }
        Command::DeleteRoom { room_id } => {
            let mutation = ctx.delete_room(room_id).await?;
            println!("Deleted {room_id}");
            settle(mutation.refresh).await;
            print_rooms(&ctx, "");
        }
        Command::Stats { watch: false } => {
            ctx.fetch_stats().await?;
            if let Some(stats) = ctx.stats() {
                print!("{}", views::render_stats(&stats));
            }
        }
        Command::Stats { watch: true } => watch_stats(&ctx).await,
        Command::Media { list } => {
            ctx.with_page(list.page(&ctx)).fetch_media().await?;
            print_media(&ctx, list.term());
        }
        Command::Quarantine { media_id } => {
            let mutation = ctx.quarantine_media(media_id).await?;
            println!("Quarantined {media_id}");
            settle(mutation.refresh).await;
            print_media(&ctx, "");
        }
        Command::Peers { filter } => {
            ctx.fetch_peers().await?;
            print_peers(&ctx, filter.term());
        }
        Command::Block { server_name } => {
            let mutation = ctx.set_peer_blocked(server_name, true).await?;
            println!("Blocked {server_name}");
            settle(mutation.refresh).await;
            print_peers(&ctx, "");
        }
        Command::Unblock { server_name } => {
            let mutation = ctx.set_peer_blocked(server_name, false).await?;
            println!("Unblocked {server_name}");
            settle(mutation.refresh).await;
            print_peers(&ctx, "");
        }
    }

    Ok(())
}

/// Wait for a post-mutation refresh. The mutation already succeeded, so a
/// failed refresh is reported but not fatal.
async fn settle(refresh: synadmin::console::RefreshHandle) {
    if let Err(e) = refresh.wait().await {
        tracing::warn!(error = %e, "refresh after mutation failed; list may be stale");
    }
}

async fn watch_stats(ctx: &DataContext) {
    let (view, _guard) = ctx.scoped();
    let mut changes = view.subscribe();
    let poller = StatsPoller::from_config(&view);
    let mut last_seen = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let status = view.status(Operation::FetchStats);
        if status.is_pending() {
            continue;
        }
        if let Some(error) = &status.last_error {
            eprintln!("{}", error.message);
        } else if status.last_success != last_seen {
            last_seen = status.last_success;
            if let Some(stats) = view.stats() {
                println!("--- {} ---", chrono::Utc::now().format("%H:%M:%S"));
                print!("{}", views::render_stats(&stats));
            }
        }
    }

    poller.shutdown().await;
}

fn print_accounts(ctx: &DataContext, term: &str) {
    let accounts = ctx.accounts();
    print_table(&views::accounts_table(&views::filter_accounts(&accounts, term)));
}

fn print_rooms(ctx: &DataContext, term: &str) {
    let rooms = ctx.rooms();
    print_table(&views::rooms_table(&views::filter_rooms(&rooms, term)));
}

fn print_media(ctx: &DataContext, term: &str) {
    let media = ctx.media();
    print_table(&views::media_table(&views::filter_media(&media, term)));
}

fn print_peers(ctx: &DataContext, term: &str) {
    let peers = ctx.peers();
    print_table(&views::peers_table(&views::filter_peers(&peers, term)));
}

fn print_table(table: &views::Table) {
    println!("{}", table.render().trim_end());
}

fn print_pairs(pairs: &[(&str, String)]) {
    let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    for (label, value) in pairs {
        println!("{:<width$}  {}", format!("{label}:"), value);
    }
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}
