use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::domain::{CourseId, MediaId};
use storage::{SqliteStore, StoreAdapter};
use storefront::{
    cart::format_money, CredentialIssuer, DemoTokenIssuer, PlaybackProgress, SignedTokenIssuer,
    Storefront, StorefrontError,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "edustream", about = "EduStream course storefront")]
struct Cli {
    /// Config file; defaults to ./edustream.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the course catalog.
    Courses,
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    Whoami,
    Checkout,
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
}

#[derive(Subcommand, Debug)]
enum CartAction {
    Show,
    Add { course_id: String },
    Remove { course_id: String },
    Inc { course_id: String },
    Dec { course_id: String },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Subcommand, Debug)]
enum MediaAction {
    List,
    Progress {
        media_id: String,
        #[arg(long)]
        current: f64,
        #[arg(long)]
        duration: f64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = &cli.database_url {
        settings.database_url = config::normalize_database_url(url);
    }
    debug!("cli: database_url={}", settings.database_url);

    let mut storefront = open_storefront(&settings).await?;
    match run(&mut storefront, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(StorefrontError::Validation(errors)) => {
            for field in &errors.fields {
                eprintln!("{}: {}", field.field, field.message());
            }
            Ok(ExitCode::from(2))
        }
        Err(StorefrontError::NotAuthenticated) => {
            eprintln!("Please log in to complete purchase.");
            Ok(ExitCode::FAILURE)
        }
        Err(
            err @ (StorefrontError::UnknownCourse(_)
            | StorefrontError::UnknownMedia(_)
            | StorefrontError::InvalidCart(_)),
        ) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

async fn open_storefront(settings: &Settings) -> Result<Storefront> {
    let store = SqliteStore::new(&settings.database_url).await?;
    let adapter = StoreAdapter::with_namespace(Arc::new(store), settings.key_namespace.clone());
    let issuer: Arc<dyn CredentialIssuer> = match &settings.token_secret {
        Some(secret) => Arc::new(SignedTokenIssuer::new(
            secret.clone(),
            settings.token_ttl_seconds,
        )),
        None => Arc::new(DemoTokenIssuer),
    };
    Ok(Storefront::restore(adapter, issuer).await)
}

async fn run(storefront: &mut Storefront, command: Command) -> Result<(), StorefrontError> {
    match command {
        Command::Courses => {
            for course in storefront.catalog().courses() {
                println!(
                    "{:<8} {:<32} {} • {}h  ${}",
                    course.id,
                    course.title,
                    course.level,
                    course.hours,
                    format_money(course.price)
                );
            }
        }
        Command::Cart { action } => {
            match action {
                CartAction::Show => {}
                CartAction::Add { course_id } => {
                    storefront.add_course(&CourseId::new(course_id)).await?;
                }
                CartAction::Remove { course_id } => {
                    storefront.remove_from_cart(&CourseId::new(course_id)).await?;
                }
                CartAction::Inc { course_id } => {
                    storefront.inc_qty(&CourseId::new(course_id)).await?;
                }
                CartAction::Dec { course_id } => {
                    storefront.dec_qty(&CourseId::new(course_id)).await?;
                }
            }
            print_cart(storefront);
        }
        Command::Login { email, password } => {
            let session = storefront.login(&email, &password).await?;
            println!("Logged in as {}", session.user.name);
        }
        Command::Signup { email, name } => {
            let session = storefront.signup(&email, &name).await?;
            println!("Welcome, {}! Your account is ready.", session.user.name);
        }
        Command::Logout => {
            if storefront.logout().await? {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
        }
        Command::Whoami => match storefront.session() {
            Some(session) => println!("{} <{}>", session.user.name, session.user.email),
            None => println!("Not logged in"),
        },
        Command::Checkout => match storefront.checkout()? {
            Some(order_id) => println!("Order placed! ID: {order_id}"),
            None => println!("Cart is empty."),
        },
        Command::Theme { action } => {
            let theme = match action {
                ThemeAction::Show => storefront.theme(),
                ThemeAction::Toggle => storefront.toggle_theme().await?,
            };
            println!("{}", theme.as_str());
        }
        Command::Media { action } => match action {
            MediaAction::List => {
                for item in storefront.media() {
                    println!("{:<4} {:?} {}", item.id, item.kind, item.title);
                }
            }
            MediaAction::Progress {
                media_id,
                current,
                duration,
            } => {
                let item = storefront.media_item(&MediaId::new(media_id))?;
                let progress = PlaybackProgress::new(current, duration);
                println!("{} {}", item.title, progress.label());
            }
        },
    }
    Ok(())
}

fn print_cart(storefront: &Storefront) {
    let summary = storefront.cart().summary();
    if summary.rows.is_empty() {
        println!("Cart is empty. Add some courses!");
        return;
    }
    for row in &summary.rows {
        println!(
            "{:<8} {:<32} x{:<3} ${}",
            row.id, row.title, row.qty, row.line_total
        );
    }
    println!("Items: {}  Total: ${}", summary.total_qty, summary.total);
}
