// File: src/cli/mod.rs
//! Desktop front-end over the same core the Android app binds to.
mod output;

use crate::auth::{Accounts, RemoteAuth};
use crate::client::meal::Progress;
use crate::config::Config;
use crate::favorites::Favorites;
use crate::model::Response;
use crate::pantry::Pantry;
use crate::repository::{Loaded, RecipeRepository};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "kusina")]
#[command(about = "Find recipes you can cook with what is in your pantry")]
#[command(version)]
pub struct Cli {
    /// Alternate config file
    #[arg(long, global = true, env = "KUSINA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Only recipes whose title or ingredients contain this text
    #[arg(short, long, default_value = "")]
    search: String,

    /// Print at most this many recipes
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage pantry ingredients
    #[command(subcommand)]
    Pantry(PantryCommand),
    /// Manage favorite meals
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Random TheMealDB meals ranked by pantry overlap
    Meals(ListArgs),
    /// DummyJSON recipes ranked by pantry overlap
    Recipes(ListArgs),
    /// Random Spoonacular recipes ranked by pantry overlap
    Spoon(ListArgs),
    /// Spoonacular recipes similar to the given one
    Similar { recipe_id: u64 },
    /// Full details of a TheMealDB meal
    Meal { meal_id: String },
    /// Accounts stored on this device
    #[command(subcommand)]
    Account(AccountCommand),
    /// Remote identity provider sign-in
    #[command(subcommand)]
    Auth(AuthCommand),
}

#[derive(Subcommand, Debug)]
enum PantryCommand {
    List,
    Add { name: String },
    Remove { name: String },
    Clear,
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    /// Fetch details for every favorite
    List,
    Add { meal_id: String },
    Remove { meal_id: String },
    Toggle { meal_id: String },
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    Register { name: String, password: String },
    Login { name: String, password: String },
    Logout,
    Whoami,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        name: String,
    },
    /// Sign in with a Google ID token
    Google { id_token: String },
    Delete,
    SignOut,
    Whoami,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Config::load_from(p)
            .with_context(|| format!("Failed to read config {}", p.display())),
        None => Ok(Config::load_or_default()),
    }
}

fn warn_if_offline<T>(loaded: &Loaded<T>) {
    if let Some(warning) = &loaded.warning {
        eprintln!("[{}] showing cached results", warning);
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Pantry(cmd) => run_pantry(cmd),
        Command::Favorites(cmd) => run_favorites(cmd, &config).await,
        Command::Meals(args) => {
            let repo = RecipeRepository::from_config(&config)?;
            let pantry = Pantry::open()?;
            let (tx, mut rx): (Progress, _) = mpsc::unbounded_channel();
            let printer = tokio::spawn(async move {
                while let Some(update) = rx.recv().await {
                    match update {
                        Response::Loading => eprintln!("Fetching random meals..."),
                        Response::Success(meals) => eprintln!("  {} meals", meals.len()),
                        Response::Error(e) => eprintln!("  {}", e),
                    }
                }
            });
            let loaded = repo.load_meals(Some(&tx)).await;
            drop(tx);
            let _ = printer.await;
            let loaded = loaded?;
            warn_if_offline(&loaded);
            output::print_ranked(&loaded.items, &args.search, pantry.list(), args.limit);
            Ok(())
        }
        Command::Recipes(args) => {
            let repo = RecipeRepository::from_config(&config)?;
            let pantry = Pantry::open()?;
            let loaded = repo.load_recipes().await?;
            warn_if_offline(&loaded);
            output::print_ranked(&loaded.items, &args.search, pantry.list(), args.limit);
            Ok(())
        }
        Command::Spoon(args) => {
            let repo = RecipeRepository::from_config(&config)?;
            let pantry = Pantry::open()?;
            let loaded = repo.load_spoon().await?;
            warn_if_offline(&loaded);
            output::print_ranked(&loaded.items, &args.search, pantry.list(), args.limit);
            Ok(())
        }
        Command::Similar { recipe_id } => {
            let repo = RecipeRepository::from_config(&config)?;
            output::print_similar(&repo.similar(recipe_id).await?);
            Ok(())
        }
        Command::Meal { meal_id } => {
            let repo = RecipeRepository::from_config(&config)?;
            let pantry = Pantry::open()?;
            let details = repo.meal_details(&meal_id).await?;
            output::print_details(&details, pantry.list());
            Ok(())
        }
        Command::Account(cmd) => run_account(cmd),
        Command::Auth(cmd) => run_auth(cmd, &config).await,
    }
}

fn run_pantry(cmd: PantryCommand) -> Result<()> {
    let mut pantry = Pantry::open()?;
    match cmd {
        PantryCommand::List => {
            if pantry.is_empty() {
                println!("Pantry is empty.");
            }
            for item in pantry.list() {
                println!("{}", item);
            }
        }
        PantryCommand::Add { name } => {
            if !pantry.add(&name)? {
                println!("'{}' is already in the pantry.", name.trim());
            }
        }
        PantryCommand::Remove { name } => {
            if !pantry.remove(&name)? {
                println!("'{}' is not in the pantry.", name.trim());
            }
        }
        PantryCommand::Clear => pantry.clear()?,
    }
    Ok(())
}

async fn run_favorites(cmd: FavoritesCommand, config: &Config) -> Result<()> {
    let mut favorites = Favorites::open()?;
    match cmd {
        FavoritesCommand::List => {
            if favorites.all().is_empty() {
                println!("No favorites yet.");
                return Ok(());
            }
            let repo = RecipeRepository::from_config(config)?;
            for meal in repo.favorite_meals(&favorites).await {
                println!("{:>8}  {}", meal.id, meal.name);
            }
        }
        FavoritesCommand::Add { meal_id } => favorites.add(&meal_id)?,
        FavoritesCommand::Remove { meal_id } => favorites.remove(&meal_id)?,
        FavoritesCommand::Toggle { meal_id } => {
            let now = favorites.toggle(&meal_id)?;
            println!(
                "{} {}",
                meal_id,
                if now { "added to favorites" } else { "removed from favorites" }
            );
        }
    }
    Ok(())
}

fn run_account(cmd: AccountCommand) -> Result<()> {
    let mut accounts = Accounts::open()?;
    match cmd {
        AccountCommand::Register { name, password } => {
            let id = accounts.register(&name, &password)?;
            println!("Registered '{}' with id {}", name.trim(), id);
        }
        AccountCommand::Login { name, password } => {
            let user = accounts.login(&name, &password)?;
            println!("Logged in as {}", user.name);
        }
        AccountCommand::Logout => accounts.logout()?,
        AccountCommand::Whoami => match accounts.current_user() {
            Some(u) => println!("{} ({})", u.name, u.user_id),
            None => println!("Not logged in."),
        },
    }
    Ok(())
}

async fn run_auth(cmd: AuthCommand, config: &Config) -> Result<()> {
    let repo = RecipeRepository::from_config(config)?;
    let mut auth = RemoteAuth::open(repo.identity_client())?;
    match cmd {
        AuthCommand::SignIn { email, password } => {
            let user = auth.sign_in_with_email(&email, &password).await?;
            output::print_user(Some(&user));
        }
        AuthCommand::SignUp {
            email,
            password,
            name,
        } => {
            let user = auth.sign_up_with_email(&email, &password, &name).await?;
            output::print_user(Some(&user));
        }
        AuthCommand::Google { id_token } => {
            let user = auth.sign_in_with_google(&id_token).await?;
            output::print_user(Some(&user));
        }
        AuthCommand::Delete => {
            auth.delete_account().await?;
            println!("Account deleted.");
        }
        AuthCommand::SignOut => auth.sign_out()?,
        AuthCommand::Whoami => output::print_user(auth.current_user().as_ref()),
    }
    Ok(())
}
