//! Command-line surface of the dashboard
//!
//! Each dashboard page maps to a subcommand. Everything except `login` and
//! `logout` passes the session gate first.

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use shared::{DateRange, Id, ListFilter, Locale, OrganizationType, Page, Unit};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::gate::{ensure_session, SessionState};
use crate::http::ApiClient;

mod account;
mod catalog;
mod movements;
mod render;

pub use render::{EMPTY_PLACEHOLDER, Output};

#[derive(Parser, Debug)]
#[command(
    name = "workshop-admin",
    about = "Administer workshops, materials, transfers and processes",
    version
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    pub json: bool,

    #[arg(long, global = true, env = "WSA_API__BASE_URL", help = "Backend API root")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Dashboard summary numbers
    Stats,
    #[command(subcommand, alias = "workshops")]
    Organizations(OrganizationsCommand),
    #[command(subcommand)]
    Materials(MaterialsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Inventory(InventoryCommand),
    #[command(subcommand)]
    Transfers(TransfersCommand),
    #[command(subcommand)]
    Processes(ProcessesCommand),
    /// Transfers and processes, newest first
    History(FilterArgs),
}

impl Command {
    /// Page this command stands in for
    pub fn page(&self) -> Page {
        match self {
            Command::Login(_) | Command::Logout => Page::Login,
            Command::Whoami => Page::Settings,
            Command::Stats => Page::Dashboard,
            Command::Organizations(cmd) => match cmd {
                OrganizationsCommand::Create(_) => Page::WorkshopCreate,
                OrganizationsCommand::Show { id } => Page::WorkshopDetail(*id),
                _ => Page::Workshops,
            },
            Command::Materials(cmd) => match cmd {
                MaterialsCommand::Create(_) => Page::MaterialCreate,
                MaterialsCommand::Show { id } => Page::MaterialDetail(*id),
                _ => Page::Materials,
            },
            Command::Users(cmd) => match cmd {
                UsersCommand::Create(_) => Page::UserCreate,
                UsersCommand::Show { id } => Page::UserDetail(*id),
                _ => Page::Users,
            },
            Command::Inventory(_) => Page::Inventory,
            Command::Transfers(cmd) => match cmd {
                TransfersCommand::Create(_) => Page::TransferCreate,
                TransfersCommand::Show { id } => Page::TransferDetail(*id),
                _ => Page::Transfers,
            },
            Command::Processes(cmd) => match cmd {
                ProcessesCommand::Create(_) => Page::ProcessCreate,
                ProcessesCommand::Show { id } => Page::ProcessDetail(*id),
                _ => Page::Processes,
            },
            Command::History(_) => Page::History,
        }
    }
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "WSA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Filters shared by every list page
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long, help = "Case-insensitive text to look for")]
    pub search: Option<String>,
    #[arg(long, help = "Status or type value; `all` disables the filter")]
    pub status: Option<String>,
    #[arg(long, help = "Earliest date, YYYY-MM-DD")]
    pub from: Option<NaiveDate>,
    #[arg(long, help = "Latest date, YYYY-MM-DD")]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ListFilter {
        let mut filter = ListFilter::new().range(DateRange {
            from: self.from,
            to: self.to,
        });
        if let Some(search) = &self.search {
            filter = filter.search(search.as_str());
        }
        if let Some(status) = &self.status {
            filter = filter.status(status);
        }
        filter
    }
}

#[derive(Subcommand, Debug)]
pub enum OrganizationsCommand {
    List(FilterArgs),
    Show { id: Id },
    Create(OrganizationArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: OrganizationPatchArgs,
    },
    Delete { id: Id },
}

#[derive(Args, Debug)]
pub struct OrganizationArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "type", help = "bank, gold_processing, silver_processing, jewelry_making, cleaning or repair")]
    pub kind: OrganizationType,
}

#[derive(Args, Debug)]
pub struct OrganizationPatchArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<OrganizationType>,
}

#[derive(Subcommand, Debug)]
pub enum MaterialsCommand {
    List(FilterArgs),
    Show { id: Id },
    Create(MaterialArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: MaterialPatchArgs,
    },
    Delete { id: Id },
}

#[derive(Args, Debug)]
pub struct MaterialArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, help = "g, pcs or ct")]
    pub unit: Unit,
}

#[derive(Args, Debug)]
pub struct MaterialPatchArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub unit: Option<Unit>,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(FilterArgs),
    Show { id: Id },
    Create(UserArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: UserPatchArgs,
    },
    Delete { id: Id },
}

#[derive(Args, Debug)]
pub struct UserArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "WSA_NEW_USER_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long)]
    pub organization: Option<Id>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub staff: bool,
}

#[derive(Args, Debug)]
pub struct UserPatchArgs {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub organization: Option<Id>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub staff: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum InventoryCommand {
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, help = "Only rows held by this organization")]
        organization: Option<Id>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TransfersCommand {
    List(FilterArgs),
    Show { id: Id },
    Create(TransferArgs),
    Accept { id: Id },
    Reject { id: Id },
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    #[arg(long)]
    pub sender: Id,
    #[arg(long)]
    pub receiver: Id,
    #[arg(long = "item", value_name = "INVENTORY=QTY", required = true)]
    pub items: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProcessesCommand {
    List(FilterArgs),
    Show { id: Id },
    Create(ProcessArgs),
    Complete { id: Id },
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    #[arg(long)]
    pub organization: Id,
    #[arg(long = "input", value_name = "INVENTORY=QTY", required = true)]
    pub inputs: Vec<String>,
    #[arg(long = "output", value_name = "MATERIAL=QTY")]
    pub outputs: Vec<String>,
}

/// Split an `ID=QTY` selection
pub(crate) fn split_selection(raw: &str) -> (&str, &str) {
    match raw.split_once('=') {
        Some((item, quantity)) => (item.trim(), quantity.trim()),
        None => (raw.trim(), ""),
    }
}

/// Run one command against the backend
pub async fn run(client: &ApiClient, command: Command, out: &Output, locale: Locale) -> ClientResult<()> {
    debug!("Running command for page {}", command.page().path(locale));

    match command {
        Command::Login(args) => return account::login(client, args, out).await,
        Command::Logout => return account::logout(client, out),
        _ => {}
    }

    let user = match ensure_session(client).await? {
        SessionState::Active { user } => user,
        SessionState::Redirect(page) => {
            debug!("Gate redirected to {}", page.path(locale));
            return Err(ClientError::Unauthorized);
        }
    };

    match command {
        Command::Login(_) | Command::Logout => Ok(()),
        Command::Whoami => account::whoami(&user, out),
        Command::Stats => catalog::stats(client, out).await,
        Command::Organizations(cmd) => catalog::organizations(client, cmd, out).await,
        Command::Materials(cmd) => catalog::materials(client, cmd, out).await,
        Command::Users(cmd) => catalog::users(client, cmd, out).await,
        Command::Inventory(cmd) => catalog::inventory(client, cmd, out).await,
        Command::Transfers(cmd) => movements::transfers(client, cmd, out).await,
        Command::Processes(cmd) => movements::processes(client, cmd, out).await,
        Command::History(filter) => movements::history(client, filter, out).await,
    }
}
