//! Famox CLI: admin console for the Famox site data.
//!
//! Drives the same [`DataProvider`] facade as the site: the local demo store
//! when `FAMOX_DEMO_MODE` is on, the remote API otherwise. Inbox, settings,
//! and dashboard commands need an admin session, opened with
//! `famox admin login`. The session only outlives the process when the demo
//! store is durable (`FAMOX_STORAGE=redb`) or the provider is remote.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Display;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

use famox_core::config::ProviderConfig;
use famox_core::dashboard::DashboardStats;
use famox_core::filter::{self, CatalogueFilter, EnquiryFilter};
use famox_core::model::{
    CatalogueCategory, CatalogueItem, Condition, Enquiry, EnquiryCreateInput, EnquiryPatch,
    EnquiryStatus, EnquiryType, MediaPost, Project, SiteSettings, SiteSettingsPatch, Solution,
};
use famox_core::provider::{self, DataProvider};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ── CLI structure ────────────────────────────────────────────────────

/// Famox admin console.
#[derive(Parser)]
#[command(
    name = "famox",
    version,
    about = "Famox CLI: browse site content, manage enquiries, settings, and the admin session",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         FAMOX_DEMO_MODE        Use the local demo store (default: on)\n  \
         FAMOX_STORAGE          memory | redb (default: memory)\n  \
         FAMOX_STORAGE_PATH     redb file (default: ./data/famox.redb)\n  \
         FAMOX_ADMIN_PASSWORD   Demo admin password\n  \
         FAMOX_API_URL          Remote API when demo mode is off\n\n\
         {DIM}Examples:{RESET}\n  \
         famox catalogue list --category processing\n  \
         famox admin login <password>\n  \
         famox enquiries list --status new\n  \
         famox enquiries update e1 --status contacted --notes 'Called back'"
    ),
)]
struct Cli {
    /// Print raw JSON instead of formatted output.
    #[arg(long, global = true)]
    json: bool,

    /// Log filter for diagnostics on stderr.
    #[arg(long, env = "FAMOX_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Company identity and contact details.
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Machinery and equipment catalogue.
    Catalogue {
        #[command(subcommand)]
        action: CatalogueCommands,
    },
    /// Case studies.
    Projects {
        #[command(subcommand)]
        action: ContentCommands,
    },
    /// Articles, videos, and press mentions.
    Media {
        #[command(subcommand)]
        action: ContentCommands,
    },
    /// Service lines.
    Solutions {
        #[command(subcommand)]
        action: ContentCommands,
    },
    /// Sales enquiries (listing and updates need admin).
    Enquiries {
        #[command(subcommand)]
        action: EnquiryCommands,
    },
    /// Admin session.
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Admin dashboard counters.
    Dashboard,
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show the current settings.
    Show,
    /// Update one or more fields (admin).
    Set(SettingsArgs),
}

#[derive(Args)]
struct SettingsArgs {
    #[arg(long)]
    company_name: Option<String>,
    /// Digits only, including the country code.
    #[arg(long)]
    whatsapp: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone_primary: Option<String>,
    /// Empty string clears it.
    #[arg(long)]
    phone_secondary: Option<String>,
    /// Repeat for each line; replaces the whole address.
    #[arg(long = "address-line")]
    address_lines: Vec<String>,
    /// Empty string clears it.
    #[arg(long)]
    google_review_url: Option<String>,
}

impl SettingsArgs {
    fn into_patch(self) -> SiteSettingsPatch {
        SiteSettingsPatch {
            company_name: self.company_name,
            whatsapp: self.whatsapp,
            email: self.email,
            phone_primary: self.phone_primary,
            phone_secondary: self.phone_secondary,
            address_lines: (!self.address_lines.is_empty()).then_some(self.address_lines),
            google_review_url: self.google_review_url,
        }
    }
}

#[derive(Subcommand)]
enum CatalogueCommands {
    /// List catalogue items, optionally filtered.
    List {
        /// Match against title or brand.
        #[arg(long)]
        search: Option<String>,
        /// tractors, harvesters, processing, implements, facilities, other.
        #[arg(long, value_parser = parse_from_str::<CatalogueCategory>)]
        category: Option<CatalogueCategory>,
        /// Brand slug, e.g. `famox-agrotech`.
        #[arg(long)]
        brand: Option<String>,
        /// new, used, refurbished.
        #[arg(long, value_parser = parse_from_str::<Condition>)]
        condition: Option<Condition>,
    },
    /// Show one item by slug.
    Show { slug: String },
    /// List the brands in the catalogue with their filter slugs.
    Brands,
}

#[derive(Subcommand)]
enum ContentCommands {
    /// List every entry.
    List,
    /// Show one entry by slug.
    Show { slug: String },
}

#[derive(Subcommand)]
enum EnquiryCommands {
    /// List enquiries, newest first (admin).
    List {
        /// New, Contacted, Quoted, Won, Lost (any case).
        #[arg(long, value_parser = parse_from_str::<EnquiryStatus>)]
        status: Option<EnquiryStatus>,
    },
    /// Show one enquiry (admin).
    Show { id: String },
    /// Submit an enquiry as a site visitor would.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        company: Option<String>,
        /// general, quote_request, catalogue_enquiry, training, farm_setup, partnership, support.
        #[arg(long = "type", default_value = "general", value_parser = parse_from_str::<EnquiryType>)]
        enquiry_type: EnquiryType,
        #[arg(long)]
        message: String,
        /// Catalogue item the enquiry is about.
        #[arg(long)]
        item: Option<String>,
    },
    /// Change status and/or notes (admin).
    Update {
        id: String,
        #[arg(long, value_parser = parse_from_str::<EnquiryStatus>)]
        status: Option<EnquiryStatus>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Open the admin session.
    Login { password: String },
    /// Close the admin session.
    Logout,
    /// Show whether an admin session is open.
    Status,
}

fn parse_from_str<T>(s: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    s.parse().map_err(|e: T::Err| e.to_string())
}

// ── Pretty output helpers ────────────────────────────────────────────

fn header(title: &str) {
    println!("{BOLD}{CYAN}{title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).context("failed to format JSON")?;
    println!("{s}");
    Ok(())
}

fn status_color(status: EnquiryStatus) -> &'static str {
    match status {
        EnquiryStatus::New => YELLOW,
        EnquiryStatus::Contacted | EnquiryStatus::Quoted => CYAN,
        EnquiryStatus::Won => GREEN,
        EnquiryStatus::Lost => RED,
    }
}

fn print_settings(s: &SiteSettings) {
    header("Site settings");
    kv_line("Company", &s.company_name);
    kv_line("WhatsApp", &s.whatsapp_url());
    kv_line("Email", &s.email);
    kv_line("Phone", &s.phone_primary);
    if let Some(phone) = &s.phone_secondary {
        kv_line("Phone (2)", phone);
    }
    kv_line("Address", &s.address_lines.join(" "));
    if let Some(url) = &s.google_review_url {
        kv_line("Google reviews", url);
    }
    println!();
}

fn print_catalogue_list(items: &[CatalogueItem]) {
    header(&format!("Catalogue ({})", items.len()));
    if items.is_empty() {
        println!("  {DIM}(no matching items){RESET}");
    }
    for item in items {
        println!(
            "  {CYAN}├─{RESET} {BOLD}{}{RESET} {DIM}{} · {}{RESET}",
            item.slug, item.brand, item.price_display
        );
        println!("  {CYAN}│{RESET}  {}", item.title);
    }
    println!();
}

fn print_catalogue_item(item: &CatalogueItem) {
    header(&item.title);
    kv_line("Slug", &item.slug);
    kv_line("Brand", &item.brand);
    kv_line("Category", item.category.as_str());
    kv_line("Condition", item.condition.as_str());
    kv_line("Availability", &snake_name(&item.availability));
    kv_line("Price", &item.price_display);
    println!();
    println!("  {}", item.description);
    for h in &item.highlights {
        println!("  {GREEN}•{RESET} {h}");
    }
    println!();
}

fn print_project(p: &Project) {
    header(&p.title);
    kv_line("Slug", &p.slug);
    println!("  {}", p.summary);
    println!();
    kv_line("Problem", &p.problem);
    kv_line("Solution", &p.solution);
    kv_line("Outcome", &p.outcome);
    for m in &p.metrics {
        kv_line(&m.label, &m.value);
    }
    println!();
}

fn print_media_post(m: &MediaPost) {
    header(&m.title);
    kv_line("Slug", &m.slug);
    kv_line("Type", &snake_name(&m.kind));
    kv_line("Date", &m.date.to_string());
    println!("  {}", m.excerpt);
    println!();
}

fn print_solution(s: &Solution) {
    header(&s.title);
    kv_line("Slug", &s.slug);
    println!("  {}", s.blurb);
    println!();
}

fn print_slug_list<T>(title: &str, items: &[T], line: impl Fn(&T) -> (String, String)) {
    header(&format!("{title} ({})", items.len()));
    for item in items {
        let (slug, label) = line(item);
        println!("  {CYAN}├─{RESET} {BOLD}{slug}{RESET} {DIM}{label}{RESET}");
    }
    println!();
}

fn print_enquiry_list(enquiries: &[Enquiry]) {
    header(&format!("Enquiries ({})", enquiries.len()));
    if enquiries.is_empty() {
        println!("  {DIM}(no enquiries){RESET}");
    }
    for e in enquiries {
        let color = status_color(e.status);
        println!(
            "  {CYAN}├─{RESET} {BOLD}{:<12}{RESET} {color}{:<10}{RESET} {} {DIM}<{}> · {} · {}{RESET}",
            e.id,
            e.status,
            e.name,
            e.email,
            e.enquiry_type.label(),
            e.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        );
    }
    println!();
}

fn print_enquiry(e: &Enquiry) {
    header(&format!("Enquiry {}", e.id));
    kv_line("Status", &format!("{}{}{RESET}", status_color(e.status), e.status));
    kv_line("Type", e.enquiry_type.label());
    kv_line(
        "Received",
        &e.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    );
    kv_line("Name", &e.name);
    kv_line("Email", &e.email);
    if !e.phone.is_empty() {
        kv_line("Phone", &e.phone);
    }
    if let Some(company) = &e.company {
        kv_line("Company", company);
    }
    if let Some(slug) = &e.item_slug {
        kv_line("Item", slug);
    }
    println!();
    println!("  {}", e.message);
    if let Some(notes) = &e.notes {
        println!();
        println!("  {DIM}Notes:{RESET} {notes}");
    }
    println!();
}

fn print_dashboard(stats: &DashboardStats) {
    header("Dashboard");
    kv_line("Enquiries today", &stats.enquiries_today.to_string());
    kv_line("Enquiries this week", &stats.enquiries_this_week.to_string());
    kv_line("New enquiries", &stats.new_enquiries.to_string());
    kv_line("Catalogue items", &stats.catalogue_items.to_string());
    kv_line("Media posts", &stats.published_media.to_string());
    kv_line("Projects", &stats.projects.to_string());
    println!();
}

/// Serialized name of a unit enum, e.g. `in_stock`.
fn snake_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        _ => String::from("?"),
    }
}

// ── Main ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let provider = match provider::connect(&ProviderConfig::from_env()) {
        Ok(p) => p,
        Err(e) => return fail(&anyhow::Error::new(e).context("failed to connect data provider")),
    };

    let result = run(provider.as_ref(), cli.json, cli.command).await;
    if let Err(e) = provider.close().await {
        tracing::warn!(error = %e, "failed to close data provider cleanly");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(e: &anyhow::Error) -> ExitCode {
    eprintln!();
    eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
    eprintln!();
    ExitCode::FAILURE
}

async fn run(provider: &dyn DataProvider, json: bool, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Settings { action } => cmd_settings(provider, json, action).await,
        Commands::Catalogue { action } => cmd_catalogue(provider, json, action).await,
        Commands::Projects { action } => cmd_projects(provider, json, action).await,
        Commands::Media { action } => cmd_media(provider, json, action).await,
        Commands::Solutions { action } => cmd_solutions(provider, json, action).await,
        Commands::Enquiries { action } => cmd_enquiries(provider, json, action).await,
        Commands::Admin { action } => cmd_admin(provider, json, action).await,
        Commands::Dashboard => cmd_dashboard(provider, json).await,
    }
}

async fn require_admin(provider: &dyn DataProvider) -> Result<()> {
    if !provider.is_admin_authed().await? {
        bail!("admin login required, run `famox admin login <password>` first");
    }
    Ok(())
}

fn found<T>(value: Option<T>, what: &str, key: &str) -> Result<T> {
    value.with_context(|| format!("{what} '{key}' not found"))
}

// ── Command implementations ──────────────────────────────────────────

async fn cmd_settings(
    provider: &dyn DataProvider,
    json: bool,
    action: SettingsCommands,
) -> Result<()> {
    let settings = match action {
        SettingsCommands::Show => provider.settings().await?,
        SettingsCommands::Set(args) => {
            let patch = args.into_patch();
            if patch.is_empty() {
                bail!("nothing to update, pass at least one field (see `famox settings set --help`)");
            }
            require_admin(provider).await?;
            let settings = provider.update_settings(&patch).await?;
            if !json {
                success("Settings saved");
            }
            settings
        }
    };
    if json {
        return print_json(&settings);
    }
    print_settings(&settings);
    Ok(())
}

async fn cmd_catalogue(
    provider: &dyn DataProvider,
    json: bool,
    action: CatalogueCommands,
) -> Result<()> {
    match action {
        CatalogueCommands::List {
            search,
            category,
            brand,
            condition,
        } => {
            let filter = CatalogueFilter {
                search,
                category,
                brand,
                condition,
            };
            let items = filter.apply(provider.list_catalogue().await?);
            if json {
                return print_json(&items);
            }
            print_catalogue_list(&items);
        }
        CatalogueCommands::Show { slug } => {
            let item = found(provider.catalogue_item(&slug).await?, "catalogue item", &slug)?;
            if json {
                return print_json(&item);
            }
            print_catalogue_item(&item);
        }
        CatalogueCommands::Brands => {
            let brands = filter::brands(&provider.list_catalogue().await?);
            if json {
                let rows: Vec<Value> = brands
                    .iter()
                    .map(|(slug, name)| json!({ "slug": slug, "name": name }))
                    .collect();
                return print_json(&rows);
            }
            header(&format!("Brands ({})", brands.len()));
            for (slug, name) in &brands {
                println!("  {CYAN}├─{RESET} {BOLD}{name}{RESET} {DIM}--brand {slug}{RESET}");
            }
            println!();
        }
    }
    Ok(())
}

async fn cmd_projects(
    provider: &dyn DataProvider,
    json: bool,
    action: ContentCommands,
) -> Result<()> {
    match action {
        ContentCommands::List => {
            let projects = provider.list_projects().await?;
            if json {
                return print_json(&projects);
            }
            print_slug_list("Projects", &projects, |p| (p.slug.clone(), p.title.clone()));
        }
        ContentCommands::Show { slug } => {
            let project = found(provider.project(&slug).await?, "project", &slug)?;
            if json {
                return print_json(&project);
            }
            print_project(&project);
        }
    }
    Ok(())
}

async fn cmd_media(provider: &dyn DataProvider, json: bool, action: ContentCommands) -> Result<()> {
    match action {
        ContentCommands::List => {
            let posts = provider.list_media().await?;
            if json {
                return print_json(&posts);
            }
            print_slug_list("Media", &posts, |m| {
                (m.slug.clone(), format!("{} · {}", m.date, m.title))
            });
        }
        ContentCommands::Show { slug } => {
            let post = found(provider.media_post(&slug).await?, "media post", &slug)?;
            if json {
                return print_json(&post);
            }
            print_media_post(&post);
        }
    }
    Ok(())
}

async fn cmd_solutions(
    provider: &dyn DataProvider,
    json: bool,
    action: ContentCommands,
) -> Result<()> {
    match action {
        ContentCommands::List => {
            let solutions = provider.list_solutions().await?;
            if json {
                return print_json(&solutions);
            }
            print_slug_list("Solutions", &solutions, |s| (s.slug.clone(), s.title.clone()));
        }
        ContentCommands::Show { slug } => {
            let solution = found(provider.solution(&slug).await?, "solution", &slug)?;
            if json {
                return print_json(&solution);
            }
            print_solution(&solution);
        }
    }
    Ok(())
}

async fn cmd_enquiries(
    provider: &dyn DataProvider,
    json: bool,
    action: EnquiryCommands,
) -> Result<()> {
    match action {
        EnquiryCommands::List { status } => {
            require_admin(provider).await?;
            let enquiries = EnquiryFilter { status }.apply(provider.list_enquiries().await?);
            if json {
                return print_json(&enquiries);
            }
            print_enquiry_list(&enquiries);
        }
        EnquiryCommands::Show { id } => {
            require_admin(provider).await?;
            let enquiry = found(provider.enquiry(&id).await?, "enquiry", &id)?;
            if json {
                return print_json(&enquiry);
            }
            print_enquiry(&enquiry);
        }
        EnquiryCommands::Submit {
            name,
            email,
            phone,
            company,
            enquiry_type,
            message,
            item,
        } => {
            let input = EnquiryCreateInput {
                name,
                email,
                phone,
                company,
                enquiry_type,
                message,
                item_slug: item,
            };
            let enquiry = provider.create_enquiry(input).await?;
            if json {
                return print_json(&enquiry);
            }
            success(&format!("Enquiry {} submitted", enquiry.id));
        }
        EnquiryCommands::Update { id, status, notes } => {
            let patch = EnquiryPatch { status, notes };
            patch.validate()?;
            require_admin(provider).await?;
            let enquiry = found(provider.update_enquiry(&id, &patch).await?, "enquiry", &id)?;
            if json {
                return print_json(&enquiry);
            }
            success(&format!("Enquiry {} is now {}", enquiry.id, enquiry.status));
        }
    }
    Ok(())
}

async fn cmd_admin(provider: &dyn DataProvider, json: bool, action: AdminCommands) -> Result<()> {
    let authed = match action {
        AdminCommands::Login { password } => {
            if !provider.admin_login(&password).await? {
                bail!("invalid admin password");
            }
            true
        }
        AdminCommands::Logout => {
            provider.admin_logout().await?;
            false
        }
        AdminCommands::Status => provider.is_admin_authed().await?,
    };
    if json {
        return print_json(&serde_json::json!({ "authed": authed }));
    }
    if authed {
        success("Admin session open");
    } else {
        warning("No admin session");
    }
    Ok(())
}

async fn cmd_dashboard(provider: &dyn DataProvider, json: bool) -> Result<()> {
    require_admin(provider).await?;
    let stats = provider.dashboard(Utc::now()).await?;
    if json {
        return print_json(&stats);
    }
    print_dashboard(&stats);
    Ok(())
}
