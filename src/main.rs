use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use bizdash::app::App;
use bizdash::config::{Config, LatencyConfig};
use bizdash::output;
use bizdash::pages::analytics::{AnalyticsPage, TimeRange};
use bizdash::pages::dashboard::DashboardPage;
use bizdash::pages::innovation::ChatPanel;
use bizdash::pages::onboarding::OnboardingWizard;
use bizdash::pages::products::ProductsPage;
use bizdash::pages::settings::SettingsPage;
use bizdash::service::Backend;
use bizdash::service::mock::MockBackend;
use bizdash::session::Route;
use bizdash::types::{NewProduct, ProductStatus};

#[derive(Parser)]
#[command(
    name = "bizdash",
    about = "Business dashboard core: mock backend, session flow and page orchestration"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Skip simulated latency
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Walk a full session: register, sign in, onboard, visit every page, sign out
    Demo {
        #[arg(long, default_value = "demo@example.com")]
        email: String,
    },

    /// Print a mock endpoint's payload as JSON
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
    },

    /// Ask the innovation assistant, one reply per message
    Chat {
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Load the analytics page and write an HTML snapshot
    Report {
        /// Output path for the HTML report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Subcommand)]
enum FetchTarget {
    Products,
    Product { id: String },
    Metrics,
    Chart { key: String },
    DataSources,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizdash=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = load_config(&cli.config, cli.instant)?;

    match cli.command {
        Command::Demo { email } => demo(&cfg, &email).await,
        Command::Fetch { target } => fetch(&cfg, target).await,
        Command::Chat { messages } => chat(&cfg, &messages).await,
        Command::Report { output } => report(&cfg, output).await,
    }
}

fn load_config(path: &Path, instant: bool) -> Result<Config> {
    let mut cfg = Config::load_or_default(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    cfg.validate()?;
    if instant {
        cfg.latency = LatencyConfig::instant();
    }
    Ok(cfg)
}

async fn demo(cfg: &Config, email: &str) -> Result<()> {
    let mut app = App::from_config(cfg);

    let landed = app.navigate("/dashboard");
    info!(route = %landed.path(), state = ?app.session.state(), "before sign-in");

    app.session.register(email, "demo", "New Account").await;
    info!(
        state = ?app.session.state(),
        profile = app.session.active_profile().is_some(),
        "registered"
    );
    app.session.logout();

    app.session.login(email, "demo").await;
    let landed = app.navigate("/dashboard");
    info!(route = %landed.path(), state = ?app.session.state(), "after sign-in");

    let rng = match cfg.mock.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut wizard = OnboardingWizard::new(rng);
    wizard.enter(landed);
    if let Some(profile) = app.session.active_profile() {
        wizard.company.name = profile.name.clone();
        wizard.company.industry = profile.industry.clone();
    }
    wizard.next(&mut app.session);
    if let Some(id) = wizard.add_product("Widget", "Hardware") {
        wizard.delete_product(&id);
    }
    wizard.add_product("Widget", "Hardware");
    wizard.toggle_source("1");
    wizard.add_custom_source("Warehouse", "https://warehouse.example.com/api");
    let mut next = wizard.previous();
    while let Route::Onboarding(_) = next {
        info!(step = wizard.step(), title = wizard.title(), "onboarding");
        next = wizard.next(&mut app.session);
    }
    app.go(next);
    info!(onboarded = app.session.is_onboarded(), "onboarding done");

    let mut dashboard = DashboardPage::new(app.backend.clone());
    dashboard.load(&mut app.notifier).await;
    println!("{}", DashboardPage::heading(&app.session));
    for m in &dashboard.metrics {
        println!(
            "  {:<24} {:>8} {}",
            m.title,
            m.value.to_string(),
            m.change_label().unwrap_or_default()
        );
    }

    app.go(Route::Analytics);
    let mut analytics = AnalyticsPage::new(app.backend.clone());
    analytics.load(&mut app.notifier).await;
    analytics.set_time_range(TimeRange::Quarter);
    analytics.refresh(&mut app.notifier).await;
    println!("Top products by insights ({}):", analytics.time_range.label());
    for p in &analytics.top_products {
        println!("  {:<24} {:>4}", p.name, p.insights);
    }

    app.go(Route::Products);
    let mut products = ProductsPage::new(app.backend.clone());
    products.load(&mut app.notifier).await;
    products.set_search("app");
    println!(
        "Products matching \"app\": {}",
        products
            .visible()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let widget = NewProduct {
        name: "Widget".into(),
        category: "Hardware".into(),
        status: ProductStatus::Active,
    };
    if let Some(added) = products.add(widget, &mut app.notifier).await {
        if let Some(p) = products.select(&added.id) {
            println!("Added {} ({}) on {}", p.name, p.id, p.last_updated);
        }
        products.delete(&added.id);
    }
    info!(count = products.products().len(), "products after add and delete");

    app.go(Route::Innovation);
    let mut chat = ChatPanel::new(app.backend.clone());
    if let Some(reply) = chat.send("Where should we invest next quarter?").await {
        println!("Assistant: {}", reply.content);
    }
    chat.new_conversation();
    info!(messages = chat.messages().len(), "new conversation");

    app.go(Route::Settings);
    let settings = SettingsPage::new(app.backend.clone(), &app.session);
    settings.save_account(&mut app.notifier).await;
    settings.save_organization(&mut app.notifier).await;
    settings.save_data_preferences(&mut app.notifier).await;

    if let Some(other) = app.session.profiles().get(1).cloned() {
        app.session.set_active_profile(other);
    }
    println!("{}", DashboardPage::heading(&app.session));

    settings.logout(&mut app.session);
    let landed = app.navigate("/dashboard");
    info!(
        route = %landed.path(),
        authenticated = app.session.is_authenticated(),
        "after sign-out"
    );

    if let Some(first) = app.notifier.active().first().map(|t| t.id) {
        app.notifier.dismiss(first);
    }
    let errors = app.notifier.errors().count();
    let toasts = app.notifier.drain();
    println!("{} notifications pending, {} errors", toasts.len(), errors);
    Ok(())
}

async fn fetch(cfg: &Config, target: FetchTarget) -> Result<()> {
    let backend = MockBackend::from_config(cfg);
    let json = match target {
        FetchTarget::Products => serde_json::to_string_pretty(&backend.fetch_products().await?)?,
        FetchTarget::Product { id } => {
            serde_json::to_string_pretty(&backend.fetch_product_by_id(&id).await?)?
        }
        FetchTarget::Metrics => serde_json::to_string_pretty(&backend.fetch_metrics().await?)?,
        FetchTarget::Chart { key } => {
            serde_json::to_string_pretty(&backend.fetch_chart_data(&key).await?)?
        }
        FetchTarget::DataSources => {
            serde_json::to_string_pretty(&backend.fetch_data_sources().await?)?
        }
    };
    println!("{json}");
    Ok(())
}

async fn chat(cfg: &Config, messages: &[String]) -> Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(MockBackend::from_config(cfg));
    let mut panel = ChatPanel::new(backend);
    for msg in messages {
        if let Some(reply) = panel.send(msg).await {
            println!("> {msg}\n{}\n", reply.content);
        }
    }
    Ok(())
}

async fn report(cfg: &Config, output_override: Option<PathBuf>) -> Result<()> {
    let mut app = App::from_config(cfg);
    app.session.login("report@localhost", "").await;

    let mut page = AnalyticsPage::new(app.backend.clone());
    if !page.load(&mut app.notifier).await {
        anyhow::bail!("analytics data could not be loaded");
    }

    let output_path = output_override.unwrap_or_else(|| PathBuf::from(&cfg.output.path));
    let html = output::report::render(&page, app.session.active_profile())?;
    output::report::write_report(&output_path, &html)?;

    info!(path = %output_path.display(), "report written");
    println!("Report generated: {}", output_path.display());
    println!("  {} metrics", page.metrics.len());
    println!("  {} top products", page.top_products.len());
    Ok(())
}
