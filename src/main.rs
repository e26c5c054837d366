use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use loginvm::auth::MockLoginService;
use loginvm::clock::{Clock, TokioClock};
use loginvm::config::Config;
use loginvm::logging::init_tracing;
use loginvm::ui::carousel::CarouselViewModel;
use loginvm::ui::login::{LoginState, LoginViewModel};

/// Drive the login and carousel view-models against the mock login service.
#[derive(Parser, Debug)]
#[command(name = "loginvm", version, about)]
struct Cli {
    /// Config file (default: ~/.config/loginvm/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Email typed into the form
    #[arg(long, default_value = "j@j.dk")]
    email: String,

    /// Password typed into the form
    #[arg(long, default_value = "12345678")]
    password: String,

    /// Number of carousel advances to wait for
    #[arg(long, default_value_t = 3)]
    ticks: u32,

    /// Print login state as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::open(cli.config.as_deref())?;

    let clock: Arc<dyn Clock> = Arc::new(TokioClock);
    run_login(&cli, &config, Arc::clone(&clock)).await?;
    run_carousel(&cli, &config, clock).await
}

async fn run_login(cli: &Cli, config: &Config, clock: Arc<dyn Clock>) -> anyhow::Result<()> {
    let service = Arc::new(MockLoginService::from_config(&config.mock_login, clock));
    let login = LoginViewModel::new(service, config.form.policy());

    login.set_email(cli.email.as_str());
    login.set_password(cli.password.as_str());
    print_login(&login.state(), cli.json)?;

    if !login.is_button_enabled() {
        println!(
            "login button disabled: email needs a '.' and {}+ chars, password {}+ chars",
            config.form.min_email_chars, config.form.min_password_chars
        );
        return Ok(());
    }

    let mut updates = login.subscribe();
    let Some(task) = login.submit() else {
        return Ok(());
    };
    let handle = tokio::spawn(task);

    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        print_login(&state, cli.json)?;
        if !state.is_submitting {
            break;
        }
    }
    handle.await.context("login task failed")?;
    Ok(())
}

async fn run_carousel(cli: &Cli, config: &Config, clock: Arc<dyn Clock>) -> anyhow::Result<()> {
    let carousel = CarouselViewModel::new(
        config.carousel.items.clone(),
        config.carousel.interval(),
        clock,
    )?;
    println!("card {}: {}", carousel.current_index(), carousel.current_card());

    if config.carousel.items.len() < 2 {
        return Ok(());
    }

    let mut cards = carousel.subscribe();
    carousel.start();
    cards.borrow_and_update();
    for _ in 0..cli.ticks {
        cards
            .changed()
            .await
            .context("carousel state channel closed")?;
        let state = cards.borrow_and_update().clone();
        println!("card {}: {}", state.current_index(), state.current_card());
    }
    carousel.stop();
    Ok(())
}

fn print_login(state: &LoginState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(state)?);
        return Ok(());
    }

    let status = if state.is_submitting {
        "submitting".to_string()
    } else if let Some(message) = &state.last_success_message {
        message.clone()
    } else if let Some(error) = &state.last_error {
        format!("error: {}", error)
    } else {
        "idle".to_string()
    };
    println!(
        "login [{}] email={} button_enabled={}",
        status,
        state.email,
        state.is_button_enabled()
    );
    Ok(())
}
