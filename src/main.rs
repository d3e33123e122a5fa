use clap::Parser;
use fundraise_board::adapters::export::write_leaderboard_csv;
use fundraise_board::core::dashboard::referral_link;
use fundraise_board::core::leaderboard::{split_podium, summarize};
use fundraise_board::core::rewards::next_reward;
use fundraise_board::core::{ConfigProvider, RankedParticipant};
use fundraise_board::utils::error::ErrorSeverity;
use fundraise_board::utils::{logger, validation::Validate};
use fundraise_board::{
    BoardConfig, CliConfig, Command, Dashboard, FileStore, FixedGrowth, Latency,
    MockParticipantSource, Result, Session,
};

type Board = Dashboard<MockParticipantSource<FileStore>, FixedGrowth>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn load_config(cli: &CliConfig) -> Result<BoardConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            BoardConfig::from_file(path)?
        }
        None => BoardConfig::default(),
    };

    if let Some(store_path) = &cli.store_path {
        config.store.path = store_path.clone();
    }
    if cli.no_latency {
        config.latency.enabled = false;
    }

    config.validate()?;
    tracing::info!("Board {} using store {}", config.label(), config.store_path());
    tracing::debug!("Board config: {:?}", config);
    Ok(config)
}

async fn run(command: Command, config: &BoardConfig) -> Result<()> {
    let store = FileStore::new(config.store_path());
    let latency = Latency::from_config(config);
    let source = MockParticipantSource::with_default_roster(store.clone(), latency);
    let dashboard: Board = Dashboard::with_rewards(
        source,
        FixedGrowth(config.monthly_growth_percent()),
        config.rewards(),
    );
    let session = Session::new(store);

    match command {
        Command::Leaderboard { csv } => {
            let ranked = dashboard.leaderboard().await?;
            let summary = summarize(&ranked);
            println!("Total raised:        ${:.2}", summary.total_raised);
            println!("Active fundraisers:  {}", summary.active_fundraisers);
            println!("Average raised:      ${:.0}", summary.average_raised);

            let (podium, others) = split_podium(&ranked);
            println!();
            println!("🏆 Top fundraisers");
            for (entry, share) in podium.iter().zip(&summary.shares) {
                print_entry(entry, *share);
            }
            if !others.is_empty() {
                println!();
                println!("All participants");
                for (entry, share) in others.iter().zip(&summary.shares[podium.len()..]) {
                    print_entry(entry, *share);
                }
            }
            if let Some(path) = csv {
                let file = std::fs::File::create(&path)?;
                write_leaderboard_csv(file, &ranked)?;
                println!("📁 Leaderboard saved to: {}", path.display());
            }
        }
        Command::Stats { user } => {
            let id = resolve_user(&session, user).await?;
            let stats = dashboard.user_stats(&id).await?;
            println!("Total raised:    ${:.2}", stats.total_raised);
            println!("Rank:            #{} of {}", stats.rank, stats.total_participants);
            println!("Percentile:      {}%", stats.percentile_rank);
            println!("Monthly growth:  {}%", stats.monthly_growth);
            println!("Referrals:       {}", stats.referrals);
        }
        Command::Rewards { user } => {
            let id = resolve_user(&session, user).await?;
            let participant = dashboard.current_user(&id).await?;
            for progress in dashboard.rewards(&id).await? {
                let mark = if progress.unlocked { "✅" } else { "🔒" };
                println!(
                    "{} {:<18} {:>5.1}%  {}",
                    mark, progress.reward.title, progress.progress, progress.reward.description
                );
            }
            let catalog = dashboard.reward_catalog();
            if let Some((reward, missing)) = next_reward(catalog, participant.total_raised) {
                println!("Next: {} (${:.2} to go)", reward.title, missing);
            }
        }
        Command::Donate { amount, user } => {
            let id = resolve_user(&session, user).await?;
            let updated = dashboard.record_donation(&id, amount).await?;
            session.refresh(&updated).await?;
            let stats = dashboard.user_stats(&id).await?;
            println!("🎉 ${:.2} has been added to your total.", amount);
            println!("New total: ${:.2} (rank #{})", updated.total_raised, stats.rank);
        }
        Command::Register { name, email } => {
            let participant = dashboard.register(&name, &email).await?;
            println!("✅ Registered {} with id {}", participant.name, participant.id);
            if let Some(code) = &participant.referral_code {
                println!("Referral code: {}", code);
            }
        }
        Command::Login { email } => {
            let participant = session.sign_in(dashboard.source(), &email).await?;
            println!("Welcome back, {}!", participant.name);
        }
        Command::Logout => {
            session.sign_out().await?;
            println!("Logged out successfully");
        }
        Command::Whoami => {
            let id = session.current_user_id().await?;
            let participant = dashboard.current_user(&id).await?;
            println!(
                "{} <{}> (id {})",
                participant.name,
                participant.email.as_deref().unwrap_or("-"),
                participant.id
            );
            if let Some(code) = &participant.referral_code {
                let link = referral_link(&config.share.referral_base_url, code);
                println!("Referral link: {}", link);
            }
        }
    }

    Ok(())
}

fn print_entry(entry: &RankedParticipant, share: u32) {
    println!(
        "#{:<3} {:<22} {:<12} ${:>10.2}  {:>3}% of total",
        entry.rank,
        entry.participant.name,
        entry.participant.department.as_deref().unwrap_or("-"),
        entry.participant.total_raised,
        share
    );
}

async fn resolve_user(session: &Session<FileStore>, explicit: Option<String>) -> Result<String> {
    match explicit {
        Some(id) => Ok(id),
        None => session.current_user_id().await,
    }
}
