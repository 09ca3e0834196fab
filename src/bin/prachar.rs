use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use prachar::config::{aws_credentials_report, has_aws_credentials, Backend};
use prachar::server::run_server;
use prachar::utils::LoggingConfig;
use prachar::{build_orchestrator, CampaignConfig, Catalog, GenerateRequest, ImageFallbackSelector, Matcher};

#[derive(Parser)]
#[command(name = "prachar", version, about = "Prachar.ai campaign orchestrator", author)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 启动 HTTP 服务
    Serve {
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// 生成一次活动并打印记录
    Generate {
        #[arg(long)]
        goal: String,
        #[arg(long, default_value = "cli_user")]
        user_id: String,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// 查看目标命中的目录条目与占位图
    Match {
        #[arg(long)]
        goal: String,
    },
    /// 列出目录、模糊规则与图片类别
    Catalog,
    /// 检查环境配置
    CheckEnv,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    LoggingConfig::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { listen } => handle_serve(listen).await?,
        Command::Generate {
            goal,
            user_id,
            pretty,
        } => handle_generate(goal, user_id, pretty).await?,
        Command::Match { goal } => handle_match(&goal),
        Command::Catalog => handle_catalog(),
        Command::CheckEnv => handle_check_env()?,
    }
    Ok(())
}

async fn handle_serve(listen: Option<SocketAddr>) -> anyhow::Result<()> {
    let config = CampaignConfig::from_env()?;
    let listen = match listen {
        Some(addr) => addr,
        None => config
            .listen
            .parse()
            .with_context(|| format!("invalid PRACHAR_LISTEN `{}`", config.listen))?,
    };
    let orchestrator = Arc::new(build_orchestrator(&config).await?);
    println!("prachar listening on http://{listen}");
    run_server(orchestrator, listen).await
}

async fn handle_generate(goal: String, user_id: String, pretty: bool) -> anyhow::Result<()> {
    let config = CampaignConfig::from_env()?;
    let orchestrator = build_orchestrator(&config).await?;
    let record = orchestrator
        .handle(&GenerateRequest::new(goal, user_id))
        .await?;

    let content = if pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{content}");
    Ok(())
}

fn handle_match(goal: &str) {
    let matcher = Matcher::default();
    let selector = ImageFallbackSelector::default();
    let matched = matcher.select_with_phase(goal);

    println!("Goal:     {goal}");
    println!("Phase:    {}", matched.phase);
    println!("Entry:    {}", matched.entry.key);
    println!("Hook:     {}", matched.entry.plan.hook);
    match selector.select_category(goal) {
        Some(category) => println!("Image:    {} ({})", category.image_url, category.name),
        None => println!("Image:    {} (generic)", selector.select_fallback_image(goal)),
    }
}

fn handle_catalog() {
    let catalog = Catalog::builtin();
    println!("{:<20} {}", "Key", "Hook");
    for entry in catalog.entries() {
        println!("{:<20} {}", entry.key, entry.plan.hook);
    }

    println!();
    println!("{:<20} {}", "Trigger", "Target");
    for rule in catalog.rules() {
        println!("{:<20} {}", rule.trigger, rule.target);
    }

    println!();
    println!("{:<12} {}", "Category", "Triggers");
    for category in ImageFallbackSelector::default().categories() {
        println!("{:<12} {}", category.name, category.triggers.join(", "));
    }
}

fn handle_check_env() -> anyhow::Result<()> {
    let config = CampaignConfig::from_env()?;

    println!("{:<32} {}", "Variable", "Value");
    for (key, value) in config.report() {
        println!("{key:<32} {value}");
    }

    println!();
    for (key, value) in aws_credentials_report() {
        println!("{:<32} {}", key, value.unwrap_or_else(|| "(unset)".into()));
    }

    let live_bedrock = !config.demo_mode && config.backend == Backend::Bedrock;
    if live_bedrock && !has_aws_credentials() {
        anyhow::bail!("live mode uses the bedrock backend but no AWS credentials were found");
    }
    println!();
    println!(
        "Mode: {}",
        if config.demo_mode { "demo (catalog only)" } else { "live" }
    );
    Ok(())
}
