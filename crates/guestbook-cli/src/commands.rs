use anyhow::Context;
use colored::Colorize;
use guestbook_log::{BlockOutcome, DeleteRequest, Guestbook};
use guestbook_server::{open_guestbook, GuestbookServer, ServerConfig};
use serde_json::json;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = ServerConfig::load(cli.config.as_deref()).context("loading configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::List => cmd_list(&open_guestbook(&config).await?, &cli.format).await,
        Command::Delete(args) => cmd_delete(&open_guestbook(&config).await?, &config, args).await,
        Command::Blocked => cmd_blocked(&open_guestbook(&config).await?, &cli.format).await,
        Command::Block(args) => cmd_block(&open_guestbook(&config).await?, args).await,
        Command::Unblock(args) => cmd_unblock(&open_guestbook(&config).await?, args).await,
    }
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let server = GuestbookServer::from_config(config).await?;
    server.serve().await?;
    Ok(())
}

async fn cmd_list(guestbook: &Guestbook, format: &OutputFormat) -> anyhow::Result<()> {
    let entries = guestbook.entries().await?;
    if let OutputFormat::Json = format {
        let rows: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(index, (drawing, meta))| {
                json!({
                    "index": index,
                    "bytes": drawing.len(),
                    "id": meta.id,
                    "ip": meta.ip,
                    "timestamp": meta.timestamp,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No drawings.");
        return Ok(());
    }
    for (index, (drawing, meta)) in entries.iter().enumerate() {
        let when = meta
            .submitted_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown time".into());
        println!(
            "{} {:>7} bytes  {}  {}  {}",
            format!("#{index}").yellow().bold(),
            drawing.len(),
            meta.ip.as_deref().unwrap_or("unknown IP").cyan(),
            when.dimmed(),
            meta.id.as_ref().map(|id| id.to_string()).unwrap_or_default().dimmed(),
        );
    }
    println!("{} drawings", entries.len().to_string().bold());
    Ok(())
}

async fn cmd_delete(
    guestbook: &Guestbook,
    config: &ServerConfig,
    args: DeleteArgs,
) -> anyhow::Result<()> {
    let secret = config
        .delete_secret
        .clone()
        .context("deleting requires a configured delete secret")?;
    let mut request = DeleteRequest::new(secret, args.index);
    if args.block {
        request = request.with_block();
    }

    let outcome = guestbook.delete(&request).await?;
    println!(
        "{} Deleted drawing {} ({} remaining)",
        "✓".green().bold(),
        format!("#{}", outcome.index).yellow(),
        outcome.remaining
    );
    match outcome.block {
        BlockOutcome::Blocked { ip } => println!("  Blocked {}", ip.cyan()),
        BlockOutcome::NoKnownIp => println!("  {}", "No IP on record, nothing blocked".dimmed()),
        BlockOutcome::Failed { ip } => println!("  {} could not block {}", "!".red().bold(), ip),
        BlockOutcome::NotRequested => {}
    }
    Ok(())
}

async fn cmd_blocked(guestbook: &Guestbook, format: &OutputFormat) -> anyhow::Result<()> {
    let ips = guestbook.blocked_ips().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ips)?),
        OutputFormat::Text if ips.is_empty() => println!("No blocked IPs."),
        OutputFormat::Text => {
            for ip in &ips {
                println!("  {}", ip.cyan());
            }
        }
    }
    Ok(())
}

async fn cmd_block(guestbook: &Guestbook, args: IpArgs) -> anyhow::Result<()> {
    if guestbook.block_ip(&args.ip).await? {
        println!("{} Blocked {}", "✓".green().bold(), args.ip.cyan());
    } else {
        println!("{} is already blocked", args.ip.cyan());
    }
    Ok(())
}

async fn cmd_unblock(guestbook: &Guestbook, args: IpArgs) -> anyhow::Result<()> {
    if guestbook.unblock_ip(&args.ip).await? {
        println!("{} Unblocked {}", "✓".green().bold(), args.ip.cyan());
    } else {
        println!("{} was not blocked", args.ip.cyan());
    }
    Ok(())
}
