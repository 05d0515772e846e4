//! LNADDR CLI
//!
//! Command-line interface for resolving Lightning Addresses.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lnaddr_core::LightningAddress;
use lnaddr_resolver::{AddressResolver, ResolverConfig};

/// LNADDR - Lightning Address resolver
#[derive(Parser)]
#[command(name = "lnaddr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "LNADDR_TIMEOUT", default_value = "10")]
    timeout: u64,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an address and show its well-known discovery URLs
    Parse {
        /// Lightning Address (user@domain)
        address: String,
    },

    /// Look up the keysend pubkey for an address
    Keysend {
        /// Lightning Address (user@domain)
        address: String,
    },

    /// Request an invoice through LNURL-pay
    Lnurlp {
        /// Lightning Address (user@domain)
        address: String,
        /// Amount in millisatoshis
        #[arg(short, long)]
        amount: u64,
        /// Sender name, forwarded if the receiver accepts it
        #[arg(short, long, default_value = "")]
        name: String,
        /// Comment, truncated to the receiver's limit
        #[arg(short, long, default_value = "")]
        comment: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "lnaddr=debug,info"
    } else {
        "lnaddr=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ResolverConfig::new(cli.timeout);

    match cli.command {
        Commands::Parse { address } => cmd_parse(&address, cli.json),
        Commands::Keysend { address } => {
            let resolver = build_resolver(config)?;
            if !cli.json {
                println!("{} {}", "🔍 Resolving keysend target:".cyan().bold(), address);
            }
            print!("{}", cmd_keysend(&resolver, &address, cli.json).await?);
            Ok(())
        }
        Commands::Lnurlp {
            address,
            amount,
            name,
            comment,
        } => {
            let resolver = build_resolver(config)?;
            if !cli.json {
                println!(
                    "{} {} ({} msats)",
                    "⚡ Requesting invoice from:".cyan().bold(),
                    address,
                    amount
                );
            }
            print!(
                "{}",
                cmd_lnurlp(&resolver, &address, amount, &name, &comment, cli.json).await?
            );
            Ok(())
        }
    }
}

fn build_resolver(config: ResolverConfig) -> Result<AddressResolver> {
    let resolver = AddressResolver::with_config(config).context("Invalid resolver configuration")?;
    debug!(timeout_seconds = resolver.config().timeout_seconds, "resolver ready");
    Ok(resolver)
}

/// Parse an address and print its discovery URLs
fn cmd_parse(address: &str, json: bool) -> Result<()> {
    let parsed = LightningAddress::parse(address).context("Invalid Lightning Address")?;
    let keysend_url = parsed.keysend_url()?;
    let lnurlp_url = parsed.lnurlp_url()?;

    if json {
        let out = serde_json::json!({
            "username": parsed.username(),
            "domain": parsed.domain(),
            "keysend_url": keysend_url.as_str(),
            "lnurlp_url": lnurlp_url.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} {}", "📇 Lightning Address:".cyan().bold(), parsed);
    println!("   {} {}", "Username:".dimmed(), parsed.username());
    println!("   {} {}", "Domain:".dimmed(), parsed.domain());
    println!("   {} {}", "Keysend:".dimmed(), keysend_url);
    println!("   {} {}", "LNURL-pay:".dimmed(), lnurlp_url);

    Ok(())
}

/// Resolve keysend target, rendered for stdout
async fn cmd_keysend(resolver: &AddressResolver, address: &str, json: bool) -> Result<String> {
    let target = resolver
        .try_resolve_keysend(address)
        .await
        .context("Address is not resolvable via keysend")?;

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&target)?));
    }

    let mut out = format!("\n{}\n", "✅ Keysend target:".green().bold());
    out.push_str(&format!(
        "   {} {}\n",
        "Pubkey:".yellow(),
        target.pubkey.as_deref().unwrap_or("(not provided)")
    ));

    if target.custom_data.is_empty() {
        out.push_str(&format!("   {} none\n", "Custom records:".dimmed()));
    } else {
        out.push_str(&format!("   {}\n", "Custom records:".dimmed()));
        for record in &target.custom_data {
            let pairs: Vec<String> = record.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            out.push_str(&format!("     - {}\n", pairs.join(", ")));
        }
    }

    Ok(out)
}

/// Request an invoice via LNURL-pay, rendered for stdout
async fn cmd_lnurlp(
    resolver: &AddressResolver,
    address: &str,
    amount_msats: u64,
    name: &str,
    comment: &str,
    json: bool,
) -> Result<String> {
    debug!(address, amount_msats, has_name = !name.is_empty(), has_comment = !comment.is_empty(), "lnurlp request");

    let payment = resolver
        .try_resolve_lnurlp(address, amount_msats, name, comment)
        .await
        .context("Could not obtain an invoice via LNURL-pay")?;

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&payment)?));
    }

    Ok(format!(
        "\n{}\n{}\n",
        "✅ Invoice:".green().bold(),
        payment.invoice
    ))
}
