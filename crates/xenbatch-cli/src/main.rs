//! xenbatch
//!
//! CLI for XEN batch minting through a sub-account factory. Derives
//! sub-account addresses, builds the `callAll` payload for a batch mint, and
//! lists existing sub-accounts with their maturity. Signing and broadcasting
//! are left to the user's wallet: `plan` prints the transaction to submit.
//!
//! Usage:
//!   xenbatch init-config --factory <addr> (--implementation <addr> | --init-code-hash <hex>)
//!   xenbatch address     --owner <addr> --index <n>
//!   xenbatch plan        --owner <addr> --amount <n> [--term <days>] [--no-donate] [--rpc <url>]
//!   xenbatch list        --owner <addr> [--create-count <n>] [--rpc <url>]
//!   xenbatch invite      --owner <addr> --base-url <url>

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use xenbatch_core::{
    config::{DeploymentConfig, SubAccountCode},
    types::{Address, Balance, SubAccountIndex, B256, U256},
};
use xenbatch_crypto::{
    derive_sub_account, derive_sub_accounts, parse_checksummed, parse_index, parse_owner,
};
use xenbatch_plan::{build_plan, collect_known_mints, known_indices, next_start_index, MintRequest};

mod input;
mod lookup;
mod rpc_client;
use lookup::{buffered_in_order, MAX_IN_FLIGHT_LOOKUPS};
use rpc_client::ChainReader;

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "xenbatch",
    version,
    about = "XEN batch mint planner: derive sub-accounts and build callAll payloads"
)]
struct Args {
    /// Path to the deployment config (JSON).
    #[arg(long, global = true, default_value = "~/.xenbatch/deployment.json")]
    deployment: PathBuf,

    /// Ethereum JSON-RPC endpoint.
    #[arg(long, global = true, default_value = "http://127.0.0.1:8545")]
    rpc: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a deployment config describing the factory and its sub-account code.
    InitConfig {
        /// Factory contract address.
        #[arg(long)]
        factory: String,
        /// Implementation the factory clones (EIP-1167 minimal proxy).
        #[arg(long, conflicts_with = "init_code_hash")]
        implementation: Option<String>,
        /// Keccak-256 of the sub-account init code, for non-proxy factories.
        #[arg(long)]
        init_code_hash: Option<String>,
        /// Contract sub-accounts mint from. Defaults to XEN on mainnet.
        #[arg(long)]
        mint_contract: Option<String>,
        /// Referral used when `plan` is given none.
        #[arg(long)]
        default_referral: Option<String>,
    },

    /// Print the address of one sub-account.
    Address {
        /// Owner account.
        #[arg(long)]
        owner: String,
        /// Sub-account index.
        #[arg(long, allow_hyphen_values = true)]
        index: String,
    },

    /// Build the batch-mint transaction for a wallet to sign.
    Plan {
        /// Owner account.
        #[arg(long)]
        owner: String,
        /// Number of sub-accounts to create.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// Lock term in days; 0 (or anything non-numeric) mints with terms 1, 2, 3, ...
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        term: String,
        /// Skip the donation (batch size is capped at 3).
        #[arg(long, default_value_t = false)]
        no_donate: bool,
        /// First unused sub-account index. Read from the factory when omitted.
        #[arg(long)]
        start_index: Option<SubAccountIndex>,
        /// Minimum donation for the whole batch, in wei (decimal or 0x hex).
        /// Read from the factory when omitted.
        #[arg(long)]
        min_donation: Option<String>,
        /// Referrer credited with part of the donation.
        #[arg(long)]
        referral: Option<String>,
        /// Print the full plan as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List existing sub-accounts with a live mint.
    List {
        /// Owner account.
        #[arg(long)]
        owner: String,
        /// Factory create-count. Read from the factory when omitted.
        #[arg(long)]
        create_count: Option<u64>,
    },

    /// Print an invite link that credits the owner as referrer.
    Invite {
        /// Owner account.
        #[arg(long)]
        owner: String,
        /// Page URL the link points at.
        #[arg(long)]
        base_url: String,
    },
}

// ── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn,xenbatch=info")
        .init();

    let args = Args::parse();
    let deployment_path = expand_tilde(&args.deployment);
    let reader = ChainReader::new(&args.rpc);

    match args.command {
        Command::InitConfig {
            factory,
            implementation,
            init_code_hash,
            mint_contract,
            default_referral,
        } => cmd_init_config(
            &deployment_path,
            &factory,
            implementation.as_deref(),
            init_code_hash.as_deref(),
            mint_contract.as_deref(),
            default_referral.as_deref(),
        ),

        Command::Address { owner, index } => {
            let cfg = load_deployment(&deployment_path)?;
            let owner = parse_owner(&owner)?;
            let index = parse_index(&index)?;
            let addr = derive_sub_account(&cfg, &owner, index);
            println!("Owner:    {}", owner.to_checksum(None));
            println!("Index:    {}", index);
            println!("Address:  {}", addr.to_checksum(None));
            Ok(())
        }

        Command::Plan {
            owner,
            amount,
            term,
            no_donate,
            start_index,
            min_donation,
            referral,
            json,
        } => {
            let cfg = load_deployment(&deployment_path)?;
            let owner = parse_owner(&owner)?;
            let donate = !no_donate;
            let amount = input::clamp_amount(&amount, donate);
            let term = input::parse_term(&term);
            let referral = input::resolve_referral(referral.as_deref(), cfg.default_referral)
                .context("parsing referral address")?;

            let start_index = match start_index {
                Some(i) => i,
                None => {
                    let count = reader.create_count(&cfg.factory, &owner).await?;
                    info!(create_count = count, "read factory create count");
                    next_start_index(count)?
                }
            };
            let min_donation: Balance = match (donate, min_donation) {
                (false, _) => U256::ZERO,
                (true, Some(v)) => v
                    .trim()
                    .parse::<U256>()
                    .map_err(|e| anyhow!("invalid --min-donation {v}: {e}"))?,
                (true, None) => reader.min_donate(&cfg.factory).await?,
            };

            let request = MintRequest::new(amount, term, start_index);
            let plan = build_plan(&cfg, &owner, &request, donate, min_donation, &referral)?;
            let outer = plan.outer_call(&cfg.factory);

            if json {
                let out = serde_json::json!({ "plan": plan, "transaction": outer });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!(
                "Batch of {} (donate={}, referral={})",
                plan.len(),
                donate,
                referral.to_checksum(None)
            );
            for op in &plan.operations {
                println!(
                    "  #{:<6} {}  term {:>3} days",
                    op.index,
                    op.target.to_checksum(None),
                    op.assigned_term
                );
            }
            println!();
            println!("Submit to: {}", outer.to.to_checksum(None));
            println!("Value:     {} wei", outer.value);
            println!("Data:      {}", outer.data);
            Ok(())
        }

        Command::List { owner, create_count } => {
            let cfg = load_deployment(&deployment_path)?;
            let owner = parse_owner(&owner)?;
            cmd_list(&reader, &cfg, &owner, create_count).await
        }

        Command::Invite { owner, base_url } => {
            let owner = parse_owner(&owner)?;
            println!("{}", input::referral_link(&base_url, &owner));
            Ok(())
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_init_config(
    path: &Path,
    factory: &str,
    implementation: Option<&str>,
    init_code_hash: Option<&str>,
    mint_contract: Option<&str>,
    default_referral: Option<&str>,
) -> anyhow::Result<()> {
    if path.exists() {
        bail!(
            "Deployment config {} already exists. Delete it first to write a new one.",
            path.display()
        );
    }

    let factory = parse_checksummed(factory).context("parsing factory address")?;
    let code = match (implementation, init_code_hash) {
        (Some(imp), None) => SubAccountCode::MinimalProxy {
            implementation: parse_checksummed(imp).context("parsing implementation address")?,
        },
        (None, Some(hash)) => SubAccountCode::InitCodeHash {
            hash: hash.trim().parse::<B256>().context("parsing init code hash")?,
        },
        _ => bail!("pass exactly one of --implementation or --init-code-hash"),
    };

    let mut cfg = DeploymentConfig::new(factory, code);
    if let Some(m) = mint_contract {
        cfg.mint_contract = parse_checksummed(m).context("parsing mint contract address")?;
    }
    if let Some(r) = default_referral {
        cfg.default_referral = parse_checksummed(r).context("parsing default referral")?;
    }
    // Same validation the loader applies.
    DeploymentConfig::from_json(&cfg.to_json_pretty()?)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, cfg.to_json_pretty()?)
        .with_context(|| format!("writing deployment config to {}", path.display()))?;

    println!("Deployment config written to {}", path.display());
    println!("Factory:        {}", cfg.factory.to_checksum(None));
    println!("Mint contract:  {}", cfg.mint_contract.to_checksum(None));
    println!("Referral:       {}", cfg.default_referral.to_checksum(None));
    Ok(())
}

async fn cmd_list(
    reader: &ChainReader,
    cfg: &DeploymentConfig,
    owner: &Address,
    create_count: Option<u64>,
) -> anyhow::Result<()> {
    let count = match create_count {
        Some(c) => c,
        None => reader.create_count(&cfg.factory, owner).await?,
    };
    if count == 0 {
        println!("No sub-accounts created for {}", owner.to_checksum(None));
        return Ok(());
    }

    let indices = known_indices(count);
    let len = next_start_index(*indices.end())? - *indices.start();
    let addresses = derive_sub_accounts(cfg, owner, *indices.start(), len)?;
    info!(count = addresses.len(), "looking up sub-accounts");

    let lookups = buffered_in_order(addresses, MAX_IN_FLIGHT_LOOKUPS, |(index, addr)| async move {
        let result = reader.user_mints(&cfg.mint_contract, &addr).await;
        (index, addr, result)
    })
    .await;

    let known = collect_known_mints(lookups);
    let now = chrono::Utc::now().timestamp();
    println!("{} live sub-account(s) for {}", known.len(), owner.to_checksum(None));
    for k in &known {
        let matures = chrono::DateTime::from_timestamp(k.mint.maturity_ts, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| k.mint.maturity_ts.to_string());
        let status = if k.mint.is_matured(now) { "claimable" } else { "locked" };
        println!(
            "  #{:<6} {}  term {:>3} days  matures {}  [{}]",
            k.index,
            k.address.to_checksum(None),
            k.mint.term,
            matures,
            status
        );
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_deployment(path: &Path) -> anyhow::Result<DeploymentConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading deployment config {}", path.display()))?;
    let cfg = DeploymentConfig::from_json(&json)
        .context("parsing deployment config; run `xenbatch init-config` to create one")?;
    Ok(cfg)
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}
