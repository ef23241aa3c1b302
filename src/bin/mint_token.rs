use anyhow::Context;
use clap::Parser;

use crisol_api::auth::{generate_token, Claims};

/// Mint a signed bearer credential for the storefront API.
///
/// The server only verifies credentials; this is the operator-side tool that
/// issues them for administrators and for manual testing.
#[derive(Parser)]
#[command(name = "mint-token", version)]
struct Args {
    /// Grant the admin claim (required for any mutating route)
    #[arg(long)]
    admin: bool,

    /// Grant the superAdmin claim (writes bypass simulation mode)
    #[arg(long)]
    super_admin: bool,

    /// Hours until the credential expires
    #[arg(long, default_value_t = 24)]
    expiry_hours: i64,

    /// Signing secret; falls back to CRISOL_JWT_SECRET
    #[arg(long)]
    secret: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let secret = args
        .secret
        .or_else(|| std::env::var("CRISOL_JWT_SECRET").ok())
        .context("no signing secret: pass --secret or set CRISOL_JWT_SECRET")?;

    let claims = Claims::new(args.admin, args.super_admin, args.expiry_hours);
    println!("{}", generate_token(&claims, &secret)?);
    Ok(())
}
