use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

/// Mint an HS256 access token the marketplace API accepts.
///
/// Output is a compact JWT carrying `{ id, exp, iat }`, signed with the same
/// shared secret the server reads from `JWT_SECRET`. Handy for curl sessions
/// and local frontends when no auth server is running.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Shared HS256 secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// User id to put in the `id` claim. Default: random UUID v4.
    #[arg(long)]
    user_id: Option<Uuid>,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl: u64,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    iat: Option<u64>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Serialize)]
struct Claims {
    id: String,
    exp: u64,
    iat: u64,
}

fn now_unix() -> Result<u64, std::time::SystemTimeError> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.secret.is_empty() {
        return Err("secret must not be empty".into());
    }

    let user_id = args.user_id.unwrap_or_else(Uuid::new_v4);
    let iat = match args.iat {
        Some(iat) => iat,
        None => now_unix()?,
    };
    let claims = Claims {
        id: user_id.to_string(),
        exp: iat + args.ttl,
        iat,
    };

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());
    let token = jsonwebtoken::encode(
        &header,
        &claims,
        &EncodingKey::from_secret(args.secret.as_bytes()),
    )?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    println!("id: {}", claims.id);
    println!("iat: {}", claims.iat);
    println!("exp: {}", claims.exp);
    println!("header: Authorization: Bearer {}", token);

    Ok(())
}
