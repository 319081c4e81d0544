use anyhow::{Context, Result};
use clap::Parser;

use g5_auth::services::oauth::{ClientConfig, OOB_REDIRECT_URL, TokenClient};

/// Obtain a bearer token from the identity service with the password grant.
///
/// Every flag can also come from its environment variable, so the same
/// variables used by services (G5_AUTH_*) work here unchanged.
/// Prints the access token (or the full `authorization` value with --header).
#[derive(Parser, Debug)]
#[command(name = "g5-token", version, about)]
struct Args {
    /// Identity service application ID
    #[arg(long = "g5-auth-client-id", env = "G5_AUTH_CLIENT_ID")]
    client_id: String,

    /// Identity service application secret
    #[arg(long = "g5-auth-client-secret", env = "G5_AUTH_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Identity service endpoint (with or without scheme)
    #[arg(long = "g5-auth-endpoint", env = "G5_AUTH_ENDPOINT", default_value = g5_auth::config::DEFAULT_AUTH_ENDPOINT)]
    endpoint: String,

    /// Service account username
    #[arg(long = "g5-auth-username", env = "G5_AUTH_USERNAME")]
    username: String,

    /// Service account password
    #[arg(long = "g5-auth-password", env = "G5_AUTH_PASSWORD", hide_env_values = true)]
    password: String,

    /// Redirect URL registered for the application
    #[arg(long = "g5-auth-redirect-url", env = "G5_AUTH_REDIRECT_URL", default_value = OOB_REDIRECT_URL)]
    redirect_url: String,

    /// Print `bearer <token>` instead of the bare token
    #[arg(long, default_value_t = false)]
    header: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    g5_auth::app::init_tracing();

    let args = Args::parse();

    let config = ClientConfig::new(args.client_id, args.client_secret, &args.endpoint)
        .with_redirect_url(args.redirect_url)
        .with_service_account(args.username, args.password);
    let http = reqwest::Client::builder()
        .build()
        .context("building http client")?;
    let client = TokenClient::new(http, config);

    let token = client
        .service_account_token()
        .await
        .context("requesting token")?;

    if args.header {
        println!("{}", token.authorization_value());
    } else {
        println!("{}", token.access_token);
    }

    Ok(())
}
