use clap::Args;
use std::time::Duration;
use vesyncapi::{ClientConfig, VeSyncClient};

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[clap(short, long, env = "VESYNC_USER")]
    user: String,
    #[clap(short, long, env = "VESYNC_PASSWORD", hide_env_values = true)]
    password: String,
    #[clap(long, help = "IANA timezone sent with every request")]
    timezone: Option<String>,
    #[clap(long, env = "VESYNC_BASE_URL")]
    base_url: Option<String>,
    #[clap(long, help = "request timeout in seconds")]
    timeout: Option<u64>,
}

pub(crate) fn login(mut config: ClientConfig, args: LoginArgs) -> anyhow::Result<()> {
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }

    let client = VeSyncClient::new(config)?;
    let timezone = args
        .timezone
        .unwrap_or_else(|| client.config().default_timezone.clone());
    let mut session = client.session(args.user, args.password, &timezone);

    client.login(&mut session)?;
    debug!("logged in as {}", session.username());

    let auth = session
        .auth()
        .ok_or_else(|| anyhow::anyhow!("login did not yield a token"))?;
    println!("token:      {}", auth.token);
    println!("account id: {}", auth.account_id);

    Ok(())
}
