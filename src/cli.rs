use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use time::Duration;

const DEFAULT_AUTH_COOKIE_NAME: &str = "innboard_session";

pub(crate) enum RunOutcome {
    Serve(SocketAddr, innboard::config::AppConfig),
    Exit(i32),
}

pub(crate) fn run() -> RunOutcome {
    let cli = Cli::parse();
    if let Some(Command::AuthKey) = cli.command {
        return RunOutcome::Exit(run_auth_key());
    }

    let Some(store_url) = cli.store_url.clone() else {
        eprintln!("error: --store-url is required unless using a subcommand");
        return RunOutcome::Exit(2);
    };

    let auth = match resolve_auth_config(&cli) {
        Ok(auth) => auth,
        Err(err) => {
            eprintln!("error: {err}");
            return RunOutcome::Exit(2);
        }
    };

    let upload = match (cli.upload_url.clone(), cli.upload_preset.clone()) {
        (Some(endpoint), Some(preset)) => {
            Some(innboard::config::UploadConfig { endpoint, preset })
        }
        (None, None) => None,
        _ => {
            eprintln!("error: --upload-url and --upload-preset must be given together");
            return RunOutcome::Exit(2);
        }
    };

    RunOutcome::Serve(
        cli.listen,
        innboard::config::AppConfig {
            store_url,
            app_name: cli.app_name,
            auth,
            upload,
        },
    )
}

#[derive(Parser, Debug)]
#[command(
    name = "innboard",
    version,
    about = "Hotel booking administration server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Base URL of the hosted collection store.
    #[arg(long, env = "INNBOARD_STORE_URL")]
    store_url: Option<String>,
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
    #[arg(long, default_value = "Innboard")]
    app_name: String,
    #[arg(long, env = "INNBOARD_AUTH_KEY")]
    auth_key: Option<String>,
    /// Session lifetime, e.g. `12h` or `7d`. Bare numbers are seconds.
    #[arg(long, env = "INNBOARD_AUTH_TOKEN_TTL")]
    auth_token_ttl: Option<String>,
    #[arg(long, env = "INNBOARD_AUTH_COOKIE_NAME")]
    auth_cookie_name: Option<String>,
    #[arg(long, env = "INNBOARD_AUTH_COOKIE_SECURE")]
    auth_cookie_secure: bool,
    #[arg(long, env = "INNBOARD_UPLOAD_URL")]
    upload_url: Option<String>,
    #[arg(long, env = "INNBOARD_UPLOAD_PRESET")]
    upload_preset: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random key for signing admin session cookies.
    AuthKey,
}

fn run_auth_key() -> i32 {
    match innboard::auth::generate_auth_key() {
        Ok(key) => {
            println!("INNBOARD_AUTH_KEY=\"{key}\"");
            println!();
            println!("Pass it via --auth-key or the environment to enable admin sign-in.");
            0
        }
        Err(err) => {
            eprintln!("failed to generate auth key: {err}");
            1
        }
    }
}

fn resolve_auth_config(cli: &Cli) -> Result<Option<innboard::config::AuthConfig>, String> {
    let Some(key) = cli.auth_key.as_ref() else {
        if cli.auth_token_ttl.is_some() || cli.auth_cookie_name.is_some() {
            return Err("auth options require --auth-key".to_string());
        }
        return Ok(None);
    };
    let token_ttl = match cli.auth_token_ttl.as_deref() {
        Some(raw) => parse_ttl(raw)?,
        None => Duration::days(7),
    };
    Ok(Some(innboard::config::AuthConfig {
        key: key.clone(),
        token_ttl,
        cookie_name: cli
            .auth_cookie_name
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTH_COOKIE_NAME.to_string()),
        cookie_secure: cli.auth_cookie_secure,
    }))
}

fn parse_ttl(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    let (digits, unit) = match trimmed.char_indices().find(|(_, ch)| !ch.is_ascii_digit()) {
        Some((split, _)) => trimmed.split_at(split),
        None => (trimmed, "s"),
    };
    let amount: i64 = digits
        .parse()
        .map_err(|_| format!("invalid session lifetime: {raw}"))?;
    if amount <= 0 {
        return Err(format!("session lifetime must be positive: {raw}"));
    }
    match unit.trim() {
        "s" => Ok(Duration::seconds(amount)),
        "m" => Ok(Duration::minutes(amount)),
        "h" => Ok(Duration::hours(amount)),
        "d" => Ok(Duration::days(amount)),
        _ => Err(format!("invalid session lifetime unit: {raw}")),
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn parse_ttl__should_accept_suffixed_durations() {
        // Given / When / Then
        assert_eq!(parse_ttl("12h"), Ok(Duration::hours(12)));
        assert_eq!(parse_ttl("7d"), Ok(Duration::days(7)));
        assert_eq!(parse_ttl("90m"), Ok(Duration::minutes(90)));
        assert_eq!(parse_ttl("3600"), Ok(Duration::seconds(3600)));
    }

    #[test]
    fn parse_ttl__should_reject_garbage() {
        // Given / When / Then
        assert!(parse_ttl("").is_err());
        assert!(parse_ttl("0d").is_err());
        assert!(parse_ttl("soon").is_err());
        assert!(parse_ttl("5w").is_err());
    }
}
