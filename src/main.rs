use gitlab_commits::{
    cli::Opt,
    config::{Config, Overrides},
    error::RunError,
    GitlabClient, GitlabCommitCollector,
};
use std::time::Duration;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();

    if let Err(err) = run(opt).await {
        eprintln!("error: {:#}", err);

        let code = err
            .downcast_ref::<RunError>()
            .map(RunError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(opt: Opt) -> anyhow::Result<()> {
    let overrides = Overrides {
        token: std::env::var("GITLAB_TOKEN").ok(),
        start: opt.start,
        end: opt.end,
    };
    let config = Config::load(&opt.config, overrides).map_err(RunError::from)?;

    let client = GitlabClient::new(
        &config.connection.url,
        &config.connection.private_token,
        Duration::from_secs(opt.timeout),
    )?;

    let report = GitlabCommitCollector::new(client).collect(&config).await?;
    print!("{}", report);

    Ok(())
}
