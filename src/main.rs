use ghapi::{Command, Config, Error};
use log::{debug, info};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
    #[structopt(short, long, parse(from_os_str), default_value = "ghapi.toml")]
    /// config file to use
    config: PathBuf,

    #[structopt(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let opts = Options::from_args();

    // set up logging, allowing info level logging by default
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(&opts.config)?;
    let client = config.client()?;
    info!("using {}", client.base_url());
    debug!("authenticated: {}", client.is_authenticated());

    let output = opts.command.run(&client).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
