use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::{debug, error};
use compose2zeabur::config::{self, RunConfig, VendorConfig, OUTPUT_FILE};
use compose2zeabur::{ConvertClient, Vendor};

#[derive(Parser)]
#[command(name = "compose2zeabur")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert docker-compose.yaml into a Zeabur template with an LLM")]
struct Cli
{   /// LLM vendor to call
    #[arg(long, value_enum, default_value = "deepseek", env = "COMPOSE2ZEABUR_VENDOR")]
    vendor: Vendor
  , /// Directory containing docker-compose.yaml and schema.json
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    dir: PathBuf
  , /// Output file, relative to --dir unless absolute
    #[arg(short, long, value_name = "FILE", default_value = OUTPUT_FILE)]
    output: PathBuf
  , /// Use the *.md snippets in this directory instead of the bundled ones
    #[arg(long, value_name = "DIR")]
    instructions_dir: Option<PathBuf>
  , /// Override the vendor's default model
    #[arg(long)]
    model: Option<String>
  , /// Override the vendor endpoint URL
    #[arg(long, value_name = "URL", env = "COMPOSE2ZEABUR_API_BASE")]
    api_base: Option<String>
  , /// Request timeout in seconds (transport default when unset)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>
  , /// Verbose logging to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8
}

fn init_logging(verbose: u8)
{   let level = match verbose
    {   0 => log::LevelFilter::Warn
      , 1 => log::LevelFilter::Info
      , 2 => log::LevelFilter::Debug
      , _ => log::LevelFilter::Trace
    };
    env_logger::Builder::new()
      .filter_level(level)
      .parse_default_env()
      .init();
}

async fn convert(cli: &Cli)
  -> Result<PathBuf, compose2zeabur::Error>
{   config::load_dotenv(&cli.dir);
    let api_key = config::api_key_from_env(cli.vendor)?;

    let mut vendor_config = VendorConfig::for_vendor(cli.vendor);
    if let Some(model) = &cli.model
    {   vendor_config.model = model.clone();
    }
    if let Some(api_base) = &cli.api_base
    {   vendor_config.api_base = api_base.clone();
    }
    vendor_config.timeout_secs = cli.timeout;
    debug!("Vendor config: {:?}", vendor_config);

    let run_config = RunConfig
    {   work_dir: cli.dir.clone()
      , output: cli.output.clone()
      , instructions_dir: cli.instructions_dir.clone()
    };

    let store = compose2zeabur::convert::load_templates(&run_config)?;
    let client = ConvertClient::new(vendor_config)?;
    compose2zeabur::convert::run(&client, &api_key, &store, &run_config).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode
{   let cli = Cli::parse();
    init_logging(cli.verbose);

    match convert(&cli).await
    {   Ok(_) => {
          println!("Successfully converted to {}", cli.output.display());
          ExitCode::SUCCESS
        }
      , Err(e) => {
          error!("Conversion failed: {:?}", e);
          println!("Error: {}", e);
          ExitCode::FAILURE
        }
    }
}
