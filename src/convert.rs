//! The conversion pipeline: read inputs, prompt the model, write the template

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::client::ConvertClient;
use crate::config::RunConfig;
use crate::templates::TemplateStore;

/// Compose file names, in lookup priority
pub const COMPOSE_FILES: [&str; 2]
  = ["docker-compose.yaml", "docker-compose.yml"];

pub const SCHEMA_FILE: &str = "schema.json";

/// Raw text of both input files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs
{   pub compose_path: PathBuf
  , pub compose: String
  , pub schema: String
}

/// First compose file present in `dir`
pub fn locate_compose(dir: &Path)
  -> Result<PathBuf, crate::error::Error>
{   COMPOSE_FILES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
      .ok_or_else(|| {
        crate::error::Error::MissingInput(
          "Neither docker-compose.yaml nor docker-compose.yml found"
            .to_string()
        )
      })
}

fn read_text(path: &Path) -> Result<String, crate::error::Error>
{   fs::read_to_string(path).map_err(|e| {
      crate::error::Error::Io(format!(
        "error reading {}: {}", path.display(), e
      ))
    })
}

/// Read the compose file and schema from `dir`
pub fn read_inputs(dir: &Path)
  -> Result<Inputs, crate::error::Error>
{   let compose_path = locate_compose(dir)?;
    debug!("Using compose file {}", compose_path.display());
    let compose = read_text(&compose_path)?;

    let schema_path = dir.join(SCHEMA_FILE);
    if !schema_path.is_file()
    {   return Err(crate::error::Error::MissingInput(
          format!("{} not found in {}", SCHEMA_FILE, dir.display())
        ));
    }
    let schema = read_text(&schema_path)?;

    Ok(Inputs { compose_path, compose, schema })
}

/// Templates for the run: the configured directory, else the bundled set
pub fn load_templates(config: &RunConfig)
  -> Result<TemplateStore, crate::error::Error>
{   match &config.instructions_dir
    {   Some(dir) => TemplateStore::from_dir(dir)
      , None => Ok(TemplateStore::bundled())
    }
}

/// Write `content` to `path` verbatim, replacing any existing file
pub fn write_output(path: &Path, content: &str)
  -> Result<(), crate::error::Error>
{   let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {   use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let map_err = |e: std::io::Error| {
      crate::error::Error::Io(format!(
        "error writing {}: {}", path.display(), e
      ))
    };
    let mut file = options.open(path).map_err(map_err)?;
    file.write_all(content.as_bytes()).map_err(map_err)?;
    Ok(())
}

/// Run one conversion end to end. Returns the path written.
pub async fn run(
  client: &ConvertClient
, api_key: &str
, store: &TemplateStore
, config: &RunConfig
) -> Result<PathBuf, crate::error::Error>
{   let inputs = read_inputs(&config.work_dir)?;

    let matched = store.matching(&inputs.compose);
    info!(
      "Matched {} of {} service templates",
      matched.len(), store.len()
    );

    let prompt = crate::prompt::build(
      &inputs.compose, &inputs.schema, &matched
    );
    let template = client.send_prompt(api_key, &prompt).await?;

    let output = config.output_path();
    write_output(&output, &template)?;
    info!("Wrote {} bytes to {}", template.len(), output.display());
    Ok(output)
}
