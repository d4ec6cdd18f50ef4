//! Prompt assembly

use log::trace;
use crate::templates::TemplateEntry;

const INSTRUCTIONS: &str = "<instructions>
1. Convert the docker-compose.yaml to zeabur-template.yaml based on the provided schema.
2. Use provided service templates directly when available.
3. Place config content directly in YAML instead of using volume mounts.
  Exception: configs that auto-generate at startup and reset on restart.
</instructions>";

const OUTPUT_FORMAT: &str = "<output-format>
Provide only zeabur-template.yaml content without explanations or code blocks.
</output-format>";

/// Render one matched template
fn service_block(entry: &TemplateEntry) -> String
{   format!(
      "<service>\n<name>{}</name>\n<template>{}</template>\n</service>",
      entry.service_key, entry.body
    )
}

/// `<services>` section, or an empty string when nothing matched
pub fn services_section(matched: &[&TemplateEntry]) -> String
{   if matched.is_empty()
    {   return String::new();
    }
    let blocks = matched
      .iter()
      .map(|entry| service_block(entry))
      .collect::<Vec<_>>()
      .join("\n");
    format!("<services>{}</services>", blocks)
}

/// Build the full prompt sent to the model
pub fn build(
  compose_text: &str
, schema_text: &str
, matched: &[&TemplateEntry]
) -> String
{   let prompt = format!(
      "<input>\n<docker-compose>{}</docker-compose>\n<schema>{}</schema>\n{}\n{}\n</input>\n{}\n",
      compose_text,
      schema_text,
      services_section(matched),
      INSTRUCTIONS,
      OUTPUT_FORMAT
    );
    trace!("Built prompt ({} bytes)", prompt.len());
    prompt
}
