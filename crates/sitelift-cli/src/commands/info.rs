//! Engine info command handler.

use sitelift_core::{EngineConfig, EngineInfo, engine_info};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(info: &EngineInfo) -> String {
    [
        format!("Version:  {}", info.version),
        format!("Protocol: v{}", info.protocol_version),
    ]
    .join("\n")
}

pub async fn handle(config: EngineConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let info = engine_info(&config).await?;

    let rendered = output::render_single(&global.output, &info, detail, |i| i.version.clone());
    output::print_output(&rendered, global.quiet);
    Ok(())
}
