//! Check whether a configuration name resolves.

use groundwork_config::Bootstrap;

/// Succeed silently when `name` resolves; the failure exit code is the
/// scripting surface.
pub fn execute(bootstrap: &Bootstrap, name: &str) -> anyhow::Result<()> {
    let path = bootstrap.find_configuration_file(name)?;
    tracing::debug!(name, path = %path.display(), "configuration resolves");
    Ok(())
}
