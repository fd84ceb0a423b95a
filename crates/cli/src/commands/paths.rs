//! Inspect the bootstrapped resolution context.

use groundwork_config::Bootstrap;

/// Print the effective search path list, highest priority first.
pub fn print_paths(bootstrap: &Bootstrap) -> anyhow::Result<()> {
    for path in bootstrap.search_paths() {
        println!("{}", path.display());
    }
    Ok(())
}

/// Print the discovered project root.
pub fn print_root(bootstrap: &Bootstrap) -> anyhow::Result<()> {
    println!("{}", bootstrap.root().display());
    Ok(())
}
