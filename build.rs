use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;

// Exposes `graph_search::build::*` (versions, git state) for `--version`.
fn main() -> std::io::Result<()> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    Ok(())
}
