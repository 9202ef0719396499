use vergen_git2::{CargoBuilder, Emitter, Git2Builder, RustcBuilder};

// Feeds the VERGEN_* variables read by `version()`. Outside a git checkout
// vergen emits nothing for git and the plain semver is shown instead.
fn main() -> anyhow::Result<()> {
  Emitter::default()
    .add_instructions(&Git2Builder::default().sha(true).commit_date(true).build()?)?
    .add_instructions(&CargoBuilder::default().debug(true).target_triple(true).build()?)?
    .add_instructions(&RustcBuilder::default().semver(true).llvm_version(true).build()?)?
    .emit()
}
