//! `gitflix` CLI — encode frame sequences into a commit chain, or play one back.

#[cfg(not(feature = "demo"))]
compile_error!("the gitflix binary requires the `demo` feature (enabled by default)");

#[cfg(feature = "demo")]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    let cli = gitflix::cli::args::Cli::parse();
    gitflix::cli::run(cli)
}
