use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Ignore SIGPIPE errors to avoid having to use let _ = write! everywhere
    // See https://github.com/rust-lang/rust/issues/46016
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    crd_to_cr::CrdToCr::parse().dispatch()
}
