mod cli;
mod config;

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use skylight_webview::{runtime, WebViewShell, WryToolkit};

/// Sleep per stepped loop iteration so the poll pump doesn't spin.
const POLL_INTERVAL: Duration = Duration::from_millis(8);

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("skylight=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "skylight=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Skylight v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load(args.config.as_deref().map(Path::new));

    if let Err(e) = run(args, config) {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }

    runtime::shutdown();
    tracing::info!("Shutdown complete");
}

fn run(args: cli::Args, config: config::AppConfig) -> skylight_webview::Result<()> {
    let mut shell = WebViewShell::create(WryToolkit::new())?;

    // The engine reads this when its extension subsystem comes up, so it
    // has to land before the first navigation.
    if let Some(dir) = &config.extension_dir {
        shell.set_extension_directory(dir)?;
    }

    let title = args.title.unwrap_or(config.window.title);
    shell.set_title(title)?;
    shell.set_default_size(
        args.width.unwrap_or(config.window.width),
        args.height.unwrap_or(config.window.height),
    )?;

    for (name, value) in &config.settings {
        shell.set_setting(name.clone(), value.clone())?;
    }

    shell.on_script_finished(|value| tracing::info!(%value, "script finished"));
    shell.on_close(|| tracing::info!("window closed"));

    let url = args.url.unwrap_or(config.homepage);
    tracing::info!(%url, "opening");
    shell.load_url(url)?;

    if args.inspector {
        shell.show_inspector()?;
    }

    match args.eval {
        Some(code) => {
            // Evaluate once the document has loaded, then keep pumping
            // until the window closes.
            let loaded = Rc::new(Cell::new(false));
            let flag = Rc::clone(&loaded);
            shell.on_document_loaded(move || {
                tracing::info!("document loaded");
                flag.set(true);
            });

            let mut pending = Some(code);
            shell.run_with(move |shell| {
                if loaded.get() {
                    if let Some(code) = pending.take() {
                        if let Err(e) = shell.execute_script(code) {
                            tracing::warn!(error = %e, "script submission failed");
                        }
                    }
                }
                std::thread::sleep(POLL_INTERVAL);
            })
        }
        None => {
            shell.on_document_loaded(|| tracing::info!("document loaded"));
            shell.run()
        }
    }
}
