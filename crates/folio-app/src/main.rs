#![forbid(unsafe_code)]

//! folio binary entry point.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use folio_app::app::{AppModel, AppOptions};
use folio_app::cli;
use folio_app::screens::ScreenId;
use folio_core::store::{JsonFileStore, ProfileStore};
use folio_runtime::{Program, ProgramConfig};

fn main() {
    let opts = cli::Opts::parse();

    let store = match &opts.state_file {
        Some(path) => JsonFileStore::open(path),
        None => JsonFileStore::default_profile(),
    };
    init_logging(&store);
    if opts.reset {
        if let Err(e) = store.clear() {
            eprintln!("warning: could not reset profile: {e}");
        }
    }
    let store: Arc<dyn ProfileStore> = Arc::new(store);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64 ^ d.as_secs())
        .unwrap_or(0x5EED);

    let model = AppModel::new(
        store,
        AppOptions {
            start_screen: ScreenId::from_name(&opts.screen).unwrap_or(ScreenId::Home),
            offline: opts.offline,
            seed,
        },
    );

    let config = ProgramConfig {
        mouse: opts.mouse,
        alt_screen: true,
        exit_after: (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)),
    };

    if let Err(e) = Program::with_config(model, config).run() {
        eprintln!("runtime error: {e}");
        std::process::exit(1);
    }
}

/// File-backed tracing, enabled only when `FOLIO_LOG` is set; the terminal
/// belongs to the UI.
fn init_logging(store: &JsonFileStore) {
    let Ok(filter) = std::env::var("FOLIO_LOG") else {
        return;
    };
    let log_path = store.path().with_file_name("folio.log");
    let Ok(file) = std::fs::File::create(&log_path) else {
        return;
    };
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
