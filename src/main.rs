//! Slint form editor for formst-poc
//!
//! This application demonstrates:
//! - One-shot fetch of a mock game record from a fixed endpoint
//! - Form state seeded from the response and edited through Slint callbacks
//! - Dynamically-sized genre/platform lists with add/rename
//! - Submit that logs the assembled data

use std::io::Write;

use log::{ error, info };
use slint::ComponentHandle;

use formst_poc::FormEditorUI;
use formst_poc::form::loader::{ self, DEFAULT_ENDPOINT };
use formst_poc::form::store;
use formst_poc::systems::InterfaceSystem;

struct ParsedArgs {
    endpoint: String,
}

fn parse_args() -> Result<ParsedArgs, String> {
    let mut endpoint = DEFAULT_ENDPOINT.to_string();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-u" | "--url" => {
                endpoint = args.next().ok_or_else(|| format!("{} requires a value", arg))?;
            }
            other => {
                return Err(format!("unknown argument '{}'", other));
            }
        }
    }

    Ok(ParsedArgs { endpoint })
}

fn configure_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Run the one-shot fetch on its own thread and marshal the outcome back
/// onto the Slint event loop.
fn spawn_initial_fetch(ui_handle: slint::Weak<FormEditorUI>, endpoint: String) {
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build fetch runtime");

        let result = runtime.block_on(loader::try_fetch_record(&endpoint));

        let dispatched = ui_handle.upgrade_in_event_loop(move |_ui| {
            match result {
                Ok(record) => {
                    info!(
                        "form record loaded ({} genres, {} platforms)",
                        record.genres.len(),
                        record.platforms.len()
                    );
                    store::seed_form(&record);
                    InterfaceSystem::show_loaded_form();
                }
                Err(err) => {
                    error!("❌ Error loading form data: {}", err);
                    store::mark_load_failed();
                    InterfaceSystem::show_load_error();
                }
            }
        });

        if let Err(err) = dispatched {
            error!("event loop unavailable for fetch result: {}", err);
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("[FORM] Starting formst-poc form editor");

    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -u <url> to override the mock endpoint.");
            std::process::exit(1);
        }
    };

    configure_logging();

    let ui_app = FormEditorUI::new().expect("Failed to create Slint UI");

    store::initialize_form_store();
    InterfaceSystem::initialize(&ui_app);

    spawn_initial_fetch(ui_app.as_weak(), parsed_args.endpoint);

    ui_app.run()?;
    Ok(())
}
