#[macro_use]
extern crate slog;
#[macro_use]
extern crate slog_scope;

pub mod config;
pub mod environment;
pub mod error;
pub mod logger;
pub mod notifier;

use crate::{config::Config, error::Error, notifier::Notifier};

/// One hook invocation: load the config, snapshot the Icinga environment,
/// forward it. The first failing step aborts the rest, nothing is sent
/// twice or partially.
pub fn run(config_file_location: &str) -> Result<(), Error> {
    let config = Config::load(config_file_location)?;
    let payload = environment::from_process();

    debug!(
        "Forwarding a notification";
        "url" => config.url(),
        "fields" => payload.len()
    );

    let notifier = Notifier::new(config.timeout())?;
    notifier.notify(config.url(), &payload)
}
