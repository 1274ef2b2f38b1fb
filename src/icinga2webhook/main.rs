#[macro_use]
extern crate slog;
#[macro_use]
extern crate slog_scope;

use std::process;

use argparse::{ArgumentParser, Store};
use common::logger::Logger;

fn main() {
    let mut config_file_location = String::new();

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Forwards Icinga notification context to an HTTP endpoint");
        ap.refer(&mut config_file_location)
            .add_option(&["-c", "--config"], Store, "Configuration file")
            .required();
        ap.parse_args_or_exit();
    }

    let exit_code = {
        let _guard = slog_scope::set_global_logger(Logger::build("icinga2webhook"));

        match common::run(&config_file_location) {
            Ok(()) => 0,
            Err(error) => {
                error!("An error occurred while handling the event"; "error" => %error);
                1
            }
        }
    };

    process::exit(exit_code);
}
