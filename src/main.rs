use call_isilon_quota::{config::Config, launcher, logging};

fn main() {
    let config = match Config::builtin() {
        Ok(config) => config,
        Err(e) => {
            logging::init(env!("CARGO_PKG_NAME"));
            log::error!("{}", e);
            std::process::exit(1)
        },
    };
    logging::init(&config.program_id);

    let result = launcher::run(&config, std::env::args_os());
    std::process::exit(launcher::report(&config, &result, &mut std::io::stderr()))
}
