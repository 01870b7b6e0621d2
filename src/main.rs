use std::io;
use std::process::ExitCode;
use wordle_helper::cli::{CliInterface, parse_cli};
use wordle_helper::logging::{LogObserver, default_log_path, init_logging};
use wordle_helper::tui::TuiInterface;
use wordle_helper::{Session, game_loop, info_log, load_default_wordbank};

fn main() -> ExitCode {
    let cli = parse_cli();

    // The grid owns the terminal, so its records go to a file.
    let log_file = if cli.cli {
        cli.log_file.clone()
    } else {
        cli.log_file.clone().or_else(default_log_path)
    };
    if let Err(e) = init_logging(cli.verbose, log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let words = match load_default_wordbank(cli.wordbank_path.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("Loaded {} words", words.len());

    let mut session = Session::new(words).with_observer(Box::new(LogObserver));

    if cli.cli {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock()).with_show(cli.show);
        game_loop(&mut session, &mut interface);
    } else {
        match TuiInterface::new(cli.show) {
            Ok(mut interface) => game_loop(&mut session, &mut interface),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
