use anyhow::Result;
use clap::Parser;

use relocate::cli::{print_error, run_candidates, run_move, run_path, Args, Command, MoveArgs};
use relocate::{logging, MoveError, Selection};

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(err) = run(args) {
        match err.downcast_ref::<MoveError>() {
            Some(move_err) => print_error(&move_err.to_string()),
            None => print_error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.config.as_deref();

    match args.command {
        Command::Move {
            file,
            symbol,
            line,
            lines,
            to,
            dry_run,
            json,
            on_conflict,
            reexport,
            yes,
        } => {
            let selection = match (symbol, line, lines) {
                (Some(name), _, _) => Selection::Symbol(name),
                (None, Some(line), _) => Selection::Cursor { line },
                (None, None, Some((start_line, end_line))) => Selection::Range {
                    start_line,
                    end_line,
                },
                (None, None, None) => anyhow::bail!("Pass one of --symbol, --line or --lines"),
            };
            let move_args = MoveArgs {
                file,
                selection,
                to,
                dry_run,
                json,
                on_conflict,
                reexport,
                yes,
            };
            run_move(&move_args, config)
        }
        Command::Candidates {
            file,
            dir,
            search,
            root,
            json,
        } => run_candidates(&file, &dir, &search, root.as_deref(), json, config),
        Command::Path { from, to } => run_path(&from, &to),
    }
}
