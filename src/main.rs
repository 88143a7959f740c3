use clap::Parser;

use hipparcos_check::cli::Cli;
use hipparcos_check::run;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    let result = run::run(&cli.file, &cli.secret, &mut stdout);
    let code = run::finish(result, &mut stdout, cli.exit_codes);
    std::process::exit(code);
}
