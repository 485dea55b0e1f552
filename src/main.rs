use clap::Parser;
use pointload::cli::args::{Args, Commands};
use pointload::cli::commands;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = &args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let log_level = match command {
        Commands::Import(import_args) => import_args.get_log_level(),
    };
    commands::init_logging(log_level);

    match commands::run(args) {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", anyhow::Error::from(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Pointload - Tabular Time-Series Point Ingester");
    println!("==============================================");
    println!();
    println!("Ingest time-stamped observations from delimited text, spreadsheet");
    println!("workbooks, and remote URLs into a uniform point stream.");
    println!();
    println!("USAGE:");
    println!("    pointload <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Ingest one or more tabular sources into a point stream");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a CSV with a timestamp in column 1 and values in column 2:");
    println!("    pointload import data.csv --timestamp-field 1 --value-field 2");
    println!();
    println!("    # Anchor the header past preamble lines and drop bad rows:");
    println!("    pointload import export.xlsx --timestamp-field Date --value-field Value \\");
    println!("                    --header-starts-with Date,Value --ignore-invalid-rows");
    println!();
    println!("For detailed help on the import command, use:");
    println!("    pointload import --help");
}
