//! Printer troubleshooting demo.
//!
//! Builds a small decision table, prints it, and runs the actions that match
//! the symptoms given on the command line:
//!
//! ```text
//! decision-table --not-printing --red-light
//! ```

use std::process::ExitCode;

use clap::Parser;
use decision_table::{Action, Condition, DecisionTable, Expect, Mask, TableError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "decision-table", version, about = "Printer troubleshooting decision table")]
struct Cli {
    /// Name of the table.
    #[arg(long, default_value = "printer troubleshooting")]
    name: String,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// The printer does not print.
    #[arg(long)]
    not_printing: bool,

    /// A red light is flashing.
    #[arg(long)]
    red_light: bool,

    /// The printer is not recognised by the computer.
    #[arg(long)]
    unrecognised: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<(), TableError> {
    let mut table: DecisionTable<bool, &'static str> = DecisionTable::new(cli.name.as_str())?;

    let not_printing = Condition::new("printer does not print", 1, |args: &[bool]| args[0]);
    let red_light = Condition::new("red light is flashing", 1, |args: &[bool]| args[0]);
    let unrecognised = Condition::new("printer is unrecognised", 1, |args: &[bool]| args[0]);

    for condition in [&not_printing, &red_light, &unrecognised] {
        table.register_condition(condition)?;
    }

    let power_cable = Action::new("check the power cable", || "Check the power cable");
    let data_cable = Action::new("check the printer-computer cable", || {
        "Check the printer-computer cable"
    });
    let software = Action::new("ensure printer software is installed", || {
        "Ensure printer software is installed"
    });
    let ink = Action::new("check/replace ink", || "Check/replace ink");
    let paper_jam = Action::new("check for paper jam", || "Check for paper jam");

    for action in [&power_cable, &data_cable, &software, &ink, &paper_jam] {
        table.register_action(action)?;
    }

    use Expect::{DontCare, False, True};
    use Mask::{Check, Ignore};

    let cases = [
        ([Check, Ignore, Check], [True, DontCare, True], vec![&data_cable, &software]),
        ([Ignore, Check, Ignore], [DontCare, True, DontCare], vec![&ink]),
        ([Check, Check, Ignore], [True, False, DontCare], vec![&paper_jam]),
        ([Ignore, Ignore, Check], [DontCare, DontCare, True], vec![&software]),
        ([Check, Check, Check], [True, False, True], vec![&power_cable]),
    ];

    let conditions = [&not_printing, &red_light, &unrecognised];
    for (mask, result, actions) in cases {
        table.add_case(
            conditions.iter().copied().zip(mask),
            conditions.iter().copied().zip(result),
            actions,
        )?;
    }

    println!("{}", table);

    let steps = table.run_actions([
        (&not_printing, vec![cli.not_printing]),
        (&red_light, vec![cli.red_light]),
        (&unrecognised, vec![cli.unrecognised]),
    ])?;

    if steps.is_empty() {
        println!("No troubleshooting steps for these symptoms.");
    }
    for (n, step) in steps.iter().enumerate() {
        println!("{}. {}", n + 1, step);
    }

    Ok(())
}
