use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "habitroom", version, about = "Habitroom CLI")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Task sessions
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Daily habit checklist
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Weekly and monthly progress
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Long-term goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Print the data behind one tab of the app
    View {
        tab: commands::view::TabArg,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "habitroom=debug,habitroom_core=debug"
    } else {
        "habitroom=warn,habitroom_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Report { action } => commands::report::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::View { tab } => commands::view::run(tab),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitroom", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
