use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use tmsim::{Catalog, DescriptionLoader, Machine, MachineError};

/// Half-width of the tape window shown around each head in interactive
/// mode.
const WINDOW_RADIUS: i64 = 12;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Machine description file; prompts field-by-field when omitted
    #[clap(short, long)]
    file: Option<String>,

    /// Run a bundled example machine by name
    #[clap(short, long, conflicts_with = "file")]
    example: Option<String>,

    /// List the bundled example machines and exit
    #[clap(long)]
    list: bool,

    /// Batch mode: read one input per line from standard input
    #[clap(short, long, conflicts_with = "interactive")]
    batch: bool,

    /// Interactive mode: step through a single input
    #[clap(short, long)]
    interactive: bool,

    /// Input string for interactive mode; prompted when omitted
    #[clap(long)]
    input: Option<String>,

    /// Stop after this many steps (0 = unbounded)
    #[clap(long, default_value_t = 0)]
    max_steps: usize,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for name in Catalog::names() {
            println!("{name}");
        }
        return;
    }

    let mut machine = match load_machine(&cli) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Interactive is the default only when both ends are terminals.
    let interactive = if cli.batch {
        false
    } else if cli.interactive {
        true
    } else {
        atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
    };

    if interactive {
        run_interactive(&mut machine, &cli);
    } else {
        run_batch(&mut machine, cli.max_steps);
    }
}

/// Obtains the machine from `--example`, `--file`, or field-by-field
/// prompting.
fn load_machine(cli: &Cli) -> Result<Machine, MachineError> {
    if let Some(name) = &cli.example {
        return Catalog::get(name);
    }
    if let Some(path) = &cli.file {
        return DescriptionLoader::load(Path::new(path));
    }

    let mut description = String::new();
    for field in ["Gamma", "Sigma", "Q", "sig"] {
        let value = prompt(&format!("{field}: "));
        if !value.trim().is_empty() {
            description.push_str(&format!("{field}: {value}\n"));
        }
    }

    DescriptionLoader::load_str(&description)
}

fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
    line.trim_end().to_string()
}

/// Batch mode: one candidate input per stdin line, accept/reject per line.
/// An out-of-alphabet input is reported and skipped; processing continues
/// with the next line.
fn run_batch(machine: &mut Machine, max_steps: usize) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(input) = line else { break };

        machine.reset();
        if let Err(e) = machine.set_tape(&input) {
            println!("{input}: error: {e}");
            continue;
        }

        match run_bounded(machine, max_steps) {
            Some(true) => println!("{input}: accept"),
            Some(false) => println!("{input}: reject"),
            None => println!("{input}: no verdict after {max_steps} steps"),
        }
    }
}

/// Steps the machine under an external budget. `None` means the budget ran
/// out before the machine halted.
fn run_bounded(machine: &mut Machine, max_steps: usize) -> Option<bool> {
    if max_steps == 0 {
        return Some(machine.run());
    }

    for _ in 0..max_steps {
        if machine.has_finished() {
            break;
        }
        machine.step();
    }

    machine.has_finished().then(|| machine.has_accepted())
}

/// Interactive mode: a single input, stepped with a pause and a tape
/// window printed before every transition.
fn run_interactive(machine: &mut Machine, cli: &Cli) {
    let input = match &cli.input {
        Some(input) => input.clone(),
        None => prompt("input: "),
    };

    machine.reset();
    if let Err(e) = machine.set_tape(&input) {
        eprintln!("{e}");
        process::exit(1);
    }

    println!("Press Enter to step, q to quit.");
    loop {
        print_configuration(machine);
        if machine.has_finished() {
            break;
        }
        if cli.max_steps > 0 && machine.step_count() >= cli.max_steps {
            println!(
                "Stopped after {} steps without halting.",
                machine.step_count()
            );
            return;
        }
        if prompt("") == "q" {
            return;
        }
        machine.step();
    }

    println!(
        "{}",
        if machine.has_accepted() {
            "accepted"
        } else {
            "rejected"
        }
    );
    for (i, tape) in machine.tapes().iter().enumerate() {
        println!("tape {i}: {}", tape.contents());
    }
}

/// Prints the current state and a fixed window of each tape around its
/// head, with the head cell bracketed.
fn print_configuration(machine: &Machine) {
    println!("step {} | state {}", machine.step_count(), machine.state());

    for (i, tape) in machine.tapes().iter().enumerate() {
        let head = tape.head();
        let mut window = String::new();
        for pos in (head - WINDOW_RADIUS)..=(head + WINDOW_RADIUS) {
            if pos == head {
                window.push('[');
                window.push(tape.read(pos));
                window.push(']');
            } else {
                window.push(tape.read(pos));
            }
        }
        println!("tape {i}: {window}");
    }
}
