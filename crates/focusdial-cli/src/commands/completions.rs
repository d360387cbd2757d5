use clap::Command;
use clap_complete::Shell;

use super::CliResult;

pub fn run(shell: Shell, mut command: Command) -> CliResult {
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
