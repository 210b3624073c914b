use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "job-board", about = "Job listing service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Run migrations and start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::parse_from(["job-board"]);
        assert_eq!(cli.command(), &Command::Serve);
    }

    #[test]
    fn parses_migrate() {
        let cli = Cli::parse_from(["job-board", "migrate"]);
        assert_eq!(cli.command(), &Command::Migrate);
    }
}
