use dictate_core::types::CommandSpec;

/// Host-level commands of the interactive loop. `dictate` itself never reaches this parser;
/// the machine claims it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    ShowPrompt,
    SendPrompt,
    Status,
    Commands,
    Quit,
    Unknown(String),
}

impl HostCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.strip_prefix('/').unwrap_or(line) {
            "prompt" => Self::ShowPrompt,
            "send" => Self::SendPrompt,
            "status" => Self::Status,
            "commands" | "help" => Self::Commands,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

pub fn command_listing(registered: &[CommandSpec]) -> String {
    let mut out = String::new();
    for cmd in registered {
        out.push_str(&format!("/{:<10} {}\n", cmd.name, cmd.description));
    }
    out.push_str("/prompt     show the prompt buffer\n");
    out.push_str("/send       print and clear the prompt buffer\n");
    out.push_str("/status     show the recording state\n");
    out.push_str("/quit       exit");
    out
}
