// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Taskdeck v{} - Terminal dashboard for a team task-management server",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("KEYBINDINGS:");
    println!("    1/2/3             Switch view (all / calendar / filter)");
    println!("    Tab               Switch focus between teams and tasks");
    println!("    j/k               Move selection");
    println!("    Enter             Select team / open task details");
    println!("    n                 Create a new task");
    println!("    s                 Cycle task scope (team selected)");
    println!("    m                 Manage team members (team selected)");
    println!("    c                 Close team view (back to My Tasks)");
    println!("    h/l               Calendar: step a day back/forward");
    println!("    t                 Calendar: jump to today");
    println!("    r                 Refresh the task list");
    println!("    q                 Quit");
    println!();
    println!("CONFIGURATION:");
    println!("    server_url in config.toml points at the task server,");
    println!("    e.g. server_url = \"http://localhost:8080\"");
}
