//! Print every git config entry under a section prefix
//!
//! Usage: cargo run -p gitconfig --example list_section -- beadbridge.github

use gitconfig::GitConfig;

fn main() -> Result<(), gitconfig::Error> {
    let prefix = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "beadbridge".to_string());

    let config = GitConfig::new()?;
    let pattern = format!("^{}\\.", prefix.replace('.', "\\."));
    let listing = config.get_regexp(&pattern)?;

    if listing.is_empty() {
        println!("No entries under {}", prefix);
    }
    for line in listing.lines() {
        println!("{}", line);
    }

    Ok(())
}
